// crates/gf_io/src/sources_csv.rs

//! 场源表导入导出
//!
//! 支持的输入格式：
//! - 分隔符：逗号、分号、制表符或空白（自动识别）
//! - 表头可选，列名不区分大小写并接受常见别名
//! - 无表头时按列数定位：3 列为 `x,z,rho`（自动命名 `pt{n}`），
//!   4 列及以上为 `name,x,z,rho[,y[,radius]]`
//! - 以 `#` 开头的行视为注释
//! - 逗号、分号、制表符分隔时字段可用双引号包裹
//!
//! 默认宽松模式：无效行被跳过并记录在 [`ImportReport`] 中；
//! 严格模式下遇到第一条无效行即返回错误。
//!
//! # 使用示例
//!
//! ```
//! use gf_io::sources_csv::{parse_sources, CsvOptions};
//!
//! let content = "name,x,z,rho\np1,0,10,2000\np2,50,bad,2000\n";
//! let report = parse_sources(content, &CsvOptions::default()).unwrap();
//! assert_eq!(report.sources.len(), 1);
//! assert_eq!(report.skipped.len(), 1);
//! ```

use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use gf_physics::source::{Source, SourceInput, SourceRules};

use crate::error::{IoError, IoResult};

/// 字段分隔符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `\t`
    Tab,
    /// 任意连续空白
    Whitespace,
}

impl Delimiter {
    /// 根据一行样本识别分隔符
    pub fn detect(sample: &str) -> Self {
        if sample.contains(',') {
            Self::Comma
        } else if sample.contains(';') {
            Self::Semicolon
        } else if sample.contains('\t') {
            Self::Tab
        } else {
            Self::Whitespace
        }
    }

    /// 单字节分隔符，空白分隔为 `None`
    fn byte(&self) -> Option<u8> {
        match self {
            Self::Comma => Some(b','),
            Self::Semicolon => Some(b';'),
            Self::Tab => Some(b'\t'),
            Self::Whitespace => None,
        }
    }
}

/// 导入选项
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// 分隔符，`None` 为自动识别
    pub delimiter: Option<Delimiter>,
    /// 是否有表头，`None` 为自动识别（首行没有任何数值字段即视为表头）
    pub has_header: Option<bool>,
    /// 严格模式：任一无效行即失败
    pub strict: bool,
    /// 注释行前缀
    pub comment_prefix: Option<char>,
    /// 场源验证规则
    pub rules: SourceRules,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: None,
            strict: false,
            comment_prefix: Some('#'),
            rules: SourceRules::default(),
        }
    }
}

impl CsvOptions {
    /// 严格模式
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Default::default()
        }
    }

    /// 设置验证规则
    pub fn with_rules(mut self, rules: SourceRules) -> Self {
        self.rules = rules;
        self
    }

    /// 指定分隔符
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
}

/// 被跳过的行
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 行号（从 1 开始）
    pub line: usize,
    /// 原因
    pub reason: String,
}

/// 导入结果
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// 通过解析和验证的场源（文件顺序）
    pub sources: Vec<Source>,
    /// 被跳过的行
    pub skipped: Vec<SkippedRow>,
    /// 实际使用的分隔符
    pub delimiter: Delimiter,
    /// 是否识别到表头
    pub has_header: bool,
}

impl ImportReport {
    /// 是否全部行都被接受
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// 列位置
#[derive(Debug, Clone, Copy)]
struct Columns {
    name: Option<usize>,
    x: usize,
    z: usize,
    rho: usize,
    y: Option<usize>,
    radius: Option<usize>,
}

const NAME_ALIASES: &[&str] = &["name", "id", "label"];
const X_ALIASES: &[&str] = &["x", "easting", "east", "longitude", "lon"];
const Z_ALIASES: &[&str] = &["z", "depth"];
const RHO_ALIASES: &[&str] = &["rho", "density", "dens"];
const Y_ALIASES: &[&str] = &["y", "northing", "north", "latitude", "lat"];
const RADIUS_ALIASES: &[&str] = &["radius", "r"];

fn find_column(fields: &[String], aliases: &[&str]) -> Option<usize> {
    fields
        .iter()
        .position(|f| aliases.iter().any(|a| f.eq_ignore_ascii_case(a)))
}

impl Columns {
    /// 首行至少含一个必需列名时才视为表头
    fn looks_like_header(fields: &[String]) -> bool {
        fields.iter().all(|f| f.parse::<f64>().is_err())
            && [X_ALIASES, Z_ALIASES, RHO_ALIASES]
                .iter()
                .any(|aliases| find_column(fields, aliases).is_some())
    }

    fn from_header(fields: &[String]) -> IoResult<Self> {
        let require = |column: &'static str, aliases: &[&str]| {
            find_column(fields, aliases).ok_or_else(|| IoError::MissingColumn {
                column,
                header: fields.join(","),
            })
        };

        Ok(Self {
            name: find_column(fields, NAME_ALIASES),
            x: require("x", X_ALIASES)?,
            z: require("z", Z_ALIASES)?,
            rho: require("rho", RHO_ALIASES)?,
            y: find_column(fields, Y_ALIASES),
            radius: find_column(fields, RADIUS_ALIASES),
        })
    }
}

/// 一条记录：起始行号与去除首尾空白后的字段
type Record = (usize, Vec<String>);

/// 从文件加载场源
pub fn load_sources(path: &Path, options: &CsvOptions) -> IoResult<ImportReport> {
    let content = std::fs::read_to_string(path).map_err(|e| IoError::read(path, e))?;
    parse_content(&content, options, &path.display().to_string())
}

/// 从字符串解析场源
pub fn parse_sources(content: &str, options: &CsvOptions) -> IoResult<ImportReport> {
    parse_content(content, options, "<string>")
}

fn is_comment(line: &str, options: &CsvOptions) -> bool {
    options.comment_prefix.is_some_and(|p| line.starts_with(p))
}

/// 按分隔符切分记录
///
/// 单字节分隔符交给 `csv` 读取器，支持引号包裹的字段；
/// 空白分隔逐行切分，不支持引号。
fn read_records(content: &str, delimiter: Delimiter, options: &CsvOptions) -> IoResult<Vec<Record>> {
    let Some(byte) = delimiter.byte() else {
        return Ok(content
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !is_comment(l, options))
            .map(|(line, l)| (line, l.split_whitespace().map(str::to_string).collect()))
            .collect());
    };

    let comment = options
        .comment_prefix
        .filter(char::is_ascii)
        .map(|c| c as u8);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(byte)
        .comment(comment)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, |p| p.line() as usize);
        records.push((line, record.iter().map(str::to_string).collect()));
    }
    Ok(records)
}

fn parse_content(content: &str, options: &CsvOptions, file: &str) -> IoResult<ImportReport> {
    let first = content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !is_comment(l, options));
    let Some(first) = first else {
        return Ok(ImportReport {
            sources: Vec::new(),
            skipped: Vec::new(),
            delimiter: options.delimiter.unwrap_or(Delimiter::Comma),
            has_header: false,
        });
    };

    let delimiter = options.delimiter.unwrap_or_else(|| Delimiter::detect(first));
    let mut records = read_records(content, delimiter, options)?.into_iter().peekable();

    let has_header = match (options.has_header, records.peek()) {
        (Some(flag), _) => flag,
        (None, Some((_, fields))) => Columns::looks_like_header(fields),
        (None, None) => false,
    };
    let columns = match records.next_if(|_| has_header) {
        Some((_, fields)) => Some(Columns::from_header(&fields)?),
        None => None,
    };
    debug!(?delimiter, has_header, "解析场源表 {}", file);

    let mut sources = Vec::new();
    let mut skipped = Vec::new();

    for (row_index, (line, fields)) in records.enumerate() {
        let result = match columns {
            Some(cols) => row_by_header(&fields, &cols),
            None => row_by_position(&fields, row_index + 1),
        }
        .and_then(|input| {
            let source = input.parse().map_err(|e| e.to_string())?;
            source.validate(&options.rules).map_err(|e| e.to_string())?;
            Ok(source)
        });

        match result {
            Ok(source) => sources.push(source),
            Err(message) if options.strict => {
                return Err(IoError::ParseError {
                    file: file.to_string(),
                    line,
                    message,
                });
            }
            Err(reason) => skipped.push(SkippedRow { line, reason }),
        }
    }

    if !skipped.is_empty() {
        let preview: Vec<usize> = skipped.iter().take(5).map(|s| s.line).collect();
        warn!(
            "{}: 跳过 {} 行无效数据 (前几行: {:?}{})",
            file,
            skipped.len(),
            preview,
            if skipped.len() > 5 { "..." } else { "" }
        );
    }

    Ok(ImportReport {
        sources,
        skipped,
        delimiter,
        has_header,
    })
}

fn row_by_header(fields: &[String], cols: &Columns) -> Result<SourceInput, String> {
    let required = cols.x.max(cols.z).max(cols.rho) + 1;
    if fields.len() < required {
        return Err(format!("列数不足: 期望至少 {}, 实际 {}", required, fields.len()));
    }
    let cell = |i: Option<usize>| i.and_then(|i| fields.get(i)).cloned();
    Ok(SourceInput {
        name: cell(cols.name).unwrap_or_default(),
        x: fields[cols.x].clone(),
        z: fields[cols.z].clone(),
        rho: fields[cols.rho].clone(),
        y: cell(cols.y),
        radius: cell(cols.radius),
    })
}

fn row_by_position(fields: &[String], row_index: usize) -> Result<SourceInput, String> {
    match fields.len() {
        3 => Ok(SourceInput::new(
            &format!("pt{row_index}"),
            &fields[0],
            &fields[1],
            &fields[2],
        )),
        n if n >= 4 => Ok(SourceInput {
            y: fields.get(4).cloned(),
            radius: fields.get(5).cloned(),
            ..SourceInput::new(&fields[0], &fields[1], &fields[2], &fields[3])
        }),
        n => Err(format!("无法识别的列数 {n}（需要 3 或 4 列以上）")),
    }
}

/// 写出场源表
///
/// 表头为 `name,x,z,rho`；任一场源有非零 `y` 或半径时追加相应列。
/// 名称等非数值字段加引号，含分隔符或以 `#` 开头的名称可原样读回。
pub fn write_sources<W: Write>(sources: &[Source], writer: W) -> IoResult<()> {
    let with_y = sources.iter().any(|s| s.y != 0.0);
    let with_radius = sources.iter().any(|s| s.radius.is_some());

    let mut w = BufWriter::new(writer);
    write!(w, "name,x,z,rho")?;
    if with_y {
        write!(w, ",y")?;
    }
    if with_radius {
        write!(w, ",radius")?;
    }
    writeln!(w)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(&mut w);
    for s in sources {
        let mut record = vec![
            s.name.clone(),
            s.x.to_string(),
            s.z.to_string(),
            s.rho.to_string(),
        ];
        if with_y {
            record.push(s.y.to_string());
        }
        if with_radius {
            record.push(s.radius.map(|r| r.to_string()).unwrap_or_default());
        }
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    drop(csv_writer);
    w.flush()?;
    Ok(())
}

/// 保存场源表到文件
pub fn save_sources(path: &Path, sources: &[Source]) -> IoResult<()> {
    let file = std::fs::File::create(path).map_err(|e| IoError::write(path, e))?;
    write_sources(sources, file)?;
    debug!("已保存 {} 个场源到 {}", sources.len(), path.display());
    Ok(())
}
