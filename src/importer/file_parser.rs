// ==========================================
// 资产分类 / 部门管理 - 表格读取器实现
// ==========================================
// 阶段 0: 文件解码 → 表头校验 → 行记录
// 支持: Excel (.xlsx/.xlsm/.xls/.xlsb/.ods) / CSV (.csv)
// ==========================================

use crate::domain::import::ImportRow;
use crate::importer::error::ImportError;
use calamine::{open_workbook_auto_from_rs, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

// ==========================================
// 选中的文件
// ==========================================

/// 用户选择的单个文件（文件名 + 原始字节）
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// 从磁盘读取文件
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        Ok(Self { name, bytes })
    }

    /// 小写扩展名（无扩展名返回空串）
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase()
    }
}

/// 文件选择事件（可能未选择任何文件）
#[derive(Debug, Clone, Default)]
pub struct FileEvent {
    pub files: Vec<SelectedFile>,
}

impl FileEvent {
    pub fn single(file: SelectedFile) -> Self {
        Self { files: vec![file] }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// 取第一个文件（其余忽略）
    pub fn into_first(self) -> Option<SelectedFile> {
        self.files.into_iter().next()
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 把文件字节解码为矩形字符串网格（第一个工作表）
// 实现者: ExcelParser, CsvParser
pub trait FileParser: Send + Sync {
    fn parse_to_grid(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>, ImportError>;
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_grid(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>, ImportError> {
        if bytes.is_empty() {
            return Err(ImportError::ParseError("empty file".to_string()));
        }

        // 自动识别 xlsx / xls / xlsb / ods
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        // 读取第一个 sheet（无工作表时返回空网格,由表头校验拒绝）
        let sheet_names = workbook.sheet_names();
        let Some(sheet_name) = sheet_names.first().cloned() else {
            warn!("工作簿中没有工作表");
            return Ok(Vec::new());
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        // 区域不从 A 列开始时左侧补空,保证列位置与表头一致
        let col_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);

        let grid = range
            .rows()
            .map(|row| {
                let mut cells = vec![String::new(); col_offset];
                cells.extend(row.iter().map(|cell| cell.to_string()));
                cells
            })
            .collect::<Vec<_>>();

        debug!(sheet = %sheet_name, rows = grid.len(), "工作表解码完成");
        Ok(grid)
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_grid(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>, ImportError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        let mut grid = Vec::new();
        for result in reader.records() {
            let record = result?;
            grid.push(record.iter().map(str::to_string).collect());
        }

        Ok(grid)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn for_extension(ext: &str) -> Result<Box<dyn FileParser>, ImportError> {
        match ext {
            "csv" => Ok(Box::new(CsvParser)),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Box::new(ExcelParser)),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn parse(&self, file: &SelectedFile) -> Result<Vec<Vec<String>>, ImportError> {
        Self::for_extension(&file.extension())?.parse_to_grid(&file.bytes)
    }
}

// ==========================================
// 表头校验与行组装
// ==========================================

/// 校验实际表头
///
/// # 规则
/// - 实际列数 >= 期望列数
/// - 每个期望表头与同位置实际表头相等（去首尾空白后比较）
/// - 允许尾部多余列,不允许换序
pub fn verify_headers(actual: &[String], expected: &[String]) -> Result<(), ImportError> {
    let matches = actual.len() >= expected.len()
        && expected
            .iter()
            .zip(actual.iter())
            .all(|(e, a)| e == a.trim());

    if matches {
        Ok(())
    } else {
        Err(ImportError::HeaderMismatch {
            expected: expected.to_vec(),
        })
    }
}

/// 网格 → 行记录（第一行为表头,整行空白的数据行跳过）
pub fn rows_from_grid(
    grid: Vec<Vec<String>>,
    expected_headers: &[String],
) -> Result<Vec<ImportRow>, ImportError> {
    let mut rows = grid.into_iter();
    let actual_headers = rows.next().unwrap_or_default();
    verify_headers(&actual_headers, expected_headers)?;

    Ok(rows
        .map(|cells| ImportRow::from_cells(expected_headers, &cells))
        .filter(|row| !row.is_blank())
        .collect())
}

/// 读取表格文件为行记录
///
/// 解码在阻塞线程池中执行；返回的 future 只能消费一次。
///
/// # 返回
/// - Ok(Vec<ImportRow>): 数据行（不含表头）
/// - Err(HeaderMismatch / ParseError / UnsupportedFormat)
pub async fn read_excel_file(
    file: SelectedFile,
    expected_headers: &[String],
) -> Result<Vec<ImportRow>, ImportError> {
    let expected = expected_headers.to_vec();
    tokio::task::spawn_blocking(move || {
        let grid = UniversalFileParser.parse(&file)?;
        rows_from_grid(grid, &expected)
    })
    .await?
}
