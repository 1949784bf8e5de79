// ==========================================
// 资产分类 / 部门管理 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 文件类（致命） / 校验类（整批拦截） / 上传类（单行隔离）
// ==========================================

use crate::domain::import::ValidationError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("no file selected")]
    NoFileSelected,

    #[error("column order is incorrect, expected: {}", expected.join(", "))]
    HeaderMismatch { expected: Vec<String> },

    #[error("unsupported file format: {0} (only .xlsx/.xlsm/.xls/.xlsb/.ods/.csv)")]
    UnsupportedFormat(String),

    #[error("failed to read file: {0}")]
    FileReadError(String),

    #[error("failed to parse spreadsheet: {0}")]
    ParseError(String),

    // ===== 数据校验错误 =====
    #[error("{} validation error(s)", errors.len())]
    ValidationFailure { errors: Vec<ValidationError> },

    // ===== 远端数据错误 =====
    #[error("failed to load existing data: {0}")]
    ExistingDataError(String),

    #[error("row {row} upload failed: {message}")]
    RowUploadFailure { row: usize, message: String },

    #[error("batch processing failed: {0}")]
    BatchProcessError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 是否为文件层面的致命错误（整次导入终止）
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            ImportError::NoFileSelected
                | ImportError::HeaderMismatch { .. }
                | ImportError::UnsupportedFormat(_)
                | ImportError::FileReadError(_)
                | ImportError::ParseError(_)
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::ParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ParseError(err.to_string())
    }
}

// 实现 From<tokio::task::JoinError>（解析任务崩溃）
impl From<tokio::task::JoinError> for ImportError {
    fn from(err: tokio::task::JoinError) -> Self {
        ImportError::ParseError(err.to_string())
    }
}
