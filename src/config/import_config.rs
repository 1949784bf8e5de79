// ==========================================
// 资产分类 / 部门管理 - 导入配置
// ==========================================
// 职责: 描述一次导入所需的表头、规则、数据源与刷新回调
// 红线: 不包含导入流程逻辑（由 ExcelImportService 编排）
// ==========================================

use crate::domain::import::{ExistingRecord, ImportRow, ValidationRule};
use crate::domain::types::UploadMode;
use crate::importer::error::ImportError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

// ==========================================
// ImportTarget Trait
// ==========================================
// 用途: 导入编排器访问外部数据源的唯一接口
// 实现者: DepartmentImportTarget, AssetCategoryImportTarget（及测试桩）
#[async_trait]
pub trait ImportTarget: Send + Sync {
    /// 读取服务端当前记录（用于唯一性 / 关联校验）
    ///
    /// 缺省实现返回空集合（不做跨批次校验）
    async fn get_existing_data(&self) -> Result<Vec<ExistingRecord>, ImportError> {
        Ok(Vec::new())
    }

    /// 创建单个实体
    ///
    /// # 返回
    /// - Ok(()): 服务端接受
    /// - Err: 该行失败（不影响其余行）
    async fn create_entity(&self, row: &ImportRow) -> Result<(), ImportError>;

    /// 上传模式（缺省逐行）
    fn upload_mode(&self) -> UploadMode {
        UploadMode::PerRow
    }

    /// 整批处理（仅 UploadMode::Batch 时调用）
    async fn process_data(&self, _rows: &[ImportRow]) -> Result<(), ImportError> {
        Err(ImportError::BatchProcessError(
            "batch processing is not supported by this target".to_string(),
        ))
    }
}

/// 导入完成后的刷新回调
pub type ReloadCallback = Arc<dyn Fn() + Send + Sync>;

// ==========================================
// ImportConfig
// ==========================================
// 红线: expected_headers 顺序必须与文件第一行完全一致
#[derive(Clone)]
pub struct ImportConfig {
    pub expected_headers: Vec<String>,
    pub entity_name: String,
    pub rules: Vec<ValidationRule>,
    pub target: Arc<dyn ImportTarget>,
    pub load_data_method: Option<ReloadCallback>,
}

impl ImportConfig {
    pub fn new(entity_name: &str, expected_headers: &[&str], target: Arc<dyn ImportTarget>) -> Self {
        Self {
            expected_headers: expected_headers.iter().map(|h| h.to_string()).collect(),
            entity_name: entity_name.to_string(),
            rules: Vec::new(),
            target,
            load_data_method: None,
        }
    }

    pub fn with_rules(mut self, rules: Vec<ValidationRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn on_loaded<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.load_data_method = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for ImportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportConfig")
            .field("entity_name", &self.entity_name)
            .field("expected_headers", &self.expected_headers)
            .field("rules", &self.rules.len())
            .field("upload_mode", &self.target.upload_mode())
            .field("has_reload", &self.load_data_method.is_some())
            .finish()
    }
}
