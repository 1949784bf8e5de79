// ==========================================
// 资产分类 / 部门管理 - 核心库
// ==========================================
// 职责: 层级实体（资产分类、部门）的批量导入与树视图
// 技术栈: Rust + calamine + reqwest
// 系统定位: 管理后台核心（界面由外部应用承载）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 表格读取 / 校验 / 上传编排
pub mod importer;

// 树视图层 - 映射 / 过滤 / 展开折叠
pub mod tree;

// 列表视图 - 过滤与排序
pub mod listing;

// 通知（提示消息）
pub mod notify;

// API 层 - REST 客户端
pub mod api;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{FieldType, ImportStage, SortOrder, UploadMode};

// 导入相关
pub use domain::import::{
    ExistingRecord, FieldView, ImportResult, ImportRow, ImportWarning, ValidationError,
    ValidationResult, ValidationRule,
};

// 领域实体
pub use domain::entity::{
    AssetCategoryBriefDto, AssetCategoryDto, AssetCategoryTreeDto, DepartmentDto,
    DepartmentListDto,
};

// 导入器
pub use importer::{ExcelImportService, FileEvent, ImportError, SelectedFile, ValidationEngine};

// 配置
pub use config::{AppConfig, ConfigManager, ImportConfig, ImportTarget};

// 树
pub use tree::{TreeEntity, TreeMapper, TreeNode, TreeView};

// 通知
pub use notify::{MessageLog, Notification, Notifier, Severity};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "asset-admin";
