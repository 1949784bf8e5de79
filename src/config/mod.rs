// ==========================================
// 资产分类 / 部门管理 - 配置层
// ==========================================
// 职责: 应用配置（文件 + 环境变量）与导入配置
// ==========================================

pub mod config_manager;
pub mod import_config;

// 重导出核心配置类型
pub use config_manager::{config_keys, default_config_path, AppConfig, ConfigError, ConfigManager};
pub use import_config::{ImportConfig, ImportTarget, ReloadCallback};
