// ==========================================
// 资产分类 / 部门管理 - 配置管理器
// ==========================================
// 职责: 应用配置加载（文件 → 环境变量覆写）
// 存储: <config_dir>/asset-admin/config.json
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置键（环境变量）
pub mod config_keys {
    pub const API_BASE_URL: &str = "ASSET_ADMIN_API_URL";
    pub const LOCALE: &str = "ASSET_ADMIN_LOCALE";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("invalid config file {path}: {message}")]
    FormatError { path: String, message: String },

    #[error("invalid config value (key: {key}, value: {value})")]
    ValueError { key: String, value: String },
}

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 后端 REST 服务根地址
    pub api_base_url: String,
    /// 界面语言（en / ar / zh-CN）
    pub locale: String,
    /// HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 提示消息显示时长（毫秒）
    pub notification_life_ms: u64,
    /// 分页大小
    pub page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            locale: "ar".to_string(),
            request_timeout_secs: 30,
            notification_life_ms: 3000,
            page_size: 10,
        }
    }
}

impl AppConfig {
    /// 基本合法性校验
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValueError {
                key: "api_base_url".to_string(),
                value: self.api_base_url.clone(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::ValueError {
                key: "page_size".to_string(),
                value: self.page_size.to_string(),
            });
        }
        Ok(())
    }
}

// ==========================================
// ConfigManager - 配置加载
// ==========================================
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// 使用指定配置文件
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// 使用默认配置文件路径
    pub fn with_default_path() -> Self {
        Self::new(default_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 加载配置
    ///
    /// # 顺序
    /// 1. 文件不存在 → 默认值
    /// 2. 文件存在 → JSON 反序列化（缺失字段用默认值）
    /// 3. 环境变量覆写
    /// 4. 校验
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut config = if self.path.exists() {
            let raw = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::ReadError {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
            serde_json::from_str::<AppConfig>(&raw).map_err(|e| ConfigError::FormatError {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            debug!(path = %self.path.display(), "配置文件不存在，使用默认配置");
            AppConfig::default()
        };

        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        config.validate()?;

        info!(api_base_url = %config.api_base_url, locale = %config.locale, "配置加载完成");
        Ok(config)
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("asset-admin")
        .join("config.json")
}

/// 环境变量覆写（lookup 便于测试注入）
fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(config_keys::API_BASE_URL).filter(|v| !v.trim().is_empty()) {
        config.api_base_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(locale) = lookup(config_keys::LOCALE).filter(|v| !v.trim().is_empty()) {
        config.locale = locale.trim().to_string();
    }
}
