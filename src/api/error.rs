// ==========================================
// 资产分类 / 部门管理 - API 层错误类型
// ==========================================
// 职责: REST 调用错误 + 服务端错误体 → 用户可读消息
// 错误体优先级: errors（校验错误表）→ InnerMessage → detail → 默认文本
// ==========================================

use crate::i18n::t;
use serde_json::Value;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    /// 网络 / DNS / TLS 等请求层失败
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 服务端返回非 2xx
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// 提交前本地校验失败（缺失字段名等）
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 响应体无法解析
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP 状态码（仅 Status 变体）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// 提取面向用户的服务端消息
    pub fn server_message(&self) -> String {
        match self {
            ApiError::Status { body, .. } => {
                extract_server_message(body).unwrap_or_else(|| t("server.fallback"))
            }
            ApiError::InvalidInput(msg) => msg.clone(),
            ApiError::Request(e) => e.to_string(),
            ApiError::Decode(_) => t("server.fallback"),
        }
    }
}

/// 解析服务端错误体
///
/// # 规则
/// - errors: 对象,取全部值（数组展开）,丢弃空值,以换行连接
/// - InnerMessage: 字符串
/// - detail: 字符串
/// - 以上均无 → None
pub fn extract_server_message(body: &str) -> Option<String> {
    let data: Value = serde_json::from_str(body).ok()?;

    if let Some(errors) = data.get("errors").and_then(Value::as_object) {
        let mut messages = Vec::new();
        for value in errors.values() {
            match value {
                Value::Array(items) => messages.extend(items.iter().filter_map(message_text)),
                other => messages.extend(message_text(other)),
            }
        }
        return Some(messages.join("\n"));
    }

    ["InnerMessage", "detail"]
        .iter()
        .filter_map(|key| data.get(*key))
        .find_map(message_text)
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
