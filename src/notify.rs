// ==========================================
// 资产分类 / 部门管理 - 提示消息
// ==========================================
// 职责: 带级别的简短用户提示（summary + detail）
// 实现: MessageLog（收集,供界面 / 测试读取）, ToastService（便捷入口）
// ==========================================

use crate::i18n::t;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// 默认显示时长（毫秒）
pub const DEFAULT_LIFE_MS: u64 = 3000;

/// 提示级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// 本地化的标题
    pub fn summary(&self) -> String {
        match self {
            Severity::Success => t("toast.success"),
            Severity::Info => t("toast.info"),
            Severity::Warn => t("toast.warn"),
            Severity::Error => t("toast.error"),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// 单条提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub life_ms: u64,
}

impl Notification {
    /// 以级别默认标题构造
    pub fn new(severity: Severity, detail: impl Into<String>) -> Self {
        Self {
            severity,
            summary: severity.summary(),
            detail: detail.into(),
            life_ms: DEFAULT_LIFE_MS,
        }
    }

    pub fn success(detail: impl Into<String>) -> Self {
        Self::new(Severity::Success, detail)
    }

    pub fn info(detail: impl Into<String>) -> Self {
        Self::new(Severity::Info, detail)
    }

    pub fn warn(detail: impl Into<String>) -> Self {
        Self::new(Severity::Warn, detail)
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Self::new(Severity::Error, detail)
    }

    pub fn with_life(mut self, life_ms: u64) -> Self {
        self.life_ms = life_ms;
        self
    }
}

// ==========================================
// Notifier Trait
// ==========================================
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    /// 清空已显示的提示（缺省无操作）
    fn clear(&self) {}
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

// ==========================================
// MessageLog - 收集型提示
// ==========================================
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Mutex<Vec<Notification>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前全部提示的快照
    pub fn messages(&self) -> Vec<Notification> {
        self.messages
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// 取出并清空
    pub fn drain(&self) -> Vec<Notification> {
        self.messages
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    /// 指定级别的提示数量
    pub fn count(&self, severity: Severity) -> usize {
        self.messages()
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }
}

impl Notifier for MessageLog {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(notification);
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.clear();
        }
    }
}

// ==========================================
// ToastService - 提示便捷入口
// ==========================================
pub struct ToastService<N: Notifier> {
    notifier: N,
    life_ms: u64,
}

impl<N: Notifier> ToastService<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            notifier,
            life_ms: DEFAULT_LIFE_MS,
        }
    }

    pub fn with_life(mut self, life_ms: u64) -> Self {
        self.life_ms = life_ms;
        self
    }

    /// 显示提示（标题取本地化的级别名）
    pub fn show(&self, message: &str, severity: Severity) {
        self.notifier
            .notify(Notification::new(severity, message).with_life(self.life_ms));
    }

    /// 显示服务端错误: 一条提示,标题为操作结果,正文为服务端消息
    pub fn show_server_error(&self, summary: &str, err: &crate::api::ApiError) {
        warn!(status = ?err.status(), error = %err, "服务端请求失败");
        let mut notification = Notification::error(err.server_message()).with_life(self.life_ms);
        notification.summary = summary.to_string();
        self.notifier.notify(notification);
    }

    pub fn clear(&self) {
        self.notifier.clear();
    }
}
