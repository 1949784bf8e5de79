// ==========================================
// 资产分类 / 部门管理 - REST 客户端
// ==========================================
// 职责: 共享 reqwest::Client、拼接 URL、统一状态码检查与 JSON 解析
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AppConfig;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// 后端 REST 服务的 HTTP 客户端
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: Url,
}

impl RestClient {
    /// 按应用配置创建（根地址 + 请求超时）
    pub fn from_config(config: &AppConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Self::with_client(client, &config.api_base_url)
    }

    /// 复用已有 reqwest::Client
    pub fn with_client(client: reqwest::Client, base_url: &str) -> ApiResult<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| ApiError::InvalidInput(format!("api_base_url: {}", e)))?;
        Ok(Self { client, base_url })
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// 拼接路径段（逐段百分号编码）
    pub fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidInput(format!("api_base_url: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        debug!(url = %url, "请求地址");
        Ok(url)
    }

    /// 非 2xx 转换为 ApiError::Status（保留原始响应体）
    pub async fn ensure_success(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// 解析 JSON 响应体
    pub async fn parse_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// 仅检查状态码
    pub async fn check_status(response: Response) -> ApiResult<()> {
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// 读取创建接口返回的标识（JSON 字符串或纯文本）
    pub async fn parse_identifier(response: Response) -> ApiResult<String> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str::<String>(&text).unwrap_or_else(|_| text.trim().to_string()))
    }
}
