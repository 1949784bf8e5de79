// ==========================================
// 资产分类 / 部门管理 - 资产分类接口
// ==========================================
// 端点:
//   GET    /api/AssetCategories?PageNumber=&PageSize=&SearchTerm=
//   GET    /api/AssetCategories/{name}
//   GET    /api/AssetCategories/tree
//   GET    /api/AssetCategories/list
//   POST   /api/AssetCategories
//   PUT    /api/AssetCategories/{name}
//   DELETE /api/AssetCategories/{name}
// ==========================================

use crate::api::client::RestClient;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::entity::{
    AssetCategoryBriefDto, AssetCategoryDto, AssetCategoryTreeDto, CreateAssetCategoryCommand,
    PaginatedList, UpdateAssetCategoryCommand,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// 分页查询参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page_number: u32,
    pub page_size: u32,
    pub search_term: Option<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: 10,
            search_term: None,
        }
    }
}

impl PageQuery {
    /// 查询串参数（空白搜索词省略）
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("PageNumber", self.page_number.to_string()),
            ("PageSize", self.page_size.to_string()),
        ];
        if let Some(term) = self.search_term.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            params.push(("SearchTerm", term.to_string()));
        }
        params
    }
}

#[async_trait]
pub trait AssetCategoriesApi: Send + Sync {
    async fn paginated(&self, query: &PageQuery) -> ApiResult<PaginatedList<AssetCategoryBriefDto>>;

    async fn get(&self, name: &str) -> ApiResult<AssetCategoryDto>;

    async fn tree(&self) -> ApiResult<Vec<AssetCategoryTreeDto>>;

    async fn list(&self) -> ApiResult<Vec<AssetCategoryBriefDto>>;

    /// 新建,返回服务端分配的 name
    async fn create(&self, command: &CreateAssetCategoryCommand) -> ApiResult<String>;

    async fn update(&self, command: &UpdateAssetCategoryCommand) -> ApiResult<()>;

    async fn delete(&self, name: &str) -> ApiResult<()>;
}

#[async_trait]
impl<A: AssetCategoriesApi + ?Sized> AssetCategoriesApi for Arc<A> {
    async fn paginated(&self, query: &PageQuery) -> ApiResult<PaginatedList<AssetCategoryBriefDto>> {
        (**self).paginated(query).await
    }

    async fn get(&self, name: &str) -> ApiResult<AssetCategoryDto> {
        (**self).get(name).await
    }

    async fn tree(&self) -> ApiResult<Vec<AssetCategoryTreeDto>> {
        (**self).tree().await
    }

    async fn list(&self) -> ApiResult<Vec<AssetCategoryBriefDto>> {
        (**self).list().await
    }

    async fn create(&self, command: &CreateAssetCategoryCommand) -> ApiResult<String> {
        (**self).create(command).await
    }

    async fn update(&self, command: &UpdateAssetCategoryCommand) -> ApiResult<()> {
        (**self).update(command).await
    }

    async fn delete(&self, name: &str) -> ApiResult<()> {
        (**self).delete(name).await
    }
}

pub struct AssetCategoriesClient {
    rest: RestClient,
}

impl AssetCategoriesClient {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl AssetCategoriesApi for AssetCategoriesClient {
    #[instrument(skip(self))]
    async fn paginated(&self, query: &PageQuery) -> ApiResult<PaginatedList<AssetCategoryBriefDto>> {
        let url = self.rest.url(&["api", "AssetCategories"])?;
        let response = self
            .rest
            .http()
            .get(url)
            .query(&query.to_params())
            .send()
            .await?;
        RestClient::parse_response(response).await
    }

    #[instrument(skip(self))]
    async fn get(&self, name: &str) -> ApiResult<AssetCategoryDto> {
        let url = self.rest.url(&["api", "AssetCategories", name])?;
        let response = self.rest.http().get(url).send().await?;
        RestClient::parse_response(response).await
    }

    #[instrument(skip(self))]
    async fn tree(&self) -> ApiResult<Vec<AssetCategoryTreeDto>> {
        let url = self.rest.url(&["api", "AssetCategories", "tree"])?;
        let response = self.rest.http().get(url).send().await?;
        RestClient::parse_response(response).await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ApiResult<Vec<AssetCategoryBriefDto>> {
        let url = self.rest.url(&["api", "AssetCategories", "list"])?;
        let response = self.rest.http().get(url).send().await?;
        RestClient::parse_response(response).await
    }

    #[instrument(skip(self, command), fields(name = %command.asset_category_name))]
    async fn create(&self, command: &CreateAssetCategoryCommand) -> ApiResult<String> {
        command.validate().map_err(ApiError::InvalidInput)?;

        let url = self.rest.url(&["api", "AssetCategories"])?;
        let response = self.rest.http().post(url).json(command).send().await?;
        let name = RestClient::parse_identifier(response).await?;

        info!(created = %name, "资产分类已创建");
        Ok(name)
    }

    #[instrument(skip(self, command), fields(name = %command.name))]
    async fn update(&self, command: &UpdateAssetCategoryCommand) -> ApiResult<()> {
        if command.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("name".to_string()));
        }

        let url = self.rest.url(&["api", "AssetCategories", &command.name])?;
        let response = self.rest.http().put(url).json(command).send().await?;
        RestClient::check_status(response).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, name: &str) -> ApiResult<()> {
        let url = self.rest.url(&["api", "AssetCategories", name])?;
        let response = self.rest.http().delete(url).send().await?;
        RestClient::check_status(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_params() {
        let query = PageQuery {
            page_number: 2,
            page_size: 20,
            search_term: Some("  furn ".to_string()),
        };
        assert_eq!(
            query.to_params(),
            vec![
                ("PageNumber", "2".to_string()),
                ("PageSize", "20".to_string()),
                ("SearchTerm", "furn".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_search_term_omitted() {
        let query = PageQuery {
            search_term: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.to_params().len(), 2);
    }
}
