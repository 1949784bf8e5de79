// ==========================================
// 资产分类 / 部门管理 - 部门接口
// ==========================================
// 端点: GET /api/Departments/list, GET /api/Departments/tree, POST /api/Departments
// ==========================================

use crate::api::client::RestClient;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::entity::{CreateDepartmentCommand, DepartmentDto, DepartmentListDto};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

#[async_trait]
pub trait DepartmentsApi: Send + Sync {
    /// 扁平列表
    async fn list(&self) -> ApiResult<Vec<DepartmentListDto>>;

    /// 树形结构
    async fn tree(&self) -> ApiResult<Vec<DepartmentDto>>;

    /// 新建部门
    async fn create(&self, command: &CreateDepartmentCommand) -> ApiResult<()>;
}

#[async_trait]
impl<A: DepartmentsApi + ?Sized> DepartmentsApi for Arc<A> {
    async fn list(&self) -> ApiResult<Vec<DepartmentListDto>> {
        (**self).list().await
    }

    async fn tree(&self) -> ApiResult<Vec<DepartmentDto>> {
        (**self).tree().await
    }

    async fn create(&self, command: &CreateDepartmentCommand) -> ApiResult<()> {
        (**self).create(command).await
    }
}

pub struct DepartmentsClient {
    rest: RestClient,
}

impl DepartmentsClient {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl DepartmentsApi for DepartmentsClient {
    #[instrument(skip(self))]
    async fn list(&self) -> ApiResult<Vec<DepartmentListDto>> {
        let url = self.rest.url(&["api", "Departments", "list"])?;
        let response = self.rest.http().get(url).send().await?;
        RestClient::parse_response(response).await
    }

    #[instrument(skip(self))]
    async fn tree(&self) -> ApiResult<Vec<DepartmentDto>> {
        let url = self.rest.url(&["api", "Departments", "tree"])?;
        let response = self.rest.http().get(url).send().await?;
        RestClient::parse_response(response).await
    }

    #[instrument(skip(self, command), fields(name = %command.name))]
    async fn create(&self, command: &CreateDepartmentCommand) -> ApiResult<()> {
        command.validate().map_err(ApiError::InvalidInput)?;

        let url = self.rest.url(&["api", "Departments"])?;
        let response = self.rest.http().post(url).json(command).send().await?;
        RestClient::check_status(response).await?;

        info!("部门已创建");
        Ok(())
    }
}
