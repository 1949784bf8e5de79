// ==========================================
// 资产分类 / 部门管理 - API 层
// ==========================================
// 职责: 后端 REST 服务访问（部门 / 资产分类）
// ==========================================

pub mod asset_categories;
pub mod client;
pub mod departments;
pub mod error;

// 重导出核心类型
pub use asset_categories::{AssetCategoriesApi, AssetCategoriesClient, PageQuery};
pub use client::RestClient;
pub use departments::{DepartmentsApi, DepartmentsClient};
pub use error::{extract_server_message, ApiError, ApiResult};
