// ==========================================
// 资产分类 / 部门管理 - 领域模型层
// ==========================================
// 职责: 定义领域实体（DTO）、导入模型、基础类型
// 红线: 不含网络访问逻辑,不含导入编排逻辑
// ==========================================

pub mod entity;
pub mod import;
pub mod types;

// 重导出核心类型
pub use entity::{
    AssetCategoryBriefDto, AssetCategoryDto, AssetCategoryTreeDto, CreateAssetCategoryCommand,
    CreateDepartmentCommand, DepartmentDto, DepartmentListDto, PaginatedList,
    UpdateAssetCategoryCommand,
};
pub use import::{
    BatchParents, ExistingRecord, FieldView, ImportResult, ImportRow, ImportWarning,
    ValidationError, ValidationResult, ValidationRule,
};
pub use types::{EntityKind, FieldType, ImportStage, SortOrder, UploadMode};
