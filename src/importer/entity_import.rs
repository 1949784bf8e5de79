// ==========================================
// 资产分类 / 部门管理 - 实体导入适配
// ==========================================
// 职责: 把 REST 客户端包装为 ImportTarget,并给出各实体的导入配置
// 部门: 同批次的分组行可作为上级
// 资产分类: 上级只能引用服务端已有分类
// ==========================================

use crate::api::{ApiError, AssetCategoriesApi, DepartmentsApi};
use crate::config::{ImportConfig, ImportTarget};
use crate::domain::import::{ExistingRecord, ImportRow, ValidationRule};
use crate::domain::types::{EntityKind, FieldType};
use crate::importer::error::ImportError;
use crate::importer::field_mapper::{FieldMapper, ASSET_CATEGORY_HEADERS, DEPARTMENT_HEADERS};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// DTO 列表 → 已有记录
fn to_existing<T: Serialize>(items: &[T]) -> Result<Vec<ExistingRecord>, ImportError> {
    items
        .iter()
        .map(|item| {
            ExistingRecord::from_serialize(item)
                .map_err(|e| ImportError::ExistingDataError(e.to_string()))
        })
        .collect()
}

fn upload_error(err: ApiError) -> ImportError {
    ImportError::RowUploadFailure {
        row: 0,
        message: err.server_message(),
    }
}

// ==========================================
// 部门
// ==========================================
pub struct DepartmentImportTarget<A: DepartmentsApi> {
    api: A,
}

impl<A: DepartmentsApi> DepartmentImportTarget<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<A: DepartmentsApi> ImportTarget for DepartmentImportTarget<A> {
    async fn get_existing_data(&self) -> Result<Vec<ExistingRecord>, ImportError> {
        let list = self
            .api
            .list()
            .await
            .map_err(|e| ImportError::ExistingDataError(e.server_message()))?;
        to_existing(&list)
    }

    async fn create_entity(&self, row: &ImportRow) -> Result<(), ImportError> {
        let command = FieldMapper::to_department(row);
        self.api.create(&command).await.map_err(upload_error)
    }
}

/// 部门导入规则
pub fn department_rules() -> Vec<ValidationRule> {
    vec![
        ValidationRule::new("Name").required().unique().compare_existing("name"),
        ValidationRule::new("ParentName")
            .relation("name")
            .allow_batch_parents("Name", "IsGroup"),
        ValidationRule::new("IsGroup").of_type(FieldType::Boolean),
    ]
}

pub fn department_import_config(target: Arc<dyn ImportTarget>) -> ImportConfig {
    ImportConfig::new(EntityKind::Department.entity_name(), &DEPARTMENT_HEADERS, target)
        .with_rules(department_rules())
}

// ==========================================
// 资产分类
// ==========================================
pub struct AssetCategoryImportTarget<A: AssetCategoriesApi> {
    api: A,
}

impl<A: AssetCategoriesApi> AssetCategoryImportTarget<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<A: AssetCategoriesApi> ImportTarget for AssetCategoryImportTarget<A> {
    async fn get_existing_data(&self) -> Result<Vec<ExistingRecord>, ImportError> {
        let list = self
            .api
            .list()
            .await
            .map_err(|e| ImportError::ExistingDataError(e.server_message()))?;
        to_existing(&list)
    }

    async fn create_entity(&self, row: &ImportRow) -> Result<(), ImportError> {
        let command = FieldMapper::to_asset_category(row);
        self.api.create(&command).await.map(|_| ()).map_err(upload_error)
    }
}

/// 资产分类导入规则
pub fn asset_category_rules() -> Vec<ValidationRule> {
    vec![
        ValidationRule::new("AssetCategoryName")
            .required()
            .unique()
            .compare_existing("assetCategoryName"),
        ValidationRule::new("ParentName").relation("name"),
        ValidationRule::new("IsGroup").of_type(FieldType::Boolean),
    ]
}

pub fn asset_category_import_config(target: Arc<dyn ImportTarget>) -> ImportConfig {
    ImportConfig::new(EntityKind::AssetCategory.entity_name(), &ASSET_CATEGORY_HEADERS, target)
        .with_rules(asset_category_rules())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::validator::ValidationEngine;

    fn dept_row(name: &str, parent: &str, is_group: &str) -> ImportRow {
        ImportRow::from([("Name", name), ("ParentName", parent), ("IsGroup", is_group)])
    }

    #[test]
    fn test_department_rules_accept_same_batch_group_parent() {
        let rows = vec![dept_row("Root", "", "true"), dept_row("Child", "Root", "false")];
        let result = ValidationEngine::validate_all::<_, ExistingRecord>(&rows, &[], &department_rules());
        assert!(result.is_valid);
    }

    #[test]
    fn test_department_rules_reject_bad_flag() {
        let rows = vec![dept_row("Root", "", "yes")];
        let result = ValidationEngine::validate_all::<_, ExistingRecord>(&rows, &[], &department_rules());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "IsGroup");
    }

    #[test]
    fn test_asset_category_rules_existing_parent_only() {
        let rows = vec![
            ImportRow::from([
                ("AssetCategoryName", "Root"),
                ("Symbol", ""),
                ("ParentName", ""),
                ("IsGroup", "true"),
            ]),
            ImportRow::from([
                ("AssetCategoryName", "Child"),
                ("Symbol", ""),
                ("ParentName", "Root"),
                ("IsGroup", "false"),
            ]),
        ];

        let result =
            ValidationEngine::validate_all::<_, ExistingRecord>(&rows, &[], &asset_category_rules());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row_index, 3);

        let existing = vec![ExistingRecord::default().with("name", "Root")];
        let result = ValidationEngine::validate_all(&rows, &existing, &asset_category_rules());
        assert!(result.is_valid);
    }
}
