// ==========================================
// 资产分类 / 部门管理 - 实体 DTO
// ==========================================
// 对齐: 后端 REST 接口（JSON 字段 camelCase）
// 用途: API 层收发,树视图与导入层只读
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// 部门 (Department)
// ==========================================

/// 部门树节点（tree 接口返回,children 递归）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDto {
    pub name: String,
    #[serde(default)]
    pub parent_department: Option<String>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub children: Vec<DepartmentDto>,
}

/// 部门列表项（list 接口返回,扁平）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentListDto {
    pub name: String,
    #[serde(default)]
    pub parent_department: Option<String>,
    #[serde(default)]
    pub is_group: bool,
}

/// 新建部门命令
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentCommand {
    pub name: String,
    #[serde(default)]
    pub parent_name: String,
    #[serde(default)]
    pub is_group: bool,
}

impl CreateDepartmentCommand {
    /// 提交前校验必填字段
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(String): 缺失字段名
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name".to_string());
        }
        Ok(())
    }
}

// ==========================================
// 资产分类 (Asset Category)
// ==========================================

/// 资产分类树节点
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCategoryTreeDto {
    pub name: String,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub children: Vec<AssetCategoryTreeDto>,
}

/// 资产分类简要信息（list / 分页接口）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCategoryBriefDto {
    pub name: String,
    #[serde(default)]
    pub asset_category_name: Option<String>,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub is_group: bool,
}

/// 资产分类详情
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCategoryDto {
    pub name: String,
    #[serde(default)]
    pub asset_category_name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub is_group: bool,
}

/// 新建资产分类命令
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetCategoryCommand {
    pub asset_category_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default)]
    pub parent_name: String,
    #[serde(default)]
    pub is_group: bool,
}

impl CreateAssetCategoryCommand {
    /// 提交前校验必填字段
    pub fn validate(&self) -> Result<(), String> {
        if self.asset_category_name.trim().is_empty() {
            return Err("assetCategoryName".to_string());
        }
        Ok(())
    }
}

/// 更新资产分类命令（name 为路径主键）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetCategoryCommand {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub is_group: bool,
}

impl From<&AssetCategoryDto> for UpdateAssetCategoryCommand {
    fn from(dto: &AssetCategoryDto) -> Self {
        Self {
            name: dto.name.clone(),
            asset_category_name: dto.asset_category_name.clone(),
            symbol: dto.symbol.clone(),
            parent_name: dto.parent_name.clone(),
            is_group: dto.is_group,
        }
    }
}

// ==========================================
// 分页结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedList<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub page_number: i32,
    #[serde(default)]
    pub total_pages: i32,
    #[serde(default)]
    pub total_count: i32,
    #[serde(default)]
    pub has_previous_page: bool,
    #[serde(default)]
    pub has_next_page: bool,
}

impl<T> Default for PaginatedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page_number: 1,
            total_pages: 0,
            total_count: 0,
            has_previous_page: false,
            has_next_page: false,
        }
    }
}
