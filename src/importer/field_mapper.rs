// ==========================================
// 资产分类 / 部门管理 - 字段映射器
// ==========================================
// 职责: 已校验的导入行 → 创建命令
// 规则: 文本去首尾空白；空上级 → ""；IsGroup 为 true/1 时为分组
// ==========================================

use crate::domain::entity::{CreateAssetCategoryCommand, CreateDepartmentCommand};
use crate::domain::import::ImportRow;
use crate::importer::validator::parse_bool_flag;

/// 部门导入表头（顺序即模板列顺序）
pub const DEPARTMENT_HEADERS: [&str; 3] = ["Name", "ParentName", "IsGroup"];

/// 资产分类导入表头
pub const ASSET_CATEGORY_HEADERS: [&str; 4] = ["AssetCategoryName", "Symbol", "ParentName", "IsGroup"];

pub struct FieldMapper;

impl FieldMapper {
    /// 导入行 → 新建部门命令
    pub fn to_department(row: &ImportRow) -> CreateDepartmentCommand {
        CreateDepartmentCommand {
            name: Self::text(row, "Name"),
            parent_name: Self::text(row, "ParentName"),
            is_group: Self::flag(row, "IsGroup"),
        }
    }

    /// 导入行 → 新建资产分类命令
    pub fn to_asset_category(row: &ImportRow) -> CreateAssetCategoryCommand {
        CreateAssetCategoryCommand {
            asset_category_name: Self::text(row, "AssetCategoryName"),
            symbol: row.get_trimmed("Symbol").map(str::to_string),
            parent_name: Self::text(row, "ParentName"),
            is_group: Self::flag(row, "IsGroup"),
        }
    }

    fn text(row: &ImportRow, field: &str) -> String {
        row.get_trimmed(field).unwrap_or_default().to_string()
    }

    // 无法识别的值按 false 处理（校验阶段已拦截非法布尔值）
    fn flag(row: &ImportRow, field: &str) -> bool {
        row.get(field).and_then(parse_bool_flag).unwrap_or(false)
    }
}
