// ==========================================
// 资产分类 / 部门管理 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 字段类型 (Field Type)
// ==========================================
// 用途: 校验规则中的类型约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Number => write!(f, "number"),
            FieldType::Boolean => write!(f, "boolean"),
        }
    }
}

// ==========================================
// 导入阶段 (Import Stage)
// ==========================================
// 状态机: Idle → Reading → (ReadFailed | Validating)
//         → (LoadFailed | ValidationFailed | Uploading) → Completed
// LoadFailed: 校验前拉取已有数据失败
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportStage {
    Idle,
    Reading,
    ReadFailed,
    Validating,
    LoadFailed,
    ValidationFailed,
    Uploading,
    Completed,
}

impl ImportStage {
    /// 是否为终止状态
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ImportStage::ReadFailed
                | ImportStage::LoadFailed
                | ImportStage::ValidationFailed
                | ImportStage::Completed
        )
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImportStage::Idle => "IDLE",
            ImportStage::Reading => "READING",
            ImportStage::ReadFailed => "READ_FAILED",
            ImportStage::Validating => "VALIDATING",
            ImportStage::LoadFailed => "LOAD_FAILED",
            ImportStage::ValidationFailed => "VALIDATION_FAILED",
            ImportStage::Uploading => "UPLOADING",
            ImportStage::Completed => "COMPLETED",
        };
        write!(f, "{}", s)
    }
}

// ==========================================
// 上传模式 (Upload Mode)
// ==========================================
// PerRow: 逐行调用 create_entity（顺序执行）
// Batch:  整批交给 process_data 一次处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UploadMode {
    #[default]
    PerRow,
    Batch,
}

// ==========================================
// 排序方向 (Sort Order)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// 与 PrimeNG 表格一致的方向系数（1 / -1）
    pub fn factor(&self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

// ==========================================
// 实体种类 (Entity Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Department,
    AssetCategory,
}

impl EntityKind {
    /// 导入配置中的实体名称
    pub fn entity_name(&self) -> &'static str {
        match self {
            EntityKind::Department => "Department",
            EntityKind::AssetCategory => "AssetCategory",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Department => write!(f, "department"),
            EntityKind::AssetCategory => write!(f, "asset-category"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "department" | "departments" => Ok(EntityKind::Department),
            "asset-category" | "asset-categories" | "category" | "categories" => {
                Ok(EntityKind::AssetCategory)
            }
            other => Err(format!("未知实体类型: {}", other)),
        }
    }
}
