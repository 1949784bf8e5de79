// ==========================================
// 资产分类 / 部门管理 - 导入领域模型
// ==========================================
// 职责: 导入行、已有记录、校验规则、校验错误、导入结果
// 说明: 行与已有记录统一以"字段名 → 字符串"视图参与校验
// ==========================================

use crate::domain::types::{FieldType, ImportStage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// FieldView - 统一的键值视图
// ==========================================
// 实现者: ImportRow, ExistingRecord
pub trait FieldView {
    /// 按字段名取值（字段不存在返回 None）
    fn field(&self, name: &str) -> Option<&str>;
}

// ==========================================
// ImportRow - 表格数据行
// ==========================================
// 以期望表头为键；缺失单元格为空字符串
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    pub fields: HashMap<String, String>,
}

impl ImportRow {
    /// 按表头顺序组装一行（缺失单元格补空字符串,多余单元格丢弃）
    pub fn from_cells(headers: &[String], cells: &[String]) -> Self {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = cells.get(idx).cloned().unwrap_or_default();
                (header.clone(), value)
            })
            .collect();
        Self { fields }
    }

    /// 取字段原值
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// 取字段去空白后的值（空值视为 None）
    pub fn get_trimmed(&self, field: &str) -> Option<&str> {
        self.get(field).map(str::trim).filter(|v| !v.is_empty())
    }

    /// 是否整行为空
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }
}

impl FieldView for ImportRow {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for ImportRow {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

// ==========================================
// ExistingRecord - 服务端已有记录
// ==========================================
// 由实体 DTO 扁平化得到（仅保留标量字段）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingRecord {
    pub fields: HashMap<String, String>,
}

impl ExistingRecord {
    /// 从任意可序列化 DTO 构造（JSON 顶层标量字段 → 字符串）
    ///
    /// # 规则
    /// - null / 数组 / 对象字段忽略
    /// - bool → "true" / "false"
    /// - 数字 → 十进制字符串
    pub fn from_serialize<T: Serialize>(value: &T) -> serde_json::Result<Self> {
        let json = serde_json::to_value(value)?;
        let mut fields = HashMap::new();

        if let serde_json::Value::Object(map) = json {
            for (key, v) in map {
                let text = match v {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Bool(b) => b.to_string(),
                    serde_json::Value::Number(n) => n.to_string(),
                    _ => continue,
                };
                fields.insert(key, text);
            }
        }

        Ok(Self { fields })
    }

    /// 追加字段（构造器风格）
    pub fn with(mut self, field: &str, value: &str) -> Self {
        self.fields.insert(field.to_string(), value.to_string());
        self
    }
}

impl FieldView for ExistingRecord {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

// ==========================================
// 校验规则
// ==========================================

/// 同批次上级规则
///
/// 关联校验时,同一批次中 group_field 为真的行,其 name_field 值也视为有效上级
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchParents {
    pub name_field: String,
    pub group_field: String,
}

/// 声明式校验规则（与实体类型无关）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// 行字段名（即表头）
    pub field: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub field_type: Option<FieldType>,
    /// 已有记录中被引用的字段
    #[serde(default)]
    pub relation_field: Option<String>,
    /// 唯一性比较时已有记录的字段名（缺省同 field）
    #[serde(default)]
    pub existing_field: Option<String>,
    #[serde(default)]
    pub batch_parents: Option<BatchParents>,
}

impl ValidationRule {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn of_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn relation(mut self, relation_field: &str) -> Self {
        self.relation_field = Some(relation_field.to_string());
        self
    }

    pub fn compare_existing(mut self, existing_field: &str) -> Self {
        self.existing_field = Some(existing_field.to_string());
        self
    }

    pub fn allow_batch_parents(mut self, name_field: &str, group_field: &str) -> Self {
        self.batch_parents = Some(BatchParents {
            name_field: name_field.to_string(),
            group_field: group_field.to_string(),
        });
        self
    }

    /// 唯一性比较所用的已有记录字段
    pub fn existing_key(&self) -> &str {
        self.existing_field.as_deref().unwrap_or(&self.field)
    }
}

// ==========================================
// 校验结果
// ==========================================

/// 单条校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// 行号（1 起,已计入表头行）
    pub row_index: usize,
    pub field: String,
    pub message: String,
}

/// 整批校验结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

// ==========================================
// 导入结果
// ==========================================

/// 上传阶段的单行失败（不中断批次）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportWarning {
    pub row_index: usize,
    pub message: String,
}

/// 一次导入的汇总结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    pub batch_id: String,
    pub total_count: usize,
    pub success_count: usize,
    pub fail_count: usize,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ImportWarning>,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
    pub stage: ImportStage,
}

impl ImportResult {
    pub fn new(batch_id: String) -> Self {
        Self {
            batch_id,
            total_count: 0,
            success_count: 0,
            fail_count: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
            duration_ms: 0,
            timestamp: Utc::now(),
            stage: ImportStage::Idle,
        }
    }

    /// 计数是否闭合（success + fail == total）
    pub fn is_balanced(&self) -> bool {
        self.success_count + self.fail_count == self.total_count
    }
}
