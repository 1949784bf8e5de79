// ==========================================
// 资产分类 / 部门管理 - 校验引擎
// ==========================================
// 职责: 对整批数据行执行声明式规则（必填 / 类型 / 唯一 / 关联）
// 红线: 收集全部违规,不提前返回；不依赖具体实体类型
// ==========================================

use crate::domain::import::{FieldView, ValidationError, ValidationResult, ValidationRule};
use crate::domain::types::FieldType;
use crate::i18n::t_with_args;
use std::collections::{HashMap, HashSet};

/// 表头行占用的行号偏移（数据第 0 行对应表格第 2 行）
pub const HEADER_ROW_OFFSET: usize = 2;

/// 解析布尔标记（true/false/1/0,忽略大小写）
pub fn parse_bool_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// 是否可转换为有限数值
fn is_finite_number(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(f64::is_finite)
        .unwrap_or(false)
}

/// 取去空白后的非空值（与上传时的字段映射一致）
fn non_empty<'a, V: FieldView>(row: &'a V, field: &str) -> Option<&'a str> {
    row.field(field).map(str::trim).filter(|v| !v.is_empty())
}

pub struct ValidationEngine;

impl ValidationEngine {
    /// 校验整批数据
    ///
    /// # 参数
    /// - rows: 待导入数据行（顺序即表格顺序）
    /// - existing: 服务端已有记录
    /// - rules: 规则集
    ///
    /// # 返回
    /// - ValidationResult: is_valid == errors.is_empty()
    ///
    /// # 规则
    /// - required: 缺失或空白
    /// - type: number 需为有限数值；boolean 需为 true/false/1/0
    /// - unique: 同批次其他行或已有记录中存在相同值
    /// - relation_field: 已有记录中不存在被引用的值
    ///   （配置 batch_parents 时,同批次的分组行也视为有效上级）
    ///
    /// 类型 / 唯一 / 关联检查只作用于非空值。
    pub fn validate_all<R, E>(rows: &[R], existing: &[E], rules: &[ValidationRule]) -> ValidationResult
    where
        R: FieldView,
        E: FieldView,
    {
        let index = RuleIndex::build(rows, existing, rules);
        let mut errors = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            let row_index = idx + HEADER_ROW_OFFSET;
            for (rule_idx, rule) in rules.iter().enumerate() {
                Self::check_row(row, row_index, rule, &index, rule_idx, &mut errors);
            }
        }

        ValidationResult::from_errors(errors)
    }

    fn check_row<R: FieldView>(
        row: &R,
        row_index: usize,
        rule: &ValidationRule,
        index: &RuleIndex,
        rule_idx: usize,
        errors: &mut Vec<ValidationError>,
    ) {
        let field = rule.field.as_str();
        let mut push = |key: &str, extra: &[(&str, &str)]| {
            let mut args = vec![("field", field)];
            args.extend_from_slice(extra);
            errors.push(ValidationError {
                row_index,
                field: field.to_string(),
                message: t_with_args(key, &args),
            });
        };

        // 必填检查
        if rule.required && non_empty(row, field).is_none() {
            push("validation.required", &[]);
        }

        let Some(value) = non_empty(row, field) else {
            return;
        };

        // 类型检查
        match rule.field_type {
            Some(FieldType::Number) if !is_finite_number(value) => {
                push("validation.number", &[]);
            }
            Some(FieldType::Boolean) if parse_bool_flag(value).is_none() => {
                push("validation.boolean", &[]);
            }
            _ => {}
        }

        // 唯一性检查（同批次 + 已有记录）
        if rule.unique {
            let in_batch = index.batch_counts[rule_idx]
                .get(value)
                .is_some_and(|count| *count > 1);
            let in_existing = index.existing_unique[rule_idx].contains(value);
            if in_batch || in_existing {
                push("validation.unique", &[]);
            }
        }

        // 关联检查
        if let Some(relation_field) = rule.relation_field.as_deref() {
            let exists = index.existing_relation[rule_idx].contains(value)
                || index.batch_parents[rule_idx].contains(value);
            if !exists {
                push("validation.relation", &[("relation", relation_field)]);
            }
        }
    }
}

// ==========================================
// RuleIndex - 每条规则的预计算索引
// ==========================================
// 避免逐行扫描整批 / 已有数据（O(n²)）
struct RuleIndex {
    batch_counts: Vec<HashMap<String, usize>>,
    existing_unique: Vec<HashSet<String>>,
    existing_relation: Vec<HashSet<String>>,
    batch_parents: Vec<HashSet<String>>,
}

impl RuleIndex {
    fn build<R: FieldView, E: FieldView>(
        rows: &[R],
        existing: &[E],
        rules: &[ValidationRule],
    ) -> Self {
        let mut index = Self {
            batch_counts: Vec::with_capacity(rules.len()),
            existing_unique: Vec::with_capacity(rules.len()),
            existing_relation: Vec::with_capacity(rules.len()),
            batch_parents: Vec::with_capacity(rules.len()),
        };

        for rule in rules {
            let mut counts = HashMap::new();
            let mut unique = HashSet::new();
            if rule.unique {
                for row in rows {
                    if let Some(v) = non_empty(row, &rule.field) {
                        *counts.entry(v.to_string()).or_insert(0) += 1;
                    }
                }
                unique = existing
                    .iter()
                    .filter_map(|record| non_empty(record, rule.existing_key()))
                    .map(str::to_string)
                    .collect();
            }

            let relation = match rule.relation_field.as_deref() {
                Some(relation_field) => existing
                    .iter()
                    .filter_map(|record| non_empty(record, relation_field))
                    .map(str::to_string)
                    .collect(),
                None => HashSet::new(),
            };

            let parents = match (&rule.relation_field, &rule.batch_parents) {
                (Some(_), Some(batch)) => rows
                    .iter()
                    .filter(|row| {
                        row.field(&batch.group_field)
                            .and_then(parse_bool_flag)
                            .unwrap_or(false)
                    })
                    .filter_map(|row| non_empty(row, &batch.name_field))
                    .map(str::to_string)
                    .collect(),
                _ => HashSet::new(),
            };

            index.batch_counts.push(counts);
            index.existing_unique.push(unique);
            index.existing_relation.push(relation);
            index.batch_parents.push(parents);
        }

        index
    }
}
