// ==========================================
// 资产分类 / 部门管理 - 列表过滤与排序
// ==========================================
// 过滤: 名称或上级名称包含搜索词（忽略大小写）
// 排序: name / parentDepartment / isGroup；升序时空值在前
// ==========================================

use crate::domain::entity::{AssetCategoryBriefDto, DepartmentListDto};
use crate::domain::types::SortOrder;
use std::cmp::Ordering;
use std::str::FromStr;

/// 可在列表视图中过滤排序的记录
pub trait ListEntity {
    fn name(&self) -> &str;

    fn parent(&self) -> Option<&str>;

    fn is_group(&self) -> bool;
}

impl ListEntity for DepartmentListDto {
    fn name(&self) -> &str {
        &self.name
    }

    fn parent(&self) -> Option<&str> {
        self.parent_department.as_deref()
    }

    fn is_group(&self) -> bool {
        self.is_group
    }
}

impl ListEntity for AssetCategoryBriefDto {
    fn name(&self) -> &str {
        &self.name
    }

    fn parent(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    fn is_group(&self) -> bool {
        self.is_group
    }
}

/// 排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Parent,
    IsGroup,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(SortField::Name),
            "parentDepartment" | "parentName" | "parent" => Ok(SortField::Parent),
            "isGroup" | "group" => Ok(SortField::IsGroup),
            other => Err(format!("unknown sort field: {}", other)),
        }
    }
}

/// 过滤（空白搜索词返回全部）
pub fn filter_list<T: ListEntity + Clone>(items: &[T], text: &str) -> Vec<T> {
    if text.trim().is_empty() {
        return items.to_vec();
    }
    let needle = text.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.name().to_lowercase().contains(&needle)
                || item
                    .parent()
                    .is_some_and(|p| p.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// 稳定排序
pub fn sort_list<T: ListEntity>(items: &mut [T], field: SortField, order: SortOrder) {
    items.sort_by(|a, b| {
        let ordering = match field {
            SortField::Name => compare_text(Some(a.name()), Some(b.name())),
            SortField::Parent => compare_text(blank_as_none(a.parent()), blank_as_none(b.parent())),
            // 分组在前
            SortField::IsGroup => b.is_group().cmp(&a.is_group()),
        };
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// 过滤后排序（列表视图的一次刷新）
pub fn apply<T: ListEntity + Clone>(
    items: &[T],
    text: &str,
    sort: Option<(SortField, SortOrder)>,
) -> Vec<T> {
    let mut rows = filter_list(items, text);
    if let Some((field, order)) = sort {
        sort_list(&mut rows, field, order);
    }
    rows
}

fn blank_as_none(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dept(name: &str, parent: Option<&str>, is_group: bool) -> DepartmentListDto {
        DepartmentListDto {
            name: name.to_string(),
            parent_department: parent.map(str::to_string),
            is_group,
        }
    }

    fn names(items: &[DepartmentListDto]) -> Vec<&str> {
        items.iter().map(|d| d.name.as_str()).collect()
    }

    fn sample() -> Vec<DepartmentListDto> {
        vec![
            dept("payroll", Some("Finance"), false),
            dept("Finance", Some("HQ"), true),
            dept("HQ", None, true),
            dept("IT", Some("HQ"), false),
        ]
    }

    #[test]
    fn test_filter_matches_name_or_parent() {
        let rows = filter_list(&sample(), "fin");
        assert_eq!(names(&rows), vec!["payroll", "Finance"]);
        assert_eq!(filter_list(&sample(), " ").len(), 4);
    }

    #[test]
    fn test_sort_by_name_case_insensitive() {
        let mut rows = sample();
        sort_list(&mut rows, SortField::Name, SortOrder::Ascending);
        assert_eq!(names(&rows), vec!["Finance", "HQ", "IT", "payroll"]);

        sort_list(&mut rows, SortField::Name, SortOrder::Descending);
        assert_eq!(names(&rows), vec!["payroll", "IT", "HQ", "Finance"]);
    }

    #[test]
    fn test_sort_parent_nulls_first_ascending() {
        let mut rows = sample();
        sort_list(&mut rows, SortField::Parent, SortOrder::Ascending);
        assert_eq!(rows[0].name, "HQ");

        sort_list(&mut rows, SortField::Parent, SortOrder::Descending);
        assert_eq!(rows[3].name, "HQ");
    }

    #[test]
    fn test_sort_groups_first_and_stable() {
        let rows = apply(&sample(), "", Some((SortField::IsGroup, SortOrder::Ascending)));
        assert_eq!(names(&rows), vec!["Finance", "HQ", "payroll", "IT"]);
    }

    #[test]
    fn test_sort_field_from_str() {
        assert_eq!("parentDepartment".parse::<SortField>(), Ok(SortField::Parent));
        assert!("size".parse::<SortField>().is_err());
    }
}
