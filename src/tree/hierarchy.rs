// ==========================================
// 资产分类 / 部门管理 - 扁平列表 → 层级
// ==========================================
// 用途: list 接口只返回扁平记录时,按上级名称组装森林
// 规则:
//   - 保持输入顺序
//   - 上级为空 / 不存在 / 指向自身 → 根节点
//   - 上级链成环 → 环上首个被处理的记录改为根节点
//   - 名称重复时以第一条为准
// ==========================================

use crate::domain::entity::{AssetCategoryBriefDto, DepartmentListDto};
use crate::tree::mapper::{TreeEntity, CATEGORY_ICON, DEPARTMENT_ICON};
use std::collections::HashMap;

/// 以名称互相引用的扁平记录
pub trait FlatEntity: Clone {
    fn key(&self) -> &str;

    fn parent_key(&self) -> Option<&str>;

    fn is_group(&self) -> bool;

    fn leaf_icon() -> &'static str;
}

impl FlatEntity for DepartmentListDto {
    fn key(&self) -> &str {
        &self.name
    }

    fn parent_key(&self) -> Option<&str> {
        self.parent_department.as_deref()
    }

    fn is_group(&self) -> bool {
        self.is_group
    }

    fn leaf_icon() -> &'static str {
        DEPARTMENT_ICON
    }
}

impl FlatEntity for AssetCategoryBriefDto {
    fn key(&self) -> &str {
        &self.name
    }

    fn parent_key(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    fn is_group(&self) -> bool {
        self.is_group
    }

    fn leaf_icon() -> &'static str {
        CATEGORY_ICON
    }
}

/// 组装后的层级节点
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode<F> {
    pub item: F,
    pub children: Vec<HierarchyNode<F>>,
}

impl<F: FlatEntity> TreeEntity for HierarchyNode<F> {
    fn label(&self) -> &str {
        self.item.key()
    }

    fn is_group(&self) -> bool {
        self.item.is_group()
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn leaf_icon() -> &'static str {
        F::leaf_icon()
    }
}

pub fn build_hierarchy<F: FlatEntity>(items: &[F]) -> Vec<HierarchyNode<F>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (i, item) in items.iter().enumerate() {
        index.entry(item.key()).or_insert(i);
    }

    let mut parents: Vec<Option<usize>> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.parent_key()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .and_then(|p| index.get(p).copied())
                .filter(|&p| p != i)
        })
        .collect();

    // 断环
    for i in 0..items.len() {
        let mut current = parents[i];
        let mut steps = 0;
        while let Some(p) = current {
            if p == i {
                parents[i] = None;
                break;
            }
            steps += 1;
            if steps > items.len() {
                break;
            }
            current = parents[p];
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
    let mut roots = Vec::new();
    for (i, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => children[*p].push(i),
            None => roots.push(i),
        }
    }

    roots
        .into_iter()
        .map(|i| assemble(i, items, &children))
        .collect()
}

fn assemble<F: Clone>(i: usize, items: &[F], children: &[Vec<usize>]) -> HierarchyNode<F> {
    HierarchyNode {
        item: items[i].clone(),
        children: children[i]
            .iter()
            .map(|&c| assemble(c, items, children))
            .collect(),
    }
}
