// ==========================================
// 资产分类 / 部门管理 - 树节点映射
// ==========================================
// 职责: 实体树 → 展示树（TreeNode）
// 规则: selectable = is_group ? can_select_group : !can_select_group
// ==========================================

use crate::domain::entity::{AssetCategoryTreeDto, DepartmentDto};
use serde::Serialize;

pub const GROUP_ICON: &str = "pi pi-folder";
pub const DEPARTMENT_ICON: &str = "pi pi-building";
pub const CATEGORY_ICON: &str = "pi pi-tag";
pub const GROUP_STYLE: &str = "font-bold";

/// 可映射为树节点的实体
pub trait TreeEntity: Clone {
    fn label(&self) -> &str;

    fn is_group(&self) -> bool;

    fn children(&self) -> &[Self];

    /// 非分组节点的图标
    fn leaf_icon() -> &'static str;
}

impl TreeEntity for DepartmentDto {
    fn label(&self) -> &str {
        &self.name
    }

    fn is_group(&self) -> bool {
        self.is_group
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn leaf_icon() -> &'static str {
        DEPARTMENT_ICON
    }
}

impl TreeEntity for AssetCategoryTreeDto {
    fn label(&self) -> &str {
        &self.name
    }

    fn is_group(&self) -> bool {
        self.is_group
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn leaf_icon() -> &'static str {
        CATEGORY_ICON
    }
}

/// 展示树节点
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode<T> {
    pub label: String,
    pub expanded: bool,
    pub selectable: bool,
    pub style_class: String,
    pub icon: String,
    pub children: Vec<TreeNode<T>>,
    #[serde(skip)]
    pub data: T,
}

impl<T> TreeNode<T> {
    /// 节点总数（含自身）
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }

    /// 深度优先查找第一个标签相等的节点
    pub fn find(&self, label: &str) -> Option<&TreeNode<T>> {
        if self.label == label {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(label))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeMapper {
    pub can_select_group: bool,
}

impl TreeMapper {
    pub fn new(can_select_group: bool) -> Self {
        Self { can_select_group }
    }

    /// 递归映射（初始全部展开）
    pub fn map_to_tree_nodes<T: TreeEntity>(&self, entities: &[T]) -> Vec<TreeNode<T>> {
        entities.iter().map(|entity| self.map_node(entity)).collect()
    }

    fn map_node<T: TreeEntity>(&self, entity: &T) -> TreeNode<T> {
        let is_group = entity.is_group();
        TreeNode {
            label: entity.label().to_string(),
            expanded: true,
            selectable: if is_group {
                self.can_select_group
            } else {
                !self.can_select_group
            },
            style_class: if is_group { GROUP_STYLE } else { "" }.to_string(),
            icon: if is_group { GROUP_ICON } else { T::leaf_icon() }.to_string(),
            children: self.map_to_tree_nodes(entity.children()),
            data: entity.clone(),
        }
    }
}
