// ==========================================
// 资产分类 / 部门管理 - 树视图状态
// ==========================================
// 职责: 选择器组件持有的状态（源实体 / 展示树 / 搜索词 / 选中节点）
// ==========================================

use crate::tree::filter::{collapse_all, expand_all, filter_tree};
use crate::tree::mapper::{TreeEntity, TreeMapper, TreeNode};
use std::fmt::Write as _;
use tracing::debug;

pub struct TreeView<T: TreeEntity> {
    mapper: TreeMapper,
    source: Vec<T>,
    nodes: Vec<TreeNode<T>>,
    search: String,
    selected: Option<TreeNode<T>>,
}

impl<T: TreeEntity> TreeView<T> {
    pub fn new(mapper: TreeMapper) -> Self {
        Self {
            mapper,
            source: Vec::new(),
            nodes: Vec::new(),
            search: String::new(),
            selected: None,
        }
    }

    /// 载入实体（保留当前搜索词）
    pub fn load(&mut self, entities: Vec<T>) {
        self.source = entities;
        self.refresh();
        debug!(roots = self.source.len(), nodes = self.node_count(), "树视图已载入");
    }

    /// 更新搜索词并重新过滤（始终基于源实体重新映射）
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.refresh();
    }

    pub fn expand_all(&mut self) {
        self.nodes = expand_all(&self.nodes);
    }

    pub fn collapse_all(&mut self) {
        self.nodes = collapse_all(&self.nodes);
    }

    /// 选中节点（仅可选节点）
    ///
    /// # 返回
    /// - Some: 选中成功
    /// - None: 节点不存在或不可选（原选中保持不变）
    pub fn select(&mut self, label: &str) -> Option<&TreeNode<T>> {
        let found = self
            .nodes
            .iter()
            .find_map(|node| node.find(label))
            .filter(|node| node.selectable)
            .cloned()?;
        self.selected = Some(found);
        self.selected.as_ref()
    }

    pub fn nodes(&self) -> &[TreeNode<T>] {
        &self.nodes
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selected(&self) -> Option<&TreeNode<T>> {
        self.selected.as_ref()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(TreeNode::count).sum()
    }

    /// 文本形式输出（折叠节点不展开子树）
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_nodes(&self.nodes, 0, &mut out);
        out
    }

    fn refresh(&mut self) {
        let mapped = self.mapper.map_to_tree_nodes(&self.source);
        self.nodes = filter_tree(&mapped, &self.search);
    }
}

fn render_nodes<T>(nodes: &[TreeNode<T>], depth: usize, out: &mut String) {
    for node in nodes {
        let marker = match (node.children.is_empty(), node.expanded) {
            (true, _) => "-",
            (false, true) => "v",
            (false, false) => ">",
        };
        let flag = if node.selectable { "" } else { " (group)" };
        let _ = writeln!(out, "{}{} {}{}", "  ".repeat(depth), marker, node.label, flag);
        if node.expanded {
            render_nodes(&node.children, depth + 1, out);
        }
    }
}
