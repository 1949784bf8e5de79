// ==========================================
// 资产分类 / 部门管理 - 树过滤与展开
// ==========================================
// 所有操作返回新树,不修改输入
// ==========================================

use crate::tree::mapper::TreeNode;

/// 按标签过滤（忽略大小写的子串匹配）
///
/// 节点保留条件: 自身匹配,或至少一个子节点（递归过滤后）被保留。
/// 保留的节点一律展开；搜索词为空白时原样返回。
pub fn filter_tree<T: Clone>(nodes: &[TreeNode<T>], search_text: &str) -> Vec<TreeNode<T>> {
    if search_text.trim().is_empty() {
        return nodes.to_vec();
    }
    let needle = search_text.to_lowercase();
    filter_nodes(nodes, &needle)
}

fn filter_nodes<T: Clone>(nodes: &[TreeNode<T>], needle: &str) -> Vec<TreeNode<T>> {
    nodes
        .iter()
        .filter_map(|node| {
            let children = filter_nodes(&node.children, needle);
            let matched = node.label.to_lowercase().contains(needle);
            (matched || !children.is_empty()).then(|| TreeNode {
                expanded: true,
                children,
                ..node.clone_shallow()
            })
        })
        .collect()
}

/// 全部展开
pub fn expand_all<T: Clone>(nodes: &[TreeNode<T>]) -> Vec<TreeNode<T>> {
    set_expanded(nodes, true)
}

/// 全部折叠
pub fn collapse_all<T: Clone>(nodes: &[TreeNode<T>]) -> Vec<TreeNode<T>> {
    set_expanded(nodes, false)
}

fn set_expanded<T: Clone>(nodes: &[TreeNode<T>], expanded: bool) -> Vec<TreeNode<T>> {
    nodes
        .iter()
        .map(|node| TreeNode {
            expanded,
            children: set_expanded(&node.children, expanded),
            ..node.clone_shallow()
        })
        .collect()
}

impl<T: Clone> TreeNode<T> {
    // 复制节点本身,不复制子树
    fn clone_shallow(&self) -> Self {
        TreeNode {
            label: self.label.clone(),
            expanded: self.expanded,
            selectable: self.selectable,
            style_class: self.style_class.clone(),
            icon: self.icon.clone(),
            children: Vec::new(),
            data: self.data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(label: &str, children: Vec<TreeNode<()>>) -> TreeNode<()> {
        TreeNode {
            label: label.to_string(),
            expanded: false,
            selectable: true,
            style_class: String::new(),
            icon: String::new(),
            children,
            data: (),
        }
    }

    fn sample() -> Vec<TreeNode<()>> {
        vec![
            node(
                "Headquarters",
                vec![
                    node("Finance", vec![node("Payroll", vec![])]),
                    node("Operations", vec![node("Logistics", vec![])]),
                ],
            ),
            node("Branch", vec![node("Sales", vec![])]),
        ]
    }

    #[test]
    fn test_deep_match_keeps_ancestors_expanded() {
        let filtered = filter_tree(&sample(), "PAYROLL");

        assert_eq!(filtered.len(), 1);
        let hq = &filtered[0];
        assert_eq!(hq.label, "Headquarters");
        assert!(hq.expanded);
        assert_eq!(hq.children.len(), 1);
        assert_eq!(hq.children[0].label, "Finance");
        assert!(hq.children[0].expanded);
        assert_eq!(hq.children[0].children[0].label, "Payroll");
        assert!(hq.children[0].children[0].expanded);
    }

    #[test]
    fn test_matching_parent_drops_unmatched_children() {
        let filtered = filter_tree(&sample(), "branch");
        assert_eq!(filtered.len(), 1);
        assert!(filtered[0].children.is_empty());
    }

    #[test]
    fn test_blank_search_returns_input() {
        let source = sample();
        assert_eq!(filter_tree(&source, "  "), source);
        assert!(filter_tree(&source, "nothing").is_empty());
    }

    #[test]
    fn test_expand_collapse_preserve_structure() {
        let source = sample();
        let expanded = expand_all(&source);
        assert!(expanded[0].children[1].children[0].expanded);

        let collapsed = collapse_all(&expanded);
        assert!(!collapsed[0].expanded);
        assert!(!collapsed[0].children[0].children[0].expanded);
        assert_eq!(collapsed, source);
    }
}
