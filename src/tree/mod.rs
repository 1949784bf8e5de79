// ==========================================
// 资产分类 / 部门管理 - 树形展示层
// ==========================================
// 职责: 实体 → 展示树、过滤、展开 / 折叠、扁平列表组装
// 红线: 纯变换,不修改源实体
// ==========================================

pub mod filter;
pub mod hierarchy;
pub mod mapper;
pub mod view;

pub use filter::{collapse_all, expand_all, filter_tree};
pub use hierarchy::{build_hierarchy, FlatEntity, HierarchyNode};
pub use mapper::{TreeEntity, TreeMapper, TreeNode};
pub use view::TreeView;
