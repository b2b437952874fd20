//! Render the node structure with termtree.
//!
//! Children are listed left before right. A node with a single child shows one
//! branch; by construction that child is always the left one.

use std::fmt;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::tree::FullBinaryTree;

pub trait TreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeConvert for FullBinaryTree {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        if let Some(root_idx) = self.root() {
            let root_key = self.node(root_idx).map(|n| n.key.to_string()).unwrap_or_default();
            let mut tree = Tree::new(root_key);

            fn build_tree(source: &FullBinaryTree, node_idx: Index, parent_tree: &mut Tree<String>) {
                if let Some(node) = source.node(node_idx) {
                    for child_idx in node.children() {
                        if let Some(child) = source.node(child_idx) {
                            let mut child_tree = Tree::new(child.key.to_string());
                            build_tree(source, child_idx, &mut child_tree);
                            parent_tree.push(child_tree);
                        }
                    }
                }
            }

            build_tree(self, root_idx, &mut tree);
            tree
        } else {
            Tree::new("<empty>".to_string())
        }
    }
}

impl fmt::Display for FullBinaryTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}
