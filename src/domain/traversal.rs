//! Depth-first and breadth-first walks over a [`FullBinaryTree`].
//!
//! All iterators borrow the tree for their lifetime and never mutate it.

use std::collections::VecDeque;
use std::fmt;

use generational_arena::Index;
use itertools::Itertools;
use tracing::instrument;

use crate::domain::tree::{FullBinaryTree, Key, TreeNode};

/// Visiting order for a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// node, left subtree, right subtree
    Pre,
    /// left subtree, node, right subtree
    In,
    /// left subtree, right subtree, node
    Post,
    /// depth by depth, left to right
    Level,
}

impl Order {
    pub const ALL: [Order; 4] = [Order::Pre, Order::In, Order::Post, Order::Level];
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::Pre => "preorder",
            Order::In => "inorder",
            Order::Post => "postorder",
            Order::Level => "level-order",
        };
        f.write_str(name)
    }
}

impl FullBinaryTree {
    pub fn preorder(&self) -> impl Iterator<Item = Key> + '_ {
        PreOrderIterator::new(self).map(|(_, node)| node.key)
    }

    pub fn inorder(&self) -> impl Iterator<Item = Key> + '_ {
        InOrderIterator::new(self).map(|(_, node)| node.key)
    }

    pub fn postorder(&self) -> impl Iterator<Item = Key> + '_ {
        PostOrderIterator::new(self).map(|(_, node)| node.key)
    }

    pub fn level_order(&self) -> impl Iterator<Item = Key> + '_ {
        self.level_order_nodes().map(|(_, node)| node.key)
    }

    pub(crate) fn level_order_nodes(&self) -> LevelOrderIterator<'_> {
        LevelOrderIterator::new(self)
    }

    /// Keys in the given order.
    #[instrument(level = "trace", skip(self))]
    pub fn traverse(&self, order: Order) -> Vec<Key> {
        match order {
            Order::Pre => self.preorder().collect(),
            Order::In => self.inorder().collect(),
            Order::Post => self.postorder().collect(),
            Order::Level => self.level_order().collect(),
        }
    }

    /// Keys in the given order joined by single spaces; empty tree gives "".
    pub fn traversal_text(&self, order: Order) -> String {
        self.traverse(order).iter().join(" ")
    }

    pub fn preorder_text(&self) -> String {
        self.traversal_text(Order::Pre)
    }

    pub fn inorder_text(&self) -> String {
        self.traversal_text(Order::In)
    }

    pub fn postorder_text(&self) -> String {
        self.traversal_text(Order::Post)
    }

    pub fn level_order_text(&self) -> String {
        self.traversal_text(Order::Level)
    }
}

pub(crate) struct PreOrderIterator<'a> {
    tree: &'a FullBinaryTree,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a FullBinaryTree) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                // right first so left pops first
                self.stack.extend(node.right);
                self.stack.extend(node.left);
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub(crate) struct InOrderIterator<'a> {
    tree: &'a FullBinaryTree,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<'a> InOrderIterator<'a> {
    fn new(tree: &'a FullBinaryTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root(),
        }
    }
}

impl<'a> Iterator for InOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        // descend along left links
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.tree.node(idx).and_then(|node| node.left);
        }
        let idx = self.stack.pop()?;
        let node = self.tree.node(idx)?;
        self.current = node.right;
        Some((idx, node))
    }
}

pub(crate) struct PostOrderIterator<'a> {
    tree: &'a FullBinaryTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a FullBinaryTree) -> Self {
        Self {
            tree,
            stack: tree.root().map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                self.stack.extend(node.right.map(|idx| (idx, false)));
                self.stack.extend(node.left.map(|idx| (idx, false)));
            }
        }
        None
    }
}

pub(crate) struct LevelOrderIterator<'a> {
    tree: &'a FullBinaryTree,
    queue: VecDeque<Index>,
}

impl<'a> LevelOrderIterator<'a> {
    fn new(tree: &'a FullBinaryTree) -> Self {
        Self {
            tree,
            queue: tree.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for LevelOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.queue.pop_front() {
            if let Some(node) = self.tree.node(current_idx) {
                self.queue.extend(node.children());
                return Some((current_idx, node));
            }
        }
        None
    }
}
