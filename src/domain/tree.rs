use std::collections::VecDeque;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace, warn};

/// Fixed-width key stored in every node.
pub type Key = i32;

/// Tree node in the arena-backed full binary tree.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode {
    pub(crate) key: Key,
    pub(crate) left: Option<Index>,
    pub(crate) right: Option<Index>,
}

impl TreeNode {
    fn leaf(key: Key) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Exactly one child present.
    pub(crate) fn is_partial(&self) -> bool {
        self.left.is_some() != self.right.is_some()
    }

    /// Present children, left before right.
    pub(crate) fn children(&self) -> impl Iterator<Item = Index> {
        self.left.into_iter().chain(self.right)
    }
}

/// What a call to [`FullBinaryTree::remove`] actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The tree had no nodes.
    Empty,
    /// No node holds the key; nothing changed.
    NotFound,
    /// The key was held by a childless root, the tree is now empty.
    RootCleared,
    /// The target node now holds `replacement`, the key of the deepest
    /// level-order node, which was excised.
    Replaced { replacement: Key },
}

/// Arena-backed binary tree that fills level by level, left to right.
///
/// Nodes live in a generational arena and link to their children by index,
/// so every node is owned by exactly one parent slot (or by `root`). Arena
/// indices never leave the crate.
///
/// Insertion attaches to the first node missing a child in level order and
/// deletion excises the last node in level order, so the structure is always
/// a complete binary tree. It is full whenever the node count is odd; with an
/// even count exactly one node has a single (left) child.
#[derive(Debug, Clone)]
pub struct FullBinaryTree {
    /// Arena storage; holds exactly the nodes reachable from `root`
    arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for FullBinaryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FullBinaryTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Build a tree from keys laid out as an implicit complete binary tree:
    /// the key at `i` gets children `2i + 1` and `2i + 2`.
    pub fn from_level_order(keys: &[Key]) -> Self {
        let mut tree = Self::new();
        tree.rebuild(keys);
        tree
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root_key(&self) -> Option<Key> {
        self.root.and_then(|idx| self.node(idx)).map(|node| node.key)
    }

    pub(crate) fn root(&self) -> Option<Index> {
        self.root
    }

    pub(crate) fn node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// Adds a new leaf holding `key` at the first free child slot in level order.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, key: Key) {
        let Some(root) = self.root else {
            self.root = Some(self.arena.insert(TreeNode::leaf(key)));
            trace!("insert: {} became root", key);
            return;
        };

        let mut queue = VecDeque::from([root]);
        while let Some(current) = queue.pop_front() {
            let Some(node) = self.arena.get(current) else {
                continue;
            };
            match (node.left, node.right) {
                (None, _) => {
                    let child = self.arena.insert(TreeNode::leaf(key));
                    if let Some(parent) = self.arena.get_mut(current) {
                        parent.left = Some(child);
                    }
                    return;
                }
                (Some(_), None) => {
                    let child = self.arena.insert(TreeNode::leaf(key));
                    if let Some(parent) = self.arena.get_mut(current) {
                        parent.right = Some(child);
                    }
                    return;
                }
                (Some(left), Some(right)) => {
                    queue.push_back(left);
                    queue.push_back(right);
                }
            }
        }
    }

    /// Removes one node holding `key` by moving the deepest level-order key
    /// into its slot and excising the deepest node.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, key: Key) -> RemoveOutcome {
        let Some(root) = self.root else {
            return RemoveOutcome::Empty;
        };

        if let Some(node) = self.arena.get(root) {
            if node.key == key && node.is_leaf() {
                self.arena.remove(root);
                self.root = None;
                return RemoveOutcome::RootCleared;
            }
        }

        // One level-order pass: first match is the target, last visited is the deepest.
        let mut target = None;
        let mut deepest = (None, root);
        let mut queue = VecDeque::from([(None, root)]);
        while let Some((parent, current)) = queue.pop_front() {
            let Some(node) = self.arena.get(current) else {
                continue;
            };
            if target.is_none() && node.key == key {
                target = Some(current);
            }
            deepest = (parent, current);
            for child in node.children() {
                queue.push_back((Some(current), child));
            }
        }

        let Some(target) = target else {
            return RemoveOutcome::NotFound;
        };
        let (parent, deepest) = deepest;
        let Some(replacement) = self.arena.get(deepest).map(|node| node.key) else {
            return RemoveOutcome::NotFound;
        };

        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent) if parent.left == Some(deepest) => parent.left = None,
            Some(parent) if parent.right == Some(deepest) => parent.right = None,
            Some(_) => {
                warn!("remove: deepest node is not linked from its parent");
                return RemoveOutcome::NotFound;
            }
            None => self.root = None,
        }
        if let Some(node) = self.arena.get_mut(target) {
            node.key = replacement;
        }
        self.arena.remove(deepest);
        trace!("remove: {} replaced by {}", key, replacement);

        RemoveOutcome::Replaced { replacement }
    }

    /// Deletes one node holding `key`; a missing key is a no-op.
    pub fn delete(&mut self, key: Key) {
        let outcome = self.remove(key);
        debug!("delete {}: {:?}", key, outcome);
    }

    /// Unordered membership test.
    pub fn contains(&self, key: Key) -> bool {
        self.search(self.root, key)
    }

    fn search(&self, node: Option<Index>, key: Key) -> bool {
        match node.and_then(|idx| self.node(idx)) {
            Some(node) => {
                node.key == key || self.search(node.left, key) || self.search(node.right, key)
            }
            None => false,
        }
    }

    /// Textual echo of [`contains`](Self::contains): the key itself, or an empty string.
    pub fn get(&self, key: Key) -> String {
        if self.contains(key) {
            key.to_string()
        } else {
            String::new()
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Number of levels, 0 for an empty tree.
    pub fn depth(&self) -> usize {
        self.root.map_or(0, |root| self.calculate_depth(root))
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.node(node_idx) {
            1 + node
                .children()
                .map(|child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Whether every node has zero or two children.
    pub fn is_full(&self) -> bool {
        self.level_order_nodes().all(|(_, node)| !node.is_partial())
    }

    /// Keys of nodes with exactly one child, in level order.
    pub fn partial_nodes(&self) -> Vec<Key> {
        self.level_order_nodes()
            .filter(|(_, node)| node.is_partial())
            .map(|(_, node)| node.key)
            .collect()
    }

    /// Replace the whole structure with the implicit complete tree over `keys`.
    pub(crate) fn rebuild(&mut self, keys: &[Key]) {
        self.clear();
        let slots: Vec<Index> = keys
            .iter()
            .map(|&key| self.arena.insert(TreeNode::leaf(key)))
            .collect();

        for (i, &idx) in slots.iter().enumerate() {
            let left = slots.get(2 * i + 1).copied();
            let right = slots.get(2 * i + 2).copied();
            if let Some(node) = self.arena.get_mut(idx) {
                node.left = left;
                node.right = right;
            }
        }
        self.root = slots.first().copied();
        debug!("rebuild: {} nodes, depth {}", self.len(), self.depth());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[Key]) -> FullBinaryTree {
        let mut tree = FullBinaryTree::new();
        for &key in keys {
            tree.insert(key);
        }
        tree
    }

    #[test]
    fn remove_reports_each_outcome() {
        let mut tree = FullBinaryTree::new();
        assert_eq!(tree.remove(1), RemoveOutcome::Empty);

        tree.insert(1);
        assert_eq!(tree.remove(2), RemoveOutcome::NotFound);
        assert_eq!(tree.remove(1), RemoveOutcome::RootCleared);
        assert!(tree.is_empty());

        let mut tree = tree_of(&[10, 5, 15, 3, 7]);
        assert_eq!(tree.remove(5), RemoveOutcome::Replaced { replacement: 7 });
    }

    #[test]
    fn remove_of_deepest_node_is_a_self_copy() {
        let mut tree = tree_of(&[1, 2, 3]);
        assert_eq!(tree.remove(3), RemoveOutcome::Replaced { replacement: 3 });
        assert_eq!(tree.len(), 2);
        assert!(!tree.contains(3));
    }

    #[test]
    fn remove_picks_first_level_order_match_among_duplicates() {
        let mut tree = tree_of(&[4, 4, 9, 4, 8]);
        tree.remove(4);
        assert_eq!(tree.root_key(), Some(8));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn arena_holds_only_reachable_nodes() {
        let mut tree = tree_of(&[1, 2, 3, 4, 5, 6, 7]);
        tree.delete(2);
        tree.delete(6);
        tree.delete(42);
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.level_order_nodes().count(), tree.len());
    }

    #[test]
    fn rebuild_links_implicit_children() {
        let tree = FullBinaryTree::from_level_order(&[1, 2, 3, 4]);
        let root = tree.root().and_then(|idx| tree.node(idx)).cloned();
        let root = root.expect("root");
        let left = root.left.and_then(|idx| tree.node(idx)).expect("left");
        assert_eq!(left.key, 2);
        assert!(left.is_partial());
        assert_eq!(tree.depth(), 3);
    }
}
