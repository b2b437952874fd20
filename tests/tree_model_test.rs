//! Property tests: random insert/delete sequences checked against a
//! level-order `Vec` model of the tree.

use proptest::prelude::*;

use fbtree::{FullBinaryTree, Key, Order};

#[derive(Debug, Clone, Copy)]
enum Op {
    Insert(Key),
    Delete(Key),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-10i32..10).prop_map(Op::Insert),
        (-10i32..10).prop_map(Op::Delete),
    ]
}

/// Level-order model: insert appends; delete moves the last key into the
/// first matching slot and drops the last slot.
fn apply_to_model(model: &mut Vec<Key>, op: Op) {
    match op {
        Op::Insert(key) => model.push(key),
        Op::Delete(key) => {
            if let Some(pos) = model.iter().position(|&k| k == key) {
                if let Some(last) = model.pop() {
                    if pos < model.len() {
                        model[pos] = last;
                    }
                }
            }
        }
    }
}

fn sorted(mut keys: Vec<Key>) -> Vec<Key> {
    keys.sort_unstable();
    keys
}

proptest! {
    #[test]
    fn random_operations_match_level_order_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut tree = FullBinaryTree::new();
        let mut model: Vec<Key> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(key) => tree.insert(key),
                Op::Delete(key) => tree.delete(key),
            }
            apply_to_model(&mut model, op);

            prop_assert_eq!(tree.level_order().collect::<Vec<_>>(), model.clone());
            prop_assert_eq!(tree.len(), model.len());

            let expected = sorted(model.clone());
            for order in [Order::Pre, Order::In, Order::Post] {
                prop_assert_eq!(sorted(tree.traverse(order)), expected.clone(), "{}", order);
            }

            let odd_or_empty = model.len() % 2 == 1 || model.is_empty();
            prop_assert_eq!(tree.is_full(), odd_or_empty);
            prop_assert_eq!(tree.partial_nodes().len(), usize::from(!odd_or_empty));

            let (restored, _) = FullBinaryTree::from_bytes(&tree.to_bytes().unwrap());
            prop_assert_eq!(restored.preorder_text(), tree.preorder_text());
            prop_assert_eq!(restored.inorder_text(), tree.inorder_text());
        }
    }

    #[test]
    fn deleted_key_is_absent_unless_duplicated(keys in prop::collection::vec(-10i32..10, 1..50), pick in any::<prop::sample::Index>()) {
        let mut tree = FullBinaryTree::new();
        for &key in &keys {
            tree.insert(key);
        }
        let key = keys[pick.index(keys.len())];
        let copies = keys.iter().filter(|&&k| k == key).count();

        tree.delete(key);

        prop_assert_eq!(tree.contains(key), copies > 1);
        prop_assert_eq!(tree.len(), keys.len() - 1);
    }
}
