use std::iter::FusedIterator;

use super::{NodeId, Tree};

/// In-order iterator over the entries of a [`Tree`].
///
/// Keeps its own stack of pending ancestors instead of recursing, so it works on trees of any
/// height.
pub struct Iter<'a, K, V> {
    tree: &'a Tree<K, V>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(tree: &'a Tree<K, V>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
            remaining: tree.len(),
        };
        iter.descend(tree.root);
        iter
    }

    /// Pushes `at` and its chain of left children.
    fn descend(&mut self, mut at: Option<NodeId>) {
        while let Some(id) = at {
            self.stack.push(id);
            at = self.tree.nodes[id.index()].left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id.index()];

        self.descend(node.right);
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use proptest::prelude::*;
    use test_strategy::proptest;

    use crate::testing::sorted_keys;

    type Tree = super::Tree<String, Vec<u8>>;

    #[test]
    fn test_empty_tree_yields_nothing() {
        let tree = Tree::new();
        let mut iter = tree.iter();

        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_yields_entries_in_key_order() {
        let tree: Tree = [("b", "2"), ("a", "1"), ("c", "3")]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.as_bytes().to_vec()))
            .collect();

        let entries = tree
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_slice()))
            .collect_vec();

        assert_eq!(entries, [("a", &b"1"[..]), ("b", &b"2"[..]), ("c", &b"3"[..])]);
    }

    #[proptest(fork = false)]
    fn test_matches_keys_and_get(tree: Tree) {
        let mut iter = tree.iter();
        prop_assert_eq!(iter.len(), tree.len());

        for key in tree.keys() {
            let (k, v) = iter.next().unwrap();

            prop_assert_eq!(k, &key);
            prop_assert_eq!(Some(v), tree.get(key.as_str()));
        }

        prop_assert_eq!(iter.len(), 0);
        prop_assert!(iter.next().is_none());
    }

    #[proptest(fork = false)]
    fn test_walks_a_degenerate_tree(#[strategy(sorted_keys(0..200))] keys: Vec<String>) {
        let tree: Tree = keys.iter().map(|key| (key.clone(), Vec::new())).collect();

        prop_assert_eq!(tree.iter().map(|(key, _)| key.clone()).collect_vec(), keys);
    }
}
