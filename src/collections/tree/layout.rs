use std::{cmp::Ordering, mem};

use super::{Node, NodeId, Tree};
use crate::prelude::*;

/// A node described by position, used to hand-build a [`Tree`] with [`Tree::from_layout`].
///
/// `left` and `right` are indices into the same list of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNode<K, V> {
    pub key: K,
    pub value: V,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl<K, V> RawNode<K, V> {
    pub fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    pub fn with_left(mut self, index: usize) -> Self {
        self.left = Some(index);
        self
    }

    pub fn with_right(mut self, index: usize) -> Self {
        self.right = Some(index);
        self
    }
}

impl<K, V> From<RawNode<K, V>> for Node<K, V> {
    fn from(raw: RawNode<K, V>) -> Self {
        Self {
            key: raw.key,
            value: raw.value,
            left: raw.left.map(NodeId::new),
            right: raw.right.map(NodeId::new),
        }
    }
}

impl<K: Ord, V> Tree<K, V> {
    /// Builds a tree with exactly the given shape.
    ///
    /// Node `i` of the result is `nodes[i]`. The layout is rejected unless every node is owned by
    /// exactly one parent (or is the root), every index is in bounds, and every key lies strictly
    /// between the keys of the ancestors it sits below.
    pub fn from_layout(nodes: Vec<RawNode<K, V>>, root: Option<usize>) -> Result<Self> {
        validate(&nodes, root)?;

        Ok(Self {
            nodes: nodes.into_iter().map(Node::from).collect(),
            root: root.map(NodeId::new),
        })
    }
}

fn validate<K: Ord, V>(nodes: &[RawNode<K, V>], root: Option<usize>) -> Result<(), LayoutError> {
    let mut owned = vec![false; nodes.len()];
    // Each entry is a node with the exclusive lower and upper key bounds set by its ancestors.
    let mut pending: Vec<(usize, Option<&K>, Option<&K>)> = Vec::new();

    if let Some(root) = root {
        if root >= nodes.len() {
            return Err(LayoutError::DanglingRoot(root));
        }

        owned[root] = true;
        pending.push((root, None, None));
    }

    while let Some((index, lower, upper)) = pending.pop() {
        let node = &nodes[index];

        let above_lower = lower.map_or(true, |bound| node.key.cmp(bound) == Ordering::Greater);
        let below_upper = upper.map_or(true, |bound| node.key.cmp(bound) == Ordering::Less);
        if !above_lower || !below_upper {
            return Err(LayoutError::OrderViolation { node: index });
        }

        let children = [
            (node.left, lower, Some(&node.key)),
            (node.right, Some(&node.key), upper),
        ];

        for (child, lower, upper) in children {
            let Some(child) = child else {
                continue;
            };

            if child >= nodes.len() {
                return Err(LayoutError::DanglingChild {
                    parent: index,
                    child,
                });
            }

            if mem::replace(&mut owned[child], true) {
                return Err(LayoutError::MultipleOwners(child));
            }

            pending.push((child, lower, upper));
        }
    }

    match owned.iter().position(|owned| !owned) {
        Some(index) => Err(LayoutError::Unreachable(index)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::RawNode;
    use crate::prelude::*;

    type Tree = super::Tree<&'static str, u32>;

    fn leaf(key: &'static str) -> RawNode<&'static str, u32> {
        RawNode::leaf(key, 0)
    }

    #[test]
    fn test_empty_layout_is_an_empty_tree() {
        let tree = Tree::from_layout(Vec::new(), None).unwrap();

        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn test_keeps_the_given_shape() {
        let nodes = vec![leaf("b").with_left(2).with_right(1), leaf("c"), leaf("a")];
        let tree = Tree::from_layout(nodes, Some(0)).unwrap();

        let root = tree.node(tree.root().unwrap()).unwrap();
        assert_eq!(root.key(), &"b");
        assert_eq!(root.left().map(|id| id.index()), Some(2));
        assert_eq!(root.right().map(|id| id.index()), Some(1));
        assert_eq!(tree.keys(), ["a", "b", "c"]);
    }

    #[test]
    fn test_rejects_out_of_bounds_root() {
        assert_eq!(
            Tree::from_layout(vec![leaf("a")], Some(1)),
            Err(Error::Layout(LayoutError::DanglingRoot(1)))
        );
        assert_eq!(
            Tree::from_layout(Vec::new(), Some(0)),
            Err(Error::Layout(LayoutError::DanglingRoot(0)))
        );
    }

    #[test]
    fn test_rejects_out_of_bounds_child() {
        let nodes = vec![leaf("b").with_right(3), leaf("a")];

        assert_eq!(
            Tree::from_layout(nodes, Some(0)),
            Err(Error::Layout(LayoutError::DanglingChild {
                parent: 0,
                child: 3
            }))
        );
    }

    #[test]
    fn test_rejects_shared_subtrees() {
        let nodes = vec![
            leaf("b").with_left(1).with_right(2),
            leaf("a").with_right(3),
            leaf("d").with_left(3),
            leaf("c"),
        ];

        assert_eq!(
            Tree::from_layout(nodes, Some(0)),
            Err(Error::Layout(LayoutError::MultipleOwners(3)))
        );
    }

    #[test]
    fn test_rejects_cycles_through_the_root() {
        let nodes = vec![leaf("b").with_right(1), leaf("c").with_left(0)];

        assert_eq!(
            Tree::from_layout(nodes, Some(0)),
            Err(Error::Layout(LayoutError::MultipleOwners(0)))
        );
    }

    #[test]
    fn test_rejects_keys_on_the_wrong_side() {
        let nodes = vec![leaf("b").with_left(1), leaf("c")];

        assert_eq!(
            Tree::from_layout(nodes, Some(0)),
            Err(Error::Layout(LayoutError::OrderViolation { node: 1 }))
        );
    }

    #[test]
    fn test_rejects_ordering_broken_further_down() {
        // "d" is a valid right child of "a", but sits in the left subtree of "c".
        let nodes = vec![leaf("c").with_left(1), leaf("a").with_right(2), leaf("d")];

        assert_eq!(
            Tree::from_layout(nodes, Some(0)),
            Err(Error::Layout(LayoutError::OrderViolation { node: 2 }))
        );
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let nodes = vec![leaf("b").with_right(1), leaf("b")];

        assert_eq!(
            Tree::from_layout(nodes, Some(0)),
            Err(Error::Layout(LayoutError::OrderViolation { node: 1 }))
        );
    }

    #[test]
    fn test_rejects_unreachable_nodes() {
        let nodes = vec![leaf("b"), leaf("a")];

        assert_eq!(
            Tree::from_layout(nodes.clone(), Some(0)),
            Err(Error::Layout(LayoutError::Unreachable(1)))
        );
        assert_eq!(
            Tree::from_layout(nodes, None),
            Err(Error::Layout(LayoutError::Unreachable(0)))
        );
    }
}
