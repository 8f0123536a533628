mod iter;
mod layout;
mod node;

use std::{borrow::Borrow, fmt};

use proptest::{collection::vec, prelude::*};
use tracing::{instrument, trace};

use crate::prelude::*;

pub use {
    iter::Iter,
    layout::RawNode,
    node::{Node, NodeId, Side},
};

/// An ordered key-value container, stored as an unbalanced binary search tree.
///
/// Every [`Node`] holds one key, its value, and up to two children. For any node, all keys in
/// its left subtree are strictly smaller than its key, and all keys in its right subtree are
/// strictly greater. Keys are unique, so an in-order walk yields them in ascending order.
///
/// # Storage
///
/// Nodes live in an arena owned by the tree and are addressed by [`NodeId`]. Nodes are
/// appended when a key is first inserted and are never moved, re-parented or freed, so a
/// [`NodeId`] stays valid for as long as the tree lives. The root slot is filled by the first
/// insertion and never changes after that.
///
/// # Ordering
///
/// Keys are compared with [`Ord`]. For the default `String` keys this is byte-wise
/// lexicographic order.
///
/// # Cost
///
/// There is no rebalancing. The shape, and with it the cost of every operation, depends on
/// insertion order: keys inserted in random order give a height close to `lg N`, keys inserted
/// in sorted order give a height of `N`. Lookup, upsert and [`Tree::keys`] recurse once per
/// level, so a very tall tree can exhaust the call stack. [`Tree::iter`] walks with an explicit
/// stack and is not affected.
///
/// # Example
///
/// ```
/// use bstree::collections::Tree;
///
/// let mut tree: Tree = Tree::new();
/// tree.set("name", "Bob");
/// tree.set("planet", "Earth");
///
/// assert_eq!(tree.get("name").map(Vec::as_slice), Some(&b"Bob"[..]));
/// assert_eq!(tree.get("moon"), None);
/// assert_eq!(tree.keys(), ["name", "planet"]);
/// ```
#[derive(Clone)]
pub struct Tree<K = String, V = Vec<u8>> {
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
}

/// Outcome of an upsert below a given slot.
enum Placement<K, V> {
    /// The key now lives at this node, either updated or freshly attached.
    Found(NodeId),
    /// The slot that was reached is empty; the entry is handed back so that the parent of the
    /// slot can attach it.
    NotPresent(K, V),
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Tree<K, V> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Creates an empty tree with room for `capacity` nodes before the arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.nodes.get(id.index())
    }

    /// Number of nodes on the longest path from the root to a leaf; zero for an empty tree.
    pub fn height(&self) -> usize {
        self.depth(self.root)
    }

    fn depth(&self, at: Option<NodeId>) -> usize {
        at.map_or(0, |id| {
            let node = &self.nodes[id.index()];
            1 + self.depth(node.left).max(self.depth(node.right))
        })
    }

    /// Iterates over all entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Returns a snapshot of all keys in ascending order.
    #[instrument(level = "trace", skip_all, fields(len = self.len()))]
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.len());
        self.collect_keys(self.root, &mut keys);
        keys
    }

    fn collect_keys(&self, at: Option<NodeId>, keys: &mut Vec<K>)
    where
        K: Clone,
    {
        let Some(id) = at else {
            return;
        };

        let node = &self.nodes[id.index()];
        self.collect_keys(node.left, keys);
        keys.push(node.key.clone());
        self.collect_keys(node.right, keys);
    }

    fn search<Q>(&self, key: &Q, at: Option<NodeId>) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = at?;
        let node = &self.nodes[id.index()];

        match Side::towards(key.cmp(node.key.borrow())) {
            None => Some(id),
            Some(side) => self.search(key, node.child(side)),
        }
    }

    /// Locates the node holding `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key, self.root)
    }

    #[instrument(level = "trace", skip_all)]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|id| &self.nodes[id.index()].value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    fn alloc(&mut self, key: K, value: V) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::leaf(key, value));
        trace!(node = id.index(), "created node");
        id
    }
}

impl<K: Ord, V> Tree<K, V> {
    /// Stores `value` under `key`, replacing the value in place if the key is already present.
    pub fn set(&mut self, key: impl Into<K>, value: impl Into<V>) {
        self.upsert(key, value);
    }

    /// Same as [`Tree::set`], but returns the node that now holds the key.
    #[instrument(level = "trace", skip_all, fields(len = self.len()))]
    pub fn upsert(&mut self, key: impl Into<K>, value: impl Into<V>) -> NodeId {
        match self.put(key.into(), value.into(), self.root) {
            Placement::Found(id) => id,
            // Only an empty tree ends up here; there is no parent to attach to, so the new
            // node becomes the root.
            Placement::NotPresent(key, value) => {
                let id = self.alloc(key, value);
                self.root = Some(id);
                id
            }
        }
    }

    fn put(&mut self, key: K, value: V, at: Option<NodeId>) -> Placement<K, V> {
        let Some(id) = at else {
            return Placement::NotPresent(key, value);
        };

        let node = &self.nodes[id.index()];
        let Some(side) = Side::towards(key.cmp(&node.key)) else {
            self.nodes[id.index()].value = value;
            trace!(node = id.index(), "updated value");
            return Placement::Found(id);
        };
        let next = node.child(side);

        match self.put(key, value, next) {
            Placement::Found(found) => Placement::Found(found),
            Placement::NotPresent(key, value) => {
                let child = self.alloc(key, value);
                *self.nodes[id.index()].child_mut(side) = Some(child);
                Placement::Found(child)
            }
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Tree<K, V> {
    /// Trees are equal when they hold the same entries, whatever their shape.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for Tree<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Tree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        for (key, value) in entries {
            self.set(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        let mut tree = Self::new();
        tree.extend(entries);
        tree
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Arbitrary for Tree<K, V>
where
    K: Arbitrary + Ord + 'static,
    V: Arbitrary + 'static,
{
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        vec(any::<(K, V)>(), 0..32)
            .prop_map(|entries| entries.into_iter().collect())
            .boxed()
    }
}

impl<K, V> OrderedMap<K, V> for Tree<K, V>
where
    K: Arbitrary + Ord + Clone + 'static,
    V: Arbitrary + Clone + PartialEq + 'static,
{
    fn get(&self, key: &K) -> Option<&V> {
        Tree::get(self, key)
    }

    fn set(&mut self, key: K, value: V) {
        Tree::set(self, key, value);
    }

    fn keys(&self) -> Vec<K> {
        Tree::keys(self)
    }

    fn len(&self) -> usize {
        Tree::len(self)
    }
}
