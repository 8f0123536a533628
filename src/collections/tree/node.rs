use std::cmp::Ordering;

/// Handle to a [`Node`] inside the arena of the tree that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in the arena, in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One of the two child slots of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The slot a search for a key continues into, given how the key compares
    /// against the current node's key. `None` on a hit.
    pub fn towards(ordering: Ordering) -> Option<Self> {
        match ordering {
            Ordering::Less => Some(Self::Left),
            Ordering::Greater => Some(Self::Right),
            Ordering::Equal => None,
        }
    }
}

/// Storage for a single key/value pair.
///
/// The key is fixed at creation; only the value is ever replaced.
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,

    /// Root of the subtree holding keys strictly less than `key`.
    pub(crate) left: Option<NodeId>,
    /// Root of the subtree holding keys strictly greater than `key`.
    pub(crate) right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
