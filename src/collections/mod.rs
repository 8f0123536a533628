mod btree_map;
mod tree;

pub use tree::{Iter, Node, NodeId, RawNode, Side, Tree};
