use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reasons a hand-built node layout can not be turned into a [`Tree`](crate::collections::Tree).
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum LayoutError {
    #[error("root index {0} is out of bounds")]
    DanglingRoot(usize),

    #[error("node {parent} points to missing child {child}")]
    DanglingChild { parent: usize, child: usize },

    #[error("node {0} has more than one owner")]
    MultipleOwners(usize),

    #[error("node {node} breaks the search tree ordering")]
    OrderViolation { node: usize },

    #[error("node {0} is unreachable from the root")]
    Unreachable(usize),
}

#[derive(Debug, ThisError, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}
