//! Errors reported by [`Tree`][crate::Tree] operations.
//!
//! A weight that simply isn't in the tree is not an error - lookups and deletions report that
//! with `None` (or [`SearchOutcome::Missing`][crate::SearchOutcome::Missing]). These variants
//! are for calls that can't be answered at all.

use crate::node::NodeId;

/// Why a tree operation could not be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The tree has no nodes so there is no minimum or maximum.
    #[error("tree is empty")]
    Empty,
    /// The handle doesn't name a live node of this tree. Usually the node it named has been
    /// deleted.
    #[error("node {0} is not in this tree")]
    StaleNode(NodeId),
}
