//! The nodes stored in a [`Tree`][crate::Tree] and the handles used to name them.

use std::fmt;

/// The integer key that positions a node in the tree. It is distinct from the value the node
/// carries.
pub type Weight = i64;

/// A handle to a node in a [`Tree`][crate::Tree].
///
/// Handles are cheap to copy and never keep a node alive. Once the node a handle names is
/// deleted, the handle goes stale and every tree operation given it reports
/// [`TreeError::StaleNode`][crate::TreeError::StaleNode] - even if the storage slot has since
/// been reused for a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Which child edge of a node is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// A `Node` has a weight that is used for searching/sorting and a value associated with that
/// weight.
///
/// `left` and `right` are the only edges that place a node in the tree: every node is the child
/// of at most one other node. `parent` points back up the tree and is only followed while
/// rewiring around a deleted node. A node without a parent is the root.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) weight: Weight,
    pub(crate) value: T,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn new(weight: Weight, value: T, parent: Option<NodeId>) -> Self {
        Self {
            weight,
            value,
            left: None,
            right: None,
            parent,
        }
    }

    /// The weight this node is ordered by.
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// The value stored alongside the weight.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The root of this node's left subtree, if any. Every weight in it is smaller than
    /// [`weight`][Self::weight].
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The root of this node's right subtree, if any. Every weight in it is larger than
    /// [`weight`][Self::weight].
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// The node this one hangs from. `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// The side `child` hangs from, if it is one of this node's children.
    pub(crate) fn side_of(&self, child: NodeId) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}
