//! This crate exposes a Binary Search Tree (BST) keyed by an integer weight, where every node
//! also knows its parent.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored records. Each `Node` stores a weight, the value that was inserted with it, and up to
//! two child `Node`s. The most important invariants of the BST are:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree have a weight less than
//!    its own weight.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree have a weight greater
//!    than its own weight.
//! 3. If a `Node` is the left or right child of another, its parent link points back at that
//!    `Node`. Only the root has no parent.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`. This tree does nothing to limit its height, so inserting weights
//! in ascending order gives a tree as tall as it has nodes. Sorted iteration comes from visiting
//! the left subtree, then the subtree root, then the right subtree.
//!
//! Nodes are owned by the [`Tree`] and referred to by [`NodeId`] handles, which stay cheap to copy
//! and go stale (rather than dangling) once their node is deleted.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
mod error;
mod iter;
mod node;
mod tree;

pub use error::TreeError;
pub use iter::Iter;
pub use node::{Node, NodeId, Weight};
pub use tree::{SearchOutcome, Tree};
