//! In-order iteration over a tree.

use std::iter::FusedIterator;

use crate::arena::Arena;
use crate::node::{Node, NodeId, Weight};

/// An iterator over the weights and values of a subtree in ascending weight order.
///
/// Created by [`Tree::iter`][crate::Tree::iter]. The iterator keeps its own stack of pending
/// ancestors so it never recurses, and each call to `iter` starts a fresh walk.
pub struct Iter<'a, T> {
    nodes: &'a Arena<T>,
    /// Nodes whose left subtrees have been entered but which haven't been yielded yet. The top
    /// of the stack is always the next node to yield.
    pending: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<T>, start: Option<NodeId>) -> Self {
        let mut iter = Self {
            nodes,
            pending: Vec::new(),
        };
        iter.push_left_spine(start);
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<NodeId>) {
        let nodes = self.nodes;
        while let Some(node) = link.and_then(|id| nodes.get(id)) {
            self.pending.push(node);
            link = node.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Weight, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        self.push_left_spine(node.right);
        Some((node.weight, &node.value))
    }
}

impl<T> FusedIterator for Iter<'_, T> {}
