//! A weight-keyed BST whose nodes point both down to their children and up to their parent.
//! The nodes live in an arena owned by the tree and are named by [`NodeId`] handles, so walking
//! back up the tree needs no `unsafe`.
//!
//! The tree never rebalances itself. Its shape depends only on the order of insertions, so
//! inserting ascending weights produces a chain.
//!
//! # Examples
//!
//! ```
//! use weighted_bst::Tree;
//!
//! let mut tree = Tree::new(5, "five");
//!
//! tree.insert(1, "one");
//! tree.insert(7, "seven");
//! assert_eq!(tree.find(1), Some(&"one"));
//!
//! // Inserting a new value for the same weight overwrites the value.
//! tree.insert(1, "uno");
//! assert_eq!(tree.find(1), Some(&"uno"));
//!
//! // Deleting a node returns its value.
//! assert_eq!(tree.delete(1), Some("uno"));
//! assert_eq!(tree.find(1), None);
//!
//! let mut weights = Vec::new();
//! tree.traverse(|weight| weights.push(weight));
//! assert_eq!(weights, [5, 7]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

use tracing::{debug, trace};

use crate::arena::Arena;
use crate::error::TreeError;
use crate::iter::Iter;
use crate::node::{Node, NodeId, Side, Weight};

/// The result of [`Tree::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A node holding the value was found.
    Found(NodeId),
    /// The value lies below the tree's smallest value or above its largest, so the search stopped
    /// before descending. Carries the node the search started from.
    OutOfRange(NodeId),
    /// The value is within range but the descent ran out of nodes without meeting it.
    Missing,
}

impl SearchOutcome {
    /// The node that was found, if any.
    pub fn found(self) -> Option<NodeId> {
        match self {
            Self::Found(id) => Some(id),
            Self::OutOfRange(_) | Self::Missing => None,
        }
    }
}

/// A Binary Search Tree keyed by [`Weight`]. It supports inserting, finding, and deleting weights
/// and their values, min/max queries, in-order traversal, and checking that the ordering
/// invariant holds.
#[derive(Clone)]
pub struct Tree<T> {
    nodes: Arena<T>,
    root: Option<NodeId>,
}

impl<T> Default for Tree<T> {
    /// An empty tree. This is also what a tree becomes once its last node is deleted.
    fn default() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T> Tree<T> {
    /// Creates a tree whose root holds `weight` and `value`.
    pub fn new(weight: Weight, value: T) -> Self {
        let mut tree = Self::default();
        tree.root = Some(tree.nodes.alloc(Node::new(weight, value, None)));
        debug!(weight, "created tree");
        tree
    }

    /// The root node, or `None` if every node has been deleted.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Looks up the node a handle names.
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's value. Weights can't be changed in place because that could
    /// break the ordering.
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|node| &mut node.value)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// How many levels are in the tree. An empty tree has height 0 and a lone root has height 1.
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: Vec<_> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((id, depth)) = pending.pop() {
            tallest = tallest.max(depth);
            if let Some(node) = self.nodes.get(id) {
                pending.extend(node.left.map(|left| (left, depth + 1)));
                pending.extend(node.right.map(|right| (right, depth + 1)));
            }
        }
        tallest
    }

    fn node(&self, id: NodeId) -> Result<&Node<T>, TreeError> {
        self.nodes.get(id).ok_or(TreeError::StaleNode(id))
    }

    /// Potentially finds the value stored at the given weight. If no node has the weight, `None`
    /// is returned.
    pub fn find(&self, weight: Weight) -> Option<&T> {
        let id = self.locate(self.root?, weight)?;
        self.nodes.get(id).map(|node| &node.value)
    }

    /// Whether some node has the given weight.
    pub fn contains_weight(&self, weight: Weight) -> bool {
        self.root
            .and_then(|root| self.locate(root, weight))
            .is_some()
    }

    /// Descends from `start` by weight to the node holding `weight`.
    fn locate(&self, start: NodeId, weight: Weight) -> Option<NodeId> {
        let mut link = Some(start);
        while let Some(id) = link {
            let node = self.nodes.get(id)?;
            link = match weight.cmp(&node.weight) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Searches the subtree under `start` for a node holding `value`, steering by comparing
    /// values rather than weights. This only finds what it's looking for when values are ordered
    /// the same way as their weights.
    ///
    /// Before descending, `value` is checked against the values at the tree's minimum and
    /// maximum weights (found from the root, not from `start`). Anything outside that range
    /// yields [`SearchOutcome::OutOfRange`] with `start` handed back.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighted_bst::{SearchOutcome, Tree};
    ///
    /// let mut tree = Tree::new(5, 50);
    /// tree.insert(3, 30);
    /// tree.insert(8, 80);
    /// let root = tree.root().unwrap();
    ///
    /// let found = tree.search(root, &30).unwrap().found().unwrap();
    /// assert_eq!(tree.get(found).unwrap().weight(), 3);
    ///
    /// assert_eq!(tree.search(root, &99), Ok(SearchOutcome::OutOfRange(root)));
    /// assert_eq!(tree.search(root, &40), Ok(SearchOutcome::Missing));
    /// ```
    pub fn search(&self, start: NodeId, value: &T) -> Result<SearchOutcome, TreeError>
    where
        T: Ord,
    {
        self.node(start)?;
        let smallest = self.node(self.find_minimum()?)?;
        let largest = self.node(self.find_maximum()?)?;
        if *value < smallest.value || *value > largest.value {
            trace!(?start, "search value out of range");
            return Ok(SearchOutcome::OutOfRange(start));
        }

        let mut link = Some(start);
        while let Some(id) = link {
            let node = self.node(id)?;
            link = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Equal => {
                    trace!(weight = node.weight, "search found value");
                    return Ok(SearchOutcome::Found(id));
                }
                Ordering::Greater => node.right,
            };
        }
        trace!(?start, "search ran out of nodes");
        Ok(SearchOutcome::Missing)
    }

    /// Inserts the given value into the tree at the given weight and returns the root. Inserting
    /// a new value for an existing weight overwrites its value.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighted_bst::Tree;
    ///
    /// let mut tree = Tree::default();
    ///
    /// let root = tree.insert(1, 2);
    /// assert_eq!(tree.root(), Some(root));
    /// assert_eq!(tree.find(1), Some(&2));
    ///
    /// tree.insert(1, 3);
    /// assert_eq!(tree.find(1), Some(&3));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, weight: Weight, value: T) -> NodeId {
        match self.root {
            Some(root) => {
                self.insert_below(root, weight, value);
                root
            }
            None => {
                let root = self.nodes.alloc(Node::new(weight, value, None));
                debug!(weight, "inserted root");
                self.root = Some(root);
                root
            }
        }
    }

    /// Inserts into the subtree rooted at `start` and returns the root of that subtree.
    ///
    /// Only the subtree's ordering is consulted. Inserting a weight that belongs outside the
    /// subtree (say, a weight larger than `start`'s parent into its left subtree) breaks the
    /// tree's ordering, which [`is_valid`][Self::is_valid] will then report.
    pub fn insert_at(
        &mut self,
        start: NodeId,
        weight: Weight,
        value: T,
    ) -> Result<NodeId, TreeError> {
        self.node(start)?;
        self.insert_below(start, weight, value);
        Ok(start)
    }

    fn insert_below(&mut self, start: NodeId, weight: Weight, value: T) {
        let mut current = start;
        loop {
            let node = match self.nodes.get_mut(current) {
                Some(node) => node,
                None => {
                    debug_assert!(false, "descended into a freed node");
                    return;
                }
            };
            let side = match weight.cmp(&node.weight) {
                Ordering::Less => Side::Left,
                Ordering::Equal => {
                    node.value = value;
                    debug!(weight, "overwrote value");
                    return;
                }
                Ordering::Greater => Side::Right,
            };

            match node.child(side) {
                Some(child) => current = child,
                None => {
                    let leaf = self.nodes.alloc(Node::new(weight, value, Some(current)));
                    if let Some(parent) = self.nodes.get_mut(current) {
                        parent.set_child(side, Some(leaf));
                    }
                    debug!(weight, ?side, "inserted leaf");
                    return;
                }
            }
        }
    }

    /// Deletes the node with the given weight from the tree and returns its value. If the tree
    /// does not contain a node with the weight, nothing happens and `None` is returned.
    ///
    /// A node with two children keeps its place in the tree: it takes over the weight and value
    /// of its in-order successor and the successor's node is removed instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighted_bst::Tree;
    ///
    /// let mut tree = Tree::new(1, 2);
    ///
    /// assert_eq!(tree.delete(1), Some(2));
    /// assert_eq!(tree.delete(1), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, weight: Weight) -> Option<T> {
        let target = self.locate(self.root?, weight)?;
        self.remove(target)
    }

    /// Like [`delete`][Self::delete] but only looks for `weight` in the subtree rooted at
    /// `start`.
    pub fn delete_from(&mut self, start: NodeId, weight: Weight) -> Result<Option<T>, TreeError> {
        self.node(start)?;
        Ok(self
            .locate(start, weight)
            .and_then(|target| self.remove(target)))
    }

    fn remove(&mut self, target: NodeId) -> Option<T> {
        let node = self.nodes.get(target)?;
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                // The successor is the leftmost node on the right so it has no left child.
                let successor = self.leftmost(right);
                let mut removed = self.unlink(successor)?;
                let node = self.nodes.get_mut(target)?;
                mem::swap(&mut node.weight, &mut removed.weight);
                mem::swap(&mut node.value, &mut removed.value);
                debug!(
                    weight = removed.weight,
                    successor = node.weight,
                    "deleted node with two children"
                );
                Some(removed.value)
            }
            _ => {
                let removed = self.unlink(target)?;
                debug!(weight = removed.weight, leaf = removed.is_leaf(), "deleted node");
                Some(removed.value)
            }
        }
    }

    /// Removes a node with at most one child from the tree, putting that child (or nothing) in
    /// its place.
    fn unlink(&mut self, id: NodeId) -> Option<Node<T>> {
        let node = self.nodes.remove(id)?;
        debug_assert!(node.left.is_none() || node.right.is_none());
        self.replace_in_parent(id, node.parent, node.left.or(node.right));
        Some(node)
    }

    /// Points whatever referenced `old` (its parent, or the tree itself for the root) at
    /// `new` instead, and points `new` back at that parent.
    fn replace_in_parent(&mut self, old: NodeId, parent: Option<NodeId>, new: Option<NodeId>) {
        match parent {
            Some(parent) => match self.nodes.get_mut(parent) {
                Some(parent_node) => match parent_node.side_of(old) {
                    Some(side) => parent_node.set_child(side, new),
                    None => debug_assert!(false, "{} isn't a child of its parent", old),
                },
                None => debug_assert!(false, "parent of {} was freed", old),
            },
            None => {
                debug!(new_root = ?new, "replaced root");
                self.root = new;
            }
        }
        if let Some(child) = new.and_then(|new| self.nodes.get_mut(new)) {
            child.parent = parent;
        }
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes.get(id).and_then(|node| node.left) {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes.get(id).and_then(|node| node.right) {
            id = right;
        }
        id
    }

    /// The node with the smallest weight in the tree.
    pub fn find_minimum(&self) -> Result<NodeId, TreeError> {
        self.find_minimum_from(self.root.ok_or(TreeError::Empty)?)
    }

    /// The node with the largest weight in the tree.
    pub fn find_maximum(&self) -> Result<NodeId, TreeError> {
        self.find_maximum_from(self.root.ok_or(TreeError::Empty)?)
    }

    /// The node with the smallest weight in the subtree rooted at `start`.
    pub fn find_minimum_from(&self, start: NodeId) -> Result<NodeId, TreeError> {
        self.node(start)?;
        Ok(self.leftmost(start))
    }

    /// The node with the largest weight in the subtree rooted at `start`.
    pub fn find_maximum_from(&self, start: NodeId) -> Result<NodeId, TreeError> {
        self.node(start)?;
        Ok(self.rightmost(start))
    }

    /// Calls `visitor` with every weight in the tree in ascending order.
    pub fn traverse(&self, mut visitor: impl FnMut(Weight)) {
        self.iter().for_each(|(weight, _)| visitor(weight));
    }

    /// Calls `visitor` with every weight in the subtree rooted at `start` in ascending order.
    pub fn traverse_from(
        &self,
        start: NodeId,
        mut visitor: impl FnMut(Weight),
    ) -> Result<(), TreeError> {
        self.node(start)?;
        Iter::new(&self.nodes, Some(start)).for_each(|(weight, _)| visitor(weight));
        Ok(())
    }

    /// Iterates over the weights and values in ascending weight order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.root)
    }

    /// Checks that every weight in the subtree rooted at `start` lies within
    /// `min_weight..=max_weight` and that the subtree is correctly ordered. Despite the name this
    /// says nothing about height - a chain of ascending weights is "balanced".
    ///
    /// An absent subtree is trivially valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighted_bst::{Tree, Weight};
    ///
    /// let tree: Tree<()> = (0..100).map(|w| (w, ())).collect();
    ///
    /// assert_eq!(tree.height(), 100);
    /// assert_eq!(tree.is_balanced(tree.root(), Weight::MIN, Weight::MAX), Ok(true));
    /// assert_eq!(tree.is_balanced(tree.root(), 0, 50), Ok(false));
    /// assert_eq!(tree.is_balanced(None, 0, 0), Ok(true));
    /// ```
    pub fn is_balanced(
        &self,
        start: Option<NodeId>,
        min_weight: Weight,
        max_weight: Weight,
    ) -> Result<bool, TreeError> {
        if let Some(start) = start {
            self.node(start)?;
        }

        let mut pending = vec![(start, min_weight, max_weight)];
        while let Some((link, min, max)) = pending.pop() {
            let node = match link.and_then(|id| self.nodes.get(id)) {
                Some(node) => node,
                None => continue,
            };
            if node.weight < min || node.weight > max {
                return Ok(false);
            }
            // At the ends of the weight range there is no room left for a child on that side.
            match node.weight.checked_sub(1) {
                Some(upper) => pending.push((node.left, min, upper)),
                None if node.left.is_some() => return Ok(false),
                None => {}
            }
            match node.weight.checked_add(1) {
                Some(lower) => pending.push((node.right, lower, max)),
                None if node.right.is_some() => return Ok(false),
                None => {}
            }
        }
        Ok(true)
    }

    /// Checks the ordering of the whole tree over the full weight range.
    pub fn is_valid(&self) -> bool {
        // The root is always live so this can't fail.
        self.is_balanced(self.root, Weight::MIN, Weight::MAX)
            .unwrap_or(false)
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = (Weight, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<(Weight, T)> for Tree<T> {
    fn extend<I: IntoIterator<Item = (Weight, T)>>(&mut self, iter: I) {
        for (weight, value) in iter {
            self.insert(weight, value);
        }
    }
}

impl<T> FromIterator<(Weight, T)> for Tree<T> {
    /// Builds a tree by inserting the pairs in order, so the first pair becomes the root.
    fn from_iter<I: IntoIterator<Item = (Weight, T)>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}
