use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;

use log::debug;

use super::{Arena, Color, Iter, Link, Node, NodeIndex, NodeRef, Side};
#[doc(inline)]
pub use crate::util::error::{EmptyContainer, InvariantViolation};
use crate::util::fmt::DebugRaw;
use crate::util::option::OptionExtension;

/// An ordered set of unique values, stored as a self-balancing red-black binary search tree.
///
/// Every node is tagged red or black, and after each public operation the tree upholds the usual
/// rules: the root is black, no red node has a red child and every path from a node down to an
/// absent child passes through the same number of black nodes. Together these keep the height
/// below `2 * log2(n + 1)`, regardless of insertion order.
///
/// Nodes are kept in an internal arena and refer to each other by index, so parent links don't
/// need shared ownership or raw pointers.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of values in the RedBlackTree.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(log n)` |
/// | `remove` | `O(log n)` |
/// | `find/get/contains` | `O(log n)` |
/// | `min/max` | `O(log n)` |
/// | `top` | `O(1)` |
/// | `iter` (whole traversal) | `O(n)` |
/// | `merge` | `O(m log (n + m))` |
/// | `clear` | `O(n)` |
/// | `swap` | `O(1)` |
pub struct RedBlackTree<T> {
    pub(crate) nodes: Arena<Node<T>>,
    pub(crate) root: Link,
}

impl<T> RedBlackTree<T> {
    /// Creates a new RedBlackTree with no values.
    pub const fn new() -> RedBlackTree<T> {
        RedBlackTree {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Returns the number of values in the RedBlackTree.
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the RedBlackTree contains no values.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference to the smallest value, or [`EmptyContainer`] if there are none.
    pub fn min(&self) -> Result<&T, EmptyContainer> {
        let root = self.root.ok_or(EmptyContainer)?;
        Ok(&self.nodes[self.nodes.min_descendant(root)].value)
    }

    /// Returns a reference to the largest value, or [`EmptyContainer`] if there are none.
    pub fn max(&self) -> Result<&T, EmptyContainer> {
        let root = self.root.ok_or(EmptyContainer)?;
        Ok(&self.nodes[self.nodes.max_descendant(root)].value)
    }

    /// Returns a reference to the value held by the root node, or [`EmptyContainer`] if there are
    /// none. Which value sits at the root depends on the history of insertions and removals.
    pub fn top(&self) -> Result<&T, EmptyContainer> {
        let root = self.root.ok_or(EmptyContainer)?;
        Ok(&self.nodes[root].value)
    }

    /// Returns a view of the root node, if there is one.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|index| NodeRef::new(&self.nodes, index))
    }

    /// Removes and returns the smallest value.
    pub fn pop_min(&mut self) -> Result<T, EmptyContainer> {
        let root = self.root.ok_or(EmptyContainer)?;
        let index = self.nodes.min_descendant(root);
        Ok(self.remove_at(index))
    }

    /// Removes and returns the largest value.
    pub fn pop_max(&mut self) -> Result<T, EmptyContainer> {
        let root = self.root.ok_or(EmptyContainer)?;
        let index = self.nodes.max_descendant(root);
        Ok(self.remove_at(index))
    }

    /// Removes and returns the value held by the root node.
    pub fn pop_top(&mut self) -> Result<T, EmptyContainer> {
        let root = self.root.ok_or(EmptyContainer)?;
        Ok(self.remove_at(root))
    }

    /// Drops every value, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let len = self.len();
        debug!("clearing {len} values");
        self.nodes.clear();
        self.root = None;
        len
    }

    /// Exchanges the contents of this RedBlackTree with `other`, without touching any nodes.
    pub fn swap(&mut self, other: &mut RedBlackTree<T>) {
        mem::swap(self, other)
    }

    /// Returns the number of nodes on the longest path from the root to a leaf, or 0 when empty.
    pub fn height(&self) -> usize {
        self.height_below(self.root)
    }

    fn height_below(&self, link: Link) -> usize {
        match link {
            Some(index) => {
                let node = &self.nodes[index];
                1 + self.height_below(node.left).max(self.height_below(node.right))
            },
            None => 0,
        }
    }

    /// Returns a borrowed iterator over the values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    /// Unlinks the node at `index`, rebalances and hands back its value.
    pub(crate) fn remove_at(&mut self, index: NodeIndex) -> T {
        let node = &self.nodes[index];
        let (color, parent, left, right) = (node.color, node.parent, node.left, node.right);

        // The color taken out of the tree, and where the resulting gap sits.
        let (removed, gap_parent, gap_side) = match (left, right) {
            (Some(left), Some(right)) => {
                let successor = self.nodes.min_descendant(right);
                let successor_color = self.nodes[successor].color;
                let successor_right = self.nodes[successor].right;

                let (gap_parent, gap_side) = if successor == right {
                    (successor, Side::Right)
                } else {
                    // Close the gap where the successor used to hang.
                    let successor_parent = self.nodes[successor].parent.unreachable();
                    self.nodes[successor_parent].left = successor_right;
                    if let Some(successor_right) = successor_right {
                        self.nodes[successor_right].parent = Some(successor_parent);
                    }
                    self.nodes[successor].right = Some(right);
                    self.nodes[right].parent = Some(successor);
                    (successor_parent, Side::Left)
                };

                self.nodes[successor].left = Some(left);
                self.nodes[left].parent = Some(successor);
                self.replace_child(parent, index, Some(successor));
                self.nodes[successor].parent = parent;
                self.nodes[successor].color = color;

                (successor_color, Some(gap_parent), gap_side)
            },
            _ => {
                let child = left.or(right);
                let side = match parent {
                    Some(parent) => self.nodes.side_of(index, parent),
                    None => Side::Left,
                };

                self.replace_child(parent, index, child);
                if let Some(child) = child {
                    self.nodes[child].parent = parent;
                }

                (color, parent, side)
            },
        };

        if removed.is_black() {
            self.fix_remove(gap_parent, gap_side);
        }

        self.nodes.remove(index).value
    }

    /// Walks the structure and reports the first broken red-black rule, if any.
    ///
    /// Every public operation keeps the tree valid, so this only fails if something has gone
    /// wrong inside the tree itself. It's `O(n)`.
    pub fn validate(&self) -> Result<(), InvariantViolation>
    where
        T: Ord,
    {
        if let Some(root) = self.root {
            if self.nodes[root].parent.is_some() {
                return Err(InvariantViolation::RootHasParent);
            }
            if self.nodes[root].color.is_red() {
                return Err(InvariantViolation::RedRoot);
            }
        }

        let counted = self.validate_below(self.root, 0)?.1;
        if counted != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                len: self.len(),
                counted,
            });
        }

        let mut previous: Option<&T> = None;
        for (position, value) in self.iter().enumerate() {
            if previous.is_some_and(|previous| previous >= value) {
                return Err(InvariantViolation::Unordered { position });
            }
            previous = Some(value);
        }

        Ok(())
    }

    /// Returns the black height and node count of the subtree at `link`.
    fn validate_below(
        &self,
        link: Link,
        depth: usize,
    ) -> Result<(usize, usize), InvariantViolation> {
        let Some(index) = link else {
            return Ok((1, 0));
        };
        let node = &self.nodes[index];

        for child in [node.left, node.right].into_iter().flatten() {
            if self.nodes[child].parent != Some(index) {
                return Err(InvariantViolation::BrokenParentLink { depth: depth + 1 });
            }
            if node.color.is_red() && self.nodes[child].color.is_red() {
                return Err(InvariantViolation::RedChildOfRed { depth });
            }
        }

        let (left, left_count) = self.validate_below(node.left, depth + 1)?;
        let (right, right_count) = self.validate_below(node.right, depth + 1)?;
        if left != right {
            return Err(InvariantViolation::UnevenBlackHeight { depth, left, right });
        }

        let own = match node.color {
            Color::Black => 1,
            Color::Red => 0,
        };
        Ok((left + own, left_count + right_count + 1))
    }
}

impl<T: Ord> RedBlackTree<T> {
    /// Creates a new RedBlackTree holding only `value`.
    pub fn from_value(value: T) -> RedBlackTree<T> {
        let mut tree = RedBlackTree::new();
        tree.insert(value);
        tree
    }

    /// Adds `value` to the RedBlackTree, returning true if it was inserted. If an equal value is
    /// already present, nothing changes, `value` is dropped and false is returned.
    pub fn insert(&mut self, value: T) -> bool {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(index) = current {
            side = match value.cmp(&self.nodes[index].value) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return false,
            };
            parent = Some(index);
            current = self.nodes[index].child(side);
        }

        let index = self.nodes.insert(Node::new(value, parent));
        match parent {
            Some(parent) => *self.nodes[parent].child_mut(side) = Some(index),
            None => self.root = Some(index),
        }

        self.fix_insert(index);
        true
    }

    pub(crate) fn find_index<Q>(&self, value: &Q) -> Link
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;

        while let Some(index) = current {
            let node = &self.nodes[index];
            current = match value.cmp(node.value.borrow()) {
                Ordering::Equal => return Some(index),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Returns a view of the node holding a value equal to `value`, if there is one.
    pub fn find<Q>(&self, value: &Q) -> Option<NodeRef<'_, T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(value)
            .map(|index| NodeRef::new(&self.nodes, index))
    }

    /// Returns a reference to the stored value equal to `value`, if there is one.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(value).map(|index| &self.nodes[index].value)
    }

    /// Returns true if the RedBlackTree holds a value equal to `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(value).is_some()
    }

    /// Removes and returns the value equal to `value`. Missing values leave the tree untouched.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let index = self.find_index(value)?;
        Some(self.remove_at(index))
    }

    /// Removes the value equal to `old` and inserts `new` in its place, returning the removed
    /// value. If `old` isn't present, nothing changes and `new` is dropped.
    ///
    /// Should `new` already be present, only the removal takes effect.
    pub fn replace<Q>(&mut self, old: &Q, new: T) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = self.remove(old)?;
        self.insert(new);
        Some(removed)
    }

    /// Moves every value out of `other` and into this RedBlackTree, leaving `other` empty. Values
    /// already present here are dropped.
    pub fn merge(&mut self, other: &mut RedBlackTree<T>) {
        let incoming = other.len();
        let mut added = 0;

        for value in mem::take(other) {
            if self.insert(value) {
                added += 1;
            }
        }

        debug!("merged {added} of {incoming} values");
    }

    /// Creates a new RedBlackTree from the values in the subtree rooted at the node holding
    /// `value`. Values are inserted in pre-order, and the new tree rebalances as usual.
    pub fn subtree<Q>(&self, value: &Q) -> Option<RedBlackTree<T>>
    where
        T: Borrow<Q> + Clone,
        Q: Ord + ?Sized,
    {
        let start = self.find_index(value)?;
        let mut tree = RedBlackTree::new();
        let mut pending = vec![start];

        while let Some(index) = pending.pop() {
            let node = &self.nodes[index];
            tree.insert(node.value.clone());
            pending.extend(node.right);
            pending.extend(node.left);
        }

        Some(tree)
    }
}

impl<T: Ord> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> Clone for RedBlackTree<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Ord> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RedBlackTree<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T: Ord> Extend<T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: Ord + Copy + 'a> Extend<&'a T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T: PartialEq> PartialEq for RedBlackTree<T> {
    /// Two trees are equal when they hold equal values, regardless of their shape. Two empty
    /// trees are equal.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RedBlackTree<T> {}

impl<T: Hash> Hash for RedBlackTree<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: Debug> RedBlackTree<T> {
    fn draw(&self, link: Link) -> String {
        let Some(index) = link else {
            return String::from("-");
        };
        let node = &self.nodes[index];

        let left = self
            .draw(node.left)
            .lines()
            .map(|l| String::from("┌    ") + l)
            .collect::<Vec<_>>()
            .join("\n");
        let right = self
            .draw(node.right)
            .lines()
            .map(|l| String::from("└    ") + l)
            .collect::<Vec<_>>()
            .join("\n");

        format!("{left}\n({:?}: {})\n{right}", node.value, node.color)
    }
}

impl<T: Debug> Debug for RedBlackTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedBlackTree")
            .field("nodes", &DebugRaw(format!("\n{}\n", self.draw(self.root))))
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Display> Display for RedBlackTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{{ }}");
        }

        write!(
            f,
            "{{ {} }}",
            self.iter()
                .map(|i| format!("{i}"))
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

#[cfg(feature = "traits")]
impl<T: Ord> crate::collections::traits::Set<T> for RedBlackTree<T> {
    type Iter<'a>
        = super::Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn contains(&self, item: &T) -> bool {
        RedBlackTree::contains(self, item)
    }

    fn iter<'a>(&'a self) -> Self::Iter<'a> {
        RedBlackTree::iter(self)
    }
}
