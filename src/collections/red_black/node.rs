use std::fmt::{self, Debug, Formatter};

use derive_more::{Display, IsVariant};

use super::{Arena, NodeIndex};

/// The color tag carried by every node of a [`RedBlackTree`](super::RedBlackTree).
///
/// Absent children count as black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IsVariant)]
pub enum Color {
    #[default]
    #[display("red")]
    Red,
    #[display("black")]
    Black,
}

/// Which child slot of a parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub const fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

pub(crate) type Link = Option<NodeIndex>;

pub(crate) struct Node<T> {
    pub value: T,
    pub color: Color,
    pub parent: Link,
    pub left: Link,
    pub right: Link,
}

impl<T> Node<T> {
    /// Creates a red, childless node below `parent`.
    pub const fn new(value: T, parent: Link) -> Node<T> {
        Node {
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    pub const fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub const fn child_mut(&mut self, side: Side) -> &mut Link {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl<T> Arena<Node<T>> {
    pub fn color_of(&self, link: Link) -> Color {
        match link {
            Some(index) => self[index].color,
            None => Color::Black,
        }
    }

    /// Returns the side of `parent` that holds `child`.
    pub fn side_of(&self, child: NodeIndex, parent: NodeIndex) -> Side {
        if self[parent].left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Follows links towards `side` for as long as they exist.
    pub fn extreme(&self, mut index: NodeIndex, side: Side) -> NodeIndex {
        while let Some(child) = self[index].child(side) {
            index = child;
        }
        index
    }

    pub fn min_descendant(&self, index: NodeIndex) -> NodeIndex {
        self.extreme(index, Side::Left)
    }

    pub fn max_descendant(&self, index: NodeIndex) -> NodeIndex {
        self.extreme(index, Side::Right)
    }

    pub fn subtree_root(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(parent) = self[index].parent {
            index = parent;
        }
        index
    }

    /// Returns the in-order neighbour of `index` towards `side`, walking up through parents when
    /// there is no subtree on that side.
    pub fn step(&self, index: NodeIndex, side: Side) -> Link {
        if let Some(child) = self[index].child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut current = index;
        while let Some(parent) = self[current].parent {
            if self[parent].child(side.opposite()) == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    pub fn successor(&self, index: NodeIndex) -> Link {
        self.step(index, Side::Right)
    }

    pub fn predecessor(&self, index: NodeIndex) -> Link {
        self.step(index, Side::Left)
    }
}

/// A read-only view of a single node inside a [`RedBlackTree`](super::RedBlackTree), as returned
/// by [`RedBlackTree::find`](super::RedBlackTree::find).
///
/// The view borrows the tree, so the structure it describes can't change while it's alive.
pub struct NodeRef<'a, T> {
    pub(crate) nodes: &'a Arena<Node<T>>,
    pub(crate) index: NodeIndex,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) const fn new(nodes: &'a Arena<Node<T>>, index: NodeIndex) -> NodeRef<'a, T> {
        NodeRef { nodes, index }
    }

    fn node(&self) -> &'a Node<T> {
        let nodes = self.nodes;
        &nodes[self.index]
    }

    fn follow(&self, link: Link) -> Option<NodeRef<'a, T>> {
        link.map(|index| NodeRef::new(self.nodes, index))
    }

    /// Returns a reference to the value held by this node.
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    pub fn color(&self) -> Color {
        self.node().color
    }

    pub fn is_red(&self) -> bool {
        self.color().is_red()
    }

    pub fn is_black(&self) -> bool {
        self.color().is_black()
    }

    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.follow(self.node().parent)
    }

    /// Returns the child holding lesser values, if any.
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.follow(self.node().left)
    }

    /// Returns the child holding greater values, if any.
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.follow(self.node().right)
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// Returns the node holding the smallest value in the subtree below (and including) this
    /// node.
    pub fn min_descendant(&self) -> NodeRef<'a, T> {
        NodeRef::new(self.nodes, self.nodes.min_descendant(self.index))
    }

    /// Returns the node holding the largest value in the subtree below (and including) this
    /// node.
    pub fn max_descendant(&self) -> NodeRef<'a, T> {
        NodeRef::new(self.nodes, self.nodes.max_descendant(self.index))
    }

    /// Follows parent links up to the root of the tree.
    pub fn subtree_root(&self) -> NodeRef<'a, T> {
        NodeRef::new(self.nodes, self.nodes.subtree_root(self.index))
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    /// Two views are equal when they point at the same node of the same tree.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.nodes, other.nodes) && self.index == other.index
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: Debug> Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", self.value())
            .field("color", &self.color())
            .finish()
    }
}
