use std::iter::FusedIterator;
use std::vec;

use super::{Arena, Link, Node, RedBlackTree};

impl<T> IntoIterator for RedBlackTree<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    /// Takes the values out in ascending order. The order is worked out once up front, so no
    /// rebalancing happens while the values are handed out.
    fn into_iter(self) -> Self::IntoIter {
        let RedBlackTree { mut nodes, root } = self;
        let mut order = Vec::with_capacity(nodes.len());

        let mut current = root.map(|root| nodes.min_descendant(root));
        while let Some(index) = current {
            current = nodes.successor(index);
            order.push(index);
        }

        IntoIter(
            order
                .into_iter()
                .map(|index| nodes.remove(index).value)
                .collect::<Vec<_>>()
                .into_iter(),
        )
    }
}

/// An owned iterator over the values of a [`RedBlackTree`], in ascending order.
pub struct IntoIter<T>(pub(crate) vec::IntoIter<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a RedBlackTree<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        let nodes = &self.nodes;
        Iter {
            nodes,
            front: self.root.map(|root| nodes.min_descendant(root)),
            back: self.root.map(|root| nodes.max_descendant(root)),
            len: nodes.len(),
        }
    }
}

/// A borrowed iterator over the values of a [`RedBlackTree`], in ascending order.
///
/// Each step follows child and parent links from the previous node, so no stack is kept. A single
/// step is `O(log n)` at worst but a whole traversal is `O(n)`.
pub struct Iter<'a, T> {
    pub(crate) nodes: &'a Arena<Node<T>>,
    pub(crate) front: Link,
    pub(crate) back: Link,
    // Stops the two ends from passing each other.
    pub(crate) len: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let nodes = self.nodes;
        let index = self.front?;
        self.front = nodes.successor(index);
        self.len -= 1;
        Some(&nodes[index].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let nodes = self.nodes;
        let index = self.back?;
        self.back = nodes.predecessor(index);
        self.len -= 1;
        Some(&nodes[index].value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}
