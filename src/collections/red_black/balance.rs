//! Rotations and the repair passes that restore the red-black rules after a node is linked in or
//! spliced out. None of these compare values, so they live apart from the ordered operations.

use log::trace;

use super::{Color, Link, NodeIndex, RedBlackTree, Side};
use crate::util::option::OptionExtension;

impl<T> RedBlackTree<T> {
    /// Points whichever link held `old` at `new`. With no `parent`, that link is the root.
    ///
    /// The parent link of `new` is left for the caller.
    pub(super) fn replace_child(&mut self, parent: Link, old: NodeIndex, new: Link) {
        match parent {
            Some(parent) => {
                let node = &mut self.nodes[parent];
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            },
            None => self.root = new,
        }
    }

    /// Rotates the node at `index` down towards `side`, lifting its child from the opposite side
    /// into its place. The lifted child's inner subtree crosses over to `index`.
    pub(super) fn rotate(&mut self, index: NodeIndex, side: Side) {
        let pivot = self.nodes[index].child(side.opposite()).unreachable();
        let inner = self.nodes[pivot].child(side);
        let parent = self.nodes[index].parent;

        trace!("rotating {side:?} around {index:?}, lifting {pivot:?}");

        *self.nodes[index].child_mut(side.opposite()) = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(index);
        }

        self.replace_child(parent, index, Some(pivot));
        self.nodes[pivot].parent = parent;

        *self.nodes[pivot].child_mut(side) = Some(index);
        self.nodes[index].parent = Some(pivot);
    }

    pub(super) fn rotate_left(&mut self, index: NodeIndex) {
        self.rotate(index, Side::Left)
    }

    pub(super) fn rotate_right(&mut self, index: NodeIndex) {
        self.rotate(index, Side::Right)
    }

    /// Repairs red-red edges above the freshly linked red node at `index`, then blackens the
    /// root.
    pub(super) fn fix_insert(&mut self, mut index: NodeIndex) {
        while let Some(parent) = self.nodes[index].parent {
            if self.nodes[parent].color.is_black() {
                break;
            }

            // A red parent is never the root, so a grandparent exists.
            let grandparent = self.nodes[parent].parent.unreachable();
            let parent_side = self.nodes.side_of(parent, grandparent);
            let uncle = self.nodes[grandparent].child(parent_side.opposite());

            if self.nodes.color_of(uncle).is_red() {
                trace!("insert fixup at {index:?}: red uncle, recoloring {grandparent:?}");
                self.nodes[parent].color = Color::Black;
                self.nodes[uncle.unreachable()].color = Color::Black;
                self.nodes[grandparent].color = Color::Red;
                index = grandparent;
                continue;
            }

            let mut middle = parent;
            if self.nodes.side_of(index, parent) != parent_side {
                trace!("insert fixup at {index:?}: bent {parent_side:?} case, straightening");
                match parent_side {
                    Side::Left => self.rotate_left(parent),
                    Side::Right => self.rotate_right(parent),
                }
                middle = index;
            }

            trace!("insert fixup at {index:?}: straight {parent_side:?} case");
            self.nodes[middle].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            match parent_side {
                Side::Left => self.rotate_right(grandparent),
                Side::Right => self.rotate_left(grandparent),
            }
            break;
        }

        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }

    /// Repairs the black-height deficit left at the `side` child slot of `parent` after a black
    /// node was spliced out of it. With no `parent`, the deficit is at the root and only the
    /// root's color needs setting.
    pub(super) fn fix_remove(&mut self, mut parent: Link, mut side: Side) {
        let mut node = match parent {
            Some(parent) => self.nodes[parent].child(side),
            None => self.root,
        };

        while let Some(current) = parent {
            if self.nodes.color_of(node).is_red() {
                break;
            }

            // The deficient side is one black short, so the other side holds at least one node.
            let mut sibling = self.nodes[current].child(side.opposite()).unreachable();

            if self.nodes[sibling].color.is_red() {
                trace!("remove fixup below {current:?}: red sibling, rotating {side:?}");
                self.nodes[sibling].color = Color::Black;
                self.nodes[current].color = Color::Red;
                self.rotate(current, side);
                sibling = self.nodes[current].child(side.opposite()).unreachable();
            }

            let near = self.nodes[sibling].child(side);
            let far = self.nodes[sibling].child(side.opposite());

            if self.nodes.color_of(near).is_black() && self.nodes.color_of(far).is_black() {
                trace!("remove fixup below {current:?}: black nephews, moving up");
                self.nodes[sibling].color = Color::Red;
                node = Some(current);
                parent = self.nodes[current].parent;
                if let Some(grandparent) = parent {
                    side = self.nodes.side_of(current, grandparent);
                }
                continue;
            }

            if self.nodes.color_of(far).is_black() {
                trace!("remove fixup below {current:?}: red near nephew, rotating sibling");
                self.nodes[near.unreachable()].color = Color::Black;
                self.nodes[sibling].color = Color::Red;
                self.rotate(sibling, side.opposite());
                sibling = self.nodes[current].child(side.opposite()).unreachable();
            }

            trace!("remove fixup below {current:?}: red far nephew, resolved");
            let far = self.nodes[sibling].child(side.opposite()).unreachable();
            self.nodes[sibling].color = self.nodes[current].color;
            self.nodes[current].color = Color::Black;
            self.nodes[far].color = Color::Black;
            self.rotate(current, side);
            node = self.root;
            break;
        }

        if let Some(node) = node {
            self.nodes[node].color = Color::Black;
        }
    }
}
