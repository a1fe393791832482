use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, IsVariant};

/// Returned when an element is requested from a collection that holds none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyContainer;

impl Display for EmptyContainer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unable to access an element of an empty collection!")
    }
}

impl Error for EmptyContainer {}

/// A structural rule of a red-black tree that was found broken by
/// [`RedBlackTree::validate`](crate::collections::red_black::RedBlackTree::validate).
///
/// Depths are counted from the root, which sits at depth 0. Positions are in-order indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, IsVariant)]
pub enum InvariantViolation {
    #[display("The root node is red!")]
    RedRoot,
    #[display("The root node has a parent link!")]
    RootHasParent,
    #[display("A red node at depth {depth} has a red child!")]
    RedChildOfRed { depth: usize },
    #[display(
        "A node at depth {depth} has a black height of {left} on its left and {right} on its right!"
    )]
    UnevenBlackHeight {
        depth: usize,
        left: usize,
        right: usize,
    },
    #[display("The element at position {position} is not greater than the one before it!")]
    Unordered { position: usize },
    #[display("A node at depth {depth} doesn't point back to its parent!")]
    BrokenParentLink { depth: usize },
    #[display("The tree claims {len} elements but {counted} are reachable!")]
    LengthMismatch { len: usize, counted: usize },
}
