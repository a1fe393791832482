//! A module containing [`RedBlackTree`], an ordered set that keeps itself balanced, and its
//! associated types.
//!
//! The tree owns its nodes in an arena and links them by index, which sidesteps the parent/child
//! reference cycles that pointer-based red-black trees have to manage. [`NodeRef`] exposes a
//! borrowed, read-only view of individual nodes for inspecting the structure.

mod arena;
mod balance;
mod iter;
mod node;
mod tree;
mod tests;

pub(crate) use arena::*;
pub use iter::*;
pub use node::{Color, NodeRef};
pub(crate) use node::{Link, Node, Side};
pub use tree::*;
