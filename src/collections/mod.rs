//! General-purpose ordered collection types.
//!
//! # Purpose
//! I wrote these types to learn about self-balancing trees, and about how to express a structure
//! full of parent links in Rust without reaching for `Rc<RefCell<_>>` or raw pointers.

#[cfg(feature = "red-black")]
pub mod red_black;
#[cfg(feature = "traits")]
pub mod traits;

#[cfg(feature = "red-black")]
#[doc(inline)]
pub use red_black::RedBlackTree;
