//! This crate is my attempt at writing a self-balancing ordered collection, a red-black tree, in
//! the same spirit as the rest of the collections I've been building.
//!
//! # Purpose
//! This repo / crate is a project that I'm working on as a learning experience, with no expectation
//! for it to be used in production. Red-black trees are one of those structures that everyone
//! uses and almost nobody writes, mostly because the removal case analysis is easy to get wrong.
//! Writing one helps me to understand (and appreciate) [`BTreeSet`](std::collections::BTreeSet)
//! properly.
//!
//! # Method
//! The tree is written based on my existing understanding and problem solving, with the usual
//! textbook case analysis for insertion and removal. Nodes live in an arena and refer to each
//! other by index rather than by pointer, which means parent links are just another `Option`
//! and the whole crate gets away without any `unsafe`.
//!
//! # Error Handling
//! Looking up something that isn't there (`find`, `remove`, `contains`) isn't an error, it just
//! returns [`None`] or `false`. Asking an empty tree for its smallest, largest or root value is
//! one though, so those accessors return a [`Result`] with a strongly typed, zero-sized
//! [`EmptyContainer`](collections::red_black::EmptyContainer) error rather than panicking.
//!
//! # Dependencies
//! This crate depends on some derive macros because they're helpful and remove the need for some
//! very repetitive programming, and on the `log` facade so that the rebalancing steps can be traced
//! when debugging. No logger is installed by the crate itself.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![forbid(unsafe_code)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;

#[cfg(feature = "collections")]
pub(crate) mod util;
