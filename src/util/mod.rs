#[cfg(test)]
pub mod alloc;
pub mod error;
pub mod fmt;
pub mod option;
