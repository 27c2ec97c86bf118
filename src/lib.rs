//! Word-packed sets over a bounded integer universe.
//!
//! [`BoundedSet`] stores one bit per element of `[0, max_elements)` in an
//! array of [`Word`]s. The [`word`] module holds the per-word and per-slice
//! primitives the set is built from.

pub mod bounded_set;
pub mod constants;
pub mod error;
pub mod word;

#[cfg(test)]
pub(crate) mod test_utils;

pub use bounded_set::{BoundedSet, Members};
pub use error::{Error, Result};
pub use word::Word;
