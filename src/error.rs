use std::collections::TryReserveError;

/// Errors from [`crate::BoundedSet`] operations.
///
/// A failed operation never leaves the receiver partially modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The element lies outside the universe `[0, max_elements)`.
    #[error("element {element} out of range for universe of {max_elements}")]
    OutOfRange { element: usize, max_elements: usize },

    /// The two sets were built over different universes.
    #[error("universe mismatch: {left} vs {right} elements")]
    UniverseMismatch { left: usize, right: usize },

    /// Reserving backing words failed.
    #[error("failed to allocate set storage: {0}")]
    AllocationFailed(#[from] TryReserveError),

    /// The set's storage was moved out with [`crate::BoundedSet::take`].
    #[error("set storage was released")]
    Released,
}

pub type Result<T> = core::result::Result<T, Error>;
