//! Sizing constants for bounded sets.
//!
//! All invariants verified at compile time via `const` assertions.

/// Minimum number of words reserved for a set's backing storage.
///
/// Tiny universes still reserve this many words so that a later resizing
/// assignment to a similarly small universe reuses the allocation.
pub const WORDS_MIN: usize = 16;

/// Default word type for [`crate::BoundedSet`].
pub type DefaultWord = u64;

const _: () = assert!(WORDS_MIN > 0);
const _: () = assert!(
    WORDS_MIN.is_power_of_two(),
    "Allocation floor must be a power of two"
);
const _: () = assert!(DefaultWord::BITS == 64);
