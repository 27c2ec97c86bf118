//! Word-level bit primitives.
//!
//! A [`Word`] is a fixed-width unsigned integer used as the unit of bit
//! storage. Bit offsets are always relative to a single word and must lie in
//! `[0, W::BITS)`. The slice helpers operate element-wise over equal-length
//! word arrays and panic if the lengths disagree.

use core::fmt::Debug;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// A word type usable as bit storage.
///
/// Implemented for `u8`, `u16`, `u32`, `u64`, and `usize`.
pub trait Word:
    Copy
    + Eq
    + Debug
    + Default
    + BitAnd<Output = Self>
    + BitAndAssign
    + BitOr<Output = Self>
    + BitOrAssign
    + Not<Output = Self>
    + 'static
{
    /// The number of bits in this word type.
    const BITS: u32;

    /// A word with all bits cleared.
    const ZERO: Self;

    /// A word with all bits set.
    const ONES: Self;

    /// Returns a word with the lowest `bits` bits set.
    ///
    /// `bits == 0` yields [`Word::ZERO`] and `bits >= BITS` yields [`Word::ONES`].
    fn low_mask(bits: u32) -> Self;

    /// Returns `true` iff bit `offset` is set.
    fn test_bit(self, offset: u32) -> bool;

    /// Sets bit `offset` in place.
    fn set_bit(&mut self, offset: u32);

    /// Clears bit `offset` in place.
    fn clear_bit(&mut self, offset: u32);

    /// Index of the lowest set bit, or `None` when the word is zero.
    fn bit_scan_forward(self) -> Option<u32>;

    /// Number of set bits.
    fn count_ones(self) -> u32;
}

macro_rules! impl_word {
    ($t:ty) => {
        impl Word for $t {
            const BITS: u32 = <$t>::BITS;
            const ZERO: Self = 0;
            const ONES: Self = !0;

            #[inline]
            fn low_mask(bits: u32) -> Self {
                if bits >= Self::BITS {
                    Self::ONES
                } else {
                    ((1 as $t) << bits) - 1
                }
            }

            #[inline]
            fn test_bit(self, offset: u32) -> bool {
                debug_assert!(offset < Self::BITS);
                (self >> offset) & 1 != 0
            }

            #[inline]
            fn set_bit(&mut self, offset: u32) {
                debug_assert!(offset < Self::BITS);
                *self |= (1 as $t) << offset;
            }

            #[inline]
            fn clear_bit(&mut self, offset: u32) {
                debug_assert!(offset < Self::BITS);
                *self &= !((1 as $t) << offset);
            }

            #[inline]
            fn bit_scan_forward(self) -> Option<u32> {
                if self == 0 {
                    None
                } else {
                    Some(self.trailing_zeros())
                }
            }

            #[inline]
            fn count_ones(self) -> u32 {
                <$t>::count_ones(self)
            }
        }
    };
}

impl_word!(u8);
impl_word!(u16);
impl_word!(u32);
impl_word!(u64);
impl_word!(usize);

/// Number of `W` words needed to hold `bits` bits.
#[inline]
pub const fn words_for_bits(bits: usize, word_bits: u32) -> usize {
    bits.div_ceil(word_bits as usize)
}

/// Zero-fills `words`.
#[inline]
pub fn clear_all<W: Word>(words: &mut [W]) {
    words.fill(W::ZERO);
}

/// `dst[i] = a[i] & b[i]` for every `i`.
///
/// Panics if the three slices differ in length.
#[inline]
pub fn and_vector<W: Word>(dst: &mut [W], a: &[W], b: &[W]) {
    assert_eq!(dst.len(), a.len());
    assert_eq!(dst.len(), b.len());
    for ((d, &x), &y) in dst.iter_mut().zip(a).zip(b) {
        *d = x & y;
    }
}

/// `dst[i] = a[i] | b[i]` for every `i`.
///
/// Panics if the three slices differ in length.
#[inline]
pub fn or_vector<W: Word>(dst: &mut [W], a: &[W], b: &[W]) {
    assert_eq!(dst.len(), a.len());
    assert_eq!(dst.len(), b.len());
    for ((d, &x), &y) in dst.iter_mut().zip(a).zip(b) {
        *d = x | y;
    }
}

/// In-place form of [`and_vector`] where the destination is also the left operand.
#[inline]
pub fn and_assign<W: Word>(dst: &mut [W], src: &[W]) {
    assert_eq!(dst.len(), src.len());
    for (d, &s) in dst.iter_mut().zip(src) {
        *d &= s;
    }
}

/// In-place form of [`or_vector`] where the destination is also the left operand.
#[inline]
pub fn or_assign<W: Word>(dst: &mut [W], src: &[W]) {
    assert_eq!(dst.len(), src.len());
    for (d, &s) in dst.iter_mut().zip(src) {
        *d |= s;
    }
}
