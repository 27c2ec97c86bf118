//! Set over a bounded universe `[0, max_elements)`, stored as packed words.
//!
//! Membership, insertion and removal are O(1). Union, intersection,
//! complement, emptiness and enumeration are O(word count), independent of
//! how many members the set holds.
//!
//! Padding bits (global indices `>= max_elements` in the final word) are kept
//! zero by every mutator, so raw word inspection, [`BoundedSet::is_empty`] and
//! [`BoundedSet::count`] never observe phantom members. Enumeration masks the
//! final word regardless.

use core::fmt;
use core::iter::FusedIterator;

use tracing::{debug, warn};

use crate::constants::{DefaultWord, WORDS_MIN};
use crate::error::{Error, Result};
use crate::word::{self, Word, words_for_bits};

/// Set of integers drawn from `[0, max_elements)`, one bit per element.
///
/// The universe size is fixed at construction. Operations combining two sets
/// ([`union_with`](Self::union_with), [`intersect_with`](Self::intersect_with),
/// [`copy_from`](Self::copy_from), [`is_subset`](Self::is_subset)) require both
/// sets to share the same universe and fail with [`Error::UniverseMismatch`]
/// otherwise.
///
/// Storage moved out with [`take`](Self::take) leaves the source *released*:
/// queries on it return [`Error::Released`] until it is reassigned with
/// [`assign_from`](Self::assign_from).
///
/// # Examples
///
/// ```
/// use bounded_bitset::BoundedSet;
///
/// let mut set: BoundedSet = BoundedSet::new(100)?;
/// set.add(1)?;
/// set.add(50)?;
/// set.add(99)?;
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 50, 99]);
/// assert!(set.add(100).is_err());
/// # Ok::<(), bounded_bitset::Error>(())
/// ```
#[derive(PartialEq, Eq)]
pub struct BoundedSet<W: Word = DefaultWord> {
    /// `None` once the storage has been moved out.
    words: Option<Vec<W>>,
    last_word_mask: W,
    max_elements: usize,
}

impl<W: Word> BoundedSet<W> {
    /// Creates an empty set over `[0, max_elements)`.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if the backing words cannot be reserved.
    pub fn new(max_elements: usize) -> Result<Self> {
        let word_count = words_for_bits(max_elements, W::BITS);
        let mut words = reserve_words::<W>(word_count)?;
        words.resize(word_count, W::ZERO);

        debug!(
            max_elements,
            word_count,
            word_bits = W::BITS,
            "bounded set created"
        );

        Ok(Self {
            words: Some(words),
            last_word_mask: last_word_mask::<W>(max_elements),
            max_elements,
        })
    }

    /// Creates a set over `[0, max_elements)` holding every element of `members`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if any member is `>= max_elements`.
    pub fn with_members<I>(max_elements: usize, members: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = Self::new(max_elements)?;
        for element in members {
            set.add(element)?;
        }
        Ok(set)
    }

    /// Exclusive upper bound on element values.
    ///
    /// This is universe metadata rather than a membership query: it reads
    /// zero once released. Use [`is_released`](Self::is_released) to tell a
    /// released set from an empty universe.
    #[inline]
    pub fn max_elements(&self) -> usize {
        self.max_elements
    }

    /// Number of backing words.
    #[inline]
    pub fn word_count(&self) -> usize {
        self.words().len()
    }

    /// Mask of the valid bits in the final word.
    #[inline]
    pub fn last_word_mask(&self) -> W {
        self.last_word_mask
    }

    /// Backing words, lowest elements first. Empty once released.
    #[inline]
    pub fn words(&self) -> &[W] {
        self.words.as_deref().unwrap_or(&[])
    }

    /// Returns `true` if the storage was moved out with [`take`](Self::take).
    #[inline]
    pub fn is_released(&self) -> bool {
        self.words.is_none()
    }

    /// Moves the storage into a new set in O(1), leaving `self` released.
    pub fn take(&mut self) -> Self {
        let taken = Self {
            words: self.words.take(),
            last_word_mask: self.last_word_mask,
            max_elements: self.max_elements,
        };
        self.max_elements = 0;
        self.last_word_mask = W::ONES;
        taken
    }

    /// Returns an independent copy of this set.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if the copy's storage cannot be reserved.
    pub fn try_clone(&self) -> Result<Self> {
        let words = match self.words.as_deref() {
            Some(src) => Some(copy_words(src)?),
            None => None,
        };
        Ok(Self {
            words,
            last_word_mask: self.last_word_mask,
            max_elements: self.max_elements,
        })
    }

    /// Makes `self` an exact copy of `source`, adopting its universe.
    ///
    /// Storage is reused when the word counts agree and resized otherwise.
    /// A released `self` is revived.
    ///
    /// # Errors
    ///
    /// - [`Error::Released`] if `source` is released.
    /// - [`Error::AllocationFailed`] if growing the storage fails; `self` is
    ///   left unchanged.
    pub fn assign_from(&mut self, source: &Self) -> Result<()> {
        let src = source.live_words()?;

        if let Some(dst) = self.words.as_mut() {
            if dst.len() == src.len() {
                dst.copy_from_slice(src);
            } else {
                debug!(
                    from_words = dst.len(),
                    to_words = src.len(),
                    "resizing bounded set storage"
                );
                if src.len() > dst.len() {
                    dst.try_reserve_exact(src.len() - dst.len())
                        .map_err(allocation_failed)?;
                }
                dst.clear();
                dst.extend_from_slice(src);
            }
        } else {
            self.words = Some(copy_words(src)?);
        }

        self.max_elements = source.max_elements;
        self.last_word_mask = source.last_word_mask;
        Ok(())
    }

    /// Copies the members of `other`, which must share this set's universe.
    pub fn copy_from(&mut self, other: &Self) -> Result<()> {
        let src = self.operand(other)?;
        self.live_words_mut()?.copy_from_slice(src);
        Ok(())
    }

    /// Removes every member.
    pub fn clear(&mut self) {
        if let Some(words) = self.words.as_mut() {
            word::clear_all(words);
        }
    }

    /// Returns whether `element` is a member.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `element >= max_elements`.
    #[inline]
    pub fn contains(&self, element: usize) -> Result<bool> {
        let (word_idx, offset) = self.locate(element)?;
        Ok(self.live_words()?[word_idx].test_bit(offset))
    }

    /// Inserts `element`. No-op if already present.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `element >= max_elements`.
    #[inline]
    pub fn add(&mut self, element: usize) -> Result<()> {
        let (word_idx, offset) = self.locate(element)?;
        self.live_words_mut()?[word_idx].set_bit(offset);
        Ok(())
    }

    /// Removes `element`. No-op if absent.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `element >= max_elements`.
    #[inline]
    pub fn remove(&mut self, element: usize) -> Result<()> {
        let (word_idx, offset) = self.locate(element)?;
        self.live_words_mut()?[word_idx].clear_bit(offset);
        Ok(())
    }

    /// Returns `true` when the set has no members.
    ///
    /// # Errors
    ///
    /// [`Error::Released`] if the storage was moved out.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.live_words()?.iter().all(|&w| w == W::ZERO))
    }

    /// Number of members; never exceeds `max_elements`.
    ///
    /// # Errors
    ///
    /// [`Error::Released`] if the storage was moved out.
    pub fn count(&self) -> Result<usize> {
        let total: usize = self
            .live_words()?
            .iter()
            .map(|&w| w.count_ones() as usize)
            .sum();
        debug_assert!(total <= self.max_elements);
        Ok(total)
    }

    /// Lowest member, if any.
    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.iter().next()
    }

    /// Adds every member of `other`.
    pub fn union_with(&mut self, other: &Self) -> Result<()> {
        let src = self.operand(other)?;
        word::or_assign(self.live_words_mut()?, src);
        Ok(())
    }

    /// Keeps only the members also present in `other`.
    pub fn intersect_with(&mut self, other: &Self) -> Result<()> {
        let src = self.operand(other)?;
        word::and_assign(self.live_words_mut()?, src);
        Ok(())
    }

    /// Returns a new set holding the members of either set.
    pub fn union(&self, other: &Self) -> Result<Self> {
        self.combine(other, word::or_vector)
    }

    /// Returns a new set holding the members common to both sets.
    pub fn intersection(&self, other: &Self) -> Result<Self> {
        self.combine(other, word::and_vector)
    }

    /// Returns `true` if every member of `self` is also a member of `other`.
    pub fn is_subset(&self, other: &Self) -> Result<bool> {
        let theirs = self.operand(other)?;
        Ok(self
            .words()
            .iter()
            .zip(theirs)
            .all(|(&mine, &theirs)| mine & !theirs == W::ZERO))
    }

    /// Replaces the set with its complement within the universe.
    ///
    /// Padding bits in the final word are cleared again after the flip.
    pub fn complement(&mut self) {
        let mask = self.last_word_mask;
        let Some(words) = self.words.as_mut() else {
            return;
        };
        for w in words.iter_mut() {
            *w = !*w;
        }
        if let Some(last) = words.last_mut() {
            *last &= mask;
        }
    }

    /// Visits members in ascending order until `visit` returns `false`.
    ///
    /// The set itself is not modified.
    pub fn for_each_member<F>(&self, mut visit: F)
    where
        F: FnMut(usize) -> bool,
    {
        for element in self.iter() {
            if !visit(element) {
                return;
            }
        }
    }

    /// Iterates over members in ascending order.
    #[inline]
    pub fn iter(&self) -> Members<'_, W> {
        Members::new(self.words(), self.last_word_mask)
    }

    fn locate(&self, element: usize) -> Result<(usize, u32)> {
        if self.is_released() {
            return Err(Error::Released);
        }
        if element >= self.max_elements {
            return Err(Error::OutOfRange {
                element,
                max_elements: self.max_elements,
            });
        }
        let bits = W::BITS as usize;
        Ok((element / bits, (element % bits) as u32))
    }

    fn live_words(&self) -> Result<&[W]> {
        self.words.as_deref().ok_or(Error::Released)
    }

    fn live_words_mut(&mut self) -> Result<&mut [W]> {
        self.words.as_deref_mut().ok_or(Error::Released)
    }

    /// Validates `other` as the second operand of a binary operation and
    /// returns its words.
    fn operand<'a>(&self, other: &'a Self) -> Result<&'a [W]> {
        self.live_words()?;
        let theirs = other.live_words()?;
        if self.max_elements != other.max_elements {
            warn!(
                left = self.max_elements,
                right = other.max_elements,
                "bounded set universe mismatch"
            );
            return Err(Error::UniverseMismatch {
                left: self.max_elements,
                right: other.max_elements,
            });
        }
        debug_assert_eq!(self.last_word_mask, other.last_word_mask);
        Ok(theirs)
    }

    fn combine(&self, other: &Self, op: fn(&mut [W], &[W], &[W])) -> Result<Self> {
        let theirs = self.operand(other)?;
        let mut out = Self::new(self.max_elements)?;
        op(out.live_words_mut()?, self.live_words()?, theirs);
        Ok(out)
    }
}

impl<W: Word> Clone for BoundedSet<W> {
    fn clone(&self) -> Self {
        Self {
            words: self.words.as_deref().map(|src| {
                let mut words = Vec::with_capacity(src.len().max(WORDS_MIN));
                words.extend_from_slice(src);
                words
            }),
            last_word_mask: self.last_word_mask,
            max_elements: self.max_elements,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if source.is_released() {
            // Drops our storage as well.
            let _ = self.take();
            return;
        }
        if let Err(err) = self.assign_from(source) {
            panic!("bounded set clone_from failed: {err}");
        }
    }
}

impl<W: Word> fmt::Debug for BoundedSet<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_released() {
            return f.write_str("BoundedSet(released)");
        }
        f.debug_struct("BoundedSet")
            .field("max_elements", &self.max_elements)
            .field("members", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a, W: Word> IntoIterator for &'a BoundedSet<W> {
    type Item = usize;
    type IntoIter = Members<'a, W>;

    #[inline]
    fn into_iter(self) -> Members<'a, W> {
        self.iter()
    }
}

/// Iterator over members in ascending order, produced by [`BoundedSet::iter`].
///
/// Scans a local copy of one word at a time, so the set is never modified.
#[derive(Clone)]
pub struct Members<'a, W: Word> {
    words: &'a [W],
    last_word_mask: W,
    word_idx: usize,
    current_word: W,
}

impl<'a, W: Word> Members<'a, W> {
    fn new(words: &'a [W], last_word_mask: W) -> Self {
        let mut members = Self {
            words,
            last_word_mask,
            word_idx: 0,
            current_word: W::ZERO,
        };
        members.load_word();
        members
    }

    #[inline]
    fn load_word(&mut self) {
        self.current_word = match self.words.get(self.word_idx) {
            None => W::ZERO,
            Some(&w) if self.word_idx + 1 == self.words.len() => w & self.last_word_mask,
            Some(&w) => w,
        };
    }
}

impl<W: Word> Iterator for Members<'_, W> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        loop {
            if let Some(bit) = self.current_word.bit_scan_forward() {
                self.current_word.clear_bit(bit);
                return Some(self.word_idx * W::BITS as usize + bit as usize);
            }

            if self.word_idx + 1 >= self.words.len() {
                return None;
            }
            self.word_idx += 1;
            self.load_word();
        }
    }
}

impl<W: Word> FusedIterator for Members<'_, W> {}

impl<W: Word> fmt::Debug for Members<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Members")
            .field("word_count", &self.words.len())
            .field("word_idx", &self.word_idx)
            .field("current_word", &self.current_word)
            .finish()
    }
}

fn last_word_mask<W: Word>(max_elements: usize) -> W {
    match (max_elements % W::BITS as usize) as u32 {
        0 => W::ONES,
        remaining_bits => W::low_mask(remaining_bits),
    }
}

fn reserve_words<W: Word>(word_count: usize) -> Result<Vec<W>> {
    let mut words = Vec::new();
    words
        .try_reserve_exact(word_count.max(WORDS_MIN))
        .map_err(allocation_failed)?;
    Ok(words)
}

fn copy_words<W: Word>(src: &[W]) -> Result<Vec<W>> {
    let mut words = reserve_words(src.len())?;
    words.extend_from_slice(src);
    Ok(words)
}

fn allocation_failed(err: std::collections::TryReserveError) -> Error {
    warn!(error = %err, "bounded set allocation failed");
    Error::AllocationFailed(err)
}
