//! Fixed-width bit vectors over gem indices.

use serde::Serialize;

use crate::set::ResolvedSet;

/// Storage unit of a [`Bitmap`].
pub type Word = u32;

/// Bits per [`Word`].
pub const WORD_BITS: usize = Word::BITS as usize;

/// Bit `i` is set iff gem `i` is a member.
///
/// Always holds `ceil(len / WORD_BITS)` words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Bitmap {
    words: Vec<Word>,
    len: usize,
}

/// Number of words needed for `len` bits.
pub fn word_count(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

impl Bitmap {
    /// An all-clear bitmap for a table of `len` gems.
    pub fn zeroed(len: usize) -> Self {
        Self {
            words: vec![0; word_count(len)],
            len,
        }
    }

    /// Pack `set` for a table of `len` gems. Members must be `< len`.
    pub fn encode(set: &ResolvedSet, len: usize) -> Self {
        let mut bitmap = Self::zeroed(len);
        for idx in set {
            bitmap.insert(idx);
        }
        bitmap
    }

    pub fn insert(&mut self, idx: usize) {
        debug_assert!(idx < self.len, "bit {idx} out of range for {} gems", self.len);
        let bit: Word = 1 << (idx % WORD_BITS);
        self.words[idx / WORD_BITS] |= bit;
    }

    pub fn contains(&self, idx: usize) -> bool {
        idx < self.len && (self.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1 == 1
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Table size the bitmap was built for.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Set bits in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(|&i| self.contains(i))
    }

    /// Decode back into a resolved set.
    pub fn to_set(&self) -> ResolvedSet {
        self.iter().collect()
    }
}
