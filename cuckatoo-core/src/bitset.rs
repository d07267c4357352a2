//! Packed bitset (C3) with word-level atomic OR for lock-free trimming passes.

use std::sync::atomic::{AtomicU64, Ordering};

/// A fixed-size bit array backed by 64-bit words.
///
/// The non-atomic accessors (`get`/`set`/`clear`) are for single-threaded
/// use (recovery, verification, tests). Trimming passes mutate through
/// [`Bitset::atomic_or_word`], which is a true read-modify-write on the
/// backing word and safe under concurrent writers targeting distinct bits
/// of the same word.
pub struct Bitset {
    words: Vec<AtomicU64>,
    len_bits: u64,
}

impl Bitset {
    fn word_count(len_bits: u64) -> usize {
        ((len_bits + 63) / 64) as usize
    }

    /// Allocates a zeroed bitset of `len_bits` bits.
    pub fn zeroed(len_bits: u64) -> Self {
        let n = Self::word_count(len_bits);
        let mut words = Vec::with_capacity(n);
        words.resize_with(n, || AtomicU64::new(0));
        Self { words, len_bits }
    }

    /// Allocates a bitset of `len_bits` bits, all set, with the tail word
    /// masked so bits beyond `len_bits` stay clear.
    pub fn all_ones(len_bits: u64) -> Self {
        let n = Self::word_count(len_bits);
        let mut words = Vec::with_capacity(n);
        words.resize_with(n, || AtomicU64::new(u64::MAX));
        let bs = Self { words, len_bits };
        bs.mask_tail();
        bs
    }

    fn mask_tail(&self) {
        let rem = self.len_bits % 64;
        if rem != 0 {
            let mask = (1u64 << rem) - 1;
            if let Some(last) = self.words.last() {
                last.fetch_and(mask, Ordering::Relaxed);
            }
        }
    }

    pub fn len(&self) -> u64 {
        self.len_bits
    }

    pub fn is_empty(&self) -> bool {
        self.len_bits == 0
    }

    #[inline]
    pub fn get(&self, i: u64) -> bool {
        let word = self.words[(i / 64) as usize].load(Ordering::Relaxed);
        (word >> (i % 64)) & 1 != 0
    }

    #[inline]
    pub fn set(&self, i: u64) {
        self.words[(i / 64) as usize].fetch_or(1u64 << (i % 64), Ordering::Relaxed);
    }

    #[inline]
    pub fn clear(&self, i: u64) {
        self.words[(i / 64) as usize].fetch_and(!(1u64 << (i % 64)), Ordering::Relaxed);
    }

    /// Atomic word-level OR: sets `bit` within its word via a single
    /// read-modify-write. Safe for concurrent callers targeting distinct
    /// bits of the same word; all intra-pass mutations are monotone
    /// set unions, so interleaving does not affect the final state.
    #[inline]
    pub fn atomic_or_word(&self, bit: u64, mask: u64) {
        self.words[(bit / 64) as usize].fetch_or(mask, Ordering::Relaxed);
    }

    pub fn clear_all(&self) {
        for w in &self.words {
            w.store(0, Ordering::Relaxed);
        }
    }

    pub fn set_all(&self) {
        for w in &self.words {
            w.store(u64::MAX, Ordering::Relaxed);
        }
        self.mask_tail();
    }

    pub fn popcount(&self) -> u64 {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as u64)
            .sum()
    }

    /// Number of 64-bit words backing this bitset.
    pub fn word_len(&self) -> usize {
        self.words.len()
    }
}
