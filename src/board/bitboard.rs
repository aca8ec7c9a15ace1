//! Growable bitboard for cell occupancy

/// One bit per cell, row-major, packed into `u64` words.
///
/// Derived ordering compares the packed words lexicographically, which is
/// what the symmetry cache relies on to pick a canonical key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bitboard {
    words: Vec<u64>,
}

impl Bitboard {
    /// Create an empty bitboard able to hold `cells` bits
    pub fn new(cells: usize) -> Self {
        Self {
            words: vec![0; cells.div_ceil(64)],
        }
    }

    /// Set the bit at cell index `idx`
    #[inline]
    pub fn set(&mut self, idx: usize) {
        self.words[idx / 64] |= 1u64 << (idx % 64);
    }

    /// Check if the bit at cell index `idx` is set
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        (self.words[idx / 64] >> (idx % 64)) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Packed words, lowest cell index first
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Iterate over set cell indices in increasing order
    pub fn iter_ones(&self) -> BitboardIter<'_> {
        BitboardIter {
            words: &self.words,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
        }
    }
}

/// Iterator over set bits in a [`Bitboard`]
pub struct BitboardIter<'a> {
    words: &'a [u64],
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitboardIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_word == 0 {
            self.word_idx += 1;
            if self.word_idx >= self.words.len() {
                return None;
            }
            self.current_word = self.words[self.word_idx];
        }

        let bit_pos = self.current_word.trailing_zeros() as usize;
        // Clear the lowest set bit
        self.current_word &= self.current_word - 1;
        Some(self.word_idx * 64 + bit_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_across_words() {
        let mut bb = Bitboard::new(130);
        bb.set(0);
        bb.set(63);
        bb.set(64);
        bb.set(129);
        assert!(bb.get(0) && bb.get(63) && bb.get(64) && bb.get(129));
        assert!(!bb.get(1));
        assert_eq!(bb.count(), 4);
        assert_eq!(bb.iter_ones().collect::<Vec<_>>(), vec![0, 63, 64, 129]);
    }

    #[test]
    fn test_empty() {
        let bb = Bitboard::new(49);
        assert!(bb.is_empty());
        assert_eq!(bb.words().len(), 1);
        assert_eq!(bb.iter_ones().next(), None);
    }
}
