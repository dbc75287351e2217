//! Rank-strings: O(1) `rank`/`prefix_rank` over a byte sequence drawn from a small alphabet.
//!
//! Three families are provided, all grounded on `genedex::text_with_rank_support` and
//! `genedex::naive_occurrence_table`:
//!
//! - [`interleaved::InterleavedRankString`] ("EPR", entropy-preserving rank): one bit-plane
//!   bitvector per bit of the dense symbol, interleaved so a single block fetch touches all
//!   planes for one text block.
//! - [`multi::MultiBitvectorRankString`]: one plain bitvector per symbol; simplest baseline.
//! - [`wavelet::WaveletRankString`]: a multiary wavelet tree, recursively splitting the
//!   alphabet in half at each level.

pub mod interleaved;
pub mod multi;
pub mod wavelet;

pub use interleaved::InterleavedRankString;
pub use multi::MultiBitvectorRankString;
pub use wavelet::WaveletRankString;

/// All counts up to `index`, one per symbol in `[0, alphabet_size)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllRanks {
    pub ranks: Vec<usize>,
    pub prefix_ranks: Vec<usize>,
}

/// Shared contract for every rank-string implementation.
pub trait RankString {
    /// Builds a rank-string from `text`, a sequence of dense symbols in `[0, alphabet_size)`.
    fn construct(text: &[u8], alphabet_size: usize) -> Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn alphabet_size(&self) -> usize;

    /// The dense symbol stored at `index`.
    fn symbol_at(&self, index: usize) -> u8;

    /// Number of occurrences of `symbol` in `text[0..index)`.
    fn rank(&self, index: usize, symbol: u8) -> usize;

    /// Number of occurrences of any symbol `<= symbol` in `text[0..index)`.
    fn prefix_rank(&self, index: usize, symbol: u8) -> usize {
        (0..=symbol).map(|s| self.rank(index, s)).sum()
    }

    /// `(rank(index, c), prefix_rank(index, c))` for every symbol `c`, computed together so
    /// implementations can amortize shared work (e.g. one block decode per call instead of one
    /// per symbol).
    fn all_ranks(&self, index: usize) -> AllRanks {
        let ranks: Vec<usize> = (0..self.alphabet_size())
            .map(|c| self.rank(index, c as u8))
            .collect();
        let mut prefix_ranks = Vec::with_capacity(ranks.len());
        let mut running = 0;
        for &r in &ranks {
            running += r;
            prefix_ranks.push(running);
        }
        AllRanks { ranks, prefix_ranks }
    }
}
