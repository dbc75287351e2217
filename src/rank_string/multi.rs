use super::RankString;
use crate::bitvector::{Bitvector, FlatBitvector};

/// One plain bitvector per symbol: `bitvectors[c].symbol(i)` iff `text[i] == c`.
///
/// The simplest rank-string family, grounded directly on
/// `genedex::naive_occurrence_table::NaiveOccurrenceTable` (which stores one `Vec<usize>` of
/// absolute positions per symbol); here each "occurrence column" is instead a rank-capable
/// bitvector so `rank` stays O(1) instead of a binary search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub struct MultiBitvectorRankString {
    len: usize,
    alphabet_size: usize,
    text: Vec<u8>,
    bitvectors: Vec<FlatBitvector>,
}

impl RankString for MultiBitvectorRankString {
    fn construct(text: &[u8], alphabet_size: usize) -> Self {
        assert!(alphabet_size >= 2);
        let bitvectors = (0..alphabet_size)
            .map(|symbol| {
                FlatBitvector::from_bits(text.iter().map(|&b| b as usize == symbol), text.len())
            })
            .collect();

        Self {
            len: text.len(),
            alphabet_size,
            text: text.to_vec(),
            bitvectors,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    fn symbol_at(&self, index: usize) -> u8 {
        self.text[index]
    }

    fn rank(&self, index: usize, symbol: u8) -> usize {
        self.bitvectors[symbol as usize].rank(index)
    }
}
