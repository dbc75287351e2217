//! Cursor value type: a matched interval bound to its index, supporting extension on either end.
//!
//! Grounded on `genedex::cursor::Cursor` for the "cursor as a value, not an iterator" shape;
//! the bidirectional extension itself is [`crate::bi_fm_index::BiFmIndex::extend_left`] /
//! `extend_right`.

use crate::bi_fm_index::{BiFmIndex, BiInterval};
use crate::fm_index::Hit;
use crate::rank_string::RankString;

/// A cursor over a [`BiFmIndex`]: the set of suffixes (on both orientations) sharing the
/// pattern matched so far. Cheap to copy; extension returns a new cursor rather than mutating.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a, R: RankString> {
    index: &'a BiFmIndex<R>,
    interval: BiInterval,
}

impl<'a, R: RankString> Cursor<'a, R> {
    pub fn new(index: &'a BiFmIndex<R>) -> Self {
        Self {
            index,
            interval: index.full_interval(),
        }
    }

    pub fn count(&self) -> usize {
        self.interval.size
    }

    pub fn is_empty(&self) -> bool {
        self.interval.is_empty()
    }

    pub fn interval(&self) -> BiInterval {
        self.interval
    }

    /// Prepends a dense symbol to the matched pattern.
    pub fn extend_left(&self, symbol: u8) -> Self {
        Self {
            index: self.index,
            interval: self.index.extend_left(self.interval, symbol),
        }
    }

    /// Appends a dense symbol to the matched pattern.
    pub fn extend_right(&self, symbol: u8) -> Self {
        Self {
            index: self.index,
            interval: self.index.extend_right(self.interval, symbol),
        }
    }

    /// All `sigma` children reachable by `extend_left`, computed together (the "all-sigma fast
    /// path" from the cursor-algebra design notes).
    pub fn extend_left_all(&self) -> Vec<Self> {
        self.index
            .extend_left_all(self.interval)
            .into_iter()
            .map(|interval| Self {
                index: self.index,
                interval,
            })
            .collect()
    }

    pub fn extend_right_all(&self) -> Vec<Self> {
        self.index
            .extend_right_all(self.interval)
            .into_iter()
            .map(|interval| Self {
                index: self.index,
                interval,
            })
            .collect()
    }

    pub fn locate(&self) -> Vec<Hit> {
        self.index.locate(self.interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;
    use crate::fm_index::BuildOptions;
    use crate::rank_string::InterleavedRankString;

    #[test]
    fn cursor_extension_mirrors_pattern_search() {
        let alphabet = alphabet::ascii_dna();
        let index = BiFmIndex::<InterleavedRankString>::construct(
            &[b"cccaaagggttt"],
            alphabet,
            BuildOptions::default(),
        )
        .unwrap();

        let cursor = Cursor::new(&index);
        let a = index.alphabet().io_to_dense_representation(b'g').unwrap();
        let cursor = cursor.extend_left(a).extend_left(a);
        assert_eq!(cursor.count(), 2);
        assert_eq!(cursor.locate().len(), 2);
    }
}
