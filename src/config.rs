//! A builder-like API to configure and construct an index, mirroring `genedex`'s
//! `FmIndexConfig` but generalized over the rank-string family instead of the index-storage
//! width (see DESIGN.md for why the `u32`/`i32`/`i64`-generic `IndexStorage` split was dropped
//! in favor of always sampling into a `u64`-backed [`crate::csa::CompressedSuffixArray`]).

use std::marker::PhantomData;

use crate::alphabet::Alphabet;
use crate::bi_fm_index::BiFmIndex;
use crate::error::BuildError;
use crate::fm_index::{BuildOptions, FmIndex};
use crate::rank_string::{InterleavedRankString, RankString};

/// Configures the suffix-array sampling rate and the rank-string family (`R`) used by the
/// constructed index.
#[derive(Clone, Copy)]
pub struct FmIndexConfig<R: RankString = InterleavedRankString> {
    suffix_array_sampling_rate: usize,
    _rank_string_marker: PhantomData<R>,
}

impl<R: RankString> FmIndexConfig<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The index internally samples the suffix array. Every row at a position divisible by
    /// `suffix_array_sampling_rate` is retained; the rest are recovered by an LF-mapping walk.
    /// A larger rate lowers memory usage but raises `locate` running time. The default is `4`.
    pub fn suffix_array_sampling_rate(self, suffix_array_sampling_rate: usize) -> Self {
        assert!(suffix_array_sampling_rate > 0);
        Self {
            suffix_array_sampling_rate,
            ..self
        }
    }

    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            suffix_array_sampling_rate: self.suffix_array_sampling_rate,
        }
    }

    /// Constructs a single-direction [`FmIndex`] over `sequences`.
    pub fn construct_index(
        self,
        sequences: &[&[u8]],
        alphabet: Alphabet,
    ) -> Result<FmIndex<R>, BuildError> {
        FmIndex::construct(sequences, alphabet, self.build_options())
    }

    /// Constructs a [`BiFmIndex`] over `sequences`, enabling bidirectional extension and
    /// search-scheme driven approximate search.
    pub fn construct_bi_index(
        self,
        sequences: &[&[u8]],
        alphabet: Alphabet,
    ) -> Result<BiFmIndex<R>, BuildError> {
        BiFmIndex::construct(sequences, alphabet, self.build_options())
    }
}

impl<R: RankString> Default for FmIndexConfig<R> {
    fn default() -> Self {
        Self {
            suffix_array_sampling_rate: 4,
            _rank_string_marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank_string::InterleavedRankString;

    #[test]
    fn basic_config() {
        let sequences: [&[u8]; 1] = [b"ACGT"];
        let alphabet = crate::alphabet::ascii_dna();

        let _index = FmIndexConfig::<InterleavedRankString>::new()
            .suffix_array_sampling_rate(2)
            .construct_index(&sequences, alphabet)
            .unwrap();
    }

    #[test]
    fn builds_bidirectional_index() {
        let sequences: [&[u8]; 1] = [b"ACGT"];
        let alphabet = crate::alphabet::ascii_dna();

        let _index = FmIndexConfig::<InterleavedRankString>::new()
            .construct_bi_index(&sequences, alphabet)
            .unwrap();
    }
}
