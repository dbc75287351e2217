//! Single-direction FM-index: BWT + rank-string + `C` table + compressed suffix array.
//!
//! Grounded on `genedex::FmIndex` (`count`, `locate`, `lf_mapping_step_unchecked`) for the
//! overall shape, with the generic rank-string swapped in per [`crate::rank_string`] and the
//! `u32`/`i32`/`i64` storage split replaced by a single `u64`-indexed suffix array sampling
//! layer (see DESIGN.md for why the sealed `IndexStorage` generic was not carried forward).

use crate::alphabet::Alphabet;
use crate::construction::{self, suffix_array};
use crate::csa::{BackwardStep, CompressedSuffixArray};
use crate::error::{BuildError, DeserializeError};
use crate::rank_string::{InterleavedRankString, RankString};
use crate::text_id_lookup::TextIdLookup;

#[cfg(feature = "savefile")]
use std::io::{Read, Write};

/// Leading one-byte format tag written ahead of the `savefile` stream (spec.md §6's "persisted
/// state layout"); checked on load before handing the rest of the stream to `savefile`.
const FORMAT_VERSION: u8 = 1;

/// A single match location: which input sequence, and the 0-based offset within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hit {
    pub sequence_id: usize,
    pub position: usize,
}

/// Suffix-array sampling rate and the rank-string family to build with; see
/// [`crate::config::FmIndexConfig`] for the public builder.
#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    pub suffix_array_sampling_rate: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            suffix_array_sampling_rate: 4,
        }
    }
}

/// FM-index over one or more concatenated sequences, generic over the rank-string
/// implementation used to answer `rank`/`prefix_rank` queries against the BWT.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub struct FmIndex<R: RankString = InterleavedRankString> {
    pub(crate) alphabet: Alphabet,
    pub(crate) rank_string: R,
    pub(crate) count_table: Vec<u64>,
    pub(crate) csa: CompressedSuffixArray,
    pub(crate) text_id_lookup: TextIdLookup,
    pub(crate) text_len: usize,
}

impl<R: RankString> BackwardStep for FmIndex<R> {
    fn lf_step(&self, row: usize) -> usize {
        let symbol = self.rank_string.symbol_at(row);
        self.count_table[symbol as usize] as usize + self.rank_string.rank(row, symbol)
    }

    fn bwt_symbol_at(&self, row: usize) -> u8 {
        self.rank_string.symbol_at(row)
    }
}

impl<R: RankString> FmIndex<R> {
    /// Builds an index over `sequences` (raw input bytes, translated through `alphabet`).
    pub fn construct(
        sequences: &[&[u8]],
        alphabet: Alphabet,
        options: BuildOptions,
    ) -> Result<Self, BuildError> {
        tracing::debug!(num_sequences = sequences.len(), "encoding input collection");
        let encoded = construction::encode_collection(sequences, &alphabet)?;

        tracing::debug!(text_len = encoded.text.len(), "constructing suffix array");
        let sa = suffix_array::construct_suffix_array_i64(&encoded.text);

        tracing::debug!("deriving BWT");
        let (bwt, border_lookup) = construction::bwt_from_suffix_array(&encoded.text, &sa);

        tracing::debug!("building rank-string over BWT");
        let rank_string = R::construct(&bwt, alphabet.size());

        let csa = CompressedSuffixArray::new(&sa, &border_lookup, options.suffix_array_sampling_rate);
        let text_id_lookup = TextIdLookup::new(encoded.sequence_starts);

        Ok(Self {
            alphabet,
            rank_string,
            count_table: encoded.count_table,
            csa,
            text_id_lookup,
            text_len: encoded.text.len(),
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Number of occurrences of `pattern` across the whole collection.
    pub fn count(&self, pattern: &[u8]) -> usize {
        match self.backward_search_interval(pattern) {
            Some((lb, ub)) => ub - lb,
            None => 0,
        }
    }

    /// All match locations of `pattern`, in arbitrary order.
    pub fn locate(&self, pattern: &[u8]) -> Vec<Hit> {
        let Some((lb, ub)) = self.backward_search_interval(pattern) else {
            return Vec::new();
        };
        (lb..ub)
            .map(|row| {
                let position = self.csa.recover(row, self);
                let (sequence_id, position) = self.text_id_lookup.locate(position);
                Hit {
                    sequence_id,
                    position,
                }
            })
            .collect()
    }

    fn backward_search_interval(&self, pattern: &[u8]) -> Option<(usize, usize)> {
        let mut lb = 0usize;
        let mut ub = self.text_len;

        for &byte in pattern.iter().rev() {
            let symbol = self.alphabet.io_to_dense_representation(byte)?;
            lb = self.count_table[symbol as usize] as usize + self.rank_string.rank(lb, symbol);
            ub = self.count_table[symbol as usize] as usize + self.rank_string.rank(ub, symbol);
            if lb >= ub {
                return None;
            }
        }

        Some((lb, ub))
    }

    pub(crate) fn count_table(&self) -> &[u64] {
        &self.count_table
    }

    pub(crate) fn rank_string(&self) -> &R {
        &self.rank_string
    }

    /// Re-checks the invariants spec.md §6 requires of a freshly loaded index: the `C` table has
    /// one entry per alphabet symbol plus a trailing total, is monotone non-decreasing, and its
    /// trailing entry equals the indexed text's length.
    pub(crate) fn verify_consistency(&self) -> Result<(), DeserializeError> {
        let expected_len = self.alphabet.size() + 1;
        if self.count_table.len() != expected_len {
            return Err(DeserializeError::LengthMismatch {
                field: "count_table",
                expected: expected_len,
                found: self.count_table.len(),
            });
        }

        for (symbol, pair) in self.count_table.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(DeserializeError::CounterNotMonotone {
                    symbol: symbol as u8,
                    index: symbol + 1,
                });
            }
        }

        let total = *self.count_table.last().unwrap() as usize;
        if total != self.text_len {
            return Err(DeserializeError::LengthMismatch {
                field: "count_table total",
                expected: self.text_len,
                found: total,
            });
        }

        Ok(())
    }
}

#[cfg(feature = "savefile")]
impl<R: RankString + savefile::Savefile> FmIndex<R> {
    const VERSION_FOR_SAVEFILE: u32 = 0;

    /// Reads the leading format-version byte, loads the `savefile` payload behind it, then
    /// re-verifies the `C`-table invariants before handing the index back to the caller.
    pub fn load_from_reader(reader: &mut impl std::io::Read) -> Result<Self, DeserializeError> {
        let mut version_byte = [0u8; 1];
        reader.read_exact(&mut version_byte)?;
        if version_byte[0] != FORMAT_VERSION {
            return Err(DeserializeError::FormatVersionMismatch {
                expected: FORMAT_VERSION as u32,
                found: version_byte[0] as u32,
            });
        }

        let index: Self = savefile::load(reader, Self::VERSION_FOR_SAVEFILE)?;
        index.verify_consistency()?;
        Ok(index)
    }

    pub fn load_from_file(
        filepath: impl AsRef<std::path::Path>,
    ) -> Result<Self, DeserializeError> {
        let mut file = std::fs::File::open(filepath)?;
        Self::load_from_reader(&mut file)
    }

    pub fn save_to_writer(&self, writer: &mut impl std::io::Write) -> Result<(), DeserializeError> {
        writer.write_all(&[FORMAT_VERSION])?;
        savefile::save(writer, Self::VERSION_FOR_SAVEFILE, self)?;
        Ok(())
    }

    pub fn save_to_file(
        &self,
        filepath: impl AsRef<std::path::Path>,
    ) -> Result<(), DeserializeError> {
        let mut file = std::fs::File::create(filepath)?;
        self.save_to_writer(&mut file)
    }
}
