//! Bidirectional FM-index: a forward [`FmIndex`] plus a rank-string over the BWT of the
//! reversed text, enabling extension of a match on either end.
//!
//! The per-symbol `C` table depends only on global symbol frequencies, not on text order, so
//! the forward and reverse sides of the index share the single `C` table already built for the
//! forward side — no separate reverse count table is needed.
//!
//! Grounded on `johanneskoester-rust-bio`'s `data_structures::fmindex` (`BiInterval`,
//! `backward_ext`, `forward_ext`), since `genedex` itself has no bidirectional variant.

use crate::alphabet::Alphabet;
use crate::construction::{self, suffix_array};
use crate::error::{BuildError, DeserializeError};
use crate::fm_index::{BuildOptions, FmIndex, Hit};
use crate::rank_string::{AllRanks, InterleavedRankString, RankString};

#[cfg(feature = "savefile")]
use std::io::{Read, Write};

const FORMAT_VERSION: u8 = 1;

/// A matched interval tracked on both the forward and reverse BWTs simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiInterval {
    pub(crate) lower: usize,
    pub(crate) lower_rev: usize,
    pub(crate) size: usize,
}

impl BiInterval {
    pub fn count(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub struct BiFmIndex<R: RankString = InterleavedRankString> {
    pub(crate) forward: FmIndex<R>,
    pub(crate) reverse_rank_string: R,
}

impl<R: RankString> BiFmIndex<R> {
    pub fn construct(
        sequences: &[&[u8]],
        alphabet: Alphabet,
        options: BuildOptions,
    ) -> Result<Self, BuildError> {
        tracing::debug!("encoding input collection for bidirectional index");
        let encoded = construction::encode_collection(sequences, &alphabet)?;

        tracing::debug!("constructing forward and reverse suffix arrays and BWTs concurrently");
        let reversed_text: Vec<u8> = encoded.text.iter().rev().copied().collect();
        let ((forward_sa, forward_bwt, border_lookup), reverse_bwt) = rayon::join(
            || {
                let forward_sa = suffix_array::construct_suffix_array_i64(&encoded.text);
                let (forward_bwt, border_lookup) =
                    construction::bwt_from_suffix_array(&encoded.text, &forward_sa);
                (forward_sa, forward_bwt, border_lookup)
            },
            || {
                let reverse_sa = suffix_array::construct_suffix_array_i64(&reversed_text);
                construction::bwt_from_suffix_array(&reversed_text, &reverse_sa).0
            },
        );
        let forward_rank_string = R::construct(&forward_bwt, alphabet.size());
        let reverse_rank_string = R::construct(&reverse_bwt, alphabet.size());

        let csa = crate::csa::CompressedSuffixArray::new(
            &forward_sa,
            &border_lookup,
            options.suffix_array_sampling_rate,
        );
        let text_id_lookup = crate::text_id_lookup::TextIdLookup::new(encoded.sequence_starts);

        let forward = FmIndex {
            alphabet,
            rank_string: forward_rank_string,
            count_table: encoded.count_table,
            csa,
            text_id_lookup,
            text_len: encoded.text.len(),
        };

        Ok(Self {
            forward,
            reverse_rank_string,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.forward.alphabet
    }

    pub fn text_len(&self) -> usize {
        self.forward.text_len
    }

    /// The interval spanning the whole suffix array, i.e. the empty match.
    pub fn full_interval(&self) -> BiInterval {
        BiInterval {
            lower: 0,
            lower_rev: 0,
            size: self.forward.text_len,
        }
    }

    /// Prepends `symbol` to the matched substring (classic backward search on the forward BWT).
    pub fn extend_left(&self, interval: BiInterval, symbol: u8) -> BiInterval {
        let AllRanks { ranks, .. } = self.forward.rank_string().all_ranks(interval.lower);
        let AllRanks {
            ranks: ranks_end, ..
        } = self
            .forward
            .rank_string()
            .all_ranks(interval.lower + interval.size);

        let count_table = self.forward.count_table();
        let new_lower = count_table[symbol as usize] as usize + ranks[symbol as usize];
        let new_size = ranks_end[symbol as usize] - ranks[symbol as usize];

        let smaller_sum: usize = (0..symbol as usize)
            .map(|a| ranks_end[a] - ranks[a])
            .sum();
        let new_lower_rev = interval.lower_rev + smaller_sum;

        BiInterval {
            lower: new_lower,
            lower_rev: new_lower_rev,
            size: new_size,
        }
    }

    /// Appends `symbol` to the matched substring (backward search on the reverse BWT).
    pub fn extend_right(&self, interval: BiInterval, symbol: u8) -> BiInterval {
        let AllRanks { ranks, .. } = self.reverse_rank_string.all_ranks(interval.lower_rev);
        let AllRanks {
            ranks: ranks_end, ..
        } = self
            .reverse_rank_string
            .all_ranks(interval.lower_rev + interval.size);

        let count_table = self.forward.count_table();
        let new_lower_rev = count_table[symbol as usize] as usize + ranks[symbol as usize];
        let new_size = ranks_end[symbol as usize] - ranks[symbol as usize];

        let smaller_sum: usize = (0..symbol as usize)
            .map(|a| ranks_end[a] - ranks[a])
            .sum();
        let new_lower = interval.lower + smaller_sum;

        BiInterval {
            lower: new_lower,
            lower_rev: new_lower_rev,
            size: new_size,
        }
    }

    /// All symbols' extend-left results at once, reusing one `all_ranks` call per bound
    /// (the "all-sigma-children fast path" from the cursor-algebra design notes).
    pub fn extend_left_all(&self, interval: BiInterval) -> Vec<BiInterval> {
        let alphabet_size = self.alphabet().size();
        let start = self.forward.rank_string().all_ranks(interval.lower);
        let end = self
            .forward
            .rank_string()
            .all_ranks(interval.lower + interval.size);
        let count_table = self.forward.count_table();

        let mut running_smaller = 0usize;
        (0..alphabet_size)
            .map(|symbol| {
                let size = end.ranks[symbol] - start.ranks[symbol];
                let lower = count_table[symbol] as usize + start.ranks[symbol];
                let lower_rev = interval.lower_rev + running_smaller;
                running_smaller += size;
                BiInterval {
                    lower,
                    lower_rev,
                    size,
                }
            })
            .collect()
    }

    /// All symbols' extend-right results at once.
    pub fn extend_right_all(&self, interval: BiInterval) -> Vec<BiInterval> {
        let alphabet_size = self.alphabet().size();
        let start = self.reverse_rank_string.all_ranks(interval.lower_rev);
        let end = self
            .reverse_rank_string
            .all_ranks(interval.lower_rev + interval.size);
        let count_table = self.forward.count_table();

        let mut running_smaller = 0usize;
        (0..alphabet_size)
            .map(|symbol| {
                let size = end.ranks[symbol] - start.ranks[symbol];
                let lower_rev = count_table[symbol] as usize + start.ranks[symbol];
                let lower = interval.lower + running_smaller;
                running_smaller += size;
                BiInterval {
                    lower,
                    lower_rev,
                    size,
                }
            })
            .collect()
    }

    /// Recovers every match location for a matched interval, via the forward side's CSA.
    pub fn locate(&self, interval: BiInterval) -> Vec<Hit> {
        (interval.lower..interval.lower + interval.size)
            .map(|row| {
                let position = self.forward.csa.recover(row, &self.forward);
                let (sequence_id, position) = self.forward.text_id_lookup.locate(position);
                Hit {
                    sequence_id,
                    position,
                }
            })
            .collect()
    }

    /// Convenience wrapper equivalent to repeated [`BiFmIndex::extend_left`] over `pattern`,
    /// right to left, matching [`FmIndex::locate`]'s semantics exactly (Scenario C).
    pub fn locate_pattern(&self, pattern: &[u8]) -> Vec<Hit> {
        let mut interval = self.full_interval();
        for &byte in pattern.iter().rev() {
            let Some(symbol) = self.alphabet().io_to_dense_representation(byte) else {
                return Vec::new();
            };
            interval = self.extend_left(interval, symbol);
            if interval.is_empty() {
                return Vec::new();
            }
        }
        self.locate(interval)
    }

    /// Re-checks the forward side's `C`-table invariants (see
    /// [`FmIndex::verify_consistency`]) plus the build-time sanity check that the reverse BWT's
    /// total per-symbol counts agree with the forward side's (spec.md §4.4 step 7).
    fn verify_consistency(&self) -> Result<(), DeserializeError> {
        self.forward.verify_consistency()?;

        let reverse_totals = self.reverse_rank_string.all_ranks(self.forward.text_len()).ranks;
        for (symbol, &forward_total) in self.forward.count_table().windows(2).enumerate() {
            let forward_count = (forward_total[1] - forward_total[0]) as usize;
            let reverse_count = reverse_totals[symbol];
            if forward_count != reverse_count {
                return Err(DeserializeError::LengthMismatch {
                    field: "reverse_rank_string total count",
                    expected: forward_count,
                    found: reverse_count,
                });
            }
        }

        Ok(())
    }
}

#[cfg(feature = "savefile")]
impl<R: RankString + savefile::Savefile> BiFmIndex<R> {
    const VERSION_FOR_SAVEFILE: u32 = 0;

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;
    use std::collections::HashSet;

    #[test]
    fn bidirectional_extension_matches_forward_locate() {
        let alphabet = alphabet::ascii_dna();
        let sequences: [&[u8]; 2] = [b"cccaaagggttt", b"acgtacgtacgt"];

        let forward =
            FmIndex::<InterleavedRankString>::construct(&sequences, alphabet.clone(), BuildOptions::default())
                .unwrap();
        let bi =
            BiFmIndex::<InterleavedRankString>::construct(&sequences, alphabet, BuildOptions::default())
                .unwrap();

        for query in [b"gt".as_slice(), b"ccc".as_slice(), b"acgt".as_slice()] {
            let expected: HashSet<_> = forward.locate(query).into_iter().collect();
            let actual: HashSet<_> = bi.locate_pattern(query).into_iter().collect();
            assert_eq!(actual, expected, "mismatch for query {query:?}");
        }
    }

    #[test]
    fn extend_left_then_right_equals_extend_right_then_left() {
        let alphabet = alphabet::ascii_dna();
        let bi = BiFmIndex::<InterleavedRankString>::construct(
            &[b"acgtacgtacgtacgt"],
            alphabet.clone(),
            BuildOptions::default(),
        )
        .unwrap();

        let a = alphabet.io_to_dense_representation(b'A').unwrap();
        let c = alphabet.io_to_dense_representation(b'C').unwrap();

        let left_then_right = {
            let i = bi.extend_left(bi.full_interval(), a);
            bi.extend_right(i, c)
        };
        let right_then_left = {
            let i = bi.extend_right(bi.full_interval(), c);
            bi.extend_left(i, a)
        };

        assert_eq!(left_then_right, right_then_left);
    }
}
