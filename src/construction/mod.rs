//! Build pipeline: alphabet translation and sentinel insertion, suffix array construction,
//! BWT derivation, and rank-string/CSA assembly.
//!
//! Grounded on `genedex::construction` (`create_concatenated_densely_encoded_text`,
//! `merge_frequency_tables`, `frequency_table_to_count`) and `genedex::construction::bwt`. The
//! `sais_drum`-backed low-memory suffix-array branch present in some versions of that pipeline
//! is not carried forward here: it depends on a crate never declared in any `Cargo.toml` in the
//! reference pack, so it would be a fabricated dependency (see DESIGN.md).

mod bwt;
pub mod suffix_array;

pub use bwt::bwt_from_suffix_array;

use crate::alphabet::Alphabet;
use crate::error::BuildError;
use rayon::prelude::*;

/// The concatenated, densely-encoded text (sentinel-separated) plus the per-symbol `C` table
/// (`C[c]` = number of symbols `< c` anywhere in the text).
pub struct EncodedCollection {
    pub text: Vec<u8>,
    pub sequence_starts: Vec<usize>,
    pub count_table: Vec<u64>,
}

/// Concatenates `sequences` with a `0` sentinel after each one, translating every byte through
/// `alphabet`. Frequency counting is done in parallel chunks and merged, mirroring
/// `genedex::construction::create_concatenated_densely_encoded_text` /
/// `merge_frequency_tables` / `frequency_table_to_count`.
pub fn encode_collection(
    sequences: &[&[u8]],
    alphabet: &Alphabet,
) -> Result<EncodedCollection, BuildError> {
    let total_len: usize = sequences.iter().map(|s| s.len() + 1).sum();
    let mut text = Vec::with_capacity(total_len);
    let mut sequence_starts = Vec::with_capacity(sequences.len());

    for (sequence_index, &sequence) in sequences.iter().enumerate() {
        sequence_starts.push(text.len());
        let translated = alphabet.translate_sequence(sequence, sequence_index)?;
        text.extend(translated);
        text.push(0);
    }

    let alphabet_size = alphabet.size();
    let num_threads = rayon::current_num_threads().max(1);
    let chunk_size = text.len().div_ceil(num_threads).max(1);

    let frequency_tables: Vec<Vec<u64>> = text
        .par_chunks(chunk_size)
        .map(|chunk| {
            let mut freq = vec![0u64; alphabet_size];
            for &symbol in chunk {
                freq[symbol as usize] += 1;
            }
            freq
        })
        .collect();

    let merged = merge_frequency_tables(frequency_tables, alphabet_size);
    let count_table = frequency_table_to_count(&merged);

    Ok(EncodedCollection {
        text,
        sequence_starts,
        count_table,
    })
}

fn merge_frequency_tables(tables: Vec<Vec<u64>>, alphabet_size: usize) -> Vec<u64> {
    let mut merged = vec![0u64; alphabet_size];
    for table in tables {
        for (m, t) in merged.iter_mut().zip(table) {
            *m += t;
        }
    }
    merged
}

/// Prefix-sums a per-symbol frequency table into `C[c] = |{positions with symbol < c}|`, with
/// an extra trailing entry `C[sigma] = |T|`.
fn frequency_table_to_count(frequency_table: &[u64]) -> Vec<u64> {
    let mut count_table = Vec::with_capacity(frequency_table.len() + 1);
    let mut running = 0u64;
    for &freq in frequency_table {
        count_table.push(running);
        running += freq;
    }
    count_table.push(running);
    count_table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;

    #[test]
    fn concat_text_inserts_sentinels() {
        let alphabet = alphabet::ascii_dna();
        let encoded = encode_collection(&[b"ACGT", b"TTAA"], &alphabet).unwrap();

        // A=1 C=2 G=3 T=4 in from_io_symbols("ACGT", 0) order
        assert_eq!(encoded.text, vec![1, 2, 3, 4, 0, 4, 4, 1, 1, 0]);
        assert_eq!(encoded.sequence_starts, vec![0, 5]);
        // count_table has alphabet_size + 1 entries
        assert_eq!(encoded.count_table.len(), alphabet.size() + 1);
        assert_eq!(*encoded.count_table.last().unwrap(), 10);
    }

    #[test]
    fn rejects_invalid_byte() {
        let alphabet = alphabet::ascii_dna();
        let err = encode_collection(&[b"ACGN"], &alphabet).unwrap_err();
        assert!(matches!(err, BuildError::InvalidAlphabet { .. }));
    }
}
