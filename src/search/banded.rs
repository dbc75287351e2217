//! Mode B: dynamic-programming pruning of the cursor tree.
//!
//! Instead of enumerating M/S/I/D branches explicitly (Mode A, [`super::backtracking`]), Mode B
//! extends the matched text one symbol at a time and maintains a full edit-distance DP row
//! between the query and the matched-text-so-far, pruning any branch whose row minimum already
//! exceeds the scheme's maximum error bound. This is the standard Ukkonen-style cutoff used
//! throughout `fmindex-collection`'s `search/SearchNg1*` family, applied here over the
//! bidirectional cursor instead of a single forward automaton.
//!
//! The row is kept dense (not restricted to the O(max_errors)-wide diagonal band) for
//! correctness and clarity; restricting it to a true band is a pure performance optimization
//! left for a follow-up (see DESIGN.md).

use crate::bi_fm_index::{BiFmIndex, BiInterval};
use crate::fm_index::Hit;
use crate::rank_string::RankString;

/// One approximate match found by the banded search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandedHit {
    pub hits: Vec<Hit>,
    pub errors: u32,
}

/// Searches for `query` (dense symbols) allowing up to `max_errors` unit-cost edits
/// (substitution, insertion, deletion), extending the cursor rightward only.
pub fn search<R: RankString>(
    index: &BiFmIndex<R>,
    query: &[u8],
    max_errors: u32,
) -> Vec<BandedHit> {
    let mut results = Vec::new();
    if query.is_empty() {
        return results;
    }

    let initial_row: Vec<u32> = (0..=query.len() as u32).collect();
    let max_text_len = query.len() + max_errors as usize;

    extend(
        index,
        query,
        max_errors,
        index.full_interval(),
        initial_row,
        0,
        max_text_len,
        &mut results,
    );

    results
}

#[allow(clippy::too_many_arguments)]
fn extend<R: RankString>(
    index: &BiFmIndex<R>,
    query: &[u8],
    max_errors: u32,
    interval: BiInterval,
    row: Vec<u32>,
    matched_text_len: usize,
    max_text_len: usize,
    results: &mut Vec<BandedHit>,
) {
    if interval.is_empty() {
        return;
    }

    if matched_text_len >= query.len().saturating_sub(max_errors as usize)
        && let Some(&last) = row.last()
        && last <= max_errors
    {
        results.push(BandedHit {
            hits: index.locate(interval),
            errors: last,
        });
    }

    if matched_text_len >= max_text_len {
        return;
    }

    for symbol in 0..index.alphabet().size() as u8 {
        let child = index.extend_right(interval, symbol);
        if child.is_empty() {
            continue;
        }

        let new_row = dp_step(&row, query, symbol, max_errors);
        if new_row.iter().min().copied().unwrap_or(u32::MAX) > max_errors {
            continue;
        }

        extend(
            index,
            query,
            max_errors,
            child,
            new_row,
            matched_text_len + 1,
            max_text_len,
            results,
        );
    }
}

/// One DP column update: `new_row[j]` = min edit distance aligning `query[..j]` against the
/// matched text extended by one more `symbol`.
fn dp_step(row: &[u32], query: &[u8], symbol: u8, max_errors: u32) -> Vec<u32> {
    let mut new_row = vec![0u32; row.len()];
    // aligning the empty query prefix always costs one more deletion of the extra text symbol
    new_row[0] = row[0] + 1;

    for j in 1..row.len() {
        let substitution_cost = if query[j - 1] == symbol { 0 } else { 1 };
        let diagonal = row[j - 1] + substitution_cost;
        let deletion = row[j] + 1; // extra text symbol not matched to any query symbol
        let insertion = new_row[j - 1] + 1; // query symbol not matched to any text symbol
        new_row[j] = diagonal.min(deletion).min(insertion).min(max_errors + 1);
    }

    new_row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;
    use crate::fm_index::BuildOptions;
    use crate::rank_string::InterleavedRankString;

    fn dense(alphabet: &alphabet::Alphabet, text: &[u8]) -> Vec<u8> {
        text.iter()
            .map(|&b| alphabet.io_to_dense_representation(b).unwrap())
            .collect()
    }

    #[test]
    fn finds_exact_match_with_zero_errors() {
        let alphabet = alphabet::ascii_dna();
        let index = BiFmIndex::<InterleavedRankString>::construct(
            &[b"acgtacgtacgt"],
            alphabet.clone(),
            BuildOptions::default(),
        )
        .unwrap();

        let query = dense(&alphabet, b"acgt");
        let results = search(&index, &query, 0);
        assert!(results.iter().any(|r| r.errors == 0));
    }

    #[test]
    fn finds_one_substitution_match() {
        let alphabet = alphabet::ascii_dna();
        let index = BiFmIndex::<InterleavedRankString>::construct(
            &[b"acgtacAtacgt"],
            alphabet.clone(),
            BuildOptions::default(),
        )
        .unwrap();

        let query = dense(&alphabet, b"acgt");
        let results = search(&index, &query, 1);
        assert!(results.iter().any(|r| r.errors == 1));
        assert!(results.iter().any(|r| r.errors == 0));
    }
}
