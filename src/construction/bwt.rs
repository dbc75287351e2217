//! Burrows-Wheeler Transform derivation from a suffix array, plus the text-border lookup table
//! the CSA (§4.3) needs to short-circuit a backward walk that lands on a sentinel row.
//!
//! Grounded on `genedex::construction::bwt::bwt_from_suffix_array`: two-level `rayon` chunking
//! (an outer chunk per worker thread, an inner chunk for cache-friendly sequential runs) and a
//! `memchr`-driven scan for sentinel (`0`) positions in the BWT.

use num_traits::{NumCast, PrimInt};
use rayon::prelude::*;
use std::collections::HashMap;

const INNER_CHUNK_SIZE: usize = 128;

/// `L[i] = text[(SA[i] - 1) mod |text|]`, plus a lookup from BWT row index to the original text
/// position whenever that row's preceding symbol is a sentinel (used by [`crate::csa`] to
/// terminate a backward walk without needing a dense presence bitvector).
pub fn bwt_from_suffix_array<I>(text: &[u8], suffix_array: &[I]) -> (Vec<u8>, HashMap<usize, usize>)
where
    I: PrimInt + Send + Sync,
{
    let len = text.len();
    let mut bwt = vec![0u8; len];

    let num_threads = rayon::current_num_threads().max(1);
    let outer_chunk_size = len.div_ceil(num_threads * 4).max(1);

    bwt.par_chunks_mut(outer_chunk_size)
        .zip(suffix_array.par_chunks(outer_chunk_size))
        .for_each(|(bwt_chunk, sa_chunk)| {
            for (bwt_inner, sa_inner) in bwt_chunk
                .chunks_mut(INNER_CHUNK_SIZE)
                .zip(sa_chunk.chunks(INNER_CHUNK_SIZE))
            {
                for (b, &sa_value) in bwt_inner.iter_mut().zip(sa_inner) {
                    let sa_value: usize = NumCast::from(sa_value).unwrap();
                    *b = text[(sa_value + len - 1) % len];
                }
            }
        });

    let mut text_border_lookup = HashMap::new();
    for row in memchr::memchr_iter(0, &bwt) {
        let sa_value: usize = NumCast::from(suffix_array[row]).unwrap();
        text_border_lookup.insert(row, sa_value);
    }

    (bwt, text_border_lookup)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_sa(text: &[u8]) -> Vec<i32> {
        let mut sa: Vec<i32> = (0..text.len() as i32).collect();
        sa.sort_by_key(|&i| &text[i as usize..]);
        sa
    }

    #[test]
    fn matches_naive_bwt() {
        let text = b"banana\0".to_vec();
        let sa = naive_sa(&text);
        let (bwt, _) = bwt_from_suffix_array(&text, &sa);

        let expected: Vec<u8> = sa
            .iter()
            .map(|&i| text[(i as usize + text.len() - 1) % text.len()])
            .collect();
        assert_eq!(bwt, expected);
    }

    #[test]
    fn text_border_lookup_hits_every_sentinel() {
        let text = b"aa\0bb\0".to_vec();
        let sa = naive_sa(&text);
        let (_, lookup) = bwt_from_suffix_array(&text, &sa);
        assert_eq!(lookup.len(), 2);
    }
}
