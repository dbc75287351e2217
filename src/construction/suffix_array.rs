//! Suffix array construction via the external `libsais` collaborator.
//!
//! Per the external-interfaces contract (§6), this module's only responsibility is to hand the
//! densely-encoded, sentinel-terminated text to the collaborator and trust its output: a
//! permutation `SA` of `[0, |T|)` such that `T[SA[i]..]` is lexicographically increasing in
//! `i`. Grounded on `genedex::construction::construct_libsais_suffix_array`.

use libsais::{SuffixArrayConstruction, ThreadCount};

/// `i64`-indexed variant, the only storage width `FmIndex::construct`/`BiFmIndex::construct`
/// use. `genedex` also offers `i32`/`u32`-indexed variants selected per text size (see
/// DESIGN.md C3); this crate does not carry that storage-width axis, so only the one variant
/// actually driving the build pipeline is kept.
pub fn construct_suffix_array_i64(text: &[u8]) -> Vec<i64> {
    let mut buffer = vec![0i64; text.len()];
    SuffixArrayConstruction::for_text(text)
        .in_borrowed_buffer(&mut buffer)
        .multi_threaded(ThreadCount::fixed(rayon::current_num_threads()))
        .run()
        .expect("libsais suffix array construction failed");
    buffer
}
