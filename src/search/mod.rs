//! Search-scheme driven approximate search.
//!
//! Two traversal modes over the same [`crate::bi_fm_index::BiFmIndex`] cursor algebra:
//!
//! - [`backtracking`] (Mode A): branch-enumeration following the search scheme's per-part
//!   error envelope, grounded on `fmindex-collection`'s `search_ng21V2::Search` state machine.
//! - [`banded`] (Mode B): banded dynamic-programming pruning of the same cursor tree, grounded
//!   on the general edit-distance DP-band technique used throughout that collection's
//!   `SearchNg1*` family, specialized here to stop expanding a branch as soon as every live DP
//!   diagonal exceeds the scheme's error bound for the current column.

pub mod backtracking;
pub mod banded;

use crate::fm_index::Hit;

/// One approximate match: the matched interval's locations plus how many errors it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproxHit {
    pub hits: Vec<Hit>,
    pub errors: u32,
}

/// Controls how much of the search tree is explored once matches are found.
#[derive(Debug, Clone, Copy)]
pub enum HitPolicy {
    /// Explore the whole scheme-bounded tree and report every hit.
    All,
    /// Stop as soon as any hit is found (best-hit semantics: lowest-error hit reachable first
    /// in the deterministic child-visitation order is not guaranteed globally optimal, only
    /// locally first — callers wanting guaranteed-best should use `All` and pick the minimum).
    FirstHit,
    /// Stop after `n` hits have been reported.
    BestN(usize),
}
