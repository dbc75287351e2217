//! Mode A: branch-enumeration backtracking search, grounded on
//! `fmindex-collection::search_ng21V2::Search`'s `LInfo`/`RInfo` state machine (ported from C++
//! compile-time template parameters to a runtime enum, since Rust const generics over an
//! open-ended small enum bring no benefit here).

use super::{ApproxHit, HitPolicy};
use crate::bi_fm_index::{BiFmIndex, BiInterval};
use crate::rank_string::RankString;
use crate::search_scheme::SearchScheme;

/// The edit operation that produced the current end of a pattern side, constraining which
/// operation is allowed next: deletions may not directly follow an insertion or substitution,
/// and insertions may not directly follow a deletion or substitution (the "no two consecutive
/// inverse-kind operations" rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpKind {
    Match,
    Insertion,
    Deletion,
    Substitution,
}

struct Context<'a, 'q, R: RankString, F: FnMut(BiInterval, u32) -> bool> {
    index: &'a BiFmIndex<R>,
    parts: &'q [crate::search_scheme::SchemePart],
    query: &'q [u8],
    alphabet_size: usize,
    on_hit: F,
}

/// Runs the backtracking search over `query` (already translated to dense symbols) according
/// to `scheme`. `on_hit` is called for every matched interval within the scheme's error
/// envelope; return `false` from it to stop the search early (used to implement
/// [`HitPolicy::FirstHit`] / [`HitPolicy::BestN`] without allocating the full hit list first).
pub fn search<R: RankString>(
    index: &BiFmIndex<R>,
    query: &[u8],
    scheme: &SearchScheme,
    policy: HitPolicy,
) -> Vec<ApproxHit> {
    let mut results = Vec::new();
    let mut remaining_best_n = match policy {
        HitPolicy::BestN(n) => n,
        _ => usize::MAX,
    };
    let first_hit_only = matches!(policy, HitPolicy::FirstHit);

    {
        let mut ctx = Context {
            index,
            parts: scheme.parts(),
            query,
            alphabet_size: index.alphabet().size(),
            on_hit: |interval: BiInterval, errors: u32| -> bool {
                results.push(ApproxHit {
                    hits: index.locate(interval),
                    errors,
                });
                if first_hit_only {
                    return false;
                }
                if remaining_best_n != usize::MAX {
                    remaining_best_n -= 1;
                    return remaining_best_n > 0;
                }
                true
            },
        };

        if !ctx.parts.is_empty() {
            search_next(
                &mut ctx,
                index.full_interval(),
                0,
                0,
                0,
                OpKind::Match,
                OpKind::Match,
            );
        }
    }

    results
}

#[allow(clippy::too_many_arguments)]
fn search_next<R: RankString, F: FnMut(BiInterval, u32) -> bool>(
    ctx: &mut Context<R, F>,
    interval: BiInterval,
    errors: u32,
    part_index: usize,
    last_symbol: u8,
    l_info: OpKind,
    r_info: OpKind,
) -> bool {
    if interval.is_empty() {
        return true;
    }

    if part_index == ctx.parts.len() {
        let left_ok = matches!(l_info, OpKind::Match | OpKind::Insertion);
        let right_ok = matches!(r_info, OpKind::Match | OpKind::Insertion);
        if left_ok && right_ok {
            return (ctx.on_hit)(interval, errors);
        }
        return true;
    }

    let go_right =
        part_index == 0 || ctx.parts[part_index].pi > ctx.parts[part_index - 1].pi;

    search_next_dir(
        ctx,
        interval,
        errors,
        part_index,
        last_symbol,
        l_info,
        r_info,
        go_right,
    )
}

#[allow(clippy::too_many_arguments)]
fn search_next_dir<R: RankString, F: FnMut(BiInterval, u32) -> bool>(
    ctx: &mut Context<R, F>,
    interval: BiInterval,
    errors: u32,
    part_index: usize,
    last_symbol: u8,
    l_info: OpKind,
    r_info: OpKind,
    go_right: bool,
) -> bool {
    let t_info = if go_right { r_info } else { l_info };
    let deletion_allowed = matches!(t_info, OpKind::Match | OpKind::Deletion);
    let insertion_allowed = matches!(t_info, OpKind::Match | OpKind::Insertion);

    let part = ctx.parts[part_index];
    let symbol = ctx.query[part.pi];

    // Mirrors `SearchNg21V2.h`'s `matchAllowed`: besides the error-window check, an insertion
    // immediately followed by a match on the same symbol it inserted, or a deletion immediately
    // followed by a match on the symbol it deleted, reconverges on an alignment already reached
    // by a cheaper path and must be suppressed, or the same interval gets reported twice.
    let match_allowed = part.lower <= errors
        && errors <= part.upper
        && (t_info != OpKind::Insertion || symbol != ctx.query[ctx.parts[part_index - 1].pi])
        && (t_info != OpKind::Deletion || symbol != last_symbol);
    let mismatch_allowed = part.lower <= errors + 1 && errors + 1 <= part.upper;

    let (on_match_l, on_match_r) = if go_right {
        (l_info, OpKind::Match)
    } else {
        (OpKind::Match, r_info)
    };
    let (on_sub_l, on_sub_r) = if go_right {
        (l_info, OpKind::Substitution)
    } else {
        (OpKind::Substitution, r_info)
    };
    let (on_del_l, on_del_r) = if go_right {
        (l_info, OpKind::Deletion)
    } else {
        (OpKind::Deletion, r_info)
    };
    let (on_ins_l, on_ins_r) = if go_right {
        (l_info, OpKind::Insertion)
    } else {
        (OpKind::Insertion, r_info)
    };

    if mismatch_allowed {
        let children = if go_right {
            ctx.index.extend_right_all(interval)
        } else {
            ctx.index.extend_left_all(interval)
        };

        if match_allowed {
            let new_interval = children[symbol as usize];
            if !search_next(
                ctx,
                new_interval,
                errors,
                part_index + 1,
                symbol,
                on_match_l,
                on_match_r,
            ) {
                return false;
            }
        }

        // Dense symbol 0 is the reserved sentinel (see `Alphabet::from_ambiguous_io_symbols`),
        // never a real alignment symbol, so the alternate-symbol sweep skips it by starting at
        // 1 and splitting around `symbol` rather than scanning the whole alphabet and excluding
        // just the matched symbol.
        for s in 1..symbol as usize {
            let new_interval = children[s];

            if deletion_allowed
                && !search_next(
                    ctx,
                    new_interval,
                    errors + 1,
                    part_index,
                    s as u8,
                    on_del_l,
                    on_del_r,
                )
            {
                return false;
            }
            if !search_next(
                ctx,
                new_interval,
                errors + 1,
                part_index + 1,
                s as u8,
                on_sub_l,
                on_sub_r,
            ) {
                return false;
            }
        }

        for s in (symbol as usize + 1)..ctx.alphabet_size {
            let new_interval = children[s];

            if deletion_allowed
                && !search_next(
                    ctx,
                    new_interval,
                    errors + 1,
                    part_index,
                    s as u8,
                    on_del_l,
                    on_del_r,
                )
            {
                return false;
            }
            if !search_next(
                ctx,
                new_interval,
                errors + 1,
                part_index + 1,
                s as u8,
                on_sub_l,
                on_sub_r,
            ) {
                return false;
            }
        }

        if insertion_allowed
            && !search_next(
                ctx,
                interval,
                errors + 1,
                part_index + 1,
                last_symbol,
                on_ins_l,
                on_ins_r,
            )
        {
            return false;
        }

        true
    } else if match_allowed {
        let new_interval = if go_right {
            ctx.index.extend_right(interval, symbol)
        } else {
            ctx.index.extend_left(interval, symbol)
        };
        search_next(
            ctx,
            new_interval,
            errors,
            part_index + 1,
            symbol,
            on_match_l,
            on_match_r,
        )
    } else {
        true
    }
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
    fn exact_scheme_matches_exact_locate() {
        let alphabet = alphabet::ascii_dna();
        let index = BiFmIndex::<InterleavedRankString>::construct(
            &[b"acgtacgtacgt"],
            alphabet.clone(),
            BuildOptions::default(),
        )
        .unwrap();

        let query = dense(&alphabet, b"acgt");
        let scheme = SearchScheme::unpartitioned(query.len(), 0);
        let results = search(&index, &query, &scheme, HitPolicy::All);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].errors, 0);
        assert_eq!(results[0].hits.len(), index.locate_pattern(b"acgt").len());
    }

    #[test]
    fn one_substitution_scheme_finds_near_matches() {
        let alphabet = alphabet::ascii_dna();
        // "acgtacgtacgt" contains "acgt" exactly, and "acAt" is one substitution away
        let index = BiFmIndex::<InterleavedRankString>::construct(
            &[b"acgtacAtacgt"],
            alphabet.clone(),
            BuildOptions::default(),
        )
        .unwrap();

        let query = dense(&alphabet, b"acgt");
        // pigeonhole: split into 2 halves, one exact + one with <=1 error
        let scheme = SearchScheme::pigeonhole_one_error(query.len(), query.len() / 2);
        let results = search(&index, &query, &scheme, HitPolicy::All);

        let total_hits: usize = results.iter().map(|h| h.hits.len()).sum();
        assert!(total_hits >= 2, "expected exact hit plus the 1-substitution hit, got {results:?}");
        assert!(results.iter().any(|h| h.errors == 1));
    }
}
