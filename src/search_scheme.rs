//! Search schemes: pre-expanded lists of `(pi, lower, upper)` triples describing how a query is
//! partitioned and which edit-distance bound applies once each partition boundary is crossed.
//!
//! The *shapes* that generate search schemes (Pigeonhole, Kucherov, H2, Kianfar, ...) are out of
//! scope for this crate (§1, Non-goals); only the expanded scheme itself is consumed here.

/// One part of a search scheme: `pi` is the 0-based index into the query that this part visits
/// (in traversal order), `lower`/`upper` are the inclusive error-count bounds that must hold
/// once this part has been visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemePart {
    pub pi: usize,
    pub lower: u32,
    pub upper: u32,
}

/// A single search scheme: an ordered list of query positions to visit plus the running
/// error-bound envelope, grounded on the `(l, u)` arrays threaded through
/// `fmindex-collection`'s `SearchNg21V2::Search`.
#[derive(Debug, Clone)]
pub struct SearchScheme {
    parts: Vec<SchemePart>,
}

impl SearchScheme {
    pub fn new(parts: Vec<SchemePart>) -> Self {
        assert!(!parts.is_empty(), "a search scheme must visit at least one position");
        Self { parts }
    }

    /// The trivial single-part scheme for exact search with at most `max_errors` errors,
    /// visiting the query left to right.
    pub fn unpartitioned(query_len: usize, max_errors: u32) -> Self {
        let parts = (0..query_len)
            .map(|pi| SchemePart {
                pi,
                lower: 0,
                upper: max_errors,
            })
            .collect();
        Self::new(parts)
    }

    /// Pigeonhole-style 2-partition scheme for 1 substitution: the query is split into a front
    /// half (exact match required) and back half (up to 1 error allowed), or vice versa,
    /// unioned by the caller — this constructs exactly one of the two halves-first traversals.
    pub fn pigeonhole_one_error(query_len: usize, exact_prefix_len: usize) -> Self {
        let mut parts = Vec::with_capacity(query_len);
        for pi in 0..exact_prefix_len {
            parts.push(SchemePart { pi, lower: 0, upper: 0 });
        }
        for pi in exact_prefix_len..query_len {
            parts.push(SchemePart { pi, lower: 0, upper: 1 });
        }
        Self::new(parts)
    }

    pub fn parts(&self) -> &[SchemePart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn max_errors(&self) -> u32 {
        self.parts.iter().map(|p| p.upper).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpartitioned_visits_every_position_in_order() {
        let scheme = SearchScheme::unpartitioned(4, 1);
        let pis: Vec<_> = scheme.parts().iter().map(|p| p.pi).collect();
        assert_eq!(pis, vec![0, 1, 2, 3]);
        assert_eq!(scheme.max_errors(), 1);
    }

    #[test]
    fn pigeonhole_splits_into_exact_then_approximate() {
        let scheme = SearchScheme::pigeonhole_one_error(6, 3);
        assert!(scheme.parts()[..3].iter().all(|p| p.upper == 0));
        assert!(scheme.parts()[3..].iter().all(|p| p.upper == 1));
    }
}
