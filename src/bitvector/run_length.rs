use super::{Bitvector, FlatBitvector};

/// Collapses runs of length >= 2 of identical bits, named `RBBitvector` in the design notes
/// this crate follows. A `run_starts` bitvector marks every run boundary (needed to locate which
/// run a position belongs to), but the per-run (start position, ones-count-prefix) pair is only
/// stored for runs of length >= 2; a singleton run's position and prefix are derived
/// arithmetically from the nearest preceding stored run instead, since a singleton's value is
/// already fully determined by its run index's parity. Lossless; supports the same [`Bitvector`]
/// API as [`super::FlatBitvector`] and [`super::SparseBitvector`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub struct RunLengthBitvector {
    len: usize,
    run_starts: FlatBitvector,
    first_run_value: bool,
    num_runs: usize,
    // marks, per run index, whether that run has length >= 2
    long_run_marker: FlatBitvector,
    // the remaining fields are parallel arrays over long runs only, in run-index order
    long_run_indices: Vec<u32>,
    long_run_start_positions: Vec<u32>,
    long_run_one_count_prefix: Vec<u32>,
    long_run_lengths: Vec<u32>,
}

struct RunMeta {
    start: usize,
    length: usize,
    ones_prefix: u32,
}

impl Bitvector for RunLengthBitvector {
    fn from_bits(bits: impl Iterator<Item = bool>, len: usize) -> Self {
        let bits: Vec<bool> = bits.collect();
        debug_assert_eq!(bits.len(), len);

        let mut run_start_bits = vec![false; len];
        let first_run_value = bits.first().copied().unwrap_or(false);

        let mut runs: Vec<RunMeta> = Vec::new();
        let mut ones_so_far = 0u32;
        let mut previous: Option<bool> = None;

        for (i, &bit) in bits.iter().enumerate() {
            if previous != Some(bit) {
                run_start_bits[i] = true;
                runs.push(RunMeta {
                    start: i,
                    length: 0,
                    ones_prefix: ones_so_far,
                });
                previous = Some(bit);
            }
            runs.last_mut().unwrap().length += 1;
            if bit {
                ones_so_far += 1;
            }
        }

        let num_runs = runs.len();
        let mut long_run_marker_bits = vec![false; num_runs];
        let mut long_run_indices = Vec::new();
        let mut long_run_start_positions = Vec::new();
        let mut long_run_one_count_prefix = Vec::new();
        let mut long_run_lengths = Vec::new();

        for (run_index, run) in runs.iter().enumerate() {
            if run.length >= 2 {
                long_run_marker_bits[run_index] = true;
                long_run_indices.push(run_index as u32);
                long_run_start_positions.push(run.start as u32);
                long_run_one_count_prefix.push(run.ones_prefix);
                long_run_lengths.push(run.length as u32);
            }
        }

        Self {
            len,
            run_starts: FlatBitvector::from_bits(run_start_bits.into_iter(), len),
            first_run_value,
            num_runs,
            long_run_marker: FlatBitvector::from_bits(long_run_marker_bits.into_iter(), num_runs),
            long_run_indices,
            long_run_start_positions,
            long_run_one_count_prefix,
            long_run_lengths,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn symbol(&self, index: usize) -> bool {
        let run_index = self.run_starts.rank(index + 1) - 1;
        self.run_value(run_index)
    }

    fn rank(&self, index: usize) -> usize {
        if index == 0 {
            return 0;
        }
        let run_index = self.run_starts.rank(index) - 1;
        let (run_start, base) = self.locate_run(run_index);
        let tail_len = index - run_start;
        base + if self.run_value(run_index) { tail_len } else { 0 }
    }

    fn space_usage_bytes(&self) -> usize {
        self.run_starts.space_usage_bytes()
            + self.long_run_marker.space_usage_bytes()
            + std::mem::size_of_val(self.long_run_indices.as_slice())
            + std::mem::size_of_val(self.long_run_start_positions.as_slice())
            + std::mem::size_of_val(self.long_run_one_count_prefix.as_slice())
            + std::mem::size_of_val(self.long_run_lengths.as_slice())
    }
}

impl RunLengthBitvector {
    fn run_value(&self, run_index: usize) -> bool {
        if run_index % 2 == 0 {
            self.first_run_value
        } else {
            !self.first_run_value
        }
    }

    /// Returns `(start_position, ones_count_before_start)` for `run_index`. Long runs have this
    /// stored directly; a singleton run derives it from the nearest preceding long run (or from
    /// the start of the bitvector, if none precedes it), since the intervening runs are
    /// guaranteed to all be singletons of known, parity-determined value.
    fn locate_run(&self, run_index: usize) -> (usize, usize) {
        let long_count = self.long_run_marker.rank(run_index + 1);

        if long_count == 0 {
            let ones = Self::count_true_in_singleton_range(0, run_index, self.first_run_value);
            return (run_index, ones);
        }

        let k = long_count - 1;
        if self.long_run_indices[k] as usize == run_index {
            return (
                self.long_run_start_positions[k] as usize,
                self.long_run_one_count_prefix[k] as usize,
            );
        }

        let anchor_index = self.long_run_indices[k] as usize;
        let anchor_position = self.long_run_start_positions[k] as usize;
        let anchor_length = self.long_run_lengths[k] as usize;
        let anchor_base = self.long_run_one_count_prefix[k] as usize;
        let anchor_ones = if self.run_value(anchor_index) {
            anchor_length
        } else {
            0
        };

        let gap = run_index - anchor_index - 1;
        let ones_in_gap =
            Self::count_true_in_singleton_range(anchor_index + 1, gap, self.first_run_value);

        (
            anchor_position + anchor_length + gap,
            anchor_base + anchor_ones + ones_in_gap,
        )
    }

    /// Among `count` consecutive singleton (length-1) runs starting at run index `start`, how
    /// many have value `true`. A run's value alternates strictly by parity (`first_run_value` at
    /// even run indices), so the count has a closed form rather than needing a scan.
    fn count_true_in_singleton_range(start: usize, count: usize, first_run_value: bool) -> usize {
        if count == 0 {
            return 0;
        }
        let full_pairs = count / 2;
        let remainder = count % 2;
        let start_even = start % 2 == 0;
        let evens = full_pairs + usize::from(remainder == 1 && start_even);
        if first_run_value { evens } else { count - evens }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn naive_rank(bits: &[bool], index: usize) -> usize {
        bits[..index].iter().filter(|&&b| b).count()
    }

    #[test]
    fn singleton_runs_store_no_side_table_entry() {
        // alternating bits: every run has length 1.
        let bits = [true, false, true, false, true, false, true];
        let bv = RunLengthBitvector::from_bits(bits.iter().copied(), bits.len());
        assert_eq!(bv.num_runs, bits.len());
        assert!(bv.long_run_indices.is_empty());
        assert!(bv.long_run_start_positions.is_empty());

        for i in 0..=bits.len() {
            assert_eq!(bv.rank(i), naive_rank(&bits, i), "mismatch at {i}");
        }
    }

    #[test]
    fn mixed_singleton_and_long_runs() {
        // runs: [1,1,1] [0] [1] [0,0,0,0] [1,1] [0]
        let bits = [
            true, true, true, false, true, false, false, false, false, true, true, false,
        ];
        let bv = RunLengthBitvector::from_bits(bits.iter().copied(), bits.len());
        assert_eq!(bv.num_runs, 6);
        // two singleton runs (the lone `0` and the lone `1`) should cost no side-table entry
        assert_eq!(bv.long_run_indices.len(), 4);

        for i in 0..=bits.len() {
            assert_eq!(bv.rank(i), naive_rank(&bits, i), "mismatch at {i}");
            if i < bits.len() {
                assert_eq!(bv.symbol(i), bits[i], "symbol mismatch at {i}");
            }
        }
    }

    proptest! {
        #[test]
        fn run_length_matches_naive(bits in prop::collection::vec(any::<bool>(), 0..200)) {
            let bv = RunLengthBitvector::from_bits(bits.iter().copied(), bits.len());
            for i in 0..=bits.len() {
                prop_assert_eq!(bv.rank(i), naive_rank(&bits, i));
            }
            for i in 0..bits.len() {
                prop_assert_eq!(bv.symbol(i), bits[i]);
            }
        }
    }
}
