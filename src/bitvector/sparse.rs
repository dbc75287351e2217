use super::{Bitvector, FlatBitvector};

/// Marker + payload bitvector for mostly-0 data, named `SparseBLE` in the design notes this
/// crate follows (`B`it vector of `L`ong `E`mpty runs): a "marker" bitvector flags every
/// position at which the run value changes, and a much shorter payload bitvector stores one
/// bit per run. `rank` on the sparse bitvector is one marker rank (locating the run) plus a
/// conditional payload lookup.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub struct SparseBitvector {
    len: usize,
    marker: FlatBitvector,
    // payload[k] = value of the k-th run (runs alternate 0/1 starting from whatever the first
    // run's value is, recorded separately)
    first_run_value: bool,
    num_runs: usize,
    run_starts: Vec<u32>,
    // number of 1-bits preceding the start of each run
    run_one_count_prefix: Vec<u32>,
}

impl Bitvector for SparseBitvector {
    fn from_bits(bits: impl Iterator<Item = bool>, len: usize) -> Self {
        let bits: Vec<bool> = bits.collect();
        debug_assert_eq!(bits.len(), len);

        let mut marker_bits = vec![false; len];
        let mut run_starts = Vec::new();
        let mut run_one_count_prefix = Vec::new();
        let mut ones_so_far = 0u32;
        let first_run_value = bits.first().copied().unwrap_or(false);

        let mut previous = None;
        for (i, &bit) in bits.iter().enumerate() {
            if previous != Some(bit) {
                marker_bits[i] = true;
                run_starts.push(i as u32);
                run_one_count_prefix.push(ones_so_far);
                previous = Some(bit);
            }
            if bit {
                ones_so_far += 1;
            }
        }

        let num_runs = run_one_count_prefix.len();

        Self {
            len,
            marker: FlatBitvector::from_bits(marker_bits.into_iter(), len),
            first_run_value,
            num_runs,
            run_starts,
            run_one_count_prefix,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn symbol(&self, index: usize) -> bool {
        let run_index = self.marker.rank(index + 1) - 1;
        self.run_value(run_index)
    }

    fn rank(&self, index: usize) -> usize {
        if index == 0 {
            return 0;
        }
        let run_index = self.marker.rank(index) - 1;
        let run_start = self.run_start(run_index);
        let base = self.run_one_count_prefix[run_index] as usize;
        let tail_len = index - run_start;
        base + if self.run_value(run_index) { tail_len } else { 0 }
    }

    fn space_usage_bytes(&self) -> usize {
        self.marker.space_usage_bytes()
            + std::mem::size_of_val(self.run_starts.as_slice())
            + std::mem::size_of_val(self.run_one_count_prefix.as_slice())
    }
}

impl SparseBitvector {
    fn run_value(&self, run_index: usize) -> bool {
        if run_index % 2 == 0 {
            self.first_run_value
        } else {
            !self.first_run_value
        }
    }

    fn run_start(&self, run_index: usize) -> usize {
        if self.num_runs == 0 {
            return 0;
        }
        self.run_starts[run_index] as usize
    }
}
