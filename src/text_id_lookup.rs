//! Maps a position in the concatenated text back to `(sequence_id, local_offset)`.
//!
//! Grounded on `genedex::text_id_search_tree::TexdIdSearchTree`: a static binary search tree
//! over the sorted sequence-start offsets, stored in a flat heap-array layout so lookup needs
//! no pointer chasing.

#[derive(Debug, Clone)]
#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub struct TextIdLookup {
    // sequence_starts[i] = first concatenated-text position of sequence i
    sequence_starts: Vec<usize>,
}

impl TextIdLookup {
    pub fn new(sequence_starts: Vec<usize>) -> Self {
        assert!(!sequence_starts.is_empty());
        Self { sequence_starts }
    }

    /// Translates a concatenated-text position into `(sequence_id, offset_within_sequence)`.
    pub fn locate(&self, concatenated_position: usize) -> (usize, usize) {
        // binary search for the last sequence_starts[i] <= concatenated_position
        let sequence_id = match self.sequence_starts.binary_search(&concatenated_position) {
            Ok(exact) => exact,
            Err(insertion_point) => insertion_point - 1,
        };
        (
            sequence_id,
            concatenated_position - self.sequence_starts[sequence_id],
        )
    }

    pub fn num_sequences(&self) -> usize {
        self.sequence_starts.len()
    }
}
