use super::Bitvector;

const BLOCK_BITS: usize = 512;
const BLOCK_WORDS: usize = BLOCK_BITS / 64;
const SUPERBLOCK_BITS: usize = u16::MAX as usize + 1;

/// Dense bitvector with a two-level block/superblock popcount hierarchy.
///
/// Mirrors the counter layout `genedex::text_with_rank_support` uses per-symbol, specialized
/// to a single bit-plane: every [`SUPERBLOCK_BITS`] bits carries a running total in `u64`
/// (analogous to `interleaved_superblock_offsets`), and every [`BLOCK_BITS`] bits within a
/// superblock carries a `u16` offset from the superblock start (`interleaved_block_offsets`).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub struct FlatBitvector {
    len: usize,
    words: Vec<u64>,
    block_offsets: Vec<u16>,
    superblock_offsets: Vec<u64>,
}

impl Bitvector for FlatBitvector {
    fn from_bits(bits: impl Iterator<Item = bool>, len: usize) -> Self {
        let mut words = vec![0u64; len.div_ceil(64)];
        for (i, bit) in bits.enumerate() {
            if bit {
                words[i / 64] |= 1 << (i % 64);
            }
        }

        let num_blocks = len.div_ceil(BLOCK_BITS).max(1);
        let num_superblocks = len.div_ceil(SUPERBLOCK_BITS).max(1);
        let mut block_offsets = vec![0u16; num_blocks];
        let mut superblock_offsets = vec![0u64; num_superblocks];

        let mut running = 0u64;
        let mut block_running = 0u16;
        let mut current_superblock = 0;

        for block_index in 0..num_blocks {
            let superblock_index = (block_index * BLOCK_BITS) / SUPERBLOCK_BITS;
            if superblock_index != current_superblock {
                current_superblock = superblock_index;
                block_running = 0;
            }
            superblock_offsets[superblock_index] = running;
            block_offsets[block_index] = block_running;

            let word_start = block_index * BLOCK_WORDS;
            let word_end = (word_start + BLOCK_WORDS).min(words.len());
            let block_popcount: u32 = words[word_start..word_end]
                .iter()
                .map(|w| w.count_ones())
                .sum();

            running += block_popcount as u64;
            block_running += block_popcount as u16;
        }

        Self {
            len,
            words,
            block_offsets,
            superblock_offsets,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn symbol(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    fn rank(&self, index: usize) -> usize {
        debug_assert!(index <= self.len);
        if index == 0 {
            return 0;
        }

        let num_blocks = self.block_offsets.len();
        let num_superblocks = self.superblock_offsets.len();
        let block_index = (index / BLOCK_BITS).min(num_blocks - 1);
        let superblock_index = (index / SUPERBLOCK_BITS).min(num_superblocks - 1);

        let base = self.superblock_offsets[superblock_index] as usize
            + self.block_offsets[block_index] as usize;

        let word_start = block_index * BLOCK_WORDS;
        let bit_in_block = index - block_index * BLOCK_BITS;
        let full_words = bit_in_block / 64;
        let remaining_bits = bit_in_block % 64;

        let mut count = 0usize;
        for w in &self.words[word_start..word_start + full_words] {
            count += w.count_ones() as usize;
        }
        if remaining_bits > 0 {
            let mask = (1u64 << remaining_bits) - 1;
            count += (self.words[word_start + full_words] & mask).count_ones() as usize;
        }

        base + count
    }

    fn space_usage_bytes(&self) -> usize {
        std::mem::size_of_val(self.words.as_slice())
            + std::mem::size_of_val(self.block_offsets.as_slice())
            + std::mem::size_of_val(self.superblock_offsets.as_slice())
    }
}
