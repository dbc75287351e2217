use super::RankString;

const BLOCK_BITS: usize = 64;
const SUPERBLOCK_BITS: usize = u16::MAX as usize + 1;

fn ilog2_ceil(value: usize) -> u32 {
    if value.is_power_of_two() {
        value.ilog2()
    } else {
        value.ilog2() + 1
    }
}

/// Entropy-preserving-rank ("EPR") rank-string: one bit-plane per bit of the dense symbol,
/// interleaved so a single block access touches every plane for the same text block.
///
/// Grounded on `genedex::text_with_rank_support`'s interleaved-block layout: bit-planes for a
/// block are stored contiguously, and `rank` combines them with a masked bitwise-AND walk
/// (negating planes whose target bit is 0) rather than one popcount per plane.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub struct InterleavedRankString {
    len: usize,
    alphabet_size: usize,
    num_bits: u32,
    interleaved_blocks: Vec<u64>,
    block_offsets: Vec<u32>,
    superblock_offsets: Vec<u64>,
}

impl RankString for InterleavedRankString {
    fn construct(text: &[u8], alphabet_size: usize) -> Self {
        assert!(alphabet_size >= 2);
        let num_bits = ilog2_ceil(alphabet_size).max(1);
        let len = text.len();
        let num_blocks = len.div_ceil(BLOCK_BITS).max(1);
        let num_superblocks = len.div_ceil(SUPERBLOCK_BITS).max(1);

        let mut interleaved_blocks = vec![0u64; num_blocks * num_bits as usize];
        let mut block_offsets = vec![0u32; num_blocks * alphabet_size];
        let mut superblock_offsets = vec![0u64; num_superblocks * alphabet_size];

        let mut running = vec![0u64; alphabet_size];
        let mut block_running = vec![0u32; alphabet_size];
        let mut current_superblock = 0usize;

        for block_index in 0..num_blocks {
            let superblock_index = (block_index * BLOCK_BITS) / SUPERBLOCK_BITS;
            if superblock_index != current_superblock {
                current_superblock = superblock_index;
                block_running.iter_mut().for_each(|c| *c = 0);
            }
            superblock_offsets[superblock_index * alphabet_size..(superblock_index + 1) * alphabet_size]
                .copy_from_slice(&running);
            block_offsets[block_index * alphabet_size..(block_index + 1) * alphabet_size]
                .copy_from_slice(&block_running);

            let block_start = block_index * BLOCK_BITS;
            let block_end = (block_start + BLOCK_BITS).min(len);

            for (offset, &symbol) in text[block_start..block_end].iter().enumerate() {
                let symbol = symbol as usize;
                for p in 0..num_bits as usize {
                    if (symbol >> p) & 1 == 1 {
                        interleaved_blocks[block_index * num_bits as usize + p] |= 1u64 << offset;
                    }
                }
                running[symbol] += 1;
                block_running[symbol] += 1;
            }
        }

        Self {
            len,
            alphabet_size,
            num_bits,
            interleaved_blocks,
            block_offsets,
            superblock_offsets,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    fn symbol_at(&self, index: usize) -> u8 {
        let block = index / BLOCK_BITS;
        let r = index % BLOCK_BITS;
        let mut symbol = 0u8;
        for p in 0..self.num_bits as usize {
            let bit = (self.interleaved_blocks[block * self.num_bits as usize + p] >> r) & 1;
            symbol |= (bit as u8) << p;
        }
        symbol
    }

    fn rank(&self, index: usize, symbol: u8) -> usize {
        debug_assert!(index <= self.len);
        if index == 0 {
            return 0;
        }
        let symbol = symbol as usize;
        let num_blocks = self.block_offsets.len() / self.alphabet_size;
        let num_superblocks = self.superblock_offsets.len() / self.alphabet_size;

        let block = (index / BLOCK_BITS).min(num_blocks - 1);
        let superblock = (index / SUPERBLOCK_BITS).min(num_superblocks - 1);

        let base = self.superblock_offsets[superblock * self.alphabet_size + symbol] as usize
            + self.block_offsets[block * self.alphabet_size + symbol] as usize;

        let r = index - block * BLOCK_BITS;
        let mut accumulator = u64::MAX;
        for p in 0..self.num_bits as usize {
            let mut plane = self.interleaved_blocks[block * self.num_bits as usize + p];
            if (symbol >> p) & 1 == 0 {
                plane = !plane;
            }
            accumulator &= plane;
        }
        if r < BLOCK_BITS {
            accumulator &= (1u64 << r) - 1;
        }

        base + accumulator.count_ones() as usize
    }
}
