//! Static capacity tables for QR Code Model 2
//!
//! Everything is indexed by (EC level, version) and lives in read-only
//! arrays; derived values (raw module counts, block layouts) are computed
//! from them on demand.

use crate::models::{ECLevel, Mode, Version};

// Tables from the QR Code specification (Model 2).
// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// How a version/EC level splits its codewords into Reed-Solomon blocks.
///
/// Short blocks come first; long blocks carry one extra data codeword.
/// All blocks share the same EC length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// Total number of blocks
    pub num_blocks: usize,
    /// EC codewords in every block
    pub ecc_per_block: usize,
    /// Data + EC codewords in the whole symbol
    pub total_codewords: usize,
    /// Number of short blocks
    pub num_short_blocks: usize,
    /// Data codewords in a short block
    pub short_data_len: usize,
}

impl BlockLayout {
    /// Data codewords in the whole symbol
    pub fn data_codewords(&self) -> usize {
        self.total_codewords - self.num_blocks * self.ecc_per_block
    }

    /// Data codewords in block `index`
    pub fn data_len(&self, index: usize) -> usize {
        if index < self.num_short_blocks {
            self.short_data_len
        } else {
            self.short_data_len + 1
        }
    }

    /// Data codewords in the longest block
    pub fn max_data_len(&self) -> usize {
        if self.num_short_blocks == self.num_blocks {
            self.short_data_len
        } else {
            self.short_data_len + 1
        }
    }
}

/// Block layout for a version and EC level
pub fn block_layout(version: Version, ec_level: ECLevel) -> BlockLayout {
    let v = version.number() as usize;
    let idx = ec_level.ordinal();
    let num_blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][v] as usize;
    let ecc_per_block = ECC_CODEWORDS_PER_BLOCK[idx][v] as usize;
    let total_codewords = num_raw_data_modules(version) / 8;
    let num_short_blocks = num_blocks - total_codewords % num_blocks;
    let short_data_len = total_codewords / num_blocks - ecc_per_block;
    BlockLayout {
        num_blocks,
        ecc_per_block,
        total_codewords,
        num_short_blocks,
        short_data_len,
    }
}

/// Data codewords available for a version and EC level
pub fn data_codewords(version: Version, ec_level: ECLevel) -> usize {
    block_layout(version, ec_level).data_codewords()
}

/// Most characters of one mode that fit a version and EC level as a single segment
pub fn character_capacity(version: Version, ec_level: ECLevel, mode: Mode) -> usize {
    let count_bits = mode.char_count_bits(version);
    let Some(bits) = (data_codewords(version, ec_level) * 8).checked_sub(4 + count_bits) else {
        return 0;
    };
    let chars = match mode {
        Mode::Numeric => {
            let tail = match bits % 10 {
                7..=9 => 2,
                4..=6 => 1,
                _ => 0,
            };
            bits / 10 * 3 + tail
        }
        Mode::Alphanumeric => bits / 11 * 2 + usize::from(bits % 11 >= 6),
        Mode::Byte => bits / 8,
        Mode::Kanji => bits / 13,
        Mode::Eci => 0,
    };
    chars.min((1 << count_bits) - 1)
}

/// Modules left for data + EC after all function patterns are placed.
///
/// Includes remainder bits, so the result is not always a multiple of 8.
pub fn num_raw_data_modules(version: Version) -> usize {
    let v = version.number() as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_raw_modules() {
        assert_eq!(num_raw_data_modules(v(1)), 208);
        assert_eq!(num_raw_data_modules(v(2)), 359);
        assert_eq!(num_raw_data_modules(v(7)), 1568);
        assert_eq!(num_raw_data_modules(v(40)), 29648);
    }

    #[test]
    fn test_data_codewords() {
        assert_eq!(data_codewords(v(1), ECLevel::L), 19);
        assert_eq!(data_codewords(v(1), ECLevel::M), 16);
        assert_eq!(data_codewords(v(1), ECLevel::Q), 13);
        assert_eq!(data_codewords(v(1), ECLevel::H), 9);
        assert_eq!(data_codewords(v(40), ECLevel::L), 2956);
        assert_eq!(data_codewords(v(40), ECLevel::H), 1276);
    }

    #[test]
    fn test_character_capacity() {
        assert_eq!(character_capacity(v(40), ECLevel::L, Mode::Numeric), 7089);
        assert_eq!(character_capacity(v(40), ECLevel::L, Mode::Alphanumeric), 4296);
        assert_eq!(character_capacity(v(40), ECLevel::L, Mode::Byte), 2953);
        assert_eq!(character_capacity(v(40), ECLevel::L, Mode::Kanji), 1817);
        assert_eq!(character_capacity(v(1), ECLevel::H, Mode::Numeric), 17);
        assert_eq!(character_capacity(v(1), ECLevel::Q, Mode::Alphanumeric), 16);
        assert_eq!(character_capacity(v(1), ECLevel::M, Mode::Byte), 14);
    }

    #[test]
    fn test_block_layout_5q() {
        // 5-Q: 2 blocks of 15 data + 2 blocks of 16 data, 18 EC each
        let layout = block_layout(v(5), ECLevel::Q);
        assert_eq!(layout.num_blocks, 4);
        assert_eq!(layout.ecc_per_block, 18);
        assert_eq!(layout.num_short_blocks, 2);
        assert_eq!(layout.short_data_len, 15);
        assert_eq!(layout.data_len(0), 15);
        assert_eq!(layout.data_len(3), 16);
        assert_eq!(layout.data_codewords(), 62);
    }

    #[test]
    fn test_block_layouts_are_consistent() {
        for n in 1..=40 {
            for ec in ECLevel::ALL {
                let layout = block_layout(v(n), ec);
                let data: usize = (0..layout.num_blocks).map(|b| layout.data_len(b)).sum();
                assert_eq!(data, layout.data_codewords());
                assert_eq!(
                    data + layout.num_blocks * layout.ecc_per_block,
                    layout.total_codewords
                );
            }
        }
    }
}
