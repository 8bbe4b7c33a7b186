/// Function patterns, block interleaving and codeword placement
use crate::ecc::ReedSolomonEncoder;
use crate::ecc::bch::Bch;
use crate::layout::{FunctionMask, Zigzag, alignment_pattern_centers, format, version_info};
use crate::models::{BitMatrix, Version};
use crate::tables::BlockLayout;

/// Draw finders, separators, timing, alignment, dark module and version info.
///
/// Format modules are left light; they are written once the mask is known.
pub fn draw_function_patterns(version: Version) -> BitMatrix {
    let size = version.size();
    let mut matrix = BitMatrix::new(size, size);

    for i in 0..size {
        matrix.set(6, i, i % 2 == 0);
        matrix.set(i, 6, i % 2 == 0);
    }

    draw_finder(&mut matrix, 3, 3);
    draw_finder(&mut matrix, size - 4, 3);
    draw_finder(&mut matrix, 3, size - 4);

    for (cx, cy) in alignment_pattern_centers(version) {
        for y in cy - 2..=cy + 2 {
            for x in cx - 2..=cx + 2 {
                let ring = x.abs_diff(cx).max(y.abs_diff(cy));
                matrix.set(x, y, ring != 1);
            }
        }
    }

    let (x, y) = format::dark_module(size);
    matrix.set(x, y, true);

    if version.number() >= 7 {
        version_info::write_version_bits(&mut matrix, Bch::encode_version(version.number()));
    }

    matrix
}

/// 7x7 finder centred at (cx, cy) plus its light separator ring
fn draw_finder(matrix: &mut BitMatrix, cx: usize, cy: usize) {
    let size = matrix.width();
    for y in cy.saturating_sub(4)..=(cy + 4).min(size - 1) {
        for x in cx.saturating_sub(4)..=(cx + 4).min(size - 1) {
            let ring = x.abs_diff(cx).max(y.abs_diff(cy));
            matrix.set(x, y, ring != 2 && ring != 4);
        }
    }
}

/// Split data codewords into blocks, append Reed-Solomon EC to each and
/// interleave: data columns first, then EC columns.
pub fn interleave(data: &[u8], layout: &BlockLayout) -> Vec<u8> {
    debug_assert_eq!(data.len(), layout.data_codewords());
    let rs = ReedSolomonEncoder::new(layout.ecc_per_block);

    let mut blocks = Vec::with_capacity(layout.num_blocks);
    let mut offset = 0;
    for b in 0..layout.num_blocks {
        let len = layout.data_len(b);
        let block = &data[offset..offset + len];
        blocks.push((block, rs.encode(block)));
        offset += len;
    }

    let mut out = Vec::with_capacity(layout.total_codewords);
    for i in 0..layout.max_data_len() {
        for (block, _) in &blocks {
            if let Some(&cw) = block.get(i) {
                out.push(cw);
            }
        }
    }
    for i in 0..layout.ecc_per_block {
        for (_, ecc) in &blocks {
            out.push(ecc[i]);
        }
    }
    out
}

/// Write codeword bits MSB first along the zigzag; remainder modules stay light
pub fn place_codewords(matrix: &mut BitMatrix, func: &FunctionMask, codewords: &[u8]) {
    let total_bits = codewords.len() * 8;
    for (i, (x, y)) in Zigzag::new(func).enumerate() {
        let bit = i < total_bits && (codewords[i / 8] >> (7 - i % 8)) & 1 != 0;
        matrix.set(x, y, bit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ECLevel;
    use crate::tables::block_layout;

    #[test]
    fn test_finder_and_timing_v1() {
        let matrix = draw_function_patterns(Version::MIN);
        // Top row of the top-left finder is dark, separator is light
        for x in 0..7 {
            assert!(matrix.get(x, 0));
        }
        assert!(!matrix.get(7, 0));
        assert!(!matrix.get(1, 1));
        assert!(matrix.get(2, 2));
        // Timing alternates starting dark
        assert!(matrix.get(8, 6));
        assert!(!matrix.get(9, 6));
        assert!(matrix.get(10, 6));
        // Dark module
        assert!(matrix.get(8, 13));
    }

    #[test]
    fn test_alignment_pattern_v2() {
        let matrix = draw_function_patterns(Version::new(2).unwrap());
        assert!(matrix.get(18, 18));
        assert!(!matrix.get(17, 18));
        assert!(!matrix.get(19, 17));
        assert!(matrix.get(16, 16));
        assert!(matrix.get(20, 18));
    }

    #[test]
    fn test_interleave_two_blocks() {
        // 5-Q: blocks of 15, 15, 16, 16 data codewords
        let layout = block_layout(Version::new(5).unwrap(), ECLevel::Q);
        let data: Vec<u8> = (0..62).collect();
        let out = interleave(&data, &layout);
        assert_eq!(out.len(), layout.total_codewords);
        assert_eq!(&out[..8], &[0, 15, 30, 46, 1, 16, 31, 47]);
        // Last data column only has the two long blocks
        assert_eq!(&out[60..62], &[45, 61]);
    }
}
