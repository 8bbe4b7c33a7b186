/// Format information placement around the finder patterns
use crate::models::BitMatrix;

/// Module (x, y) of format bit `i` (bit 0 = LSB) in the copy around the top-left finder
pub fn primary_position(i: usize) -> (usize, usize) {
    match i {
        0..=5 => (8, i),
        6 => (8, 7),
        7 => (8, 8),
        8 => (7, 8),
        _ => (14 - i, 8),
    }
}

/// Module (x, y) of format bit `i` in the copy split between the top-right
/// and bottom-left finders
pub fn secondary_position(i: usize, size: usize) -> (usize, usize) {
    if i < 8 {
        (size - 1 - i, 8)
    } else {
        (8, size - 15 + i)
    }
}

/// Module that is always dark, next to the bottom-left format strip
pub fn dark_module(size: usize) -> (usize, usize) {
    (8, size - 8)
}

/// Write both copies of a 15-bit format word plus the dark module
pub fn write_format_bits(matrix: &mut BitMatrix, bits: u16) {
    let size = matrix.width();
    for i in 0..15 {
        let bit = (bits >> i) & 1 != 0;
        let (x, y) = primary_position(i);
        matrix.set(x, y, bit);
        let (x, y) = secondary_position(i, size);
        matrix.set(x, y, bit);
    }
    let (x, y) = dark_module(size);
    matrix.set(x, y, true);
}

/// Read both format copies as raw 15-bit words (primary, secondary)
pub fn read_format_bits(matrix: &BitMatrix) -> (u16, u16) {
    let size = matrix.width();
    let mut primary = 0u16;
    let mut secondary = 0u16;
    for i in 0..15 {
        let (x, y) = primary_position(i);
        primary |= (matrix.get(x, y) as u16) << i;
        let (x, y) = secondary_position(i, size);
        secondary |= (matrix.get(x, y) as u16) << i;
    }
    (primary, secondary)
}
