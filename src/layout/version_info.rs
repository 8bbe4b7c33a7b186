/// Version information blocks (versions 7 and up)
use crate::models::BitMatrix;

/// Write both 6x3 version blocks; bit `i` lands at (size - 11 + i % 3, i / 3)
/// and at its transpose
pub fn write_version_bits(matrix: &mut BitMatrix, bits: u32) {
    let size = matrix.width();
    for i in 0..18 {
        let bit = (bits >> i) & 1 != 0;
        let a = size - 11 + i % 3;
        let b = i / 3;
        matrix.set(a, b, bit);
        matrix.set(b, a, bit);
    }
}

/// Read both version blocks (top-right, bottom-left) as raw 18-bit words
pub fn read_version_bits(matrix: &BitMatrix) -> (u32, u32) {
    let size = matrix.width();
    let mut top_right = 0u32;
    let mut bottom_left = 0u32;
    for i in 0..18 {
        let a = size - 11 + i % 3;
        let b = i / 3;
        top_right |= (matrix.get(a, b) as u32) << i;
        bottom_left |= (matrix.get(b, a) as u32) << i;
    }
    (top_right, bottom_left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut matrix = BitMatrix::new(45, 45);
        write_version_bits(&mut matrix, 0x07C94);
        assert_eq!(read_version_bits(&matrix), (0x07C94, 0x07C94));
        // Bit 0 of version 7 is 0, bit 2 is 1
        assert!(!matrix.get(34, 0));
        assert!(matrix.get(36, 0));
        assert!(matrix.get(0, 36));
    }
}
