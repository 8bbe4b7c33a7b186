/// Mask application; XOR is its own inverse so the same call masks and unmasks
use super::FunctionMask;
use crate::models::{BitMatrix, MaskPattern};

/// Toggle every data module selected by `mask_pattern`
pub fn apply_mask(matrix: &mut BitMatrix, mask_pattern: MaskPattern, func: &FunctionMask) {
    let size = func.size();
    for y in 0..size {
        for x in 0..size {
            if !func.is_function(x, y) && mask_pattern.is_masked(y, x) {
                matrix.toggle(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Version;

    #[test]
    fn test_apply_mask() {
        let mut matrix = BitMatrix::new(21, 21);
        matrix.set(10, 10, true);
        matrix.set(10, 11, true);

        let func = FunctionMask::new(Version::MIN);
        apply_mask(&mut matrix, MaskPattern::Pattern0, &func);

        // Pattern0: (i + j) % 2 == 0
        assert!(!matrix.get(10, 10));
        assert!(matrix.get(10, 11));
        assert!(matrix.get(11, 11));
        // Function modules are never touched
        assert!(!matrix.get(0, 0));
    }

    #[test]
    fn test_apply_twice_is_identity() {
        let func = FunctionMask::new(Version::new(3).unwrap());
        let mut matrix = BitMatrix::new(29, 29);
        matrix.set(12, 20, true);
        let original = matrix.clone();
        for mask in MaskPattern::ALL {
            apply_mask(&mut matrix, mask, &func);
            apply_mask(&mut matrix, mask, &func);
            assert_eq!(matrix, original);
        }
    }
}
