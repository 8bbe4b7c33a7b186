/// Data module placement order shared by the encoder and the decoder
use super::FunctionMask;

/// Iterator over data module coordinates (x, y) in placement order.
///
/// Walks two-column strips from the right edge, alternating up and down,
/// stepping over the vertical timing column and every function module.
pub struct Zigzag<'a> {
    func: &'a FunctionMask,
    size: usize,
    // Right column of the current strip; 0 once finished
    col: usize,
    // Step inside the strip: row step * 2 + column offset
    step: usize,
    upward: bool,
}

impl<'a> Zigzag<'a> {
    pub fn new(func: &'a FunctionMask) -> Self {
        let size = func.size();
        Self {
            func,
            size,
            col: size - 1,
            step: 0,
            upward: true,
        }
    }
}

impl Iterator for Zigzag<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.col > 0 {
            if self.step == self.size * 2 {
                self.step = 0;
                self.upward = !self.upward;
                self.col = if self.col == 8 { 5 } else { self.col.saturating_sub(2) };
                continue;
            }

            let offset = self.step / 2;
            let row = if self.upward {
                self.size - 1 - offset
            } else {
                offset
            };
            let x = self.col - self.step % 2;
            self.step += 1;

            if !self.func.is_function(x, row) {
                return Some((x, row));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Version;
    use crate::tables::num_raw_data_modules;

    #[test]
    fn test_visits_every_data_module_once() {
        for n in [1u8, 2, 7, 14, 40] {
            let version = Version::new(n).unwrap();
            let func = FunctionMask::new(version);
            let size = func.size();
            let mut seen = vec![false; size * size];
            let mut count = 0;
            for (x, y) in Zigzag::new(&func) {
                assert!(!func.is_function(x, y));
                assert!(!seen[y * size + x]);
                seen[y * size + x] = true;
                count += 1;
            }
            assert_eq!(count, num_raw_data_modules(version));
        }
    }

    #[test]
    fn test_order_starts_bottom_right() {
        let func = FunctionMask::new(Version::MIN);
        let first: Vec<_> = Zigzag::new(&func).take(4).collect();
        assert_eq!(first, vec![(20, 20), (19, 20), (20, 19), (19, 19)]);
    }

    #[test]
    fn test_skips_timing_column() {
        let func = FunctionMask::new(Version::MIN);
        assert!(Zigzag::new(&func).all(|(x, _)| x != 6));
    }
}
