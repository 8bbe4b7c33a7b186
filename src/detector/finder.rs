/// Finder pattern detection using 1:1:3:1:1 ratio scanning
use crate::models::{BitMatrix, Point};

/// Smallest pattern width accepted (one pixel per module)
const MIN_PATTERN_WIDTH: usize = 7;

/// Detected finder pattern centre
#[derive(Debug, Clone, Copy)]
pub struct FinderPattern {
    /// Centre in continuous image coordinates
    pub center: Point,
    /// Estimated module size in pixels
    pub module_size: f32,
    /// Number of scan rows that confirmed this pattern
    pub count: usize,
}

impl FinderPattern {
    pub fn new(x: f32, y: f32, module_size: f32) -> Self {
        Self {
            center: Point::new(x, y),
            module_size,
            count: 1,
        }
    }

    /// Same pattern seen from another row: centres within one module and
    /// similar module sizes
    fn about_equals(&self, other: &FinderPattern) -> bool {
        let dx = (self.center.x - other.center.x).abs();
        let dy = (self.center.y - other.center.y).abs();
        if dx > self.module_size || dy > self.module_size {
            return false;
        }
        let diff = (self.module_size - other.module_size).abs();
        diff <= 1.0 || diff <= self.module_size * 0.5
    }

    /// Fold another sighting into the running average
    fn combine(&mut self, other: &FinderPattern) {
        let total = (self.count + other.count) as f32;
        let (a, b) = (self.count as f32, other.count as f32);
        self.center = Point::new(
            (self.center.x * a + other.center.x * b) / total,
            (self.center.y * a + other.center.y * b) / total,
        );
        self.module_size = (self.module_size * a + other.module_size * b) / total;
        self.count += other.count;
    }
}

pub struct FinderDetector;

impl FinderDetector {
    /// Scan every row of `matrix` and return merged finder candidates,
    /// most confirmed first
    pub fn detect(matrix: &BitMatrix) -> Vec<FinderPattern> {
        let mut patterns: Vec<FinderPattern> = Vec::new();

        for y in 0..matrix.height() {
            for candidate in Self::scan_row(matrix, y) {
                match patterns.iter_mut().find(|p| p.about_equals(&candidate)) {
                    Some(existing) => existing.combine(&candidate),
                    None => patterns.push(candidate),
                }
            }
        }

        patterns.sort_by(|a, b| b.count.cmp(&a.count));
        patterns
    }

    fn scan_row(matrix: &BitMatrix, y: usize) -> Vec<FinderPattern> {
        let width = matrix.width();
        let mut candidates = Vec::new();
        if width == 0 {
            return candidates;
        }

        // Runs as (start, length, dark)
        let mut runs: Vec<(usize, usize, bool)> = Vec::new();
        let mut run_start = 0usize;
        let mut current = matrix.get(0, y);
        for x in 1..=width {
            let color = x < width && matrix.get(x, y);
            if x == width || color != current {
                runs.push((run_start, x - run_start, current));
                run_start = x;
                current = color;
            }
        }

        for window in runs.windows(5) {
            if !window[0].2 {
                continue;
            }
            let lengths = [
                window[0].1,
                window[1].1,
                window[2].1,
                window[3].1,
                window[4].1,
            ];
            if !Self::ratio_ok(&lengths) {
                continue;
            }

            let total: usize = lengths.iter().sum();
            let center_x = window[2].0 as f32 + window[2].1 as f32 / 2.0;
            if let Some(pattern) = Self::confirm(matrix, center_x, y, total) {
                candidates.push(pattern);
            }
        }

        candidates
    }

    /// Check run lengths against 1:1:3:1:1 within half a module (1.5 for the centre)
    fn ratio_ok(lengths: &[usize; 5]) -> bool {
        let total: usize = lengths.iter().sum();
        if total < MIN_PATTERN_WIDTH || lengths.contains(&0) {
            return false;
        }

        let unit = total as f32 / 7.0;
        let tolerance = unit / 2.0;
        (lengths[0] as f32 - unit).abs() < tolerance
            && (lengths[1] as f32 - unit).abs() < tolerance
            && (lengths[2] as f32 - 3.0 * unit).abs() < 3.0 * tolerance
            && (lengths[3] as f32 - unit).abs() < tolerance
            && (lengths[4] as f32 - unit).abs() < tolerance
    }

    /// Vertical then horizontal cross-check through a row hit
    fn confirm(matrix: &BitMatrix, center_x: f32, y: usize, row_total: usize) -> Option<FinderPattern> {
        let cx = center_x as usize;
        let (center_y, vertical_total) =
            Self::cross_check(row_total, |i| matrix.get(cx, i), y, matrix.height())?;

        let cy = center_y as usize;
        let (center_x, horizontal_total) =
            Self::cross_check(vertical_total, |i| matrix.get(i, cy), cx, matrix.width())?;

        let module_size = (vertical_total + horizontal_total) as f32 / 14.0;
        Some(FinderPattern::new(center_x, center_y, module_size))
    }

    /// Walk both ways from `start` along a line read through `dark`.
    ///
    /// Returns the continuous centre coordinate and the pattern length when
    /// the five runs match 1:1:3:1:1 and the length is close to `expected`.
    fn cross_check(
        expected: usize,
        dark: impl Fn(usize) -> bool,
        start: usize,
        len: usize,
    ) -> Option<(f32, usize)> {
        let max_run = expected;
        let mut counts = [0usize; 5];

        // Backwards: centre, inner light ring, outer dark ring
        let mut i = start as isize;
        while i >= 0 && dark(i as usize) {
            counts[2] += 1;
            i -= 1;
        }
        if i < 0 {
            return None;
        }
        while i >= 0 && !dark(i as usize) && counts[1] <= max_run {
            counts[1] += 1;
            i -= 1;
        }
        if i < 0 || counts[1] > max_run {
            return None;
        }
        while i >= 0 && dark(i as usize) && counts[0] <= max_run {
            counts[0] += 1;
            i -= 1;
        }
        if counts[0] > max_run {
            return None;
        }

        // Forwards
        let mut j = start + 1;
        while j < len && dark(j) {
            counts[2] += 1;
            j += 1;
        }
        if j == len {
            return None;
        }
        while j < len && !dark(j) && counts[3] <= max_run {
            counts[3] += 1;
            j += 1;
        }
        if j == len || counts[3] > max_run {
            return None;
        }
        while j < len && dark(j) && counts[4] <= max_run {
            counts[4] += 1;
            j += 1;
        }
        if counts[4] > max_run {
            return None;
        }

        let total: usize = counts.iter().sum();
        if 5 * total.abs_diff(expected) >= 2 * expected || !Self::ratio_ok(&counts) {
            return None;
        }

        let center = j as f32 - counts[4] as f32 - counts[3] as f32 - counts[2] as f32 / 2.0;
        Some((center, total))
    }
}
