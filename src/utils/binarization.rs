/// Grayscale to binary conversion. Every result is a BitMatrix where
/// true = dark.
use crate::models::BitMatrix;

/// Windows whose standard deviation is below this are treated as flat and
/// fall back to the global Otsu threshold
const MIN_LOCAL_STDDEV: f64 = 8.0;

/// Convert grayscale image to binary using Otsu's thresholding method
pub fn otsu_binarize(gray: &[u8], width: usize, height: usize) -> BitMatrix {
    threshold_binarize(gray, width, height, otsu_threshold(gray))
}

/// Otsu's optimal global threshold; pixels strictly below it are dark
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut best_variance = 0.0;
    let mut best_threshold = 128u8;
    let mut below_count = 0.0;
    let mut below_sum = 0.0;

    // Threshold t splits intensities into [0, t) and [t, 255]
    for t in 1..=255usize {
        below_count += histogram[t - 1] as f64;
        below_sum += (t - 1) as f64 * histogram[t - 1] as f64;
        let above_count = total - below_count;
        if below_count == 0.0 || above_count == 0.0 {
            continue;
        }

        let mean_below = below_sum / below_count;
        let mean_above = (total_sum - below_sum) / above_count;
        let variance = below_count * above_count * (mean_below - mean_above).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best_threshold = t as u8;
        }
    }

    best_threshold
}

/// Simple global threshold binarization
pub fn threshold_binarize(gray: &[u8], width: usize, height: usize, threshold: u8) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);
    for y in 0..height {
        for x in 0..width {
            binary.set(x, y, gray[y * width + x] < threshold);
        }
    }
    binary
}

/// Pick a window for `adaptive_binarize`: the configured size, or about an
/// eighth of the shorter side (odd, at least 15 px)
pub fn adaptive_window(width: usize, height: usize, configured: usize) -> usize {
    let window = if configured > 0 {
        configured
    } else {
        (width.min(height) / 8).max(15)
    };
    window | 1
}

/// Binarize against the mean of a `window` x `window` neighbourhood.
///
/// Local sums come from integral images, so the cost per pixel is constant.
/// Flat neighbourhoods use the global Otsu threshold instead of their mean.
pub fn adaptive_binarize(gray: &[u8], width: usize, height: usize, window: usize) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);
    if width == 0 || height == 0 {
        return binary;
    }

    let global = otsu_threshold(gray);
    let (sum, sum_sq) = integral_images(gray, width, height);
    let iw = width + 1;
    let radius = window / 2;

    for y in 0..height {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius + 1).min(height);
        for x in 0..width {
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius + 1).min(width);
            let area = ((y1 - y0) * (x1 - x0)) as f64;

            let s = (sum[y1 * iw + x1] + sum[y0 * iw + x0] - sum[y0 * iw + x1] - sum[y1 * iw + x0])
                as f64;
            let sq = (sum_sq[y1 * iw + x1] + sum_sq[y0 * iw + x0]
                - sum_sq[y0 * iw + x1]
                - sum_sq[y1 * iw + x0]) as f64;

            let mean = s / area;
            let variance = (sq / area - mean * mean).max(0.0);
            let pixel = gray[y * width + x];

            let dark = if variance.sqrt() < MIN_LOCAL_STDDEV {
                pixel < global
            } else {
                (pixel as f64) < mean
            };
            binary.set(x, y, dark);
        }
    }

    binary
}

/// Summed-area tables of values and squared values, (width + 1) x (height + 1)
fn integral_images(gray: &[u8], width: usize, height: usize) -> (Vec<u64>, Vec<u64>) {
    let iw = width + 1;
    let mut sum = vec![0u64; iw * (height + 1)];
    let mut sum_sq = vec![0u64; iw * (height + 1)];

    for y in 0..height {
        let mut row = 0u64;
        let mut row_sq = 0u64;
        for x in 0..width {
            let v = gray[y * width + x] as u64;
            row += v;
            row_sq += v * v;
            sum[(y + 1) * iw + x + 1] = sum[y * iw + x + 1] + row;
            sum_sq[(y + 1) * iw + x + 1] = sum_sq[y * iw + x + 1] + row_sq;
        }
    }

    (sum, sum_sq)
}
