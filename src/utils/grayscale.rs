/// Grayscale conversion for decoder input
/// Y = 0.299*R + 0.587*G + 0.114*B using integer arithmetic:
/// Y = (76*R + 150*G + 29*B) >> 8
use rayon::prelude::*;

use crate::models::{PixelBuffer, PixelFormat};

const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Frames at least this large are converted with one rayon task per row
const PARALLEL_MIN_PIXELS: usize = 512 * 512;

#[inline]
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8).min(255) as u8
}

/// Convert any supported pixel buffer to one luminance byte per pixel
pub fn to_grayscale(image: &PixelBuffer) -> Vec<u8> {
    let (width, height) = (image.width(), image.height());
    match image.format() {
        PixelFormat::Luma8 => image.data().to_vec(),
        PixelFormat::Rgb8 if width * height >= PARALLEL_MIN_PIXELS => {
            rgb_to_grayscale_parallel(image.data(), width, height)
        }
        PixelFormat::Rgb8 => rgb_to_grayscale(image.data(), width, height),
        PixelFormat::Rgba8 if width * height >= PARALLEL_MIN_PIXELS => {
            rgba_to_grayscale_parallel(image.data(), width, height)
        }
        PixelFormat::Rgba8 => rgba_to_grayscale(image.data(), width, height),
    }
}

/// Convert packed RGB bytes to grayscale
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    rgb.chunks_exact(3)
        .take(width * height)
        .map(|px| luminance(px[0], px[1], px[2]))
        .collect()
}

/// Convert packed RGBA bytes to grayscale (alpha is ignored)
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    rgba.chunks_exact(4)
        .take(width * height)
        .map(|px| luminance(px[0], px[1], px[2]))
        .collect()
}

/// Convert RGB to grayscale, processing rows in parallel
pub fn rgb_to_grayscale_parallel(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    convert_rows_parallel(rgb, width, height, 3)
}

/// Convert RGBA to grayscale, processing rows in parallel
pub fn rgba_to_grayscale_parallel(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    convert_rows_parallel(rgba, width, height, 4)
}

fn convert_rows_parallel(src: &[u8], width: usize, height: usize, channels: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }

    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let row_start = y * width * channels;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * channels;
            *out = luminance(src[idx], src[idx + 1], src[idx + 2]);
        }
    });

    gray
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_grayscale() {
        let rgb = vec![
            255, 255, 255, // white
            0, 0, 0, // black
            255, 0, 0, // red
            0, 255, 0, // green
        ];
        let gray = rgb_to_grayscale(&rgb, 4, 1);
        assert_eq!(gray[0], 255);
        assert_eq!(gray[1], 0);
        assert_eq!(gray[2], 75);
        assert_eq!(gray[3], 149);
    }

    #[test]
    fn test_rgba_ignores_alpha() {
        let rgba = vec![10, 20, 30, 0, 10, 20, 30, 255];
        let gray = rgba_to_grayscale(&rgba, 2, 1);
        assert_eq!(gray[0], gray[1]);
    }

    #[test]
    fn test_parallel_matches_scalar() {
        let (width, height) = (37, 23);
        let rgb: Vec<u8> = (0..width * height * 3).map(|i| (i * 31 % 251) as u8).collect();
        assert_eq!(
            rgb_to_grayscale_parallel(&rgb, width, height),
            rgb_to_grayscale(&rgb, width, height)
        );

        let rgba: Vec<u8> = (0..width * height * 4).map(|i| (i * 17 % 253) as u8).collect();
        assert_eq!(
            rgba_to_grayscale_parallel(&rgba, width, height),
            rgba_to_grayscale(&rgba, width, height)
        );
    }

    #[test]
    fn test_to_grayscale_luma_passthrough() {
        let buf = PixelBuffer::luma(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(to_grayscale(&buf), vec![1, 2, 3, 4]);
    }
}
