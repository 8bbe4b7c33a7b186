use std::env;
use std::path::Path;

use image::GenericImageView;

use crate::error::Result;
use crate::models::{BitMatrix, PixelBuffer, PixelFormat};

/// Longest side allowed when loading, from `QR_MAX_DIM` (unset or 0 = no limit)
fn max_dim_from_env() -> Option<u32> {
    env::var("QR_MAX_DIM")
        .ok()
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|&v| v > 0)
}

/// Load an image file as an RGB pixel buffer, downscaled to `QR_MAX_DIM`
pub fn load_pixels<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let img = image::open(path)?;
    let img = match max_dim_from_env() {
        Some(max_dim) if img.dimensions().0.max(img.dimensions().1) > max_dim => {
            img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
        }
        _ => img,
    };
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    PixelBuffer::new(width as usize, height as usize, PixelFormat::Rgb8, rgb.into_raw())
}

/// Grayscale statistics for inspection output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrayStats {
    /// Darkest value
    pub min: u8,
    /// Brightest value
    pub max: u8,
    /// Mean value
    pub avg: u8,
}

/// Summarize a grayscale buffer
pub fn grayscale_stats(gray: &[u8]) -> GrayStats {
    if gray.is_empty() {
        return GrayStats { min: 0, max: 0, avg: 0 };
    }
    let sum: u64 = gray.iter().map(|&v| v as u64).sum();
    GrayStats {
        min: gray.iter().copied().min().unwrap_or(0),
        max: gray.iter().copied().max().unwrap_or(0),
        avg: (sum / gray.len() as u64) as u8,
    }
}

/// Share of dark pixels in a binarized image
pub fn dark_ratio(binary: &BitMatrix) -> f32 {
    let total = binary.width() * binary.height();
    if total == 0 {
        return 0.0;
    }
    binary.count_ones() as f32 / total as f32
}
