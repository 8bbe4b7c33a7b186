//! qrkit - QR Code Model 2 generation and scanning
//!
//! Encodes text or bytes into QR symbols (mode optimisation, version
//! selection, Reed-Solomon, masking), renders them as SVG, PNG data URLs or
//! terminal text, and decodes symbols back out of raster images.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code decoding modules (format/version info, RS, data modes)
pub mod decoder;
/// QR code detection modules (finder patterns)
pub mod detector;
/// Error correction shared by both directions (GF(256), RS, BCH)
pub mod ecc;
/// Symbol generation (segmentation, bitstream, placement, masking)
pub mod encoder;
/// Error type and result alias
pub mod error;
/// Function patterns, format/version info placement, masks and data order
pub mod layout;
/// Core data structures (Symbol, QRCode, BitMatrix, Point, etc.)
pub mod models;
/// Scan pipeline from grayscale frame to decoded symbols
pub mod pipeline;
/// SVG, PNG data URL and UTF-8 output
pub mod render;
/// Capacity and block structure tables
pub mod tables;
/// Image loading helpers for the command line tool
pub mod tools;
/// Utility functions (grayscale, binarization, geometry)
pub mod utils;

pub use encoder::{EncodeOptions, Segment, encode_bytes, encode_segments, encode_text};
pub use error::{QrError, Result};
pub use models::{
    BitMatrix, ECLevel, MaskPattern, Mode, PixelBuffer, PixelFormat, Point, QRCode, Symbol, Version,
};
pub use render::{OutputFormat, RenderOptions, render};

use rayon::prelude::*;
use tracing::debug;

use utils::grayscale::{rgb_to_grayscale, to_grayscale};

/// Error correction level as exposed to callers of [`generate_qr_code`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrectionLevel {
    /// ~7% recovery
    Low,
    /// ~15% recovery
    #[default]
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    High,
}

impl From<ErrorCorrectionLevel> for ECLevel {
    fn from(level: ErrorCorrectionLevel) -> Self {
        match level {
            ErrorCorrectionLevel::Low => ECLevel::L,
            ErrorCorrectionLevel::Medium => ECLevel::M,
            ErrorCorrectionLevel::Quartile => ECLevel::Q,
            ErrorCorrectionLevel::High => ECLevel::H,
        }
    }
}

/// One-call generation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Error correction level (default Medium)
    pub error_correction_level: ErrorCorrectionLevel,
    /// Output kind (default SVG)
    pub output_format: OutputFormat,
    /// Target width and height in pixels (SVG and PNG only)
    pub size: u32,
    /// Light border in modules
    pub quiet_zone: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            error_correction_level: ErrorCorrectionLevel::default(),
            output_format: render.format,
            size: render.size,
            quiet_zone: render.quiet_zone,
        }
    }
}

/// Encode `data` and render it in the requested output format
///
/// # Example
/// ```
/// use qrkit::{GenerateOptions, OutputFormat, generate_qr_code};
///
/// let options = GenerateOptions {
///     output_format: OutputFormat::Utf8,
///     ..GenerateOptions::default()
/// };
/// let text = generate_qr_code("hello", &options).unwrap();
/// assert!(text.contains('█'));
/// ```
pub fn generate_qr_code(data: &str, options: &GenerateOptions) -> Result<String> {
    let symbol = encode_text(
        data,
        &EncodeOptions::with_ec_level(options.error_correction_level.into()),
    )?;
    render(
        &symbol,
        &RenderOptions {
            format: options.output_format,
            size: options.size,
            quiet_zone: options.quiet_zone,
        },
    )
}

/// Generate many codes in parallel; results keep the input order
pub fn generate_batch(inputs: &[&str], options: &GenerateOptions) -> Vec<Result<String>> {
    inputs
        .par_iter()
        .map(|data| generate_qr_code(data, options))
        .collect()
}

/// Decode the first QR symbol found in an image
pub fn decode(image: &PixelBuffer) -> Result<QRCode> {
    let gray = to_grayscale(image);
    let codes = pipeline::decode_grayscale(&gray, image.width(), image.height())?;
    debug!(found = codes.len(), "decode finished");
    codes
        .into_iter()
        .next()
        .ok_or(QrError::FinderPatternNotFound { found: 0 })
}

/// Decode the first QR symbol in an image and return its text content
pub fn decode_qr_code(image: &PixelBuffer) -> Result<String> {
    decode(image).map(|qr| qr.content)
}

/// Detect QR codes in an RGB image
///
/// # Arguments
/// * `image` - Raw RGB bytes (3 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Every symbol decoded; empty when none could be read
pub fn detect(image: &[u8], width: usize, height: usize) -> Vec<QRCode> {
    if image.len() < width * height * 3 {
        return Vec::new();
    }
    let gray = rgb_to_grayscale(image, width, height);
    detect_from_grayscale(&gray, width, height)
}

/// Detect QR codes from a pre-computed grayscale image
pub fn detect_from_grayscale(image: &[u8], width: usize, height: usize) -> Vec<QRCode> {
    if image.len() < width * height {
        return Vec::new();
    }
    match pipeline::decode_grayscale(image, width, height) {
        Ok(codes) => codes,
        Err(err) => {
            debug!(%err, "no QR code decoded");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_empty() {
        let image = vec![0u8; 300]; // 10x10 RGB
        assert!(detect(&image, 10, 10).is_empty());
    }

    #[test]
    fn test_detect_short_buffer() {
        assert!(detect(&[0u8; 10], 10, 10).is_empty());
    }

    #[test]
    fn test_generate_options_default() {
        let options = GenerateOptions::default();
        assert_eq!(options.error_correction_level, ErrorCorrectionLevel::Medium);
        assert_eq!(options.output_format, OutputFormat::Svg);
        assert_eq!(options.size, 256);
        assert_eq!(options.quiet_zone, 4);
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(ECLevel::from(ErrorCorrectionLevel::Low), ECLevel::L);
        assert_eq!(ECLevel::from(ErrorCorrectionLevel::Quartile), ECLevel::Q);
        assert_eq!(ECLevel::from(ErrorCorrectionLevel::High), ECLevel::H);
    }

    #[test]
    fn test_generate_batch_keeps_order() {
        let options = GenerateOptions {
            output_format: OutputFormat::Utf8,
            ..GenerateOptions::default()
        };
        let long = "x".repeat(3000);
        let results = generate_batch(&["a", long.as_str(), "b"], &options);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &generate_qr_code("a", &options).unwrap());
        assert!(matches!(results[1], Err(QrError::DataTooLong { .. })));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_decode_rgb_frame() {
        let symbol = encode_text("rgb frame", &EncodeOptions::default()).unwrap();
        let gray = render::to_luma_image(&symbol, 4, 4);
        let (w, h) = (gray.width() as usize, gray.height() as usize);
        let rgb: Vec<u8> = gray.as_raw().iter().flat_map(|&v| [v, v, v]).collect();

        let codes = detect(&rgb, w, h);
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].content, "rgb frame");

        let buffer = PixelBuffer::new(w, h, PixelFormat::Rgb8, rgb).unwrap();
        assert_eq!(decode_qr_code(&buffer).unwrap(), "rgb frame");
    }
}
