//! QR symbol generation: segmentation, version selection, bitstream,
//! error correction, placement and masking.

pub mod bitstream;
pub mod mask;
pub mod placement;
pub mod segment;

pub use bitstream::BitBuffer;
pub use mask::penalty_score;
pub use segment::Segment;

use crate::error::{QrError, Result};
use crate::layout::FunctionMask;
use crate::models::mode::version_class;
use crate::models::{ECLevel, MaskPattern, Symbol, Version};
use crate::tables::{block_layout, data_codewords};

/// Encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Error correction level (default M)
    pub ec_level: ECLevel,
    /// Smallest version to consider
    pub min_version: Version,
    /// Largest version to consider
    pub max_version: Version,
    /// Force a mask instead of picking the lowest penalty
    pub mask: Option<MaskPattern>,
    /// Raise the EC level as far as the chosen version still holds the data
    pub boost_ec_level: bool,
    /// Treat Shift JIS double-byte pairs in the input as Kanji
    pub kanji: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ec_level: ECLevel::M,
            min_version: Version::MIN,
            max_version: Version::MAX,
            mask: None,
            boost_ec_level: false,
            kanji: false,
        }
    }
}

impl EncodeOptions {
    pub fn with_ec_level(ec_level: ECLevel) -> Self {
        Self {
            ec_level,
            ..Self::default()
        }
    }
}

/// Encode UTF-8 text with automatic segmentation
pub fn encode_text(text: &str, options: &EncodeOptions) -> Result<Symbol> {
    encode_bytes(text.as_bytes(), options)
}

/// Encode raw bytes with automatic segmentation.
///
/// Segmentation depends on the count field widths, so it is redone for each
/// of the three version classes the search passes through.
pub fn encode_bytes(data: &[u8], options: &EncodeOptions) -> Result<Symbol> {
    check_version_range(options)?;
    let mut by_class: [Option<Vec<Segment>>; 3] = Default::default();
    let mut needed = 0;
    for version in options.min_version.range_to(options.max_version) {
        let segments = by_class[version_class(version)]
            .get_or_insert_with(|| segment::analyze(data, version, options.kanji));
        match fitting_bits(segments, version, options.ec_level) {
            Ok(_) => return Ok(build_symbol(segments, version, options)),
            Err(bits) => needed = bits,
        }
    }
    Err(data_too_long(needed, options))
}

/// Encode caller-built segments
pub fn encode_segments(segments: &[Segment], options: &EncodeOptions) -> Result<Symbol> {
    check_version_range(options)?;
    let mut needed = 0;
    for version in options.min_version.range_to(options.max_version) {
        match fitting_bits(segments, version, options.ec_level) {
            Ok(_) => return Ok(build_symbol(segments, version, options)),
            Err(bits) => needed = bits,
        }
    }
    Err(data_too_long(needed, options))
}

fn check_version_range(options: &EncodeOptions) -> Result<()> {
    if options.min_version > options.max_version {
        return Err(QrError::InvalidVersion(options.min_version.number()));
    }
    Ok(())
}

fn data_too_long(needed_bits: usize, options: &EncodeOptions) -> QrError {
    QrError::DataTooLong {
        needed_bits,
        max_bits: data_codewords(options.max_version, options.ec_level) * 8,
    }
}

/// Bits used if the segments fit `version` at `ec_level`, otherwise the bits
/// they would need (count overflow counts as not fitting)
fn fitting_bits(
    segments: &[Segment],
    version: Version,
    ec_level: ECLevel,
) -> std::result::Result<usize, usize> {
    let capacity = data_codewords(version, ec_level) * 8;
    match Segment::total_bits(segments, version) {
        Some(bits) if bits <= capacity => Ok(bits),
        Some(bits) => Err(bits),
        None => Err(segments
            .iter()
            .map(|s| 4 + s.mode().char_count_bits(version) + s.data().len())
            .sum()),
    }
}

fn build_symbol(segments: &[Segment], version: Version, options: &EncodeOptions) -> Symbol {
    let mut ec_level = options.ec_level;
    if options.boost_ec_level {
        for level in ECLevel::ALL.into_iter().filter(|&l| l > options.ec_level) {
            if fitting_bits(segments, version, level).is_ok() {
                ec_level = level;
            }
        }
    }

    let data = bitstream::build_data_codewords(segments, version, data_codewords(version, ec_level));
    let codewords = placement::interleave(&data, &block_layout(version, ec_level));

    let func = FunctionMask::new(version);
    let mut matrix = placement::draw_function_patterns(version);
    placement::place_codewords(&mut matrix, &func, &codewords);

    let mask = match options.mask {
        Some(mask) => {
            mask::apply_fixed_mask(&mut matrix, &func, ec_level, mask);
            mask
        }
        None => mask::select_mask(&mut matrix, &func, ec_level),
    };

    tracing::debug!(
        version = version.number(),
        ec_level = ?ec_level,
        mask = mask.id(),
        segments = segments.len(),
        "encoded QR symbol"
    );
    Symbol::new(version, ec_level, mask, matrix)
}
