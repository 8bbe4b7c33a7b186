use thiserror::Error;

/// Errors raised by encoding, rendering and decoding.
///
/// Every variant is a whole-operation failure: the inputs are deterministic,
/// so retrying with the same data and options fails the same way.
#[derive(Error, Debug)]
pub enum QrError {
    /// The data does not fit the largest allowed version at the requested EC level
    #[error("data too long: needs {needed_bits} bits, at most {max_bits} fit")]
    DataTooLong {
        /// Bits required by the segmented payload
        needed_bits: usize,
        /// Data bits available in the largest allowed version
        max_bits: usize,
    },

    /// A Reed-Solomon block carried more errors than its EC codewords can fix
    #[error("uncorrectable Reed-Solomon block {block}")]
    UncorrectableBlock {
        /// Index of the failing block in interleave order
        block: usize,
    },

    /// Fewer than three finder patterns were located in the image
    #[error("finder patterns not found (located {found})")]
    FinderPatternNotFound {
        /// Number of finder candidates located
        found: usize,
    },

    /// Neither copy of the format information could be BCH-corrected
    #[error("format information unreadable")]
    FormatInfoUnreadable,

    /// Corrected data codewords do not form a valid segment stream
    #[error("invalid payload: {0}")]
    InvalidPayload(&'static str),

    /// A version outside 1..=40 was requested
    #[error("invalid version {0}, expected 1..=40")]
    InvalidVersion(u8),

    /// Pixel data length does not match width, height and pixel format
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidPixelBuffer {
        /// Bytes implied by the dimensions and format
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// PNG encoding or image loading failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, QrError>;

impl QrError {
    /// How far a decode attempt got before failing
    fn decode_stage(&self) -> u8 {
        match self {
            QrError::FinderPatternNotFound { .. } => 1,
            QrError::FormatInfoUnreadable => 2,
            QrError::UncorrectableBlock { .. } => 3,
            QrError::InvalidPayload(_) => 4,
            _ => 0,
        }
    }
}

/// Keep whichever of two decode failures got further; ties keep `a`
pub(crate) fn more_advanced(a: QrError, b: QrError) -> QrError {
    if b.decode_stage() > a.decode_stage() { b } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = QrError::DataTooLong {
            needed_bits: 23652,
            max_bits: 23648,
        };
        assert_eq!(
            err.to_string(),
            "data too long: needs 23652 bits, at most 23648 fit"
        );
        assert_eq!(
            QrError::UncorrectableBlock { block: 3 }.to_string(),
            "uncorrectable Reed-Solomon block 3"
        );
        assert_eq!(
            QrError::FinderPatternNotFound { found: 1 }.to_string(),
            "finder patterns not found (located 1)"
        );
    }

    #[test]
    fn test_more_advanced() {
        let err = more_advanced(
            QrError::FormatInfoUnreadable,
            QrError::UncorrectableBlock { block: 0 },
        );
        assert!(matches!(err, QrError::UncorrectableBlock { block: 0 }));

        let err = more_advanced(
            QrError::InvalidPayload("x"),
            QrError::FinderPatternNotFound { found: 2 },
        );
        assert!(matches!(err, QrError::InvalidPayload("x")));
    }
}
