//! QR code data mode decoders
//!
//! Each decoder reads `count` characters from a [`BitReader`](crate::decoder::bitstream::BitReader)
//! positioned after the character count field and returns the decoded bytes:
//! - Numeric: digits, 10 bits per group of three
//! - Alphanumeric: 45-character set, 11 bits per pair
//! - Byte: raw 8-bit data
//! - Kanji: 13-bit values expanded back to Shift JIS byte pairs

pub mod alphanumeric;
pub mod byte;
pub mod kanji;
pub mod numeric;

pub use alphanumeric::AlphanumericDecoder;
pub use byte::ByteDecoder;
pub use kanji::KanjiDecoder;
pub use numeric::NumericDecoder;
