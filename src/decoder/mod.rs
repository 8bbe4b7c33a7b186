//! QR code decoding modules
//!
//! Everything after the module grid has been sampled from the image:
//! - Format and version information (BCH corrected)
//! - Unmasking, codeword extraction and de-interleaving
//! - Reed-Solomon correction per block
//! - Data mode decoding (numeric, alphanumeric, byte, kanji, ECI)

/// Codeword extraction and MSB-first bit reading
pub mod bitstream;
pub mod config;
/// Data mode decoders (numeric, alphanumeric, byte, kanji)
pub mod modes;
/// Main QR decoder that orchestrates the decoding pipeline
pub mod qr_decoder;
