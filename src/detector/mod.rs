//! QR code detection modules
//!
//! Finder pattern detection (the three square markers) on a binarized image.
//! Alignment refinement and grid sampling live with the decoder.

/// Finder pattern detection using 1:1:3:1:1 ratio scanning
pub mod finder;
