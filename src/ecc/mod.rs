//! Error correction shared by the encoder and the decoder

pub mod bch;
pub mod gf256;
pub mod reed_solomon;

pub use bch::Bch;
pub use gf256::Gf256;
pub use reed_solomon::{ReedSolomonDecoder, ReedSolomonEncoder};
