/// Symbol decoding from a binarized image and an ordered finder triple
use tracing::debug;

use crate::error::{QrError, Result, more_advanced};
use crate::models::{BitMatrix, QRCode, Version};
use crate::pipeline::FinderGroup;

mod geometry;
mod matrix_decode;
mod payload;


/// Main QR decoder that processes a detected QR region
pub struct QrDecoder;

impl QrDecoder {
    /// Decode the symbol spanned by `group` in a binarized image.
    ///
    /// Tries the estimated version and its neighbours; for versions 7+ the
    /// version blocks override the estimate. Returns the most advanced
    /// failure when every candidate fails.
    pub fn decode(binary: &BitMatrix, group: &FinderGroup) -> Result<QRCode> {
        let estimated = Version::from_dimension(group.dimension)
            .ok_or(QrError::FinderPatternNotFound { found: 3 })?;

        let mut failure: Option<QrError> = None;
        for version in geometry::version_candidates(estimated) {
            match Self::decode_as(binary, group, version) {
                Ok(qr) => return Ok(qr),
                Err(err) => {
                    failure = Some(match failure {
                        Some(prev) => more_advanced(prev, err),
                        None => err,
                    })
                }
            }
        }
        Err(failure.unwrap_or(QrError::FinderPatternNotFound { found: 3 }))
    }

    fn decode_as(binary: &BitMatrix, group: &FinderGroup, version: Version) -> Result<QRCode> {
        let sample = |version| {
            geometry::sample_symbol(binary, group, version)
                .ok_or(QrError::FinderPatternNotFound { found: 3 })
        };

        let mut sampled = sample(version)?;
        if version.number() >= 7 {
            if let Some(read) = matrix_decode::read_version(&sampled.modules).filter(|&v| v != version) {
                debug!(estimated = version.number(), read = read.number(), "version info overrides estimate");
                sampled = sample(read)?;
            }
        }

        let mut qr = matrix_decode::decode_from_matrix(&sampled.modules)?;
        qr.position = sampled.corners;
        Ok(qr)
    }

    /// Decode an already sampled module grid (true = dark, still masked)
    pub fn decode_from_matrix(modules: &BitMatrix) -> Result<QRCode> {
        matrix_decode::decode_from_matrix(modules)
    }
}
