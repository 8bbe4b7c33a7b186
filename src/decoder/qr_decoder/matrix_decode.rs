use tracing::{debug, trace};

use crate::decoder::bitstream::read_codewords;
use crate::decoder::config;
use crate::decoder::qr_decoder::payload;
use crate::ecc::{Bch, ReedSolomonDecoder};
use crate::error::{QrError, Result, more_advanced};
use crate::layout::format::read_format_bits;
use crate::layout::version_info::read_version_bits;
use crate::layout::{FunctionMask, apply_mask};
use crate::models::{BitMatrix, ECLevel, MaskPattern, QRCode, Version};
use crate::tables::{BlockLayout, block_layout};

/// Decode a sampled module grid (true = dark, still masked).
///
/// Falls back to the transposed grid, which is how a mirrored symbol
/// samples, unless disabled via `QR_MIRROR_FALLBACK=0`.
pub(crate) fn decode_from_matrix(modules: &BitMatrix) -> Result<QRCode> {
    let size = modules.width();
    let version = Version::from_dimension(size)
        .ok_or(QrError::InvalidVersion((size.saturating_sub(17) / 4) as u8))?;

    let err = match decode_oriented(modules, version) {
        Ok(qr) => return Ok(qr),
        Err(err) => err,
    };
    if !config::mirror_fallback() {
        return Err(err);
    }

    trace!(%err, "retrying transposed grid");
    decode_oriented(&modules.transpose(), version).map_err(|mirrored| more_advanced(err, mirrored))
}

fn decode_oriented(modules: &BitMatrix, version: Version) -> Result<QRCode> {
    let (ec_level, mask) = read_format(modules).ok_or(QrError::FormatInfoUnreadable)?;
    debug!(version = version.number(), ?ec_level, mask = mask.id(), "format info");

    let func = FunctionMask::new(version);
    let mut unmasked = modules.clone();
    apply_mask(&mut unmasked, mask, &func);

    let layout = block_layout(version, ec_level);
    let codewords = read_codewords(&unmasked, &func, layout.total_codewords);
    let (data, corrected) = deinterleave_and_correct(&codewords, &layout)?;
    let bytes = payload::decode_payload(&data, version)?;

    let mut qr = QRCode::new(bytes, version, ec_level, mask);
    qr.modules = modules.clone();
    qr.corrected_codewords = corrected;
    Ok(qr)
}

/// Best of the two format copies after BCH correction
pub(super) fn read_format(modules: &BitMatrix) -> Option<(ECLevel, MaskPattern)> {
    let (primary, secondary) = read_format_bits(modules);
    [primary, secondary]
        .into_iter()
        .filter_map(Bch::decode_format)
        .min_by_key(|&(_, _, distance)| distance)
        .map(|(ec_level, mask, _)| (ec_level, mask))
}

/// Best of the two version blocks after BCH correction (versions 7+)
pub(super) fn read_version(modules: &BitMatrix) -> Option<Version> {
    let (top_right, bottom_left) = read_version_bits(modules);
    let (number, _) = [top_right, bottom_left]
        .into_iter()
        .filter_map(Bch::decode_version)
        .min_by_key(|&(_, distance)| distance)?;
    Version::new(number).ok()
}

/// Split interleaved codewords into blocks, correct each and join the data.
///
/// Returns the data codewords and the number of corrected codewords.
pub(super) fn deinterleave_and_correct(
    codewords: &[u8],
    layout: &BlockLayout,
) -> Result<(Vec<u8>, usize)> {
    let mut blocks: Vec<Vec<u8>> = (0..layout.num_blocks)
        .map(|b| Vec::with_capacity(layout.data_len(b) + layout.ecc_per_block))
        .collect();

    let mut stream = codewords.iter().copied();
    for i in 0..layout.max_data_len() {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < layout.data_len(b) {
                block.extend(stream.next());
            }
        }
    }
    for _ in 0..layout.ecc_per_block {
        for block in blocks.iter_mut() {
            block.extend(stream.next());
        }
    }

    let rs = ReedSolomonDecoder::new(layout.ecc_per_block);
    let mut data = Vec::with_capacity(layout.data_codewords());
    let mut corrected = 0;
    for (b, block) in blocks.iter_mut().enumerate() {
        corrected += rs
            .decode(block)
            .map_err(|reason| {
                trace!(block = b, reason, "Reed-Solomon failure");
                QrError::UncorrectableBlock { block: b }
            })?;
        data.extend_from_slice(&block[..layout.data_len(b)]);
    }

    Ok((data, corrected))
}
