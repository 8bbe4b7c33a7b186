use tracing::trace;

use crate::decoder::bitstream::BitReader;
use crate::decoder::modes::{AlphanumericDecoder, ByteDecoder, KanjiDecoder, NumericDecoder};
use crate::error::{QrError, Result};
use crate::models::{Mode, Version};

/// Parse the segment stream in corrected data codewords.
///
/// Stops at the terminator or when fewer than four bits remain. ECI
/// designators are read and skipped; payload bytes are returned as-is.
pub(super) fn decode_payload(data_codewords: &[u8], version: Version) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(data_codewords);
    let mut data = Vec::new();

    while reader.remaining() >= 4 {
        let indicator = reader
            .read_bits(4)
            .ok_or(QrError::InvalidPayload("truncated mode indicator"))?;
        if indicator == 0 {
            break;
        }
        let mode =
            Mode::from_indicator(indicator).ok_or(QrError::InvalidPayload("unknown mode indicator"))?;

        if mode == Mode::Eci {
            let assignment = read_eci_designator(&mut reader)?;
            trace!(assignment, "ECI designator");
            continue;
        }

        let count = reader
            .read_bits(mode.char_count_bits(version))
            .ok_or(QrError::InvalidPayload("truncated character count"))? as usize;
        let decoded = decode_segment(&mut reader, mode, count)?;
        trace!(?mode, len = decoded.len(), "segment");
        data.extend_from_slice(&decoded);
    }

    Ok(data)
}

fn decode_segment(reader: &mut BitReader, mode: Mode, count: usize) -> Result<Vec<u8>> {
    match mode {
        Mode::Numeric => NumericDecoder::decode(reader, count)
            .ok_or(QrError::InvalidPayload("invalid numeric segment")),
        Mode::Alphanumeric => AlphanumericDecoder::decode(reader, count)
            .ok_or(QrError::InvalidPayload("invalid alphanumeric segment")),
        Mode::Byte => {
            ByteDecoder::decode(reader, count).ok_or(QrError::InvalidPayload("truncated byte segment"))
        }
        Mode::Kanji => {
            KanjiDecoder::decode(reader, count).ok_or(QrError::InvalidPayload("truncated kanji segment"))
        }
        // Designators carry no characters
        Mode::Eci => Ok(Vec::new()),
    }
}

/// ECI assignment number: 0xxxxxxx, 10xxxxxx + 1 byte, or 110xxxxx + 2 bytes
fn read_eci_designator(reader: &mut BitReader) -> Result<u32> {
    let mut read = |bits| {
        reader
            .read_bits(bits)
            .ok_or(QrError::InvalidPayload("truncated ECI designator"))
    };
    let first = read(8)?;
    if first & 0x80 == 0 {
        Ok(first)
    } else if first & 0xC0 == 0x80 {
        Ok(((first & 0x3F) << 8) | read(8)?)
    } else if first & 0xE0 == 0xC0 {
        Ok(((first & 0x1F) << 16) | read(16)?)
    } else {
        Err(QrError::InvalidPayload("invalid ECI designator"))
    }
}
