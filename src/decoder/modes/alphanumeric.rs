/// Alphanumeric mode decoder (Mode 0010)
/// Pairs = 11 bits (first * 45 + second), single = 6 bits
use crate::decoder::bitstream::BitReader;
use crate::models::mode::ALPHANUMERIC_TABLE;

pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    pub fn decode(reader: &mut BitReader, character_count: usize) -> Option<Vec<u8>> {
        let mut text = Vec::with_capacity(character_count);
        let mut remaining = character_count;

        while remaining >= 2 {
            let value = reader.read_bits(11)? as usize;
            if value >= 45 * 45 {
                return None;
            }
            text.push(ALPHANUMERIC_TABLE[value / 45]);
            text.push(ALPHANUMERIC_TABLE[value % 45]);
            remaining -= 2;
        }

        if remaining == 1 {
            let value = reader.read_bits(6)? as usize;
            text.push(*ALPHANUMERIC_TABLE.get(value)?);
        }

        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphanumeric_decode() {
        // "AC-": (10 * 45 + 12) = 462 -> 00111001110, '-' = 41 -> 101001
        let data = [0b0011_1001, 0b1101_0100, 0b1000_0000];
        let mut reader = BitReader::new(&data);
        assert_eq!(
            AlphanumericDecoder::decode(&mut reader, 3).as_deref(),
            Some(&b"AC-"[..])
        );
    }

    #[test]
    fn test_alphanumeric_rejects_invalid_single() {
        // 63 is outside the 45-character table
        let data = [0b1111_1100];
        let mut reader = BitReader::new(&data);
        assert_eq!(AlphanumericDecoder::decode(&mut reader, 1), None);
    }
}
