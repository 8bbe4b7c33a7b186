/// Numeric mode decoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::decoder::bitstream::BitReader;

pub struct NumericDecoder;

impl NumericDecoder {
    /// `None` when the stream runs out or a group exceeds its digit count
    pub fn decode(reader: &mut BitReader, character_count: usize) -> Option<Vec<u8>> {
        let mut digits = Vec::with_capacity(character_count);
        let mut remaining = character_count;

        while remaining > 0 {
            let group = remaining.min(3);
            let (bits, limit) = match group {
                3 => (10, 1000),
                2 => (7, 100),
                _ => (4, 10),
            };

            let value = reader.read_bits(bits)?;
            if value >= limit {
                return None;
            }

            let text = format!("{value:0group$}");
            digits.extend_from_slice(text.as_bytes());
            remaining -= group;
        }

        Some(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_decode() {
        // "01234567": 012 -> 0000001100, 345 -> 0101011001, 67 -> 1000011
        let data = [0b0000_0011, 0b0001_0101, 0b1001_1000, 0b0110_0000];
        let mut reader = BitReader::new(&data);
        assert_eq!(
            NumericDecoder::decode(&mut reader, 8).as_deref(),
            Some(&b"01234567"[..])
        );
        assert_eq!(reader.remaining(), 5);
    }

    #[test]
    fn test_numeric_rejects_out_of_range_group() {
        // 1023 does not fit three digits
        let data = [0xFF, 0xC0];
        let mut reader = BitReader::new(&data);
        assert_eq!(NumericDecoder::decode(&mut reader, 3), None);
    }

    #[test]
    fn test_numeric_truncated() {
        let data = [0x00];
        let mut reader = BitReader::new(&data);
        assert_eq!(NumericDecoder::decode(&mut reader, 3), None);
    }
}
