/// Bit-level packing of segments into data codewords
use super::segment::Segment;
use crate::models::Version;

/// Pad codewords appended after the terminator, alternating
const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Growable sequence of bits, most significant first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append the low `count` bits of `value`, MSB first
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32 && (count == 32 || value >> count == 0));
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 != 0);
        }
    }

    pub fn append(&mut self, other: &BitBuffer) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Pack into bytes; a trailing partial byte is zero-filled
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << (7 - i)))
            })
            .collect()
    }
}

/// Concatenate segment headers and payloads, then terminate and pad to exactly
/// `data_codewords` bytes.
///
/// The caller has already checked that the segments fit.
pub fn build_data_codewords(
    segments: &[Segment],
    version: Version,
    data_codewords: usize,
) -> Vec<u8> {
    let capacity = data_codewords * 8;
    let mut buffer = BitBuffer::with_capacity(capacity);
    for segment in segments {
        buffer.append_bits(segment.mode().indicator(), 4);
        let count_bits = segment.mode().char_count_bits(version);
        buffer.append_bits(segment.num_chars() as u32, count_bits);
        buffer.append(segment.data());
    }
    debug_assert!(buffer.len() <= capacity);

    // Terminator, then zero fill to a byte boundary
    let terminator = (capacity - buffer.len()).min(4);
    buffer.append_bits(0, terminator);
    let fill = (8 - buffer.len() % 8) % 8;
    buffer.append_bits(0, fill);

    let mut codewords = buffer.to_bytes();
    for pad in PAD_BYTES.iter().cycle() {
        if codewords.len() >= data_codewords {
            break;
        }
        codewords.push(*pad);
    }
    codewords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_bits() {
        let mut buffer = BitBuffer::new();
        buffer.append_bits(0b101, 3);
        buffer.append_bits(0xFF, 8);
        assert_eq!(buffer.len(), 11);
        assert_eq!(buffer.to_bytes(), vec![0b1011_1111, 0b1110_0000]);
    }

    #[test]
    fn test_hello_world_codewords() {
        let segment = Segment::alphanumeric(b"HELLO WORLD").unwrap();
        let codewords = build_data_codewords(&[segment], Version::MIN, 13);
        assert_eq!(
            codewords,
            vec![32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236]
        );
    }

    #[test]
    fn test_empty_payload_pads() {
        let codewords = build_data_codewords(&[Segment::bytes(b"")], Version::MIN, 19);
        assert_eq!(codewords.len(), 19);
        assert_eq!(&codewords[..4], &[0x40, 0x00, 0xEC, 0x11]);
    }

    #[test]
    fn test_short_terminator_when_full() {
        // 1-H holds 72 bits; 17 numeric digits use 4 + 10 + 57 = 71
        let segment = Segment::numeric(b"12345678901234567").unwrap();
        let codewords = build_data_codewords(&[segment], Version::MIN, 9);
        assert_eq!(codewords.len(), 9);
        assert_eq!(codewords[8] & 1, 0);
    }
}
