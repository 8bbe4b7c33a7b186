/// Codeword extraction from an unmasked module grid and MSB-first bit reading
use crate::layout::{FunctionMask, Zigzag};
use crate::models::BitMatrix;

/// Read `count` codewords in placement order; remainder modules are ignored
pub fn read_codewords(unmasked: &BitMatrix, func: &FunctionMask, count: usize) -> Vec<u8> {
    let mut codewords = vec![0u8; count];
    for (i, (x, y)) in Zigzag::new(func).take(count * 8).enumerate() {
        if unmasked.get(x, y) {
            codewords[i / 8] |= 0x80 >> (i % 8);
        }
    }
    codewords
}

/// MSB-first reader over data codewords
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bits not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    /// Read `count` bits (at most 32); `None` when fewer remain
    pub fn read_bits(&mut self, count: usize) -> Option<u32> {
        if count > 32 || count > self.remaining() {
            return None;
        }
        let mut value = 0u32;
        for _ in 0..count {
            let bit = (self.data[self.pos / 8] >> (7 - self.pos % 8)) & 1;
            value = (value << 1) | bit as u32;
            self.pos += 1;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::placement::place_codewords;
    use crate::models::Version;

    #[test]
    fn test_bit_reader() {
        let data = [0b1010_0000, 0xFF];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.remaining(), 16);
        assert_eq!(reader.read_bits(3), Some(0b101));
        assert_eq!(reader.read_bits(9), Some(0b0_0000_1111));
        assert_eq!(reader.remaining(), 4);
        assert_eq!(reader.read_bits(5), None);
        assert_eq!(reader.read_bits(4), Some(0xF));
        assert_eq!(reader.read_bits(0), Some(0));
    }

    #[test]
    fn test_read_matches_placement() {
        let version = Version::new(3).unwrap();
        let func = FunctionMask::new(version);
        let codewords: Vec<u8> = (0..70u32).map(|i| (i * 37 + 11) as u8).collect();

        let mut matrix = BitMatrix::new(version.size(), version.size());
        place_codewords(&mut matrix, &func, &codewords);
        assert_eq!(read_codewords(&matrix, &func, codewords.len()), codewords);
    }
}
