/// Byte mode decoder (Mode 0100) for 8-bit data
use crate::decoder::bitstream::BitReader;

pub struct ByteDecoder;

impl ByteDecoder {
    /// Raw bytes; interpretation as text is left to the caller
    pub fn decode(reader: &mut BitReader, character_count: usize) -> Option<Vec<u8>> {
        if reader.remaining() < character_count * 8 {
            return None;
        }
        (0..character_count)
            .map(|_| reader.read_bits(8).map(|b| b as u8))
            .collect()
    }
}
