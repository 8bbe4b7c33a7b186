/// Kanji mode decoder (Mode 1000)
/// Each 13-bit value v expands to the Shift JIS pair
/// ((v / 0xC0) << 8 | v % 0xC0) + 0x8140, or + 0xC140 past 0x1F00
use crate::decoder::bitstream::BitReader;

pub struct KanjiDecoder;

impl KanjiDecoder {
    pub fn decode(reader: &mut BitReader, character_count: usize) -> Option<Vec<u8>> {
        let mut sjis = Vec::with_capacity(character_count * 2);
        for _ in 0..character_count {
            let value = reader.read_bits(13)?;
            let packed = ((value / 0xC0) << 8) | (value % 0xC0);
            let code = if packed < 0x1F00 {
                packed + 0x8140
            } else {
                packed + 0xC140
            };
            sjis.push((code >> 8) as u8);
            sjis.push(code as u8);
        }
        Some(sjis)
    }
}
