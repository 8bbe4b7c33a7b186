/// BCH codes protecting QR format info (15,5) and version info (18,6)
use crate::models::{ECLevel, MaskPattern};

/// Format info generator: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u32 = 0x537;
/// XOR mask applied to format info so it is never all zero
const FORMAT_MASK: u16 = 0x5412;
/// Version info generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const VERSION_GENERATOR: u32 = 0x1F25;

/// Both codes correct up to 3 bit errors
const MAX_CORRECTABLE: u32 = 3;

/// BCH encode/decode for format and version information
pub struct Bch;

impl Bch {
    /// 15-bit masked format word for an EC level and mask
    pub fn encode_format(ec_level: ECLevel, mask: MaskPattern) -> u16 {
        let data = ((ec_level.format_bits() as u32) << 3) | mask.id() as u32;
        let word = (data << 10) | remainder(data, 10, FORMAT_GENERATOR);
        word as u16 ^ FORMAT_MASK
    }

    /// Nearest valid format word, returned with its Hamming distance.
    ///
    /// `None` when every codeword is more than 3 bits away.
    pub fn decode_format(bits: u16) -> Option<(ECLevel, MaskPattern, u32)> {
        let mut best: Option<(u8, u32)> = None;
        for data in 0u8..32 {
            let ec_level = ECLevel::from_format_bits(data >> 3);
            let mask = MaskPattern::from_bits(data);
            let distance = (Self::encode_format(ec_level, mask) ^ bits).count_ones();
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((data, distance));
            }
        }

        let (data, distance) = best?;
        if distance > MAX_CORRECTABLE {
            return None;
        }
        Some((
            ECLevel::from_format_bits(data >> 3),
            MaskPattern::from_bits(data),
            distance,
        ))
    }

    /// 18-bit version word (versions 7-40)
    pub fn encode_version(version: u8) -> u32 {
        let data = version as u32;
        (data << 12) | remainder(data, 12, VERSION_GENERATOR)
    }

    /// Nearest valid version word, returned with its Hamming distance
    pub fn decode_version(bits: u32) -> Option<(u8, u32)> {
        (7u8..=40)
            .map(|v| (v, (Self::encode_version(v) ^ bits).count_ones()))
            .min_by_key(|&(_, distance)| distance)
            .filter(|&(_, distance)| distance <= MAX_CORRECTABLE)
    }
}

/// Remainder of data * x^degree modulo the generator (degree = generator degree)
fn remainder(data: u32, degree: u32, generator: u32) -> u32 {
    let mut rem = data;
    for _ in 0..degree {
        rem = (rem << 1) ^ ((rem >> (degree - 1)) * generator);
    }
    rem & ((1 << degree) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_format_words() {
        // Values from the format information table of ISO/IEC 18004
        assert_eq!(
            Bch::encode_format(ECLevel::L, MaskPattern::Pattern0),
            0b111011111000100
        );
        assert_eq!(
            Bch::encode_format(ECLevel::M, MaskPattern::Pattern0),
            0b101010000010010
        );
        assert_eq!(
            Bch::encode_format(ECLevel::H, MaskPattern::Pattern7),
            0b000100000111011
        );
    }

    #[test]
    fn test_format_round_trip_all() {
        for ec in ECLevel::ALL {
            for mask in MaskPattern::ALL {
                let bits = Bch::encode_format(ec, mask);
                assert_eq!(Bch::decode_format(bits), Some((ec, mask, 0)));
            }
        }
    }

    #[test]
    fn test_format_corrects_three_bits() {
        let bits = Bch::encode_format(ECLevel::Q, MaskPattern::Pattern5);
        let damaged = bits ^ 0b100000010000001;
        assert_eq!(
            Bch::decode_format(damaged),
            Some((ECLevel::Q, MaskPattern::Pattern5, 3))
        );
    }

    #[test]
    fn test_format_rejects_far_word() {
        // Five flipped bits leave this word at least 4 away from every codeword
        let bits = Bch::encode_format(ECLevel::L, MaskPattern::Pattern2);
        assert_eq!(Bch::decode_format(bits ^ 0b11111), None);
    }

    #[test]
    fn test_known_version_words() {
        assert_eq!(Bch::encode_version(7), 0x07C94);
        assert_eq!(Bch::encode_version(8), 0x085BC);
        assert_eq!(Bch::encode_version(40), 0x28C69);
    }

    #[test]
    fn test_version_correction() {
        for v in 7..=40 {
            let bits = Bch::encode_version(v);
            assert_eq!(Bch::decode_version(bits), Some((v, 0)));
            assert_eq!(Bch::decode_version(bits ^ 0b1001), Some((v, 2)));
        }
    }
}
