use super::Version;

/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
pub const ALPHANUMERIC_TABLE: [u8; 45] = *b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Segment data mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Digits 0-9, 10 bits per 3 digits
    Numeric,
    /// [`ALPHANUMERIC_TABLE`], 11 bits per pair
    Alphanumeric,
    /// Arbitrary bytes, 8 bits each
    Byte,
    /// Shift JIS double-byte characters, 13 bits each
    Kanji,
    /// Extended Channel Interpretation designator
    Eci,
}

impl Mode {
    /// 4-bit mode indicator
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
            Mode::Kanji => 0b1000,
            Mode::Eci => 0b0111,
        }
    }

    /// Mode for a 4-bit indicator; terminator and unsupported modes give `None`
    pub fn from_indicator(bits: u32) -> Option<Self> {
        match bits {
            0b0001 => Some(Mode::Numeric),
            0b0010 => Some(Mode::Alphanumeric),
            0b0100 => Some(Mode::Byte),
            0b1000 => Some(Mode::Kanji),
            0b0111 => Some(Mode::Eci),
            _ => None,
        }
    }

    /// Width of the character count field (versions 1-9 / 10-26 / 27-40)
    pub fn char_count_bits(&self, version: Version) -> usize {
        let widths = match self {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
            Mode::Kanji => [8, 10, 12],
            Mode::Eci => [0, 0, 0],
        };
        widths[version_class(version)]
    }
}

/// Version range sharing the same count widths: 0 = 1-9, 1 = 10-26, 2 = 27-40
pub fn version_class(version: Version) -> usize {
    match version.number() {
        0..=9 => 0,
        10..=26 => 1,
        _ => 2,
    }
}

pub fn is_numeric(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Index of `b` in [`ALPHANUMERIC_TABLE`]
pub fn alphanumeric_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'Z' => Some(b - b'A' + 10),
        b' ' => Some(36),
        b'$' => Some(37),
        b'%' => Some(38),
        b'*' => Some(39),
        b'+' => Some(40),
        b'-' => Some(41),
        b'.' => Some(42),
        b'/' => Some(43),
        b':' => Some(44),
        _ => None,
    }
}

/// Whether `hi lo` is a Shift JIS double-byte character representable in Kanji mode
pub fn is_kanji_pair(hi: u8, lo: u8) -> bool {
    let code = u16::from_be_bytes([hi, lo]);
    let in_range = (0x8140..=0x9FFC).contains(&code) || (0xE040..=0xEBBF).contains(&code);
    in_range && (0x40..=0xFC).contains(&lo) && lo != 0x7F
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_bits_by_version_class() {
        let v = |n| Version::new(n).unwrap();
        assert_eq!(Mode::Numeric.char_count_bits(v(1)), 10);
        assert_eq!(Mode::Numeric.char_count_bits(v(10)), 12);
        assert_eq!(Mode::Alphanumeric.char_count_bits(v(26)), 11);
        assert_eq!(Mode::Byte.char_count_bits(v(9)), 8);
        assert_eq!(Mode::Byte.char_count_bits(v(27)), 16);
        assert_eq!(Mode::Kanji.char_count_bits(v(40)), 12);
    }

    #[test]
    fn test_alphanumeric_table() {
        for (i, &c) in ALPHANUMERIC_TABLE.iter().enumerate() {
            assert_eq!(alphanumeric_value(c), Some(i as u8));
        }
        assert_eq!(alphanumeric_value(b'a'), None);
    }

    #[test]
    fn test_indicator_round_trip() {
        for mode in [Mode::Numeric, Mode::Alphanumeric, Mode::Byte, Mode::Kanji, Mode::Eci] {
            assert_eq!(Mode::from_indicator(mode.indicator()), Some(mode));
        }
        assert_eq!(Mode::from_indicator(0), None);
    }

    #[test]
    fn test_kanji_pairs() {
        assert!(is_kanji_pair(0x93, 0x5F)); // 点
        assert!(is_kanji_pair(0xE4, 0xAA)); // 茗
        assert!(!is_kanji_pair(0x41, 0x42));
        assert!(!is_kanji_pair(0x93, 0x7F));
        assert!(!is_kanji_pair(0xEB, 0xC0));
    }
}
