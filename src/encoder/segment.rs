//! Segments and the mode analyzer that picks them.
//!
//! The analyzer runs a shortest-path search over byte positions: for every
//! position and mode it keeps the cheapest encoding of the prefix that ends
//! in a segment of that mode. Costs are counted in sixths of a bit so the
//! fractional per-character widths of Numeric (10/3) and Alphanumeric (11/2)
//! stay integral.

use super::bitstream::BitBuffer;
use crate::models::mode::{alphanumeric_value, is_kanji_pair, is_numeric};
use crate::models::{Mode, Version};

/// A run of input encoded in one mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    num_chars: usize,
    data: BitBuffer,
}

impl Segment {
    /// Numeric segment from ASCII digits; `None` on any other byte
    pub fn numeric(digits: &[u8]) -> Option<Self> {
        if !digits.iter().all(|&b| is_numeric(b)) {
            return None;
        }
        let mut data = BitBuffer::with_capacity(digits.len() * 10 / 3 + 4);
        for chunk in digits.chunks(3) {
            let value = chunk
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + (d - b'0') as u32);
            data.append_bits(value, chunk.len() * 3 + 1);
        }
        Some(Self {
            mode: Mode::Numeric,
            num_chars: digits.len(),
            data,
        })
    }

    /// Alphanumeric segment; `None` if a byte is outside the 45-character set
    pub fn alphanumeric(text: &[u8]) -> Option<Self> {
        let values = text
            .iter()
            .map(|&b| alphanumeric_value(b))
            .collect::<Option<Vec<u8>>>()?;
        let mut data = BitBuffer::with_capacity(text.len() * 11 / 2 + 6);
        for pair in values.chunks(2) {
            match *pair {
                [a, b] => data.append_bits(a as u32 * 45 + b as u32, 11),
                [a] => data.append_bits(a as u32, 6),
                _ => {}
            }
        }
        Some(Self {
            mode: Mode::Alphanumeric,
            num_chars: text.len(),
            data,
        })
    }

    /// Byte segment, 8 bits per byte
    pub fn bytes(bytes: &[u8]) -> Self {
        let mut data = BitBuffer::with_capacity(bytes.len() * 8);
        for &b in bytes {
            data.append_bits(b as u32, 8);
        }
        Self {
            mode: Mode::Byte,
            num_chars: bytes.len(),
            data,
        }
    }

    /// Kanji segment from Shift JIS double-byte characters
    pub fn kanji(sjis: &[u8]) -> Option<Self> {
        if sjis.len() % 2 != 0 {
            return None;
        }
        let mut data = BitBuffer::with_capacity(sjis.len() / 2 * 13);
        for pair in sjis.chunks(2) {
            let (hi, lo) = (pair[0], pair[1]);
            if !is_kanji_pair(hi, lo) {
                return None;
            }
            let code = u16::from_be_bytes([hi, lo]);
            let offset = if code <= 0x9FFC {
                code - 0x8140
            } else {
                code - 0xC140
            };
            let value = (offset >> 8) as u32 * 0xC0 + (offset & 0xFF) as u32;
            data.append_bits(value, 13);
        }
        Some(Self {
            mode: Mode::Kanji,
            num_chars: sjis.len() / 2,
            data,
        })
    }

    /// ECI designator for an assignment number below 1,000,000
    pub fn eci(assignment: u32) -> Option<Self> {
        let mut data = BitBuffer::new();
        match assignment {
            0..=0x7F => data.append_bits(assignment, 8),
            0x80..=0x3FFF => data.append_bits(0x8000 | assignment, 16),
            0x4000..=999_999 => data.append_bits(0xC0_0000 | assignment, 24),
            _ => return None,
        }
        Some(Self {
            mode: Mode::Eci,
            num_chars: 0,
            data,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Characters (bytes, digits, kanji) counted in the header
    pub fn num_chars(&self) -> usize {
        self.num_chars
    }

    /// Encoded payload without mode indicator or count
    pub fn data(&self) -> &BitBuffer {
        &self.data
    }

    /// Bits needed by all segments at `version`, headers included.
    ///
    /// `None` when a character count overflows its count field.
    pub fn total_bits(segments: &[Segment], version: Version) -> Option<usize> {
        let mut total = 0usize;
        for segment in segments {
            let count_bits = segment.mode.char_count_bits(version);
            if segment.mode != Mode::Eci && segment.num_chars >= 1usize << count_bits {
                return None;
            }
            total += 4 + count_bits + segment.data.len();
        }
        Some(total)
    }
}

const MODES: [Mode; 4] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte, Mode::Kanji];

/// Cost per character in sixths of a bit, and bytes consumed per character
fn unit_cost(mode: Mode) -> (usize, usize) {
    match mode {
        Mode::Numeric => (20, 1),
        Mode::Alphanumeric => (33, 1),
        Mode::Byte => (48, 1),
        Mode::Kanji => (78, 2),
        Mode::Eci => (0, 0),
    }
}

fn accepts(mode: Mode, data: &[u8], i: usize) -> bool {
    match mode {
        Mode::Numeric => is_numeric(data[i]),
        Mode::Alphanumeric => alphanumeric_value(data[i]).is_some(),
        Mode::Byte => true,
        Mode::Kanji => i + 1 < data.len() && is_kanji_pair(data[i], data[i + 1]),
        Mode::Eci => false,
    }
}

#[derive(Clone, Copy)]
struct Step {
    cost: usize,
    start: usize,
    // Mode of the cell this step extends; None at the start of the input
    prev: Option<usize>,
}

/// Split `data` into the cheapest segment list for the version class of `version`.
///
/// Never fails: Byte mode accepts anything. Empty input yields one empty Byte
/// segment. Kanji is only considered when `kanji` is set.
pub fn analyze(data: &[u8], version: Version, kanji: bool) -> Vec<Segment> {
    if data.is_empty() {
        return vec![Segment::bytes(data)];
    }
    let modes = if kanji { &MODES[..] } else { &MODES[..3] };
    let n = data.len();
    let header: Vec<usize> = modes
        .iter()
        .map(|m| 6 * (4 + m.char_count_bits(version)))
        .collect();

    // table[i][m]: cheapest encoding of data[..i] whose last segment is modes[m]
    let mut table: Vec<Vec<Option<Step>>> = vec![vec![None; modes.len()]; n + 1];

    for i in 0..n {
        if i > 0 && table[i].iter().all(Option::is_none) {
            continue;
        }
        for (m, &mode) in modes.iter().enumerate() {
            if !accepts(mode, data, i) {
                continue;
            }
            let (unit, width) = unit_cost(mode);

            let mut best: Option<(usize, Option<usize>)> = None;
            if i == 0 {
                best = Some((header[m] + unit, None));
            } else {
                if let Some(step) = table[i][m] {
                    best = Some((step.cost + unit, Some(m)));
                }
                for (p, cell) in table[i].iter().enumerate() {
                    if let Some(step) = cell {
                        let cost = step.cost.div_ceil(6) * 6 + header[m] + unit;
                        if best.is_none_or(|(c, _)| cost < c) {
                            best = Some((cost, Some(p)));
                        }
                    }
                }
            }

            if let Some((cost, prev)) = best {
                let slot = &mut table[i + width][m];
                if slot.is_none_or(|s| cost < s.cost) {
                    *slot = Some(Step {
                        cost,
                        start: i,
                        prev,
                    });
                }
            }
        }
    }

    // Walk back from the cheapest final state
    let mut mode = 0;
    for m in 1..modes.len() {
        let better = match (table[n][m], table[n][mode]) {
            (Some(a), Some(b)) => a.cost < b.cost,
            (Some(_), None) => true,
            _ => false,
        };
        if better {
            mode = m;
        }
    }

    let mut runs: Vec<(usize, usize, usize)> = Vec::new();
    let mut end = n;
    while end > 0 {
        let Some(step) = table[end][mode] else {
            break;
        };
        match runs.last_mut() {
            Some(last) if last.0 == mode => last.1 = step.start,
            _ => runs.push((mode, step.start, end)),
        }
        end = step.start;
        if let Some(prev) = step.prev {
            mode = prev;
        }
    }
    runs.reverse();

    runs.into_iter()
        .map(|(m, start, end)| {
            let chunk = &data[start..end];
            let segment = match modes[m] {
                Mode::Numeric => Segment::numeric(chunk),
                Mode::Alphanumeric => Segment::alphanumeric(chunk),
                Mode::Kanji => Segment::kanji(chunk),
                _ => None,
            };
            segment.unwrap_or_else(|| Segment::bytes(chunk))
        })
        .collect()
}
