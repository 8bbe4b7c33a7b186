//! Mask selection by the four standard penalty rules.
//!
//! N1: each run of five or more same-coloured modules in a row or column
//!     scores 3 plus one per module beyond five.
//! N2: each 2x2 block of one colour scores 3.
//! N3: each 1:1:3:1:1 dark-light pattern with four light modules on either
//!     side scores 40; modules outside the symbol count as light.
//! N4: 10 per full 5% that the dark ratio deviates from 50%.

use crate::ecc::bch::Bch;
use crate::layout::{FunctionMask, apply_mask, format};
use crate::models::{BitMatrix, ECLevel, MaskPattern};

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

const FINDER_LIKE: [bool; 7] = [true, false, true, true, true, false, true];

/// Total N1-N4 penalty of a finished (masked, format-stamped) symbol
pub fn penalty_score(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    let mut score = 0;
    let mut line = vec![false; size];

    for y in 0..size {
        for (x, module) in line.iter_mut().enumerate() {
            *module = matrix.get(x, y);
        }
        score += line_penalty(&line);
    }
    for x in 0..size {
        for (y, module) in line.iter_mut().enumerate() {
            *module = matrix.get(x, y);
        }
        score += line_penalty(&line);
    }

    for y in 0..size.saturating_sub(1) {
        for x in 0..size - 1 {
            let c = matrix.get(x, y);
            if c == matrix.get(x + 1, y) && c == matrix.get(x, y + 1) && c == matrix.get(x + 1, y + 1)
            {
                score += PENALTY_N2;
            }
        }
    }

    let total = size * size;
    let dark = matrix.count_ones();
    let deviation = (dark * 2).abs_diff(total) * 10 / total;
    score + deviation as u32 * PENALTY_N4
}

/// N1 and N3 for one row or column
fn line_penalty(line: &[bool]) -> u32 {
    let mut score = 0;

    let mut run = 1;
    for i in 1..=line.len() {
        if i < line.len() && line[i] == line[i - 1] {
            run += 1;
        } else {
            if run >= 5 {
                score += PENALTY_N1 + (run - 5) as u32;
            }
            run = 1;
        }
    }

    let light = |i: isize| i < 0 || i as usize >= line.len() || !line[i as usize];
    for start in 0..line.len().saturating_sub(6) {
        if line[start..start + 7] != FINDER_LIKE {
            continue;
        }
        let s = start as isize;
        let before = (s - 4..s).all(light);
        let after = (s + 7..s + 11).all(light);
        if before || after {
            score += PENALTY_N3;
        }
    }

    score
}

/// Apply each mask with its format word and keep the lowest penalty; ties go
/// to the lower mask id.
///
/// `matrix` holds function patterns and unmasked data; it comes back masked
/// with format information written.
pub fn select_mask(matrix: &mut BitMatrix, func: &FunctionMask, ec_level: ECLevel) -> MaskPattern {
    let mut best = MaskPattern::Pattern0;
    let mut best_score = u32::MAX;
    for mask in MaskPattern::ALL {
        apply_mask(matrix, mask, func);
        format::write_format_bits(matrix, Bch::encode_format(ec_level, mask));
        let score = penalty_score(matrix);
        tracing::trace!(mask = mask.id(), score, "mask penalty");
        if score < best_score {
            best = mask;
            best_score = score;
        }
        apply_mask(matrix, mask, func);
    }
    apply_fixed_mask(matrix, func, ec_level, best);
    best
}

/// Apply a caller-chosen mask and write the matching format information
pub fn apply_fixed_mask(
    matrix: &mut BitMatrix,
    func: &FunctionMask,
    ec_level: ECLevel,
    mask: MaskPattern,
) {
    apply_mask(matrix, mask, func);
    format::write_format_bits(matrix, Bch::encode_format(ec_level, mask));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(pattern: &str) -> Vec<bool> {
        pattern.chars().map(|c| c == '#').collect()
    }

    #[test]
    fn test_runs() {
        // Runs of 5 and 7 dark, the light runs are short
        assert_eq!(line_penalty(&line("#####.#######..")), 3 + 5);
    }

    #[test]
    fn test_finder_like_with_light_margin() {
        // Run penalty for the 6 light modules, N3 once (light both sides counts once)
        assert_eq!(line_penalty(&line("#.###.#......")), 3 + 1 + 40);
        // Pattern at the edge: outside the symbol counts as light
        assert_eq!(line_penalty(&line("#.###.#.#.#.#")), 40);
        // Dark module within four of both ends: no N3
        assert_eq!(line_penalty(&line("#.#.###.#.#")), 0);
    }

    #[test]
    fn test_balance_and_blocks() {
        // All dark 5x5: runs 10 lines * (3 + 0), blocks 16 * 3, balance 100% -> 10 * 10
        let mut matrix = BitMatrix::new(5, 5);
        for y in 0..5 {
            for x in 0..5 {
                matrix.set(x, y, true);
            }
        }
        assert_eq!(penalty_score(&matrix), 30 + 48 + 100);
    }
}
