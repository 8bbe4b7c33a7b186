//! Scan pipeline: binarization passes, finder grouping and per-group decoding

use tracing::{debug, trace};

use crate::decoder::config;
use crate::decoder::qr_decoder::QrDecoder;
use crate::detector::finder::{FinderDetector, FinderPattern};
use crate::error::{QrError, Result, more_advanced};
use crate::models::{BitMatrix, Point, QRCode};
use crate::utils::binarization::{adaptive_binarize, adaptive_window, otsu_binarize};

/// Finder candidates considered when forming triples
const MAX_GROUPING_CANDIDATES: usize = 24;

/// Three finder patterns ordered as the corners of one symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderGroup {
    /// Right-angle corner finder centre
    pub top_left: Point,
    /// Finder centre along the first row
    pub top_right: Point,
    /// Finder centre along the first column
    pub bottom_left: Point,
    /// Module size derived from finder spacing
    pub module_size: f32,
    /// Estimated modules per side (17 + 4 * version)
    pub dimension: usize,
    /// Indices into the finder candidate list
    pub members: [usize; 3],
}

/// Decode every symbol in a grayscale frame.
///
/// Runs the adaptive pass first and the global Otsu pass only when it finds
/// nothing. Fails with the most advanced error of both passes.
pub fn decode_grayscale(gray: &[u8], width: usize, height: usize) -> Result<Vec<QRCode>> {
    let window = adaptive_window(width, height, config::adaptive_window());
    debug!(width, height, window, "adaptive binarization pass");
    let adaptive = match decode_binary(&adaptive_binarize(gray, width, height, window)) {
        Ok(found) => return Ok(found),
        Err(err) => err,
    };

    debug!(%adaptive, "falling back to Otsu binarization");
    decode_binary(&otsu_binarize(gray, width, height)).map_err(|otsu| more_advanced(adaptive, otsu))
}

/// Locate, group and decode symbols in one binarized image
pub(crate) fn decode_binary(binary: &BitMatrix) -> Result<Vec<QRCode>> {
    let patterns = FinderDetector::detect(binary);
    if patterns.len() < 3 {
        return Err(QrError::FinderPatternNotFound {
            found: patterns.len(),
        });
    }

    let groups = group_finder_patterns(&patterns, config::max_finder_groups());
    debug!(finders = patterns.len(), groups = groups.len(), "finder grouping");

    let mut results = Vec::new();
    let mut used = vec![false; patterns.len()];
    let mut failure = QrError::FinderPatternNotFound {
        found: patterns.len(),
    };
    for (index, group) in groups.iter().enumerate() {
        if group.members.iter().any(|&m| used[m]) {
            continue;
        }
        match QrDecoder::decode(binary, group) {
            Ok(qr) => {
                debug!(group = index, version = qr.version.number(), "group decoded");
                group.members.iter().for_each(|&m| used[m] = true);
                results.push(qr);
            }
            Err(err) => {
                trace!(group = index, %err, "group failed");
                failure = more_advanced(failure, err);
            }
        }
    }

    if results.is_empty() {
        Err(failure)
    } else {
        Ok(results)
    }
}

/// Plausible finder triples, best first, at most `max_groups`
pub(crate) fn group_finder_patterns(patterns: &[FinderPattern], max_groups: usize) -> Vec<FinderGroup> {
    let n = patterns.len().min(MAX_GROUPING_CANDIDATES);
    let mut scored = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let triple = [&patterns[i], &patterns[j], &patterns[k]];
                let Some(score) = triple_score(triple) else {
                    continue;
                };
                if let Some(group) = order_finder_patterns(triple, [i, j, k]) {
                    scored.push((score, group));
                }
            }
        }
    }

    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored.truncate(max_groups);
    scored.into_iter().map(|(_, group)| group).collect()
}

/// Lower is better; `None` if the triple cannot be one symbol's finders
fn triple_score(triple: [&FinderPattern; 3]) -> Option<f32> {
    let sizes = triple.map(|p| p.module_size);
    let min_size = sizes.iter().fold(f32::INFINITY, |a, &b| a.min(b));
    let max_size = sizes.iter().fold(0.0f32, |a, &b| a.max(b));
    if min_size < 1.0 {
        return None;
    }
    let size_ratio = max_size / min_size;
    if size_ratio > 1.5 {
        return None;
    }

    let [p0, p1, p2] = triple.map(|p| p.center);
    let d01 = p0.distance(&p1);
    let d02 = p0.distance(&p2);
    let d12 = p1.distance(&p2);
    let distances = [d01, d02, d12];
    let min_d = distances.iter().fold(f32::INFINITY, |a, &b| a.min(b));
    let max_d = distances.iter().fold(0.0f32, |a, &b| a.max(b));

    let avg_module = sizes.iter().sum::<f32>() / 3.0;
    if min_d < avg_module * 3.0 {
        return None;
    }
    let distortion = max_d / min_d;
    if distortion > 5.0 {
        return None;
    }

    let (a2, b2, c2) = (d01 * d01, d02 * d02, d12 * d12);
    let cos_0 = ((a2 + b2 - c2) / (2.0 * d01 * d02)).abs();
    let cos_1 = ((a2 + c2 - b2) / (2.0 * d01 * d12)).abs();
    let cos_2 = ((b2 + c2 - a2) / (2.0 * d02 * d12)).abs();
    let best_cos = cos_0.min(cos_1).min(cos_2);
    if best_cos >= 0.3 {
        return None;
    }

    Some(size_ratio * 2.0 + distortion + best_cos)
}

/// Pick the right-angle corner as top-left and use the cross product to tell
/// top-right from bottom-left (image y grows downwards)
fn order_finder_patterns(triple: [&FinderPattern; 3], members: [usize; 3]) -> Option<FinderGroup> {
    let mut best_idx = 0usize;
    let mut best_cos = f32::INFINITY;
    for i in 0..3 {
        let p = triple[i].center;
        let p1 = triple[(i + 1) % 3].center;
        let p2 = triple[(i + 2) % 3].center;

        let (v1x, v1y) = (p1.x - p.x, p1.y - p.y);
        let (v2x, v2y) = (p2.x - p.x, p2.y - p.y);
        let denom = (v1x * v1x + v1y * v1y).sqrt() * (v2x * v2x + v2y * v2y).sqrt();
        if denom == 0.0 {
            continue;
        }
        let cos = ((v1x * v2x + v1y * v2y) / denom).abs();
        if cos < best_cos {
            best_cos = cos;
            best_idx = i;
        }
    }

    let tl = (best_idx, triple[best_idx]);
    let p1 = ((best_idx + 1) % 3, triple[(best_idx + 1) % 3]);
    let p2 = ((best_idx + 2) % 3, triple[(best_idx + 2) % 3]);

    let (v1x, v1y) = (p1.1.center.x - tl.1.center.x, p1.1.center.y - tl.1.center.y);
    let (v2x, v2y) = (p2.1.center.x - tl.1.center.x, p2.1.center.y - tl.1.center.y);
    let cross = v1x * v2y - v1y * v2x;
    let (tr, bl) = if cross > 0.0 { (p1, p2) } else { (p2, p1) };

    let avg_module = (tl.1.module_size + tr.1.module_size + bl.1.module_size) / 3.0;
    let mean_distance =
        (tl.1.center.distance(&tr.1.center) + tl.1.center.distance(&bl.1.center)) / 2.0;
    let dimension = estimate_dimension_from_distance(mean_distance, avg_module)?;

    let module_size = mean_distance / (dimension as f32 - 7.0);
    if !(0.7..=1.3).contains(&(module_size / avg_module)) {
        return None;
    }

    Some(FinderGroup {
        top_left: tl.1.center,
        top_right: tr.1.center,
        bottom_left: bl.1.center,
        module_size,
        dimension,
        members: [members[tl.0], members[tr.0], members[bl.0]],
    })
}

/// Finder centres are `dimension - 7` modules apart
fn estimate_dimension_from_distance(distance: f32, module_size: f32) -> Option<usize> {
    if module_size <= 0.0 {
        return None;
    }
    let raw_dim = distance / module_size + 7.0;
    if raw_dim < 19.0 {
        return None;
    }
    let version = ((raw_dim - 17.0) / 4.0).round() as i32;
    if !(1..=40).contains(&version) {
        return None;
    }
    Some(17 + 4 * version as usize)
}
