use crate::layout::alignment_pattern_centers;
use crate::models::{BitMatrix, Point, Version};
use crate::pipeline::FinderGroup;
use crate::utils::geometry::PerspectiveTransform;

/// Largest 5x5 alignment template mismatch still accepted
const MAX_ALIGNMENT_MISMATCH: usize = 6;

/// Module grid read from the image plus the symbol corners in image space
pub(super) struct Sampled {
    pub modules: BitMatrix,
    /// TL, TR, BR, BL
    pub corners: [Point; 4],
}

/// Estimated version first, then its neighbours
pub(super) fn version_candidates(estimated: Version) -> Vec<Version> {
    let n = estimated.number();
    let mut candidates = vec![estimated];
    candidates.extend(
        [n.wrapping_sub(1), n + 1]
            .into_iter()
            .filter_map(|v| Version::new(v).ok()),
    );
    candidates
}

pub(super) fn sample_symbol(
    binary: &BitMatrix,
    group: &FinderGroup,
    version: Version,
) -> Option<Sampled> {
    let dimension = version.size();
    let mut transform = build_transform(group, dimension)?;
    if version.number() >= 2 {
        if let Some(refined) = refine_with_alignment(binary, &transform, group, version) {
            transform = refined;
        }
    }

    let d = dimension as f32;
    let corners = [
        transform.transform(&Point::new(0.0, 0.0)),
        transform.transform(&Point::new(d, 0.0)),
        transform.transform(&Point::new(d, d)),
        transform.transform(&Point::new(0.0, d)),
    ];
    Some(Sampled {
        modules: sample_grid(binary, &transform, dimension, group.module_size),
        corners,
    })
}

/// Finder centres sit at module (3.5, 3.5) from their corners; the
/// bottom-right corner completes the parallelogram
fn build_transform(group: &FinderGroup, dimension: usize) -> Option<PerspectiveTransform> {
    let (tl, tr, bl) = (group.top_left, group.top_right, group.bottom_left);
    let br = Point::new(tr.x + bl.x - tl.x, tr.y + bl.y - tl.y);
    let far = dimension as f32 - 3.5;

    let src = [
        Point::new(3.5, 3.5),
        Point::new(far, 3.5),
        Point::new(3.5, far),
        Point::new(far, far),
    ];
    PerspectiveTransform::from_points(&src, &[tl, tr, bl, br])
}

/// Replace the estimated fourth corner with the located bottom-right
/// alignment pattern
fn refine_with_alignment(
    binary: &BitMatrix,
    transform: &PerspectiveTransform,
    group: &FinderGroup,
    version: Version,
) -> Option<PerspectiveTransform> {
    let &(ax, ay) = alignment_pattern_centers(version).iter().max_by_key(|(x, y)| x + y)?;
    let align_src = Point::new(ax as f32 + 0.5, ay as f32 + 0.5);
    let predicted = transform.transform(&align_src);
    let found = find_alignment_center(binary, predicted, group.module_size)?;

    let far = version.size() as f32 - 3.5;
    let src = [
        Point::new(3.5, 3.5),
        Point::new(far, 3.5),
        Point::new(3.5, far),
        align_src,
    ];
    let dst = [group.top_left, group.top_right, group.bottom_left, found];
    PerspectiveTransform::from_points(&src, &dst)
}

/// Search around `predicted` for the best 5x5 alignment template match.
///
/// Ties are averaged so a flat optimum resolves to its middle.
fn find_alignment_center(binary: &BitMatrix, predicted: Point, module_size: f32) -> Option<Point> {
    if !predicted.x.is_finite() || !predicted.y.is_finite() || module_size < 0.5 {
        return None;
    }

    let radius = (module_size * 4.0).max(4.0);
    let min_x = (predicted.x - radius).floor().max(0.0) as usize;
    let max_x = (predicted.x + radius).ceil().min(binary.width() as f32 - 1.0);
    let min_y = (predicted.y - radius).floor().max(0.0) as usize;
    let max_y = (predicted.y + radius).ceil().min(binary.height() as f32 - 1.0);
    if max_x < 0.0 || max_y < 0.0 {
        return None;
    }

    let mut best_mismatch = usize::MAX;
    let mut sum = (0.0f32, 0.0f32);
    let mut ties = 0usize;
    for y in min_y..=max_y as usize {
        for x in min_x..=max_x as usize {
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let Some(mismatch) = alignment_mismatch(binary, center, module_size) else {
                continue;
            };
            if mismatch < best_mismatch {
                best_mismatch = mismatch;
                sum = (center.x, center.y);
                ties = 1;
            } else if mismatch == best_mismatch {
                sum.0 += center.x;
                sum.1 += center.y;
                ties += 1;
            }
        }
    }

    if ties == 0 || best_mismatch > MAX_ALIGNMENT_MISMATCH {
        return None;
    }
    Some(Point::new(sum.0 / ties as f32, sum.1 / ties as f32))
}

/// Modules of a 5x5 alignment template (dark ring, light ring, dark centre)
/// that disagree with the image; `None` if the template leaves the image
fn alignment_mismatch(binary: &BitMatrix, center: Point, module_size: f32) -> Option<usize> {
    let mut mismatches = 0;
    for dy in -2i32..=2 {
        for dx in -2i32..=2 {
            let expected = dx.abs() == 2 || dy.abs() == 2 || (dx == 0 && dy == 0);
            let sx = (center.x + dx as f32 * module_size).floor();
            let sy = (center.y + dy as f32 * module_size).floor();
            if sx < 0.0 || sy < 0.0 || sx >= binary.width() as f32 || sy >= binary.height() as f32 {
                return None;
            }
            if binary.get(sx as usize, sy as usize) != expected {
                mismatches += 1;
            }
        }
    }
    Some(mismatches)
}

/// Read every module centre; a single pixel for small modules, 3x3
/// majority once modules span 3 pixels
fn sample_grid(
    binary: &BitMatrix,
    transform: &PerspectiveTransform,
    dimension: usize,
    module_size: f32,
) -> BitMatrix {
    let majority = module_size >= 3.0;
    let mut result = BitMatrix::new(dimension, dimension);

    for y in 0..dimension {
        for x in 0..dimension {
            let p = transform.transform(&Point::new(x as f32 + 0.5, y as f32 + 0.5));
            if !p.x.is_finite() || !p.y.is_finite() {
                continue;
            }
            let (px, py) = (p.x.floor() as isize, p.y.floor() as isize);

            let dark = if majority {
                let mut black = 0;
                let mut total = 0;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if let Some(v) = pixel(binary, px + dx, py + dy) {
                            total += 1;
                            black += v as usize;
                        }
                    }
                }
                total > 0 && black * 2 >= total
            } else {
                pixel(binary, px, py).unwrap_or(false)
            };
            result.set(x, y, dark);
        }
    }

    result
}

fn pixel(binary: &BitMatrix, x: isize, y: isize) -> Option<bool> {
    if x < 0 || y < 0 || x as usize >= binary.width() || y as usize >= binary.height() {
        return None;
    }
    Some(binary.get(x as usize, y as usize))
}
