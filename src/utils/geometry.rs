/// Perspective mapping between module space and image space
use crate::models::Point;

/// 3x3 homography with the bottom-right coefficient fixed to 1
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveTransform {
    m: [f64; 8],
}

impl PerspectiveTransform {
    /// Solve the transform taking each `src[i]` to `dst[i]`.
    ///
    /// `None` when three of the points are collinear.
    pub fn from_points(src: &[Point; 4], dst: &[Point; 4]) -> Option<Self> {
        // Direct linear transform: two equations per correspondence
        let mut a = [[0.0f64; 8]; 8];
        let mut b = [0.0f64; 8];

        for i in 0..4 {
            let (sx, sy) = (src[i].x as f64, src[i].y as f64);
            let (dx, dy) = (dst[i].x as f64, dst[i].y as f64);

            a[2 * i] = [sx, sy, 1.0, 0.0, 0.0, 0.0, -dx * sx, -dx * sy];
            b[2 * i] = dx;
            a[2 * i + 1] = [0.0, 0.0, 0.0, sx, sy, 1.0, -dy * sx, -dy * sy];
            b[2 * i + 1] = dy;
        }

        solve_linear_system(a, b).map(|m| Self { m })
    }

    /// Map a point through the transform
    pub fn transform(&self, p: &Point) -> Point {
        let (x, y) = (p.x as f64, p.y as f64);
        let m = &self.m;

        let denominator = m[6] * x + m[7] * y + 1.0;
        if denominator.abs() < 1e-12 {
            return Point::new(f32::NAN, f32::NAN);
        }

        Point::new(
            ((m[0] * x + m[1] * y + m[2]) / denominator) as f32,
            ((m[3] * x + m[4] * y + m[5]) / denominator) as f32,
        )
    }
}

/// Gaussian elimination with partial pivoting
#[allow(clippy::needless_range_loop)]
fn solve_linear_system(mut a: [[f64; 8]; 8], mut b: [f64; 8]) -> Option<[f64; 8]> {
    const N: usize = 8;

    for i in 0..N {
        let pivot = (i..N).max_by(|&r, &s| a[r][i].abs().total_cmp(&a[s][i].abs()))?;
        if a[pivot][i].abs() < 1e-12 {
            return None;
        }
        a.swap(i, pivot);
        b.swap(i, pivot);

        for k in (i + 1)..N {
            let factor = a[k][i] / a[i][i];
            b[k] -= factor * b[i];
            for j in i..N {
                a[k][j] -= factor * a[i][j];
            }
        }
    }

    let mut x = [0.0f64; N];
    for i in (0..N).rev() {
        let mut sum = b[i];
        for j in (i + 1)..N {
            sum -= a[i][j] * x[j];
        }
        x[i] = sum / a[i][i];
    }

    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(p: Point, x: f32, y: f32) -> bool {
        (p.x - x).abs() < 1e-3 && (p.y - y).abs() < 1e-3
    }

    #[test]
    fn test_scale_and_offset() {
        let src = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let dst = [
            Point::new(40.0, 40.0),
            Point::new(140.0, 40.0),
            Point::new(140.0, 140.0),
            Point::new(40.0, 140.0),
        ];

        let t = PerspectiveTransform::from_points(&src, &dst).unwrap();
        assert!(close(t.transform(&Point::new(5.0, 5.0)), 90.0, 90.0));
        assert!(close(t.transform(&Point::new(0.5, 9.5)), 45.0, 135.0));
    }

    #[test]
    fn test_maps_corners_of_skewed_quad() {
        let src = [
            Point::new(3.5, 3.5),
            Point::new(21.5, 3.5),
            Point::new(3.5, 21.5),
            Point::new(21.5, 21.5),
        ];
        let dst = [
            Point::new(12.0, 20.0),
            Point::new(190.0, 31.0),
            Point::new(25.0, 205.0),
            Point::new(170.0, 180.0),
        ];

        let t = PerspectiveTransform::from_points(&src, &dst).unwrap();
        for (s, d) in src.iter().zip(&dst) {
            assert!(close(t.transform(s), d.x, d.y));
        }
    }

    #[test]
    fn test_collinear_points_rejected() {
        let src = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        ];
        let dst = src;
        assert!(PerspectiveTransform::from_points(&src, &dst).is_none());
    }
}
