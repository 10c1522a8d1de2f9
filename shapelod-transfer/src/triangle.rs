//! Point-to-triangle closest point queries
//!
//! Voronoi-region closest point computation. Alongside the closest point
//! itself, every query returns the barycentric coordinates of that point,
//! which downstream resampling uses as interpolation weights.

use shapelod_core::Point3f;

/// Compute the closest point on triangle (a, b, c) to a query point,
/// together with its barycentric weights relative to (a, b, c).
///
/// The weights are non-negative and sum to 1 up to rounding. Degenerate
/// triangles fall back to the nearest vertex.
pub fn closest_point_on_triangle(
    p: &Point3f,
    a: &Point3f,
    b: &Point3f,
    c: &Point3f,
) -> (Point3f, [f32; 3]) {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return (*a, [1.0, 0.0, 0.0]);
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return (*b, [0.0, 1.0, 0.0]);
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return (Point3f::from(a.coords + ab * v), [1.0 - v, v, 0.0]);
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return (*c, [0.0, 0.0, 1.0]);
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return (Point3f::from(a.coords + ac * w), [1.0 - w, 0.0, w]);
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return (
            Point3f::from(b.coords + (c - b) * w),
            [0.0, 1.0 - w, w],
        );
    }

    let sum = va + vb + vc;
    if !(sum > f32::MIN_POSITIVE) {
        // Degenerate triangle: every region test failed, pick the nearest vertex
        let da = (p - a).norm_squared();
        let db = (p - b).norm_squared();
        let dc = (p - c).norm_squared();
        return if da <= db && da <= dc {
            (*a, [1.0, 0.0, 0.0])
        } else if db <= dc {
            (*b, [0.0, 1.0, 0.0])
        } else {
            (*c, [0.0, 0.0, 1.0])
        };
    }

    let denom = 1.0 / sum;
    let v = vb * denom;
    let w = vc * denom;
    (
        Point3f::from(a.coords + ab * v + ac * w),
        [1.0 - v - w, v, w],
    )
}
