//! Shared signed-distance and coordinate helpers
//!
//! Every stage maps pixels through the same two functions in here: the
//! pixel/device-coordinate mapper and the clip predicate. Using one
//! implementation for both is what guarantees seam-free shared edges and
//! identical discard behavior across stages.

use scrim_core::{Point, Rect, Size};

/// Clamp to `[0, 1]`.
pub fn saturate(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Hermite step between two edges.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// Pixel coordinates (y down) to normalized device coordinates (y up).
pub fn pixel_to_ndc(p: Point, viewport: Size) -> Point {
    Point::new(
        2.0 * p.x / viewport.width - 1.0,
        1.0 - 2.0 * p.y / viewport.height,
    )
}

/// Inverse of [`pixel_to_ndc`].
pub fn ndc_to_pixel(p: Point, viewport: Size) -> Point {
    Point::new(
        (p.x + 1.0) * viewport.width / 2.0,
        (1.0 - p.y) * viewport.height / 2.0,
    )
}

/// Content-mask test. A pixel center outside the clip on either axis is
/// hard-discarded before any shading happens.
pub fn inside_clip(p: Point, clip: &Rect) -> bool {
    p.x >= clip.origin.x && p.x <= clip.max_x() && p.y >= clip.origin.y && p.y <= clip.max_y()
}

/// Pick the corner radius for the quadrant containing `offset` (a point
/// relative to the rectangle center, y down). Radii are in top-left,
/// top-right, bottom-right, bottom-left order.
pub fn corner_for(offset: Point, radii: [f32; 4]) -> f32 {
    if offset.y < 0.0 {
        if offset.x < 0.0 {
            radii[0]
        } else {
            radii[1]
        }
    } else if offset.x < 0.0 {
        radii[3]
    } else {
        radii[2]
    }
}

/// Signed distance from `p_centered` (relative to the rectangle center) to a
/// rounded rectangle with the given half extents and corner radius. Negative
/// inside; magnitude approximates Euclidean distance to the boundary.
///
/// The radius is clamped so it never exceeds the half extent of the shorter
/// side.
pub fn rounded_rect_sdf(p_centered: Point, half_size: Size, radius: f32) -> f32 {
    let r = radius.min(half_size.min_side()).max(0.0);
    let q = Point::new(
        p_centered.x.abs() - half_size.width + r,
        p_centered.y.abs() - half_size.height + r,
    );
    q.x.max(q.y).min(0.0) + q.max(Point::ZERO).length() - r
}

/// Distance to a rounded rectangle in absolute device coordinates, with the
/// per-quadrant radius picked from `radii`.
pub fn quad_sdf(p: Point, bounds: Rect, radii: [f32; 4]) -> f32 {
    let half_size = bounds.size.half();
    let offset = p - bounds.center();
    rounded_rect_sdf(offset, half_size, corner_for(offset, radii))
}

/// Outer-edge coverage: a one-pixel analytic anti-aliasing ramp centered on
/// the boundary.
pub fn edge_coverage(distance: f32) -> f32 {
    1.0 - smoothstep(-0.5, 0.5, distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_ndc_round_trip() {
        let viewport = Size::new(800.0, 600.0);
        let p = Point::new(123.5, 456.5);
        let back = ndc_to_pixel(pixel_to_ndc(p, viewport), viewport);
        assert!((back.x - p.x).abs() < EPSILON);
        assert!((back.y - p.y).abs() < EPSILON);
    }

    #[test]
    fn test_ndc_flips_y() {
        let viewport = Size::new(100.0, 100.0);
        assert_eq!(pixel_to_ndc(Point::ZERO, viewport), Point::new(-1.0, 1.0));
        assert_eq!(
            pixel_to_ndc(Point::new(100.0, 100.0), viewport),
            Point::new(1.0, -1.0)
        );
    }

    #[test]
    fn test_sdf_zero_set_matches_boundary() {
        // Square of half size 50 with radius 10: along the x axis the
        // boundary sits at |x| = 50.
        let half = Size::new(50.0, 50.0);
        assert!((rounded_rect_sdf(Point::new(45.0, 0.0), half, 10.0) + 5.0).abs() < EPSILON);
        assert!((rounded_rect_sdf(Point::new(55.0, 0.0), half, 10.0) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_sdf_quadrant_symmetry() {
        let half = Size::new(50.0, 30.0);
        let p = Point::new(41.0, 23.0);
        let d = rounded_rect_sdf(p, half, 8.0);
        for q in [
            Point::new(-p.x, p.y),
            Point::new(p.x, -p.y),
            Point::new(-p.x, -p.y),
        ] {
            assert!((rounded_rect_sdf(q, half, 8.0) - d).abs() < EPSILON);
        }
    }

    #[test]
    fn test_sdf_radius_clamped_to_half_extent() {
        // An over-large radius behaves like radius = min(half_w, half_h).
        let half = Size::new(40.0, 20.0);
        let p = Point::new(10.0, 5.0);
        assert_eq!(
            rounded_rect_sdf(p, half, 500.0),
            rounded_rect_sdf(p, half, 20.0)
        );
    }

    #[test]
    fn test_corner_for_picks_by_quadrant() {
        let radii = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(corner_for(Point::new(-1.0, -1.0), radii), 1.0);
        assert_eq!(corner_for(Point::new(1.0, -1.0), radii), 2.0);
        assert_eq!(corner_for(Point::new(1.0, 1.0), radii), 3.0);
        assert_eq!(corner_for(Point::new(-1.0, 1.0), radii), 4.0);
    }

    #[test]
    fn test_quad_sdf_uses_per_corner_radii() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let radii = [20.0, 0.0, 0.0, 0.0];
        // Inside the rounded top-left corner's cut.
        assert!(quad_sdf(Point::new(2.0, 2.0), bounds, radii) > 0.0);
        // The square top-right corner still covers its point.
        assert!(quad_sdf(Point::new(98.0, 2.0), bounds, radii) < 0.0);
    }

    #[test]
    fn test_inside_clip_boundary() {
        let clip = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(inside_clip(Point::new(99.5, 50.0), &clip));
        assert!(!inside_clip(Point::new(100.5, 50.0), &clip));
    }

    #[test]
    fn test_edge_coverage_ramp() {
        assert_eq!(edge_coverage(-1.0), 1.0);
        assert_eq!(edge_coverage(1.0), 0.0);
        assert!((edge_coverage(0.0) - 0.5).abs() < EPSILON);
    }
}
