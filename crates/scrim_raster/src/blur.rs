//! Gaussian-blurred rounded rectangles
//!
//! Models a drop shadow as the convolution of the rounded-rect indicator
//! function with an isotropic Gaussian. The convolution factors per axis: at
//! a fixed y the rectangle is an interval, and interval ⊛ Gaussian has the
//! closed form `Φ(x + curved) - Φ(x - curved)`. The remaining y integral is
//! approximated with four midpoint samples over the support of the signal.

use crate::sdf::{edge_coverage, rounded_rect_sdf};
use scrim_core::{Point, Size};

/// Below this sigma the blur is numerically meaningless; fall back to the
/// sharp rounded-rect indicator.
pub const SIGMA_EPSILON: f32 = 1e-3;

/// Rational-polynomial approximation of the error function, accurate to a
/// few 1e-4 over the real line.
pub fn erf(x: f32) -> f32 {
    let s = x.signum();
    let a = x.abs();
    let mut y = 1.0 + (0.278393 + (0.230389 + (0.000972 + 0.078108 * a) * a) * a) * a;
    y *= y;
    s - s / (y * y)
}

/// Normalized Gaussian density.
pub fn gaussian(x: f32, sigma: f32) -> f32 {
    let v = x / sigma;
    (-0.5 * v * v).exp() / (core::f32::consts::TAU.sqrt() * sigma)
}

/// Closed-form blur of one horizontal slice of the rounded rectangle.
///
/// At height `y` (relative to the rect center) the rect covers the interval
/// `[-curved, curved]`, where `curved` shrinks inside the corner circles.
pub fn blur_along_x(x: f32, y: f32, sigma: f32, corner: f32, half_size: Size) -> f32 {
    let delta = (half_size.height - corner - y.abs()).min(0.0);
    let curved = half_size.width - corner + (corner * corner - delta * delta).max(0.0).sqrt();
    let inv = core::f32::consts::FRAC_1_SQRT_2 / sigma;
    let lower = 0.5 + 0.5 * erf((x - curved) * inv);
    let upper = 0.5 + 0.5 * erf((x + curved) * inv);
    upper - lower
}

/// Blurred coverage at `p_centered` (relative to the rect center) for a
/// rounded rect with the given half extents and (already picked) corner
/// radius.
///
/// The y integral samples only where the signal is non-zero: `±3σ`
/// intersected with the distance to the rect's vertical extent. Four
/// fixed-width midpoint samples are enough at that support.
pub fn shadow_coverage(p_centered: Point, half_size: Size, corner: f32, sigma: f32) -> f32 {
    let corner = corner.clamp(0.0, half_size.min_side());
    if sigma <= SIGMA_EPSILON {
        return edge_coverage(rounded_rect_sdf(p_centered, half_size, corner));
    }

    let low = p_centered.y - half_size.height;
    let high = p_centered.y + half_size.height;
    let start = (-3.0 * sigma).clamp(low, high);
    let end = (3.0 * sigma).clamp(low, high);

    let step = (end - start) / 4.0;
    let mut y = start + step * 0.5;
    let mut coverage = 0.0;
    for _ in 0..4 {
        coverage +=
            blur_along_x(p_centered.x, p_centered.y - y, sigma, corner, half_size)
                * gaussian(y, sigma)
                * step;
        y += step;
    }
    coverage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erf_is_odd_and_bounded() {
        assert_eq!(erf(0.0), 0.0);
        for x in [0.1_f32, 0.5, 1.0, 2.0, 5.0] {
            let y = erf(x);
            assert!(y > 0.0 && y <= 1.0);
            assert!((erf(-x) + y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_erf_reference_values() {
        assert!((erf(1.0) - 0.8427).abs() < 5e-3);
        assert!((erf(2.0) - 0.9953).abs() < 5e-3);
        assert!(erf(4.0) > 0.999);
    }

    #[test]
    fn test_shadow_coverage_approaches_indicator_for_tiny_sigma() {
        let half = Size::new(50.0, 50.0);
        // Inside, well away from the boundary.
        assert!(shadow_coverage(Point::ZERO, half, 0.0, 1e-4) > 0.999);
        // Outside.
        assert!(shadow_coverage(Point::new(60.0, 0.0), half, 0.0, 1e-4) < 1e-3);
    }

    #[test]
    fn test_shadow_coverage_near_one_at_center() {
        let half = Size::new(50.0, 50.0);
        assert!(shadow_coverage(Point::ZERO, half, 0.0, 10.0) > 0.95);
    }

    #[test]
    fn test_shadow_spreads_beyond_bounds() {
        let half = Size::new(50.0, 50.0);
        // 10px outside the edge with sigma 10: clearly visible.
        assert!(shadow_coverage(Point::new(0.0, 60.0), half, 0.0, 10.0) > 0.01);
        // A sharper shadow has no business out there.
        assert!(shadow_coverage(Point::new(0.0, 60.0), half, 0.0, 2.0) < 1e-3);
    }

    #[test]
    fn test_shadow_vanishes_past_three_sigma() {
        let half = Size::new(50.0, 50.0);
        let sigma = 10.0;
        // The y quadrature clamps its support to ±3σ, so past it the sum is
        // exactly empty.
        assert_eq!(
            shadow_coverage(Point::new(0.0, half.height + 3.0 * sigma), half, 0.0, sigma),
            0.0
        );
        // Along x only the erf tail remains.
        assert!(
            shadow_coverage(Point::new(half.width + 3.5 * sigma, 0.0), half, 0.0, sigma) < 1e-3
        );
    }

    #[test]
    fn test_blur_along_x_full_slice_inside() {
        // Centered slice of a wide rect: the whole kernel mass is inside.
        let half = Size::new(100.0, 20.0);
        assert!((blur_along_x(0.0, 0.0, 5.0, 0.0, half) - 1.0).abs() < 1e-3);
    }
}
