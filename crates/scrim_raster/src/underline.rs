//! Wavy underline distance field
//!
//! A sine curve with fixed frequency (two cycles across the bounds) and an
//! amplitude proportional to the underline thickness. Coverage is a band of
//! `thickness` pixels around the curve with a one-pixel anti-aliasing ramp on
//! each side; the vertical offset is corrected by the curve slope so the band
//! has uniform perpendicular thickness.

use crate::sdf::saturate;
use scrim_core::{Point, Rect};

/// Cycles of the sine wave across the underline bounds.
const CYCLES: f32 = 2.0;

/// Amplitude as a fraction of the thickness.
const AMPLITUDE: f32 = 0.8;

/// Coverage of the wavy band at pixel `p`.
pub fn wavy_coverage(p: Point, bounds: Rect, thickness: f32) -> f32 {
    let width = bounds.size.width;
    let height = bounds.size.height;

    // Bounds-relative, vertically centered coordinates.
    let sx = (p.x - bounds.origin.x) / width;
    let sy = (p.y - bounds.origin.y) / height - 0.5;

    let omega = CYCLES * core::f32::consts::TAU;
    let amplitude = AMPLITUDE * thickness / height;
    let sine = amplitude * (omega * sx).sin();

    // Slope in pixel space, so the arc-length correction is geometric.
    let slope = amplitude * omega * (omega * sx).cos() * height / width;
    let offset_px = (sy - sine) * height;
    let distance = offset_px / (1.0 + slope * slope).sqrt();

    let half_thickness = thickness / 2.0;
    let from_top = distance - half_thickness;
    let from_bottom = distance + half_thickness;
    saturate(0.5 - (-from_bottom).max(from_top))
}
