//! Stage entry points
//!
//! Each stage expands its instances into device-space geometry (the unit
//! square scaled to the instance bounds; explicit triangles for paths), maps
//! it through the shared coordinate mapper, and evaluates coverage at every
//! covered pixel center. Instances are processed strictly in buffer order,
//! since source-over blending is order-dependent. The pixels of one instance
//! evaluate row-parallel; each is a pure function of its own position.

use rayon::prelude::*;

use crate::blur::shadow_coverage;
use crate::curve::{curve_coverage, st_at, st_jacobian};
use crate::frame::{over, Frame};
use crate::sdf::{
    corner_for, edge_coverage, inside_clip, ndc_to_pixel, pixel_to_ndc, rounded_rect_sdf,
};
use crate::underline::wavy_coverage;
use scrim_core::{
    Globals, PathVertexData, Point, QuadInstance, Rect, Rgba, ShadowInstance, Size,
    SpriteInstance, UnderlineInstance,
};

/// Coverage below one bit of an 8-bit channel is a hard discard, not a
/// blend.
const ALPHA_FLOOR: f32 = 1.0 / 255.0;

/// Pixel columns and rows covered by an axis-aligned rect, after the round
/// trip through normalized device coordinates. A pixel is covered when its
/// center lies in the half-open rect, matching hardware rasterization of the
/// two-triangle unit-square expansion.
fn pixel_span(
    bounds: Rect,
    viewport: Size,
    frame: &Frame,
) -> Option<(std::ops::Range<u32>, std::ops::Range<u32>)> {
    if viewport.is_empty() || bounds.size.is_empty() {
        return None;
    }

    let min = ndc_to_pixel(pixel_to_ndc(bounds.origin, viewport), viewport);
    let max = ndc_to_pixel(
        pixel_to_ndc(Point::new(bounds.max_x(), bounds.max_y()), viewport),
        viewport,
    );

    let x0 = ((min.x - 0.5).ceil() as i64).clamp(0, frame.width() as i64) as u32;
    let x1 = ((max.x - 0.5).ceil() as i64).clamp(0, frame.width() as i64) as u32;
    let y0 = ((min.y - 0.5).ceil() as i64).clamp(0, frame.height() as i64) as u32;
    let y1 = ((max.y - 0.5).ceil() as i64).clamp(0, frame.height() as i64) as u32;
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0..x1, y0..y1))
}

/// Evaluate `shade` at every pixel center in the span and blend the
/// premultiplied result over the target, row-parallel. `None` leaves the
/// pixel untouched.
fn shade_span(
    frame: &mut Frame,
    xs: std::ops::Range<u32>,
    ys: std::ops::Range<u32>,
    shade: impl Fn(Point) -> Option<[f32; 4]> + Sync,
) {
    let width = frame.width() as usize;
    frame
        .data_mut()
        .par_chunks_exact_mut(width)
        .enumerate()
        .skip(ys.start as usize)
        .take((ys.end - ys.start) as usize)
        .for_each(|(y, row)| {
            for x in xs.clone() {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if let Some(src) = shade(center) {
                    let px = &mut row[x as usize];
                    *px = over(*px, src);
                }
            }
        });
}

/// Fill and border coverage for rounded quads.
pub fn render_quads(frame: &mut Frame, globals: &Globals, quads: &[QuadInstance]) {
    if quads.is_empty() {
        return;
    }
    tracing::trace!(count = quads.len(), "quad stage");
    let viewport = globals.viewport();

    for quad in quads {
        let bounds = quad.bounds();
        let Some((xs, ys)) = pixel_span(bounds, viewport, frame) else {
            continue;
        };

        let clip = quad.clip();
        let background = Rgba::from(quad.background);
        let border_color = Rgba::from(quad.border_color);
        let center = bounds.center();
        let half = bounds.size.half();
        let widths = quad.border_widths;
        let has_border = widths.iter().any(|w| *w > 0.0);

        // Inset rect for the border test: half extents shrink by the
        // axis-averaged widths, the center shifts to absorb asymmetry.
        let avg_x = (widths[3] + widths[1]) / 2.0;
        let avg_y = (widths[0] + widths[2]) / 2.0;
        let inner_half = Size::new((half.width - avg_x).max(0.0), (half.height - avg_y).max(0.0));
        let inner_center = Point::new(
            (widths[3] - widths[1]) / 2.0,
            (widths[0] - widths[2]) / 2.0,
        );
        let radius_inset = (avg_x + avg_y) / 2.0;

        shade_span(frame, xs, ys, |p| {
            if !inside_clip(p, &clip) {
                return None;
            }
            let offset = p - center;
            let radius = corner_for(offset, quad.corner_radii);
            let coverage = edge_coverage(rounded_rect_sdf(offset, half, radius));
            if coverage < ALPHA_FLOOR {
                return None;
            }

            let color = if has_border {
                let inner_radius = (radius - radius_inset).max(0.0);
                let inner_distance =
                    rounded_rect_sdf(offset - inner_center, inner_half, inner_radius);
                if inner_distance > 0.0 {
                    border_color
                } else {
                    background
                }
            } else {
                background
            };
            Some(color.premultiply(coverage))
        });
    }
}

/// Gaussian-blurred rounded-rect shadows.
pub fn render_shadows(frame: &mut Frame, globals: &Globals, shadows: &[ShadowInstance]) {
    if shadows.is_empty() {
        return;
    }
    tracing::trace!(count = shadows.len(), "shadow stage");
    let viewport = globals.viewport();

    for shadow in shadows {
        let sigma = shadow.blur_radius.max(0.0);
        let bounds = shadow.bounds();
        // The kernel tail reaches 3 sigma past the shape; the geometry must
        // cover it or the blur gets truncated before the clip even applies.
        let Some((xs, ys)) = pixel_span(bounds.expand(3.0 * sigma), viewport, frame) else {
            continue;
        };

        let clip = shadow.clip();
        let color = Rgba::from(shadow.color);
        let center = bounds.center();
        let half = bounds.size.half();

        shade_span(frame, xs, ys, |p| {
            if !inside_clip(p, &clip) {
                return None;
            }
            let offset = p - center;
            let corner = corner_for(offset, shadow.corner_radii);
            let coverage = shadow_coverage(offset, half, corner, sigma);
            if coverage < ALPHA_FLOOR {
                return None;
            }
            Some(color.premultiply(coverage))
        });
    }
}

/// Solid and wavy underlines.
pub fn render_underlines(frame: &mut Frame, globals: &Globals, underlines: &[UnderlineInstance]) {
    if underlines.is_empty() {
        return;
    }
    tracing::trace!(count = underlines.len(), "underline stage");
    let viewport = globals.viewport();

    for underline in underlines {
        let bounds = underline.bounds();
        let Some((xs, ys)) = pixel_span(bounds, viewport, frame) else {
            continue;
        };

        let clip = underline.clip();
        let color = Rgba::from(underline.color);
        let wavy = underline.is_wavy();
        let thickness = underline.thickness;

        shade_span(frame, xs, ys, |p| {
            if !inside_clip(p, &clip) {
                return None;
            }
            let coverage = if wavy {
                wavy_coverage(p, bounds, thickness)
            } else {
                1.0
            };
            if coverage < ALPHA_FLOOR {
                return None;
            }
            Some(color.premultiply(coverage))
        });
    }
}

/// Rasterize path triangles into the intermediate target.
///
/// Three consecutive records form one triangle. Coverage within a triangle
/// comes from the implicit curve `s^2 = t` (or is forced to one for flat st);
/// triangle edges follow the top-left fill rule so triangles sharing an edge
/// cover every pixel exactly once.
pub fn rasterize_paths(intermediate: &mut Frame, globals: &Globals, vertices: &[PathVertexData]) {
    if vertices.is_empty() {
        return;
    }
    tracing::trace!(triangles = vertices.len() / 3, "path rasterization");
    let viewport = globals.viewport();

    for triangle in vertices.chunks_exact(3) {
        let mut xy = [
            triangle[0].position(),
            triangle[1].position(),
            triangle[2].position(),
        ];
        let mut st = [
            triangle[0].st_position,
            triangle[1].st_position,
            triangle[2].st_position,
        ];

        // Normalize winding so the interior is on the positive side of all
        // three edge functions.
        let area = (xy[1] - xy[0]).x * (xy[2] - xy[0]).y - (xy[1] - xy[0]).y * (xy[2] - xy[0]).x;
        if area == 0.0 {
            continue;
        }
        if area < 0.0 {
            xy.swap(1, 2);
            st.swap(1, 2);
        }

        let Some(jacobian) = st_jacobian(xy, st) else {
            continue;
        };

        let tri_bounds = triangle_bounds(&xy);
        let Some((xs, ys)) = pixel_span(tri_bounds, viewport, intermediate) else {
            continue;
        };

        let clip = triangle[0].clip();
        let color = Rgba::from(triangle[0].color);
        let edges = [
            Edge::new(xy[0], xy[1]),
            Edge::new(xy[1], xy[2]),
            Edge::new(xy[2], xy[0]),
        ];

        shade_span(intermediate, xs, ys, |p| {
            if !edges.iter().all(|e| e.accepts(p)) {
                return None;
            }
            if !inside_clip(p, &clip) {
                return None;
            }
            let coverage = curve_coverage(st_at(&jacobian, xy[0], st[0], p), &jacobian);
            if coverage < ALPHA_FLOOR {
                return None;
            }
            Some(color.premultiply(coverage))
        });
    }
}

/// Composite the rasterized paths back onto the target: one bounds-sized
/// sprite per region, sampling the intermediate with a bilinear filter and
/// emitting the texel unmodified.
pub fn composite_sprites(
    frame: &mut Frame,
    globals: &Globals,
    intermediate: &Frame,
    sprites: &[SpriteInstance],
) {
    if sprites.is_empty() {
        return;
    }
    tracing::trace!(count = sprites.len(), "path composite");
    let viewport = globals.viewport();

    for sprite in sprites {
        let Some((xs, ys)) = pixel_span(sprite.bounds(), viewport, frame) else {
            continue;
        };

        shade_span(frame, xs, ys, |p| {
            let sampled =
                intermediate.sample_bilinear(p.x / viewport.width, p.y / viewport.height);
            if sampled == [0.0; 4] {
                return None;
            }
            Some(sampled)
        });
    }
}

fn triangle_bounds(xy: &[Point; 3]) -> Rect {
    let min_x = xy[0].x.min(xy[1].x).min(xy[2].x);
    let min_y = xy[0].y.min(xy[1].y).min(xy[2].y);
    let max_x = xy[0].x.max(xy[1].x).max(xy[2].x);
    let max_y = xy[0].y.max(xy[1].y).max(xy[2].y);
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// One triangle edge function with the top-left fill rule.
struct Edge {
    a: Point,
    dx: f32,
    dy: f32,
    top_left: bool,
}

impl Edge {
    fn new(a: Point, b: Point) -> Self {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        // With positive-area winding and y growing down, interior lies below
        // horizontal edges with dx > 0 (top edges) and right of edges with
        // dy < 0 (left edges); those own their boundary pixels.
        let top_left = dy < 0.0 || (dy == 0.0 && dx > 0.0);
        Self { a, dx, dy, top_left }
    }

    fn accepts(&self, p: Point) -> bool {
        let e = self.dx * (p.y - self.a.y) - self.dy * (p.x - self.a.x);
        e > 0.0 || (e == 0.0 && self.top_left)
    }
}
