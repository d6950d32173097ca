//! Scene primitives and draw-order batching
//!
//! A [`Scene`] accumulates the per-frame primitives in submission order and
//! hands them to the renderer as [`PrimitiveBatch`] runs: maximal sequences
//! of consecutive same-kind primitives. Batching preserves draw order across
//! kinds, which matters because source-over blending is order-dependent.

use crate::color::Rgba;
use crate::geometry::{Corners, Edges, Point, Rect};

/// A filled, optionally bordered, rounded rectangle.
#[derive(Clone, Copy, Debug, Default)]
pub struct Quad {
    /// Content bounds in device pixels.
    pub bounds: Rect,
    /// Content mask; pixels outside never write the target.
    pub clip: Rect,
    pub background: Rgba,
    pub border_color: Rgba,
    pub corner_radii: Corners,
    pub border_widths: Edges,
}

/// A soft drop shadow of a rounded rectangle.
#[derive(Clone, Copy, Debug, Default)]
pub struct Shadow {
    pub bounds: Rect,
    pub clip: Rect,
    pub corner_radii: Corners,
    pub color: Rgba,
    /// Gaussian sigma; the rasterized extent grows by `3 * blur_radius` on
    /// every side.
    pub blur_radius: f32,
}

/// A text underline, either solid or wavy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Underline {
    pub bounds: Rect,
    pub clip: Rect,
    pub color: Rgba,
    pub thickness: f32,
    pub wavy: bool,
}

/// One corner of a path triangle.
///
/// `st` is the curve parametrization: a triangle whose `st` values are all
/// equal (zero gradient) fills solid; otherwise the covered region is bounded
/// by the implicit curve `s^2 = t`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathVertex {
    pub position: Point,
    pub st: [f32; 2],
}

/// Flat st for polygon-interior triangles. `s^2 - t = -1` everywhere, with a
/// zero gradient, so the evaluator treats them as solid fill.
const ST_INTERIOR: [f32; 2] = [0.0, 1.0];

/// A filled vector outline, pre-expanded into triangles.
///
/// Built incrementally from line and quadratic Bezier segments: each segment
/// appends an interior fan triangle (after the first) and curves additionally
/// append one curve triangle parametrized so that `s^2 = t` traces the
/// Bezier.
#[derive(Clone, Debug)]
pub struct Path {
    pub vertices: Vec<PathVertex>,
    pub color: Rgba,
    pub clip: Rect,
    /// Tight bounds over all vertices.
    pub bounds: Rect,
    start: Point,
    current: Point,
    contour_count: usize,
    order: u32,
}

impl Path {
    pub fn new(start: Point, color: Rgba, clip: Rect) -> Self {
        Self {
            vertices: Vec::new(),
            color,
            clip,
            bounds: Rect::from_origin_size(start, crate::geometry::Size::ZERO),
            start,
            current: start,
            contour_count: 0,
            order: 0,
        }
    }

    /// Wrap already-expanded triangle vertices (three per triangle).
    pub fn from_vertices(vertices: Vec<PathVertex>, color: Rgba, clip: Rect) -> Self {
        let mut bounds = vertices
            .first()
            .map(|v| Rect::from_origin_size(v.position, crate::geometry::Size::ZERO))
            .unwrap_or(Rect::ZERO);
        for v in &vertices {
            bounds = bounds.union(&Rect::from_origin_size(
                v.position,
                crate::geometry::Size::ZERO,
            ));
        }
        let start = bounds.origin;
        Self {
            vertices,
            color,
            clip,
            bounds,
            start,
            current: start,
            contour_count: 0,
            order: 0,
        }
    }

    pub fn line_to(&mut self, to: Point) {
        self.contour_count += 1;
        if self.contour_count > 1 {
            self.push_triangle(
                [self.start, self.current, to],
                [ST_INTERIOR, ST_INTERIOR, ST_INTERIOR],
            );
        }
        self.current = to;
    }

    pub fn curve_to(&mut self, ctrl: Point, to: Point) {
        self.contour_count += 1;
        if self.contour_count > 1 {
            self.push_triangle(
                [self.start, self.current, to],
                [ST_INTERIOR, ST_INTERIOR, ST_INTERIOR],
            );
        }
        // The canonical quadratic parametrization: st of (0,0), (1/2,0),
        // (1,1) makes s^2 - t vanish exactly on the curve through `ctrl`.
        self.push_triangle(
            [self.current, ctrl, to],
            [[0.0, 0.0], [0.5, 0.0], [1.0, 1.0]],
        );
        self.current = to;
    }

    /// Bounds intersected with the content mask; the region the two-pass
    /// composite actually copies.
    pub fn clipped_bounds(&self) -> Rect {
        self.bounds.intersect(&self.clip)
    }

    /// Draw order assigned by the scene this path was pushed into.
    pub fn order(&self) -> u32 {
        self.order
    }

    fn push_triangle(&mut self, xy: [Point; 3], st: [[f32; 2]; 3]) {
        for i in 0..3 {
            self.bounds = self
                .bounds
                .union(&Rect::from_origin_size(xy[i], crate::geometry::Size::ZERO));
            self.vertices.push(PathVertex {
                position: xy[i],
                st: st[i],
            });
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PrimitiveKind {
    Quad,
    Shadow,
    Underline,
    Path,
}

/// A maximal run of consecutive same-kind primitives in draw order.
#[derive(Debug)]
pub enum PrimitiveBatch<'a> {
    Quads(&'a [Quad]),
    Shadows(&'a [Shadow]),
    Underlines(&'a [Underline]),
    Paths(&'a [Path]),
}

/// Per-frame primitive accumulator.
#[derive(Default)]
pub struct Scene {
    quads: Vec<Quad>,
    shadows: Vec<Shadow>,
    underlines: Vec<Underline>,
    paths: Vec<Path>,
    runs: Vec<(PrimitiveKind, usize)>,
    next_order: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.quads.clear();
        self.shadows.clear();
        self.underlines.clear();
        self.paths.clear();
        self.runs.clear();
        self.next_order = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn push_quad(&mut self, quad: Quad) {
        self.quads.push(quad);
        self.push_run(PrimitiveKind::Quad);
    }

    pub fn push_shadow(&mut self, shadow: Shadow) {
        self.shadows.push(shadow);
        self.push_run(PrimitiveKind::Shadow);
    }

    pub fn push_underline(&mut self, underline: Underline) {
        self.underlines.push(underline);
        self.push_run(PrimitiveKind::Underline);
    }

    pub fn push_path(&mut self, mut path: Path) {
        path.order = self.next_order;
        self.paths.push(path);
        self.push_run(PrimitiveKind::Path);
    }

    fn push_run(&mut self, kind: PrimitiveKind) {
        self.next_order += 1;
        match self.runs.last_mut() {
            Some((last, count)) if *last == kind => *count += 1,
            _ => self.runs.push((kind, 1)),
        }
    }

    /// Iterate primitives as same-kind runs, in submission order.
    pub fn batches(&self) -> impl Iterator<Item = PrimitiveBatch<'_>> {
        let mut offsets = [0usize; 4];
        self.runs.iter().map(move |&(kind, count)| {
            let ix = kind as usize;
            let start = offsets[ix];
            offsets[ix] += count;
            match kind {
                PrimitiveKind::Quad => PrimitiveBatch::Quads(&self.quads[start..start + count]),
                PrimitiveKind::Shadow => {
                    PrimitiveBatch::Shadows(&self.shadows[start..start + count])
                }
                PrimitiveKind::Underline => {
                    PrimitiveBatch::Underlines(&self.underlines[start..start + count])
                }
                PrimitiveKind::Path => PrimitiveBatch::Paths(&self.paths[start..start + count]),
            }
        })
    }
}
