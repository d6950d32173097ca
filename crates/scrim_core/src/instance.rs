//! Packed per-instance records
//!
//! GPU-ready data layouts for the four stages plus the per-frame uniform.
//! All structures are `#[repr(C)]` and implement `bytemuck::Pod`, so host
//! code can upload whole arrays with a single cast; the software evaluator
//! consumes the very same records. Field order is part of the contract and
//! must not change.
//!
//! Instances are consumed strictly by position: the host guarantees that the
//! order of records in a buffer matches draw order.

use crate::color::Rgba;
use crate::geometry::{Corners, Edges, Point, Rect, Size};
use crate::scene::{Path, PathVertex, Quad, Shadow, Underline};

/// Clip sentinel covering any reasonable viewport ("no clip").
pub const NO_CLIP: [f32; 4] = [-10000.0, -10000.0, 100000.0, 100000.0];

/// Per-frame uniform shared by every stage.
///
/// Memory layout:
/// - viewport_size: 2 x f32 (8 bytes)
/// - padding:       2 x f32 (8 bytes)
///   Total: 16 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub viewport_size: [f32; 2],
    pub _pad: [f32; 2],
}

impl Globals {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport_size: [width, height],
            _pad: [0.0; 2],
        }
    }

    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_size[0], self.viewport_size[1])
    }
}

/// A packed quad instance.
///
/// Memory layout (96 bytes):
/// - bounds_origin: 2 x f32
/// - bounds_size:   2 x f32
/// - clip_origin:   2 x f32
/// - clip_size:     2 x f32
/// - background:    4 x f32 (straight RGBA)
/// - border_color:  4 x f32
/// - corner_radii:  4 x f32 (top-left, top-right, bottom-right, bottom-left)
/// - border_widths: 4 x f32 (top, right, bottom, left)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadInstance {
    pub bounds_origin: [f32; 2],
    pub bounds_size: [f32; 2],
    pub clip_origin: [f32; 2],
    pub clip_size: [f32; 2],
    pub background: [f32; 4],
    pub border_color: [f32; 4],
    pub corner_radii: [f32; 4],
    pub border_widths: [f32; 4],
}

impl Default for QuadInstance {
    fn default() -> Self {
        Self {
            bounds_origin: [0.0; 2],
            bounds_size: [0.0; 2],
            clip_origin: [NO_CLIP[0], NO_CLIP[1]],
            clip_size: [NO_CLIP[2], NO_CLIP[3]],
            background: [0.0; 4],
            border_color: [0.0; 4],
            corner_radii: [0.0; 4],
            border_widths: [0.0; 4],
        }
    }
}

impl QuadInstance {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bounds_origin: [x, y],
            bounds_size: [width, height],
            ..Default::default()
        }
    }

    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = color.to_array();
        self
    }

    pub fn with_border(mut self, widths: Edges, color: Rgba) -> Self {
        self.border_widths = widths.to_array();
        self.border_color = color.to_array();
        self
    }

    pub fn with_corner_radii(mut self, radii: Corners) -> Self {
        self.corner_radii = radii.to_array();
        self
    }

    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip_origin = [clip.origin.x, clip.origin.y];
        self.clip_size = [clip.size.width, clip.size.height];
        self
    }

    pub fn bounds(&self) -> Rect {
        rect(self.bounds_origin, self.bounds_size)
    }

    pub fn clip(&self) -> Rect {
        rect(self.clip_origin, self.clip_size)
    }
}

impl From<&Quad> for QuadInstance {
    fn from(quad: &Quad) -> Self {
        Self {
            bounds_origin: [quad.bounds.origin.x, quad.bounds.origin.y],
            bounds_size: [quad.bounds.size.width, quad.bounds.size.height],
            clip_origin: [quad.clip.origin.x, quad.clip.origin.y],
            clip_size: [quad.clip.size.width, quad.clip.size.height],
            background: quad.background.to_array(),
            border_color: quad.border_color.to_array(),
            corner_radii: quad.corner_radii.to_array(),
            border_widths: quad.border_widths.to_array(),
        }
    }
}

/// A packed shadow instance.
///
/// Memory layout (80 bytes, vec2/vec4 aligned):
/// - blur_radius:   f32
/// - padding:       f32
/// - bounds_origin: 2 x f32
/// - bounds_size:   2 x f32
/// - padding:       2 x f32
/// - corner_radii:  4 x f32
/// - clip_origin:   2 x f32
/// - clip_size:     2 x f32
/// - color:         4 x f32
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShadowInstance {
    pub blur_radius: f32,
    pub _pad0: f32,
    pub bounds_origin: [f32; 2],
    pub bounds_size: [f32; 2],
    pub _pad1: [f32; 2],
    pub corner_radii: [f32; 4],
    pub clip_origin: [f32; 2],
    pub clip_size: [f32; 2],
    pub color: [f32; 4],
}

impl Default for ShadowInstance {
    fn default() -> Self {
        Self {
            blur_radius: 0.0,
            _pad0: 0.0,
            bounds_origin: [0.0; 2],
            bounds_size: [0.0; 2],
            _pad1: [0.0; 2],
            corner_radii: [0.0; 4],
            clip_origin: [NO_CLIP[0], NO_CLIP[1]],
            clip_size: [NO_CLIP[2], NO_CLIP[3]],
            color: [0.0; 4],
        }
    }
}

impl ShadowInstance {
    pub fn new(x: f32, y: f32, width: f32, height: f32, blur_radius: f32) -> Self {
        Self {
            blur_radius,
            bounds_origin: [x, y],
            bounds_size: [width, height],
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color.to_array();
        self
    }

    pub fn with_corner_radii(mut self, radii: Corners) -> Self {
        self.corner_radii = radii.to_array();
        self
    }

    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip_origin = [clip.origin.x, clip.origin.y];
        self.clip_size = [clip.size.width, clip.size.height];
        self
    }

    pub fn bounds(&self) -> Rect {
        rect(self.bounds_origin, self.bounds_size)
    }

    pub fn clip(&self) -> Rect {
        rect(self.clip_origin, self.clip_size)
    }
}

impl From<&Shadow> for ShadowInstance {
    fn from(shadow: &Shadow) -> Self {
        Self {
            blur_radius: shadow.blur_radius,
            _pad0: 0.0,
            bounds_origin: [shadow.bounds.origin.x, shadow.bounds.origin.y],
            bounds_size: [shadow.bounds.size.width, shadow.bounds.size.height],
            _pad1: [0.0; 2],
            corner_radii: shadow.corner_radii.to_array(),
            clip_origin: [shadow.clip.origin.x, shadow.clip.origin.y],
            clip_size: [shadow.clip.size.width, shadow.clip.size.height],
            color: shadow.color.to_array(),
        }
    }
}

/// Wavy flag lives in the low bit; remaining bits are reserved.
pub const UNDERLINE_WAVY_BIT: u32 = 1;

/// A packed underline instance.
///
/// Memory layout (64 bytes):
/// - bounds_origin: 2 x f32
/// - bounds_size:   2 x f32
/// - clip_origin:   2 x f32
/// - clip_size:     2 x f32
/// - color:         4 x f32
/// - thickness:     f32
/// - flags:         u32 (bit 0 = wavy)
/// - padding:       2 x f32
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UnderlineInstance {
    pub bounds_origin: [f32; 2],
    pub bounds_size: [f32; 2],
    pub clip_origin: [f32; 2],
    pub clip_size: [f32; 2],
    pub color: [f32; 4],
    pub thickness: f32,
    pub flags: u32,
    pub _pad: [f32; 2],
}

impl Default for UnderlineInstance {
    fn default() -> Self {
        Self {
            bounds_origin: [0.0; 2],
            bounds_size: [0.0; 2],
            clip_origin: [NO_CLIP[0], NO_CLIP[1]],
            clip_size: [NO_CLIP[2], NO_CLIP[3]],
            color: [0.0; 4],
            thickness: 1.0,
            flags: 0,
            _pad: [0.0; 2],
        }
    }
}

impl UnderlineInstance {
    pub fn new(x: f32, y: f32, width: f32, height: f32, thickness: f32) -> Self {
        Self {
            bounds_origin: [x, y],
            bounds_size: [width, height],
            thickness,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color.to_array();
        self
    }

    pub fn with_wavy(mut self, wavy: bool) -> Self {
        if wavy {
            self.flags |= UNDERLINE_WAVY_BIT;
        } else {
            self.flags &= !UNDERLINE_WAVY_BIT;
        }
        self
    }

    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip_origin = [clip.origin.x, clip.origin.y];
        self.clip_size = [clip.size.width, clip.size.height];
        self
    }

    pub fn is_wavy(&self) -> bool {
        self.flags & UNDERLINE_WAVY_BIT != 0
    }

    pub fn bounds(&self) -> Rect {
        rect(self.bounds_origin, self.bounds_size)
    }

    pub fn clip(&self) -> Rect {
        rect(self.clip_origin, self.clip_size)
    }
}

impl From<&Underline> for UnderlineInstance {
    fn from(underline: &Underline) -> Self {
        Self {
            bounds_origin: [underline.bounds.origin.x, underline.bounds.origin.y],
            bounds_size: [underline.bounds.size.width, underline.bounds.size.height],
            clip_origin: [underline.clip.origin.x, underline.clip.origin.y],
            clip_size: [underline.clip.size.width, underline.clip.size.height],
            color: underline.color.to_array(),
            thickness: underline.thickness,
            flags: u32::from(underline.wavy) * UNDERLINE_WAVY_BIT,
            _pad: [0.0; 2],
        }
    }
}

/// A packed path-rasterization vertex (not instanced; three per triangle).
///
/// Memory layout (48 bytes):
/// - xy_position: 2 x f32 (device pixels)
/// - st_position: 2 x f32 (curve parametrization)
/// - color:       4 x f32
/// - clip_origin: 2 x f32
/// - clip_size:   2 x f32
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PathVertexData {
    pub xy_position: [f32; 2],
    pub st_position: [f32; 2],
    pub color: [f32; 4],
    pub clip_origin: [f32; 2],
    pub clip_size: [f32; 2],
}

impl PathVertexData {
    pub fn from_path(path: &Path, vertex: &PathVertex) -> Self {
        let clipped = path.clipped_bounds();
        Self {
            xy_position: [vertex.position.x, vertex.position.y],
            st_position: vertex.st,
            color: path.color.to_array(),
            clip_origin: [clipped.origin.x, clipped.origin.y],
            clip_size: [clipped.size.width, clipped.size.height],
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.xy_position[0], self.xy_position[1])
    }

    pub fn clip(&self) -> Rect {
        rect(self.clip_origin, self.clip_size)
    }
}

/// A packed composite sprite: bounds only. Color and clip were already
/// applied when the path was rasterized into the intermediate target.
///
/// Memory layout (16 bytes):
/// - bounds_origin: 2 x f32
/// - bounds_size:   2 x f32
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub bounds_origin: [f32; 2],
    pub bounds_size: [f32; 2],
}

impl SpriteInstance {
    pub fn from_bounds(bounds: Rect) -> Self {
        Self {
            bounds_origin: [bounds.origin.x, bounds.origin.y],
            bounds_size: [bounds.size.width, bounds.size.height],
        }
    }

    pub fn bounds(&self) -> Rect {
        rect(self.bounds_origin, self.bounds_size)
    }
}

fn rect(origin: [f32; 2], size: [f32; 2]) -> Rect {
    Rect::from_origin_size(Point::new(origin[0], origin[1]), Size::new(size[0], size[1]))
}
