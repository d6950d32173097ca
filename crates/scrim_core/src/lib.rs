//! Scrim core types
//!
//! Geometry, color, scene primitives, and the packed instance layouts shared
//! by the rasterization core and by GPU hosts.

pub mod color;
pub mod geometry;
pub mod instance;
pub mod scene;

pub use color::Rgba;
pub use geometry::{Corners, Edges, Point, Rect, Size};
pub use instance::{
    Globals, PathVertexData, QuadInstance, ShadowInstance, SpriteInstance, UnderlineInstance,
    NO_CLIP, UNDERLINE_WAVY_BIT,
};
pub use scene::{Path, PathVertex, PrimitiveBatch, Quad, Scene, Shadow, Underline};
