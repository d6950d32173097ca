//! Scrim rasterization core
//!
//! Turns declarative geometric instances (rounded quads, Gaussian-blurred
//! drop shadows, solid and wavy underlines, and vector outlines made of line
//! and quadratic Bezier segments) into anti-aliased, premultiplied-alpha
//! pixels, respecting per-instance content masks.
//!
//! Coverage comes from closed-form signed-distance functions evaluated per
//! pixel; there is no supersampling. The same instance layouts double as GPU
//! buffer records, and this crate evaluates them on the CPU, row-parallel.

pub mod blur;
pub mod curve;
pub mod frame;
pub mod renderer;
pub mod sdf;
pub mod stages;
pub mod underline;

pub use frame::{Frame, FrameError};
pub use renderer::Renderer;
pub use stages::{
    composite_sprites, rasterize_paths, render_quads, render_shadows, render_underlines,
};
