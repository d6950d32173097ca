//! Renders a small showcase scene (shadowed card, underlines, a curved
//! leaf) and writes it to `compositor.png`.
//!
//! Run with `RUST_LOG=scrim_raster=trace` to watch the stages go by.

use anyhow::Context;
use scrim_core::{Corners, Edges, Path, Point, Quad, Rect, Rgba, Scene, Shadow, Underline};
use scrim_raster::{Frame, Renderer};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (width, height) = (480u32, 320u32);
    let screen = Rect::new(0.0, 0.0, width as f32, height as f32);

    let mut scene = Scene::new();

    // A card with a soft shadow, rounded corners, and a hairline border.
    scene.push_shadow(Shadow {
        bounds: Rect::new(56.0, 56.0, 220.0, 140.0),
        clip: screen,
        corner_radii: Corners::splat(16.0),
        color: Rgba::new(0.0, 0.0, 0.0, 0.55),
        blur_radius: 12.0,
    });
    scene.push_quad(Quad {
        bounds: Rect::new(48.0, 48.0, 220.0, 140.0),
        clip: screen,
        background: Rgba::new(0.93, 0.94, 0.96, 1.0),
        border_color: Rgba::new(0.35, 0.40, 0.50, 1.0),
        corner_radii: Corners::splat(16.0),
        border_widths: Edges::splat(2.0),
    });

    // Text decorations: a plain rule and a spellcheck squiggle.
    scene.push_underline(Underline {
        bounds: Rect::new(72.0, 112.0, 170.0, 2.0),
        clip: screen,
        color: Rgba::new(0.25, 0.30, 0.75, 1.0),
        thickness: 2.0,
        wavy: false,
    });
    scene.push_underline(Underline {
        bounds: Rect::new(72.0, 138.0, 170.0, 10.0),
        clip: screen,
        color: Rgba::new(0.80, 0.20, 0.25, 1.0),
        thickness: 2.0,
        wavy: true,
    });

    // A leaf from two quadratic curves.
    let mut leaf = Path::new(
        Point::new(320.0, 240.0),
        Rgba::new(0.16, 0.55, 0.35, 1.0),
        screen,
    );
    leaf.curve_to(Point::new(360.0, 110.0), Point::new(420.0, 220.0));
    leaf.curve_to(Point::new(370.0, 290.0), Point::new(320.0, 240.0));
    scene.push_path(leaf);

    let mut frame = Frame::new(width, height);
    frame.clear([0.07, 0.07, 0.09, 1.0]);
    Renderer::new().render(&scene, &mut frame);

    let image = image::RgbaImage::from_raw(width, height, frame.to_rgba8())
        .context("frame buffer has unexpected size")?;
    image.save("compositor.png").context("write compositor.png")?;
    println!("wrote compositor.png");
    Ok(())
}
