//! Frame renderer
//!
//! Consumes a [`Scene`] batch by batch in draw order. Quad, shadow, and
//! underline batches render straight into the target; a path batch switches
//! to the two-pass sequence: triangles rasterize into an intermediate target
//! that must be complete before the composite pass samples it back.

use crate::frame::Frame;
use crate::stages;
use scrim_core::{
    Globals, Path, PathVertexData, PrimitiveBatch, QuadInstance, Scene, ShadowInstance,
    SpriteInstance, UnderlineInstance,
};

/// Renders scenes into [`Frame`] targets, owning the intermediate target
/// used by path rasterization.
#[derive(Default)]
pub struct Renderer {
    // Recreated lazily whenever the viewport size changes.
    path_intermediate: Option<Frame>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `scene` over the current contents of `frame`. The frame's
    /// dimensions define the viewport uniform shared by all stages.
    pub fn render(&mut self, scene: &Scene, frame: &mut Frame) {
        let globals = Globals::new(frame.width() as f32, frame.height() as f32);
        tracing::debug!(
            width = frame.width(),
            height = frame.height(),
            "render frame"
        );

        for batch in scene.batches() {
            match batch {
                PrimitiveBatch::Quads(quads) => {
                    let instances: Vec<QuadInstance> =
                        quads.iter().map(QuadInstance::from).collect();
                    stages::render_quads(frame, &globals, &instances);
                }
                PrimitiveBatch::Shadows(shadows) => {
                    let instances: Vec<ShadowInstance> =
                        shadows.iter().map(ShadowInstance::from).collect();
                    stages::render_shadows(frame, &globals, &instances);
                }
                PrimitiveBatch::Underlines(underlines) => {
                    let instances: Vec<UnderlineInstance> =
                        underlines.iter().map(UnderlineInstance::from).collect();
                    stages::render_underlines(frame, &globals, &instances);
                }
                PrimitiveBatch::Paths(paths) => {
                    self.draw_paths(frame, &globals, paths);
                }
            }
        }
    }

    /// Two-pass path rendering: rasterize into the intermediate target, then
    /// composite bounds-sized sprites back onto the frame.
    fn draw_paths(&mut self, frame: &mut Frame, globals: &Globals, paths: &[Path]) {
        if paths.is_empty() {
            return;
        }

        self.ensure_path_intermediate(frame.width(), frame.height());
        let intermediate = self
            .path_intermediate
            .as_mut()
            .expect("intermediate target");
        intermediate.clear([0.0; 4]);

        let vertices: Vec<PathVertexData> = paths
            .iter()
            .flat_map(|path| {
                path.vertices
                    .iter()
                    .map(move |vertex| PathVertexData::from_path(path, vertex))
            })
            .collect();
        stages::rasterize_paths(intermediate, globals, &vertices);

        // One sprite per path when the whole batch shares a draw order;
        // otherwise a single spanning sprite, so overlapping regions aren't
        // composited twice.
        let first = &paths[0];
        let sprites: Vec<SpriteInstance> =
            if paths.last().map(Path::order) == Some(first.order()) {
                paths
                    .iter()
                    .map(|path| SpriteInstance::from_bounds(path.clipped_bounds()))
                    .collect()
            } else {
                let mut bounds = first.clipped_bounds();
                for path in &paths[1..] {
                    bounds = bounds.union(&path.clipped_bounds());
                }
                vec![SpriteInstance::from_bounds(bounds)]
            };

        stages::composite_sprites(frame, globals, intermediate, &sprites);
    }

    fn ensure_path_intermediate(&mut self, width: u32, height: u32) {
        let needs_recreate = match &self.path_intermediate {
            Some(target) => target.width() != width || target.height() != height,
            None => true,
        };
        if needs_recreate {
            tracing::debug!(width, height, "allocate path intermediate target");
            self.path_intermediate = Some(Frame::new(width, height));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrim_core::{Point, Quad, Rect, Rgba, Scene};

    #[test]
    fn test_render_quad_writes_premultiplied_interior() {
        let mut scene = Scene::new();
        scene.push_quad(Quad {
            bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
            clip: Rect::new(0.0, 0.0, 100.0, 100.0),
            background: Rgba::RED,
            ..Default::default()
        });

        let mut frame = Frame::new(200, 100);
        let mut renderer = Renderer::new();
        renderer.render(&scene, &mut frame);

        assert_eq!(frame.pixel(50, 50), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(frame.pixel(0, 0), [1.0, 0.0, 0.0, 1.0]);
        // Outside the quad bounds: never touched.
        assert_eq!(frame.pixel(150, 50), [0.0; 4]);
    }

    #[test]
    fn test_render_solid_path_round_trips_through_composite() {
        let clip = Rect::new(0.0, 0.0, 64.0, 64.0);
        let mut path = Path::new(Point::new(10.0, 10.0), Rgba::new(0.0, 0.5, 0.0, 1.0), clip);
        path.line_to(Point::new(50.0, 10.0));
        path.line_to(Point::new(50.0, 30.0));
        path.line_to(Point::new(10.0, 30.0));

        let mut scene = Scene::new();
        scene.push_path(path);

        let mut frame = Frame::new(64, 64);
        let mut renderer = Renderer::new();
        renderer.render(&scene, &mut frame);

        assert_eq!(frame.pixel(30, 20), [0.0, 0.5, 0.0, 1.0]);
        assert_eq!(frame.pixel(5, 20), [0.0; 4]);
    }

    #[test]
    fn test_intermediate_recreated_on_resize() {
        let mut scene = Scene::new();
        let clip = Rect::new(0.0, 0.0, 32.0, 32.0);
        let mut path = Path::new(Point::new(2.0, 2.0), Rgba::WHITE, clip);
        path.line_to(Point::new(20.0, 2.0));
        path.line_to(Point::new(20.0, 20.0));
        scene.push_path(path);

        let mut renderer = Renderer::new();
        let mut small = Frame::new(32, 32);
        renderer.render(&scene, &mut small);
        let first = renderer.path_intermediate.as_ref().map(Frame::width);

        let mut large = Frame::new(128, 128);
        renderer.render(&scene, &mut large);
        let second = renderer.path_intermediate.as_ref().map(Frame::width);

        assert_eq!(first, Some(32));
        assert_eq!(second, Some(128));
    }

    #[test]
    fn test_draw_order_respected_across_kinds() {
        // A later quad draws over an earlier one.
        let mut scene = Scene::new();
        let clip = Rect::new(0.0, 0.0, 50.0, 50.0);
        scene.push_quad(Quad {
            bounds: Rect::new(0.0, 0.0, 50.0, 50.0),
            clip,
            background: Rgba::RED,
            ..Default::default()
        });
        scene.push_quad(Quad {
            bounds: Rect::new(0.0, 0.0, 50.0, 50.0),
            clip,
            background: Rgba::new(0.0, 0.0, 1.0, 1.0),
            ..Default::default()
        });

        let mut frame = Frame::new(50, 50);
        Renderer::new().render(&scene, &mut frame);
        assert_eq!(frame.pixel(25, 25), [0.0, 0.0, 1.0, 1.0]);
    }
}
