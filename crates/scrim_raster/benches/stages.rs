use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scrim_core::{
    Corners, Edges, Globals, Path, Point, QuadInstance, Rect, Rgba, Scene, ShadowInstance,
    UnderlineInstance,
};
use scrim_raster::{render_quads, render_shadows, render_underlines, Frame, Renderer};

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 768;

fn quad_grid() -> Vec<QuadInstance> {
    let mut quads = Vec::new();
    for row in 0..8 {
        for col in 0..8 {
            quads.push(
                QuadInstance::new(col as f32 * 120.0, row as f32 * 90.0, 100.0, 70.0)
                    .with_background(Rgba::new(0.3, 0.5, 0.7, 0.9))
                    .with_border(Edges::splat(2.0), Rgba::BLACK)
                    .with_corner_radii(Corners::splat(12.0)),
            );
        }
    }
    quads
}

fn bench_quads(c: &mut Criterion) {
    let globals = Globals::new(WIDTH as f32, HEIGHT as f32);
    let quads = quad_grid();
    let mut frame = Frame::new(WIDTH, HEIGHT);
    c.bench_function("quads_64_rounded_bordered", |b| {
        b.iter(|| {
            frame.clear([0.0; 4]);
            render_quads(black_box(&mut frame), &globals, &quads);
        })
    });
}

fn bench_shadows(c: &mut Criterion) {
    let globals = Globals::new(WIDTH as f32, HEIGHT as f32);
    let shadows: Vec<ShadowInstance> = (0..16)
        .map(|i| {
            ShadowInstance::new(60.0 * i as f32, 100.0, 120.0, 90.0, 16.0)
                .with_color(Rgba::new(0.0, 0.0, 0.0, 0.5))
                .with_corner_radii(Corners::splat(8.0))
        })
        .collect();
    let mut frame = Frame::new(WIDTH, HEIGHT);
    c.bench_function("shadows_16_blurred", |b| {
        b.iter(|| {
            frame.clear([0.0; 4]);
            render_shadows(black_box(&mut frame), &globals, &shadows);
        })
    });
}

fn bench_underlines(c: &mut Criterion) {
    let globals = Globals::new(WIDTH as f32, HEIGHT as f32);
    let underlines: Vec<UnderlineInstance> = (0..32)
        .map(|i| {
            UnderlineInstance::new(16.0, 20.0 * i as f32, 900.0, 10.0, 2.0)
                .with_color(Rgba::WHITE)
                .with_wavy(i % 2 == 0)
        })
        .collect();
    let mut frame = Frame::new(WIDTH, HEIGHT);
    c.bench_function("underlines_32_mixed", |b| {
        b.iter(|| {
            frame.clear([0.0; 4]);
            render_underlines(black_box(&mut frame), &globals, &underlines);
        })
    });
}

fn bench_paths(c: &mut Criterion) {
    let screen = Rect::new(0.0, 0.0, WIDTH as f32, HEIGHT as f32);
    let mut scene = Scene::new();
    for i in 0..8 {
        let x = 100.0 + 100.0 * i as f32;
        let mut path = Path::new(Point::new(x, 600.0), Rgba::new(0.2, 0.6, 0.4, 0.8), screen);
        path.curve_to(Point::new(x + 50.0, 200.0), Point::new(x + 100.0, 600.0));
        path.line_to(Point::new(x, 600.0));
        scene.push_path(path);
    }
    let mut renderer = Renderer::new();
    let mut frame = Frame::new(WIDTH, HEIGHT);
    c.bench_function("paths_8_curved_two_pass", |b| {
        b.iter(|| {
            frame.clear([0.0; 4]);
            renderer.render(black_box(&scene), &mut frame);
        })
    });
}

criterion_group!(benches, bench_quads, bench_shadows, bench_underlines, bench_paths);
criterion_main!(benches);
