// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size, Vec2};
use pinchzoom_geometry::{
    Transform, aligned_rect, available_translate_space, fit_center_rect, get_transform,
    transformed_rect,
};
use pinchzoom_view::{Layout, ViewTransformer, ViewTransformerConfig};

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("pinchzoom_geometry");
    let viewport = Rect::new(0.0, 0.0, 1080.0, 1920.0);
    let content = fit_center_rect(4.0 / 3.0, viewport);

    // One pinch step: apply the current transform, then the pivoted
    // increment, then solve back to a single transform.
    group.bench_function("compose_pinch_step", |b| {
        let current = Transform::new(1.7, -42.0, 18.5);
        let step = Transform::new(1.03, 2.5, -1.0).with_pivot(Point::new(512.0, 900.0));
        b.iter(|| {
            let on_screen = transformed_rect(black_box(content), black_box(current)).unwrap();
            let result = transformed_rect(on_screen, black_box(step)).unwrap();
            black_box(get_transform(content, result))
        });
    });

    group.bench_function("align_and_space", |b| {
        let rect = Rect::new(-300.0, 120.0, 1500.0, 1500.0);
        b.iter(|| {
            let aligned = aligned_rect(black_box(rect), black_box(viewport));
            black_box(available_translate_space(aligned, viewport))
        });
    });

    group.finish();
}

fn bench_controller(c: &mut Criterion) {
    let mut group = c.benchmark_group("pinchzoom_view");

    group.bench_function("pinch_then_pan_1000_steps", |b| {
        b.iter(|| {
            let mut view = ViewTransformer::new(
                ViewTransformerConfig::default()
                    .with_max_scale(4.0)
                    .with_enable_resistance(true)
                    .with_content_aspect_ratio(Some(1.5)),
            );
            view.set_layout(Layout::new(Size::new(1080.0, 1920.0), Point::ZERO));
            for i in 0..1_000_u32 {
                let f = f64::from(i);
                view.on_pinch(1.001, Point::new(540.0, 960.0), Vec2::new(0.5, -0.25))
                    .unwrap();
                view.on_pan(Vec2::new(f.sin() * 4.0, f.cos() * 4.0)).unwrap();
            }
            black_box(view.transform())
        });
    });

    group.bench_function("fling_until_settled", |b| {
        b.iter(|| {
            let mut view = ViewTransformer::new(ViewTransformerConfig::default().with_max_scale(3.0));
            view.set_layout(Layout::new(Size::new(1080.0, 1920.0), Point::ZERO));
            view.on_pinch(3.0, Point::new(540.0, 960.0), Vec2::ZERO).unwrap();
            view.on_fling_start(black_box(Vec2::new(-4.0, 1.5))).unwrap();
            let mut now = 0;
            while view.is_flinging() || view.is_animating() {
                view.advance(now).unwrap();
                now += 16;
            }
            black_box(view.transform())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_geometry, bench_controller);
criterion_main!(benches);
