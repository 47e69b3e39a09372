// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use pinchzoom_gesture::history::{current_centroid, pinch_distance};
use pinchzoom_gesture::touch::TouchHistory;
use pinchzoom_gesture::{
    GestureState, PanAndPinchHandler, PanAndPinchResponder, Responder, TouchEventKind,
};

#[derive(Default)]
struct Sink {
    moves: u64,
}

impl PanAndPinchHandler for Sink {
    fn start_should_set_responder(&mut self, _: &TouchHistory, _: &GestureState) -> bool {
        true
    }

    fn on_move(&mut self, _: &TouchHistory, state: &GestureState) {
        self.moves += 1;
        black_box(state.scale_by());
    }
}

fn two_fingers_down() -> (TouchHistory, PanAndPinchResponder<Sink>) {
    let mut history = TouchHistory::new();
    let mut responder = PanAndPinchResponder::new(Sink::default());
    history.record_start(0, Point::new(400.0, 800.0), 0).unwrap();
    responder.handle_touch(TouchEventKind::Start, &history);
    history.record_start(1, Point::new(600.0, 800.0), 0).unwrap();
    responder.handle_touch(TouchEventKind::Start, &history);
    (history, responder)
}

fn bench_recognizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("pinchzoom_gesture");

    for &frames in &[60_u64, 600_u64] {
        group.bench_function(format!("pinch_moves(frames={frames})"), |b| {
            b.iter_batched(
                two_fingers_down,
                |(mut history, mut responder)| {
                    for frame in 1..=frames {
                        let spread = frame as f64;
                        let t = frame * 16;
                        history
                            .record_move(0, Point::new(400.0 - spread, 800.0), t)
                            .unwrap();
                        history
                            .record_move(1, Point::new(600.0 + spread, 800.0), t)
                            .unwrap();
                        responder.handle_touch(TouchEventKind::Move, &history);
                    }
                    black_box(responder.handler().moves);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("reduce_five_fingers", |b| {
        let mut history = TouchHistory::new();
        for id in 0..5 {
            let x = 100.0 * id as f64;
            history.record_start(id, Point::new(x, 50.0), 0).unwrap();
            history.record_move(id, Point::new(x + 3.0, 55.0), 16).unwrap();
        }
        b.iter(|| {
            let history = black_box(&history);
            black_box((current_centroid(history), pinch_distance(history, 16, true)))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_recognizer);
criterion_main!(benches);
