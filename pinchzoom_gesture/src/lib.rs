// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinchzoom Gesture: multi-touch pan, pinch, tap and fling recognition.
//!
//! The host records raw touch points into a [`TouchHistory`] and forwards
//! each event to a [`PanAndPinchResponder`]. The responder reduces the
//! history into a [`GestureState`] and reports classified gestures to a
//! [`PanAndPinchHandler`].
//!
//! Classification rules, with the default [`RecognizerConfig`]:
//! - A move is forwarded once either axis of the cumulative displacement
//!   reaches 10 units, or immediately while two or more fingers are down.
//! - A release is a single tap when the only finger was held no longer than
//!   300 ms. A second tap within 300 ms of the previous tap release is also
//!   a double tap.
//! - A release is a fling when the last move was at least 1 unit/ms fast and
//!   no finger remains. Tap and fling are classified independently.
//!
//! ```rust
//! use kurbo::Point;
//! use pinchzoom_gesture::touch::TouchHistory;
//! use pinchzoom_gesture::{
//!     GestureState, PanAndPinchHandler, PanAndPinchResponder, Responder, TouchEventKind,
//! };
//!
//! #[derive(Default)]
//! struct Zoom {
//!     factor: f64,
//! }
//!
//! impl PanAndPinchHandler for Zoom {
//!     fn start_should_set_responder(&mut self, _: &TouchHistory, _: &GestureState) -> bool {
//!         true
//!     }
//!
//!     fn on_move(&mut self, _: &TouchHistory, state: &GestureState) {
//!         if let Some(by) = state.scale_by() {
//!             self.factor = by;
//!         }
//!     }
//! }
//!
//! let mut history = TouchHistory::new();
//! let mut responder = PanAndPinchResponder::new(Zoom::default());
//!
//! history.record_start(0, Point::new(100.0, 100.0), 0).unwrap();
//! responder.handle_touch(TouchEventKind::Start, &history);
//! history.record_start(1, Point::new(200.0, 100.0), 0).unwrap();
//! responder.handle_touch(TouchEventKind::Start, &history);
//!
//! history.record_move(0, Point::new(50.0, 100.0), 16).unwrap();
//! history.record_move(1, Point::new(250.0, 100.0), 16).unwrap();
//! responder.handle_touch(TouchEventKind::Move, &history);
//!
//! assert_eq!(responder.handler().factor, 2.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod history;
pub mod touch;

mod handler;
mod responder;
mod state;

pub use handler::PanAndPinchHandler;
pub use responder::{PanAndPinchResponder, Responder, TouchEventKind};
pub use state::{GesturePhase, GestureState, RecognizerConfig, Release, snap_to_dominant_axis};
pub use touch::{MAX_TOUCHES, TouchError, TouchHistory, TouchSample};
