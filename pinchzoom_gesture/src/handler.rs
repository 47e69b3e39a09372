// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Callbacks a [`PanAndPinchResponder`](crate::PanAndPinchResponder) invokes.

use crate::state::{GestureState, Release};
use crate::touch::TouchHistory;

/// Receives classified gestures from a
/// [`PanAndPinchResponder`](crate::PanAndPinchResponder).
///
/// Every method has a default body, so implementors only override the phases
/// they care about. The `should_*` predicates default to `false`
/// (never claim the responder) and [`termination_request`] defaults to
/// `false` (keep the responder once granted).
///
/// Release classification happens in this order: [`on_single_tap_up`],
/// [`on_double_tap_up`], [`on_fling`], then [`on_release`]. Tap and fling are
/// classified independently, so a quick flick that is also the second tap of
/// a double tap reports both.
///
/// [`termination_request`]: Self::termination_request
/// [`on_single_tap_up`]: Self::on_single_tap_up
/// [`on_double_tap_up`]: Self::on_double_tap_up
/// [`on_fling`]: Self::on_fling
/// [`on_release`]: Self::on_release
#[allow(unused_variables, reason = "default bodies ignore their arguments")]
pub trait PanAndPinchHandler {
    /// Whether to claim the responder during the capture pass of a touch start.
    fn start_should_set_responder_capture(
        &mut self,
        history: &TouchHistory,
        state: &GestureState,
    ) -> bool {
        false
    }

    /// Whether to claim the responder during the capture pass of a move.
    fn move_should_set_responder_capture(
        &mut self,
        history: &TouchHistory,
        state: &GestureState,
    ) -> bool {
        false
    }

    /// Whether to claim the responder when a touch starts.
    fn start_should_set_responder(&mut self, history: &TouchHistory, state: &GestureState) -> bool {
        false
    }

    /// Whether to claim the responder when touches move.
    fn move_should_set_responder(&mut self, history: &TouchHistory, state: &GestureState) -> bool {
        false
    }

    /// Whether native components should be blocked from becoming responder
    /// while this one holds it.
    fn should_block_native_responder(&mut self) -> bool {
        true
    }

    /// The responder was granted.
    fn on_grant(&mut self, history: &TouchHistory, state: &GestureState) {}

    /// Another responder refused to give up the touch.
    fn on_reject(&mut self, history: &TouchHistory, state: &GestureState) {}

    /// A finger went down while holding the responder.
    fn on_start(&mut self, history: &TouchHistory, state: &GestureState) {}

    /// A pan or pinch step, once the move threshold is passed or more than one
    /// finger is down.
    fn on_move(&mut self, history: &TouchHistory, state: &GestureState) {}

    /// A finger lifted while holding the responder.
    fn on_end(&mut self, history: &TouchHistory, state: &GestureState) {}

    /// The release completed a tap.
    fn on_single_tap_up(&mut self, history: &TouchHistory, state: &GestureState) {}

    /// The release completed a second tap within the double-tap window.
    fn on_double_tap_up(&mut self, history: &TouchHistory, state: &GestureState) {}

    /// The release was fast enough to fling.
    fn on_fling(&mut self, history: &TouchHistory, state: &GestureState) {}

    /// Every finger lifted. Called after tap and fling classification, which
    /// `release` summarizes.
    fn on_release(&mut self, history: &TouchHistory, state: &GestureState, release: &Release) {}

    /// The host took the responder away. No release classification happens.
    fn on_terminate(&mut self, history: &TouchHistory, state: &GestureState) {}

    /// Whether to hand the responder over when another component asks for it.
    fn termination_request(&mut self, history: &TouchHistory, state: &GestureState) -> bool {
        false
    }
}
