// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Responder protocol and the pan/pinch recognizer that speaks it.
//!
//! A host negotiates touch ownership through the [`Responder`] lifecycle:
//! capture and bubble "should set" queries, grant or reject, then start,
//! move, end, and finally release or terminate. [`PanAndPinchResponder`]
//! implements that protocol, reduces the [`TouchHistory`] into a
//! [`GestureState`], and reports classified gestures to a
//! [`PanAndPinchHandler`].
//!
//! Hosts that do not run their own negotiation can call
//! [`Responder::handle_touch`] once per raw touch event.

use core::mem;

use crate::handler::PanAndPinchHandler;
use crate::state::{GesturePhase, GestureState, RecognizerConfig, Release};
use crate::touch::TouchHistory;

/// Kind of raw touch event delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TouchEventKind {
    /// A finger went down.
    Start,
    /// One or more fingers moved.
    Move,
    /// A finger lifted.
    End,
    /// The platform cancelled the touch sequence.
    Cancel,
}

/// One method per phase of the touch responder lifecycle.
///
/// Every method receives the touch history after the event has been
/// recorded into it.
pub trait Responder {
    /// Capture pass of a touch start: claim the responder before descendants.
    fn start_should_set_responder_capture(&mut self, history: &TouchHistory) -> bool;

    /// Capture pass of a move: claim the responder before descendants.
    fn move_should_set_responder_capture(&mut self, history: &TouchHistory) -> bool;

    /// Bubble pass of a touch start.
    fn start_should_set_responder(&mut self, history: &TouchHistory) -> bool;

    /// Bubble pass of a move.
    fn move_should_set_responder(&mut self, history: &TouchHistory) -> bool;

    /// The responder was granted. Returns whether native responders should
    /// be blocked.
    fn responder_grant(&mut self, history: &TouchHistory) -> bool;

    /// The current responder refused to hand over.
    fn responder_reject(&mut self, history: &TouchHistory);

    /// A finger went down while responder.
    fn responder_start(&mut self, history: &TouchHistory);

    /// Fingers moved while responder.
    fn responder_move(&mut self, history: &TouchHistory);

    /// A finger lifted while responder.
    fn responder_end(&mut self, history: &TouchHistory);

    /// The last finger lifted.
    fn responder_release(&mut self, history: &TouchHistory);

    /// The host took the responder away.
    fn responder_terminate(&mut self, history: &TouchHistory);

    /// Another component wants the responder. Returns whether to let go.
    fn responder_termination_request(&mut self, history: &TouchHistory) -> bool;

    /// Whether this component currently holds the responder.
    fn is_responder(&self) -> bool;

    /// Runs the single-responder negotiation for one raw touch event.
    ///
    /// - `Start`: capture then bubble query, grant if claimed and not yet
    ///   responder, then `responder_start`.
    /// - `Move`: `responder_move` when responder; otherwise capture and bubble
    ///   queries, and a grant followed by the move if claimed.
    /// - `End`: `responder_end`, then `responder_release` once no finger
    ///   remains.
    /// - `Cancel`: `responder_terminate`.
    ///
    /// Returns whether this component holds the responder afterwards.
    fn handle_touch(&mut self, kind: TouchEventKind, history: &TouchHistory) -> bool {
        match kind {
            TouchEventKind::Start => {
                let wants = self.start_should_set_responder_capture(history)
                    || self.start_should_set_responder(history);
                if !self.is_responder() {
                    if !wants {
                        return false;
                    }
                    self.responder_grant(history);
                }
                self.responder_start(history);
            }
            TouchEventKind::Move => {
                if !self.is_responder() {
                    let wants = self.move_should_set_responder_capture(history)
                        || self.move_should_set_responder(history);
                    if !wants {
                        return false;
                    }
                    self.responder_grant(history);
                }
                self.responder_move(history);
            }
            TouchEventKind::End => {
                if !self.is_responder() {
                    return false;
                }
                self.responder_end(history);
                if history.number_active_touches() == 0 {
                    self.responder_release(history);
                }
            }
            TouchEventKind::Cancel => {
                if self.is_responder() {
                    self.responder_terminate(history);
                }
            }
        }
        self.is_responder()
    }
}

/// Recognizes pan, pinch, tap, double tap and fling from a touch stream.
///
/// See the [crate docs](crate) for the classification rules.
#[derive(Clone, Debug)]
pub struct PanAndPinchResponder<H> {
    handler: H,
    config: RecognizerConfig,
    phase: GesturePhase,
    last_release_timestamp: Option<u64>,
    last_release_was_tap: bool,
}

impl<H: PanAndPinchHandler> PanAndPinchResponder<H> {
    /// Creates a recognizer with the default thresholds.
    #[must_use]
    pub fn new(handler: H) -> Self {
        Self::with_config(handler, RecognizerConfig::default())
    }

    /// Creates a recognizer with custom thresholds.
    #[must_use]
    pub fn with_config(handler: H, config: RecognizerConfig) -> Self {
        Self {
            handler,
            config,
            phase: GesturePhase::Idle,
            last_release_timestamp: None,
            last_release_was_tap: false,
        }
    }

    /// The gesture handler.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The gesture handler, mutably.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consumes the recognizer and returns its handler.
    #[must_use]
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// The classification thresholds.
    #[must_use]
    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Current phase of the touch session.
    #[must_use]
    pub fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    /// Takes the live session record out of the phase, leaving `Idle`.
    fn take_live(&mut self) -> Option<GestureState> {
        match mem::take(&mut self.phase) {
            GesturePhase::Pending(state)
            | GesturePhase::Granted(state)
            | GesturePhase::Tracking(state) => Some(state),
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Mutable access to the live session record, creating a pending one
    /// when no session is in progress.
    fn live_state_mut(&mut self) -> &mut GestureState {
        if !matches!(
            self.phase,
            GesturePhase::Pending(_) | GesturePhase::Granted(_) | GesturePhase::Tracking(_)
        ) {
            self.phase = GesturePhase::Pending(GestureState::default());
        }
        match &mut self.phase {
            GesturePhase::Pending(state)
            | GesturePhase::Granted(state)
            | GesturePhase::Tracking(state) => state,
            GesturePhase::Idle | GesturePhase::Released { .. } | GesturePhase::Terminated => {
                unreachable!("phase was just made live")
            }
        }
    }
}

impl<H: PanAndPinchHandler> Responder for PanAndPinchResponder<H> {
    fn start_should_set_responder_capture(&mut self, history: &TouchHistory) -> bool {
        // The first finger of a session starts from a clean record.
        if history.number_active_touches() == 1 {
            self.phase = GesturePhase::Pending(GestureState::default());
        }
        let state = self.live_state_mut();
        state.number_active_touches = history.number_active_touches();
        let state = *state;
        self.handler
            .start_should_set_responder_capture(history, &state)
    }

    fn move_should_set_responder_capture(&mut self, history: &TouchHistory) -> bool {
        let config = self.config;
        let state = self.live_state_mut();
        // Several fingers changing in one frame produce duplicate callbacks.
        if state.accounts_for_moves_up_to == history.most_recent_timestamp() {
            return false;
        }
        state.apply_move(history, &config);
        let state = *state;
        self.handler.move_should_set_responder_capture(history, &state)
    }

    fn start_should_set_responder(&mut self, history: &TouchHistory) -> bool {
        let state = *self.live_state_mut();
        self.handler.start_should_set_responder(history, &state)
    }

    fn move_should_set_responder(&mut self, history: &TouchHistory) -> bool {
        let state = *self.live_state_mut();
        self.handler.move_should_set_responder(history, &state)
    }

    fn responder_grant(&mut self, history: &TouchHistory) -> bool {
        let mut state = self.take_live().unwrap_or_default();
        state.grant(history);
        log::trace!(
            "responder granted at {:?} with {} touch(es)",
            state.origin,
            state.number_active_touches
        );
        self.handler.on_grant(history, &state);
        self.phase = GesturePhase::Granted(state);
        self.handler.should_block_native_responder()
    }

    fn responder_reject(&mut self, history: &TouchHistory) {
        let state = self.phase.state().copied().unwrap_or_default();
        self.handler.on_reject(history, &state);
    }

    fn responder_start(&mut self, history: &TouchHistory) {
        let state = self.live_state_mut();
        state.number_active_touches = history.number_active_touches();
        let state = *state;
        self.handler.on_start(history, &state);
    }

    fn responder_move(&mut self, history: &TouchHistory) {
        let Some(mut state) = self.take_live() else {
            return;
        };
        if state.accounts_for_moves_up_to == history.most_recent_timestamp() {
            self.phase = GesturePhase::Tracking(state);
            return;
        }
        state.apply_move(history, &self.config);
        if state.min_move_distance_achieved || history.number_active_touches() > 1 {
            self.handler.on_move(history, &state);
        }
        self.phase = GesturePhase::Tracking(state);
    }

    fn responder_end(&mut self, history: &TouchHistory) {
        let config = self.config;
        let state = self.live_state_mut();
        state.number_active_touches = history.number_active_touches();
        let snapshot = *state;
        self.handler.on_end(history, &snapshot);

        let state = self.live_state_mut();
        state.apply_end(history, &config);
    }

    fn responder_release(&mut self, history: &TouchHistory) {
        let Some(state) = self.take_live() else {
            return;
        };
        let now = history.most_recent_timestamp();
        let mut release = Release::default();

        if state.single_tap_up_failed {
            self.last_release_was_tap = false;
        } else {
            release.tap = true;
            self.handler.on_single_tap_up(history, &state);
            let within_window = self
                .last_release_timestamp
                .is_some_and(|t| now.saturating_sub(t) < self.config.double_tap_timeout_ms);
            if self.last_release_was_tap && within_window {
                release.double_tap = true;
                self.handler.on_double_tap_up(history, &state);
            }
            self.last_release_was_tap = true;
        }

        if !state.fling_failed {
            release.fling = true;
            self.handler.on_fling(history, &state);
        }

        self.last_release_timestamp = Some(now);
        log::debug!("released: {:?} velocity={:?}", release, state.velocity);
        self.handler.on_release(history, &state, &release);
        self.phase = GesturePhase::Released { state, release };
    }

    fn responder_terminate(&mut self, history: &TouchHistory) {
        let state = self.take_live().unwrap_or_default();
        log::debug!("responder terminated");
        self.handler.on_terminate(history, &state);
        self.phase = GesturePhase::Terminated;
    }

    fn responder_termination_request(&mut self, history: &TouchHistory) -> bool {
        let state = self.phase.state().copied().unwrap_or_default();
        self.handler.termination_request(history, &state)
    }

    fn is_responder(&self) -> bool {
        self.phase.is_responder()
    }
}
