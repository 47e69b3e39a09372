// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-session gesture record and the recognizer's phase machine.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::history::{
    current_centroid, current_centroid_of_touches_changed_after, pinch_distance,
    previous_centroid_of_touches_changed_after,
};
use crate::touch::TouchHistory;

/// Thresholds used to classify a touch session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RecognizerConfig {
    /// Cumulative displacement along either axis, in logical units, before a
    /// single-finger move is forwarded as a pan.
    pub min_move_distance: f64,
    /// Longest press, in milliseconds, that still counts as a tap.
    pub tap_timeout_ms: u64,
    /// Longest gap, in milliseconds, between two tap releases that forms a
    /// double tap.
    pub double_tap_timeout_ms: u64,
    /// Release speed, in units per millisecond, required for a fling.
    pub min_fling_velocity: f64,
}

impl RecognizerConfig {
    /// Sets [`min_move_distance`](Self::min_move_distance).
    #[must_use]
    pub fn with_min_move_distance(mut self, distance: f64) -> Self {
        self.min_move_distance = distance;
        self
    }

    /// Sets [`tap_timeout_ms`](Self::tap_timeout_ms).
    #[must_use]
    pub fn with_tap_timeout_ms(mut self, timeout: u64) -> Self {
        self.tap_timeout_ms = timeout;
        self
    }

    /// Sets [`double_tap_timeout_ms`](Self::double_tap_timeout_ms).
    #[must_use]
    pub fn with_double_tap_timeout_ms(mut self, timeout: u64) -> Self {
        self.double_tap_timeout_ms = timeout;
        self
    }

    /// Sets [`min_fling_velocity`](Self::min_fling_velocity).
    #[must_use]
    pub fn with_min_fling_velocity(mut self, velocity: f64) -> Self {
        self.min_fling_velocity = velocity;
        self
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            min_move_distance: 10.0,
            tap_timeout_ms: 300,
            double_tap_timeout_ms: 300,
            min_fling_velocity: 1.0,
        }
    }
}

/// Everything the recognizer knows about the current touch session.
///
/// Handlers receive this by shared reference; only the recognizer advances
/// it. Positions are in the host's screen (page) coordinates, velocities are
/// in units per millisecond.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GestureState {
    /// Centroid at the time the responder was granted.
    pub origin: Point,
    /// Latest centroid of the touches that moved.
    pub move_position: Point,
    /// Cumulative centroid displacement since grant.
    pub delta: Vec2,
    /// Centroid displacement of the latest accounted move.
    pub delta_since_last: Vec2,
    /// Velocity of the latest accounted move.
    pub velocity: Vec2,
    /// Centroid of every active touch.
    pub centroid: Point,
    /// Pinch distance before the latest accounted move.
    pub previous_pinch_distance: Option<f64>,
    /// Pinch distance after the latest accounted move.
    pub current_pinch_distance: Option<f64>,
    /// Number of fingers down at the latest event.
    pub number_active_touches: usize,
    /// Timestamp of the responder grant.
    pub grant_timestamp: u64,
    /// Every move up to this timestamp has been accounted for.
    pub accounts_for_moves_up_to: u64,
    /// Either axis of [`delta`](Self::delta) reached the minimum move distance.
    pub min_move_distance_achieved: bool,
    /// The session can no longer be a tap.
    pub single_tap_up_failed: bool,
    /// The session can no longer end in a fling.
    pub fling_failed: bool,
}

impl GestureState {
    /// Returns the incremental pinch factor of the latest move, if both
    /// pinch distances are available and the previous one is non-zero.
    #[must_use]
    pub fn scale_by(&self) -> Option<f64> {
        match (self.previous_pinch_distance, self.current_pinch_distance) {
            (Some(previous), Some(current)) if previous > 0.0 && current > 0.0 => {
                Some(current / previous)
            }
            _ => None,
        }
    }

    /// Speed of the latest accounted move, in units per millisecond.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.velocity.hypot()
    }

    pub(crate) fn grant(&mut self, history: &TouchHistory) {
        let centroid = current_centroid(history).unwrap_or(self.centroid);
        self.origin = centroid;
        self.centroid = centroid;
        self.move_position = centroid;
        self.delta = Vec2::ZERO;
        self.delta_since_last = Vec2::ZERO;
        self.number_active_touches = history.number_active_touches();
        self.grant_timestamp = history.most_recent_timestamp();
        self.accounts_for_moves_up_to = history.most_recent_timestamp();
    }

    pub(crate) fn apply_move(&mut self, history: &TouchHistory, config: &RecognizerConfig) {
        let moved_after = self.accounts_for_moves_up_to;
        let now = history.most_recent_timestamp();
        self.number_active_touches = history.number_active_touches();

        let current = current_centroid_of_touches_changed_after(history, moved_after);
        let previous = previous_centroid_of_touches_changed_after(history, moved_after);
        if let Some(current) = current {
            self.move_position = current;
        }
        let step = match (current, previous) {
            (Some(current), Some(previous)) => current - previous,
            _ => Vec2::ZERO,
        };

        let dt = now.saturating_sub(moved_after);
        self.velocity = if dt > 0 { step / dt as f64 } else { Vec2::ZERO };
        self.delta += step;
        self.delta_since_last = step;
        self.accounts_for_moves_up_to = now;

        self.previous_pinch_distance = pinch_distance(history, moved_after, false);
        self.current_pinch_distance = pinch_distance(history, moved_after, true);
        if let Some(centroid) = current_centroid(history) {
            self.centroid = centroid;
        }

        if self.delta.x.abs() >= config.min_move_distance
            || self.delta.y.abs() >= config.min_move_distance
        {
            self.min_move_distance_achieved = true;
        }
    }

    pub(crate) fn apply_end(&mut self, history: &TouchHistory, config: &RecognizerConfig) {
        let remaining = history.number_active_touches();
        self.number_active_touches = remaining;

        let held = history
            .most_recent_timestamp()
            .saturating_sub(self.grant_timestamp);
        if held > config.tap_timeout_ms || remaining > 0 {
            self.single_tap_up_failed = true;
        }
        if remaining > 0 || self.speed() < config.min_fling_velocity {
            self.fling_failed = true;
        }
    }
}

/// How a release was classified once every finger lifted.
///
/// Tap and fling are decided independently, so `double_tap` and `fling` can
/// both be set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Release {
    /// The session completed a tap.
    pub tap: bool,
    /// The tap was the second of a double tap.
    pub double_tap: bool,
    /// The release was fast enough to fling.
    pub fling: bool,
}

impl Release {
    /// Neither a double tap nor a fling took over the end of the gesture.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        !self.double_tap && !self.fling
    }
}

/// Where the recognizer is in its touch session.
///
/// Only the live phases carry a [`GestureState`]; `Released` keeps the final
/// snapshot and its [`Release`] classification until the next session starts.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum GesturePhase {
    /// No touch session.
    #[default]
    Idle,
    /// Touches are down but the responder has not been granted yet.
    Pending(GestureState),
    /// The responder was granted and no move has been accounted yet.
    Granted(GestureState),
    /// At least one move has been accounted since the grant.
    Tracking(GestureState),
    /// Every finger lifted.
    Released {
        /// Final snapshot of the session.
        state: GestureState,
        /// How the release was classified.
        release: Release,
    },
    /// The host took the responder away before release.
    Terminated,
}

impl GesturePhase {
    /// The session record, in any phase that carries one.
    #[must_use]
    pub fn state(&self) -> Option<&GestureState> {
        match self {
            Self::Pending(state)
            | Self::Granted(state)
            | Self::Tracking(state)
            | Self::Released { state, .. } => Some(state),
            Self::Idle | Self::Terminated => None,
        }
    }

    /// The classification of the last release, once released.
    #[must_use]
    pub fn release(&self) -> Option<&Release> {
        match self {
            Self::Released { release, .. } => Some(release),
            _ => None,
        }
    }

    /// Returns `true` while this recognizer holds the responder.
    #[must_use]
    pub fn is_responder(&self) -> bool {
        matches!(self, Self::Granted(_) | Self::Tracking(_))
    }
}

/// Discards the minor axis of `delta` when the other axis dominates it by
/// more than a factor of two.
///
/// ```
/// use kurbo::Vec2;
/// use pinchzoom_gesture::snap_to_dominant_axis;
///
/// assert_eq!(snap_to_dominant_axis(Vec2::new(12.0, 3.0)), Vec2::new(12.0, 0.0));
/// assert_eq!(snap_to_dominant_axis(Vec2::new(-1.0, 9.0)), Vec2::new(0.0, 9.0));
/// assert_eq!(snap_to_dominant_axis(Vec2::new(4.0, 3.0)), Vec2::new(4.0, 3.0));
/// ```
#[must_use]
pub fn snap_to_dominant_axis(delta: Vec2) -> Vec2 {
    if delta.x.abs() > 2.0 * delta.y.abs() {
        Vec2::new(delta.x, 0.0)
    } else if delta.y.abs() > 2.0 * delta.x.abs() {
        Vec2::new(0.0, delta.y)
    } else {
        delta
    }
}
