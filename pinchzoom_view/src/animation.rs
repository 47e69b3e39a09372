// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

use crate::easing::Easing;

/// Duration of double-tap and bounce-back animations, in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 200;

/// One rectangle-to-rectangle animation, clocked by the host.
///
/// The session does not know its start time until the first
/// [`frame`](Self::frame); that frame always reports the `from` rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationSession {
    from: Rect,
    target: Rect,
    duration_ms: u64,
    easing: Easing,
    start: Option<u64>,
}

impl AnimationSession {
    /// Creates a session that has not started yet.
    #[must_use]
    pub fn new(from: Rect, target: Rect, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            target,
            duration_ms,
            easing,
            start: None,
        }
    }

    /// Rectangle the animation starts from.
    #[must_use]
    pub fn from(&self) -> Rect {
        self.from
    }

    /// Rectangle the animation ends on.
    #[must_use]
    pub fn target(&self) -> Rect {
        self.target
    }

    /// Time of the first frame, once there has been one.
    #[must_use]
    pub fn start(&self) -> Option<u64> {
        self.start
    }

    /// Linear progress at `now`, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: u64) -> f64 {
        let Some(start) = self.start else {
            return 0.0;
        };
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(start) as f64;
        (elapsed / self.duration_ms as f64).min(1.0)
    }

    /// Advances to `now` and returns the interpolated rectangle and whether
    /// the animation has completed.
    ///
    /// Each bound is interpolated independently by the eased progress. The
    /// final frame returns `target` exactly.
    pub fn frame(&mut self, now: u64) -> (Rect, bool) {
        self.start.get_or_insert(now);
        let progress = self.progress(now);
        if progress >= 1.0 {
            return (self.target, true);
        }
        let t = self.easing.apply(progress);
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        let rect = Rect::new(
            lerp(self.from.x0, self.target.x0),
            lerp(self.from.y0, self.target.y0),
            lerp(self.from.x1, self.target.x1),
            lerp(self.from.y1, self.target.y1),
        );
        (rect, false)
    }
}
