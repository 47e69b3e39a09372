// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Momentum after a fast release.
//!
//! A [`FlingIntegrator`] receives the release velocity and per-axis bounds,
//! then reports incremental offsets each frame until it settles. The
//! controller applies those offsets as pans and bounces back once the
//! integrator reports it is finished and has nothing left to apply.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Vec2;

/// Offset range, relative to the fling start, that a fling may reach.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FlingBounds {
    /// Smallest offset per axis (`<= 0`).
    pub min: Vec2,
    /// Largest offset per axis (`>= 0`).
    pub max: Vec2,
}

impl FlingBounds {
    /// Creates bounds from per-axis minimum and maximum offsets.
    #[must_use]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    fn clamp_x(&self, x: f64) -> f64 {
        x.max(self.min.x).min(self.max.x)
    }

    fn clamp_y(&self, y: f64) -> f64 {
        y.max(self.min.y).min(self.max.y)
    }
}

/// Turns a release velocity into a sequence of settling offsets.
pub trait FlingIntegrator {
    /// Starts a fling from offset zero. `velocity` is in units per second.
    ///
    /// Replaces any fling in progress.
    fn fling(&mut self, velocity: Vec2, bounds: FlingBounds);

    /// Advances to `now` (milliseconds) and returns the offset travelled
    /// since the previous step.
    fn step(&mut self, now: u64) -> Vec2;

    /// Whether the fling has settled.
    fn is_finished(&self) -> bool;

    /// Stops the fling immediately.
    fn abort(&mut self);
}

/// Exponential velocity decay, the classic kinetic scrolling model.
///
/// Velocity falls off as `v0 * e^(-t / 325 ms)`, so the offset approaches
/// `v0 * 0.325 s`. The initial speed is capped at 8000 units/s. An axis stops
/// once its speed drops below 5 units/s or it is pinned against a bound.
/// The start time is taken from the first [`step`](FlingIntegrator::step)
/// after [`fling`](FlingIntegrator::fling).
#[derive(Clone, Debug)]
pub struct DecayFling {
    velocity: Vec2,
    bounds: FlingBounds,
    start: Option<u64>,
    offset: Vec2,
    finished: bool,
}

impl DecayFling {
    /// Decay time constant, in milliseconds.
    pub const TIME_CONSTANT_MS: f64 = 325.0;
    /// Largest initial speed, in units per second.
    pub const MAX_VELOCITY: f64 = 8000.0;
    /// Speed, in units per second, below which an axis stops.
    pub const MIN_VELOCITY: f64 = 5.0;

    /// Creates an idle integrator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            bounds: FlingBounds::default(),
            start: None,
            offset: Vec2::ZERO,
            finished: true,
        }
    }

    /// Total offset travelled since the fling started.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

impl Default for DecayFling {
    fn default() -> Self {
        Self::new()
    }
}

impl FlingIntegrator for DecayFling {
    fn fling(&mut self, velocity: Vec2, bounds: FlingBounds) {
        let speed = velocity.hypot();
        self.velocity = if speed > Self::MAX_VELOCITY {
            velocity * (Self::MAX_VELOCITY / speed)
        } else {
            velocity
        };
        self.bounds = bounds;
        self.start = None;
        self.offset = Vec2::ZERO;
        self.finished = speed.is_nan() || speed < Self::MIN_VELOCITY;
    }

    fn step(&mut self, now: u64) -> Vec2 {
        if self.finished {
            return Vec2::ZERO;
        }
        let start = *self.start.get_or_insert(now);
        let elapsed = now.saturating_sub(start) as f64;

        let decay = (-elapsed / Self::TIME_CONSTANT_MS).exp();
        let travel = self.velocity * (Self::TIME_CONSTANT_MS / 1000.0 * (1.0 - decay));
        let offset = Vec2::new(self.bounds.clamp_x(travel.x), self.bounds.clamp_y(travel.y));
        let speed = self.velocity * decay;

        let stopped_x = offset.x != travel.x || speed.x.abs() < Self::MIN_VELOCITY;
        let stopped_y = offset.y != travel.y || speed.y.abs() < Self::MIN_VELOCITY;
        self.finished = stopped_x && stopped_y;

        let delta = offset - self.offset;
        self.offset = offset;
        delta
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn abort(&mut self) {
        self.finished = true;
        self.start = None;
    }
}
