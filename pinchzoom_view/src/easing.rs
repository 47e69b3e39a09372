// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{CubicBez, ParamCurve, Point};

/// Progress curve of an animation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start and slow end, symmetric around the midpoint.
    ///
    /// Both halves are the `ease` curve, cubic Bézier `(0.42, 0), (1, 1)`.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    ///
    /// Input outside the unit interval is clamped.
    ///
    /// ```
    /// use pinchzoom_view::Easing;
    ///
    /// assert_eq!(Easing::EaseInOut.apply(0.0), 0.0);
    /// assert_eq!(Easing::EaseInOut.apply(1.0), 1.0);
    /// assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
    /// assert!(Easing::EaseInOut.apply(0.1) < 0.1);
    /// ```
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    ease(t * 2.0) / 2.0
                } else {
                    1.0 - ease((1.0 - t) * 2.0) / 2.0
                }
            }
        }
    }
}

/// The `ease` curve, mapping progress on x to eased progress on y.
const EASE: CubicBez = CubicBez {
    p0: Point::ZERO,
    p1: Point::new(0.42, 0.0),
    p2: Point::new(1.0, 1.0),
    p3: Point::new(1.0, 1.0),
};

/// Parameter resolution of the x solve.
const SOLVE_TOLERANCE: f64 = 1e-9;

fn ease(x: f64) -> f64 {
    // x(u) is monotonic on this curve.
    let (mut lo, mut hi) = (0.0, 1.0);
    while hi - lo > SOLVE_TOLERANCE {
        let mid = 0.5 * (lo + hi);
        if EASE.eval(mid).x < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    EASE.eval(0.5 * (lo + hi)).y
}
