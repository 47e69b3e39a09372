// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};

use crate::error::GeometryError;
use crate::rect::{offset_rect, rect_is_valid};

/// Uniform scale + translate applied to a content rectangle.
///
/// The rectangle is scaled about `pivot` (or about its own center when there
/// is no pivot) and then offset by `translate * scale`. The translation is
/// therefore expressed in unscaled content units, matching how a renderer
/// applies `scale` followed by `translate`.
///
/// `Transform` is a plain value: every gesture step produces a new one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Uniform scale factor. Must be finite and positive.
    pub scale: f64,
    /// Horizontal translation in unscaled units.
    pub translate_x: f64,
    /// Vertical translation in unscaled units.
    pub translate_y: f64,
    /// Optional point that stays stationary while scaling.
    pub pivot: Option<Point>,
}

impl Transform {
    /// The transform that leaves every rectangle unchanged.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0);

    /// Creates a transform without a pivot.
    #[must_use]
    pub const fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
            pivot: None,
        }
    }

    /// Creates a translate-only transform.
    #[must_use]
    pub const fn translate(translate_x: f64, translate_y: f64) -> Self {
        Self::new(1.0, translate_x, translate_y)
    }

    /// Returns a copy of this transform scaling about `pivot`.
    #[must_use]
    pub const fn with_pivot(self, pivot: Point) -> Self {
        Self {
            pivot: Some(pivot),
            ..self
        }
    }

    /// Returns the translation as a vector.
    #[must_use]
    pub const fn translation(&self) -> Vec2 {
        Vec2::new(self.translate_x, self.translate_y)
    }

    /// Returns `true` if the scale is a finite positive number and the
    /// translation has no missing component.
    ///
    /// The pivot is checked separately by [`transformed_rect`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.scale.is_finite()
            && self.scale > 0.0
            && !self.translate_x.is_nan()
            && !self.translate_y.is_nan()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Applies `transform` to `rect`.
///
/// Without a pivot the rectangle is scaled about its own center and the
/// center is then offset by `translate * scale`. With a pivot, the no-pivot
/// result is computed first and then shifted so that the pivot maps onto
/// itself under the scaling:
///
/// ```text
/// dx = (scale - 1) * (pivot.x - result.center.x)
/// dy = (scale - 1) * (pivot.y - result.center.y)
/// result = result.offset(-dx, -dy)
/// ```
///
/// # Errors
///
/// - [`GeometryError::InvalidRect`] if `rect` has a missing bound.
/// - [`GeometryError::InvalidTransform`] if `transform` is malformed.
/// - [`GeometryError::InvalidPivot`] if the pivot has a missing coordinate.
pub fn transformed_rect(rect: Rect, transform: Transform) -> Result<Rect, GeometryError> {
    if !transform.is_valid() {
        return Err(GeometryError::InvalidTransform);
    }
    if !rect_is_valid(rect) {
        return Err(GeometryError::InvalidRect);
    }

    let scale = transform.scale;
    let Some(pivot) = transform.pivot else {
        let width = rect.width() * scale;
        let height = rect.height() * scale;
        let center = rect.center() + transform.translation() * scale;
        return Ok(Rect::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            center.x + width / 2.0,
            center.y + height / 2.0,
        ));
    };

    if pivot.x.is_nan() || pivot.y.is_nan() {
        return Err(GeometryError::InvalidPivot);
    }

    // Keep the center still first, then move the pivot back where it was.
    let result = transformed_rect(
        rect,
        Transform::new(scale, transform.translate_x, transform.translate_y),
    )?;
    let drift = (pivot - result.center()) * (scale - 1.0);
    Ok(offset_rect(result, -drift))
}

/// Returns the pivot-less transform that maps `from` onto `to`.
///
/// `scale = to.width / from.width` and the translation is the center
/// displacement divided by the scale. The scale is derived from widths only,
/// so a `to` with a different aspect deformation than `from` is matched in
/// width and center but not in height.
///
/// `from` must have a non-zero width.
#[must_use]
pub fn get_transform(from: Rect, to: Rect) -> Transform {
    let scale = to.width() / from.width();
    let offset = (to.center() - from.center()) / scale;
    Transform::new(scale, offset.x, offset.y)
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    fn assert_rect_close(a: Rect, b: Rect) {
        assert_close(a.x0, b.x0);
        assert_close(a.y0, b.y0);
        assert_close(a.x1, b.x1);
        assert_close(a.y1, b.y1);
    }

    const SAMPLES: [Rect; 4] = [
        Rect::new(0.0, 0.0, 300.0, 150.0),
        Rect::new(-40.0, 12.5, 60.0, 212.5),
        Rect::new(100.0, 100.0, 101.0, 400.0),
        Rect::new(-1_000.0, -500.0, 1_000.0, 500.0),
    ];

    #[test]
    fn identity_leaves_rect_unchanged() {
        for r in SAMPLES {
            assert_eq!(transformed_rect(r, Transform::IDENTITY).unwrap(), r);
        }
    }

    #[test]
    fn scale_without_pivot_keeps_center() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        let out = transformed_rect(r, Transform::new(2.0, 0.0, 0.0)).unwrap();
        assert_rect_close(out, Rect::new(-50.0, -25.0, 150.0, 75.0));
    }

    #[test]
    fn translation_is_scaled() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        let out = transformed_rect(r, Transform::new(2.0, 10.0, -5.0)).unwrap();
        assert_close(out.center().x, 50.0 + 20.0);
        assert_close(out.center().y, 50.0 - 10.0);
    }

    #[test]
    fn pivot_stays_stationary() {
        let pivots = [
            Point::new(0.0, 0.0),
            Point::new(37.0, 91.0),
            Point::new(-200.0, 15.0),
        ];
        for r in SAMPLES {
            for p in pivots {
                for s in [0.5, 1.0, 2.0, 3.75] {
                    let out = transformed_rect(r, Transform::new(s, 0.0, 0.0).with_pivot(p))
                        .unwrap();
                    // The pivot's offset from the center scales with the rect.
                    let before = p - r.center();
                    let after = p - out.center();
                    assert_close(after.x, before.x * s);
                    assert_close(after.y, before.y * s);
                    assert_close(out.width(), r.width() * s);
                }
            }
        }
    }

    #[test]
    fn pivot_correction_uses_translated_center() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        let pivot = Point::new(0.0, 0.0);
        let out = transformed_rect(r, Transform::new(2.0, 10.0, 0.0).with_pivot(pivot)).unwrap();
        // No-pivot result is centered at (70, 50); dx = 1 * (0 - 70).
        assert_rect_close(out, Rect::new(40.0, 0.0, 240.0, 200.0));
    }

    #[test]
    fn round_trip_translate_only() {
        for r in SAMPLES {
            let t = Transform::translate(12.5, -7.25);
            let back = get_transform(r, transformed_rect(r, t).unwrap());
            assert_close(back.scale, t.scale);
            assert_close(back.translate_x, t.translate_x);
            assert_close(back.translate_y, t.translate_y);
            assert!(back.pivot.is_none());
        }
    }

    #[test]
    fn round_trip_scale_without_pivot() {
        for r in SAMPLES {
            let t = Transform::new(2.5, -3.0, 8.0);
            let back = get_transform(r, transformed_rect(r, t).unwrap());
            assert_close(back.scale, t.scale);
            assert_close(back.translate_x, t.translate_x);
            assert_close(back.translate_y, t.translate_y);
        }
    }

    #[test]
    fn get_transform_then_apply_reaches_target() {
        let from = Rect::new(0.0, 75.0, 300.0, 225.0);
        let to = Rect::new(-150.0, 0.0, 450.0, 300.0);
        let t = get_transform(from, to);
        assert_rect_close(transformed_rect(from, t).unwrap(), to);
    }

    #[test]
    fn get_transform_is_isotropic() {
        let from = Rect::new(0.0, 0.0, 100.0, 100.0);
        // Stretched target: width matches, height does not.
        let to = Rect::new(0.0, 0.0, 200.0, 100.0);
        let out = transformed_rect(from, get_transform(from, to)).unwrap();
        assert_close(out.width(), 200.0);
        assert_close(out.height(), 200.0);
        assert_close(out.center().x, to.center().x);
        assert_close(out.center().y, to.center().y);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            transformed_rect(Rect::new(f64::NAN, 0.0, 10.0, 10.0), Transform::IDENTITY),
            Err(GeometryError::InvalidRect)
        );
        assert_eq!(
            transformed_rect(r, Transform::new(f64::NAN, 0.0, 0.0)),
            Err(GeometryError::InvalidTransform)
        );
        assert_eq!(
            transformed_rect(r, Transform::new(0.0, 0.0, 0.0)),
            Err(GeometryError::InvalidTransform)
        );
        assert_eq!(
            transformed_rect(r, Transform::new(1.0, 0.0, f64::NAN)),
            Err(GeometryError::InvalidTransform)
        );
        assert_eq!(
            transformed_rect(
                r,
                Transform::new(2.0, 0.0, 0.0).with_pivot(Point::new(1.0, f64::NAN))
            ),
            Err(GeometryError::InvalidPivot)
        );
    }
}
