// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Vec2};

/// Returns `true` if none of the rectangle's bounds are missing (NaN).
///
/// No ordering between opposite edges is enforced.
#[must_use]
pub fn rect_is_valid(rect: Rect) -> bool {
    !(rect.x0.is_nan() || rect.y0.is_nan() || rect.x1.is_nan() || rect.y1.is_nan())
}

/// Returns `rect` moved by `delta` without changing its size.
#[must_use]
pub fn offset_rect(rect: Rect, delta: Vec2) -> Rect {
    Rect::new(
        rect.x0 + delta.x,
        rect.y0 + delta.y,
        rect.x1 + delta.x,
        rect.y1 + delta.y,
    )
}

/// Returns the largest rectangle with `aspect_ratio` (width / height) that
/// fits centered inside `container`.
///
/// This is "contain" scaling: the axis along which the content is relatively
/// longer fills the container, the other axis shrinks.
#[must_use]
pub fn fit_center_rect(aspect_ratio: f64, container: Rect) -> Rect {
    let mut w = container.width();
    let mut h = container.height();
    let container_aspect = w / h;

    if aspect_ratio > container_aspect {
        h = w / aspect_ratio;
    } else {
        w = h * aspect_ratio;
    }

    let center = container.center();
    Rect::new(
        center.x - w / 2.0,
        center.y - h / 2.0,
        center.x + w / 2.0,
        center.y + h / 2.0,
    )
}

/// Snaps `rect` against `viewport` so it leaves no unnecessary blank space.
///
/// No scaling is performed. Each axis is handled independently:
/// - If the content is larger than the viewport along the axis, an edge that
///   has moved inside the viewport is pulled back onto the matching viewport
///   edge (the leading edge is checked first).
/// - Otherwise the content is centered along the axis.
#[must_use]
pub fn aligned_rect(rect: Rect, viewport: Rect) -> Rect {
    let dx = if rect.width() > viewport.width() {
        if rect.x0 > viewport.x0 {
            viewport.x0 - rect.x0
        } else if rect.x1 < viewport.x1 {
            viewport.x1 - rect.x1
        } else {
            0.0
        }
    } else {
        viewport.center().x - rect.center().x
    };

    let dy = if rect.height() > viewport.height() {
        if rect.y0 > viewport.y0 {
            viewport.y0 - rect.y0
        } else if rect.y1 < viewport.y1 {
            viewport.y1 - rect.y1
        } else {
            0.0
        }
    } else {
        viewport.center().y - rect.center().y
    };

    offset_rect(rect, Vec2::new(dx, dy))
}

/// Signed distances between content edges and viewport edges.
///
/// A positive value means the content extends past that viewport edge, so it
/// can still move toward it without exposing blank space. A negative value
/// means the content is already over-scrolled on that side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TranslateSpace {
    /// `viewport.left - rect.left`.
    pub left: f64,
    /// `rect.right - viewport.right`.
    pub right: f64,
    /// `viewport.top - rect.top`.
    pub top: f64,
    /// `rect.bottom - viewport.bottom`.
    pub bottom: f64,
}

impl TranslateSpace {
    /// Returns `true` if blank space is exposed on any side.
    #[must_use]
    pub fn is_over_scrolled(&self) -> bool {
        self.left < 0.0 || self.right < 0.0 || self.top < 0.0 || self.bottom < 0.0
    }
}

/// Computes how far `rect` may still travel toward each edge of `viewport`.
///
/// See [`TranslateSpace`] for the sign convention.
#[must_use]
pub fn available_translate_space(rect: Rect, viewport: Rect) -> TranslateSpace {
    TranslateSpace {
        left: viewport.x0 - rect.x0,
        right: rect.x1 - viewport.x1,
        top: viewport.y0 - rect.y0,
        bottom: rect.y1 - viewport.y1,
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Vec2};

    use super::*;

    fn assert_rect_close(a: Rect, b: Rect) {
        assert!(
            (a.x0 - b.x0).abs() < 1e-9
                && (a.y0 - b.y0).abs() < 1e-9
                && (a.x1 - b.x1).abs() < 1e-9
                && (a.y1 - b.y1).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn fit_wide_content_in_square_container() {
        let fitted = fit_center_rect(16.0 / 9.0, Rect::new(0.0, 0.0, 400.0, 400.0));
        assert_rect_close(fitted, Rect::new(0.0, 87.5, 400.0, 312.5));
        assert!((fitted.width() - 400.0).abs() < 1e-9);
        assert!((fitted.height() - 225.0).abs() < 1e-9);
    }

    #[test]
    fn fit_tall_content_shrinks_width() {
        let fitted = fit_center_rect(0.5, Rect::new(0.0, 0.0, 400.0, 400.0));
        assert_rect_close(fitted, Rect::new(100.0, 0.0, 300.0, 400.0));
    }

    #[test]
    fn fit_respects_container_offset() {
        let fitted = fit_center_rect(2.0, Rect::new(100.0, 100.0, 400.0, 400.0));
        assert_rect_close(fitted, Rect::new(100.0, 175.0, 400.0, 325.0));
    }

    #[test]
    fn invalid_rect_detection() {
        assert!(rect_is_valid(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert!(!rect_is_valid(Rect::new(0.0, f64::NAN, 1.0, 1.0)));
        assert!(!rect_is_valid(Rect::new(0.0, 0.0, 1.0, f64::NAN)));
        // Inverted rects are still "valid"; ordering is the caller's business.
        assert!(rect_is_valid(Rect::new(10.0, 10.0, 0.0, 0.0)));
    }

    #[test]
    fn offset_keeps_size() {
        let r = offset_rect(Rect::new(0.0, 0.0, 10.0, 20.0), Vec2::new(5.0, -5.0));
        assert_eq!(r, Rect::new(5.0, -5.0, 15.0, 15.0));
    }

    #[test]
    fn aligned_centers_smaller_content() {
        let viewport = Rect::new(0.0, 0.0, 300.0, 300.0);
        let rect = Rect::new(10.0, 0.0, 110.0, 50.0);
        assert_rect_close(
            aligned_rect(rect, viewport),
            Rect::new(100.0, 125.0, 200.0, 175.0),
        );
    }

    #[test]
    fn aligned_pulls_exposed_edge_back() {
        let viewport = Rect::new(0.0, 0.0, 300.0, 300.0);

        // Left edge dragged into the viewport.
        let rect = Rect::new(40.0, -100.0, 640.0, 500.0);
        assert_rect_close(
            aligned_rect(rect, viewport),
            Rect::new(0.0, -100.0, 600.0, 500.0),
        );

        // Bottom edge dragged up into the viewport.
        let rect = Rect::new(-100.0, -400.0, 500.0, 200.0);
        assert_rect_close(
            aligned_rect(rect, viewport),
            Rect::new(-100.0, -300.0, 500.0, 300.0),
        );
    }

    #[test]
    fn aligned_leaves_covering_content_alone() {
        let viewport = Rect::new(0.0, 0.0, 300.0, 300.0);
        let rect = Rect::new(-50.0, -20.0, 550.0, 580.0);
        assert_eq!(aligned_rect(rect, viewport), rect);
    }

    #[test]
    fn translate_space_signs() {
        let viewport = Rect::new(0.0, 0.0, 300.0, 300.0);
        let space = available_translate_space(Rect::new(-50.0, 20.0, 400.0, 280.0), viewport);
        assert_eq!(
            space,
            TranslateSpace {
                left: 50.0,
                right: 100.0,
                top: -20.0,
                bottom: -20.0,
            }
        );
        assert!(space.is_over_scrolled());

        let covering = available_translate_space(Rect::new(-1.0, -1.0, 301.0, 301.0), viewport);
        assert!(!covering.is_over_scrolled());
    }
}
