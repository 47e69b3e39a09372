// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

/// Behaviour switches and limits of a [`ViewTransformer`](crate::ViewTransformer).
///
/// Values are normalized when applied with
/// [`ViewTransformer::set_config`](crate::ViewTransformer::set_config):
/// `max_scale` is raised to at least `1.0`, `max_over_scroll_distance` to at
/// least `0.0`, and a non-positive aspect ratio counts as none.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewTransformerConfig {
    /// Whether gestures change the transform at all.
    pub enable_transform: bool,
    /// Whether pinch and double tap may change the scale.
    pub enable_scale: bool,
    /// Whether dragging into an over-scrolled side is slowed down.
    pub enable_resistance: bool,
    /// Largest scale that survives a bounce back.
    pub max_scale: f64,
    /// How far, in viewport units, a fling may carry the content past an edge.
    pub max_over_scroll_distance: f64,
    /// Width / height of the content, used to letterbox it in the viewport.
    pub content_aspect_ratio: Option<f64>,
}

impl Default for ViewTransformerConfig {
    fn default() -> Self {
        Self {
            enable_transform: true,
            enable_scale: true,
            enable_resistance: false,
            max_scale: 1.0,
            max_over_scroll_distance: 20.0,
            content_aspect_ratio: None,
        }
    }
}

impl ViewTransformerConfig {
    /// Sets [`enable_transform`](Self::enable_transform).
    #[must_use]
    pub fn with_enable_transform(mut self, enable: bool) -> Self {
        self.enable_transform = enable;
        self
    }

    /// Sets [`enable_scale`](Self::enable_scale).
    #[must_use]
    pub fn with_enable_scale(mut self, enable: bool) -> Self {
        self.enable_scale = enable;
        self
    }

    /// Sets [`enable_resistance`](Self::enable_resistance).
    #[must_use]
    pub fn with_enable_resistance(mut self, enable: bool) -> Self {
        self.enable_resistance = enable;
        self
    }

    /// Sets [`max_scale`](Self::max_scale).
    #[must_use]
    pub fn with_max_scale(mut self, max_scale: f64) -> Self {
        self.max_scale = max_scale;
        self
    }

    /// Sets [`max_over_scroll_distance`](Self::max_over_scroll_distance).
    #[must_use]
    pub fn with_max_over_scroll_distance(mut self, distance: f64) -> Self {
        self.max_over_scroll_distance = distance;
        self
    }

    /// Sets [`content_aspect_ratio`](Self::content_aspect_ratio).
    #[must_use]
    pub fn with_content_aspect_ratio(mut self, aspect_ratio: Option<f64>) -> Self {
        self.content_aspect_ratio = aspect_ratio;
        self
    }

    pub(crate) fn normalized(mut self) -> Self {
        // `max` also maps NaN to the lower limit.
        self.max_scale = self.max_scale.max(1.0);
        self.max_over_scroll_distance = self.max_over_scroll_distance.max(0.0);
        self.content_aspect_ratio = self.content_aspect_ratio.filter(|a| *a > 0.0);
        self
    }
}

/// Measured viewport: its size and where its origin sits on screen.
///
/// Touch positions arrive in screen (page) coordinates and are shifted by
/// `page_origin` into viewport coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Layout {
    /// Viewport size.
    pub size: Size,
    /// Screen position of the viewport's top-left corner.
    pub page_origin: Point,
}

impl Layout {
    /// Creates a layout.
    #[must_use]
    pub fn new(size: Size, page_origin: Point) -> Self {
        Self { size, page_origin }
    }

    /// The viewport in its own coordinates, with its origin at zero.
    #[must_use]
    pub fn viewport_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size)
    }

    /// Whether the viewport has been measured with a usable size.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.size.width > 0.0 && self.size.height > 0.0
    }
}
