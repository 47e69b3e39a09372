// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Affine, Point, Rect, Vec2};
use pinchzoom_geometry::{
    GeometryError, Transform, aligned_rect, available_translate_space, fit_center_rect,
    get_transform, rect_is_valid, transformed_rect,
};
use pinchzoom_gesture::touch::TouchHistory;
use pinchzoom_gesture::{GestureState, PanAndPinchHandler, Release, snap_to_dominant_axis};

use crate::animation::{AnimationSession, DEFAULT_ANIMATION_DURATION_MS};
use crate::config::{Layout, ViewTransformerConfig};
use crate::easing::Easing;
use crate::fling::{DecayFling, FlingBounds, FlingIntegrator};

/// Drag steps into an over-scrolled side are divided by this factor.
const RESISTANCE: f64 = 3.0;

/// Snapshot handed to the gesture end hook.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureEndEvent {
    /// Transform at the end of the gesture.
    pub transform: Transform,
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

/// Host callback run when a gesture ends. Returning `true` vetoes the bounce
/// back.
pub type GestureEndHook = Box<dyn FnMut(&GestureEndEvent) -> bool>;

/// Owns the transform of one interactive surface and turns recognized
/// gestures into transform updates.
///
/// Feed it gestures by wrapping it in a
/// [`PanAndPinchResponder`](pinchzoom_gesture::PanAndPinchResponder), or call
/// the `on_*` operations directly. Animations and flings are clocked by the
/// host through [`advance`](Self::advance).
///
/// Until [`set_layout`](Self::set_layout) reports a viewport with a non-zero
/// size, every operation that would change the transform does nothing.
pub struct ViewTransformer<F = DecayFling> {
    config: ViewTransformerConfig,
    layout: Layout,
    transform: Transform,
    animation: Option<AnimationSession>,
    fling: F,
    flinging: bool,
    gesture_end_hook: Option<GestureEndHook>,
}

impl ViewTransformer {
    /// Creates a controller with the reference [`DecayFling`] integrator.
    #[must_use]
    pub fn new(config: ViewTransformerConfig) -> Self {
        Self::with_fling(config, DecayFling::new())
    }
}

impl Default for ViewTransformer {
    fn default() -> Self {
        Self::new(ViewTransformerConfig::default())
    }
}

impl<F: FlingIntegrator> ViewTransformer<F> {
    /// Creates a controller with a custom fling integrator.
    #[must_use]
    pub fn with_fling(config: ViewTransformerConfig, fling: F) -> Self {
        Self {
            config: config.normalized(),
            layout: Layout::default(),
            transform: Transform::IDENTITY,
            animation: None,
            fling,
            flinging: false,
            gesture_end_hook: None,
        }
    }

    /// The active configuration, as normalized.
    #[must_use]
    pub fn config(&self) -> &ViewTransformerConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: ViewTransformerConfig) {
        self.config = config.normalized();
    }

    /// The last reported layout.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Records a new viewport measurement.
    pub fn set_layout(&mut self, layout: Layout) {
        if self.layout != layout {
            log::debug!("layout changed to {:?}", layout);
            self.layout = layout;
        }
    }

    /// Installs the hook run at the end of every gesture.
    pub fn set_gesture_end_hook(&mut self, hook: GestureEndHook) {
        self.gesture_end_hook = Some(hook);
    }

    /// Current transform. It never carries a pivot.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Affine that draws untransformed content at its current position.
    ///
    /// Content is scaled about the viewport center, then moved by
    /// `translate * scale`.
    #[must_use]
    pub fn render_affine(&self) -> Affine {
        let center = self.viewport_rect().center().to_vec2();
        let offset = self.transform.translation() * self.transform.scale;
        Affine::translate(center + offset)
            * Affine::scale(self.transform.scale)
            * Affine::translate(-center)
    }

    /// The viewport in its own coordinates.
    #[must_use]
    pub fn viewport_rect(&self) -> Rect {
        self.layout.viewport_rect()
    }

    /// Untransformed content: the viewport, letterboxed to the content aspect
    /// ratio when one is configured.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        let viewport = self.viewport_rect();
        match self.config.content_aspect_ratio {
            Some(aspect_ratio) => fit_center_rect(aspect_ratio, viewport),
            None => viewport,
        }
    }

    /// Content as currently displayed.
    pub fn transformed_content_rect(&self) -> Result<Rect, GeometryError> {
        transformed_rect(self.content_rect(), self.transform)
    }

    /// Whether an animation session is in progress.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether a fling is in progress.
    #[must_use]
    pub fn is_flinging(&self) -> bool {
        self.flinging
    }

    /// Drops the running animation, if any. The transform stays where the
    /// last frame put it.
    pub fn cancel_animation(&mut self) {
        if self.animation.take().is_some() {
            log::trace!("animation cancelled");
        }
    }

    fn cancel_fling(&mut self) {
        if self.flinging {
            log::trace!("fling aborted");
            self.fling.abort();
            self.flinging = false;
        }
    }

    fn update_transform(&mut self, transform: Transform) {
        if !self.config.enable_transform {
            return;
        }
        let scale = if self.config.enable_scale {
            transform.scale
        } else {
            1.0
        };
        self.transform = Transform::new(scale, transform.translate_x, transform.translate_y);
    }

    fn pan_by(&mut self, delta: Vec2) {
        let Transform { scale, .. } = self.transform;
        let translation = self.transform.translation() + delta / scale;
        self.update_transform(Transform::new(scale, translation.x, translation.y));
    }

    fn resisted(&self, delta: Vec2) -> Result<Vec2, GeometryError> {
        if !self.config.enable_resistance {
            return Ok(delta);
        }
        let space = available_translate_space(self.transformed_content_rect()?, self.viewport_rect());
        let mut delta = delta;
        if (delta.x > 0.0 && space.left < 0.0) || (delta.x < 0.0 && space.right < 0.0) {
            delta.x /= RESISTANCE;
        }
        if (delta.y > 0.0 && space.top < 0.0) || (delta.y < 0.0 && space.bottom < 0.0) {
            delta.y /= RESISTANCE;
        }
        Ok(delta)
    }

    /// Drags the content by `delta` viewport units.
    ///
    /// With resistance enabled, an axis pushing further into a side that is
    /// already over-scrolled moves a third as far. The minor axis is dropped
    /// when the other dominates it by more than a factor of two.
    pub fn on_pan(&mut self, delta: Vec2) -> Result<(), GeometryError> {
        if !self.layout.is_measured() {
            return Ok(());
        }
        check_delta(delta)?;
        let delta = snap_to_dominant_axis(self.resisted(delta)?);
        self.pan_by(delta);
        Ok(())
    }

    /// Scales the content by `scale_by` about `pivot` (viewport coordinates)
    /// while dragging it by `delta`.
    ///
    /// Falls back to [`on_pan`](Self::on_pan) when scaling is disabled.
    pub fn on_pinch(&mut self, scale_by: f64, pivot: Point, delta: Vec2) -> Result<(), GeometryError> {
        if !self.layout.is_measured() {
            return Ok(());
        }
        if !self.config.enable_scale {
            return self.on_pan(delta);
        }
        check_delta(delta)?;
        let delta = self.resisted(delta)?;

        let content = self.content_rect();
        let step = Transform::new(scale_by, delta.x, delta.y).with_pivot(pivot);
        let result = transformed_rect(transformed_rect(content, self.transform)?, step)?;
        self.update_transform(get_transform(content, result));
        Ok(())
    }

    /// Toggles between scale 1 and the maximum scale, keeping `pivot`
    /// (viewport coordinates) in place, and animates there.
    ///
    /// The target is 1 when the current scale is past the midpoint between 1
    /// and the maximum, otherwise the maximum.
    pub fn on_double_tap(&mut self, pivot: Point) -> Result<(), GeometryError> {
        if !self.layout.is_measured() || !self.config.enable_scale {
            return Ok(());
        }
        let current = self.transform.scale;
        let max_scale = self.config.max_scale;
        let scale_by = if current > (1.0 + max_scale) / 2.0 {
            1.0 / current
        } else {
            max_scale / current
        };
        let rect = transformed_rect(
            self.transformed_content_rect()?,
            Transform::new(scale_by, 0.0, 0.0).with_pivot(pivot),
        )?;
        self.animate(aligned_rect(rect, self.viewport_rect()), DEFAULT_ANIMATION_DURATION_MS)
    }

    /// Hands the release `velocity` (units per millisecond) to the fling
    /// integrator.
    ///
    /// The fling may carry the content up to the far edge plus
    /// [`max_over_scroll_distance`](ViewTransformerConfig::max_over_scroll_distance)
    /// in the direction of travel, and never backwards.
    pub fn on_fling_start(&mut self, velocity: Vec2) -> Result<(), GeometryError> {
        if !self.layout.is_measured() {
            return Ok(());
        }
        check_delta(velocity)?;
        let space = available_translate_space(self.transformed_content_rect()?, self.viewport_rect());
        let over = self.config.max_over_scroll_distance;
        let room = |side: f64| if side > 0.0 { side + over } else { 0.0 };

        let mut bounds = FlingBounds::default();
        if velocity.x > 0.0 {
            bounds.max.x = room(space.left);
        } else {
            bounds.min.x = -room(space.right);
        }
        if velocity.y > 0.0 {
            bounds.max.y = room(space.top);
        } else {
            bounds.min.y = -room(space.bottom);
        }

        let velocity = snap_to_dominant_axis(velocity * 1000.0);
        log::debug!("fling at {:?} units/s within {:?}", velocity, bounds);
        self.fling.fling(velocity, bounds);
        self.flinging = true;
        Ok(())
    }

    /// Ends a gesture that neither flung nor double tapped: bounces back
    /// unless the gesture end hook vetoes it.
    pub fn on_release_without_fling_or_double_tap(&mut self) -> Result<(), GeometryError> {
        self.end_gesture(true)
    }

    fn end_gesture(&mut self, bounce: bool) -> Result<(), GeometryError> {
        let event = GestureEndEvent {
            transform: self.transform,
            width: self.layout.size.width,
            height: self.layout.size.height,
        };
        if let Some(hook) = self.gesture_end_hook.as_mut()
            && hook(&event)
        {
            log::debug!("bounce back vetoed by gesture end hook");
            return Ok(());
        }
        if bounce {
            self.animate_bounce()
        } else {
            Ok(())
        }
    }

    /// Animates back inside the valid range: scale clamped into
    /// `[1, max_scale]` about the viewport center, then edges aligned.
    pub fn animate_bounce(&mut self) -> Result<(), GeometryError> {
        if !self.layout.is_measured() {
            return Ok(());
        }
        let current = self.transform.scale;
        let scale_by = if current > self.config.max_scale {
            self.config.max_scale / current
        } else if current < 1.0 {
            1.0 / current
        } else {
            1.0
        };
        let viewport = self.viewport_rect();
        let rect = transformed_rect(
            self.transformed_content_rect()?,
            Transform::new(scale_by, 0.0, 0.0).with_pivot(viewport.center()),
        )?;
        log::debug!("bounce back by {scale_by}");
        self.animate(aligned_rect(rect, viewport), DEFAULT_ANIMATION_DURATION_MS)
    }

    /// Animates the content onto `target` over `duration_ms`, replacing any
    /// running animation.
    ///
    /// Nothing happens when `target` is exactly where the content already is.
    pub fn animate(&mut self, target: Rect, duration_ms: u64) -> Result<(), GeometryError> {
        if !self.layout.is_measured() {
            return Ok(());
        }
        if !rect_is_valid(target) {
            return Err(GeometryError::InvalidRect);
        }
        let from = self.transformed_content_rect()?;
        if from == target {
            log::debug!("animation target equals the current rect, skipped");
            return Ok(());
        }
        self.animation = Some(AnimationSession::new(
            from,
            target,
            duration_ms,
            Easing::EaseInOut,
        ));
        Ok(())
    }

    /// Advances the running animation and fling to `now` (milliseconds).
    ///
    /// A fling that settles while an animation is still running leaves the
    /// animation in charge instead of bouncing back.
    ///
    /// Call once per frame while [`is_animating`](Self::is_animating) or
    /// [`is_flinging`](Self::is_flinging) is `true`. Frame spacing may vary.
    pub fn advance(&mut self, now: u64) -> Result<(), GeometryError> {
        if !self.layout.is_measured() {
            return Ok(());
        }
        if let Some(session) = self.animation.as_mut() {
            let (rect, done) = session.frame(now);
            if done {
                self.animation = None;
            }
            self.update_transform(get_transform(self.content_rect(), rect));
        }
        if self.flinging {
            let delta = self.fling.step(now);
            if delta == Vec2::ZERO && self.fling.is_finished() {
                self.flinging = false;
                // A running animation already ends inside the valid range.
                if self.animation.is_none() {
                    self.animate_bounce()?;
                }
            } else {
                self.pan_by(delta);
            }
        }
        Ok(())
    }
}

fn check_delta(delta: Vec2) -> Result<(), GeometryError> {
    if Transform::translate(delta.x, delta.y).is_valid() {
        Ok(())
    } else {
        Err(GeometryError::InvalidTransform)
    }
}

fn report(operation: &str, result: Result<(), GeometryError>) {
    if let Err(err) = result {
        log::warn!("{operation} ignored: {err}");
    }
}

impl<F: FlingIntegrator> PanAndPinchHandler for ViewTransformer<F> {
    fn start_should_set_responder(&mut self, _: &TouchHistory, _: &GestureState) -> bool {
        self.config.enable_transform
    }

    fn on_grant(&mut self, _: &TouchHistory, _: &GestureState) {
        self.cancel_animation();
        self.cancel_fling();
    }

    fn on_move(&mut self, _: &TouchHistory, state: &GestureState) {
        self.cancel_animation();
        let delta = state.delta_since_last;
        let result = match state.scale_by() {
            Some(scale_by) => {
                let pivot = state.centroid - self.layout.page_origin.to_vec2();
                self.on_pinch(scale_by, pivot, delta)
            }
            None => self.on_pan(delta),
        };
        report("move", result);
    }

    fn on_double_tap_up(&mut self, _: &TouchHistory, state: &GestureState) {
        let pivot = state.centroid - self.layout.page_origin.to_vec2();
        report("double tap", self.on_double_tap(pivot));
    }

    fn on_fling(&mut self, _: &TouchHistory, state: &GestureState) {
        report("fling", self.on_fling_start(state.velocity));
    }

    fn on_release(&mut self, _: &TouchHistory, _: &GestureState, release: &Release) {
        report("release", self.end_gesture(release.is_plain()));
    }

    fn on_terminate(&mut self, _: &TouchHistory, _: &GestureState) {
        report("terminate", self.end_gesture(true));
    }
}

impl<F: fmt::Debug> fmt::Debug for ViewTransformer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewTransformer")
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("transform", &self.transform)
            .field("animation", &self.animation)
            .field("fling", &self.fling)
            .field("flinging", &self.flinging)
            .field("gesture_end_hook", &self.gesture_end_hook.is_some())
            .finish()
    }
}
