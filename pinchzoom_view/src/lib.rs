// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinchzoom View: the transform controller behind a pannable, zoomable
//! surface.
//!
//! [`ViewTransformer`] owns the current [`Transform`] of one surface and
//! combines the geometry of [`pinchzoom_geometry`] with gestures recognized
//! by [`pinchzoom_gesture`]:
//! - Drag pans, optionally with resistance past the edges.
//! - Pinch scales about the finger centroid.
//! - Double tap toggles between scale 1 and the maximum scale.
//! - A fast release flings through a [`FlingIntegrator`].
//! - Any other release bounces back inside the valid range.
//!
//! Time only moves when the host calls [`ViewTransformer::advance`], once per
//! frame, with a millisecond clock.
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use pinchzoom_view::{Layout, ViewTransformer, ViewTransformerConfig};
//!
//! let mut view = ViewTransformer::new(
//!     ViewTransformerConfig::default()
//!         .with_max_scale(3.0)
//!         .with_content_aspect_ratio(Some(2.0)),
//! );
//! view.set_layout(Layout::new(Size::new(300.0, 300.0), Point::ZERO));
//!
//! // Pinch from 50 to 100 units apart about the viewport center.
//! view.on_pinch(100.0 / 50.0, Point::new(150.0, 150.0), Vec2::ZERO)?;
//! assert!((view.transform().scale - 2.0).abs() < 1e-9);
//! assert!((view.transformed_content_rect()?.width() - 600.0).abs() < 1e-9);
//!
//! // Zoomed past the maximum, the release settles back to it.
//! view.on_pinch(2.0, Point::new(150.0, 150.0), Vec2::ZERO)?;
//! view.on_release_without_fling_or_double_tap()?;
//! let mut now = 0;
//! while view.is_animating() {
//!     view.advance(now)?;
//!     now += 16;
//! }
//! assert!((view.transform().scale - 3.0).abs() < 1e-9);
//! # Ok::<(), pinchzoom_geometry::GeometryError>(())
//! ```
//!
//! Hosts that render with an affine can use
//! [`ViewTransformer::render_affine`] instead of the transform's parts.
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! [`Transform`]: pinchzoom_geometry::Transform

#![no_std]

extern crate alloc;

mod animation;
mod config;
mod easing;
mod fling;
mod transformer;

pub use animation::{AnimationSession, DEFAULT_ANIMATION_DURATION_MS};
pub use config::{Layout, ViewTransformerConfig};
pub use easing::Easing;
pub use fling::{DecayFling, FlingBounds, FlingIntegrator};
pub use transformer::{GestureEndEvent, GestureEndHook, ViewTransformer};
