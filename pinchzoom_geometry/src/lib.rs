// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinchzoom Geometry: rectangle algebra for interactive pan and zoom.
//!
//! This crate describes how a content rectangle moves through a uniform
//! scale + translate transform, and how to keep it snapped against a fixed
//! viewport. It focuses on:
//! - Applying a [`Transform`] to a rectangle, optionally about a pivot that
//!   must stay visually stationary ([`transformed_rect`]).
//! - Solving the single transform that maps one rectangle onto another
//!   ([`get_transform`]).
//! - "Contain" fitting of content with a known aspect ratio
//!   ([`fit_center_rect`]).
//! - Alignment and over-scroll queries against a viewport ([`aligned_rect`],
//!   [`available_translate_space`]).
//!
//! All rectangles are [`kurbo::Rect`] values where `x0`/`y0`/`x1`/`y1` play
//! the role of left/top/right/bottom. A rectangle with a NaN bound is treated
//! as having a missing bound and is rejected by the fallible operations.
//!
//! ## Composing gesture steps
//!
//! Successive gesture deltas are combined without drift by applying the
//! current transform, then the incremental gesture transform (with its
//! pivot), and solving back to a single transform:
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use pinchzoom_geometry::{Transform, get_transform, transformed_rect};
//!
//! let content = Rect::new(0.0, 75.0, 300.0, 225.0);
//! let current = Transform::IDENTITY;
//!
//! // Pinch that doubles the finger distance around the viewport center.
//! let step = Transform::new(2.0, 0.0, 0.0).with_pivot(Point::new(150.0, 150.0));
//!
//! let on_screen = transformed_rect(content, current)?;
//! let result = transformed_rect(on_screen, step)?;
//! let next = get_transform(content, result);
//!
//! assert!((next.scale - 2.0).abs() < 1e-9);
//! assert!((result.width() - 600.0).abs() < 1e-9);
//! # Ok::<(), pinchzoom_geometry::GeometryError>(())
//! ```
//!
//! ## Design notes
//!
//! - Scale is isotropic: [`get_transform`] derives the scale from widths only,
//!   so only targets with the same aspect deformation round-trip exactly.
//! - Operations are pure and never mutate their inputs.
//!
//! This crate is `no_std`.

#![no_std]

mod error;
mod rect;
mod transform;

pub use error::GeometryError;
pub use rect::{
    TranslateSpace, aligned_rect, available_translate_space, fit_center_rect, offset_rect,
    rect_is_valid,
};
pub use transform::{Transform, get_transform, transformed_rect};
