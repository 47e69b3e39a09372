// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reductions over a [`TouchHistory`]: centroids and pinch distance.
//!
//! Every function can be restricted to touches that changed after a given
//! timestamp. The recognizer uses this to account only for the fingers that
//! moved since the last sample it processed.
//!
//! When exactly one finger is down its own position is the centroid, and it
//! counts only if it changed strictly after the filter timestamp. With more
//! fingers down every active touch changed at or after the filter timestamp
//! is averaged. A centroid or pinch distance that cannot be computed is
//! reported as `None`.

use kurbo::{Point, Vec2};

use crate::touch::{TouchHistory, TouchSample};

fn position(sample: &TouchSample, of_current: bool) -> Point {
    if of_current {
        sample.current
    } else {
        sample.previous
    }
}

fn changed_touches(
    history: &TouchHistory,
    changed_after: u64,
) -> impl Iterator<Item = &TouchSample> + '_ {
    history
        .active_touches()
        .filter(move |t| t.current_timestamp >= changed_after)
}

fn centroid(history: &TouchHistory, changed_after: u64, of_current: bool) -> Option<Point> {
    if let Some(single) = history.single_active_touch() {
        return (single.current_timestamp > changed_after).then(|| position(single, of_current));
    }

    let mut sum = Vec2::ZERO;
    let mut count = 0_u32;
    for sample in changed_touches(history, changed_after) {
        sum += position(sample, of_current).to_vec2();
        count += 1;
    }
    (count > 0).then(|| (sum / f64::from(count)).to_point())
}

/// Centroid of the current positions of every active touch.
#[must_use]
pub fn current_centroid(history: &TouchHistory) -> Option<Point> {
    centroid(history, 0, true)
}

/// Horizontal component of [`current_centroid`].
#[must_use]
pub fn current_centroid_x(history: &TouchHistory) -> Option<f64> {
    current_centroid(history).map(|p| p.x)
}

/// Vertical component of [`current_centroid`].
#[must_use]
pub fn current_centroid_y(history: &TouchHistory) -> Option<f64> {
    current_centroid(history).map(|p| p.y)
}

/// Centroid of the current positions of touches changed after `changed_after`.
#[must_use]
pub fn current_centroid_of_touches_changed_after(
    history: &TouchHistory,
    changed_after: u64,
) -> Option<Point> {
    centroid(history, changed_after, true)
}

/// Centroid of the previous positions of touches changed after `changed_after`.
#[must_use]
pub fn previous_centroid_of_touches_changed_after(
    history: &TouchHistory,
    changed_after: u64,
) -> Option<Point> {
    centroid(history, changed_after, false)
}

/// Horizontal component of [`current_centroid_of_touches_changed_after`].
#[must_use]
pub fn current_centroid_x_of_touches_changed_after(
    history: &TouchHistory,
    changed_after: u64,
) -> Option<f64> {
    current_centroid_of_touches_changed_after(history, changed_after).map(|p| p.x)
}

/// Vertical component of [`current_centroid_of_touches_changed_after`].
#[must_use]
pub fn current_centroid_y_of_touches_changed_after(
    history: &TouchHistory,
    changed_after: u64,
) -> Option<f64> {
    current_centroid_of_touches_changed_after(history, changed_after).map(|p| p.y)
}

/// Horizontal component of [`previous_centroid_of_touches_changed_after`].
#[must_use]
pub fn previous_centroid_x_of_touches_changed_after(
    history: &TouchHistory,
    changed_after: u64,
) -> Option<f64> {
    previous_centroid_of_touches_changed_after(history, changed_after).map(|p| p.x)
}

/// Vertical component of [`previous_centroid_of_touches_changed_after`].
#[must_use]
pub fn previous_centroid_y_of_touches_changed_after(
    history: &TouchHistory,
    changed_after: u64,
) -> Option<f64> {
    previous_centroid_of_touches_changed_after(history, changed_after).map(|p| p.y)
}

/// Largest pairwise distance between active touches changed at or after
/// `changed_after`, using current or previous positions.
///
/// Returns `None` when fewer than two fingers are down or fewer than two pass
/// the filter.
#[must_use]
pub fn pinch_distance(history: &TouchHistory, changed_after: u64, of_current: bool) -> Option<f64> {
    if history.number_active_touches() < 2 {
        return None;
    }

    let mut max: Option<f64> = None;
    for (i, a) in changed_touches(history, changed_after).enumerate() {
        for b in changed_touches(history, changed_after).skip(i + 1) {
            let d = position(a, of_current).distance(position(b, of_current));
            max = Some(max.map_or(d, |m| m.max(d)));
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;

    fn two_finger_history() -> TouchHistory {
        let mut h = TouchHistory::new();
        h.record_start(0, Point::new(100.0, 100.0), 10).unwrap();
        h.record_start(1, Point::new(200.0, 100.0), 10).unwrap();
        h.record_move(0, Point::new(90.0, 100.0), 20).unwrap();
        h.record_move(1, Point::new(230.0, 100.0), 20).unwrap();
        h
    }

    #[test]
    fn single_touch_uses_strict_filter() {
        let mut h = TouchHistory::new();
        h.record_start(4, Point::new(5.0, 6.0), 50).unwrap();

        assert_eq!(current_centroid(&h), Some(Point::new(5.0, 6.0)));
        assert_eq!(current_centroid_of_touches_changed_after(&h, 49), Some(Point::new(5.0, 6.0)));
        // A lone touch changed exactly at the filter time does not count.
        assert_eq!(current_centroid_of_touches_changed_after(&h, 50), None);
    }

    #[test]
    fn multi_touch_uses_inclusive_filter() {
        let h = two_finger_history();
        assert_eq!(
            current_centroid_of_touches_changed_after(&h, 20),
            Some(Point::new(160.0, 100.0))
        );
        assert_eq!(
            previous_centroid_of_touches_changed_after(&h, 20),
            Some(Point::new(150.0, 100.0))
        );
        assert_eq!(current_centroid_of_touches_changed_after(&h, 21), None);
    }

    #[test]
    fn filter_excludes_touches_that_did_not_move() {
        let mut h = two_finger_history();
        h.record_move(1, Point::new(240.0, 110.0), 30).unwrap();

        // Only finger 1 changed after 25.
        assert_eq!(current_centroid_x_of_touches_changed_after(&h, 25), Some(240.0));
        assert_eq!(current_centroid_y_of_touches_changed_after(&h, 25), Some(110.0));
        assert_eq!(previous_centroid_x_of_touches_changed_after(&h, 25), Some(230.0));
        assert_eq!(previous_centroid_y_of_touches_changed_after(&h, 25), Some(100.0));
        // Unfiltered, both count.
        assert_eq!(current_centroid_x(&h), Some(165.0));
        assert_eq!(current_centroid_y(&h), Some(105.0));
    }

    #[test]
    fn ended_touches_are_ignored() {
        let mut h = two_finger_history();
        h.record_end(1, Point::new(230.0, 100.0), 30).unwrap();
        assert_eq!(current_centroid(&h), Some(Point::new(90.0, 100.0)));
        assert_eq!(pinch_distance(&h, 0, true), None);
    }

    #[test]
    fn pinch_distance_current_and_previous() {
        let h = two_finger_history();
        assert_eq!(pinch_distance(&h, 20, true), Some(140.0));
        assert_eq!(pinch_distance(&h, 20, false), Some(100.0));
    }

    #[test]
    fn pinch_distance_takes_the_widest_pair() {
        let mut h = TouchHistory::new();
        h.record_start(0, Point::new(0.0, 0.0), 5).unwrap();
        h.record_start(1, Point::new(30.0, 40.0), 5).unwrap();
        h.record_start(2, Point::new(3.0, 4.0), 5).unwrap();
        assert_eq!(pinch_distance(&h, 0, true), Some(50.0));
    }

    #[test]
    fn pinch_distance_unavailable() {
        let mut h = TouchHistory::new();
        assert_eq!(pinch_distance(&h, 0, true), None);
        h.record_start(0, Point::new(0.0, 0.0), 5).unwrap();
        assert_eq!(pinch_distance(&h, 0, true), None);

        // Two fingers down but only one changed after the filter.
        let mut h = two_finger_history();
        h.record_move(0, Point::new(80.0, 100.0), 40).unwrap();
        assert_eq!(pinch_distance(&h, 30, true), None);
    }

    #[test]
    fn empty_history_has_no_centroid() {
        let h = TouchHistory::new();
        assert_eq!(current_centroid(&h), None);
        assert_eq!(previous_centroid_of_touches_changed_after(&h, 0), None);
    }
}
