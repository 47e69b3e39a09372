// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch bank: one slot per tracked finger plus session-wide bookkeeping.
//!
//! Hosts feed raw touch points into a [`TouchHistory`] with
//! [`record_start`](TouchHistory::record_start),
//! [`record_move`](TouchHistory::record_move) and
//! [`record_end`](TouchHistory::record_end), then hand a shared reference to
//! the recognizer. Timestamps are milliseconds and must increase
//! monotonically; fingers that move in the same frame share a timestamp.
//!
//! ```
//! use kurbo::Point;
//! use pinchzoom_gesture::touch::TouchHistory;
//!
//! let mut history = TouchHistory::new();
//! history.record_start(0, Point::new(10.0, 10.0), 1_000).unwrap();
//! history.record_move(0, Point::new(20.0, 12.0), 1_016).unwrap();
//!
//! let touch = history.touch(0).unwrap();
//! assert_eq!(touch.previous, Point::new(10.0, 10.0));
//! assert_eq!(touch.current, Point::new(20.0, 12.0));
//! assert_eq!(history.number_active_touches(), 1);
//! assert_eq!(history.most_recent_timestamp(), 1_016);
//! ```

use core::fmt;

use kurbo::Point;

/// Number of finger slots in a [`TouchHistory`].
pub const MAX_TOUCHES: usize = 10;

/// Per-finger record of where a touch started, was, and is.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchSample {
    /// Whether the finger is still down.
    pub active: bool,
    /// Position where the touch started.
    pub start: Point,
    /// Timestamp of the touch start.
    pub start_timestamp: u64,
    /// Latest position.
    pub current: Point,
    /// Timestamp of the latest position.
    pub current_timestamp: u64,
    /// Position before the latest update.
    pub previous: Point,
    /// Timestamp of the position before the latest update.
    pub previous_timestamp: u64,
}

impl TouchSample {
    fn started(pos: Point, timestamp: u64) -> Self {
        Self {
            active: true,
            start: pos,
            start_timestamp: timestamp,
            current: pos,
            current_timestamp: timestamp,
            previous: pos,
            previous_timestamp: timestamp,
        }
    }

    fn advance(&mut self, pos: Point, timestamp: u64) {
        self.previous = self.current;
        self.previous_timestamp = self.current_timestamp;
        self.current = pos;
        self.current_timestamp = timestamp;
    }
}

/// Error returned when recording a touch that cannot be tracked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TouchError {
    /// The touch identifier does not fit in the bank.
    SlotOutOfRange(usize),
    /// The touch identifier was never started or has already ended.
    UnknownTouch(usize),
}

impl fmt::Display for TouchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlotOutOfRange(id) => {
                write!(f, "touch {id} exceeds the {MAX_TOUCHES} tracked slots")
            }
            Self::UnknownTouch(id) => write!(f, "touch {id} is not active"),
        }
    }
}

impl core::error::Error for TouchError {}

/// Fixed-capacity bank of touch samples.
#[derive(Clone, Debug, Default)]
pub struct TouchHistory {
    bank: [Option<TouchSample>; MAX_TOUCHES],
    number_active_touches: usize,
    index_of_single_active_touch: usize,
    most_recent_timestamp: u64,
}

impl TouchHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finger going down in slot `id`.
    ///
    /// A previously ended sample in the same slot is replaced.
    pub fn record_start(&mut self, id: usize, pos: Point, timestamp: u64) -> Result<(), TouchError> {
        let slot = self.bank.get_mut(id).ok_or(TouchError::SlotOutOfRange(id))?;
        *slot = Some(TouchSample::started(pos, timestamp));
        self.finish_update(timestamp);
        Ok(())
    }

    /// Records a finger moving in slot `id`.
    pub fn record_move(&mut self, id: usize, pos: Point, timestamp: u64) -> Result<(), TouchError> {
        self.active_mut(id)?.advance(pos, timestamp);
        self.finish_update(timestamp);
        Ok(())
    }

    /// Records a finger lifting from slot `id` at `pos`.
    pub fn record_end(&mut self, id: usize, pos: Point, timestamp: u64) -> Result<(), TouchError> {
        let sample = self.active_mut(id)?;
        sample.advance(pos, timestamp);
        sample.active = false;
        self.finish_update(timestamp);
        Ok(())
    }

    /// Returns the sample in slot `id`, active or not.
    #[must_use]
    pub fn touch(&self, id: usize) -> Option<&TouchSample> {
        self.bank.get(id).and_then(Option::as_ref)
    }

    /// Iterates over every recorded sample, active or not.
    pub fn touches(&self) -> impl Iterator<Item = &TouchSample> + '_ {
        self.bank.iter().flatten()
    }

    /// Iterates over the samples of fingers that are still down.
    pub fn active_touches(&self) -> impl Iterator<Item = &TouchSample> + '_ {
        self.touches().filter(|t| t.active)
    }

    /// Number of fingers currently down.
    #[must_use]
    pub fn number_active_touches(&self) -> usize {
        self.number_active_touches
    }

    /// The only active sample, when exactly one finger is down.
    #[must_use]
    pub fn single_active_touch(&self) -> Option<&TouchSample> {
        if self.number_active_touches == 1 {
            self.touch(self.index_of_single_active_touch)
        } else {
            None
        }
    }

    /// Timestamp of the latest recorded change.
    #[must_use]
    pub fn most_recent_timestamp(&self) -> u64 {
        self.most_recent_timestamp
    }

    fn active_mut(&mut self, id: usize) -> Result<&mut TouchSample, TouchError> {
        match self.bank.get_mut(id) {
            None => Err(TouchError::SlotOutOfRange(id)),
            Some(Some(sample)) if sample.active => Ok(sample),
            Some(_) => Err(TouchError::UnknownTouch(id)),
        }
    }

    fn finish_update(&mut self, timestamp: u64) {
        self.most_recent_timestamp = timestamp;
        self.number_active_touches = 0;
        for (index, sample) in self.bank.iter().enumerate() {
            if sample.is_some_and(|s| s.active) {
                self.number_active_touches += 1;
                self.index_of_single_active_touch = index;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;

    #[test]
    fn start_move_end_updates_sample() {
        let mut history = TouchHistory::new();
        history.record_start(2, Point::new(1.0, 2.0), 100).unwrap();
        history.record_move(2, Point::new(4.0, 6.0), 116).unwrap();
        history.record_end(2, Point::new(5.0, 7.0), 132).unwrap();

        let t = history.touch(2).unwrap();
        assert!(!t.active);
        assert_eq!(t.start, Point::new(1.0, 2.0));
        assert_eq!(t.previous, Point::new(4.0, 6.0));
        assert_eq!(t.current, Point::new(5.0, 7.0));
        assert_eq!(t.previous_timestamp, 116);
        assert_eq!(t.current_timestamp, 132);
        assert_eq!(history.number_active_touches(), 0);
        assert_eq!(history.most_recent_timestamp(), 132);
    }

    #[test]
    fn active_count_and_single_touch() {
        let mut history = TouchHistory::new();
        history.record_start(0, Point::new(0.0, 0.0), 10).unwrap();
        assert_eq!(history.single_active_touch().unwrap().current, Point::ZERO);

        history.record_start(3, Point::new(9.0, 9.0), 20).unwrap();
        assert_eq!(history.number_active_touches(), 2);
        assert!(history.single_active_touch().is_none());

        history.record_end(0, Point::new(0.0, 0.0), 30).unwrap();
        assert_eq!(history.number_active_touches(), 1);
        assert_eq!(
            history.single_active_touch().unwrap().current,
            Point::new(9.0, 9.0)
        );
        assert_eq!(history.touches().count(), 2);
        assert_eq!(history.active_touches().count(), 1);
    }

    #[test]
    fn restart_replaces_ended_slot() {
        let mut history = TouchHistory::new();
        history.record_start(0, Point::new(0.0, 0.0), 10).unwrap();
        history.record_end(0, Point::new(3.0, 0.0), 20).unwrap();
        history.record_start(0, Point::new(50.0, 50.0), 400).unwrap();

        let t = history.touch(0).unwrap();
        assert!(t.active);
        assert_eq!(t.previous, Point::new(50.0, 50.0));
        assert_eq!(t.start_timestamp, 400);
    }

    #[test]
    fn rejects_unknown_and_out_of_range_touches() {
        let mut history = TouchHistory::new();
        assert_eq!(
            history.record_start(MAX_TOUCHES, Point::ZERO, 1),
            Err(TouchError::SlotOutOfRange(MAX_TOUCHES))
        );
        assert_eq!(
            history.record_move(1, Point::ZERO, 1),
            Err(TouchError::UnknownTouch(1))
        );

        history.record_start(1, Point::ZERO, 1).unwrap();
        history.record_end(1, Point::ZERO, 2).unwrap();
        assert_eq!(
            history.record_end(1, Point::ZERO, 3),
            Err(TouchError::UnknownTouch(1))
        );
        // Failed updates leave bookkeeping alone.
        assert_eq!(history.most_recent_timestamp(), 2);
    }
}
