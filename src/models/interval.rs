//! Interval model.
//!
//! All times inside the scheduling core are expressed in [`Unit`]s: integer
//! indices into one repeating week (see [`TimeGrid`](super::TimeGrid)).
//!
//! # Time Model
//! An [`Interval`] is half-open: `[start, end)` includes `start` and
//! excludes `end`. Two intervals that merely touch (`a.end == b.start`)
//! do not overlap.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a fixed-size time slice within one week.
pub type Unit = u32;

/// A half-open range of units `[start, end)`.
///
/// Used for availability windows, blocked spans, and meeting spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    /// Interval start (inclusive).
    pub start: Unit,
    /// Interval end (exclusive).
    pub end: Unit,
}

impl Interval {
    /// Creates a new interval.
    ///
    /// Does not check `start <= end`; requests are checked by
    /// [`validate_request`](crate::validation::validate_request).
    pub const fn new(start: Unit, end: Unit) -> Self {
        Self { start, end }
    }

    /// Length of this interval in units (0 for an inverted interval).
    #[inline]
    pub fn len(&self) -> Unit {
        self.end.saturating_sub(self.start)
    }

    /// Whether the interval covers no units.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `start <= end`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Whether a unit falls within this interval.
    #[inline]
    pub fn contains(&self, t: Unit) -> bool {
        self.start <= t && t < self.end
    }

    /// Whether a span of `length` units starting at `start` fits entirely
    /// inside this interval.
    #[inline]
    pub fn covers(&self, start: Unit, length: Unit) -> bool {
        self.start <= start && start.saturating_add(length) <= self.end
    }

    /// Whether two intervals share at least one unit.
    ///
    /// Empty and inverted intervals overlap nothing.
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// The overlapping part of two intervals, if any.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end > start {
            Some(Self::new(start, end))
        } else {
            None
        }
    }
}

impl From<(Unit, Unit)> for Interval {
    fn from((start, end): (Unit, Unit)) -> Self {
        Self::new(start, end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_basics() {
        let w = Interval::new(10, 20);
        assert_eq!(w.len(), 10);
        assert!(w.contains(10));
        assert!(w.contains(19));
        assert!(!w.contains(20)); // exclusive end
        assert!(!w.contains(5));
        assert!(!w.is_empty());
        assert!(Interval::new(4, 4).is_empty());
    }

    #[test]
    fn test_interval_overlap() {
        let a = Interval::new(0, 10);
        let b = Interval::new(5, 15);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = Interval::new(10, 20); // touching but not overlapping
        assert!(!a.overlaps(&c));
        assert_eq!(a.intersection(&c), None);
        assert_eq!(a.intersection(&b), Some(Interval::new(5, 10)));
    }

    #[test]
    fn test_empty_interval_overlaps_nothing() {
        let a = Interval::new(0, 10);
        let point = Interval::new(5, 5);
        assert!(!a.overlaps(&point));
        assert!(!point.overlaps(&a));
        assert!(!a.overlaps(&Interval::new(7, 3)));
    }

    #[test]
    fn test_covers_meeting_span() {
        let w = Interval::new(0, 10);
        assert!(w.covers(0, 2));
        assert!(w.covers(8, 2));
        assert!(!w.covers(9, 2));
        assert!(!Interval::new(3, 10).covers(2, 2));
    }

    #[test]
    fn test_inverted_interval() {
        let w = Interval::new(8, 3);
        assert!(!w.is_valid());
        assert_eq!(w.len(), 0);
        assert!(w.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::new(2, 4).to_string(), "[2, 4)");
    }
}
