//! Set operations over half-open unit intervals.
//!
//! All functions are pure.
//!
//! # Sweep tie-break
//! [`combine_with_counts`] sorts events by time and, at equal times,
//! processes `end` events before `start` events. An interval ending at `t`
//! and another starting at `t` are therefore never counted together, and
//! zero-width spans between coincident events are dropped.

use serde::{Deserialize, Serialize};

use crate::models::{Interval, Unit};

/// A span during which exactly `count` groups are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountedInterval {
    /// Number of groups simultaneously available.
    pub count: usize,
    /// The span.
    pub interval: Interval,
}

impl CountedInterval {
    /// Creates a counted interval.
    pub fn new(count: usize, start: Unit, end: Unit) -> Self {
        Self {
            count,
            interval: Interval::new(start, end),
        }
    }
}

/// Whether `t` falls in `[interval.start, interval.end)`.
#[inline]
pub fn is_within(interval: &Interval, t: Unit) -> bool {
    interval.contains(t)
}

/// Removes every blocked span from a list of availability windows.
///
/// Each overlap splits a window into zero, one, or two pieces. Empty and
/// inverted blocked spans remove nothing. The order of `blocked` does not
/// change the covered units. The result is in
/// derivation order and is not sorted.
pub fn subtract(availability: &[Interval], blocked: &[Interval]) -> Vec<Interval> {
    let mut remaining = availability.to_vec();
    for b in blocked {
        remaining = remaining
            .into_iter()
            .flat_map(|w| subtract_one(w, b))
            .collect();
    }
    remaining
}

fn subtract_one(w: Interval, b: &Interval) -> Vec<Interval> {
    if b.is_empty() || !w.overlaps(b) {
        return vec![w];
    }
    let mut pieces = Vec::with_capacity(2);
    if b.start > w.start {
        pieces.push(Interval::new(w.start, b.start));
    }
    if b.end < w.end {
        pieces.push(Interval::new(b.end, w.end));
    }
    pieces
}

/// Sorts and merges overlapping or touching intervals; drops empty ones.
pub fn flatten(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals.iter().copied().filter(|w| !w.is_empty()).collect();
    sorted.sort();

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for w in sorted {
        match merged.last_mut() {
            Some(last) if w.start <= last.end => last.end = last.end.max(w.end),
            _ => merged.push(w),
        }
    }
    merged
}

/// Counts, for every span of the timeline, how many groups are available.
///
/// Each group (typically one person's availability) is flattened first, so
/// overlapping intervals within one group count once. The result is
/// disjoint, ordered by start, and contains only spans with `count > 0`.
pub fn combine_with_counts(groups: &[Vec<Interval>]) -> Vec<CountedInterval> {
    // (time, delta): -1 sorts before +1 at equal times.
    let mut events: Vec<(Unit, i32)> = groups
        .iter()
        .flat_map(|g| flatten(g))
        .flat_map(|w| [(w.start, 1), (w.end, -1)])
        .collect();
    events.sort_unstable();

    let mut result = Vec::new();
    let mut count: i32 = 0;
    let mut prev: Unit = 0;
    for (t, delta) in events {
        if count > 0 && t > prev {
            result.push(CountedInterval::new(count as usize, prev, t));
        }
        count += delta;
        prev = t;
    }
    result
}

/// Spans during which every group is available.
///
/// Returns an empty list for no groups.
pub fn intersect_all(groups: &[Vec<Interval>]) -> Vec<Interval> {
    if groups.is_empty() {
        return Vec::new();
    }
    let common: Vec<Interval> = combine_with_counts(groups)
        .into_iter()
        .filter(|c| c.count == groups.len())
        .map(|c| c.interval)
        .collect();
    flatten(&common)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn iv(pairs: &[(Unit, Unit)]) -> Vec<Interval> {
        pairs.iter().map(|&(s, e)| Interval::new(s, e)).collect()
    }

    fn random_intervals(rng: &mut StdRng, n: usize, horizon: Unit) -> Vec<Interval> {
        (0..n)
            .map(|_| {
                let a = rng.random_range(0..horizon);
                let b = rng.random_range(0..horizon);
                Interval::new(a.min(b), a.max(b))
            })
            .collect()
    }

    fn covered(intervals: &[Interval], t: Unit) -> bool {
        intervals.iter().any(|w| w.contains(t))
    }

    #[test]
    fn test_is_within() {
        let w = Interval::new(3, 6);
        assert!(is_within(&w, 3));
        assert!(is_within(&w, 5));
        assert!(!is_within(&w, 6));
        assert!(!is_within(&w, 2));
    }

    #[test]
    fn test_subtract_nothing() {
        let avail = iv(&[(5, 9), (0, 3), (4, 4)]);
        assert_eq!(subtract(&avail, &[]), avail);
    }

    #[test]
    fn test_subtract_full_overlap() {
        let avail = iv(&[(2, 6)]);
        assert!(subtract(&avail, &iv(&[(0, 10)])).is_empty());
        assert!(subtract(&avail, &iv(&[(2, 6)])).is_empty());
    }

    #[test]
    fn test_subtract_splits() {
        let avail = iv(&[(0, 10)]);
        assert_eq!(subtract(&avail, &iv(&[(3, 5)])), iv(&[(0, 3), (5, 10)]));
        assert_eq!(subtract(&avail, &iv(&[(0, 4)])), iv(&[(4, 10)]));
        assert_eq!(subtract(&avail, &iv(&[(8, 12)])), iv(&[(0, 8)]));
        // touching blocked span leaves the window intact
        assert_eq!(subtract(&avail, &iv(&[(10, 12)])), iv(&[(0, 10)]));
    }

    #[test]
    fn test_subtract_empty_block_keeps_window() {
        let avail = iv(&[(0, 10)]);
        assert_eq!(subtract(&avail, &iv(&[(5, 5)])), avail);
        assert_eq!(subtract(&avail, &iv(&[(0, 0)])), avail);
        // inverted span covers no units either
        assert_eq!(subtract(&avail, &iv(&[(7, 3)])), avail);
        assert_eq!(subtract(&avail, &iv(&[(5, 5), (2, 4)])), iv(&[(0, 2), (4, 10)]));
    }

    #[test]
    fn test_subtract_several_blocks() {
        let avail = iv(&[(0, 10), (20, 30)]);
        let blocked = iv(&[(2, 4), (6, 22), (28, 40)]);
        assert_eq!(subtract(&avail, &blocked), iv(&[(0, 2), (4, 6), (22, 28)]));
    }

    #[test]
    fn test_subtract_order_independent_random() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let avail = random_intervals(&mut rng, 4, 50);
            let mut blocked = random_intervals(&mut rng, 3, 50);
            let forward = subtract(&avail, &blocked);
            blocked.reverse();
            let backward = subtract(&avail, &blocked);

            for t in 0..50 {
                let expected = covered(&avail, t) && !covered(&blocked, t);
                assert_eq!(covered(&forward, t), expected, "unit {t}");
                assert_eq!(covered(&backward, t), expected, "unit {t}");
            }
        }
    }

    #[test]
    fn test_flatten() {
        let merged = flatten(&iv(&[(5, 8), (0, 2), (1, 3), (3, 4), (7, 7)]));
        assert_eq!(merged, iv(&[(0, 4), (5, 8)]));
        assert!(flatten(&[]).is_empty());
    }

    #[test]
    fn test_combine_empty() {
        assert!(combine_with_counts(&[]).is_empty());
        assert!(combine_with_counts(&[vec![]]).is_empty());
        assert!(combine_with_counts(&[vec![], vec![]]).is_empty());
    }

    #[test]
    fn test_combine_disjoint() {
        let groups = vec![iv(&[(1, 2)]), iv(&[(3, 4), (5, 6)])];
        assert_eq!(
            combine_with_counts(&groups),
            vec![
                CountedInterval::new(1, 1, 2),
                CountedInterval::new(1, 3, 4),
                CountedInterval::new(1, 5, 6),
            ]
        );
    }

    #[test]
    fn test_combine_two_overlapping() {
        let groups = vec![iv(&[(1, 5)]), iv(&[(2, 4)])];
        assert_eq!(
            combine_with_counts(&groups),
            vec![
                CountedInterval::new(1, 1, 2),
                CountedInterval::new(2, 2, 4),
                CountedInterval::new(1, 4, 5),
            ]
        );
    }

    #[test]
    fn test_combine_three_overlapping() {
        let groups = vec![iv(&[(1, 5)]), iv(&[(2, 6)]), iv(&[(3, 4)])];
        assert_eq!(
            combine_with_counts(&groups),
            vec![
                CountedInterval::new(1, 1, 2),
                CountedInterval::new(2, 2, 3),
                CountedInterval::new(3, 3, 4),
                CountedInterval::new(2, 4, 5),
                CountedInterval::new(1, 5, 6),
            ]
        );
    }

    #[test]
    fn test_combine_same_person_counts_once() {
        let groups = vec![iv(&[(0, 6), (2, 4)]), iv(&[(3, 5)])];
        assert_eq!(
            combine_with_counts(&groups),
            vec![
                CountedInterval::new(1, 0, 3),
                CountedInterval::new(2, 3, 5),
                CountedInterval::new(1, 5, 6),
            ]
        );
    }

    #[test]
    fn test_combine_touching_tie_break() {
        // One ends exactly where the other starts: never counted together.
        let groups = vec![iv(&[(1, 3)]), iv(&[(3, 5)])];
        let combined = combine_with_counts(&groups);
        assert_eq!(
            combined,
            vec![CountedInterval::new(1, 1, 3), CountedInterval::new(1, 3, 5)]
        );
        assert!(combined.iter().all(|c| c.count == 1));
    }

    #[test]
    fn test_combine_matches_pointwise_count_random() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let groups: Vec<Vec<Interval>> =
                (0..4).map(|_| random_intervals(&mut rng, 3, 40)).collect();
            let combined = combine_with_counts(&groups);

            for pair in combined.windows(2) {
                assert!(pair[0].interval.end <= pair[1].interval.start);
            }
            for t in 0..40 {
                let expected = groups.iter().filter(|g| covered(g, t)).count();
                let actual = combined
                    .iter()
                    .find(|c| c.interval.contains(t))
                    .map_or(0, |c| c.count);
                assert_eq!(actual, expected, "unit {t}");
            }
        }
    }

    #[test]
    fn test_intersect_all() {
        let groups = vec![iv(&[(0, 10)]), iv(&[(2, 6), (8, 12)]), iv(&[(1, 9)])];
        assert_eq!(intersect_all(&groups), iv(&[(2, 6), (8, 9)]));
        assert!(intersect_all(&[]).is_empty());
        assert!(intersect_all(&[iv(&[(0, 2)]), iv(&[(2, 4)])]).is_empty());
    }
}
