//! Ordered, non-overlapping time intervals and their set algebra.
//!
//! `IntervalSet` is the primitive underneath free/busy and availability:
//! intervals are kept sorted by start and non-overlapping, with touching
//! intervals merged on insertion. All spans are half-open `[start, end)`.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A half-open time span `[start, end)` between two aware instants.
///
/// Never degenerate: construction enforces `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Returns `None` when `start >= end` — degenerate spans are excluded.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Strict overlap. Intervals that merely touch (one ends exactly where the
    /// other starts) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The common sub-span of two intervals, if non-empty.
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        Interval::new(self.start.max(other.start), self.end.min(other.end))
    }
}

/// A set of sorted, non-overlapping intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from intervals in any order. Overlapping and touching
    /// intervals are merged into single spans.
    pub fn from_unsorted(intervals: Vec<Interval>) -> Self {
        let mut set = IntervalSet { intervals };
        set.normalize();
        set
    }

    /// Insert one interval, merging it with any overlapping or touching spans.
    pub fn insert(&mut self, interval: Interval) {
        self.intervals.push(interval);
        self.normalize();
    }

    fn normalize(&mut self) {
        self.intervals.sort_by_key(|iv| (iv.start, iv.end));
        let mut merged: Vec<Interval> = Vec::with_capacity(self.intervals.len());
        for iv in self.intervals.drain(..) {
            if let Some(last) = merged.last_mut() {
                if iv.start <= last.end {
                    // Overlapping or touching — extend the current span.
                    last.end = last.end.max(iv.end);
                    continue;
                }
            }
            merged.push(iv);
        }
        self.intervals = merged;
    }

    /// Two-pointer intersection: time contained in both sets.
    pub fn intersect(&self, other: &IntervalSet) -> IntervalSet {
        let a = &self.intervals;
        let b = &other.intervals;
        let mut result = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            if let Some(overlap) = a[i].intersection(&b[j]) {
                result.push(overlap);
            }
            // Advance whichever interval ends first.
            if a[i].end < b[j].end {
                i += 1;
            } else {
                j += 1;
            }
        }
        IntervalSet { intervals: result }
    }

    /// Time contained in `self` but not in `other`.
    pub fn subtract(&self, other: &IntervalSet) -> IntervalSet {
        let mut result = Vec::new();
        let mut j = 0;
        for iv in &self.intervals {
            while j < other.intervals.len() && other.intervals[j].end <= iv.start {
                j += 1;
            }
            let mut cursor = iv.start;
            let mut k = j;
            while k < other.intervals.len() && other.intervals[k].start < iv.end {
                let hole = other.intervals[k];
                if cursor < hole.start {
                    result.push(Interval {
                        start: cursor,
                        end: hole.start,
                    });
                }
                cursor = cursor.max(hole.end);
                if cursor >= iv.end {
                    break;
                }
                k += 1;
            }
            if cursor < iv.end {
                result.push(Interval {
                    start: cursor,
                    end: iv.end,
                });
            }
        }
        IntervalSet { intervals: result }
    }

    /// Restrict the set to a single window interval.
    pub fn clip(&self, window: &Interval) -> IntervalSet {
        let window_set = IntervalSet {
            intervals: vec![*window],
        };
        self.intersect(&window_set)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn into_vec(self) -> Vec<Interval> {
        self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn total_minutes(&self) -> i64 {
        self.intervals.iter().map(Interval::duration_minutes).sum()
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
