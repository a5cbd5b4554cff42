//! Free/busy computation for a single user's calendar.
//!
//! Clips busy intervals to a window, merges overlaps, and walks the gaps.
//! Overlapping busy events collapse into one span, so free time is never
//! double-counted around them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Occurrence;
use crate::interval::{Interval, IntervalSet};

/// A span during which a user is busy. Derived from events; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyInterval {
    pub owner_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<&Occurrence> for BusyInterval {
    fn from(occurrence: &Occurrence) -> Self {
        BusyInterval {
            owner_id: occurrence.owner_id.clone(),
            start: occurrence.start,
            end: occurrence.end,
        }
    }
}

/// Free and merged-busy intervals inside an analysis window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeBusy {
    pub free: IntervalSet,
    pub busy: IntervalSet,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

/// Merge a user's busy intervals clipped to `[window_start, window_end)`.
fn merged_busy(
    busy: &[BusyInterval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> IntervalSet {
    let clipped: Vec<Interval> = busy
        .iter()
        .filter_map(|b| Interval::new(b.start.max(window_start), b.end.min(window_end)))
        .collect();
    IntervalSet::from_unsorted(clipped)
}

/// Compute free and busy time within a window.
///
/// Zero busy intervals is not an error: the whole window comes back free.
/// A degenerate window (`window_start >= window_end`) yields empty sets.
pub fn compute_free_busy(
    busy: &[BusyInterval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> FreeBusy {
    let busy_set = merged_busy(busy, window_start, window_end);

    let mut free = IntervalSet::new();
    let mut cursor = window_start;
    for span in &busy_set {
        if let Some(gap) = Interval::new(cursor, span.start) {
            free.insert(gap);
        }
        cursor = cursor.max(span.end);
    }
    // Trailing gap after the last busy span.
    if let Some(gap) = Interval::new(cursor, window_end) {
        free.insert(gap);
    }

    FreeBusy {
        free,
        busy: busy_set,
        window_start,
        window_end,
    }
}

/// First free gap of at least `min_minutes` within the window.
pub fn find_first_free_slot(
    busy: &[BusyInterval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    min_minutes: i64,
) -> Option<Interval> {
    compute_free_busy(busy, window_start, window_end)
        .free
        .into_vec()
        .into_iter()
        .find(|slot| slot.duration_minutes() >= min_minutes)
}
