//! Conflict checks between proposed occurrences and existing busy time.
//!
//! Adjacent spans (one ends exactly when the other starts) are NOT conflicts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::Occurrence;
use crate::freebusy::BusyInterval;

/// A detected clash between a proposed occurrence and a busy interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub occurrence: Occurrence,
    pub busy: BusyInterval,
    pub overlap_minutes: i64,
}

/// Find all clashes between proposed occurrences and busy intervals.
///
/// Two spans conflict when `a.start < b.end && b.start < a.end`; the overlap
/// is `min(ends) - max(starts)`.
pub fn find_conflicts(proposed: &[Occurrence], busy: &[BusyInterval]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for occurrence in proposed {
        for interval in busy {
            if occurrence.start < interval.end && interval.start < occurrence.end {
                let overlap_start = occurrence.start.max(interval.start);
                let overlap_end = occurrence.end.min(interval.end);
                conflicts.push(Conflict {
                    occurrence: occurrence.clone(),
                    busy: interval.clone(),
                    overlap_minutes: (overlap_end - overlap_start).num_minutes(),
                });
            }
        }
    }

    conflicts
}

/// Whether a user with the given busy intervals is free for a candidate span.
pub fn is_available(busy: &[BusyInterval], start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    busy.iter().all(|b| start >= b.end || end <= b.start)
}
