//! Common free time across multiple users' calendars.
//!
//! Per-user free intervals come from [`compute_free_busy`]; the intersection
//! is a pairwise two-pointer merge that generalizes associatively to N users,
//! so the result does not depend on user order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::freebusy::{compute_free_busy, BusyInterval};
use crate::interval::{Interval, IntervalSet};

/// One user's busy intervals, as loaded from their calendars.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBusy {
    pub owner_id: String,
    pub busy: Vec<BusyInterval>,
}

/// Intersect any number of free-interval sets.
///
/// Zero sets, or any set with zero free time, yields an empty result — not an
/// error.
pub fn intersect_free(sets: &[IntervalSet]) -> IntervalSet {
    let mut iter = sets.iter();
    let Some(first) = iter.next() else {
        return IntervalSet::new();
    };
    let mut common = first.clone();
    for set in iter {
        if common.is_empty() {
            break;
        }
        common = common.intersect(set);
    }
    common
}

/// Time within the window when every listed user is free.
pub fn common_free_time(
    users: &[UserBusy],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> IntervalSet {
    let free_sets: Vec<IntervalSet> = users
        .iter()
        .map(|user| compute_free_busy(&user.busy, window_start, window_end).free)
        .collect();
    intersect_free(&free_sets)
}

/// First slot of at least `min_minutes` when every user is free — the meeting
/// placement primitive.
pub fn find_common_slot(
    users: &[UserBusy],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    min_minutes: i64,
) -> Option<Interval> {
    common_free_time(users, window_start, window_end)
        .into_vec()
        .into_iter()
        .find(|slot| slot.duration_minutes() >= min_minutes)
}
