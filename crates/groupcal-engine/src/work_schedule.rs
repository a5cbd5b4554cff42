//! Weekly work-hour patterns and the availability they imply.
//!
//! A `WorkSchedule` entry says "this user is available on this weekday between
//! these local times". Expanding the entries over an instant window gives the
//! user's available intervals; intersecting members' intervals gives a group's
//! common working time.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;

use crate::availability::intersect_free;
use crate::event::resolve_local;
use crate::interval::{Interval, IntervalSet};

/// One weekday slot of a user's recurring work schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSchedule {
    pub owner_id: String,
    pub weekday: Weekday,
    /// Local start of the working slot.
    pub start_time: NaiveTime,
    /// Local end of the working slot. An end at or before the start rolls
    /// into the next day (overnight shifts).
    pub end_time: NaiveTime,
    pub timezone: Tz,
}

/// Expand a user's weekly pattern into concrete available intervals clipped to
/// `[window_start, window_end)`.
pub fn available_intervals(
    schedules: &[WorkSchedule],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> IntervalSet {
    let mut intervals = Vec::new();

    for schedule in schedules {
        // Walk local dates covering the window, one day of margin on each side
        // so slots straddling the window edges are not missed.
        let local_first = window_start.with_timezone(&schedule.timezone).date_naive() - Duration::days(1);
        let local_last = window_end.with_timezone(&schedule.timezone).date_naive() + Duration::days(1);

        let mut date = local_first;
        while date <= local_last {
            if date.weekday() == schedule.weekday {
                let start_local = date.and_time(schedule.start_time);
                let mut end_local = date.and_time(schedule.end_time);
                if schedule.end_time <= schedule.start_time {
                    end_local += Duration::days(1);
                }
                let start = resolve_local(schedule.timezone, start_local).max(window_start);
                let end = resolve_local(schedule.timezone, end_local).min(window_end);
                if let Some(iv) = Interval::new(start, end) {
                    intervals.push(iv);
                }
            }
            date += Duration::days(1);
        }
    }

    IntervalSet::from_unsorted(intervals)
}

/// Time within the window when every member's work schedule overlaps.
pub fn common_working_time(
    member_schedules: &[Vec<WorkSchedule>],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> IntervalSet {
    let per_member: Vec<IntervalSet> = member_schedules
        .iter()
        .map(|schedules| available_intervals(schedules, window_start, window_end))
        .collect();
    intersect_free(&per_member)
}
