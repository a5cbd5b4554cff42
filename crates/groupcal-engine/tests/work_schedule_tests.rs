//! Tests for weekly work-hour patterns and group working time.

use chrono::{DateTime, NaiveTime, TimeZone, Utc, Weekday};
use groupcal_engine::{available_intervals, common_working_time, WorkSchedule};

fn utc(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, day, hour, min, 0).unwrap()
}

fn time(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

fn slot(owner: &str, weekday: Weekday, start: NaiveTime, end: NaiveTime, tz: &str) -> WorkSchedule {
    WorkSchedule {
        owner_id: owner.to_string(),
        weekday,
        start_time: start,
        end_time: end,
        timezone: tz.parse().unwrap(),
    }
}

#[test]
fn weekly_pattern_expands_on_matching_weekdays_only() {
    // 2026-01-05 is a Monday. Window covers one full week.
    let schedules = vec![slot("alice", Weekday::Mon, time(9, 0), time(17, 0), "UTC")];

    let available = available_intervals(&schedules, utc(5, 0, 0), utc(12, 0, 0));
    let spans = available.as_slice();
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].end), (utc(5, 9, 0), utc(5, 17, 0)));
}

#[test]
fn multiple_weekday_slots_expand_independently() {
    let schedules = vec![
        slot("alice", Weekday::Mon, time(9, 0), time(12, 0), "UTC"),
        slot("alice", Weekday::Wed, time(13, 0), time(17, 0), "UTC"),
    ];

    let available = available_intervals(&schedules, utc(5, 0, 0), utc(12, 0, 0));
    let spans = available.as_slice();
    assert_eq!(spans.len(), 2);
    assert_eq!((spans[0].start, spans[0].end), (utc(5, 9, 0), utc(5, 12, 0)));
    assert_eq!((spans[1].start, spans[1].end), (utc(7, 13, 0), utc(7, 17, 0)));
}

#[test]
fn overnight_shift_rolls_into_the_next_day() {
    // Friday 22:00 → Saturday 06:00. 2026-01-09 is a Friday.
    let schedules = vec![slot("alice", Weekday::Fri, time(22, 0), time(6, 0), "UTC")];

    let available = available_intervals(&schedules, utc(5, 0, 0), utc(12, 0, 0));
    let spans = available.as_slice();
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].end), (utc(9, 22, 0), utc(10, 6, 0)));
}

#[test]
fn schedule_times_resolve_in_their_own_timezone() {
    // Monday 09:00-17:00 in Los Angeles is 17:00 UTC to 01:00 UTC next day
    // (PST, UTC-8, in January).
    let schedules = vec![slot(
        "alice",
        Weekday::Mon,
        time(9, 0),
        time(17, 0),
        "America/Los_Angeles",
    )];

    let available = available_intervals(&schedules, utc(5, 0, 0), utc(7, 0, 0));
    let spans = available.as_slice();
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].end), (utc(5, 17, 0), utc(6, 1, 0)));
}

#[test]
fn group_working_time_is_the_member_intersection() {
    let alice = vec![slot("alice", Weekday::Mon, time(9, 0), time(17, 0), "UTC")];
    let bob = vec![slot("bob", Weekday::Mon, time(10, 0), time(18, 0), "UTC")];

    let common = common_working_time(&[alice, bob], utc(5, 0, 0), utc(12, 0, 0));
    let spans = common.as_slice();
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].end), (utc(5, 10, 0), utc(5, 17, 0)));
}

#[test]
fn disjoint_schedules_have_no_common_time() {
    let alice = vec![slot("alice", Weekday::Mon, time(9, 0), time(12, 0), "UTC")];
    let bob = vec![slot("bob", Weekday::Tue, time(9, 0), time(12, 0), "UTC")];

    let common = common_working_time(&[alice, bob], utc(5, 0, 0), utc(12, 0, 0));
    assert!(common.is_empty());
}
