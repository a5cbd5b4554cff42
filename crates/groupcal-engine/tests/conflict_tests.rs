//! Tests for conflict detection between proposed occurrences and busy time.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use groupcal_engine::{find_conflicts, is_available, BusyInterval, Occurrence};

fn instant(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

fn occurrence(start_hour: u32, end_hour: u32) -> Occurrence {
    Occurrence {
        rule_id: "sched-1".to_string(),
        owner_id: "alice".to_string(),
        title: "Planning".to_string(),
        description: None,
        location: None,
        color: None,
        occurrence_date: NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(),
        start: instant(start_hour, 0),
        end: instant(end_hour, 0),
        detached: false,
    }
}

fn busy(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> BusyInterval {
    BusyInterval {
        owner_id: "alice".to_string(),
        start: instant(start_hour, start_min),
        end: instant(end_hour, end_min),
    }
}

#[test]
fn overlapping_spans_conflict_with_overlap_minutes() {
    let proposed = vec![occurrence(10, 12)];
    let existing = vec![busy(11, 0, 13, 0)];

    let conflicts = find_conflicts(&proposed, &existing);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_minutes, 60);
}

#[test]
fn adjacent_spans_do_not_conflict() {
    // One ends exactly when the other starts.
    let proposed = vec![occurrence(10, 11)];
    let existing = vec![busy(11, 0, 12, 0), busy(9, 0, 10, 0)];

    assert!(find_conflicts(&proposed, &existing).is_empty());
}

#[test]
fn every_overlapping_pair_is_reported() {
    let proposed = vec![occurrence(9, 12), occurrence(14, 15)];
    let existing = vec![busy(10, 0, 10, 30), busy(11, 0, 14, 30)];

    let conflicts = find_conflicts(&proposed, &existing);
    assert_eq!(conflicts.len(), 3);
}

#[test]
fn availability_check_matches_conflict_logic() {
    let existing = vec![busy(11, 0, 13, 0)];

    assert!(is_available(&existing, instant(9, 0), instant(11, 0)));
    assert!(is_available(&existing, instant(13, 0), instant(14, 0)));
    assert!(!is_available(&existing, instant(12, 30), instant(13, 30)));
    assert!(is_available(&[], instant(9, 0), instant(17, 0)));
}
