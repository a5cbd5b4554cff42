//! Tests for the interval-set primitive.

use chrono::{DateTime, TimeZone, Utc};
use groupcal_engine::{Interval, IntervalSet};

fn instant(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, min, 0).unwrap()
}

fn iv(sh: u32, sm: u32, eh: u32, em: u32) -> Interval {
    Interval::new(instant(sh, sm), instant(eh, em)).unwrap()
}

#[test]
fn degenerate_intervals_are_rejected() {
    assert!(Interval::new(instant(9, 0), instant(9, 0)).is_none());
    assert!(Interval::new(instant(10, 0), instant(9, 0)).is_none());
}

#[test]
fn from_unsorted_sorts_and_merges_overlaps() {
    let set = IntervalSet::from_unsorted(vec![iv(12, 0, 13, 0), iv(9, 0, 10, 30), iv(10, 0, 11, 0)]);

    let spans = set.as_slice();
    assert_eq!(spans.len(), 2);
    assert_eq!((spans[0].start, spans[0].end), (instant(9, 0), instant(11, 0)));
    assert_eq!((spans[1].start, spans[1].end), (instant(12, 0), instant(13, 0)));
}

#[test]
fn touching_intervals_merge() {
    let set = IntervalSet::from_unsorted(vec![iv(9, 0, 10, 0), iv(10, 0, 11, 0)]);
    assert_eq!(set.len(), 1);
    assert_eq!(set.total_minutes(), 120);
}

#[test]
fn insert_merges_into_existing_spans() {
    let mut set = IntervalSet::from_unsorted(vec![iv(9, 0, 10, 0), iv(12, 0, 13, 0)]);
    set.insert(iv(9, 30, 12, 30));

    assert_eq!(set.len(), 1);
    let span = set.as_slice()[0];
    assert_eq!((span.start, span.end), (instant(9, 0), instant(13, 0)));
}

#[test]
fn intersect_walks_both_sets() {
    let a = IntervalSet::from_unsorted(vec![iv(9, 0, 11, 0), iv(13, 0, 15, 0)]);
    let b = IntervalSet::from_unsorted(vec![iv(10, 0, 13, 30), iv(14, 30, 16, 0)]);

    let common = a.intersect(&b);
    let spans = common.as_slice();
    assert_eq!(spans.len(), 3);
    assert_eq!((spans[0].start, spans[0].end), (instant(10, 0), instant(11, 0)));
    assert_eq!((spans[1].start, spans[1].end), (instant(13, 0), instant(13, 30)));
    assert_eq!((spans[2].start, spans[2].end), (instant(14, 30), instant(15, 0)));
}

#[test]
fn intersect_with_empty_is_empty() {
    let a = IntervalSet::from_unsorted(vec![iv(9, 0, 11, 0)]);
    assert!(a.intersect(&IntervalSet::new()).is_empty());
}

#[test]
fn subtract_punches_holes() {
    let a = IntervalSet::from_unsorted(vec![iv(9, 0, 17, 0)]);
    let holes = IntervalSet::from_unsorted(vec![iv(10, 0, 11, 0), iv(12, 0, 13, 0)]);

    let rest = a.subtract(&holes);
    let spans = rest.as_slice();
    assert_eq!(spans.len(), 3);
    assert_eq!((spans[0].start, spans[0].end), (instant(9, 0), instant(10, 0)));
    assert_eq!((spans[1].start, spans[1].end), (instant(11, 0), instant(12, 0)));
    assert_eq!((spans[2].start, spans[2].end), (instant(13, 0), instant(17, 0)));
}

#[test]
fn subtract_covering_set_leaves_nothing() {
    let a = IntervalSet::from_unsorted(vec![iv(10, 0, 11, 0)]);
    let cover = IntervalSet::from_unsorted(vec![iv(9, 0, 12, 0)]);
    assert!(a.subtract(&cover).is_empty());
}

#[test]
fn subtract_disjoint_set_changes_nothing() {
    let a = IntervalSet::from_unsorted(vec![iv(9, 0, 10, 0)]);
    let other = IntervalSet::from_unsorted(vec![iv(11, 0, 12, 0)]);
    assert_eq!(a.subtract(&other), a);
}

#[test]
fn clip_restricts_to_window() {
    let a = IntervalSet::from_unsorted(vec![iv(7, 0, 9, 30), iv(11, 0, 12, 0), iv(16, 0, 18, 0)]);
    let clipped = a.clip(&iv(9, 0, 17, 0));

    let spans = clipped.as_slice();
    assert_eq!(spans.len(), 3);
    assert_eq!((spans[0].start, spans[0].end), (instant(9, 0), instant(9, 30)));
    assert_eq!((spans[2].start, spans[2].end), (instant(16, 0), instant(17, 0)));
}
