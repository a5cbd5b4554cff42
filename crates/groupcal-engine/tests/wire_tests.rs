//! Tests for the camelCase wire boundary.

use chrono::{NaiveDate, TimeZone, Utc, Weekday};
use groupcal_engine::{
    EngineError, EventTemplate, EventTemplateSpec, Occurrence, RecurrenceRule, RecurrenceRuleSpec,
};

#[test]
fn weekly_rule_parses_from_camel_case_json() {
    let json = r#"{
        "frequency": "WEEKLY",
        "interval": 1,
        "daysOfWeek": ["MO", "WE"],
        "startDate": "2026-01-05"
    }"#;

    let spec: RecurrenceRuleSpec = serde_json::from_str(json).unwrap();
    let rule = RecurrenceRule::try_from(spec).unwrap();

    assert_eq!(rule.weekdays(), &[Weekday::Mon, Weekday::Wed]);
    assert_eq!(rule.interval(), 1);
}

#[test]
fn interval_defaults_to_one_when_omitted() {
    let json = r#"{"frequency": "DAILY", "startDate": "2026-01-05", "count": 3}"#;
    let spec: RecurrenceRuleSpec = serde_json::from_str(json).unwrap();
    let rule = RecurrenceRule::try_from(spec).unwrap();

    assert_eq!(rule.interval(), 1);
    assert_eq!(rule.count(), Some(3));
}

#[test]
fn monthly_without_day_of_month_is_rejected_at_the_boundary() {
    let json = r#"{"frequency": "MONTHLY", "startDate": "2026-01-05"}"#;
    let spec: RecurrenceRuleSpec = serde_json::from_str(json).unwrap();

    let err = RecurrenceRule::try_from(spec).unwrap_err();
    assert!(matches!(err, EngineError::InvalidRule(_)));
    assert!(err.to_string().contains("dayOfMonth"), "got: {err}");
}

#[test]
fn unknown_weekday_code_is_rejected() {
    let json = r#"{
        "frequency": "WEEKLY",
        "daysOfWeek": ["MONDAY"],
        "startDate": "2026-01-05"
    }"#;
    let spec: RecurrenceRuleSpec = serde_json::from_str(json).unwrap();

    let err = RecurrenceRule::try_from(spec).unwrap_err();
    assert!(err.to_string().contains("MONDAY"), "got: {err}");
}

#[test]
fn unknown_timezone_is_rejected() {
    let json = r#"{
        "title": "Standup",
        "startTime": "09:00:00",
        "endTime": "09:30:00",
        "timezone": "Mars/Olympus_Mons",
        "ownerId": "alice"
    }"#;
    let spec: EventTemplateSpec = serde_json::from_str(json).unwrap();

    let err = EventTemplate::try_from(spec).unwrap_err();
    assert!(matches!(err, EngineError::InvalidTimezone(_)));
}

#[test]
fn rule_round_trips_through_its_spec() {
    let rule = RecurrenceRule::weekly(
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        2,
        &[Weekday::Fri, Weekday::Mon],
    )
    .unwrap()
    .with_count(10)
    .unwrap();

    let spec = RecurrenceRuleSpec::from(&rule);
    assert_eq!(spec.days_of_week, vec!["MO", "FR"]); // sorted Monday-first
    let back = RecurrenceRule::try_from(spec).unwrap();
    assert_eq!(back, rule);
}

#[test]
fn occurrences_serialize_with_camel_case_fields() {
    let occurrence = Occurrence {
        rule_id: "sched-1".to_string(),
        owner_id: "alice".to_string(),
        title: "Standup".to_string(),
        description: None,
        location: None,
        color: None,
        occurrence_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        start: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap(),
        detached: false,
    };

    let json = serde_json::to_string(&occurrence).unwrap();
    assert!(json.contains("\"ruleId\""), "got: {json}");
    assert!(json.contains("\"occurrenceDate\":\"2026-03-02\""), "got: {json}");
    assert!(json.contains("\"ownerId\""), "got: {json}");
}
