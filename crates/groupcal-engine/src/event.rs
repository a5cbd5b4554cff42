//! Event templates and materialized occurrences.
//!
//! A template carries the wall-clock shape of a recurring event (times of day,
//! timezone, descriptive fields); the expander combines it with occurrence
//! dates to produce concrete UTC instants. Wall-clock duration is preserved
//! across DST transitions: start and end local times are resolved to UTC
//! independently, so a 09:00-10:00 meeting stays 09:00-10:00 local even when
//! the elapsed real time around a transition differs.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// The immutable shape of a recurring event. Times of day are interpreted in
/// `timezone`, never in the querying user's timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTemplate {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Local time of day the event starts.
    pub start_time: NaiveTime,
    /// Local time of day the event ends. An end at or before the start rolls
    /// into the next day.
    pub end_time: NaiveTime,
    pub timezone: Tz,
    pub color: Option<String>,
    pub owner_id: String,
}

/// One concrete instance of a recurring event on a specific date.
///
/// Never mutated after creation; a per-instance change goes through
/// [`detach_rescheduled`](Occurrence::detach_rescheduled), which produces a
/// standalone record the expander substitutes for the generated instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    /// Identifier of the series this instance was generated from.
    pub rule_id: String,
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub color: Option<String>,
    /// Series key: the occurrence's date in the template's timezone.
    pub occurrence_date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// True for instances that were detached from their series and now live
    /// independently of the rule.
    pub detached: bool,
}

impl Occurrence {
    /// Detach this instance from its series with new start/end instants.
    /// The occurrence date keeps its value — it is the key the expander uses
    /// to suppress the generated instance on future expansions.
    pub fn detach_rescheduled(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Occurrence {
        Occurrence {
            start,
            end,
            detached: true,
            ..self.clone()
        }
    }
}

/// Resolve a local wall-clock time in `tz` to a UTC instant.
///
/// Times inside a DST gap (e.g. 02:30 during spring-forward) shift to the
/// first valid instant after the gap; ambiguous times during fall-back take
/// the earlier of the two offsets.
pub fn resolve_local(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // DST gap: probe forward in 15-minute steps. Real-world gaps are
            // at most a few hours.
            let mut probe = local;
            for _ in 0..12 {
                probe += Duration::minutes(15);
                match tz.from_local_datetime(&probe) {
                    LocalResult::Single(dt) => return dt.with_timezone(&Utc),
                    LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
                    LocalResult::None => continue,
                }
            }
            // Unreachable with tz-database data; interpret as UTC rather than panic.
            Utc.from_utc_datetime(&local)
        }
    }
}

/// Aware start/end instants for a template on a given date, in the template's
/// timezone. The end is resolved from its own local wall time, preserving
/// wall-clock duration across DST transitions.
pub fn instants_on(template: &EventTemplate, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start_local = date.and_time(template.start_time);
    let mut end_local = date.and_time(template.end_time);
    if template.end_time <= template.start_time {
        end_local += Duration::days(1);
    }
    (
        resolve_local(template.timezone, start_local),
        resolve_local(template.timezone, end_local),
    )
}
