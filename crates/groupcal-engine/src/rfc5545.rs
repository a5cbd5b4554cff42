//! Expansion of RFC 5545 RRULE strings carried by imported events.
//!
//! Events synced in from external calendar providers keep their recurrence as
//! a raw RRULE string rather than a native [`RecurrenceRule`]. This module
//! expands those through the `rrule` crate. It is an interop path only:
//! native rules never go through here, and provider protocol/transport stays
//! outside the engine.
//!
//! [`RecurrenceRule`]: crate::rule::RecurrenceRule

use chrono::{DateTime, Utc};
use rrule::RRuleSet;

use crate::error::{EngineError, Result};

/// Expand an imported RRULE string into occurrence start instants, capped at
/// `limit` instances.
///
/// # Arguments
/// - `rrule` — RFC 5545 RRULE body (e.g. `"FREQ=WEEKLY;BYDAY=TU,TH"`)
/// - `dtstart` — local datetime of the first instance, `"2026-02-17T14:00:00"`
/// - `timezone` — IANA identifier the dtstart is anchored in
/// - `limit` — hard cap on the number of instances (imported rules may lack
///   COUNT/UNTIL; the cap guarantees termination)
///
/// # Errors
/// `EngineError::InvalidRrule` for an empty or unparseable rule string,
/// `EngineError::InvalidTimezone` for an unknown timezone identifier.
pub fn expand_imported_rule(
    rrule: &str,
    dtstart: &str,
    timezone: &str,
    limit: u16,
) -> Result<Vec<DateTime<Utc>>> {
    if rrule.is_empty() {
        return Err(EngineError::InvalidRrule("empty RRULE string".to_string()));
    }

    // Validate the timezone before handing it to the rrule parser, so the
    // caller gets the specific error.
    let _tz: chrono_tz::Tz = timezone
        .parse()
        .map_err(|_| EngineError::InvalidTimezone(timezone.to_string()))?;

    // "2026-02-17T14:00:00" → iCalendar "20260217T140000".
    let dtstart_ical = dtstart.replace(['-', ':'], "");
    let rrule_text = format!("DTSTART;TZID={}:{}\nRRULE:{}", timezone, dtstart_ical, rrule);

    let rrule_set: RRuleSet = rrule_text
        .parse()
        .map_err(|e| EngineError::InvalidRrule(format!("{}", e)))?;

    let instances = rrule_set.all(limit);

    Ok(instances
        .dates
        .into_iter()
        .map(|dt| dt.with_timezone(&Utc))
        .collect())
}
