//! Canonical wire representation (camelCase JSON) and its validation boundary.
//!
//! Spec types mirror the core types where the conversion is non-trivial —
//! rules need frequency-specific validation, templates need timezone
//! resolution. `TryFrom` is the only path from wire data into the core, so
//! nothing downstream ever sees a malformed rule. Output types serialize
//! directly with camelCase field names.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::event::EventTemplate;
use crate::rule::{Frequency, RecurrenceRule};

/// Wire form of a recurrence rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRuleSpec {
    pub frequency: Frequency,
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Two-letter RFC 5545 codes: MO, TU, WE, TH, FR, SA, SU.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_week: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_of_year: Option<u32>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

fn default_interval() -> u32 {
    1
}

impl TryFrom<RecurrenceRuleSpec> for RecurrenceRule {
    type Error = EngineError;

    fn try_from(spec: RecurrenceRuleSpec) -> Result<RecurrenceRule> {
        let rule = match spec.frequency {
            Frequency::Daily => RecurrenceRule::daily(spec.start_date, spec.interval)?,
            Frequency::Weekly => {
                let weekdays = spec
                    .days_of_week
                    .iter()
                    .map(|code| parse_weekday(code))
                    .collect::<Result<Vec<_>>>()?;
                RecurrenceRule::weekly(spec.start_date, spec.interval, &weekdays)?
            }
            Frequency::Monthly => {
                let day = spec.day_of_month.ok_or_else(|| {
                    EngineError::InvalidRule("MONTHLY rules require dayOfMonth".to_string())
                })?;
                RecurrenceRule::monthly(spec.start_date, spec.interval, day)?
            }
            Frequency::Yearly => {
                let day = spec.day_of_month.ok_or_else(|| {
                    EngineError::InvalidRule("YEARLY rules require dayOfMonth".to_string())
                })?;
                let month = spec.month_of_year.ok_or_else(|| {
                    EngineError::InvalidRule("YEARLY rules require monthOfYear".to_string())
                })?;
                RecurrenceRule::yearly(spec.start_date, spec.interval, month, day)?
            }
        };
        let rule = match spec.end_date {
            Some(end) => rule.with_end_date(end)?,
            None => rule,
        };
        match spec.count {
            Some(count) => rule.with_count(count),
            None => Ok(rule),
        }
    }
}

impl From<&RecurrenceRule> for RecurrenceRuleSpec {
    fn from(rule: &RecurrenceRule) -> Self {
        RecurrenceRuleSpec {
            frequency: rule.frequency(),
            interval: rule.interval(),
            days_of_week: rule.weekdays().iter().map(|w| weekday_code(*w)).collect(),
            day_of_month: rule.day_of_month(),
            month_of_year: rule.month_of_year(),
            start_date: rule.start_date(),
            end_date: rule.end_date(),
            count: rule.count(),
        }
    }
}

/// Wire form of an event template; the timezone arrives as an IANA string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplateSpec {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub owner_id: String,
}

impl TryFrom<EventTemplateSpec> for EventTemplate {
    type Error = EngineError;

    fn try_from(spec: EventTemplateSpec) -> Result<EventTemplate> {
        let timezone = spec
            .timezone
            .parse()
            .map_err(|_| EngineError::InvalidTimezone(spec.timezone.clone()))?;
        Ok(EventTemplate {
            title: spec.title,
            description: spec.description,
            location: spec.location,
            start_time: spec.start_time,
            end_time: spec.end_time,
            timezone,
            color: spec.color,
            owner_id: spec.owner_id,
        })
    }
}

fn parse_weekday(code: &str) -> Result<Weekday> {
    match code {
        "MO" => Ok(Weekday::Mon),
        "TU" => Ok(Weekday::Tue),
        "WE" => Ok(Weekday::Wed),
        "TH" => Ok(Weekday::Thu),
        "FR" => Ok(Weekday::Fri),
        "SA" => Ok(Weekday::Sat),
        "SU" => Ok(Weekday::Sun),
        other => Err(EngineError::InvalidRule(format!(
            "unknown weekday code '{other}' (expected MO/TU/WE/TH/FR/SA/SU)"
        ))),
    }
}

fn weekday_code(weekday: Weekday) -> String {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
    .to_string()
}
