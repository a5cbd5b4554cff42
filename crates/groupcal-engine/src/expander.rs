//! Expansion of recurring schedules into concrete occurrences.
//!
//! Combines a validated rule with an event template to materialize instances
//! inside a query window, honoring per-instance overrides (cancellations and
//! detached reschedules) without touching the rule itself.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::Result;
use crate::event::{instants_on, EventTemplate, Occurrence};
use crate::ports::OccurrenceStore;
use crate::rule::RecurrenceRule;

/// A recurring series: identifier, recurrence definition, event shape.
#[derive(Debug, Clone)]
pub struct RecurringSchedule {
    pub id: String,
    pub rule: RecurrenceRule,
    pub template: EventTemplate,
}

/// A per-instance exception, keyed by occurrence date.
#[derive(Debug, Clone)]
pub enum InstanceOverride {
    /// The instance on this date was cancelled.
    Cancelled,
    /// The instance was detached and rescheduled; this record replaces the
    /// generated one.
    Replaced(Occurrence),
}

/// Exceptions applied during expansion. Overriding an instance never alters
/// the underlying rule — future expansions consult this set instead.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    entries: HashMap<NaiveDate, InstanceOverride>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&mut self, date: NaiveDate) {
        self.entries.insert(date, InstanceOverride::Cancelled);
    }

    /// Register a detached occurrence as the replacement for its date.
    pub fn replace(&mut self, occurrence: Occurrence) {
        self.entries.insert(
            occurrence.occurrence_date,
            InstanceOverride::Replaced(occurrence),
        );
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&InstanceOverride> {
        self.entries.get(date)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Expand a schedule into occurrences within `[window_start, window_end]`
/// (dates inclusive), ordered by start instant.
///
/// For each occurrence date the template's times of day are resolved in the
/// template's timezone. Dates present in `overrides` either drop out
/// (cancelled) or contribute their detached record instead of a generated
/// instance.
///
/// Expansion is pure — persistence, if any, is the caller's job (see
/// [`expand_and_store`]).
pub fn expand(
    schedule: &RecurringSchedule,
    window_start: NaiveDate,
    window_end: NaiveDate,
    overrides: &OverrideSet,
) -> Result<Vec<Occurrence>> {
    let dates = schedule
        .rule
        .occurrence_dates(window_start, Some(window_end))?;

    let mut occurrences = Vec::new();
    for date in dates {
        match overrides.get(&date) {
            Some(InstanceOverride::Cancelled) => continue,
            Some(InstanceOverride::Replaced(detached)) => {
                occurrences.push(detached.clone());
            }
            None => {
                let (start, end) = instants_on(&schedule.template, date);
                occurrences.push(Occurrence {
                    rule_id: schedule.id.clone(),
                    owner_id: schedule.template.owner_id.clone(),
                    title: schedule.template.title.clone(),
                    description: schedule.template.description.clone(),
                    location: schedule.template.location.clone(),
                    color: schedule.template.color.clone(),
                    occurrence_date: date,
                    start,
                    end,
                    detached: false,
                });
            }
        }
    }

    // Replacements may have moved off their original time slot.
    occurrences.sort_by_key(|occ| (occ.start, occ.end));
    Ok(occurrences)
}

/// Expand and persist each occurrence through the given store. The write is
/// once per occurrence and keyed by (rule id, occurrence date), so retries
/// are idempotent.
pub fn expand_and_store(
    schedule: &RecurringSchedule,
    window_start: NaiveDate,
    window_end: NaiveDate,
    overrides: &OverrideSet,
    store: &mut dyn OccurrenceStore,
) -> Result<Vec<Occurrence>> {
    let occurrences = expand(schedule, window_start, window_end, overrides)?;
    for occurrence in &occurrences {
        store.save_occurrence(occurrence)?;
    }
    Ok(occurrences)
}
