//! Collaborator interfaces the engine is wired against.
//!
//! The engine never performs I/O: callers load busy intervals and persist
//! occurrences through these ports. `InMemoryStore` backs tests and the CLI.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Result;
use crate::event::Occurrence;
use crate::freebusy::BusyInterval;

/// Source of a user's busy intervals within a window.
pub trait BusyIntervalSource {
    fn load_busy_intervals(
        &self,
        owner_id: &str,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<BusyInterval>>;
}

/// Sink for materialized occurrences. Writes are keyed by
/// (rule id, occurrence date) and must be idempotent — expanding the same
/// rule twice over the same window may retry every write.
pub trait OccurrenceStore {
    fn save_occurrence(&mut self, occurrence: &Occurrence) -> Result<()>;
}

/// In-memory implementation of both ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    occurrences: HashMap<(String, NaiveDate), Occurrence>,
    busy: HashMap<String, Vec<BusyInterval>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_busy_interval(&mut self, interval: BusyInterval) {
        self.busy
            .entry(interval.owner_id.clone())
            .or_default()
            .push(interval);
    }

    pub fn occurrence_count(&self) -> usize {
        self.occurrences.len()
    }

    pub fn occurrences(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.values()
    }
}

impl OccurrenceStore for InMemoryStore {
    fn save_occurrence(&mut self, occurrence: &Occurrence) -> Result<()> {
        self.occurrences.insert(
            (occurrence.rule_id.clone(), occurrence.occurrence_date),
            occurrence.clone(),
        );
        Ok(())
    }
}

impl BusyIntervalSource for InMemoryStore {
    fn load_busy_intervals(
        &self,
        owner_id: &str,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<BusyInterval>> {
        Ok(self
            .busy
            .get(owner_id)
            .map(|intervals| {
                intervals
                    .iter()
                    .filter(|b| b.start < window_end && b.end > window_start)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
