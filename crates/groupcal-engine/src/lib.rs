//! # groupcal-engine
//!
//! Deterministic recurrence expansion and free/busy computation for shared
//! calendars.
//!
//! Everything here is a pure, synchronous computation over in-memory data:
//! given a validated recurrence rule and an event template, produce the
//! concrete occurrences inside a window; given users' busy intervals, compute
//! free time and intersect it across calendars. Persistence, notification
//! delivery and provider sync are collaborator concerns behind the [`ports`]
//! traits — the engine never blocks, never mutates shared state, and can be
//! called from any number of threads at once.
//!
//! ## Modules
//!
//! - [`rule`] — validated recurrence rules → lazy occurrence-date sequences
//! - [`event`] — event templates and materialized occurrences
//! - [`expander`] — rule + template → occurrences, with per-instance overrides
//! - [`interval`] — ordered non-overlapping interval sets (merge/intersect/subtract)
//! - [`freebusy`] — busy intervals → free time within a window
//! - [`availability`] — common free time across multiple users
//! - [`conflict`] — clash detection between proposed and existing events
//! - [`work_schedule`] — weekly work-hour patterns → available intervals
//! - [`rfc5545`] — expansion of RRULE strings on imported events
//! - [`wire`] — canonical camelCase wire types, validated at the boundary
//! - [`ports`] — persistence collaborator interfaces
//! - [`error`] — error types

pub mod availability;
pub mod conflict;
pub mod error;
pub mod event;
pub mod expander;
pub mod freebusy;
pub mod interval;
pub mod ports;
pub mod rfc5545;
pub mod rule;
pub mod wire;
pub mod work_schedule;

pub use availability::{common_free_time, find_common_slot, intersect_free, UserBusy};
pub use conflict::{find_conflicts, is_available, Conflict};
pub use error::{EngineError, Result};
pub use event::{EventTemplate, Occurrence};
pub use expander::{expand, expand_and_store, InstanceOverride, OverrideSet, RecurringSchedule};
pub use freebusy::{compute_free_busy, find_first_free_slot, BusyInterval, FreeBusy};
pub use interval::{Interval, IntervalSet};
pub use ports::{BusyIntervalSource, InMemoryStore, OccurrenceStore};
pub use rfc5545::expand_imported_rule;
pub use rule::{Frequency, OccurrenceDates, RecurrenceRule};
pub use wire::{EventTemplateSpec, RecurrenceRuleSpec};
pub use work_schedule::{available_intervals, common_working_time, WorkSchedule};
