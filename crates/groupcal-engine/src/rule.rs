//! Typed recurrence rules and their occurrence-date sequences.
//!
//! A [`RecurrenceRule`] replaces the free-form JSON recurrence blobs that
//! calendar backends tend to accumulate: every frequency-specific requirement
//! is checked once, at construction, and the rest of the engine only ever sees
//! well-formed rules. Expansion is a lazy iterator over `NaiveDate` — a pure
//! function of rule + window, so repeated calls yield identical sequences.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// How often a rule repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Frequency-specific data. Invalid combinations (a weekly rule without
/// weekdays, a yearly rule without a month) are unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Daily,
    /// Weekdays sorted Monday-first, deduplicated.
    Weekly { weekdays: Vec<Weekday> },
    Monthly { day: u32 },
    Yearly { month: u32, day: u32 },
}

/// A validated recurrence definition.
///
/// Termination is bounded by `end_date`, `count`, or the window supplied to
/// [`occurrence_dates`](RecurrenceRule::occurrence_dates) — a rule carrying
/// none of these can only be expanded against a window with an end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pattern: Pattern,
    interval: u32,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    count: Option<u32>,
}

impl RecurrenceRule {
    /// Every `interval` days, starting at `start_date`.
    pub fn daily(start_date: NaiveDate, interval: u32) -> Result<Self> {
        Self::build(Pattern::Daily, interval, start_date)
    }

    /// Every `interval`-th week, on each of the given weekdays.
    pub fn weekly(start_date: NaiveDate, interval: u32, weekdays: &[Weekday]) -> Result<Self> {
        if weekdays.is_empty() {
            return Err(EngineError::InvalidRule(
                "WEEKLY rules require at least one weekday".to_string(),
            ));
        }
        let mut weekdays = weekdays.to_vec();
        weekdays.sort_by_key(|w| w.num_days_from_monday());
        weekdays.dedup();
        Self::build(Pattern::Weekly { weekdays }, interval, start_date)
    }

    /// Every `interval` months, on the given day of the month. Months in which
    /// the day does not exist (day 31 in February) are skipped, never clamped.
    pub fn monthly(start_date: NaiveDate, interval: u32, day_of_month: u32) -> Result<Self> {
        Self::check_day_of_month(day_of_month)?;
        Self::build(Pattern::Monthly { day: day_of_month }, interval, start_date)
    }

    /// Every `interval` years, on the given month and day (Feb 29 occurs only
    /// in leap years).
    pub fn yearly(
        start_date: NaiveDate,
        interval: u32,
        month_of_year: u32,
        day_of_month: u32,
    ) -> Result<Self> {
        Self::check_day_of_month(day_of_month)?;
        if !(1..=12).contains(&month_of_year) {
            return Err(EngineError::InvalidRule(format!(
                "month of year must be within 1-12, got {month_of_year}"
            )));
        }
        // Reject combinations that exist in no year at all (e.g. April 31).
        // The reference year is a leap year, so Feb 29 stays valid.
        if NaiveDate::from_ymd_opt(2000, month_of_year, day_of_month).is_none() {
            return Err(EngineError::InvalidRule(format!(
                "day {day_of_month} does not exist in month {month_of_year}"
            )));
        }
        Self::build(
            Pattern::Yearly {
                month: month_of_year,
                day: day_of_month,
            },
            interval,
            start_date,
        )
    }

    fn build(pattern: Pattern, interval: u32, start_date: NaiveDate) -> Result<Self> {
        if interval < 1 {
            return Err(EngineError::InvalidRule(
                "interval must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            pattern,
            interval,
            start_date,
            end_date: None,
            count: None,
        })
    }

    fn check_day_of_month(day: u32) -> Result<()> {
        if (1..=31).contains(&day) {
            Ok(())
        } else {
            Err(EngineError::InvalidRule(format!(
                "day of month must be within 1-31, got {day}"
            )))
        }
    }

    /// Bound the series by a final date (inclusive).
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Result<Self> {
        if self.start_date > end_date {
            return Err(EngineError::InvalidRule(format!(
                "start date {} is after end date {}",
                self.start_date, end_date
            )));
        }
        self.end_date = Some(end_date);
        Ok(self)
    }

    /// Bound the series by a maximum number of occurrences, counted from
    /// `start_date` regardless of any query window.
    pub fn with_count(mut self, count: u32) -> Result<Self> {
        if count == 0 {
            return Err(EngineError::InvalidRule(
                "count must be at least 1".to_string(),
            ));
        }
        self.count = Some(count);
        Ok(self)
    }

    pub fn frequency(&self) -> Frequency {
        match self.pattern {
            Pattern::Daily => Frequency::Daily,
            Pattern::Weekly { .. } => Frequency::Weekly,
            Pattern::Monthly { .. } => Frequency::Monthly,
            Pattern::Yearly { .. } => Frequency::Yearly,
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn weekdays(&self) -> &[Weekday] {
        match &self.pattern {
            Pattern::Weekly { weekdays } => weekdays,
            _ => &[],
        }
    }

    pub fn day_of_month(&self) -> Option<u32> {
        match self.pattern {
            Pattern::Monthly { day } | Pattern::Yearly { day, .. } => Some(day),
            _ => None,
        }
    }

    pub fn month_of_year(&self) -> Option<u32> {
        match self.pattern {
            Pattern::Yearly { month, .. } => Some(month),
            _ => None,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn count(&self) -> Option<u32> {
        self.count
    }

    /// Whether the rule terminates on its own, without an external window.
    pub fn is_bounded(&self) -> bool {
        self.end_date.is_some() || self.count.is_some()
    }

    /// Lazy sequence of occurrence dates within `[window_start, window_end]`
    /// (both inclusive). Occurrences before `window_start` still consume the
    /// `count` budget — the series is anchored at `start_date`, not at the
    /// window.
    ///
    /// # Errors
    ///
    /// `EngineError::UnboundedExpansion` when `window_end` is `None` and the
    /// rule has neither an end date nor a count.
    pub fn occurrence_dates(
        &self,
        window_start: NaiveDate,
        window_end: Option<NaiveDate>,
    ) -> Result<OccurrenceDates<'_>> {
        if window_end.is_none() && !self.is_bounded() {
            return Err(EngineError::UnboundedExpansion);
        }
        let limit = match (self.end_date, window_end) {
            (Some(e), Some(w)) => Some(e.min(w)),
            (Some(e), None) => Some(e),
            (None, Some(w)) => Some(w),
            (None, None) => None,
        };
        Ok(OccurrenceDates::new(self, window_start, limit))
    }
}

/// Per-frequency iteration state. Candidates are strictly increasing, so a
/// single candidate past the limit finishes the whole sequence.
#[derive(Debug, Clone, Copy)]
enum Cursor {
    Daily { next: NaiveDate },
    Weekly { week_start: NaiveDate, slot: usize },
    Monthly { step: i64, day: u32 },
    Yearly { step: i64, month: u32, day: u32 },
    Done,
}

/// Iterator returned by [`RecurrenceRule::occurrence_dates`].
#[derive(Debug, Clone)]
pub struct OccurrenceDates<'r> {
    rule: &'r RecurrenceRule,
    window_start: NaiveDate,
    /// Inclusive upper bound: min(rule end date, window end). `None` only for
    /// count-bounded rules expanded without a window end.
    limit: Option<NaiveDate>,
    remaining: Option<u32>,
    /// Weekday offsets from Monday, ascending (weekly rules only).
    offsets: Vec<i64>,
    cursor: Cursor,
}

impl<'r> OccurrenceDates<'r> {
    fn new(rule: &'r RecurrenceRule, window_start: NaiveDate, limit: Option<NaiveDate>) -> Self {
        let mut offsets = Vec::new();
        let cursor = match &rule.pattern {
            Pattern::Daily => Cursor::Daily {
                next: rule.start_date,
            },
            Pattern::Weekly { weekdays } => {
                offsets = weekdays
                    .iter()
                    .map(|w| w.num_days_from_monday() as i64)
                    .collect();
                // Weeks run Monday-to-Sunday; the anchor is the Monday of the
                // week containing start_date.
                let back = rule.start_date.weekday().num_days_from_monday() as i64;
                match rule.start_date.checked_sub_signed(Duration::days(back)) {
                    Some(week_start) => Cursor::Weekly {
                        week_start,
                        slot: 0,
                    },
                    None => Cursor::Done,
                }
            }
            Pattern::Monthly { day } => Cursor::Monthly { step: 0, day: *day },
            Pattern::Yearly { month, day } => Cursor::Yearly {
                step: 0,
                month: *month,
                day: *day,
            },
        };
        OccurrenceDates {
            rule,
            window_start,
            limit,
            remaining: rule.count,
            offsets,
            cursor,
        }
    }

    /// Next date of the series (>= start_date), ignoring window and count.
    fn next_candidate(&mut self) -> Option<NaiveDate> {
        let interval = i64::from(self.rule.interval);
        loop {
            match self.cursor {
                Cursor::Done => return None,
                Cursor::Daily { next } => {
                    match next.checked_add_signed(Duration::days(interval)) {
                        Some(n) => self.cursor = Cursor::Daily { next: n },
                        None => self.cursor = Cursor::Done,
                    }
                    return Some(next);
                }
                Cursor::Weekly { week_start, slot } => {
                    if slot >= self.offsets.len() {
                        match week_start.checked_add_signed(Duration::days(7 * interval)) {
                            Some(ws) => {
                                self.cursor = Cursor::Weekly {
                                    week_start: ws,
                                    slot: 0,
                                };
                                continue;
                            }
                            None => {
                                self.cursor = Cursor::Done;
                                return None;
                            }
                        }
                    }
                    self.cursor = Cursor::Weekly {
                        week_start,
                        slot: slot + 1,
                    };
                    let date = match week_start.checked_add_signed(Duration::days(self.offsets[slot]))
                    {
                        Some(d) => d,
                        None => {
                            self.cursor = Cursor::Done;
                            return None;
                        }
                    };
                    // The anchor week may begin before the rule does.
                    if date < self.rule.start_date {
                        continue;
                    }
                    return Some(date);
                }
                Cursor::Monthly { step, day } => {
                    self.cursor = Cursor::Monthly { step: step + 1, day };
                    let (year, month) = match add_months(
                        self.rule.start_date.year(),
                        self.rule.start_date.month(),
                        step * interval,
                    ) {
                        Some(ym) => ym,
                        None => {
                            self.cursor = Cursor::Done;
                            return None;
                        }
                    };
                    match NaiveDate::from_ymd_opt(year, month, day) {
                        // The day exists in this month and falls inside the series.
                        Some(d) if d >= self.rule.start_date => return Some(d),
                        // Exists but precedes the series start.
                        Some(_) => continue,
                        None => {
                            // Day missing (e.g. Feb 31) skips the month; an
                            // invalid month start means the supported date
                            // range is exhausted.
                            if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
                                self.cursor = Cursor::Done;
                                return None;
                            }
                            continue;
                        }
                    }
                }
                Cursor::Yearly { step, month, day } => {
                    self.cursor = Cursor::Yearly {
                        step: step + 1,
                        month,
                        day,
                    };
                    let year = i64::from(self.rule.start_date.year()) + step * interval;
                    let year = match i32::try_from(year) {
                        Ok(y) => y,
                        Err(_) => {
                            self.cursor = Cursor::Done;
                            return None;
                        }
                    };
                    match NaiveDate::from_ymd_opt(year, month, day) {
                        Some(d) if d >= self.rule.start_date => return Some(d),
                        Some(_) => continue,
                        None => {
                            // Feb 29 in a non-leap year skips the year; an
                            // invalid month start means the date range ended.
                            if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
                                self.cursor = Cursor::Done;
                                return None;
                            }
                            continue;
                        }
                    }
                }
            }
        }
    }
}

impl Iterator for OccurrenceDates<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        loop {
            if self.remaining == Some(0) {
                self.cursor = Cursor::Done;
                return None;
            }
            let candidate = self.next_candidate()?;
            if self.limit.is_some_and(|limit| candidate > limit) {
                self.cursor = Cursor::Done;
                return None;
            }
            if let Some(rem) = self.remaining.as_mut() {
                *rem -= 1;
            }
            if candidate >= self.window_start {
                return Some(candidate);
            }
        }
    }
}

/// Calendar-month addition: (year, month) + delta months.
fn add_months(year: i32, month: u32, delta: i64) -> Option<(i32, u32)> {
    let total = i64::from(year) * 12 + i64::from(month) - 1 + delta;
    let y = i32::try_from(total.div_euclid(12)).ok()?;
    let m = (total.rem_euclid(12) + 1) as u32;
    Some((y, m))
}
