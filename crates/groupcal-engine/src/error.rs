//! Error types for groupcal-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A recurrence rule violated a construction constraint. The message names
    /// the specific constraint; the rule is rejected before any expansion.
    #[error("invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Neither an end date / count on the rule nor a window end was supplied,
    /// so expansion would never terminate.
    #[error("unbounded expansion: rule has no end date or count and no window end was given")]
    UnboundedExpansion,

    /// An imported RFC 5545 rule string could not be parsed.
    #[error("invalid RRULE: {0}")]
    InvalidRrule(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
