use thiserror::Error;

/// Errors produced while parsing or transitioning a time record.
///
/// Every variant is a user-input or user-state error, never an internal
/// failure: parsing and transitions fail fast and return the first error
/// encountered instead of building a partially-valid record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeRecordError {
    #[error("Invalid timestamp format: '{text}'")]
    MalformedTimestamp { text: String },

    #[error("Invalid time slot: '{token}'")]
    MalformedIntervalToken { token: String },

    #[error("Invalid goal duration: '{text}'")]
    MalformedGoal { text: String },

    #[error("Open time slot '{token}' must be the last entry")]
    PendingNotLast { token: String },

    #[error("End time {end} is before start time {start}")]
    IntervalInversion { start: String, end: String },

    #[error("Already clocked in")]
    AlreadyClockedIn,

    #[error("Not clocked in")]
    NotClockedIn,

    #[error("No time-recorder directive found in block")]
    NoDirectiveFound,

    #[error("There must be exactly one time-recorder directive per block")]
    MultipleDirectivesFound,
}

pub type Result<T> = std::result::Result<T, TimeRecordError>;
