//! Error types for period-engine operations.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use thiserror::Error;

use crate::units::TimePeriodSize;
use crate::Instant;

#[derive(Error, Debug)]
pub enum PeriodError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Calendar arithmetic left the representable range.
    #[error("Date arithmetic out of range: {amount} {size} from {instant}")]
    OutOfRange {
        instant: Instant,
        amount: i64,
        size: TimePeriodSize,
    },

    /// The local wall-clock time falls into a DST gap and the policy rejects it.
    #[error("Nonexistent local time: {0}")]
    NonexistentLocalTime(NaiveDateTime),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The instant has no representable wall-clock time in the timezone.
    #[error("Local time of {instant} in {timezone} is out of range")]
    LocalTimeOutOfRange { instant: Instant, timezone: Tz },

    /// A string did not name a known unit, format or policy.
    #[error("Unknown {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, PeriodError>;
