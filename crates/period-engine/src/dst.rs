//! DST transition policies for wall-clock calendar arithmetic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PeriodError;

/// Policy for local times that fall into a DST gap after a day, week, month
/// or year shift (e.g., 02:30 on a spring-forward night).
///
/// Ambiguous local times (fall back) always resolve to the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Move the result one hour forward, past the gap
    #[default]
    ShiftForward,
    /// Report the nonexistent local time as an error
    Reject,
}

impl fmt::Display for DstPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DstPolicy::ShiftForward => f.write_str("shift_forward"),
            DstPolicy::Reject => f.write_str("reject"),
        }
    }
}

impl FromStr for DstPolicy {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "shift_forward" => Ok(DstPolicy::ShiftForward),
            "reject" => Ok(DstPolicy::Reject),
            _ => Err(PeriodError::UnknownValue {
                kind: "DST policy",
                value: s.to_string(),
            }),
        }
    }
}
