//! Unit and classification enums shared by periods, groups and calendars.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PeriodError;

/// Calendar unit used to size, shift and measure periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriodSize {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimePeriodSize {
    pub const ALL: [TimePeriodSize; 7] = [
        TimePeriodSize::Second,
        TimePeriodSize::Minute,
        TimePeriodSize::Hour,
        TimePeriodSize::Day,
        TimePeriodSize::Week,
        TimePeriodSize::Month,
        TimePeriodSize::Year,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimePeriodSize::Second => "second",
            TimePeriodSize::Minute => "minute",
            TimePeriodSize::Hour => "hour",
            TimePeriodSize::Day => "day",
            TimePeriodSize::Week => "week",
            TimePeriodSize::Month => "month",
            TimePeriodSize::Year => "year",
        }
    }
}

impl fmt::Display for TimePeriodSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriodSize {
    type Err = PeriodError;

    /// Accepts singular or plural unit names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        TimePeriodSize::ALL
            .into_iter()
            .find(|size| size.as_str() == singular)
            .ok_or_else(|| PeriodError::UnknownValue {
                kind: "unit",
                value: s.to_string(),
            })
    }
}

/// Direction of a calendar shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftOperation {
    Adding,
    Subtracting,
}

/// How one period relates to a reference period.
///
/// Variants read from the point of view of the candidate period: `After`
/// means the candidate lies entirely before the reference, so the reference
/// comes after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriodRelation {
    After,
    StartTouching,
    StartInside,
    InsideStartTouching,
    EnclosingStartTouching,
    Enclosing,
    EnclosingEndTouching,
    ExactMatch,
    Inside,
    InsideEndTouching,
    EndInside,
    EndTouching,
    Before,
    /// One of the periods is a moment or inverted.
    None,
}

impl TimePeriodRelation {
    pub fn as_str(self) -> &'static str {
        match self {
            TimePeriodRelation::After => "after",
            TimePeriodRelation::StartTouching => "start_touching",
            TimePeriodRelation::StartInside => "start_inside",
            TimePeriodRelation::InsideStartTouching => "inside_start_touching",
            TimePeriodRelation::EnclosingStartTouching => "enclosing_start_touching",
            TimePeriodRelation::Enclosing => "enclosing",
            TimePeriodRelation::EnclosingEndTouching => "enclosing_end_touching",
            TimePeriodRelation::ExactMatch => "exact_match",
            TimePeriodRelation::Inside => "inside",
            TimePeriodRelation::InsideEndTouching => "inside_end_touching",
            TimePeriodRelation::EndInside => "end_inside",
            TimePeriodRelation::EndTouching => "end_touching",
            TimePeriodRelation::Before => "before",
            TimePeriodRelation::None => "none",
        }
    }
}

impl fmt::Display for TimePeriodRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether boundary instants count as contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriodInterval {
    Open,
    #[default]
    Closed,
}

/// The boundary held fixed while lengthening or shortening a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriodAnchor {
    #[default]
    Start,
    Center,
    End,
}

