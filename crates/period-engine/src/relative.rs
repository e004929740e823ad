//! Relative-time descriptions ("3 hours ago", "Last week", "2d").
//!
//! Below 24 elapsed hours the exact elapsed time is used. Beyond that both
//! instants are truncated to local midnight in the calendar's timezone and
//! compared as calendar dates, so "Yesterday" means the previous local day.
//! Output is English only.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{whole_months, GregorianCalendar};
use crate::error::PeriodError;
use crate::Instant;

/// Rendering style for [`time_ago`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateAgoFormat {
    #[default]
    Long,
    LongNumericDatesAndTimes,
    LongNumericDates,
    LongNumericTimes,
    Short,
    /// Like `Long`, but distances of two to seven days name the weekday.
    Week,
}

impl DateAgoFormat {
    fn numeric_dates(self) -> bool {
        matches!(
            self,
            DateAgoFormat::LongNumericDates | DateAgoFormat::LongNumericDatesAndTimes
        )
    }

    fn numeric_times(self) -> bool {
        matches!(
            self,
            DateAgoFormat::LongNumericTimes | DateAgoFormat::LongNumericDatesAndTimes
        )
    }
}

impl FromStr for DateAgoFormat {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "long" => Ok(DateAgoFormat::Long),
            "long_numeric_dates_and_times" => Ok(DateAgoFormat::LongNumericDatesAndTimes),
            "long_numeric_dates" => Ok(DateAgoFormat::LongNumericDates),
            "long_numeric_times" => Ok(DateAgoFormat::LongNumericTimes),
            "short" => Ok(DateAgoFormat::Short),
            "week" => Ok(DateAgoFormat::Week),
            _ => Err(PeriodError::UnknownValue {
                kind: "format",
                value: s.to_string(),
            }),
        }
    }
}

/// The unit a relative time is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateAgoUnit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

/// Distance between two instants in its largest non-zero unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeTime {
    pub unit: DateAgoUnit,
    pub value: i64,
}

impl RelativeTime {
    /// Distance between `date` and `since`, regardless of which comes first.
    pub fn between(calendar: &GregorianCalendar, date: Instant, since: Instant) -> Self {
        let (earliest, latest) = if date <= since {
            (date, since)
        } else {
            (since, date)
        };

        let elapsed = latest - earliest;
        if elapsed.num_hours() < 24 {
            let (unit, value) = if elapsed.num_hours() >= 1 {
                (DateAgoUnit::Hours, elapsed.num_hours())
            } else if elapsed.num_minutes() >= 1 {
                (DateAgoUnit::Minutes, elapsed.num_minutes())
            } else {
                (DateAgoUnit::Seconds, elapsed.num_seconds())
            };
            return Self { unit, value };
        }

        let earliest = midnight(calendar.wall_clock(earliest));
        let latest = midnight(calendar.wall_clock(latest));
        let months = whole_months(earliest, latest);
        let days = (latest - earliest).num_days();

        let (unit, value) = if months >= 12 {
            (DateAgoUnit::Years, months / 12)
        } else if months >= 1 {
            (DateAgoUnit::Months, months)
        } else if days >= 7 {
            (DateAgoUnit::Weeks, days / 7)
        } else {
            (DateAgoUnit::Days, days)
        };
        Self { unit, value }
    }

    fn short_suffix(self) -> &'static str {
        match self.unit {
            DateAgoUnit::Years => "y",
            DateAgoUnit::Months => "M",
            DateAgoUnit::Weeks => "w",
            DateAgoUnit::Days => "d",
            DateAgoUnit::Hours => "h",
            DateAgoUnit::Minutes => "m",
            DateAgoUnit::Seconds => "s",
        }
    }

    fn plural_noun(self) -> &'static str {
        match self.unit {
            DateAgoUnit::Years => "years",
            DateAgoUnit::Months => "months",
            DateAgoUnit::Weeks => "weeks",
            DateAgoUnit::Days => "days",
            DateAgoUnit::Hours => "hours",
            DateAgoUnit::Minutes => "minutes",
            DateAgoUnit::Seconds => "seconds",
        }
    }

    /// Text for a value below two: (numeric form, idiomatic form).
    fn singular_phrases(self) -> (&'static str, &'static str) {
        match self.unit {
            DateAgoUnit::Years => ("1 year ago", "Last year"),
            DateAgoUnit::Months => ("1 month ago", "Last month"),
            DateAgoUnit::Weeks => ("1 week ago", "Last week"),
            DateAgoUnit::Days => ("1 day ago", "Yesterday"),
            DateAgoUnit::Hours => ("1 hour ago", "An hour ago"),
            DateAgoUnit::Minutes => ("1 minute ago", "A minute ago"),
            DateAgoUnit::Seconds => ("1 second ago", "Just now"),
        }
    }

    fn is_date_unit(self) -> bool {
        matches!(
            self.unit,
            DateAgoUnit::Years | DateAgoUnit::Months | DateAgoUnit::Weeks | DateAgoUnit::Days
        )
    }

    /// Render in `format`. `weekday` is the abbreviated weekday used by the
    /// `Week` format for distances of two to seven days.
    fn render(self, format: DateAgoFormat, weekday: impl FnOnce() -> String) -> String {
        if format == DateAgoFormat::Short {
            return format!("{}{}", self.value, self.short_suffix());
        }
        if self.value >= 2 {
            if format == DateAgoFormat::Week && self.unit == DateAgoUnit::Days && self.value <= 7 {
                return weekday();
            }
            return format!("{} {} ago", self.value, self.plural_noun());
        }
        let numeric = if self.is_date_unit() {
            format.numeric_dates()
        } else {
            format.numeric_times()
        };
        let (numeric_phrase, idiomatic_phrase) = self.singular_phrases();
        if numeric {
            numeric_phrase.to_string()
        } else {
            idiomatic_phrase.to_string()
        }
    }
}

impl fmt::Display for RelativeTime {
    /// Long format without weekday names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DateAgoFormat::Long, String::new))
    }
}

/// Describe how long ago `date` was relative to `since`.
pub fn time_ago(
    calendar: &GregorianCalendar,
    date: Instant,
    since: Instant,
    format: DateAgoFormat,
) -> String {
    RelativeTime::between(calendar, date, since)
        .render(format, || calendar.wall_clock(date).format("%a").to_string())
}

/// Describe how long ago `date` was relative to the current time.
pub fn time_ago_since_now(
    calendar: &GregorianCalendar,
    date: Instant,
    format: DateAgoFormat,
) -> String {
    time_ago(calendar, date, Utc::now(), format)
}

fn midnight(local: NaiveDateTime) -> NaiveDateTime {
    local.date().and_time(NaiveTime::MIN)
}
