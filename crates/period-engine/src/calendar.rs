//! Calendar collaborator -- turns "N units of size S" into instant deltas.
//!
//! Periods never do date math themselves. They ask a [`CalendarShift`] to move
//! an instant by a number of units, or to count whole units between two
//! instants. [`GregorianCalendar`] is the `chrono` + `chrono-tz` implementation:
//! seconds, minutes and hours are elapsed time, while days, weeks, months and
//! years follow the wall clock of the configured timezone.

use std::fmt;
use std::sync::Arc;

use chrono::offset::LocalResult;
use chrono::{
    Datelike, Duration, Months, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::dst::DstPolicy;
use crate::error::{PeriodError, Result};
use crate::units::{ShiftOperation, TimePeriodSize};
use crate::Instant;

/// Unit arithmetic consumed by periods, chains and collections.
pub trait CalendarShift: fmt::Debug + Send + Sync {
    /// Move `instant` by `amount` units of `size` in the given direction.
    fn shift(
        &self,
        instant: Instant,
        amount: i64,
        size: TimePeriodSize,
        operation: ShiftOperation,
    ) -> Result<Instant>;

    /// Whole units of `size` from `earlier` to `later`; 0 when `later <= earlier`.
    fn distance(&self, earlier: Instant, later: Instant, size: TimePeriodSize) -> i64;

    fn adding(&self, instant: Instant, amount: i64, size: TimePeriodSize) -> Result<Instant> {
        self.shift(instant, amount, size, ShiftOperation::Adding)
    }

    fn subtracting(&self, instant: Instant, amount: i64, size: TimePeriodSize) -> Result<Instant> {
        self.shift(instant, amount, size, ShiftOperation::Subtracting)
    }
}

/// A calendar shared read-only by every period built from it.
pub type SharedCalendar = Arc<dyn CalendarShift>;

/// Serializable calendar settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// IANA timezone used for wall-clock units (e.g., "Europe/Berlin").
    pub timezone: String,
    pub dst_policy: DstPolicy,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            dst_policy: DstPolicy::default(),
        }
    }
}

/// Proleptic Gregorian calendar evaluated in a single IANA timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GregorianCalendar {
    timezone: Tz,
    dst_policy: DstPolicy,
}

impl Default for GregorianCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl GregorianCalendar {
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            dst_policy: DstPolicy::default(),
        }
    }

    pub fn utc() -> Self {
        Self::new(Tz::UTC)
    }

    pub fn with_dst_policy(mut self, dst_policy: DstPolicy) -> Self {
        self.dst_policy = dst_policy;
        self
    }

    /// Build a calendar from settings.
    ///
    /// # Errors
    /// Returns `PeriodError::InvalidTimezone` if the timezone is not a valid IANA identifier.
    pub fn from_config(config: &CalendarConfig) -> Result<Self> {
        let timezone: Tz = config
            .timezone
            .parse()
            .map_err(|_| PeriodError::InvalidTimezone(config.timezone.clone()))?;
        Ok(Self::new(timezone).with_dst_policy(config.dst_policy))
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn dst_policy(&self) -> DstPolicy {
        self.dst_policy
    }

    pub fn shared(self) -> SharedCalendar {
        Arc::new(self)
    }

    /// Wall-clock time of `instant` in this calendar's timezone.
    ///
    /// # Errors
    /// Returns `PeriodError::LocalTimeOutOfRange` when the zone offset pushes
    /// the wall-clock time past the representable range, as it does for
    /// `DateTime::<Utc>::MIN_UTC` west of Greenwich.
    pub fn local(&self, instant: Instant) -> Result<NaiveDateTime> {
        let utc = instant.naive_utc();
        let offset = self.timezone.offset_from_utc_datetime(&utc).fix();
        utc.checked_add_offset(offset)
            .ok_or(PeriodError::LocalTimeOutOfRange {
                instant,
                timezone: self.timezone,
            })
    }

    /// Wall-clock time for counting; instants without one are read in UTC.
    pub(crate) fn wall_clock(&self, instant: Instant) -> NaiveDateTime {
        self.local(instant).unwrap_or_else(|_| instant.naive_utc())
    }

    /// Instant for the given local date and time.
    ///
    /// # Errors
    /// Returns `PeriodError::InvalidDate` for impossible components and
    /// `PeriodError::NonexistentLocalTime` when the DST policy rejects a gap.
    pub fn date(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Instant> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(|| {
                PeriodError::InvalidDate(format!(
                    "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                    year, month, day, hour, minute, second
                ))
            })?;
        self.resolve(naive)
    }

    pub fn is_leap_year(year: i32) -> bool {
        (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
    }

    // -- Components ---------------------------------------------------------
    //
    // All components and predicates read the wall clock of this calendar's
    // timezone and fail only when `local` does.

    pub fn year(&self, instant: Instant) -> Result<i32> {
        Ok(self.local(instant)?.year())
    }

    /// Month of the year, 1-12.
    pub fn month(&self, instant: Instant) -> Result<u32> {
        Ok(self.local(instant)?.month())
    }

    /// Day of the month, 1-31.
    pub fn day(&self, instant: Instant) -> Result<u32> {
        Ok(self.local(instant)?.day())
    }

    pub fn weekday(&self, instant: Instant) -> Result<Weekday> {
        Ok(self.local(instant)?.weekday())
    }

    /// Quarter of the year, 1-4.
    pub fn quarter(&self, instant: Instant) -> Result<u32> {
        Ok((self.month(instant)? - 1) / 3 + 1)
    }

    /// Day of the year, 1-366.
    pub fn day_of_year(&self, instant: Instant) -> Result<u32> {
        Ok(self.local(instant)?.ordinal())
    }

    /// ISO 8601 week number: weeks start on Monday and week 1 holds the
    /// year's first Thursday.
    pub fn week_of_year(&self, instant: Instant) -> Result<u32> {
        Ok(self.local(instant)?.iso_week().week())
    }

    /// Week of the month, 1-based, with weeks starting on Monday. The days
    /// before the month's first Monday form week 1.
    pub fn week_of_month(&self, instant: Instant) -> Result<u32> {
        let date = self.local(instant)?.date();
        let offset = date.day0() % 7;
        let first_weekday = (date.weekday().num_days_from_monday() + 7 - offset) % 7;
        Ok((date.day0() + first_weekday) / 7 + 1)
    }

    pub fn days_in_month(&self, instant: Instant) -> Result<u32> {
        let date = self.local(instant)?.date();
        Ok(month_length(date.year(), date.month()))
    }

    pub fn days_in_year(&self, instant: Instant) -> Result<u32> {
        Ok(if self.is_in_leap_year(instant)? { 366 } else { 365 })
    }

    pub fn is_in_leap_year(&self, instant: Instant) -> Result<bool> {
        Ok(Self::is_leap_year(self.year(instant)?))
    }

    /// Saturday or Sunday.
    pub fn is_weekend(&self, instant: Instant) -> Result<bool> {
        Ok(matches!(self.weekday(instant)?, Weekday::Sat | Weekday::Sun))
    }

    /// Both instants fall on the same local calendar date.
    pub fn is_same_day(&self, instant: Instant, other: Instant) -> Result<bool> {
        Ok(self.local(instant)?.date() == self.local(other)?.date())
    }

    pub fn is_today(&self, instant: Instant) -> Result<bool> {
        self.is_same_day(instant, Utc::now())
    }

    pub fn is_tomorrow(&self, instant: Instant) -> Result<bool> {
        let tomorrow = self.adding(Utc::now(), 1, TimePeriodSize::Day)?;
        self.is_same_day(instant, tomorrow)
    }

    pub fn is_yesterday(&self, instant: Instant) -> Result<bool> {
        let yesterday = self.subtracting(Utc::now(), 1, TimePeriodSize::Day)?;
        self.is_same_day(instant, yesterday)
    }

    /// Map a wall-clock time back to an instant according to the DST policy.
    fn resolve(&self, naive: NaiveDateTime) -> Result<Instant> {
        match self.timezone.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => {
                trace!(%naive, tz = %self.timezone, "ambiguous local time, taking earlier offset");
                Ok(earliest.with_timezone(&Utc))
            }
            LocalResult::None => match self.dst_policy {
                DstPolicy::Reject => Err(PeriodError::NonexistentLocalTime(naive)),
                DstPolicy::ShiftForward => {
                    trace!(%naive, tz = %self.timezone, "local time in DST gap, shifting forward");
                    naive
                        .checked_add_signed(Duration::hours(1))
                        .and_then(|shifted| self.timezone.from_local_datetime(&shifted).earliest())
                        .map(|dt| dt.with_timezone(&Utc))
                        .ok_or(PeriodError::NonexistentLocalTime(naive))
                }
            },
        }
    }

    fn whole_days(&self, earlier: Instant, later: Instant) -> i64 {
        (self.wall_clock(later) - self.wall_clock(earlier)).num_days().max(0)
    }
}

impl CalendarShift for GregorianCalendar {
    fn shift(
        &self,
        instant: Instant,
        amount: i64,
        size: TimePeriodSize,
        operation: ShiftOperation,
    ) -> Result<Instant> {
        let out_of_range = || PeriodError::OutOfRange {
            instant,
            amount,
            size,
        };
        let signed = match operation {
            ShiftOperation::Adding => Some(amount),
            ShiftOperation::Subtracting => amount.checked_neg(),
        }
        .ok_or_else(out_of_range)?;

        match size {
            TimePeriodSize::Second | TimePeriodSize::Minute | TimePeriodSize::Hour => {
                let factor = match size {
                    TimePeriodSize::Second => 1,
                    TimePeriodSize::Minute => 60,
                    _ => 3600,
                };
                signed
                    .checked_mul(factor)
                    .and_then(Duration::try_seconds)
                    .and_then(|delta| instant.checked_add_signed(delta))
                    .ok_or_else(out_of_range)
            }
            TimePeriodSize::Day | TimePeriodSize::Week => {
                let days = if size == TimePeriodSize::Week {
                    signed.checked_mul(7)
                } else {
                    Some(signed)
                };
                let local = self.local(instant).map_err(|_| out_of_range())?;
                let naive = days
                    .and_then(Duration::try_days)
                    .and_then(|delta| local.checked_add_signed(delta))
                    .ok_or_else(out_of_range)?;
                self.resolve(naive)
            }
            TimePeriodSize::Month | TimePeriodSize::Year => {
                let months = if size == TimePeriodSize::Year {
                    signed.checked_mul(12)
                } else {
                    Some(signed)
                };
                let local = self.local(instant).map_err(|_| out_of_range())?;
                let naive = months
                    .and_then(|months| shift_months(local, months))
                    .ok_or_else(out_of_range)?;
                self.resolve(naive)
            }
        }
    }

    fn distance(&self, earlier: Instant, later: Instant, size: TimePeriodSize) -> i64 {
        if later <= earlier {
            return 0;
        }
        match size {
            TimePeriodSize::Second => (later - earlier).num_seconds(),
            TimePeriodSize::Minute => (later - earlier).num_minutes(),
            TimePeriodSize::Hour => (later - earlier).num_hours(),
            TimePeriodSize::Day => self.whole_days(earlier, later),
            TimePeriodSize::Week => self.whole_days(earlier, later) / 7,
            TimePeriodSize::Month => {
                whole_months(self.wall_clock(earlier), self.wall_clock(later))
            }
            TimePeriodSize::Year => {
                whole_months(self.wall_clock(earlier), self.wall_clock(later)) / 12
            }
        }
    }
}

fn month_length(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if GregorianCalendar::is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Add a signed number of months, clamping to the last day of the target month.
fn shift_months(naive: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let step = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        naive.checked_add_months(step)
    } else {
        naive.checked_sub_months(step)
    }
}

/// Whole calendar months between two wall-clock times.
pub(crate) fn whole_months(earlier: NaiveDateTime, later: NaiveDateTime) -> i64 {
    if later <= earlier {
        return 0;
    }
    let mut months = i64::from(later.year() - earlier.year()) * 12 + i64::from(later.month())
        - i64::from(earlier.month());
    // A partial final month does not count.
    while months > 0 && shift_months(earlier, months).is_none_or(|shifted| shifted > later) {
        months -= 1;
    }
    months.max(0)
}
