//! `TimePeriod` -- a pair of boundary instants with relationship queries.
//!
//! Bounds are not validated on construction. A period whose start equals its
//! end is a *moment*; an inverted period (end before start) is accepted too
//! and simply classifies as [`TimePeriodRelation::None`].

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::calendar::SharedCalendar;
use crate::error::Result;
use crate::units::{
    ShiftOperation, TimePeriodAnchor, TimePeriodInterval, TimePeriodRelation, TimePeriodSize,
};
use crate::Instant;

/// A span of time between `start` and `end`.
///
/// Equality compares the bounds only; the calendar is a shared collaborator
/// and never part of a period's identity.
#[derive(Clone)]
pub struct TimePeriod {
    pub start: Instant,
    pub end: Instant,
    calendar: SharedCalendar,
}

impl TimePeriod {
    pub fn new(start: Instant, end: Instant, calendar: SharedCalendar) -> Self {
        Self {
            start,
            end,
            calendar,
        }
    }

    /// A period of `amount` units of `size` beginning at `start`.
    pub fn starting_at(
        size: TimePeriodSize,
        amount: i64,
        start: Instant,
        calendar: SharedCalendar,
    ) -> Result<Self> {
        let end = calendar.adding(start, amount, size)?;
        Ok(Self::new(start, end, calendar))
    }

    /// A period of `amount` units of `size` finishing at `end`.
    pub fn ending_at(
        size: TimePeriodSize,
        amount: i64,
        end: Instant,
        calendar: SharedCalendar,
    ) -> Result<Self> {
        let start = calendar.subtracting(end, amount, size)?;
        Ok(Self::new(start, end, calendar))
    }

    /// The largest representable period.
    pub fn all_time(calendar: SharedCalendar) -> Self {
        Self::new(DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC, calendar)
    }

    pub fn calendar(&self) -> &SharedCalendar {
        &self.calendar
    }

    pub fn is_moment(&self) -> bool {
        self.start == self.end
    }

    // -- Duration -----------------------------------------------------------

    /// Whole units of `size` from start to end; 0 for inverted periods.
    pub fn duration_in(&self, size: TimePeriodSize) -> i64 {
        self.calendar.distance(self.start, self.end, size)
    }

    pub fn duration_in_seconds(&self) -> i64 {
        self.duration_in(TimePeriodSize::Second)
    }

    /// Signed elapsed time `end - start`.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    // -- Relationships ------------------------------------------------------

    /// Both bounds match exactly.
    pub fn equals(&self, period: &TimePeriod) -> bool {
        self.start == period.start && self.end == period.end
    }

    /// `self` lies within `period`, boundaries included.
    pub fn is_inside(&self, period: &TimePeriod) -> bool {
        period.start <= self.start && period.end >= self.end
    }

    /// `period` lies within `self`, boundaries included.
    pub fn contains(&self, period: &TimePeriod) -> bool {
        self.start <= period.start && self.end >= period.end
    }

    /// Shared time excluding instantaneous touching (one's end is the other's start).
    pub fn overlaps_with(&self, period: &TimePeriod) -> bool {
        (period.start < self.start && period.end > self.start)
            || (period.start >= self.start && period.end <= self.end)
            || (period.start < self.end && period.end > self.end)
    }

    /// Shared time including instantaneous touching.
    pub fn intersects(&self, period: &TimePeriod) -> bool {
        (period.start < self.start && period.end >= self.start)
            || (period.start >= self.start && period.end <= self.end)
            || (period.start <= self.end && period.end > self.end)
    }

    /// Classify `period` against `self` as the reference period.
    ///
    /// Branches are evaluated in a fixed order and the first match wins.
    pub fn relation_to(&self, period: &TimePeriod) -> TimePeriodRelation {
        if self.start >= self.end || period.start >= period.end {
            return TimePeriodRelation::None;
        }

        if period.end < self.start {
            TimePeriodRelation::After
        } else if period.end == self.start {
            TimePeriodRelation::StartTouching
        } else if period.start < self.start && period.end < self.end {
            TimePeriodRelation::StartInside
        } else if period.start == self.start && period.end > self.end {
            TimePeriodRelation::InsideStartTouching
        } else if period.start == self.start && period.end < self.end {
            TimePeriodRelation::EnclosingStartTouching
        } else if period.start > self.start && period.end < self.end {
            TimePeriodRelation::Enclosing
        } else if period.start > self.start && period.end == self.end {
            TimePeriodRelation::EnclosingEndTouching
        } else if period.start == self.start && period.end == self.end {
            TimePeriodRelation::ExactMatch
        } else if period.start < self.start && period.end > self.end {
            TimePeriodRelation::Inside
        } else if period.start < self.start && period.end == self.end {
            TimePeriodRelation::InsideEndTouching
        } else if period.start < self.end && period.end > self.end {
            TimePeriodRelation::EndInside
        } else if period.start == self.end && period.end > self.end {
            TimePeriodRelation::EndTouching
        } else if period.start > self.end {
            TimePeriodRelation::Before
        } else {
            TimePeriodRelation::None
        }
    }

    /// Time between the nearer boundaries, or zero if the periods intersect.
    pub fn gap_between(&self, period: &TimePeriod) -> Duration {
        if self.end < period.start {
            period.start - self.end
        } else if period.end < self.start {
            self.start - period.end
        } else {
            Duration::zero()
        }
    }

    /// Whether `instant` falls in the period; `Open` excludes the bounds.
    pub fn contains_instant(&self, instant: Instant, interval: TimePeriodInterval) -> bool {
        match interval {
            TimePeriodInterval::Open => self.start < instant && self.end > instant,
            TimePeriodInterval::Closed => self.start <= instant && self.end >= instant,
        }
    }

    // -- Mutation -----------------------------------------------------------
    //
    // New bounds are computed before either is assigned, so a failed calendar
    // shift leaves the period untouched.

    pub fn shift_earlier(&mut self, size: TimePeriodSize, amount: i64) -> Result<()> {
        self.shift(size, amount, ShiftOperation::Subtracting)
    }

    pub fn shift_later(&mut self, size: TimePeriodSize, amount: i64) -> Result<()> {
        self.shift(size, amount, ShiftOperation::Adding)
    }

    /// Bounds after moving both by `amount` units, without mutating.
    pub(crate) fn shifted_bounds(
        &self,
        size: TimePeriodSize,
        amount: i64,
        operation: ShiftOperation,
    ) -> Result<(Instant, Instant)> {
        let start = self.calendar.shift(self.start, amount, size, operation)?;
        let end = self.calendar.shift(self.end, amount, size, operation)?;
        Ok((start, end))
    }

    fn shift(
        &mut self,
        size: TimePeriodSize,
        amount: i64,
        operation: ShiftOperation,
    ) -> Result<()> {
        let (start, end) = self.shifted_bounds(size, amount, operation)?;
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Grow the period by `amount` units, keeping `anchor` fixed.
    ///
    /// With a `Center` anchor each bound moves by half the amount, truncated.
    pub fn lengthen(
        &mut self,
        anchor: TimePeriodAnchor,
        size: TimePeriodSize,
        amount: i64,
    ) -> Result<()> {
        self.resize(anchor, size, amount, ShiftOperation::Adding)
    }

    /// Shrink the period by `amount` units, keeping `anchor` fixed.
    pub fn shorten(
        &mut self,
        anchor: TimePeriodAnchor,
        size: TimePeriodSize,
        amount: i64,
    ) -> Result<()> {
        self.resize(anchor, size, amount, ShiftOperation::Subtracting)
    }

    fn resize(
        &mut self,
        anchor: TimePeriodAnchor,
        size: TimePeriodSize,
        amount: i64,
        end_operation: ShiftOperation,
    ) -> Result<()> {
        let start_operation = match end_operation {
            ShiftOperation::Adding => ShiftOperation::Subtracting,
            ShiftOperation::Subtracting => ShiftOperation::Adding,
        };
        let (start, end) = match anchor {
            TimePeriodAnchor::Start => (
                self.start,
                self.calendar.shift(self.end, amount, size, end_operation)?,
            ),
            TimePeriodAnchor::Center => {
                let half = amount / 2;
                (
                    self.calendar.shift(self.start, half, size, start_operation)?,
                    self.calendar.shift(self.end, half, size, end_operation)?,
                )
            }
            TimePeriodAnchor::End => (
                self.calendar.shift(self.start, amount, size, start_operation)?,
                self.end,
            ),
        };
        self.start = start;
        self.end = end;
        Ok(())
    }
}

impl PartialEq for TimePeriod {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for TimePeriod {}

impl fmt::Debug for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimePeriod")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

/// ISO 8601 interval notation: `start/end`.
impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}
