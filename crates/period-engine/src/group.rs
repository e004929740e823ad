//! `TimePeriodGroup` -- shared behaviour of chains and collections.
//!
//! Both containers own an ordered `Vec<TimePeriod>` and cache its overall
//! bounds. The trait supplies the aggregate durations, broadcast shifts and
//! the "same characteristics" check once for both of them.

use std::slice;

use crate::calendar::SharedCalendar;
use crate::error::Result;
use crate::period::TimePeriod;
use crate::units::{ShiftOperation, TimePeriodSize};
use crate::Instant;

pub(crate) mod sealed {
    use crate::period::TimePeriod;

    /// Mutable access reserved for the crate's own containers, so outside code
    /// cannot break a chain's contiguity or a collection's cached bounds.
    pub trait GroupStorage {
        fn periods_mut(&mut self) -> &mut [TimePeriod];

        /// Recompute `start`/`end` after the elements changed.
        fn refresh_bounds(&mut self);
    }
}

/// An ordered sequence of periods with overall bounds and a calendar.
pub trait TimePeriodGroup: sealed::GroupStorage {
    fn periods(&self) -> &[TimePeriod];

    /// Earliest bound of the group; `None` when empty.
    fn start(&self) -> Option<Instant>;

    /// Latest bound of the group; `None` when empty.
    fn end(&self) -> Option<Instant>;

    fn calendar(&self) -> &SharedCalendar;

    fn len(&self) -> usize {
        self.periods().len()
    }

    fn is_empty(&self) -> bool {
        self.periods().is_empty()
    }

    fn get(&self, index: usize) -> Option<&TimePeriod> {
        self.periods().get(index)
    }

    fn iter(&self) -> slice::Iter<'_, TimePeriod> {
        self.periods().iter()
    }

    /// Whole units of `size` spanned by the group's bounds; 0 when empty.
    fn duration_in(&self, size: TimePeriodSize) -> i64 {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => self.calendar().distance(start, end, size),
            _ => 0,
        }
    }

    fn duration_in_years(&self) -> i64 {
        self.duration_in(TimePeriodSize::Year)
    }

    fn duration_in_months(&self) -> i64 {
        self.duration_in(TimePeriodSize::Month)
    }

    fn duration_in_weeks(&self) -> i64 {
        self.duration_in(TimePeriodSize::Week)
    }

    fn duration_in_days(&self) -> i64 {
        self.duration_in(TimePeriodSize::Day)
    }

    fn duration_in_hours(&self) -> i64 {
        self.duration_in(TimePeriodSize::Hour)
    }

    fn duration_in_minutes(&self) -> i64 {
        self.duration_in(TimePeriodSize::Minute)
    }

    fn duration_in_seconds(&self) -> i64 {
        self.duration_in(TimePeriodSize::Second)
    }

    /// Shift every period later. Either all periods move or none do.
    fn shift_later(&mut self, size: TimePeriodSize, amount: i64) -> Result<()> {
        shift_all(self, size, amount, ShiftOperation::Adding)
    }

    /// Shift every period earlier. Either all periods move or none do.
    fn shift_earlier(&mut self, size: TimePeriodSize, amount: i64) -> Result<()> {
        shift_all(self, size, amount, ShiftOperation::Subtracting)
    }

    /// Same number of periods and, when non-empty, the same overall bounds.
    fn has_same_characteristics_as<G: TimePeriodGroup + ?Sized>(&self, other: &G) -> bool {
        if other.len() != self.len() {
            return false;
        }
        if other.is_empty() {
            return true;
        }
        other.start() == self.start() && other.end() == self.end()
    }
}

fn shift_all<G: TimePeriodGroup + ?Sized>(
    group: &mut G,
    size: TimePeriodSize,
    amount: i64,
    operation: ShiftOperation,
) -> Result<()> {
    shift_range(group, 0, size, amount, operation)
}

/// Shift the periods from `from` onwards, computing every new bound first.
pub(crate) fn shift_range<G: TimePeriodGroup + ?Sized>(
    group: &mut G,
    from: usize,
    size: TimePeriodSize,
    amount: i64,
    operation: ShiftOperation,
) -> Result<()> {
    let Some(tail) = group.periods().get(from..) else {
        return Ok(());
    };
    let shifted = tail
        .iter()
        .map(|period| period.shifted_bounds(size, amount, operation))
        .collect::<Result<Vec<_>>>()?;

    if let Some(tail) = group.periods_mut().get_mut(from..) {
        for (period, (start, end)) in tail.iter_mut().zip(shifted) {
            period.start = start;
            period.end = end;
        }
    }
    group.refresh_bounds();
    Ok(())
}
