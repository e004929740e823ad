//! `TimePeriodChain` -- back-to-back periods with no gaps between them.
//!
//! The chain keeps `periods[i].end == periods[i + 1].start` for every `i`.
//! Incoming periods are re-anchored to fit (keeping their duration in whole
//! seconds), and inserting or removing in the middle shifts every later
//! period by the duration of the inserted or removed one.

use tracing::debug;

use crate::calendar::SharedCalendar;
use crate::error::Result;
use crate::group::sealed::GroupStorage;
use crate::group::{shift_range, TimePeriodGroup};
use crate::period::TimePeriod;
use crate::units::{ShiftOperation, TimePeriodSize};
use crate::Instant;

#[derive(Debug, Clone)]
pub struct TimePeriodChain {
    periods: Vec<TimePeriod>,
    start: Option<Instant>,
    end: Option<Instant>,
    calendar: SharedCalendar,
}

impl TimePeriodChain {
    pub fn new(calendar: SharedCalendar) -> Self {
        Self {
            periods: Vec::new(),
            start: None,
            end: None,
            calendar,
        }
    }

    pub fn first(&self) -> Option<&TimePeriod> {
        self.periods.first()
    }

    pub fn last(&self) -> Option<&TimePeriod> {
        self.periods.last()
    }

    /// Append `period`, moved to start where the chain currently ends.
    ///
    /// On an empty chain the period is appended unchanged.
    pub fn add(&mut self, period: TimePeriod) -> Result<()> {
        let linked = match self.periods.last() {
            Some(last) => {
                let seconds = period.duration_in_seconds();
                debug!(seconds, anchor = %last.end, "re-anchoring period at chain end");
                TimePeriod::starting_at(
                    TimePeriodSize::Second,
                    seconds,
                    last.end,
                    self.calendar.clone(),
                )?
            }
            None => period,
        };
        self.periods.push(linked);
        self.refresh_bounds();
        Ok(())
    }

    /// Insert `period` at `index`, keeping its duration and the chain contiguous.
    ///
    /// - index 0 prepends: the period is moved to end where the chain starts.
    /// - `0 < index <= len`: periods from `index` on shift later by the
    ///   inserted duration and the period starts at its predecessor's end.
    /// - any other index is ignored.
    pub fn insert(&mut self, period: TimePeriod, index: usize) -> Result<()> {
        if index > self.periods.len() {
            return Ok(());
        }
        let Some(first) = self.periods.first() else {
            return self.add(period);
        };

        let seconds = period.duration_in_seconds();
        if index == 0 {
            debug!(seconds, anchor = %first.start, "prepending period to chain");
            let linked = TimePeriod::ending_at(
                TimePeriodSize::Second,
                seconds,
                first.start,
                self.calendar.clone(),
            )?;
            self.periods.insert(0, linked);
        } else {
            let anchor = self.periods[index - 1].end;
            let linked = TimePeriod::starting_at(
                TimePeriodSize::Second,
                seconds,
                anchor,
                self.calendar.clone(),
            )?;
            debug!(index, seconds, "shifting chain tail later for insert");
            shift_range(self, index, TimePeriodSize::Second, seconds, ShiftOperation::Adding)?;
            self.periods.insert(index, linked);
        }
        self.refresh_bounds();
        Ok(())
    }

    /// Remove the period at `index`, shifting later periods earlier to close the gap.
    ///
    /// Returns `Ok(None)` when `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Result<Option<TimePeriod>> {
        let Some(period) = self.periods.get(index) else {
            return Ok(None);
        };
        let seconds = period.duration_in_seconds();
        debug!(index, seconds, "shifting chain tail earlier for remove");
        shift_range(
            self,
            index + 1,
            TimePeriodSize::Second,
            seconds,
            ShiftOperation::Subtracting,
        )?;
        let removed = self.periods.remove(index);
        self.refresh_bounds();
        Ok(Some(removed))
    }

    /// Pop the last period; nothing else moves.
    pub fn remove_latest(&mut self) -> Option<TimePeriod> {
        let removed = self.periods.pop()?;
        self.refresh_bounds();
        Some(removed)
    }

    /// Pop the first period and shift the remaining ones earlier by its
    /// duration, so the chain keeps its original start.
    ///
    /// The returned period keeps its bounds from before the call.
    pub fn remove_earliest(&mut self) -> Result<Option<TimePeriod>> {
        let Some(first) = self.periods.first() else {
            return Ok(None);
        };
        let seconds = first.duration_in_seconds();
        debug!(seconds, "shifting chain earlier after removing first period");
        shift_range(self, 1, TimePeriodSize::Second, seconds, ShiftOperation::Subtracting)?;
        let removed = self.periods.remove(0);
        self.refresh_bounds();
        Ok(Some(removed))
    }

    /// Same characteristics and equal periods position by position.
    pub fn equals(&self, other: &TimePeriodChain) -> bool {
        self.has_same_characteristics_as(other)
            && self
                .periods
                .iter()
                .zip(&other.periods)
                .all(|(a, b)| a.equals(b))
    }

    /// Rebuild the chain by re-adding every period in order.
    ///
    /// The copy keeps each period's duration in whole seconds and is
    /// contiguous even if this chain was built from fractional durations.
    pub fn copy(&self) -> Result<TimePeriodChain> {
        let mut chain = TimePeriodChain::new(self.calendar.clone());
        for period in &self.periods {
            chain.add(period.clone())?;
        }
        Ok(chain)
    }

    /// Whether every period starts where its predecessor ends.
    pub fn is_contiguous(&self) -> bool {
        self.periods.windows(2).all(|pair| pair[0].end == pair[1].start)
    }
}

impl GroupStorage for TimePeriodChain {
    fn periods_mut(&mut self) -> &mut [TimePeriod] {
        &mut self.periods
    }

    fn refresh_bounds(&mut self) {
        self.start = self.periods.first().map(|period| period.start);
        self.end = self.periods.last().map(|period| period.end);
    }
}

impl TimePeriodGroup for TimePeriodChain {
    fn periods(&self) -> &[TimePeriod] {
        &self.periods
    }

    fn start(&self) -> Option<Instant> {
        self.start
    }

    fn end(&self) -> Option<Instant> {
        self.end
    }

    fn calendar(&self) -> &SharedCalendar {
        &self.calendar
    }
}

impl PartialEq for TimePeriodChain {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<'a> IntoIterator for &'a TimePeriodChain {
    type Item = &'a TimePeriod;
    type IntoIter = std::slice::Iter<'a, TimePeriod>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}
