//! `TimePeriodCollection` -- an unordered bag of periods with cached bounds.
//!
//! Order is insertion order unless one of the sort methods is called; it
//! carries no contiguity meaning. The overall bounds are the earliest start
//! and latest end of all members, rescanned after every structural change.

use crate::calendar::SharedCalendar;
use crate::group::sealed::GroupStorage;
use crate::group::TimePeriodGroup;
use crate::period::TimePeriod;
use crate::units::TimePeriodInterval;
use crate::Instant;

#[derive(Debug, Clone)]
pub struct TimePeriodCollection {
    periods: Vec<TimePeriod>,
    start: Option<Instant>,
    end: Option<Instant>,
    calendar: SharedCalendar,
}

impl TimePeriodCollection {
    pub fn new(calendar: SharedCalendar) -> Self {
        Self {
            periods: Vec::new(),
            start: None,
            end: None,
            calendar,
        }
    }

    pub fn add(&mut self, period: TimePeriod) {
        self.periods.push(period);
        self.refresh_bounds();
    }

    /// Insert at `index`; an index past the end is ignored.
    pub fn insert(&mut self, period: TimePeriod, index: usize) {
        if index > self.periods.len() {
            return;
        }
        self.periods.insert(index, period);
        self.refresh_bounds();
    }

    /// Remove and return the period at `index`, or `None` when out of range.
    pub fn remove(&mut self, index: usize) -> Option<TimePeriod> {
        if index >= self.periods.len() {
            return None;
        }
        let period = self.periods.remove(index);
        self.refresh_bounds();
        Some(period)
    }

    /// Replace the period at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, period: TimePeriod) -> Option<TimePeriod> {
        let slot = self.periods.get_mut(index)?;
        let previous = std::mem::replace(slot, period);
        self.refresh_bounds();
        Some(previous)
    }

    // -- Sorting (stable) ---------------------------------------------------

    pub fn sort_by_start_ascending(&mut self) {
        self.periods.sort_by(|a, b| a.start.cmp(&b.start));
    }

    pub fn sort_by_start_descending(&mut self) {
        self.periods.sort_by(|a, b| b.start.cmp(&a.start));
    }

    pub fn sort_by_end_ascending(&mut self) {
        self.periods.sort_by(|a, b| a.end.cmp(&b.end));
    }

    pub fn sort_by_end_descending(&mut self) {
        self.periods.sort_by(|a, b| b.end.cmp(&a.end));
    }

    pub fn sort_by_duration_ascending(&mut self) {
        self.periods.sort_by_key(|period| period.duration_in_seconds());
    }

    pub fn sort_by_duration_descending(&mut self) {
        self.periods
            .sort_by(|a, b| b.duration_in_seconds().cmp(&a.duration_in_seconds()));
    }

    // -- Queries ------------------------------------------------------------

    /// Members lying within `period`.
    pub fn periods_inside(&self, period: &TimePeriod) -> TimePeriodCollection {
        self.filtered(|member| member.is_inside(period))
    }

    /// Members containing `instant`, boundaries included.
    pub fn periods_intersected_by_instant(&self, instant: Instant) -> TimePeriodCollection {
        self.filtered(|member| member.contains_instant(instant, TimePeriodInterval::Closed))
    }

    /// Members sharing time with `period`, touching included.
    pub fn periods_intersected_by(&self, period: &TimePeriod) -> TimePeriodCollection {
        self.filtered(|member| member.intersects(period))
    }

    /// Members sharing time with `period`, touching excluded.
    pub fn periods_overlapped_by(&self, period: &TimePeriod) -> TimePeriodCollection {
        self.filtered(|member| member.overlaps_with(period))
    }

    fn filtered(&self, predicate: impl Fn(&TimePeriod) -> bool) -> TimePeriodCollection {
        let mut collection = TimePeriodCollection::new(self.calendar.clone());
        collection
            .periods
            .extend(self.periods.iter().filter(|&member| predicate(member)).cloned());
        collection.refresh_bounds();
        collection
    }

    /// Compare with another collection.
    ///
    /// With `consider_order` the periods must match position by position.
    /// Without it, every period of `self` must have an equal period somewhere
    /// in `other`; duplicates are not counted, so the check is one-directional.
    pub fn equals(&self, other: &TimePeriodCollection, consider_order: bool) -> bool {
        if !self.has_same_characteristics_as(other) {
            return false;
        }
        if consider_order {
            self.periods
                .iter()
                .zip(&other.periods)
                .all(|(a, b)| a.equals(b))
        } else {
            self.periods
                .iter()
                .all(|period| other.periods.iter().any(|candidate| candidate.equals(period)))
        }
    }
}

impl GroupStorage for TimePeriodCollection {
    fn periods_mut(&mut self) -> &mut [TimePeriod] {
        &mut self.periods
    }

    fn refresh_bounds(&mut self) {
        self.start = self.periods.iter().map(|period| period.start).min();
        self.end = self.periods.iter().map(|period| period.end).max();
    }
}

impl TimePeriodGroup for TimePeriodCollection {
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

/// Positional equality, so `==` stays symmetric.
impl PartialEq for TimePeriodCollection {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, true)
    }
}

impl<'a> IntoIterator for &'a TimePeriodCollection {
    type Item = &'a TimePeriod;
    type IntoIter = std::slice::Iter<'a, TimePeriod>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

impl Extend<TimePeriod> for TimePeriodCollection {
    fn extend<I: IntoIterator<Item = TimePeriod>>(&mut self, iter: I) {
        self.periods.extend(iter);
        self.refresh_bounds();
    }
}
