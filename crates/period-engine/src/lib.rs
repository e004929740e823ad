//! # period-engine
//!
//! Time-period algebra over `chrono` instants.
//!
//! A [`TimePeriod`] is a pair of boundary instants with relationship queries
//! (contains, overlaps, intersects, gap) and a 13-way relation classification.
//! Periods are grouped into a [`TimePeriodCollection`] (an unordered bag with
//! overall bounds) or a [`TimePeriodChain`] (back-to-back periods that stay
//! contiguous across inserts and removals). All calendar arithmetic is
//! delegated to a [`CalendarShift`] such as [`GregorianCalendar`].
//!
//! ## Modules
//!
//! - [`period`]: `TimePeriod` and its relationship/mutation operations
//! - [`group`]: `TimePeriodGroup`, behaviour shared by chains and collections
//! - [`collection`]: `TimePeriodCollection`
//! - [`chain`]: `TimePeriodChain`
//! - [`calendar`]: `CalendarShift` and the `chrono-tz` Gregorian calendar
//! - [`relative`]: "3 hours ago" style descriptions
//! - [`units`]: sizes, relations, anchors and interval kinds
//! - [`dst`]: DST gap policies
//! - [`error`]: Error types

pub mod calendar;
pub mod chain;
pub mod collection;
pub mod dst;
pub mod error;
pub mod group;
pub mod period;
pub mod relative;
pub mod units;

/// A point on the time axis.
pub type Instant = chrono::DateTime<chrono::Utc>;

pub use calendar::{CalendarConfig, CalendarShift, GregorianCalendar, SharedCalendar};
pub use chain::TimePeriodChain;
pub use collection::TimePeriodCollection;
pub use dst::DstPolicy;
pub use error::PeriodError;
pub use group::TimePeriodGroup;
pub use period::TimePeriod;
pub use relative::{time_ago, time_ago_since_now, DateAgoFormat, RelativeTime};
pub use units::{
    ShiftOperation, TimePeriodAnchor, TimePeriodInterval, TimePeriodRelation, TimePeriodSize,
};
