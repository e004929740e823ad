//! Tests for the Gregorian calendar collaborator, its configuration and the
//! string forms of the unit enums.

use chrono::{DateTime, Duration, TimeZone, Utc, Weekday};
use chrono_tz::America::New_York;
use period_engine::{
    time_ago, CalendarConfig, CalendarShift, DateAgoFormat, DstPolicy, GregorianCalendar,
    PeriodError, TimePeriod, TimePeriodAnchor, TimePeriodRelation, TimePeriodSize,
};

// ---------------------------------------------------------------------------
// Shifting
// ---------------------------------------------------------------------------

#[test]
fn elapsed_units_add_fixed_seconds() {
    let cal = GregorianCalendar::utc();
    let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();

    assert_eq!(
        cal.adding(start, 90, TimePeriodSize::Second).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 1, 30).unwrap()
    );
    assert_eq!(
        cal.adding(start, 45, TimePeriodSize::Minute).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 45, 0).unwrap()
    );
    assert_eq!(
        cal.subtracting(start, 10, TimePeriodSize::Hour).unwrap(),
        Utc.with_ymd_and_hms(2026, 2, 28, 23, 0, 0).unwrap()
    );
}

#[test]
fn weeks_are_seven_days() {
    let cal = GregorianCalendar::utc();
    let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();

    assert_eq!(
        cal.adding(start, 2, TimePeriodSize::Week).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 15, 9, 0, 0).unwrap()
    );
}

#[test]
fn months_clamp_to_last_day() {
    let cal = GregorianCalendar::utc();
    let jan_31 = Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap();

    assert_eq!(
        cal.adding(jan_31, 1, TimePeriodSize::Month).unwrap(),
        Utc.with_ymd_and_hms(2026, 2, 28, 12, 0, 0).unwrap()
    );

    let leap_jan_31 = Utc.with_ymd_and_hms(2028, 1, 31, 12, 0, 0).unwrap();
    assert_eq!(
        cal.adding(leap_jan_31, 1, TimePeriodSize::Month).unwrap(),
        Utc.with_ymd_and_hms(2028, 2, 29, 12, 0, 0).unwrap()
    );
}

#[test]
fn subtracting_years() {
    let cal = GregorianCalendar::utc();
    let start = Utc.with_ymd_and_hms(2026, 6, 15, 0, 0, 0).unwrap();

    assert_eq!(
        cal.subtracting(start, 3, TimePeriodSize::Year).unwrap(),
        Utc.with_ymd_and_hms(2023, 6, 15, 0, 0, 0).unwrap()
    );
}

#[test]
fn overflowing_shift_is_an_error() {
    let cal = GregorianCalendar::utc();
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let err = cal.adding(start, i64::MAX, TimePeriodSize::Hour).unwrap_err();
    assert!(matches!(err, PeriodError::OutOfRange { .. }));
    assert!(cal.subtracting(start, i64::MIN, TimePeriodSize::Second).is_err());
}

// ---------------------------------------------------------------------------
// DST (America/New_York springs forward on 2026-03-08 at 02:00)
// ---------------------------------------------------------------------------

#[test]
fn day_shift_keeps_wall_clock_across_dst() {
    let cal = GregorianCalendar::new(New_York);
    let saturday_noon = cal.date(2026, 3, 7, 12, 0, 0).unwrap();
    assert_eq!(saturday_noon, Utc.with_ymd_and_hms(2026, 3, 7, 17, 0, 0).unwrap());

    let sunday_noon = cal.adding(saturday_noon, 1, TimePeriodSize::Day).unwrap();

    // EDT is UTC-4, so local noon is 16:00Z: only 23 elapsed hours.
    assert_eq!(sunday_noon, Utc.with_ymd_and_hms(2026, 3, 8, 16, 0, 0).unwrap());
    assert_eq!(cal.distance(saturday_noon, sunday_noon, TimePeriodSize::Hour), 23);
    assert_eq!(cal.distance(saturday_noon, sunday_noon, TimePeriodSize::Day), 1);
}

#[test]
fn hour_shift_is_elapsed_time_across_dst() {
    let cal = GregorianCalendar::new(New_York);
    let saturday_noon = cal.date(2026, 3, 7, 12, 0, 0).unwrap();

    let later = cal.adding(saturday_noon, 24, TimePeriodSize::Hour).unwrap();
    assert_eq!(later, Utc.with_ymd_and_hms(2026, 3, 8, 17, 0, 0).unwrap());
}

#[test]
fn gap_time_shifts_forward_by_default() {
    let cal = GregorianCalendar::new(New_York);
    let before_gap = cal.date(2026, 3, 7, 2, 30, 0).unwrap();

    // 2026-03-08 02:30 does not exist locally; 03:30 EDT is 07:30Z.
    let shifted = cal.adding(before_gap, 1, TimePeriodSize::Day).unwrap();
    assert_eq!(shifted, Utc.with_ymd_and_hms(2026, 3, 8, 7, 30, 0).unwrap());
}

#[test]
fn gap_time_rejected_by_policy() {
    let cal = GregorianCalendar::new(New_York).with_dst_policy(DstPolicy::Reject);
    let before_gap = cal.date(2026, 3, 7, 2, 30, 0).unwrap();

    let err = cal.adding(before_gap, 1, TimePeriodSize::Day).unwrap_err();
    assert!(matches!(err, PeriodError::NonexistentLocalTime(_)), "got {:?}", err);
}

// ---------------------------------------------------------------------------
// Distance
// ---------------------------------------------------------------------------

#[test]
fn distance_counts_whole_months_and_years() {
    let cal = GregorianCalendar::utc();
    let jan_15 = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
    let mar_14 = Utc.with_ymd_and_hms(2026, 3, 14, 23, 59, 59).unwrap();
    let mar_15 = Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap();

    assert_eq!(cal.distance(jan_15, mar_14, TimePeriodSize::Month), 1);
    assert_eq!(cal.distance(jan_15, mar_15, TimePeriodSize::Month), 2);

    let later = Utc.with_ymd_and_hms(2029, 1, 14, 0, 0, 0).unwrap();
    assert_eq!(cal.distance(jan_15, later, TimePeriodSize::Year), 2);
}

#[test]
fn distance_counts_whole_weeks() {
    let cal = GregorianCalendar::utc();
    let start = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 3, 21, 0, 0, 0).unwrap();

    assert_eq!(cal.distance(start, end, TimePeriodSize::Day), 20);
    assert_eq!(cal.distance(start, end, TimePeriodSize::Week), 2);
}

#[test]
fn reversed_distance_is_zero() {
    let cal = GregorianCalendar::utc();
    let early = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap();

    for size in TimePeriodSize::ALL {
        assert_eq!(cal.distance(late, early, size), 0, "{}", size);
    }
}

// ---------------------------------------------------------------------------
// Edges of the representable range
// ---------------------------------------------------------------------------

#[test]
fn local_time_out_of_range_is_an_error() {
    let cal = GregorianCalendar::new(New_York);

    let err = cal.local(DateTime::<Utc>::MIN_UTC).unwrap_err();
    assert!(matches!(err, PeriodError::LocalTimeOutOfRange { .. }), "got {:?}", err);
    assert!(cal.is_weekend(DateTime::<Utc>::MIN_UTC).is_err());
    assert!(cal.local(DateTime::<Utc>::MAX_UTC).is_ok());
}

#[test]
fn all_time_period_west_of_greenwich() {
    let calendar = GregorianCalendar::new(New_York).shared();
    let mut period = TimePeriod::all_time(calendar.clone());

    assert!(period.duration_in(TimePeriodSize::Day) > 0);
    assert!(period.duration_in(TimePeriodSize::Week) > 0);
    assert!(period.duration_in(TimePeriodSize::Month) > 0);
    assert!(period.duration_in(TimePeriodSize::Year) > 0);

    let err = period.shift_earlier(TimePeriodSize::Day, 1).unwrap_err();
    assert!(matches!(err, PeriodError::OutOfRange { .. }), "got {:?}", err);
    assert!(period.shift_later(TimePeriodSize::Month, 1).is_err());
    assert!(period
        .lengthen(TimePeriodAnchor::End, TimePeriodSize::Week, 1)
        .is_err());
    assert!(period
        .shorten(TimePeriodAnchor::End, TimePeriodSize::Year, 1)
        .is_err());

    assert_eq!(period, TimePeriod::all_time(calendar));
}

#[test]
fn relative_time_from_the_earliest_instant() {
    let cal = GregorianCalendar::new(New_York);
    let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

    let text = time_ago(&cal, DateTime::<Utc>::MIN_UTC, now, DateAgoFormat::Long);
    assert!(text.ends_with("years ago"), "{}", text);
}

// ---------------------------------------------------------------------------
// Components and predicates
// ---------------------------------------------------------------------------

#[test]
fn components_follow_the_local_wall_clock() {
    // 2026-03-01T02:00Z is Saturday 2026-02-28 21:00 in New York.
    let instant = Utc.with_ymd_and_hms(2026, 3, 1, 2, 0, 0).unwrap();
    let new_york = GregorianCalendar::new(New_York);
    let utc = GregorianCalendar::utc();

    assert_eq!(new_york.year(instant).unwrap(), 2026);
    assert_eq!(new_york.month(instant).unwrap(), 2);
    assert_eq!(new_york.day(instant).unwrap(), 28);
    assert_eq!(new_york.weekday(instant).unwrap(), Weekday::Sat);
    assert_eq!(new_york.day_of_year(instant).unwrap(), 59);
    assert_eq!(new_york.days_in_month(instant).unwrap(), 28);
    assert!(new_york.is_weekend(instant).unwrap());

    assert_eq!(utc.month(instant).unwrap(), 3);
    assert_eq!(utc.day(instant).unwrap(), 1);
    assert_eq!(utc.weekday(instant).unwrap(), Weekday::Sun);
    assert_eq!(utc.day_of_year(instant).unwrap(), 60);
    assert_eq!(utc.days_in_month(instant).unwrap(), 31);
}

#[test]
fn leap_year_lengths() {
    let cal = GregorianCalendar::utc();
    let leap = Utc.with_ymd_and_hms(2028, 2, 10, 0, 0, 0).unwrap();
    let common = Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap();

    assert!(cal.is_in_leap_year(leap).unwrap());
    assert_eq!(cal.days_in_month(leap).unwrap(), 29);
    assert_eq!(cal.days_in_year(leap).unwrap(), 366);
    assert_eq!(cal.days_in_year(common).unwrap(), 365);
    assert_eq!(
        cal.days_in_month(Utc.with_ymd_and_hms(2026, 4, 30, 0, 0, 0).unwrap())
            .unwrap(),
        30
    );
}

#[test]
fn quarters() {
    let cal = GregorianCalendar::utc();
    let quarter = |month| {
        cal.quarter(Utc.with_ymd_and_hms(2026, month, 15, 0, 0, 0).unwrap())
            .unwrap()
    };

    assert_eq!(quarter(1), 1);
    assert_eq!(quarter(3), 1);
    assert_eq!(quarter(4), 2);
    assert_eq!(quarter(9), 3);
    assert_eq!(quarter(12), 4);
}

#[test]
fn iso_week_of_year() {
    let cal = GregorianCalendar::utc();
    let week = |y, m, d| {
        cal.week_of_year(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap())
            .unwrap()
    };

    // 2026 starts on a Thursday, so it has 53 ISO weeks.
    assert_eq!(week(2026, 1, 1), 1);
    assert_eq!(week(2026, 1, 5), 2);
    assert_eq!(week(2026, 12, 31), 53);
    assert_eq!(week(2027, 1, 1), 53);
}

#[test]
fn week_of_month_starts_on_monday() {
    let cal = GregorianCalendar::utc();
    let week = |d| {
        cal.week_of_month(Utc.with_ymd_and_hms(2026, 3, d, 12, 0, 0).unwrap())
            .unwrap()
    };

    // 2026-03-01 is a Sunday.
    assert_eq!(week(1), 1);
    assert_eq!(week(2), 2);
    assert_eq!(week(8), 2);
    assert_eq!(week(9), 3);
    assert_eq!(week(31), 6);
}

#[test]
fn same_day_depends_on_timezone() {
    let late_utc = Utc.with_ymd_and_hms(2026, 3, 1, 2, 0, 0).unwrap();
    let afternoon = Utc.with_ymd_and_hms(2026, 2, 28, 15, 0, 0).unwrap();

    assert!(GregorianCalendar::new(New_York)
        .is_same_day(late_utc, afternoon)
        .unwrap());
    assert!(!GregorianCalendar::utc()
        .is_same_day(late_utc, afternoon)
        .unwrap());
}

#[test]
fn today_tomorrow_yesterday() {
    let cal = GregorianCalendar::utc();
    let now = Utc::now();

    assert!(cal.is_today(now).unwrap());
    assert!(cal.is_tomorrow(now + Duration::days(1)).unwrap());
    assert!(cal.is_yesterday(now - Duration::days(1)).unwrap());
    assert!(!cal.is_today(now + Duration::days(2)).unwrap());
    assert!(!cal.is_tomorrow(now).unwrap());
}

// ---------------------------------------------------------------------------
// Construction and configuration
// ---------------------------------------------------------------------------

#[test]
fn date_rejects_impossible_components() {
    let cal = GregorianCalendar::utc();
    assert!(matches!(
        cal.date(2026, 2, 30, 0, 0, 0),
        Err(PeriodError::InvalidDate(_))
    ));
}

#[test]
fn leap_years() {
    assert!(GregorianCalendar::is_leap_year(2024));
    assert!(GregorianCalendar::is_leap_year(2000));
    assert!(!GregorianCalendar::is_leap_year(1900));
    assert!(!GregorianCalendar::is_leap_year(2026));
}

#[test]
fn config_defaults_to_utc() {
    let cal = GregorianCalendar::from_config(&CalendarConfig::default()).unwrap();
    assert_eq!(cal, GregorianCalendar::utc());
}

#[test]
fn config_deserializes_with_defaults() {
    let config: CalendarConfig =
        serde_json::from_str(r#"{"timezone":"America/New_York"}"#).unwrap();
    assert_eq!(config.dst_policy, DstPolicy::ShiftForward);

    let cal = GregorianCalendar::from_config(&config).unwrap();
    assert_eq!(cal.timezone(), New_York);

    let reject: CalendarConfig = serde_json::from_str(r#"{"dst_policy":"reject"}"#).unwrap();
    assert_eq!(reject.timezone, "UTC");
    assert_eq!(reject.dst_policy, DstPolicy::Reject);
}

#[test]
fn config_with_unknown_timezone_fails() {
    let config = CalendarConfig {
        timezone: "Mars/Olympus_Mons".to_string(),
        ..CalendarConfig::default()
    };
    let err = GregorianCalendar::from_config(&config).unwrap_err();
    assert!(matches!(err, PeriodError::InvalidTimezone(ref tz) if tz == "Mars/Olympus_Mons"));
}

// ---------------------------------------------------------------------------
// String forms
// ---------------------------------------------------------------------------

#[test]
fn size_parses_plural_and_mixed_case() {
    assert_eq!("Days".parse::<TimePeriodSize>().unwrap(), TimePeriodSize::Day);
    assert_eq!("second".parse::<TimePeriodSize>().unwrap(), TimePeriodSize::Second);
    assert!("fortnight".parse::<TimePeriodSize>().is_err());
}

#[test]
fn dst_policy_parses_kebab_and_snake_case() {
    assert_eq!("shift-forward".parse::<DstPolicy>().unwrap(), DstPolicy::ShiftForward);
    assert_eq!("REJECT".parse::<DstPolicy>().unwrap(), DstPolicy::Reject);
    assert!("skip".parse::<DstPolicy>().is_err());
}

#[test]
fn relation_serializes_snake_case() {
    let json = serde_json::to_string(&TimePeriodRelation::InsideStartTouching).unwrap();
    assert_eq!(json, "\"inside_start_touching\"");
    assert_eq!(
        TimePeriodRelation::InsideStartTouching.to_string(),
        "inside_start_touching"
    );
}
