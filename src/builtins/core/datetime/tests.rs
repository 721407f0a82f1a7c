use crate::{
    builtins::core::{timezone::TimeZone, DateTime, Duration},
    error::ErrorKind,
    fields::{
        PartialDateTime, PartialGregorianDate, PartialIsoWeekDate, PartialOrdinalDate,
        PartialTime,
    },
    host::FixedClock,
    options::{ConversionAccuracy, TemporalUnit},
    provider::NeverProvider,
};

// 2017-05-15T10:23:54.123Z
const REFERENCE: i64 = 1_494_843_834_123;

fn date_time(year: i32, month: i32, day: i32, hour: i32, minute: i32) -> DateTime {
    let partial = PartialDateTime::new()
        .with_date(
            PartialGregorianDate::new()
                .with_year(Some(year))
                .with_month(Some(month))
                .with_day(Some(day)),
        )
        .with_time(PartialTime::new().with_hour(Some(hour)).with_minute(Some(minute)));
    DateTime::from_partial_with_provider(
        partial,
        TimeZone::utc(),
        &FixedClock(REFERENCE),
        &NeverProvider,
    )
    .unwrap()
}

fn ymd(year: i32, month: i32, day: i32) -> DateTime {
    date_time(year, month, day, 0, 0)
}

fn duration(pairs: &[(&str, f64)]) -> Duration {
    Duration::try_from_pairs(pairs).unwrap()
}

fn assert_fields(dt: &DateTime, expected: (i32, u8, u8, u8, u8, u8, u16)) {
    assert_eq!(
        (
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second(),
            dt.millisecond()
        ),
        expected
    );
}

#[test]
fn basic_datetime() {
    let dt = DateTime::try_new_with_provider(REFERENCE, TimeZone::utc(), &NeverProvider).unwrap();
    assert_fields(&dt, (2017, 5, 15, 10, 23, 54, 123));
    assert_eq!(dt.quarter(), 2);
    assert_eq!(dt.offset_minutes(), 0);
    assert_eq!(dt.epoch_seconds(), 1_494_843_834.123);

    let shifted =
        DateTime::try_new_with_provider(REFERENCE, TimeZone::FixedOffset(-300), &NeverProvider)
            .unwrap();
    assert_fields(&shifted, (2017, 5, 15, 5, 23, 54, 123));
    assert_eq!(shifted.offset_milliseconds(), -18_000_000);
    assert!(shifted.is_offset_fixed());
    assert_ne!(dt, shifted);
    assert_eq!(dt.to_utc(), shifted.to_utc());
}

#[test]
fn instant_limits() {
    let err = DateTime::try_new_with_provider(8_640_000_000_000_001, TimeZone::utc(), &NeverProvider)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Instant);

    let err = DateTime::from_epoch_seconds_with_provider(f64::NAN, TimeZone::utc(), &NeverProvider)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);

    let dt =
        DateTime::from_epoch_seconds_with_provider(1.0015, TimeZone::utc(), &NeverProvider).unwrap();
    assert_eq!(dt.epoch_milliseconds(), 1002);
}

#[test]
fn week_and_ordinal_projections() {
    let dt = ymd(2014, 3, 3);
    assert_eq!(dt.week_year(), 2014);
    assert_eq!(dt.week_number(), 10);
    assert_eq!(dt.weekday(), 1);
    assert_eq!(dt.ordinal(), 62);

    let dt = ymd(2005, 1, 1);
    assert_eq!((dt.week_year(), dt.week_number(), dt.weekday()), (2004, 53, 6));
    assert_eq!(dt.weeks_in_week_year(), 53);
    assert_eq!(dt.days_in_year(), 365);
    assert!(!dt.is_in_leap_year());
    assert!(ymd(2016, 2, 1).is_in_leap_year());
    assert_eq!(ymd(2016, 2, 1).days_in_month(), 29);
}

#[test]
fn from_partial_fills_from_the_reference() {
    let clock = FixedClock(REFERENCE);

    let partial = PartialDateTime::new().with_date(PartialGregorianDate::new().with_month(Some(3)));
    let dt = DateTime::from_partial_with_provider(partial, TimeZone::utc(), &clock, &NeverProvider)
        .unwrap();
    assert_fields(&dt, (2017, 3, 1, 0, 0, 0, 0));

    let partial = PartialDateTime::new().with_time(PartialTime::new().with_hour(Some(5)));
    let dt = DateTime::from_partial_with_provider(partial, TimeZone::utc(), &clock, &NeverProvider)
        .unwrap();
    assert_fields(&dt, (2017, 5, 15, 5, 0, 0, 0));

    let dt = DateTime::from_partial_with_provider(
        PartialDateTime::new(),
        TimeZone::utc(),
        &clock,
        &NeverProvider,
    )
    .unwrap();
    assert_eq!(dt.epoch_milliseconds(), REFERENCE);
}

#[test]
fn from_partial_in_other_calendars() {
    let clock = FixedClock(REFERENCE);

    let week_date = PartialIsoWeekDate::new()
        .with_week_year(Some(2008))
        .with_week_number(Some(1))
        .with_weekday(Some(1));
    let partial = PartialDateTime::new().with_date(week_date);
    let dt = DateTime::from_partial_with_provider(partial, TimeZone::utc(), &clock, &NeverProvider)
        .unwrap();
    assert_fields(&dt, (2007, 12, 31, 0, 0, 0, 0));

    let ordinal = PartialOrdinalDate::new().with_ordinal(Some(60));
    let partial = PartialDateTime::new().with_date(ordinal);
    let dt = DateTime::from_partial_with_provider(partial, TimeZone::utc(), &clock, &NeverProvider)
        .unwrap();
    assert_fields(&dt, (2017, 3, 1, 0, 0, 0, 0));
}

#[test]
fn from_partial_rejects_invalid_fields() {
    let clock = FixedClock(REFERENCE);
    let partial = PartialDateTime::new().with_date(
        PartialGregorianDate::new()
            .with_month(Some(2))
            .with_day(Some(30)),
    );
    let err = DateTime::from_partial_with_provider(partial, TimeZone::utc(), &clock, &NeverProvider)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    assert_eq!(err.field(), Some(("day", 30)));

    let partial = PartialDateTime::new().with_time(PartialTime::new().with_minute(Some(60)));
    let err = DateTime::from_partial_with_provider(partial, TimeZone::utc(), &clock, &NeverProvider)
        .unwrap_err();
    assert_eq!(err.field(), Some(("minute", 60)));
}

#[test]
fn set_clamps_the_day() {
    let dt = ymd(2017, 1, 31);
    let set = |date: PartialGregorianDate| {
        dt.set_with_provider(PartialDateTime::new().with_date(date), &NeverProvider)
    };

    let result = set(PartialGregorianDate::new().with_month(Some(2))).unwrap();
    assert_fields(&result, (2017, 2, 28, 0, 0, 0, 0));

    let result = set(PartialGregorianDate::new().with_year(Some(2016)).with_month(Some(2))).unwrap();
    assert_fields(&result, (2016, 2, 29, 0, 0, 0, 0));

    let err = set(PartialGregorianDate::new().with_month(Some(2)).with_day(Some(30))).unwrap_err();
    assert_eq!(err.field(), Some(("day", 30)));
}

#[test]
fn set_keeps_unspecified_fields() {
    let dt = date_time(2017, 5, 15, 10, 23);
    let result = dt
        .set_with_provider(
            PartialDateTime::new().with_time(PartialTime::new().with_hour(Some(4))),
            &NeverProvider,
        )
        .unwrap();
    assert_fields(&result, (2017, 5, 15, 4, 23, 0, 0));

    let result = dt
        .set_with_provider(
            PartialDateTime::new().with_date(PartialIsoWeekDate::new().with_weekday(Some(7))),
            &NeverProvider,
        )
        .unwrap();
    assert_fields(&result, (2017, 5, 21, 10, 23, 0, 0));
}

#[test]
fn time_zone_changes() {
    let dt = date_time(2017, 1, 1, 10, 0);
    let zone = TimeZone::FixedOffset(120);

    let same_instant = dt
        .with_time_zone_with_provider(zone.clone(), false, &NeverProvider)
        .unwrap();
    assert_eq!(same_instant.epoch_milliseconds(), dt.epoch_milliseconds());
    assert_eq!(same_instant.hour(), 12);
    assert_eq!(same_instant.offset_minutes(), 120);

    let same_local = dt
        .with_time_zone_with_provider(zone, true, &NeverProvider)
        .unwrap();
    assert_eq!(same_local.hour(), 10);
    assert_eq!(
        same_local.epoch_milliseconds(),
        dt.epoch_milliseconds() - 2 * 3_600_000
    );

    let unchanged = dt
        .with_time_zone_with_provider(TimeZone::utc(), true, &NeverProvider)
        .unwrap();
    assert_eq!(unchanged, dt);
}

#[test]
fn add_clamps_to_the_end_of_the_month() {
    let dt = ymd(2017, 1, 31);
    let add = |pairs: &[(&str, f64)]| dt.add_with_provider(&duration(pairs), &NeverProvider).unwrap();

    assert_fields(&add(&[("months", 1.0)]), (2017, 2, 28, 0, 0, 0, 0));
    assert_fields(&add(&[("months", 1.0), ("days", 1.0)]), (2017, 3, 1, 0, 0, 0, 0));
    assert_fields(&add(&[("quarters", 1.0)]), (2017, 4, 30, 0, 0, 0, 0));
    assert_fields(&add(&[("years", 1.0), ("weeks", 1.0)]), (2018, 2, 7, 0, 0, 0, 0));

    let result = ymd(2017, 3, 31)
        .subtract_with_provider(&duration(&[("months", 1.0)]), &NeverProvider)
        .unwrap();
    assert_fields(&result, (2017, 2, 28, 0, 0, 0, 0));
}

#[test]
fn add_time_and_fractions() {
    let dt = ymd(2017, 1, 1);
    let add = |pairs: &[(&str, f64)]| dt.add_with_provider(&duration(pairs), &NeverProvider).unwrap();

    assert_fields(&add(&[("days", 1.5)]), (2017, 1, 2, 12, 0, 0, 0));
    assert_fields(&add(&[("hours", 25.0)]), (2017, 1, 2, 1, 0, 0, 0));
    assert_fields(&add(&[("milliseconds", -1.0)]), (2016, 12, 31, 23, 59, 59, 999));
    assert_fields(&add(&[("minutes", 90.0), ("seconds", 1.5)]), (2017, 1, 1, 1, 30, 1, 500));
}

#[test]
fn add_then_subtract_round_trips() {
    let dt = date_time(2017, 5, 15, 10, 23);
    let span = duration(&[("days", 3.0), ("hours", 7.0), ("minutes", 11.0)]);
    let there = dt.add_with_provider(&span, &NeverProvider).unwrap();
    let back = there.subtract_with_provider(&span, &NeverProvider).unwrap();
    assert_eq!(back, dt);
}

#[test]
fn add_then_subtract_half_milliseconds() {
    let dt = date_time(2017, 5, 15, 10, 23);
    for pairs in [[("milliseconds", 0.5)], [("seconds", 0.0005)]] {
        let span = duration(&pairs);
        let there = dt.add_with_provider(&span, &NeverProvider).unwrap();
        assert_eq!(there.epoch_milliseconds(), dt.epoch_milliseconds() + 1);
        let back = there.subtract_with_provider(&span, &NeverProvider).unwrap();
        assert_eq!(back, dt);
    }
}

#[test]
fn add_rejects_calendar_units_out_of_range() {
    let dt = ymd(2017, 1, 1);
    for pairs in [
        &[("years", 1e19), ("months", 12.0)][..],
        &[("months", -1e19)][..],
        &[("quarters", 1e19), ("years", 1.0)][..],
    ] {
        let err = dt
            .add_with_provider(&duration(pairs), &NeverProvider)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Instant);
    }
}

#[test]
fn start_of_units() {
    let dt = date_time(2017, 5, 10, 13, 14);
    let start = |unit| dt.start_of_with_provider(unit, &NeverProvider).unwrap();

    assert_fields(&start(TemporalUnit::Year), (2017, 1, 1, 0, 0, 0, 0));
    assert_fields(&start(TemporalUnit::Quarter), (2017, 4, 1, 0, 0, 0, 0));
    assert_fields(&start(TemporalUnit::Month), (2017, 5, 1, 0, 0, 0, 0));
    assert_fields(&start(TemporalUnit::Week), (2017, 5, 8, 0, 0, 0, 0));
    assert_fields(&start(TemporalUnit::Day), (2017, 5, 10, 0, 0, 0, 0));
    assert_fields(&start(TemporalUnit::Hour), (2017, 5, 10, 13, 0, 0, 0));
    assert_fields(&start(TemporalUnit::Minute), (2017, 5, 10, 13, 14, 0, 0));
    assert_eq!(start(TemporalUnit::Millisecond), dt);
}

#[test]
fn start_of_week_on_a_monday() {
    let monday = date_time(2014, 3, 3, 13, 45);
    let start = monday
        .start_of_with_provider(TemporalUnit::Week, &NeverProvider)
        .unwrap();
    assert_fields(&start, (2014, 3, 3, 0, 0, 0, 0));

    // Weeks may start in the previous year.
    let start = ymd(2010, 1, 3)
        .start_of_with_provider(TemporalUnit::Week, &NeverProvider)
        .unwrap();
    assert_fields(&start, (2009, 12, 28, 0, 0, 0, 0));
}

#[test]
fn end_of_units() {
    let end = |dt: DateTime, unit| dt.end_of_with_provider(unit, &NeverProvider).unwrap();

    assert_fields(&end(ymd(2017, 2, 10), TemporalUnit::Month), (2017, 2, 28, 23, 59, 59, 999));
    assert_fields(&end(ymd(2017, 2, 10), TemporalUnit::Year), (2017, 12, 31, 23, 59, 59, 999));
    assert_fields(&end(ymd(2017, 5, 10), TemporalUnit::Quarter), (2017, 6, 30, 23, 59, 59, 999));
    assert_fields(&end(ymd(2014, 3, 5), TemporalUnit::Week), (2014, 3, 9, 23, 59, 59, 999));
    assert_fields(
        &end(date_time(2017, 2, 10, 8, 30), TemporalUnit::Hour),
        (2017, 2, 10, 8, 59, 59, 999),
    );
}

#[test]
fn diff_years_and_days() {
    let later = ymd(2016, 3, 3);
    let earlier = ymd(2010, 3, 14);
    let units = [TemporalUnit::Year, TemporalUnit::Day];

    let result = later
        .diff_with_provider(&earlier, &units, ConversionAccuracy::Casual, &NeverProvider)
        .unwrap();
    assert_eq!(result, duration(&[("years", 5.0), ("days", 355.0)]));

    let reversed = earlier
        .diff_with_provider(&later, &units, ConversionAccuracy::Casual, &NeverProvider)
        .unwrap();
    assert_eq!(reversed, result.negated());
}

#[test]
fn diff_weeks_and_days() {
    let result = ymd(2017, 1, 20)
        .diff_with_provider(
            &ymd(2017, 1, 1),
            &[TemporalUnit::Week, TemporalUnit::Day],
            ConversionAccuracy::Casual,
            &NeverProvider,
        )
        .unwrap();
    assert_eq!(result, duration(&[("weeks", 2.0), ("days", 5.0)]));
}

#[test]
fn diff_fraction_uses_the_actual_month_length() {
    let result = ymd(2017, 3, 16)
        .diff_with_provider(
            &ymd(2017, 2, 1),
            &[TemporalUnit::Month],
            ConversionAccuracy::Casual,
            &NeverProvider,
        )
        .unwrap();
    assert_eq!(result.months(), 1.0 + 15.0 / 31.0);
}

#[test]
fn diff_into_time_units() {
    let earlier = ymd(2017, 1, 1);
    let later = date_time(2017, 1, 2, 12, 30);

    let result = later
        .diff_with_provider(
            &earlier,
            &[TemporalUnit::Day, TemporalUnit::Hour, TemporalUnit::Minute],
            ConversionAccuracy::Casual,
            &NeverProvider,
        )
        .unwrap();
    assert_eq!(
        result,
        duration(&[("days", 1.0), ("hours", 12.0), ("minutes", 30.0)])
    );

    let result = later
        .diff_with_provider(
            &earlier,
            &[TemporalUnit::Hour],
            ConversionAccuracy::Casual,
            &NeverProvider,
        )
        .unwrap();
    assert_eq!(result, duration(&[("hours", 36.5)]));

    let result = earlier
        .diff_with_provider(
            &later,
            &[TemporalUnit::Millisecond],
            ConversionAccuracy::Casual,
            &NeverProvider,
        )
        .unwrap();
    assert_eq!(result.milliseconds(), -131_400_000.0);
}

#[test]
fn diff_requires_a_unit() {
    let err = ymd(2017, 1, 1)
        .diff_with_provider(&ymd(2016, 1, 1), &[], ConversionAccuracy::Casual, &NeverProvider)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unit);
}

#[test]
fn comparisons() {
    let dates = [ymd(2017, 1, 2), ymd(2016, 6, 1), ymd(2018, 1, 1)];
    assert_eq!(DateTime::min(&dates), Some(&dates[1]));
    assert_eq!(DateTime::max(&dates), Some(&dates[2]));
    assert_eq!(DateTime::min(&[]), None);
    assert!(dates[0].cmp_instant(&dates[1]).is_gt());
}

#[test]
fn has_same_unit() {
    let dt = date_time(2017, 1, 1, 10, 0);
    let same = |other: &DateTime, unit| dt.has_same_with_provider(other, unit, &NeverProvider).unwrap();

    assert!(same(&date_time(2017, 1, 1, 23, 0), TemporalUnit::Day));
    assert!(!same(&ymd(2017, 1, 2), TemporalUnit::Day));
    assert!(same(&ymd(2017, 3, 31), TemporalUnit::Quarter));
    assert!(!same(&ymd(2017, 4, 1), TemporalUnit::Quarter));

    // Local times are compared in the other zone.
    let other = DateTime::try_new_with_provider(
        dt.epoch_milliseconds() + 15 * 3_600_000,
        TimeZone::FixedOffset(-600),
        &NeverProvider,
    )
    .unwrap();
    assert_eq!(other.day(), 1);
    assert!(same(&other, TemporalUnit::Day));
}

#[test]
fn fixed_zones_are_never_in_dst() {
    let dt = date_time(2017, 7, 1, 12, 0);
    assert!(!dt.is_in_dst_with_provider(&NeverProvider).unwrap());
}

#[cfg(feature = "tzdb")]
mod tzdb {
    use super::*;
    use crate::provider::TzifProvider;

    fn new_york() -> TimeZone {
        TimeZone::Named("America/New_York".into())
    }

    #[test]
    fn offsets_follow_the_zone() {
        let provider = TzifProvider::default();
        // 2017-07-01T12:00Z
        let summer = DateTime::try_new_with_provider(1_498_910_400_000, new_york(), &provider).unwrap();
        assert_eq!(summer.offset_minutes(), -240);
        assert_fields(&summer, (2017, 7, 1, 8, 0, 0, 0));
        assert!(summer.is_in_dst_with_provider(&provider).unwrap());

        // 2017-01-01T10:00Z
        let winter = DateTime::try_new_with_provider(1_483_264_800_000, new_york(), &provider).unwrap();
        assert_eq!(winter.offset_minutes(), -300);
        assert!(!winter.is_in_dst_with_provider(&provider).unwrap());
    }

    #[test]
    fn hole_times_move_forward() {
        let provider = TzifProvider::default();
        let partial = PartialDateTime::new()
            .with_date(
                PartialGregorianDate::new()
                    .with_year(Some(2017))
                    .with_month(Some(3))
                    .with_day(Some(12)),
            )
            .with_time(PartialTime::new().with_hour(Some(2)).with_minute(Some(30)));
        // Referenced from 2017-03-01, before the transition.
        let dt = DateTime::from_partial_with_provider(
            partial,
            new_york(),
            &FixedClock(1_488_326_400_000),
            &provider,
        )
        .unwrap();
        assert_fields(&dt, (2017, 3, 12, 3, 30, 0, 0));
        assert_eq!(dt.offset_minutes(), -240);
        assert_eq!(dt.epoch_milliseconds(), 1_489_303_800_000);
    }

    #[test]
    fn adding_days_keeps_the_wall_clock() {
        let provider = TzifProvider::default();
        // 2017-03-11T12:00-05:00
        let dt = DateTime::try_new_with_provider(1_489_251_600_000, new_york(), &provider).unwrap();
        assert_eq!(dt.hour(), 12);

        let next = dt.add_with_provider(&duration(&[("days", 1.0)]), &provider).unwrap();
        assert_eq!(next.hour(), 12);
        assert_eq!(next.offset_minutes(), -240);
        assert_eq!(next.epoch_milliseconds() - dt.epoch_milliseconds(), 23 * 3_600_000);

        let later = dt.add_with_provider(&duration(&[("hours", 24.0)]), &provider).unwrap();
        assert_eq!(later.hour(), 13);
    }

    #[test]
    fn keep_local_time_across_zones() {
        let provider = TzifProvider::default();
        let dt = date_time(2017, 7, 1, 12, 0);
        let moved = dt.with_time_zone_with_provider(new_york(), true, &provider).unwrap();
        assert_fields(&moved, (2017, 7, 1, 12, 0, 0, 0));
        assert_eq!(moved.epoch_milliseconds(), dt.epoch_milliseconds() + 4 * 3_600_000);
    }
}
