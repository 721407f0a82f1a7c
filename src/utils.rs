//! Utility numeric and date equations.

use core_maths::CoreFloat;
use num_traits::Euclid;

pub(crate) use calendrical_provider::utils::{
    day_of_year, days_in_year, epoch_days_from_gregorian_date, epoch_days_to_day_of_week,
    is_leap, iso_days_in_month, month_day_from_day_of_year, ymd_from_epoch_days, MAX_EPOCH_DAYS,
    MS_PER_DAY,
};

pub(crate) const MS_PER_HOUR: i64 = 3_600_000;
pub(crate) const MS_PER_MINUTE: i64 = 60_000;
pub(crate) const MS_PER_SECOND: i64 = 1_000;

/// Modulo that takes the sign of the divisor.
#[inline]
pub(crate) fn floor_mod<T: Euclid>(x: T, n: T) -> T {
    x.rem_euclid(&n)
}

/// Division rounding toward negative infinity.
#[inline]
pub(crate) fn floor_div<T: Euclid>(x: T, n: T) -> T {
    x.div_euclid(&n)
}

/// Splits a value into its integer and fractional parts, both carrying the
/// sign of the input.
#[inline]
pub(crate) fn int_and_fraction(value: f64) -> (f64, f64) {
    let int = value.trunc();
    (int, value - int)
}

/// Rounds away from zero.
#[inline]
pub(crate) fn anti_trunc(value: f64) -> f64 {
    if value < 0.0 {
        value.floor()
    } else {
        value.ceil()
    }
}

/// Rounds to `digits` decimal places, with halves rounding up.
#[inline]
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor + 0.5).floor() / factor
}

#[inline]
pub(crate) fn is_integer_between(value: i64, min: i64, max: i64) -> bool {
    (min..=max).contains(&value)
}

/// Balances a possibly overflowing one-based month into its year.
#[inline]
pub(crate) fn balance_year_month(year: i64, month: i64) -> (i64, u8) {
    let month0 = month.saturating_sub(1);
    (
        year.saturating_add(floor_div(month0, 12)),
        (floor_mod(month0, 12) + 1) as u8,
    )
}

/// The ISO day of week, where Monday is 1 and Sunday is 7.
#[inline]
pub(crate) fn iso_weekday_for_epoch_days(epoch_days: i64) -> u8 {
    match epoch_days_to_day_of_week(epoch_days) {
        0 => 7,
        day => day,
    }
}

/// The ISO day of week of a date, where Monday is 1 and Sunday is 7.
#[inline]
pub(crate) fn iso_weekday(year: i32, month: u8, day: u8) -> u8 {
    iso_weekday_for_epoch_days(epoch_days_from_gregorian_date(year, month, day))
}

/// The number of ISO weeks in a week year, either 52 or 53.
///
/// A week year has 53 weeks when it starts on a Thursday, or when it is a
/// leap year starting on a Wednesday.
pub(crate) fn weeks_in_week_year(week_year: i32) -> u8 {
    let p = |year: i64| {
        floor_mod(
            year + floor_div(year, 4) - floor_div(year, 100) + floor_div(year, 400),
            7,
        )
    };
    let year = i64::from(week_year);
    if p(year) == 4 || p(year - 1) == 3 {
        53
    } else {
        52
    }
}
