//! Utility date and time equations shared by the providers and `calendrical`.

pub mod neri_schneider;

pub use neri_schneider::{epoch_days_from_gregorian_date, ymd_from_epoch_days, MAX_EPOCH_DAYS};

pub const SECONDS_PER_DAY: i64 = 86_400;

pub const MS_PER_DAY: i64 = SECONDS_PER_DAY * 1_000;

/// Cumulative days before each month of a common year.
const COMMON_YEAR_LADDER: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Cumulative days before each month of a leap year.
const LEAP_YEAR_LADDER: [u16; 12] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Whether `year` is a leap year in the proleptic Gregorian calendar.
#[inline]
pub const fn is_leap(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[inline]
pub const fn days_in_year(year: i32) -> u16 {
    if is_leap(year) {
        366
    } else {
        365
    }
}

/// The number of days in `month` (1-based) of `year`.
pub const fn iso_days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap(year) => 29,
        _ => 28,
    }
}

/// The cumulative days in the year before the zero-based `month0`.
#[inline]
pub const fn month_to_day(month0: u8, is_leap: bool) -> u16 {
    let ladder = if is_leap {
        &LEAP_YEAR_LADDER
    } else {
        &COMMON_YEAR_LADDER
    };
    ladder[month0 as usize % 12]
}

/// The one-based day of the year for a valid date.
#[inline]
pub const fn day_of_year(year: i32, month: u8, day: u8) -> u16 {
    month_to_day(month - 1, is_leap(year)) + day as u16
}

/// Resolves a one-based day of the year into `(month, day)`.
///
/// `ordinal` must be in `1..=days_in_year(year)`.
pub const fn month_day_from_day_of_year(year: i32, ordinal: u16) -> (u8, u8) {
    let ladder = if is_leap(year) {
        &LEAP_YEAR_LADDER
    } else {
        &COMMON_YEAR_LADDER
    };
    let mut month0 = 11;
    while month0 > 0 && ladder[month0] >= ordinal {
        month0 -= 1;
    }
    ((month0 + 1) as u8, (ordinal - ladder[month0]) as u8)
}

/// Epoch days of January 1st of `year`.
#[inline]
pub const fn epoch_days_for_year(year: i32) -> i64 {
    epoch_days_from_gregorian_date(year, 1, 1)
}

/// The day of week for epoch days, where Sunday is 0.
#[inline]
pub const fn epoch_days_to_day_of_week(epoch_days: i64) -> u8 {
    // 1970-01-01 was a Thursday.
    (epoch_days + 4).rem_euclid(7) as u8
}

/// The day of week for epoch seconds, where Sunday is 0.
#[inline]
pub const fn epoch_seconds_to_day_of_week(seconds: i64) -> u8 {
    epoch_days_to_day_of_week(seconds.div_euclid(SECONDS_PER_DAY))
}

/// The Gregorian year containing the provided epoch seconds.
pub fn year_from_epoch_seconds(seconds: i64) -> i32 {
    let days = seconds
        .div_euclid(SECONDS_PER_DAY)
        .clamp(-i64::from(MAX_EPOCH_DAYS), i64::from(MAX_EPOCH_DAYS));
    ymd_from_epoch_days(days as i32).0
}
