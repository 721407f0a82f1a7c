//! This module implements the internal ISO field records.
//!
//! An `IsoDate` is a proleptic Gregorian year, month and day. An `IsoTime`
//! is a wall clock time with millisecond precision, and an `IsoDateTime`
//! combines both into a local date time that is not bound to a time zone.
//!
//! Every calendar converts to and from `IsoDate`.

use crate::{
    utils::{self, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND},
    TemporalError, TemporalResult, MS_MAX_INSTANT,
};

/// The years that may be handed to the date equations.
///
/// This is wider than the representable instant range, which is checked
/// separately.
pub(crate) const YEAR_LIMIT: i64 = 300_000;

/// `IsoDate` is a proleptic Gregorian date.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl IsoDate {
    /// Creates a new `IsoDate` without determining the validity.
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a new validated `IsoDate`.
    pub fn try_new(year: i32, month: u8, day: u8) -> TemporalResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::field_out_of_range("month", month.into()));
        }
        if day == 0 || day > utils::iso_days_in_month(year, month) {
            return Err(TemporalError::field_out_of_range("day", day.into()));
        }
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Creates an `IsoDate` from days since the Unix epoch.
    pub(crate) fn from_epoch_days(epoch_days: i64) -> Self {
        // Callers only pass days derived from checked instants, which are
        // well inside the window of the date equations.
        let days = epoch_days.clamp(
            -i64::from(utils::MAX_EPOCH_DAYS) - 1,
            i64::from(utils::MAX_EPOCH_DAYS) + 1,
        );
        let (year, month, day) = utils::ymd_from_epoch_days(days as i32);
        Self::new_unchecked(year, month, day)
    }

    /// Returns the days since the Unix epoch.
    #[inline]
    pub(crate) fn to_epoch_days(self) -> i64 {
        utils::epoch_days_from_gregorian_date(self.year, self.month, self.day)
    }

    /// The ISO day of week, Monday is 1.
    #[inline]
    pub fn day_of_week(self) -> u8 {
        utils::iso_weekday_for_epoch_days(self.to_epoch_days())
    }

    /// The one-based day of the year.
    #[inline]
    pub fn day_of_year(self) -> u16 {
        utils::day_of_year(self.year, self.month, self.day)
    }

    #[inline]
    pub fn days_in_month(self) -> u8 {
        utils::iso_days_in_month(self.year, self.month)
    }

    #[inline]
    pub fn quarter(self) -> u8 {
        (self.month - 1) / 3 + 1
    }
}

/// `IsoTime` is a wall clock time of day.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

impl IsoTime {
    pub(crate) const fn new_unchecked(hour: u8, minute: u8, second: u8, millisecond: u16) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
        }
    }

    /// Creates a new validated `IsoTime`.
    pub fn try_new(hour: u8, minute: u8, second: u8, millisecond: u16) -> TemporalResult<Self> {
        if hour > 23 {
            return Err(TemporalError::field_out_of_range("hour", hour.into()));
        }
        if minute > 59 {
            return Err(TemporalError::field_out_of_range("minute", minute.into()));
        }
        if second > 59 {
            return Err(TemporalError::field_out_of_range("second", second.into()));
        }
        if millisecond > 999 {
            return Err(TemporalError::field_out_of_range(
                "millisecond",
                millisecond.into(),
            ));
        }
        Ok(Self::new_unchecked(hour, minute, second, millisecond))
    }

    /// Creates an `IsoTime` from the milliseconds elapsed in a day.
    pub(crate) fn from_day_milliseconds(ms: i64) -> Self {
        let ms = utils::floor_mod(ms, MS_PER_DAY);
        Self::new_unchecked(
            (ms / MS_PER_HOUR) as u8,
            (ms % MS_PER_HOUR / MS_PER_MINUTE) as u8,
            (ms % MS_PER_MINUTE / MS_PER_SECOND) as u8,
            (ms % MS_PER_SECOND) as u16,
        )
    }

    /// Returns the milliseconds elapsed since midnight.
    #[inline]
    pub(crate) fn to_day_milliseconds(self) -> i64 {
        i64::from(self.hour) * MS_PER_HOUR
            + i64::from(self.minute) * MS_PER_MINUTE
            + i64::from(self.second) * MS_PER_SECOND
            + i64::from(self.millisecond)
    }
}

/// `IsoDateTime` is a local date and time.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDateTime {
    pub date: IsoDate,
    pub time: IsoTime,
}

impl IsoDateTime {
    pub(crate) const fn new_unchecked(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// Creates the local date time observed at `epoch_milliseconds` under a
    /// UTC offset.
    pub(crate) fn from_epoch_milliseconds(epoch_milliseconds: i64, offset_minutes: i32) -> Self {
        Self::from_local_milliseconds(
            epoch_milliseconds + i64::from(offset_minutes) * MS_PER_MINUTE,
        )
    }

    /// Creates a local date time from milliseconds since the local epoch.
    pub(crate) fn from_local_milliseconds(local_milliseconds: i64) -> Self {
        let days = utils::floor_div(local_milliseconds, MS_PER_DAY);
        Self::new_unchecked(
            IsoDate::from_epoch_days(days),
            IsoTime::from_day_milliseconds(local_milliseconds),
        )
    }

    /// Returns this date time as milliseconds since the local epoch, i.e.
    /// as though it were a UTC date time.
    #[inline]
    pub(crate) fn to_local_milliseconds(self) -> i64 {
        self.date.to_epoch_days() * MS_PER_DAY + self.time.to_day_milliseconds()
    }
}

/// Returns the local milliseconds for unbalanced date values.
///
/// Months outside of `1..=12` carry into the year and days outside of the
/// month carry into neighbouring months, e.g. January 32nd is February 1st.
pub(crate) fn local_milliseconds_from_unbalanced(
    year: i64,
    month: i64,
    day: i64,
    day_milliseconds: i64,
) -> TemporalResult<i64> {
    let (year, month) = utils::balance_year_month(year, month);
    if !(-YEAR_LIMIT..=YEAR_LIMIT).contains(&year) {
        return Err(TemporalError::instant().with_message("Date is outside of the supported range."));
    }
    let first_of_month = utils::epoch_days_from_gregorian_date(year as i32, month, 1);
    first_of_month
        .checked_add(day.saturating_sub(1))
        .and_then(|days| days.checked_mul(MS_PER_DAY))
        .and_then(|ms| ms.checked_add(day_milliseconds))
        .ok_or_else(|| {
            TemporalError::instant().with_message("Date is outside of the supported range.")
        })
}

/// Validates that epoch milliseconds are within the representable instant
/// range of ±8.64e15.
#[inline]
pub(crate) fn check_epoch_milliseconds(epoch_milliseconds: i64) -> TemporalResult<i64> {
    if !(-MS_MAX_INSTANT..=MS_MAX_INSTANT).contains(&epoch_milliseconds) {
        return Err(TemporalError::instant().with_message(
            "Instant is outside of the representable range of ±8.64e15 milliseconds.",
        ));
    }
    Ok(epoch_milliseconds)
}
