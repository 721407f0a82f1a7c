//! This module implements `DateTime`, an instant observed in a time zone.

use core::{cell::OnceCell, cmp::Ordering};

use core_maths::CoreFloat;

use crate::{
    builtins::core::{
        calendar::{
            Calendar, CalendarFields, CalendarSystem, IsoWeek, IsoWeekDate, Ordinal, OrdinalDate,
        },
        timezone::{ResolvedLocalTime, TimeZone},
        Duration,
    },
    fields::{
        self, DateTimeValues, PartialDate, PartialDateTime, PartialGregorianDate,
        PartialIsoWeekDate, PartialTime, ResolvedFields,
    },
    host::HostClock,
    iso::{self, IsoDate, IsoDateTime, IsoTime},
    options::TemporalUnit,
    provider::TimeZoneProvider,
    utils::{self, MS_PER_MINUTE, MS_PER_SECOND},
    TemporalError, TemporalResult,
};

mod diff;

#[cfg(test)]
mod tests;

/// An immutable instant together with the time zone it is observed in.
///
/// A `DateTime` stores its epoch milliseconds, its zone, the zone's offset
/// at that instant and the Gregorian date and time it denotes locally. The
/// ISO week date and ordinal date projections are computed on first use
/// and cached.
///
/// Every operation that changes a field returns a new `DateTime`.
/// Operations on zones with transitions take a [`TimeZoneProvider`]; the
/// `compiled_data` feature adds variants that use the bundled provider.
///
/// The projection cache is not synchronized, so a `DateTime` is `Send` but
/// not `Sync`.
#[derive(Debug, Clone)]
pub struct DateTime {
    epoch_milliseconds: i64,
    time_zone: TimeZone,
    offset_minutes: i32,
    iso: IsoDateTime,
    iso_week: OnceCell<IsoWeekDate>,
    ordinal: OnceCell<OrdinalDate>,
}

impl PartialEq for DateTime {
    /// Two `DateTime`s are equal when they denote the same instant in the
    /// same zone.
    fn eq(&self, other: &Self) -> bool {
        self.epoch_milliseconds == other.epoch_milliseconds && self.time_zone == other.time_zone
    }
}

impl Eq for DateTime {}

// ==== Private API ====

impl DateTime {
    /// Creates a `DateTime` from an instant and the offset in effect at it.
    #[inline]
    pub(crate) fn new_unchecked(
        epoch_milliseconds: i64,
        time_zone: TimeZone,
        offset_minutes: i32,
    ) -> Self {
        let iso = IsoDateTime::from_epoch_milliseconds(epoch_milliseconds, offset_minutes);
        Self::from_parts(epoch_milliseconds, time_zone, offset_minutes, iso)
    }

    fn from_parts(
        epoch_milliseconds: i64,
        time_zone: TimeZone,
        offset_minutes: i32,
        iso: IsoDateTime,
    ) -> Self {
        Self {
            epoch_milliseconds,
            time_zone,
            offset_minutes,
            iso,
            iso_week: OnceCell::new(),
            ordinal: OnceCell::new(),
        }
    }

    /// Creates a `DateTime` from milliseconds since the local epoch,
    /// resolving the instant with `offset_guess` as the first probe.
    pub(crate) fn from_local_with_provider(
        local_milliseconds: i64,
        offset_guess: i32,
        time_zone: TimeZone,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Self> {
        let ResolvedLocalTime {
            epoch_milliseconds,
            offset_minutes,
            adjusted,
        } = time_zone.resolve_local_with_provider(local_milliseconds, offset_guess, provider)?;
        iso::check_epoch_milliseconds(epoch_milliseconds)?;

        // Local times inside a gap no longer match the requested fields.
        let iso = if adjusted {
            IsoDateTime::from_epoch_milliseconds(epoch_milliseconds, offset_minutes)
        } else {
            IsoDateTime::from_local_milliseconds(local_milliseconds)
        };
        Ok(Self::from_parts(
            epoch_milliseconds,
            time_zone,
            offset_minutes,
            iso,
        ))
    }

    /// Returns the fields of `calendar` followed by the time of day.
    pub(crate) fn values_for(&self, calendar: Calendar) -> DateTimeValues {
        let time = self.iso.time;
        fields::date_time_values(
            &self.calendar_fields(calendar),
            [
                time.hour.into(),
                time.minute.into(),
                time.second.into(),
                time.millisecond.into(),
            ],
        )
    }

    /// Overlays `partial` onto this date time, lets `adjust` amend the
    /// merged values, and resolves the result with the current offset.
    pub(crate) fn set_with_adjust(
        &self,
        partial: &PartialDateTime,
        adjust: impl FnOnce(&mut DateTimeValues),
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Self> {
        let calendar = partial.calendar();
        let mut values = partial.overlay(&self.values_for(calendar));
        adjust(&mut values);
        let resolved = ResolvedFields::validate(calendar, &values)?;
        Self::from_local_with_provider(
            resolved.to_local_milliseconds(),
            self.offset_minutes,
            self.time_zone.clone(),
            provider,
        )
    }
}

// ==== Public API ====

impl DateTime {
    /// Creates a `DateTime` from milliseconds since the Unix epoch.
    ///
    /// The instant must be within ±8.64e15 milliseconds.
    pub fn try_new_with_provider(
        epoch_milliseconds: i64,
        time_zone: TimeZone,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Self> {
        iso::check_epoch_milliseconds(epoch_milliseconds)?;
        let offset = time_zone.offset_minutes_at_with_provider(epoch_milliseconds, provider)?;
        Ok(Self::new_unchecked(epoch_milliseconds, time_zone, offset))
    }

    /// Creates a `DateTime` from seconds since the Unix epoch, rounded to
    /// the millisecond.
    pub fn from_epoch_seconds_with_provider(
        epoch_seconds: f64,
        time_zone: TimeZone,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Self> {
        if !epoch_seconds.is_finite() {
            return Err(TemporalError::r#type().with_message("Epoch seconds must be finite."));
        }
        let milliseconds = utils::round_to(epoch_seconds * 1000.0, 0);
        if milliseconds.abs() > crate::MS_MAX_INSTANT as f64 {
            return Err(TemporalError::instant().with_message(
                "Instant is outside of the representable range of ±8.64e15 milliseconds.",
            ));
        }
        Self::try_new_with_provider(milliseconds as i64, time_zone, provider)
    }

    /// Creates a `DateTime` from partial fields.
    ///
    /// `clock` supplies the reference instant, which is read once. Fields
    /// more significant than the first specified field are taken from the
    /// reference instant observed in `time_zone`; fields after it default
    /// to their minimum. The local time is resolved with the reference
    /// offset as the first guess, and a local time that does not exist is
    /// moved forward past the gap.
    pub fn from_partial_with_provider(
        partial: PartialDateTime,
        time_zone: TimeZone,
        clock: &impl HostClock,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Self> {
        let now = clock.get_host_epoch_milliseconds()?;
        let reference = Self::try_new_with_provider(now, time_zone, provider)?;
        let calendar = partial.calendar();
        let values = partial.fill_from_reference(&reference.values_for(calendar));
        let resolved = ResolvedFields::validate(calendar, &values)?;
        let DateTime {
            time_zone,
            offset_minutes,
            ..
        } = reference;
        Self::from_local_with_provider(
            resolved.to_local_milliseconds(),
            offset_minutes,
            time_zone,
            provider,
        )
    }

    /// Returns a new `DateTime` with the specified fields replaced.
    ///
    /// When only the year or month of a Gregorian date change, the day is
    /// clamped to the length of the resulting month.
    pub fn set_with_provider(
        &self,
        partial: PartialDateTime,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Self> {
        let clamp_day = match partial.date {
            PartialDate::Gregorian(date) => date.day.is_none(),
            _ => false,
        };
        self.set_with_adjust(
            &partial,
            |values| {
                let [year, month, day, ..] = *values;
                if clamp_day && (1..=12).contains(&month) {
                    values[2] = day.min(utils::iso_days_in_month(year, month as u8).into());
                }
            },
            provider,
        )
    }

    /// Returns this `DateTime` observed in another zone.
    ///
    /// The instant is kept, unless `keep_local_time` is set, in which case
    /// the local date and time are kept and the instant moves.
    pub fn with_time_zone_with_provider(
        &self,
        time_zone: TimeZone,
        keep_local_time: bool,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Self> {
        if time_zone == self.time_zone {
            return Ok(self.clone());
        }
        if !keep_local_time {
            return Self::try_new_with_provider(self.epoch_milliseconds, time_zone, provider);
        }
        let guess = time_zone.offset_minutes_at_with_provider(self.epoch_milliseconds, provider)?;
        let resolved =
            time_zone.resolve_local_with_provider(self.iso.to_local_milliseconds(), guess, provider)?;
        iso::check_epoch_milliseconds(resolved.epoch_milliseconds)?;
        Ok(Self::new_unchecked(
            resolved.epoch_milliseconds,
            time_zone,
            resolved.offset_minutes,
        ))
    }

    /// Returns the same instant observed in UTC.
    #[must_use]
    pub fn to_utc(&self) -> Self {
        Self::new_unchecked(self.epoch_milliseconds, TimeZone::utc(), 0)
    }

    /// Compares the instants of two `DateTime`s, ignoring their zones.
    #[inline]
    #[must_use]
    pub fn cmp_instant(&self, other: &Self) -> Ordering {
        self.epoch_milliseconds.cmp(&other.epoch_milliseconds)
    }

    /// Returns the earliest `DateTime`, or `None` for an empty slice.
    #[must_use]
    pub fn min(values: &[Self]) -> Option<&Self> {
        values.iter().min_by(|a, b| a.cmp_instant(b))
    }

    /// Returns the latest `DateTime`, or `None` for an empty slice.
    #[must_use]
    pub fn max(values: &[Self]) -> Option<&Self> {
        values.iter().max_by(|a, b| a.cmp_instant(b))
    }

    /// Whether the zone is observing daylight saving time, i.e. its offset
    /// exceeds the offset on either January 1st or May 1st of the year.
    pub fn is_in_dst_with_provider(&self, provider: &impl TimeZoneProvider) -> TemporalResult<bool> {
        if self.time_zone.is_fixed_offset() {
            return Ok(false);
        }
        let january = PartialGregorianDate::new().with_month(Some(1)).with_day(Some(1));
        let may = PartialGregorianDate::new().with_month(Some(5));
        let january = self.set_with_provider(PartialDateTime::new().with_date(january), provider)?;
        let may = self.set_with_provider(PartialDateTime::new().with_date(may), provider)?;
        Ok(self.offset_minutes > january.offset_minutes || self.offset_minutes > may.offset_minutes)
    }

    /// Whether `other` falls within the same `unit` as this `DateTime`,
    /// comparing local times in `other`'s zone.
    pub fn has_same_with_provider(
        &self,
        other: &Self,
        unit: TemporalUnit,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<bool> {
        let adjusted = self.with_time_zone_with_provider(other.time_zone.clone(), true, provider)?;
        let start = adjusted.start_of_with_provider(unit, provider)?;
        let end = adjusted.end_of_with_provider(unit, provider)?;
        Ok(start.epoch_milliseconds <= other.epoch_milliseconds
            && other.epoch_milliseconds <= end.epoch_milliseconds)
    }
}

// ==== Arithmetic ====

impl DateTime {
    /// Adds a `Duration`.
    ///
    /// Whole years, quarters and months move the calendar date, clamping
    /// the day to the length of the target month; whole weeks and days are
    /// then added to the day. The local result is resolved with the current
    /// offset. Fractions of calendar units and all time units are converted
    /// to milliseconds with the duration's accuracy and added to the
    /// instant last.
    pub fn add_with_provider(
        &self,
        duration: &Duration,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Self> {
        let (years, year_fraction) = utils::int_and_fraction(duration.years());
        let (quarters, quarter_fraction) = utils::int_and_fraction(duration.quarters());
        let (months, month_fraction) = utils::int_and_fraction(duration.months());
        let (weeks, week_fraction) = utils::int_and_fraction(duration.weeks());
        let (days, day_fraction) = utils::int_and_fraction(duration.days());

        let date = self.iso.date;
        let year = i64::from(date.year).saturating_add(years as i64);
        let month = i64::from(date.month)
            .saturating_add(months as i64)
            .saturating_add((quarters as i64).saturating_mul(3));
        let (balanced_year, balanced_month) = utils::balance_year_month(year, month);
        let day = match i32::try_from(balanced_year) {
            Ok(year) => date.day.min(utils::iso_days_in_month(year, balanced_month)),
            Err(_) => date.day,
        };
        let day = i64::from(day)
            .saturating_add(days as i64)
            .saturating_add((weeks as i64).saturating_mul(7));

        let local = iso::local_milliseconds_from_unbalanced(
            year,
            month,
            day,
            self.iso.time.to_day_milliseconds(),
        )?;

        let fractions = Duration::new_unchecked(
            [
                Some(year_fraction),
                Some(quarter_fraction),
                Some(month_fraction),
                Some(week_fraction),
                Some(day_fraction),
                Some(duration.hours()),
                Some(duration.minutes()),
                Some(duration.seconds()),
                Some(duration.milliseconds()),
            ],
            duration.accuracy(),
        );
        let milliseconds = fractions.to_millis().round();
        if !milliseconds.is_finite() || milliseconds.abs() > 2.0 * crate::MS_MAX_INSTANT as f64 {
            return Err(TemporalError::instant().with_message(
                "Duration is outside of the representable range of ±8.64e15 milliseconds.",
            ));
        }
        let milliseconds = milliseconds as i64;

        let resolved = self.time_zone.resolve_local_with_provider(
            local,
            self.offset_minutes,
            provider,
        )?;
        if milliseconds == 0 {
            iso::check_epoch_milliseconds(resolved.epoch_milliseconds)?;
            return Ok(Self::new_unchecked(
                resolved.epoch_milliseconds,
                self.time_zone.clone(),
                resolved.offset_minutes,
            ));
        }
        Self::try_new_with_provider(
            resolved.epoch_milliseconds + milliseconds,
            self.time_zone.clone(),
            provider,
        )
    }

    /// Subtracts a `Duration`, i.e. adds its negation.
    pub fn subtract_with_provider(
        &self,
        duration: &Duration,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Self> {
        self.add_with_provider(&duration.negated(), provider)
    }

    /// Returns the first instant of the `unit` containing this `DateTime`.
    ///
    /// Weeks start on Monday.
    pub fn start_of_with_provider(
        &self,
        unit: TemporalUnit,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Self> {
        let midnight = PartialTime::new()
            .with_hour(Some(0))
            .with_minute(Some(0))
            .with_second(Some(0))
            .with_millisecond(Some(0));
        let gregorian = PartialGregorianDate::new();
        let partial = match unit {
            TemporalUnit::Year => PartialDateTime::new()
                .with_date(gregorian.with_month(Some(1)).with_day(Some(1)))
                .with_time(midnight),
            TemporalUnit::Quarter => {
                let month = (i32::from(self.quarter()) - 1) * 3 + 1;
                PartialDateTime::new()
                    .with_date(gregorian.with_month(Some(month)).with_day(Some(1)))
                    .with_time(midnight)
            }
            TemporalUnit::Month => PartialDateTime::new()
                .with_date(gregorian.with_day(Some(1)))
                .with_time(midnight),
            TemporalUnit::Week => PartialDateTime::new()
                .with_date(PartialIsoWeekDate::new().with_weekday(Some(1)))
                .with_time(midnight),
            TemporalUnit::Day => PartialDateTime::new().with_time(midnight),
            TemporalUnit::Hour => {
                PartialDateTime::new().with_time(midnight.with_hour(None))
            }
            TemporalUnit::Minute => PartialDateTime::new().with_time(
                PartialTime::new()
                    .with_second(Some(0))
                    .with_millisecond(Some(0)),
            ),
            TemporalUnit::Second => {
                PartialDateTime::new().with_time(PartialTime::new().with_millisecond(Some(0)))
            }
            TemporalUnit::Millisecond => return Ok(self.clone()),
        };
        self.set_with_adjust(&partial, |_| {}, provider)
    }

    /// Returns the last millisecond of the `unit` containing this
    /// `DateTime`.
    pub fn end_of_with_provider(
        &self,
        unit: TemporalUnit,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Self> {
        self.add_with_provider(&Duration::from_unit(unit, 1.0)?, provider)?
            .start_of_with_provider(unit, provider)?
            .add_with_provider(&Duration::from_millis(-1), provider)
    }
}

// ==== Accessors ====

impl DateTime {
    #[inline]
    #[must_use]
    pub fn epoch_milliseconds(&self) -> i64 {
        self.epoch_milliseconds
    }

    /// Returns the seconds since the Unix epoch, with a millisecond
    /// fraction.
    #[inline]
    #[must_use]
    pub fn epoch_seconds(&self) -> f64 {
        self.epoch_milliseconds as f64 / MS_PER_SECOND as f64
    }

    #[inline]
    #[must_use]
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// Returns the zone's offset from UTC at this instant, in minutes.
    #[inline]
    #[must_use]
    pub fn offset_minutes(&self) -> i32 {
        self.offset_minutes
    }

    /// Returns the offset in milliseconds.
    #[inline]
    #[must_use]
    pub fn offset_milliseconds(&self) -> i64 {
        i64::from(self.offset_minutes) * MS_PER_MINUTE
    }

    #[inline]
    #[must_use]
    pub fn is_offset_fixed(&self) -> bool {
        self.time_zone.is_fixed_offset()
    }

    /// Returns the local Gregorian date.
    #[inline]
    #[must_use]
    pub fn iso_date(&self) -> IsoDate {
        self.iso.date
    }

    #[inline]
    #[must_use]
    pub fn iso_time(&self) -> IsoTime {
        self.iso.time
    }

    /// Returns the ISO week date, computing it on first use.
    #[must_use]
    pub fn iso_week_date(&self) -> &IsoWeekDate {
        self.iso_week
            .get_or_init(|| IsoWeek::from_gregorian(self.iso.date))
    }

    /// Returns the ordinal date, computing it on first use.
    #[must_use]
    pub fn ordinal_date(&self) -> &OrdinalDate {
        self.ordinal
            .get_or_init(|| Ordinal::from_gregorian(self.iso.date))
    }

    /// Returns the local date in `calendar`.
    #[must_use]
    pub fn calendar_fields(&self, calendar: Calendar) -> CalendarFields {
        match calendar {
            Calendar::Gregorian => CalendarFields::Gregorian(self.iso.date),
            Calendar::IsoWeek => CalendarFields::IsoWeek(*self.iso_week_date()),
            Calendar::Ordinal => CalendarFields::Ordinal(*self.ordinal_date()),
        }
    }

    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        self.iso.date.year
    }

    #[inline]
    #[must_use]
    pub fn quarter(&self) -> u8 {
        self.iso.date.quarter()
    }

    #[inline]
    #[must_use]
    pub fn month(&self) -> u8 {
        self.iso.date.month
    }

    #[inline]
    #[must_use]
    pub fn day(&self) -> u8 {
        self.iso.date.day
    }

    #[inline]
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.iso.time.hour
    }

    #[inline]
    #[must_use]
    pub fn minute(&self) -> u8 {
        self.iso.time.minute
    }

    #[inline]
    #[must_use]
    pub fn second(&self) -> u8 {
        self.iso.time.second
    }

    #[inline]
    #[must_use]
    pub fn millisecond(&self) -> u16 {
        self.iso.time.millisecond
    }

    #[must_use]
    pub fn week_year(&self) -> i32 {
        self.iso_week_date().week_year
    }

    #[must_use]
    pub fn week_number(&self) -> u8 {
        self.iso_week_date().week_number
    }

    /// The ISO day of week, Monday is 1 and Sunday is 7.
    #[must_use]
    pub fn weekday(&self) -> u8 {
        self.iso_week_date().weekday
    }

    /// The one-based day of the year.
    #[must_use]
    pub fn ordinal(&self) -> u16 {
        self.ordinal_date().ordinal
    }

    #[inline]
    #[must_use]
    pub fn days_in_month(&self) -> u8 {
        self.iso.date.days_in_month()
    }

    #[inline]
    #[must_use]
    pub fn days_in_year(&self) -> u16 {
        utils::days_in_year(self.year())
    }

    #[must_use]
    pub fn weeks_in_week_year(&self) -> u8 {
        utils::weeks_in_week_year(self.week_year())
    }

    #[inline]
    #[must_use]
    pub fn is_in_leap_year(&self) -> bool {
        utils::is_leap(self.year())
    }
}

// ==== System time interop ====

#[cfg(feature = "sys")]
impl DateTime {
    /// Creates a `DateTime` from a `SystemTime`, truncated to the
    /// millisecond.
    pub fn from_system_time_with_provider(
        time: web_time::SystemTime,
        time_zone: TimeZone,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Self> {
        let out_of_range = || {
            TemporalError::instant().with_message("System time is outside of the representable range.")
        };
        let milliseconds = match time.duration_since(web_time::UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_millis()).map_err(|_| out_of_range())?,
            Err(err) => {
                let before = err.duration();
                let whole = i64::try_from(before.as_millis()).map_err(|_| out_of_range())?;
                // Round toward the past.
                let partial = i64::from(before.subsec_nanos() % 1_000_000 != 0);
                -whole - partial
            }
        };
        Self::try_new_with_provider(milliseconds, time_zone, provider)
    }

    /// Returns this instant as a `SystemTime`.
    pub fn to_system_time(&self) -> TemporalResult<web_time::SystemTime> {
        let offset = core::time::Duration::from_millis(self.epoch_milliseconds.unsigned_abs());
        let time = if self.epoch_milliseconds >= 0 {
            web_time::UNIX_EPOCH.checked_add(offset)
        } else {
            web_time::UNIX_EPOCH.checked_sub(offset)
        };
        time.ok_or_else(|| {
            TemporalError::instant().with_message("Instant cannot be represented as a system time.")
        })
    }
}
