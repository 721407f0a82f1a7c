//! Partial date and time fields.
//!
//! A `PartialDateTime` is what callers hand to `DateTime` construction and
//! `DateTime::set`. Unspecified fields are filled in either from a reference
//! date time or from the current value, and the result is validated against
//! its calendar.

use crate::{
    builtins::core::calendar::{Calendar, CalendarFields, FieldValues},
    utils::{self, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND},
    TemporalError, TemporalResult,
};

/// The field values of a full date time: the calendar's date fields in
/// slots `0..3` and hour, minute, second and millisecond in slots `3..7`.
pub(crate) type DateTimeValues = [i32; 7];

const TIME_SLOTS: core::ops::Range<usize> = 3..7;

/// A partial time of day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartialTime {
    /// A potentially set `hour` field.
    pub hour: Option<i32>,
    /// A potentially set `minute` field.
    pub minute: Option<i32>,
    /// A potentially set `second` field.
    pub second: Option<i32>,
    /// A potentially set `millisecond` field.
    pub millisecond: Option<i32>,
}

impl PartialTime {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Convenience methods for building a `PartialTime`
impl PartialTime {
    pub const fn new() -> Self {
        Self {
            hour: None,
            minute: None,
            second: None,
            millisecond: None,
        }
    }

    pub const fn with_hour(mut self, hour: Option<i32>) -> Self {
        self.hour = hour;
        self
    }

    pub const fn with_minute(mut self, minute: Option<i32>) -> Self {
        self.minute = minute;
        self
    }

    pub const fn with_second(mut self, second: Option<i32>) -> Self {
        self.second = second;
        self
    }

    pub const fn with_millisecond(mut self, millisecond: Option<i32>) -> Self {
        self.millisecond = millisecond;
        self
    }

    fn slots(&self) -> [Option<i32>; 4] {
        [self.hour, self.minute, self.second, self.millisecond]
    }
}

/// Partial Gregorian date fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartialGregorianDate {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub day: Option<i32>,
}

impl PartialGregorianDate {
    pub const fn new() -> Self {
        Self {
            year: None,
            month: None,
            day: None,
        }
    }

    pub const fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub const fn with_month(mut self, month: Option<i32>) -> Self {
        self.month = month;
        self
    }

    pub const fn with_day(mut self, day: Option<i32>) -> Self {
        self.day = day;
        self
    }
}

/// Partial ISO week date fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartialIsoWeekDate {
    pub week_year: Option<i32>,
    pub week_number: Option<i32>,
    pub weekday: Option<i32>,
}

impl PartialIsoWeekDate {
    pub const fn new() -> Self {
        Self {
            week_year: None,
            week_number: None,
            weekday: None,
        }
    }

    pub const fn with_week_year(mut self, week_year: Option<i32>) -> Self {
        self.week_year = week_year;
        self
    }

    pub const fn with_week_number(mut self, week_number: Option<i32>) -> Self {
        self.week_number = week_number;
        self
    }

    pub const fn with_weekday(mut self, weekday: Option<i32>) -> Self {
        self.weekday = weekday;
        self
    }
}

/// Partial ordinal date fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartialOrdinalDate {
    pub year: Option<i32>,
    pub ordinal: Option<i32>,
}

impl PartialOrdinalDate {
    pub const fn new() -> Self {
        Self {
            year: None,
            ordinal: None,
        }
    }

    pub const fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub const fn with_ordinal(mut self, ordinal: Option<i32>) -> Self {
        self.ordinal = ordinal;
        self
    }
}

/// Partial date fields of exactly one calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialDate {
    Gregorian(PartialGregorianDate),
    IsoWeek(PartialIsoWeekDate),
    Ordinal(PartialOrdinalDate),
}

impl Default for PartialDate {
    fn default() -> Self {
        Self::Gregorian(PartialGregorianDate::new())
    }
}

impl From<PartialGregorianDate> for PartialDate {
    fn from(value: PartialGregorianDate) -> Self {
        Self::Gregorian(value)
    }
}

impl From<PartialIsoWeekDate> for PartialDate {
    fn from(value: PartialIsoWeekDate) -> Self {
        Self::IsoWeek(value)
    }
}

impl From<PartialOrdinalDate> for PartialDate {
    fn from(value: PartialOrdinalDate) -> Self {
        Self::Ordinal(value)
    }
}

impl PartialDate {
    /// The calendar these fields belong to.
    pub fn calendar(&self) -> Calendar {
        match self {
            Self::Gregorian(_) => Calendar::Gregorian,
            Self::IsoWeek(_) => Calendar::IsoWeek,
            Self::Ordinal(_) => Calendar::Ordinal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots().iter().all(Option::is_none)
    }

    fn slots(&self) -> [Option<i32>; 3] {
        match self {
            Self::Gregorian(date) => [date.year, date.month, date.day],
            Self::IsoWeek(date) => [date.week_year, date.week_number, date.weekday],
            Self::Ordinal(date) => [date.year, date.ordinal, None],
        }
    }
}

/// Partial date and time fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartialDateTime {
    pub date: PartialDate,
    pub time: PartialTime,
}

impl PartialDateTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(mut self, date: impl Into<PartialDate>) -> Self {
        self.date = date.into();
        self
    }

    pub const fn with_time(mut self, time: PartialTime) -> Self {
        self.time = time;
        self
    }

    pub fn calendar(&self) -> Calendar {
        self.date.calendar()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.time.is_empty()
    }

    /// The slots used by this calendar, from most to least significant.
    fn used_slots(&self) -> impl Iterator<Item = (usize, Option<i32>)> {
        let date = self.date.slots();
        let date_fields = self.calendar().field_names().len();
        let time = self.time.slots();
        (0..date_fields)
            .map(move |slot| (slot, date[slot]))
            .chain(TIME_SLOTS.zip(time))
    }

    /// Fills the unspecified fields.
    ///
    /// Fields more significant than the first specified field are taken from
    /// `reference`. Fields after it take the calendar's default values, and
    /// zero for the time of day.
    pub(crate) fn fill_from_reference(&self, reference: &DateTimeValues) -> DateTimeValues {
        let defaults = self.calendar().default_values();
        let mut values = DateTimeValues::default();
        let mut found_first = false;
        for (slot, value) in self.used_slots() {
            values[slot] = match value {
                Some(value) => {
                    found_first = true;
                    value
                }
                None if found_first => defaults.get(slot).copied().unwrap_or(0),
                None => reference[slot],
            };
        }
        values
    }

    /// Overlays the specified fields onto `current`.
    pub(crate) fn overlay(&self, current: &DateTimeValues) -> DateTimeValues {
        let mut values = *current;
        for (slot, value) in self.used_slots() {
            if let Some(value) = value {
                values[slot] = value;
            }
        }
        values
    }
}

/// Date time values that passed validation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedFields {
    pub(crate) date: CalendarFields,
    /// Milliseconds since midnight, which is `86_400_000` for hour 24.
    pub(crate) day_milliseconds: i64,
}

impl ResolvedFields {
    /// Validates the date fields of `calendar` followed by the time fields.
    pub(crate) fn validate(calendar: Calendar, values: &DateTimeValues) -> TemporalResult<Self> {
        let date_values: FieldValues = [values[0], values[1], values[2]];
        let date = calendar.validate(&date_values)?;
        let day_milliseconds = validate_time([values[3], values[4], values[5], values[6]])?;
        Ok(Self {
            date,
            day_milliseconds,
        })
    }

    /// Milliseconds since the local epoch.
    pub(crate) fn to_local_milliseconds(self) -> i64 {
        self.date.to_gregorian().to_epoch_days() * utils::MS_PER_DAY + self.day_milliseconds
    }
}

/// Packs calendar fields and a time of day into slots.
pub(crate) fn date_time_values(date: &CalendarFields, time: [i32; 4]) -> DateTimeValues {
    let [a, b, c] = date.values();
    let [hour, minute, second, millisecond] = time;
    [a, b, c, hour, minute, second, millisecond]
}

/// Validates a time of day, returning the milliseconds since midnight.
///
/// Hour 24 is accepted when every other field is zero, and denotes the
/// midnight ending the day.
fn validate_time(values: [i32; 4]) -> TemporalResult<i64> {
    let [hour, minute, second, millisecond] = values.map(i64::from);
    let end_of_day = hour == 24 && minute == 0 && second == 0 && millisecond == 0;
    if !utils::is_integer_between(hour, 0, 23) && !end_of_day {
        return Err(TemporalError::field_out_of_range("hour", hour));
    }
    if !utils::is_integer_between(minute, 0, 59) {
        return Err(TemporalError::field_out_of_range("minute", minute));
    }
    if !utils::is_integer_between(second, 0, 59) {
        return Err(TemporalError::field_out_of_range("second", second));
    }
    if !utils::is_integer_between(millisecond, 0, 999) {
        return Err(TemporalError::field_out_of_range("millisecond", millisecond));
    }
    Ok(hour * MS_PER_HOUR + minute * MS_PER_MINUTE + second * MS_PER_SECOND + millisecond)
}
