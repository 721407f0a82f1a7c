//! The ISO 8601 week date calendar.
//!
//! Weeks start on Monday and week 1 of a week year is the week containing
//! January 4th. A week year has 52 or 53 weeks, so the first and last days
//! of a Gregorian year may belong to a neighbouring week year.

use crate::{iso::IsoDate, utils, TemporalError, TemporalResult};

use super::{gregorian::validate_year, CalendarSystem, FieldValues};

/// The ISO week date calendar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IsoWeek;

/// A date in the ISO week date calendar.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsoWeekDate {
    pub week_year: i32,
    /// 1 through 52 or 53.
    pub week_number: u8,
    /// 1 (Monday) through 7 (Sunday).
    pub weekday: u8,
}

impl IsoWeekDate {
    pub(crate) const fn new_unchecked(week_year: i32, week_number: u8, weekday: u8) -> Self {
        Self {
            week_year,
            week_number,
            weekday,
        }
    }
}

impl CalendarSystem for IsoWeek {
    type Fields = IsoWeekDate;

    const FIELD_NAMES: &'static [&'static str] = &["week_year", "week_number", "weekday"];

    const DEFAULT_VALUES: FieldValues = [1970, 1, 1];

    fn validate(values: &FieldValues) -> TemporalResult<IsoWeekDate> {
        let [week_year, week_number, weekday] = *values;
        let week_year = validate_year(week_year)?;
        let weeks = utils::weeks_in_week_year(week_year);
        if !utils::is_integer_between(week_number.into(), 1, weeks.into()) {
            return Err(TemporalError::field_out_of_range(
                "week_number",
                week_number.into(),
            ));
        }
        if !utils::is_integer_between(weekday.into(), 1, 7) {
            return Err(TemporalError::field_out_of_range("weekday", weekday.into()));
        }
        Ok(IsoWeekDate::new_unchecked(
            week_year,
            week_number as u8,
            weekday as u8,
        ))
    }

    fn values(fields: &IsoWeekDate) -> FieldValues {
        [
            fields.week_year,
            fields.week_number.into(),
            fields.weekday.into(),
        ]
    }

    fn from_gregorian(date: IsoDate) -> IsoWeekDate {
        let ordinal = i32::from(date.day_of_year());
        let weekday = date.day_of_week();
        let week_number = (ordinal - i32::from(weekday) + 10).div_euclid(7);

        let (week_year, week_number) = if week_number < 1 {
            let week_year = date.year - 1;
            (week_year, utils::weeks_in_week_year(week_year))
        } else if week_number > i32::from(utils::weeks_in_week_year(date.year)) {
            (date.year + 1, 1)
        } else {
            (date.year, week_number as u8)
        };

        IsoWeekDate::new_unchecked(week_year, week_number, weekday)
    }

    fn to_gregorian(fields: &IsoWeekDate) -> IsoDate {
        let IsoWeekDate {
            week_year,
            week_number,
            weekday,
        } = *fields;
        let weekday_of_jan_4 = i32::from(utils::iso_weekday(week_year, 1, 4));
        let mut ordinal = i32::from(week_number) * 7 + i32::from(weekday) - weekday_of_jan_4 - 3;

        let year = if ordinal < 1 {
            ordinal += i32::from(utils::days_in_year(week_year - 1));
            week_year - 1
        } else if ordinal > i32::from(utils::days_in_year(week_year)) {
            ordinal -= i32::from(utils::days_in_year(week_year));
            week_year + 1
        } else {
            week_year
        };

        let (month, day) = utils::month_day_from_day_of_year(year, ordinal as u16);
        IsoDate::new_unchecked(year, month, day)
    }
}
