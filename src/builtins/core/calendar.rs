//! This module implements the calendar trait and the built-in calendars.
//!
//! A calendar is a stateless strategy over one shape of date fields. Every
//! calendar converts through the proleptic Gregorian [`IsoDate`], so a
//! `DateTime` only ever stores Gregorian fields and projects them into other
//! calendars on demand.
//!
//! The built-in calendars are:
//!   - [`Gregorian`]: year, month and day.
//!   - [`IsoWeek`]: ISO week year, week number and weekday.
//!   - [`Ordinal`]: year and day of the year.

use core::{fmt, str::FromStr};

use crate::{iso::IsoDate, TemporalError, TemporalResult};

mod gregorian;
mod iso_week;
mod ordinal;

pub use gregorian::Gregorian;
pub use iso_week::{IsoWeek, IsoWeekDate};
pub use ordinal::{Ordinal, OrdinalDate};

/// Raw field values of a calendar, from most to least significant.
///
/// Calendars with fewer than three fields leave the trailing slots at zero.
pub type FieldValues = [i32; 3];

/// The capabilities shared by every calendar.
pub trait CalendarSystem {
    /// The resolved fields of this calendar.
    type Fields: Copy + fmt::Debug + PartialEq;

    /// The field names, from most to least significant.
    const FIELD_NAMES: &'static [&'static str];

    /// Values used for unspecified fields that are less significant than a
    /// specified field.
    const DEFAULT_VALUES: FieldValues;

    /// Validates raw field values, returning the first field that is out of
    /// range together with its value.
    fn validate(values: &FieldValues) -> TemporalResult<Self::Fields>;

    /// Returns the raw values of resolved fields.
    fn values(fields: &Self::Fields) -> FieldValues;

    fn from_gregorian(date: IsoDate) -> Self::Fields;

    fn to_gregorian(fields: &Self::Fields) -> IsoDate;

    fn fields_equal(one: &Self::Fields, two: &Self::Fields) -> bool {
        one == two
    }
}

/// The built-in calendars.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Calendar {
    #[default]
    Gregorian,
    IsoWeek,
    Ordinal,
}

impl Calendar {
    /// Returns the identifier of this calendar.
    #[must_use]
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Gregorian => "gregorian",
            Self::IsoWeek => "iso-week",
            Self::Ordinal => "ordinal",
        }
    }

    /// Returns the field names of this calendar.
    #[must_use]
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::Gregorian => Gregorian::FIELD_NAMES,
            Self::IsoWeek => IsoWeek::FIELD_NAMES,
            Self::Ordinal => Ordinal::FIELD_NAMES,
        }
    }

    #[must_use]
    pub fn default_values(&self) -> FieldValues {
        match self {
            Self::Gregorian => Gregorian::DEFAULT_VALUES,
            Self::IsoWeek => IsoWeek::DEFAULT_VALUES,
            Self::Ordinal => Ordinal::DEFAULT_VALUES,
        }
    }

    /// Validates raw field values for this calendar.
    pub fn validate(&self, values: &FieldValues) -> TemporalResult<CalendarFields> {
        match self {
            Self::Gregorian => Gregorian::validate(values).map(CalendarFields::Gregorian),
            Self::IsoWeek => IsoWeek::validate(values).map(CalendarFields::IsoWeek),
            Self::Ordinal => Ordinal::validate(values).map(CalendarFields::Ordinal),
        }
    }

    /// Projects a Gregorian date into this calendar.
    #[must_use]
    pub fn from_gregorian(&self, date: IsoDate) -> CalendarFields {
        match self {
            Self::Gregorian => CalendarFields::Gregorian(Gregorian::from_gregorian(date)),
            Self::IsoWeek => CalendarFields::IsoWeek(IsoWeek::from_gregorian(date)),
            Self::Ordinal => CalendarFields::Ordinal(Ordinal::from_gregorian(date)),
        }
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.identifier().fmt(f)
    }
}

impl FromStr for Calendar {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Gregorian, Self::IsoWeek, Self::Ordinal]
            .into_iter()
            .find(|calendar| calendar.identifier().eq_ignore_ascii_case(s))
            .ok_or(TemporalError::r#type().with_message("Unknown calendar identifier."))
    }
}

/// The resolved fields of any of the built-in calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarFields {
    Gregorian(IsoDate),
    IsoWeek(IsoWeekDate),
    Ordinal(OrdinalDate),
}

impl CalendarFields {
    #[must_use]
    pub fn calendar(&self) -> Calendar {
        match self {
            Self::Gregorian(_) => Calendar::Gregorian,
            Self::IsoWeek(_) => Calendar::IsoWeek,
            Self::Ordinal(_) => Calendar::Ordinal,
        }
    }

    /// Returns the raw values of these fields.
    #[must_use]
    pub fn values(&self) -> FieldValues {
        match self {
            Self::Gregorian(fields) => Gregorian::values(fields),
            Self::IsoWeek(fields) => IsoWeek::values(fields),
            Self::Ordinal(fields) => Ordinal::values(fields),
        }
    }

    #[must_use]
    pub fn to_gregorian(&self) -> IsoDate {
        match self {
            Self::Gregorian(fields) => Gregorian::to_gregorian(fields),
            Self::IsoWeek(fields) => IsoWeek::to_gregorian(fields),
            Self::Ordinal(fields) => Ordinal::to_gregorian(fields),
        }
    }

    /// Whether both fields belong to the same calendar and denote the same
    /// date.
    #[must_use]
    pub fn fields_equal(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Gregorian(one), Self::Gregorian(two)) => Gregorian::fields_equal(one, two),
            (Self::IsoWeek(one), Self::IsoWeek(two)) => IsoWeek::fields_equal(one, two),
            (Self::Ordinal(one), Self::Ordinal(two)) => Ordinal::fields_equal(one, two),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils;

    #[test]
    fn every_calendar_round_trips() {
        let calendars = [Calendar::Gregorian, Calendar::IsoWeek, Calendar::Ordinal];
        // Every day from 1999 through 2030.
        let start = utils::epoch_days_from_gregorian_date(1999, 1, 1);
        let end = utils::epoch_days_from_gregorian_date(2031, 1, 1);
        for days in start..end {
            let date = IsoDate::from_epoch_days(days);
            for calendar in calendars {
                let fields = calendar.from_gregorian(date);
                assert_eq!(fields.calendar(), calendar);
                assert_eq!(fields.to_gregorian(), date, "{calendar}: {fields:?}");
                let validated = calendar.validate(&fields.values()).unwrap();
                assert!(validated.fields_equal(&fields));
            }
        }
    }

    #[test]
    fn round_trips_in_the_distant_past() {
        for year in [-271_820, -1, 0, 1, 1600] {
            for (month, day) in [(1, 1), (2, 28), (12, 31)] {
                let date = IsoDate::new_unchecked(year, month, day);
                for calendar in [Calendar::Gregorian, Calendar::IsoWeek, Calendar::Ordinal] {
                    assert_eq!(calendar.from_gregorian(date).to_gregorian(), date);
                }
            }
        }
    }

    #[test]
    fn parse_identifiers() {
        assert_eq!("gregorian".parse::<Calendar>().unwrap(), Calendar::Gregorian);
        assert_eq!("ISO-WEEK".parse::<Calendar>().unwrap(), Calendar::IsoWeek);
        assert!("julian".parse::<Calendar>().is_err());
    }

    #[test]
    fn mismatched_calendars_are_not_equal() {
        let date = IsoDate::new_unchecked(2016, 1, 1);
        let gregorian = Calendar::Gregorian.from_gregorian(date);
        let ordinal = Calendar::Ordinal.from_gregorian(date);
        assert!(!gregorian.fields_equal(&ordinal));
    }
}
