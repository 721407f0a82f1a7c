//! The proleptic Gregorian calendar.

use crate::{
    iso::{self, IsoDate},
    utils, TemporalError, TemporalResult,
};

use super::{CalendarSystem, FieldValues};

/// The Gregorian calendar, the identity projection of [`IsoDate`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Gregorian;

/// Validates a year shared by every calendar.
pub(super) fn validate_year(year: i32) -> TemporalResult<i32> {
    if !(-iso::YEAR_LIMIT..=iso::YEAR_LIMIT).contains(&i64::from(year)) {
        return Err(TemporalError::field_out_of_range("year", year.into()));
    }
    Ok(year)
}

impl CalendarSystem for Gregorian {
    type Fields = IsoDate;

    const FIELD_NAMES: &'static [&'static str] = &["year", "month", "day"];

    // The year always comes from the reference date.
    const DEFAULT_VALUES: FieldValues = [1970, 1, 1];

    fn validate(values: &FieldValues) -> TemporalResult<IsoDate> {
        let [year, month, day] = *values;
        let year = validate_year(year)?;
        if !utils::is_integer_between(month.into(), 1, 12) {
            return Err(TemporalError::field_out_of_range("month", month.into()));
        }
        let month = month as u8;
        let days_in_month = utils::iso_days_in_month(year, month);
        if !utils::is_integer_between(day.into(), 1, days_in_month.into()) {
            return Err(TemporalError::field_out_of_range("day", day.into()));
        }
        Ok(IsoDate::new_unchecked(year, month, day as u8))
    }

    fn values(fields: &IsoDate) -> FieldValues {
        [fields.year, fields.month.into(), fields.day.into()]
    }

    #[inline]
    fn from_gregorian(date: IsoDate) -> IsoDate {
        date
    }

    #[inline]
    fn to_gregorian(fields: &IsoDate) -> IsoDate {
        *fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn validates_days_in_month() {
        assert!(Gregorian::validate(&[2016, 2, 29]).is_ok());
        let err = Gregorian::validate(&[2015, 2, 29]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.field(), Some(("day", 29)));
        assert_eq!(
            Gregorian::validate(&[2015, 2, 30]).unwrap_err().field(),
            Some(("day", 30))
        );
        assert_eq!(
            Gregorian::validate(&[2015, 13, 1]).unwrap_err().field(),
            Some(("month", 13))
        );
        assert_eq!(
            Gregorian::validate(&[2015, 0, 1]).unwrap_err().field(),
            Some(("month", 0))
        );
        assert_eq!(
            Gregorian::validate(&[1_000_000, 1, 1]).unwrap_err().field(),
            Some(("year", 1_000_000))
        );
    }
}
