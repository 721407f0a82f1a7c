//! The ordinal date calendar: a year and a one-based day of that year.

use crate::{iso::IsoDate, utils, TemporalError, TemporalResult};

use super::{gregorian::validate_year, CalendarSystem, FieldValues};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ordinal;

/// A date in the ordinal calendar.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrdinalDate {
    pub year: i32,
    /// 1 through 365 or 366.
    pub ordinal: u16,
}

impl OrdinalDate {
    pub(crate) const fn new_unchecked(year: i32, ordinal: u16) -> Self {
        Self { year, ordinal }
    }
}

impl CalendarSystem for Ordinal {
    type Fields = OrdinalDate;

    const FIELD_NAMES: &'static [&'static str] = &["year", "ordinal"];

    const DEFAULT_VALUES: FieldValues = [1970, 1, 0];

    fn validate(values: &FieldValues) -> TemporalResult<OrdinalDate> {
        let [year, ordinal, _] = *values;
        let year = validate_year(year)?;
        if !utils::is_integer_between(ordinal.into(), 1, utils::days_in_year(year).into()) {
            return Err(TemporalError::field_out_of_range("ordinal", ordinal.into()));
        }
        Ok(OrdinalDate::new_unchecked(year, ordinal as u16))
    }

    fn values(fields: &OrdinalDate) -> FieldValues {
        [fields.year, fields.ordinal.into(), 0]
    }

    fn from_gregorian(date: IsoDate) -> OrdinalDate {
        OrdinalDate::new_unchecked(date.year, date.day_of_year())
    }

    fn to_gregorian(fields: &OrdinalDate) -> IsoDate {
        let (month, day) = utils::month_day_from_day_of_year(fields.year, fields.ordinal);
        IsoDate::new_unchecked(fields.year, month, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        let march_1 = |year| Ordinal::from_gregorian(IsoDate::new_unchecked(year, 3, 1));
        assert_eq!(march_1(2016).ordinal, 61);
        assert_eq!(march_1(2015).ordinal, 60);
        assert_eq!(
            Ordinal::to_gregorian(&OrdinalDate::new_unchecked(2016, 366)),
            IsoDate::new_unchecked(2016, 12, 31)
        );
    }

    #[test]
    fn validates_ordinal() {
        assert!(Ordinal::validate(&[2016, 366, 0]).is_ok());
        let err = Ordinal::validate(&[2015, 366, 0]).unwrap_err();
        assert_eq!(err.field(), Some(("ordinal", 366)));
        assert!(Ordinal::validate(&[2015, 0, 0]).is_err());
    }
}
