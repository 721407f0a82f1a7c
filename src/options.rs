//! Native implementation of the `calendrical` options.
//!
//! These options are shared by the duration and date time arithmetic.

use core::{fmt, str::FromStr};

use crate::TemporalError;

/// The units of a duration, and of date time truncation and difference.
///
/// Units are ordered by size: `TemporalUnit::Millisecond` is the smallest
/// and `TemporalUnit::Year` the largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemporalUnit {
    /// The `Millisecond` unit
    Millisecond = 0,
    /// The `Second` unit
    Second,
    /// The `Minute` unit
    Minute,
    /// The `Hour` unit
    Hour,
    /// The `Day` unit
    Day,
    /// The `Week` unit
    Week,
    /// The `Month` unit
    Month,
    /// The `Quarter` unit
    Quarter,
    /// The `Year` unit
    Year,
}

impl TemporalUnit {
    /// All units from largest to smallest.
    ///
    /// This order drives every carry between units.
    pub const ALL: [TemporalUnit; 9] = [
        Self::Year,
        Self::Quarter,
        Self::Month,
        Self::Week,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
    ];

    /// The position of this unit in [`TemporalUnit::ALL`].
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        Self::Year as usize - self as usize
    }

    #[inline]
    #[must_use]
    pub fn is_time_unit(&self) -> bool {
        use TemporalUnit::{Hour, Millisecond, Minute, Second};
        matches!(self, Hour | Minute | Second | Millisecond)
    }

    /// The plural name of this unit, e.g. `"days"`.
    #[must_use]
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Year => "years",
            Self::Quarter => "quarters",
            Self::Month => "months",
            Self::Week => "weeks",
            Self::Day => "days",
            Self::Hour => "hours",
            Self::Minute => "minutes",
            Self::Second => "seconds",
            Self::Millisecond => "milliseconds",
        }
    }
}

/// A parsing error for `TemporalUnit`
#[derive(Debug, Clone, Copy)]
pub struct ParseTemporalUnitError;

impl fmt::Display for ParseTemporalUnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid TemporalUnit")
    }
}

impl From<ParseTemporalUnitError> for TemporalError {
    fn from(value: ParseTemporalUnitError) -> Self {
        TemporalError::unit().with_message(alloc::format!("{value}"))
    }
}

impl FromStr for TemporalUnit {
    type Err = ParseTemporalUnitError;

    /// Parses singular or plural unit names, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let singular = s
            .len()
            .checked_sub(1)
            .filter(|last| s.as_bytes()[*last].eq_ignore_ascii_case(&b's'))
            .map_or(s, |last| &s[..last]);
        Self::ALL
            .into_iter()
            .find(|unit| {
                let plural = unit.plural();
                plural[..plural.len() - 1].eq_ignore_ascii_case(singular)
            })
            .ok_or(ParseTemporalUnitError)
    }
}

impl fmt::Display for TemporalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = self.plural();
        plural[..plural.len() - 1].fmt(f)
    }
}

/// The ratios used when converting between duration units.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionAccuracy {
    /// A year has 365 days and a month 30 days.
    #[default]
    Casual,
    /// Years and months use their mean length over a 400 year Gregorian cycle.
    Accurate,
}

/// A parsing error for `ConversionAccuracy`
#[derive(Debug, Clone, Copy)]
pub struct ParseConversionAccuracyError;

impl fmt::Display for ParseConversionAccuracyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid ConversionAccuracy")
    }
}

impl FromStr for ConversionAccuracy {
    type Err = ParseConversionAccuracyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "casual" => Ok(Self::Casual),
            "longterm" | "accurate" => Ok(Self::Accurate),
            _ => Err(ParseConversionAccuracyError),
        }
    }
}

impl fmt::Display for ConversionAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Casual => "casual",
            Self::Accurate => "accurate",
        }
        .fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn unit_order() {
        assert!(TemporalUnit::Year > TemporalUnit::Quarter);
        assert!(TemporalUnit::Week > TemporalUnit::Day);
        for (idx, unit) in TemporalUnit::ALL.iter().enumerate() {
            assert_eq!(unit.index(), idx);
        }
    }

    #[test]
    fn parse_unit_aliases() {
        assert_eq!("day".parse::<TemporalUnit>().unwrap(), TemporalUnit::Day);
        assert_eq!("days".parse::<TemporalUnit>().unwrap(), TemporalUnit::Day);
        assert_eq!("Years".parse::<TemporalUnit>().unwrap(), TemporalUnit::Year);
        assert_eq!(
            "MILLISECOND".parse::<TemporalUnit>().unwrap(),
            TemporalUnit::Millisecond
        );
        assert_eq!(
            "quarters".parse::<TemporalUnit>().unwrap(),
            TemporalUnit::Quarter
        );
        assert!("fortnight".parse::<TemporalUnit>().is_err());
        assert!("".parse::<TemporalUnit>().is_err());
        assert!("s".parse::<TemporalUnit>().is_err());
        assert!("dayss".parse::<TemporalUnit>().is_err());
    }

    #[test]
    fn unit_display() {
        assert_eq!(TemporalUnit::Millisecond.to_string(), "millisecond");
        assert_eq!(TemporalUnit::Quarter.plural(), "quarters");
    }

    #[test]
    fn parse_unit_error_kind() {
        let err = TemporalError::from("eon".parse::<TemporalUnit>().unwrap_err());
        assert_eq!(err.kind(), crate::error::ErrorKind::Unit);
    }
}
