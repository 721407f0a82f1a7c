//! This module implements `Duration` along with its conversion methods.
//!
//! A `Duration` maps each of the nine units to an optional, possibly
//! fractional, magnitude. Units are never carried into each other unless
//! [`Duration::normalize`] or [`Duration::shift_to`] is called.

use alloc::format;
use alloc::string::String;
use core::fmt::{self, Write};

use core_maths::CoreFloat;

use crate::{
    options::{ConversionAccuracy, TemporalUnit},
    utils, Sign, TemporalError, TemporalResult,
};

pub(crate) mod matrix;

#[cfg(test)]
mod tests;

/// A `PartialDuration` is a Duration that may have fields not set.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct PartialDuration {
    /// A potentially existent `years` field.
    pub years: Option<f64>,
    /// A potentially existent `quarters` field.
    pub quarters: Option<f64>,
    /// A potentially existent `months` field.
    pub months: Option<f64>,
    /// A potentially existent `weeks` field.
    pub weeks: Option<f64>,
    /// A potentially existent `days` field.
    pub days: Option<f64>,
    /// A potentially existent `hours` field.
    pub hours: Option<f64>,
    /// A potentially existent `minutes` field.
    pub minutes: Option<f64>,
    /// A potentially existent `seconds` field.
    pub seconds: Option<f64>,
    /// A potentially existent `milliseconds` field.
    pub milliseconds: Option<f64>,
}

impl PartialDuration {
    /// Returns whether the `PartialDuration` is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn values(&self) -> [Option<f64>; 9] {
        [
            self.years,
            self.quarters,
            self.months,
            self.weeks,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
            self.milliseconds,
        ]
    }
}

/// A span of time in years, quarters, months, weeks, days, hours, minutes,
/// seconds and milliseconds.
///
/// Each unit is either set to a finite magnitude or unset. Unset units read
/// as zero, but only set units take part in normalization and appear in the
/// output of [`Duration::shift_to`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default)]
pub struct Duration {
    values: [Option<f64>; 9],
    accuracy: ConversionAccuracy,
}

impl PartialEq for Duration {
    /// Durations are equal when they share an accuracy and every unit has
    /// the same magnitude, with unset units equal to zero.
    fn eq(&self, other: &Self) -> bool {
        self.accuracy == other.accuracy
            && TemporalUnit::ALL
                .iter()
                .all(|unit| self.get(*unit) == other.get(*unit))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

// ==== Private Creation methods ====

impl Duration {
    #[inline]
    pub(crate) const fn new_unchecked(
        values: [Option<f64>; 9],
        accuracy: ConversionAccuracy,
    ) -> Self {
        Self { values, accuracy }
    }

    fn with_values(&self, values: [Option<f64>; 9]) -> Self {
        Self::new_unchecked(values, self.accuracy)
    }
}

// ==== Public Duration API ====

impl Duration {
    /// Creates a `Duration` from partial fields, rejecting non-finite values.
    pub fn from_partial(partial: PartialDuration) -> TemporalResult<Self> {
        let values = partial.values();
        if let Some(unit) = TemporalUnit::ALL
            .into_iter()
            .find(|unit| values[unit.index()].is_some_and(|value| !value.is_finite()))
        {
            return Err(TemporalError::r#type()
                .with_message(format!("Duration {} must be finite.", unit.plural())));
        }
        Ok(Self::new_unchecked(values, ConversionAccuracy::default()))
    }

    /// Creates a `Duration` from unit names and values.
    ///
    /// Singular and plural names are accepted, e.g. `"day"` and `"days"`. A
    /// unit named twice takes the last value.
    pub fn try_from_pairs(pairs: &[(&str, f64)]) -> TemporalResult<Self> {
        let mut values = [None; 9];
        for (name, value) in pairs {
            let unit = name.parse::<TemporalUnit>()?;
            if !value.is_finite() {
                return Err(TemporalError::r#type()
                    .with_message(format!("Duration {} must be finite.", unit.plural())));
            }
            values[unit.index()] = Some(*value);
        }
        Ok(Self::new_unchecked(values, ConversionAccuracy::default()))
    }

    /// Creates a `Duration` of a single unit.
    pub fn from_unit(unit: TemporalUnit, value: f64) -> TemporalResult<Self> {
        let mut partial = [None; 9];
        partial[unit.index()] = Some(value);
        if !value.is_finite() {
            return Err(TemporalError::r#type()
                .with_message(format!("Duration {} must be finite.", unit.plural())));
        }
        Ok(Self::new_unchecked(partial, ConversionAccuracy::default()))
    }

    /// Creates a `Duration` of milliseconds.
    pub fn from_millis(milliseconds: i64) -> Self {
        let mut values = [None; 9];
        values[TemporalUnit::Millisecond.index()] = Some(milliseconds as f64);
        Self::new_unchecked(values, ConversionAccuracy::default())
    }

    /// Returns this duration with a different conversion accuracy.
    #[must_use]
    pub fn with_accuracy(&self, accuracy: ConversionAccuracy) -> Self {
        Self::new_unchecked(self.values, accuracy)
    }
}

// ==== Public Duration Getters ====

impl Duration {
    /// Returns the magnitude of `unit`, or zero when it is unset.
    #[inline]
    #[must_use]
    pub fn get(&self, unit: TemporalUnit) -> f64 {
        self.values[unit.index()].unwrap_or(0.0)
    }

    #[inline]
    #[must_use]
    pub fn is_set(&self, unit: TemporalUnit) -> bool {
        self.values[unit.index()].is_some()
    }

    #[inline]
    #[must_use]
    pub const fn accuracy(&self) -> ConversionAccuracy {
        self.accuracy
    }

    /// Returns the set units with their magnitudes, from largest to
    /// smallest.
    pub fn units(&self) -> impl Iterator<Item = (TemporalUnit, f64)> + '_ {
        TemporalUnit::ALL
            .into_iter()
            .filter_map(|unit| self.values[unit.index()].map(|value| (unit, value)))
    }

    #[inline]
    #[must_use]
    pub fn years(&self) -> f64 {
        self.get(TemporalUnit::Year)
    }

    #[inline]
    #[must_use]
    pub fn quarters(&self) -> f64 {
        self.get(TemporalUnit::Quarter)
    }

    #[inline]
    #[must_use]
    pub fn months(&self) -> f64 {
        self.get(TemporalUnit::Month)
    }

    #[inline]
    #[must_use]
    pub fn weeks(&self) -> f64 {
        self.get(TemporalUnit::Week)
    }

    #[inline]
    #[must_use]
    pub fn days(&self) -> f64 {
        self.get(TemporalUnit::Day)
    }

    #[inline]
    #[must_use]
    pub fn hours(&self) -> f64 {
        self.get(TemporalUnit::Hour)
    }

    #[inline]
    #[must_use]
    pub fn minutes(&self) -> f64 {
        self.get(TemporalUnit::Minute)
    }

    #[inline]
    #[must_use]
    pub fn seconds(&self) -> f64 {
        self.get(TemporalUnit::Second)
    }

    #[inline]
    #[must_use]
    pub fn milliseconds(&self) -> f64 {
        self.get(TemporalUnit::Millisecond)
    }
}

// ==== Public Duration methods ====

impl Duration {
    /// Determines the sign from the largest non-zero unit.
    #[must_use]
    pub fn sign(&self) -> Sign {
        self.values
            .iter()
            .flatten()
            .find(|value| **value != 0.0)
            .map_or(Sign::Zero, |value| sign_of(*value))
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.sign() == Sign::Zero
    }

    /// Returns a `Duration` with every set unit negated.
    #[must_use]
    pub fn negated(&self) -> Self {
        // Zero stays positive.
        self.with_values(
            self.values
                .map(|value| value.map(|v| if v == 0.0 { 0.0 } else { -v })),
        )
    }

    /// Adds durations unit by unit. A unit is set in the result when it is
    /// set in either operand.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut values = [None; 9];
        for unit in TemporalUnit::ALL {
            let idx = unit.index();
            if self.values[idx].is_some() || other.values[idx].is_some() {
                values[idx] = Some(self.get(unit) + other.get(unit));
            }
        }
        self.with_values(values)
    }

    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        self.add(&other.negated())
    }

    /// Returns the length of this duration in milliseconds.
    #[must_use]
    pub fn to_millis(&self) -> f64 {
        self.units()
            .map(|(unit, value)| {
                value * matrix::ratio(self.accuracy, unit, TemporalUnit::Millisecond)
            })
            .sum()
    }

    /// Returns the length of this duration in `unit`.
    #[must_use]
    pub fn as_unit(&self, unit: TemporalUnit) -> f64 {
        self.shift_to(&[unit]).get(unit)
    }

    /// Re-expresses this duration in `units`.
    ///
    /// Every requested unit but the smallest receives a whole magnitude; the
    /// smallest requested unit also receives whatever fraction is left over.
    /// Units that were not requested are unset in the result.
    #[must_use]
    pub fn shift_to(&self, units: &[TemporalUnit]) -> Self {
        if units.is_empty() {
            return *self;
        }

        let mut values = self.values;
        let mut built = [None; 9];
        let mut accumulated: [Option<f64>; 9] = [None; 9];
        let mut last_unit = None;

        for unit in TemporalUnit::ALL {
            let idx = unit.index();
            if units.contains(&unit) {
                last_unit = Some(unit);

                // Boil down everything accumulated from larger units.
                let mut own = 0.0;
                for (from, amount) in TemporalUnit::ALL.iter().zip(accumulated.iter_mut()) {
                    if let Some(value) = amount {
                        own += matrix::ratio(self.accuracy, *from, unit) * *value;
                        *amount = Some(0.0);
                    }
                }
                own += values[idx].unwrap_or(0.0);

                let whole = own.trunc();
                accumulated[idx] = Some((own * 1000.0 - whole * 1000.0) / 1000.0);

                // Pull in whole amounts of smaller units.
                let mut whole = whole;
                for down in &TemporalUnit::ALL[idx + 1..] {
                    if let Some(value) = values[down.index()] {
                        let (remaining, to) =
                            convert(self.accuracy, (*down, value), (unit, whole));
                        values[down.index()] = Some(remaining);
                        whole = to;
                    }
                }
                built[idx] = Some(whole);
            } else if let Some(value) = values[idx] {
                accumulated[idx] = Some(value);
            }
        }

        // What is left becomes the fraction of the smallest requested unit.
        if let Some(last) = last_unit {
            let mut total = built[last.index()].unwrap_or(0.0);
            for (unit, amount) in TemporalUnit::ALL.iter().zip(accumulated) {
                match amount {
                    Some(value) if value != 0.0 && *unit == last => total += value,
                    Some(value) if value != 0.0 => {
                        total += value / matrix::ratio(self.accuracy, last, *unit);
                    }
                    _ => {}
                }
            }
            built[last.index()] = Some(total);
        }

        self.with_values(built).normalize()
    }

    /// Carries amounts between adjacent set units, from the smallest unit
    /// up.
    ///
    /// A smaller unit of the opposite sign only borrows a whole larger unit
    /// when it is within one such unit, so `{ months: 1, days: -32 }`
    /// becomes `{ months: 0, days: -2 }`.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let mut values = self.values;
        let mut previous: Option<TemporalUnit> = None;
        for unit in TemporalUnit::ALL.into_iter().rev() {
            let Some(current) = values[unit.index()] else {
                continue;
            };
            if let Some(smaller) = previous {
                let amount = values[smaller.index()].unwrap_or(0.0);
                let (remaining, to) = convert(self.accuracy, (smaller, amount), (unit, current));
                values[smaller.index()] = Some(remaining);
                values[unit.index()] = Some(to);
            }
            previous = Some(unit);
        }
        self.with_values(values)
    }

    /// Returns the ISO 8601 representation, e.g. `"P1Y2M3DT4H5M6.007S"`.
    ///
    /// Only non-zero units are written and seconds are rounded to three
    /// decimal places. A zero duration is `"PT0S"`.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        let mut result = String::from("P");
        // Writing to a `String` cannot fail.
        let _ = self.write_iso(&mut result);
        if result == "P" {
            result.push_str("T0S");
        }
        result
    }

    fn write_iso(&self, f: &mut String) -> fmt::Result {
        if self.years() != 0.0 {
            write!(f, "{}Y", self.years())?;
        }
        if self.months() != 0.0 || self.quarters() != 0.0 {
            write!(f, "{}M", self.months() + self.quarters() * 3.0)?;
        }
        if self.weeks() != 0.0 {
            write!(f, "{}W", self.weeks())?;
        }
        if self.days() != 0.0 {
            write!(f, "{}D", self.days())?;
        }
        if [self.hours(), self.minutes(), self.seconds(), self.milliseconds()]
            .iter()
            .any(|value| *value != 0.0)
        {
            f.push('T');
        }
        if self.hours() != 0.0 {
            write!(f, "{}H", self.hours())?;
        }
        if self.minutes() != 0.0 {
            write!(f, "{}M", self.minutes())?;
        }
        if self.seconds() != 0.0 || self.milliseconds() != 0.0 {
            let seconds = utils::round_to(self.seconds() + self.milliseconds() / 1000.0, 3);
            write!(f, "{seconds}S")?;
        }
        Ok(())
    }
}

fn sign_of(value: f64) -> Sign {
    if value > 0.0 {
        Sign::Positive
    } else if value < 0.0 {
        Sign::Negative
    } else {
        Sign::Zero
    }
}

/// Moves whole `to` units out of the `from` amount, returning the remaining
/// `from` amount and the new `to` amount.
///
/// Amounts of opposite signs borrow a whole unit, rounding away from zero,
/// as long as at most one unit is involved.
fn convert(
    accuracy: ConversionAccuracy,
    from: (TemporalUnit, f64),
    to: (TemporalUnit, f64),
) -> (f64, f64) {
    let (from_unit, from_value) = from;
    let (to_unit, to_value) = to;
    let conversion = matrix::ratio(accuracy, to_unit, from_unit);
    let raw = from_value / conversion;
    let same_sign = sign_of(raw) == sign_of(to_value);
    let added = if !same_sign && to_value != 0.0 && raw.abs() <= 1.0 {
        utils::anti_trunc(raw)
    } else {
        raw.trunc()
    };
    (from_value - added * conversion, to_value + added)
}
