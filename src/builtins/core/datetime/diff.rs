//! Calendar-aware difference between two `DateTime`s.

use crate::{
    builtins::core::{DateTime, Duration},
    options::{ConversionAccuracy, TemporalUnit},
    provider::TimeZoneProvider,
    TemporalError, TemporalResult,
};

const CALENDAR_UNITS: [TemporalUnit; 5] = [
    TemporalUnit::Year,
    TemporalUnit::Quarter,
    TemporalUnit::Month,
    TemporalUnit::Week,
    TemporalUnit::Day,
];

impl DateTime {
    /// Returns `self - other` expressed in `units`.
    ///
    /// Calendar units are counted by stepping from the earlier date time
    /// with [`DateTime::add_with_provider`], so months and years follow the
    /// calendar rather than a fixed length. Whatever remains is expressed in
    /// the requested time units, or as a fraction of the smallest requested
    /// calendar unit when no time unit was asked for.
    ///
    /// The result is negative when `other` is later than `self`.
    pub fn diff_with_provider(
        &self,
        other: &Self,
        units: &[TemporalUnit],
        accuracy: ConversionAccuracy,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Duration> {
        if units.is_empty() {
            return Err(TemporalError::unit().with_message("At least one unit is required."));
        }
        let other_is_later = other.epoch_milliseconds() > self.epoch_milliseconds();
        let (earlier, later) = if other_is_later {
            (self, other)
        } else {
            (other, self)
        };
        let result = difference(earlier, later, units, accuracy, provider)?;
        Ok(if other_is_later {
            result.negated()
        } else {
            result
        })
    }
}

/// Counts whole calendar units from `earlier` towards `later`, returning
/// the cursor reached, the counts, the first overshooting date time and
/// the smallest calendar unit counted.
fn calendar_difference(
    earlier: &DateTime,
    later: &DateTime,
    units: &[TemporalUnit],
    provider: &impl TimeZoneProvider,
) -> TemporalResult<(DateTime, [Option<f64>; 9], DateTime, Option<TemporalUnit>)> {
    let mut results = [None; 9];
    let mut cursor = earlier.clone();
    let mut high_water = earlier.clone();
    let mut lowest = None;

    let step = |results: &[Option<f64>; 9]| {
        earlier.add_with_provider(
            &Duration::new_unchecked(*results, ConversionAccuracy::Casual),
            provider,
        )
    };

    for unit in CALENDAR_UNITS.into_iter().filter(|unit| units.contains(unit)) {
        lowest = Some(unit);
        let idx = unit.index();
        results[idx] = Some(estimate(unit, &cursor, later) as f64);

        high_water = step(&results)?;
        if high_water.cmp_instant(later).is_gt() {
            results[idx] = results[idx].map(|count| count - 1.0);
            cursor = step(&results)?;
            if cursor.cmp_instant(later).is_gt() {
                high_water = cursor;
                results[idx] = results[idx].map(|count| count - 1.0);
                cursor = step(&results)?;
            }
        } else {
            cursor = high_water.clone();
        }
    }

    Ok((cursor, results, high_water, lowest))
}

/// A first estimate of how many `unit`s separate two date times, which may
/// overshoot by up to two.
fn estimate(unit: TemporalUnit, cursor: &DateTime, later: &DateTime) -> i64 {
    let years = i64::from(later.year()) - i64::from(cursor.year());
    let days = later.iso_date().to_epoch_days() - cursor.iso_date().to_epoch_days();
    match unit {
        TemporalUnit::Year => years,
        TemporalUnit::Quarter => {
            i64::from(later.quarter()) - i64::from(cursor.quarter()) + years * 4
        }
        TemporalUnit::Month => i64::from(later.month()) - i64::from(cursor.month()) + years * 12,
        TemporalUnit::Week => days / 7,
        _ => days,
    }
}

fn difference(
    earlier: &DateTime,
    later: &DateTime,
    units: &[TemporalUnit],
    accuracy: ConversionAccuracy,
    provider: &impl TimeZoneProvider,
) -> TemporalResult<Duration> {
    let (cursor, mut results, mut high_water, lowest) =
        calendar_difference(earlier, later, units, provider)?;
    let remaining = later.epoch_milliseconds() - cursor.epoch_milliseconds();

    let mut time_units = units
        .iter()
        .copied()
        .filter(TemporalUnit::is_time_unit)
        .peekable();

    if time_units.peek().is_none() {
        let Some(lowest) = lowest else {
            return Ok(Duration::new_unchecked(results, accuracy));
        };
        if high_water.cmp_instant(later).is_lt() {
            high_water = cursor.add_with_provider(&Duration::from_unit(lowest, 1.0)?, provider)?;
        }
        let span = high_water.epoch_milliseconds() - cursor.epoch_milliseconds();
        if span != 0 {
            let idx = lowest.index();
            results[idx] = Some(results[idx].unwrap_or(0.0) + remaining as f64 / span as f64);
        }
        return Ok(Duration::new_unchecked(results, accuracy));
    }

    let time_units: alloc::vec::Vec<TemporalUnit> = time_units.collect();
    let calendar = Duration::new_unchecked(results, accuracy);
    Ok(Duration::from_millis(remaining)
        .with_accuracy(accuracy)
        .shift_to(&time_units)
        .add(&calendar))
}
