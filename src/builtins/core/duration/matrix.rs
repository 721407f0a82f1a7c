//! Conversion ratios between duration units.
//!
//! Each table is indexed `[larger][smaller]` by [`TemporalUnit::index`] and
//! holds how many of the smaller unit make up one of the larger unit.

use crate::options::{ConversionAccuracy, TemporalUnit};

type Matrix = [[f64; 9]; 9];

/// Days in the mean Gregorian year of the 400 year cycle.
const DAYS_IN_YEAR_ACCURATE: f64 = 146_097.0 / 400.0;
/// Days in the mean Gregorian month of the 400 year cycle.
const DAYS_IN_MONTH_ACCURATE: f64 = 146_097.0 / 4_800.0;

/// Expands one row from a unit's length in weeks and days. Every unit from
/// days down has a fixed length.
macro_rules! day_based_row {
    ([$($larger:expr),*], $weeks:expr, $days:expr) => {
        [
            $($larger,)*
            $weeks,
            $days,
            $days * 24.0,
            $days * 1_440.0,
            $days * 86_400.0,
            $days * 86_400_000.0,
        ]
    };
}

macro_rules! matrix {
    (
        year: $year_weeks:expr, $year_days:expr;
        quarter: $quarter_weeks:expr, $quarter_days:expr;
        month: $month_weeks:expr, $month_days:expr;
    ) => {
        [
            day_based_row!([1.0, 4.0, 12.0], $year_weeks, $year_days),
            day_based_row!([0.0, 1.0, 3.0], $quarter_weeks, $quarter_days),
            day_based_row!([0.0, 0.0, 1.0], $month_weeks, $month_days),
            day_based_row!([0.0, 0.0, 0.0], 1.0, 7.0),
            [0.0, 0.0, 0.0, 0.0, 1.0, 24.0, 1_440.0, 86_400.0, 86_400_000.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 60.0, 3_600.0, 3_600_000.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 60.0, 60_000.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1_000.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        ]
    };
}

/// A 365 day year and a 30 day month.
const CASUAL: Matrix = matrix! {
    year: 52.0, 365.0;
    quarter: 13.0, 91.0;
    month: 4.0, 30.0;
};

const ACCURATE: Matrix = matrix! {
    year: DAYS_IN_YEAR_ACCURATE / 7.0, DAYS_IN_YEAR_ACCURATE;
    quarter: DAYS_IN_YEAR_ACCURATE / 28.0, DAYS_IN_YEAR_ACCURATE / 4.0;
    month: DAYS_IN_MONTH_ACCURATE / 7.0, DAYS_IN_MONTH_ACCURATE;
};

/// Returns how many `to` units make up one `from` unit.
pub(crate) fn ratio(accuracy: ConversionAccuracy, from: TemporalUnit, to: TemporalUnit) -> f64 {
    let matrix = match accuracy {
        ConversionAccuracy::Casual => &CASUAL,
        ConversionAccuracy::Accurate => &ACCURATE,
    };
    if from >= to {
        matrix[from.index()][to.index()]
    } else {
        1.0 / matrix[to.index()][from.index()]
    }
}
