//! Gregorian date equations.
//!
//! Conversions between epoch days and proleptic Gregorian year, month and
//! day values based on Cassio Neri and Lorenz Schneider's paper,
//! [Euclidean affine functions and their application to calendar
//! algorithms][eaf-calendar-algorithms].
//!
//! ## Computational calendar
//!
//! The equations work on a "computational" calendar whose years start on
//! March 1st, so that the leap day is always the last day of the year.
//! Values are shifted into the unsigned domain before evaluation.
//!
//! The supported instant range is ±8.64e15 milliseconds, i.e. epoch days
//! within ±100_000_001 (April 19, -271_821 through September 14, 275_760).
//! The inverse equations use a 400 year cycle shift of 3670, which places the
//! Unix epoch roughly in the middle of the `u32` window. The forward
//! equations are evaluated in `i64` with a much larger shift, so any `i32`
//! year is accepted.
//!
//! [eaf-calendar-algorithms]: https://onlinelibrary.wiley.com/doi/full/10.1002/spe.3172

pub const EPOCH_COMPUTATIONAL_RATA_DIE: i32 = 719_468;
pub const DAYS_IN_A_400Y_CYCLE: u32 = 146_097;

const TWO_POWER_THIRTY_NINE: u64 = 549_755_813_888; // 2^39
const TWO_POWER_SIXTEEN: u32 = 65_536; // 2^16

const SHIFT_CONSTANT: i32 = 3670;
const SHIFT_CONSTANT_EXTENDED: i64 = 5_368_710;

/// The largest magnitude of epoch days accepted by [`ymd_from_epoch_days`].
pub const MAX_EPOCH_DAYS: i32 = 100_000_001;

/// Returns the epoch days for a proleptic Gregorian date.
///
/// `month` must be in `1..=12`. `day` is not range checked and days past the
/// end of the month count forward into the following months.
pub const fn epoch_days_from_gregorian_date(year: i32, month: u8, day: u8) -> i64 {
    let shift =
        SHIFT_CONSTANT_EXTENDED * DAYS_IN_A_400Y_CYCLE as i64 + EPOCH_COMPUTATIONAL_RATA_DIE as i64;
    // January and February belong to the previous computational year.
    let j = (month <= 2) as i64;
    let comp_year = (year as i64 + 400 * SHIFT_CONSTANT_EXTENDED - j) as u64;
    let comp_month = month as i64 + 12 * j;
    let comp_day = day as i64 - 1;
    let century = comp_year / 100;
    let y_star = 1461 * comp_year / 4 - century + century / 4;
    let m_star = (979 * comp_month - 2919) / 32;
    (y_star as i64 + m_star + comp_day) - shift
}

/// Returns the `(year, month, day)` for the provided epoch days.
///
/// `epoch_days` must be within [`MAX_EPOCH_DAYS`] of the epoch.
pub const fn ymd_from_epoch_days(epoch_days: i32) -> (i32, u8, u8) {
    let rata_die =
        (epoch_days + EPOCH_COMPUTATIONAL_RATA_DIE + DAYS_IN_A_400Y_CYCLE as i32 * SHIFT_CONSTANT)
            as u32;

    let n_one = 4 * rata_die + 3;
    let century = n_one / DAYS_IN_A_400Y_CYCLE;
    let n_two = (n_one % DAYS_IN_A_400Y_CYCLE) | 3;
    let year_of_century = (376_287_347 * n_two as u64) / TWO_POWER_THIRTY_NINE;
    let day_of_year = (n_two - 1461 * year_of_century as u32) / 4;

    let n_three = 2141 * day_of_year + 197_913;
    let comp_month = n_three / TWO_POWER_SIXTEEN;
    let comp_day = (n_three % TWO_POWER_SIXTEEN) / 2141;

    // Days at or past 306 fall into January or February of the next year.
    let j = (day_of_year >= 306) as u32;
    let year = (100 * century + year_of_century as u32 + j) as i32 - 400 * SHIFT_CONSTANT;
    let month = (comp_month - 12 * j) as u8;
    (year, month, comp_day as u8 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_day_zero() {
        assert_eq!(epoch_days_from_gregorian_date(1970, 1, 1), 0);
        assert_eq!(ymd_from_epoch_days(0), (1970, 1, 1));
    }

    #[test]
    fn range_limits() {
        assert_eq!(ymd_from_epoch_days(-MAX_EPOCH_DAYS), (-271_821, 4, 19));
        assert_eq!(ymd_from_epoch_days(MAX_EPOCH_DAYS), (275_760, 9, 14));
        assert_eq!(
            epoch_days_from_gregorian_date(-271_821, 4, 19),
            -i64::from(MAX_EPOCH_DAYS)
        );
        assert_eq!(
            epoch_days_from_gregorian_date(275_760, 9, 14),
            i64::from(MAX_EPOCH_DAYS)
        );
    }

    #[test]
    fn leap_days() {
        let feb_29 = epoch_days_from_gregorian_date(2016, 2, 29);
        assert_eq!(feb_29, 16_860);
        assert_eq!(ymd_from_epoch_days(feb_29 as i32), (2016, 2, 29));
        assert_eq!(ymd_from_epoch_days(feb_29 as i32 + 1), (2016, 3, 1));
        assert_eq!(ymd_from_epoch_days(-1), (1969, 12, 31));
    }

    #[test]
    fn conversions_agree() {
        let mut days = -800_000;
        while days < 800_000 {
            let (y, m, d) = ymd_from_epoch_days(days);
            assert_eq!(epoch_days_from_gregorian_date(y, m, d), i64::from(days));
            days += 37;
        }
    }
}
