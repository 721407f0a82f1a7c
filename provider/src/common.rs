//! POSIX TZ string evaluation.
//!
//! TZif data only lists transitions up to the year it was compiled for
//! (usually 2037). Later instants are resolved with the POSIX TZ string in
//! the TZif footer, e.g. `EST5EDT,M3.2.0,M11.1.0`.

use tzif::data::posix::{PosixTzString, TransitionDate, TransitionDay};

use crate::{provider::UtcOffsetSeconds, utils};

/// The DST start and end instants of a POSIX TZ string for a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DstTransitionInfoForYear {
    pub(crate) dst_start_seconds: i64,
    pub(crate) dst_end_seconds: i64,
    pub(crate) std_offset: UtcOffsetSeconds,
    pub(crate) dst_offset: UtcOffsetSeconds,
}

impl DstTransitionInfoForYear {
    /// Whether `seconds` falls inside daylight saving time.
    ///
    /// Southern hemisphere zones start DST late in the year and end it early
    /// in the year, so the DST range wraps around the year boundary.
    pub(crate) fn contains(&self, seconds: i64) -> bool {
        if self.dst_start_seconds <= self.dst_end_seconds {
            (self.dst_start_seconds..self.dst_end_seconds).contains(&seconds)
        } else {
            !(self.dst_end_seconds..self.dst_start_seconds).contains(&seconds)
        }
    }
}

/// Resolves the UTC offset of a POSIX TZ string at `seconds`.
pub(crate) fn resolve_posix_tz_string(posix: &PosixTzString, seconds: i64) -> UtcOffsetSeconds {
    let std_offset = UtcOffsetSeconds::from(&posix.std_info);
    let Some(dst) = &posix.dst_info else {
        // Regardless of the time, there is one variant and we can return it.
        return std_offset;
    };
    let dst_offset = UtcOffsetSeconds::from(&dst.variant_info);

    // The rule year is the year in local standard time.
    let year = utils::year_from_epoch_seconds(seconds + std_offset.0);
    let info = DstTransitionInfoForYear {
        dst_start_seconds: calculate_transition_seconds_for_year(year, dst.start_date, std_offset),
        dst_end_seconds: calculate_transition_seconds_for_year(year, dst.end_date, dst_offset),
        std_offset,
        dst_offset,
    };

    #[cfg(feature = "log")]
    log::trace!("resolved POSIX rule for {year}: {info:?}");

    if info.contains(seconds) {
        info.dst_offset
    } else {
        info.std_offset
    }
}

/// Returns the epoch seconds of a POSIX transition date in `year`.
///
/// The transition time is expressed in local time of the offset in effect
/// before the transition, which is provided as `offset`.
pub(crate) fn calculate_transition_seconds_for_year(
    year: i32,
    transition_date: TransitionDate,
    offset: UtcOffsetSeconds,
) -> i64 {
    let year_epoch_days = utils::epoch_days_for_year(year);
    let is_leap = utils::is_leap(year);

    // Zero-based day of the year of the transition.
    let days = match transition_date.day {
        // `Jn`: 1-based, February 29th is never counted.
        TransitionDay::NoLeap(day) if day > 59 => i64::from(day) - 1 + i64::from(is_leap),
        TransitionDay::NoLeap(day) => i64::from(day) - 1,
        // `n`: 0-based, February 29th is counted.
        TransitionDay::WithLeap(day) => i64::from(day),
        TransitionDay::Mwd(month, week, day) => {
            let month = month.clamp(1, 12) as u8;
            let days_to_month = i64::from(utils::month_to_day(month - 1, is_leap));
            let days_in_month = i64::from(utils::iso_days_in_month(year, month));
            let first_weekday =
                i64::from(utils::epoch_days_to_day_of_week(year_epoch_days + days_to_month));

            // Zero-based day of month of the first `day` weekday.
            let first = (i64::from(day) - first_weekday).rem_euclid(7);
            let mut day_of_month = first + (i64::from(week) - 1) * 7;
            // Week 5 means "the last such weekday of the month".
            while day_of_month >= days_in_month {
                day_of_month -= 7;
            }
            days_to_month + day_of_month
        }
    };

    (year_epoch_days + days) * utils::SECONDS_PER_DAY + transition_date.time.0 - offset.0
}

#[cfg(test)]
mod tests {
    use tzif::data::time::Seconds;

    use super::*;

    fn date(day: TransitionDay) -> TransitionDate {
        TransitionDate {
            day,
            time: Seconds(7200),
        }
    }

    #[test]
    fn second_sunday_of_march() {
        // EST5EDT,M3.2.0: 2017-03-12T02:00 local standard time.
        let seconds = calculate_transition_seconds_for_year(
            2017,
            date(TransitionDay::Mwd(3, 2, 0)),
            UtcOffsetSeconds(-18_000),
        );
        assert_eq!(seconds, 1_489_302_000);
    }

    #[test]
    fn last_sunday_of_october() {
        // M10.5.0 in 2024 is October 27th.
        let seconds = calculate_transition_seconds_for_year(
            2024,
            date(TransitionDay::Mwd(10, 5, 0)),
            UtcOffsetSeconds(0),
        );
        let expected = utils::epoch_days_from_gregorian_date(2024, 10, 27) * 86_400 + 7200;
        assert_eq!(seconds, expected);
    }

    #[test]
    fn julian_days() {
        let no_leap = calculate_transition_seconds_for_year(
            2016,
            date(TransitionDay::NoLeap(60)),
            UtcOffsetSeconds(0),
        );
        let expected = utils::epoch_days_from_gregorian_date(2016, 3, 1) * 86_400 + 7200;
        assert_eq!(no_leap, expected);

        let with_leap = calculate_transition_seconds_for_year(
            2016,
            date(TransitionDay::WithLeap(59)),
            UtcOffsetSeconds(0),
        );
        let expected = utils::epoch_days_from_gregorian_date(2016, 2, 29) * 86_400 + 7200;
        assert_eq!(with_leap, expected);
    }

    #[test]
    fn southern_hemisphere_wraps() {
        let info = DstTransitionInfoForYear {
            dst_start_seconds: 300,
            dst_end_seconds: 100,
            std_offset: UtcOffsetSeconds(36_000),
            dst_offset: UtcOffsetSeconds(39_600),
        };
        assert!(info.contains(50));
        assert!(!info.contains(200));
        assert!(info.contains(400));
    }
}
