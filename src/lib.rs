//! The `calendrical` crate converts between epoch timestamps, calendar
//! fields and local wall clock time, and performs calendar-aware arithmetic
//! on spans of time.
//!
//! ```rust
//! use calendrical::{
//!     options::{ConversionAccuracy, TemporalUnit},
//!     partial::{PartialDateTime, PartialGregorianDate},
//!     provider::NeverProvider,
//!     DateTime, Duration, FixedClock, TimeZone,
//! };
//!
//! let date = |year, month, day| {
//!     let partial = PartialDateTime::new().with_date(
//!         PartialGregorianDate::new()
//!             .with_year(Some(year))
//!             .with_month(Some(month))
//!             .with_day(Some(day)),
//!     );
//!     DateTime::from_partial_with_provider(partial, TimeZone::utc(), &FixedClock(0), &NeverProvider)
//!         .unwrap()
//! };
//!
//! let start = date(2017, 1, 31);
//! let next = start
//!     .add_with_provider(&Duration::try_from_pairs(&[("months", 1.0)]).unwrap(), &NeverProvider)
//!     .unwrap();
//! assert_eq!((next.month(), next.day()), (2, 28));
//!
//! let span = date(2016, 3, 3)
//!     .diff_with_provider(
//!         &date(2010, 3, 14),
//!         &[TemporalUnit::Year, TemporalUnit::Day],
//!         ConversionAccuracy::Casual,
//!         &NeverProvider,
//!     )
//!     .unwrap();
//! assert_eq!(span.to_iso_string(), "P5Y355D");
//! ```
//!
//! A [`DateTime`] is an instant observed in a [`TimeZone`]. Its fields can
//! be read in the Gregorian, ISO week and ordinal calendars, and every
//! operation returns a new value.
//!
//! Operations that may consult time zone data take a
//! [`TimeZoneProvider`][provider::TimeZoneProvider] and end in
//! `_with_provider`. With the `compiled_data` feature, shorter variants use
//! a provider backed by a bundled copy of the IANA database.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    // Currently throws a false positive regarding dependencies that are only used in benchmarks.
    unused_crate_dependencies,
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::cognitive_complexity,
    clippy::missing_errors_doc,
    clippy::let_unit_value,
    clippy::option_if_let_else,

    // It may be worth to look if we can fix the issues highlighted by these lints.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod host;
pub mod iso;
pub mod options;
pub mod provider;

#[cfg(feature = "sys")]
pub(crate) mod sys;

mod builtins;
mod fields;

#[doc(hidden)]
pub(crate) mod utils;

#[doc(inline)]
pub use error::TemporalError;

/// The `calendrical` result type
pub type TemporalResult<T> = Result<T, TemporalError>;

pub mod partial {
    //! Partial date time and duration records.
    //!
    //! Partial records name a subset of fields. They are used to create a
    //! `DateTime` from fields and to replace fields of an existing one.
    pub use crate::builtins::core::PartialDuration;
    pub use crate::fields::{
        PartialDate, PartialDateTime, PartialGregorianDate, PartialIsoWeekDate,
        PartialOrdinalDate, PartialTime,
    };
}

pub mod calendar {
    //! The built-in calendars and their field records.
    pub use crate::builtins::core::calendar::{
        Calendar, CalendarFields, CalendarSystem, FieldValues, Gregorian, IsoWeek, IsoWeekDate,
        Ordinal, OrdinalDate,
    };
}

pub use crate::builtins::{Calendar, DateTime, Duration, Now, TimeZone};
pub use crate::host::FixedClock;

#[cfg(feature = "compiled_data")]
pub use crate::builtins::TZ_PROVIDER;

#[cfg(feature = "sys")]
pub use crate::sys::{Calendrical, SystemHost};

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

// Relevant numeric constants
/// Milliseconds per day constant: 8.64e+7
pub const MS_PER_DAY: u32 = 24 * 60 * 60 * 1000;
/// Max instant millisecond constant
#[doc(hidden)]
pub(crate) const MS_MAX_INSTANT: i64 = MS_PER_DAY as i64 * 100_000_000;
