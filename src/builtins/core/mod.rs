//! The core date time, duration and time zone types.
//!
//! Operations that need time zone data take a provider argument and carry
//! a `_with_provider` suffix.

pub mod calendar;
pub mod timezone;

mod datetime;
mod duration;
mod now;

#[doc(inline)]
pub use calendar::{Calendar, CalendarFields};
#[doc(inline)]
pub use datetime::DateTime;
#[doc(inline)]
pub use duration::{Duration, PartialDuration};
#[doc(inline)]
pub use now::Now;
#[doc(inline)]
pub use timezone::TimeZone;
