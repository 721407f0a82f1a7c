//! The `TimeZoneProvider` trait and the providers shipped with the crate.

pub use calendrical_provider::provider::{NeverProvider, TimeZoneProvider, UtcOffsetSeconds};
pub use calendrical_provider::TimeZoneProviderError;

#[cfg(feature = "tzdb")]
pub use calendrical_provider::tzif::TzifProvider;
