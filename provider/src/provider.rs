//! The `TimeZoneProvider` trait.

use alloc::borrow::Cow;

use crate::TimeZoneProviderError;

pub(crate) type TimeZoneProviderResult<T> = Result<T, TimeZoneProviderError>;

/// `UtcOffsetSeconds` represents the amount of seconds we need to add to the UTC to reach the local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct UtcOffsetSeconds(pub i64);

impl UtcOffsetSeconds {
    /// The offset in whole minutes, truncated toward zero.
    #[inline]
    pub fn as_minutes(self) -> i64 {
        self.0 / 60
    }
}

#[cfg(feature = "tzif")]
use tzif::data::{posix::TimeZoneVariantInfo, tzif::LocalTimeTypeRecord};

#[cfg(feature = "tzif")]
impl From<&TimeZoneVariantInfo> for UtcOffsetSeconds {
    fn from(value: &TimeZoneVariantInfo) -> Self {
        // The POSIX tz string stores offsets as negative offsets;
        // i.e. "seconds that must be added to reach UTC"
        Self(-value.offset.0)
    }
}

#[cfg(feature = "tzif")]
impl From<LocalTimeTypeRecord> for UtcOffsetSeconds {
    fn from(value: LocalTimeTypeRecord) -> Self {
        Self(value.utoff.0)
    }
}

/// The `TimeZoneProvider` trait provides methods required for a provider
/// to implement in order to source time zone data from that provider.
pub trait TimeZoneProvider {
    /// Returns the canonical casing of a time zone identifier, or a range
    /// error when the identifier is unknown.
    fn normalize_identifier(&self, ident: &'_ [u8]) -> Result<Cow<'_, str>, TimeZoneProviderError>;

    /// Returns the UTC offset of `identifier` at `epoch_seconds`.
    fn get_named_tz_offset_seconds(
        &self,
        identifier: &str,
        epoch_seconds: i64,
    ) -> Result<UtcOffsetSeconds, TimeZoneProviderError>;
}

impl<P: TimeZoneProvider + ?Sized> TimeZoneProvider for &P {
    fn normalize_identifier(&self, ident: &'_ [u8]) -> TimeZoneProviderResult<Cow<'_, str>> {
        (**self).normalize_identifier(ident)
    }

    fn get_named_tz_offset_seconds(
        &self,
        identifier: &str,
        epoch_seconds: i64,
    ) -> TimeZoneProviderResult<UtcOffsetSeconds> {
        (**self).get_named_tz_offset_seconds(identifier, epoch_seconds)
    }
}

/// A provider without any named time zones.
///
/// Useful for callers that only deal in fixed offsets.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverProvider;

impl TimeZoneProvider for NeverProvider {
    fn normalize_identifier(&self, _ident: &'_ [u8]) -> TimeZoneProviderResult<Cow<'_, str>> {
        Err(TimeZoneProviderError::Range(
            "NeverProvider does not support named time zones.".into(),
        ))
    }

    fn get_named_tz_offset_seconds(
        &self,
        _: &str,
        _: i64,
    ) -> TimeZoneProviderResult<UtcOffsetSeconds> {
        Err(TimeZoneProviderError::Range(
            "NeverProvider does not support named time zones.".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_minutes_truncate() {
        assert_eq!(UtcOffsetSeconds(-18_000).as_minutes(), -300);
        // Local mean time of New York.
        assert_eq!(UtcOffsetSeconds(-17_762).as_minutes(), -296);
        assert_eq!(UtcOffsetSeconds(19_800).as_minutes(), 330);
    }

    #[test]
    fn never_provider_rejects() {
        assert!(NeverProvider.normalize_identifier(b"UTC").is_err());
        assert!(matches!(
            NeverProvider.get_named_tz_offset_seconds("UTC", 0),
            Err(TimeZoneProviderError::Range(_))
        ));
    }
}
