use core::str::FromStr;

use crate::{builtins::TZ_PROVIDER, TemporalError, TemporalResult, TimeZone};

impl TimeZone {
    /// Parses a time zone name.
    ///
    /// With the `sys` feature, `"local"` and `"system"` name the host's time
    /// zone; otherwise they are UTC.
    pub fn try_from_str(source: &str) -> TemporalResult<Self> {
        #[cfg(feature = "sys")]
        let host = crate::SystemHost;
        #[cfg(not(feature = "sys"))]
        let host = ();
        Self::try_from_str_with_host(source, &host, &*TZ_PROVIDER)
    }

    /// Returns the offset of this zone in minutes at an instant.
    pub fn offset_minutes_at(&self, epoch_milliseconds: i64) -> TemporalResult<i32> {
        self.offset_minutes_at_with_provider(epoch_milliseconds, &*TZ_PROVIDER)
    }
}

impl FromStr for TimeZone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_str(s)
    }
}
