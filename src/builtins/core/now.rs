//! The current instant, read through host hooks.

use crate::{
    builtins::core::{timezone::TimeZone, DateTime},
    host::HostHooks,
    provider::TimeZoneProvider,
    TemporalResult,
};

/// Access to the current instant and time zone of a host.
///
/// ```rust
/// use calendrical::{provider::NeverProvider, FixedClock, Now};
///
/// let now = Now::new(FixedClock(1_000));
/// let dt = now.datetime_with_provider(None, &NeverProvider).unwrap();
/// assert_eq!(dt.epoch_milliseconds(), 1_000);
/// assert_eq!(dt.second(), 1);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Now<H: HostHooks> {
    host_hooks: H,
}

impl<H: HostHooks> Now<H> {
    pub const fn new(host_hooks: H) -> Self {
        Self { host_hooks }
    }

    /// Returns the current instant in milliseconds since the Unix epoch.
    pub fn epoch_milliseconds(&self) -> TemporalResult<i64> {
        self.host_hooks.get_system_epoch_milliseconds()
    }

    /// Returns the host's time zone.
    pub fn time_zone_with_provider(
        &self,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<TimeZone> {
        self.host_hooks.get_system_time_zone(provider)
    }

    /// Returns the current `DateTime` in `time_zone`, or in the host's time
    /// zone when none is given.
    ///
    /// The time zone is resolved before the clock is read.
    pub fn datetime_with_provider(
        &self,
        time_zone: Option<TimeZone>,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<DateTime> {
        let time_zone = match time_zone {
            Some(time_zone) => time_zone,
            None => self.time_zone_with_provider(provider)?,
        };
        let epoch_milliseconds = self.epoch_milliseconds()?;
        DateTime::try_new_with_provider(epoch_milliseconds, time_zone, provider)
    }
}
