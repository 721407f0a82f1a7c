//! Trait definitions for accessing values from the host environment.
//!
//! The engine never reads a global clock or zone. Callers that construct
//! date times relative to "now", or that resolve the `"system"` zone, pass a
//! host implementing these traits.

use crate::{provider::TimeZoneProvider, TemporalResult, TimeZone};

/// The `HostClock` trait defines an accessor to the host's clock.
pub trait HostClock {
    /// Returns the current instant in milliseconds since the Unix epoch.
    fn get_host_epoch_milliseconds(&self) -> TemporalResult<i64>;
}

/// The `HostTimeZone` trait defines the host's time zone.
pub trait HostTimeZone {
    fn get_host_time_zone(&self, provider: &impl TimeZoneProvider) -> TemporalResult<TimeZone>;
}

/// `HostHooks` marks whether a trait implements the required host hooks with some
/// system methods.
pub trait HostHooks: HostClock + HostTimeZone {
    fn get_system_epoch_milliseconds(&self) -> TemporalResult<i64> {
        self.get_host_epoch_milliseconds()
    }

    fn get_system_time_zone(&self, provider: &impl TimeZoneProvider) -> TemporalResult<TimeZone> {
        self.get_host_time_zone(provider)
    }
}

// The empty host is stuck at the epoch in UTC.

impl HostClock for () {
    fn get_host_epoch_milliseconds(&self) -> TemporalResult<i64> {
        Ok(0)
    }
}

impl HostTimeZone for () {
    fn get_host_time_zone(&self, _: &impl TimeZoneProvider) -> TemporalResult<TimeZone> {
        Ok(TimeZone::utc())
    }
}

impl HostHooks for () {}

/// A host with a clock fixed at one instant, and a UTC time zone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl HostClock for FixedClock {
    fn get_host_epoch_milliseconds(&self) -> TemporalResult<i64> {
        Ok(self.0)
    }
}

impl HostTimeZone for FixedClock {
    fn get_host_time_zone(&self, _: &impl TimeZoneProvider) -> TemporalResult<TimeZone> {
        Ok(TimeZone::utc())
    }
}

impl HostHooks for FixedClock {}
