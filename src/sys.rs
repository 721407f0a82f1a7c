use crate::builtins::Now;
use crate::host::{HostClock, HostHooks, HostTimeZone};
use crate::provider::TimeZoneProvider;
use crate::{TemporalError, TemporalResult, TimeZone};

use alloc::string::String;
use web_time::{SystemTime, UNIX_EPOCH};

/// Accessors for the host system.
pub struct Calendrical;

impl Calendrical {
    /// Get a `Now` object backed by the system clock and time zone.
    pub fn now() -> Now<SystemHost> {
        Now::new(SystemHost)
    }
}

/// A host backed by [`web_time::SystemTime`] and [`iana_time_zone`].
///
/// When the system time zone cannot be determined or is unknown to the
/// provider, UTC is used instead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SystemHost;

impl HostHooks for SystemHost {}

impl HostClock for SystemHost {
    fn get_host_epoch_milliseconds(&self) -> TemporalResult<i64> {
        get_system_milliseconds()
    }
}

impl HostTimeZone for SystemHost {
    fn get_host_time_zone(&self, provider: &impl TimeZoneProvider) -> TemporalResult<TimeZone> {
        match get_system_time_zone(provider) {
            Ok(name) => Ok(TimeZone::System(name)),
            Err(_err) => {
                #[cfg(feature = "log")]
                log::warn!("falling back to UTC, system time zone is unavailable: {_err}");
                Ok(TimeZone::utc())
            }
        }
    }
}

/// Returns the canonical name of the system time zone.
#[inline]
pub(crate) fn get_system_time_zone(provider: &impl TimeZoneProvider) -> TemporalResult<String> {
    let name = iana_time_zone::get_timezone()
        .map_err(|_| TemporalError::general("Error fetching system time zone"))?;
    let normalized = provider
        .normalize_identifier(name.as_bytes())
        .map_err(|_| TemporalError::time_zone().with_message("Unknown system time zone."))?;
    Ok(normalized.into_owned())
}

/// Returns the system time in milliseconds.
pub(crate) fn get_system_milliseconds() -> TemporalResult<i64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TemporalError::general("Error fetching system time"))
        .and_then(|d| {
            i64::try_from(d.as_millis())
                .map_err(|_| TemporalError::general("System time is out of range"))
        })
}
