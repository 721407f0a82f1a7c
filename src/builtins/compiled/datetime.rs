use crate::{
    builtins::{core::Now, TZ_PROVIDER},
    fields::PartialDateTime,
    host::{HostClock, HostHooks},
    options::{ConversionAccuracy, TemporalUnit},
    DateTime, Duration, TemporalResult, TimeZone,
};

impl DateTime {
    /// Creates a `DateTime` from milliseconds since the Unix epoch.
    pub fn try_new(epoch_milliseconds: i64, time_zone: TimeZone) -> TemporalResult<Self> {
        Self::try_new_with_provider(epoch_milliseconds, time_zone, &*TZ_PROVIDER)
    }

    pub fn from_epoch_seconds(epoch_seconds: f64, time_zone: TimeZone) -> TemporalResult<Self> {
        Self::from_epoch_seconds_with_provider(epoch_seconds, time_zone, &*TZ_PROVIDER)
    }

    /// Creates a `DateTime` from partial fields, relative to the instant
    /// reported by `clock`.
    pub fn from_partial_with_clock(
        partial: PartialDateTime,
        time_zone: TimeZone,
        clock: &impl HostClock,
    ) -> TemporalResult<Self> {
        Self::from_partial_with_provider(partial, time_zone, clock, &*TZ_PROVIDER)
    }

    pub fn set(&self, partial: PartialDateTime) -> TemporalResult<Self> {
        self.set_with_provider(partial, &*TZ_PROVIDER)
    }

    pub fn with_time_zone(&self, time_zone: TimeZone, keep_local_time: bool) -> TemporalResult<Self> {
        self.with_time_zone_with_provider(time_zone, keep_local_time, &*TZ_PROVIDER)
    }

    pub fn add(&self, duration: &Duration) -> TemporalResult<Self> {
        self.add_with_provider(duration, &*TZ_PROVIDER)
    }

    pub fn subtract(&self, duration: &Duration) -> TemporalResult<Self> {
        self.subtract_with_provider(duration, &*TZ_PROVIDER)
    }

    pub fn start_of(&self, unit: TemporalUnit) -> TemporalResult<Self> {
        self.start_of_with_provider(unit, &*TZ_PROVIDER)
    }

    pub fn end_of(&self, unit: TemporalUnit) -> TemporalResult<Self> {
        self.end_of_with_provider(unit, &*TZ_PROVIDER)
    }

    pub fn diff(
        &self,
        other: &Self,
        units: &[TemporalUnit],
        accuracy: ConversionAccuracy,
    ) -> TemporalResult<Duration> {
        self.diff_with_provider(other, units, accuracy, &*TZ_PROVIDER)
    }

    pub fn has_same(&self, other: &Self, unit: TemporalUnit) -> TemporalResult<bool> {
        self.has_same_with_provider(other, unit, &*TZ_PROVIDER)
    }

    pub fn is_in_dst(&self) -> TemporalResult<bool> {
        self.is_in_dst_with_provider(&*TZ_PROVIDER)
    }
}

#[cfg(feature = "sys")]
impl DateTime {
    /// Creates a `DateTime` from partial fields, relative to the system
    /// clock.
    pub fn from_partial(partial: PartialDateTime, time_zone: TimeZone) -> TemporalResult<Self> {
        Self::from_partial_with_clock(partial, time_zone, &crate::SystemHost)
    }

    pub fn from_system_time(time: web_time::SystemTime, time_zone: TimeZone) -> TemporalResult<Self> {
        Self::from_system_time_with_provider(time, time_zone, &*TZ_PROVIDER)
    }
}

impl<H: HostHooks> Now<H> {
    /// Returns the current `DateTime` in `time_zone`, or in the host's time
    /// zone when none is given.
    pub fn datetime(&self, time_zone: Option<TimeZone>) -> TemporalResult<DateTime> {
        self.datetime_with_provider(time_zone, &*TZ_PROVIDER)
    }

    pub fn time_zone(&self) -> TemporalResult<TimeZone> {
        self.time_zone_with_provider(&*TZ_PROVIDER)
    }
}
