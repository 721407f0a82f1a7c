//! This module implements `TimeZone` and the resolution of local times.

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use core::{fmt, iter::Peekable, str::Chars};

use crate::{
    host::HostTimeZone,
    provider::TimeZoneProvider,
    utils::{self, MS_PER_MINUTE, MS_PER_SECOND},
    TemporalError, TemporalResult,
};

/// The largest magnitude of a fixed offset, in minutes.
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// A time zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimeZone {
    /// A constant offset from UTC in minutes.
    FixedOffset(i32),
    /// The zone of the host system, by its IANA identifier.
    System(String),
    /// An IANA time zone, by its canonical identifier.
    Named(String),
}

impl Default for TimeZone {
    fn default() -> Self {
        Self::utc()
    }
}

/// The outcome of resolving a local time in a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedLocalTime {
    pub(crate) epoch_milliseconds: i64,
    pub(crate) offset_minutes: i32,
    /// Whether the local time did not exist and was moved forward.
    pub(crate) adjusted: bool,
}

impl TimeZone {
    /// The UTC zone.
    #[inline]
    pub const fn utc() -> Self {
        Self::FixedOffset(0)
    }

    /// Creates a fixed offset zone, rejecting offsets of a day or more.
    pub fn fixed_offset(minutes: i32) -> TemporalResult<Self> {
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
            return Err(TemporalError::time_zone()
                .with_message(format!("Offset of {minutes} minutes is out of range.")));
        }
        Ok(Self::FixedOffset(minutes))
    }

    /// Parses a zone specifier.
    ///
    /// Accepted forms are `"local"` and `"system"` for the host's zone,
    /// `"utc"`, `"gmt"` and `"z"`, `"UTC+5"` and `"UTC-3:30"`, `"+05:30"`
    /// and `"-0330"`, and any IANA identifier known to `provider`. Keywords
    /// and identifiers are matched ignoring ASCII case.
    pub fn try_from_str_with_host(
        source: &str,
        host: &impl HostTimeZone,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<Self> {
        if source.eq_ignore_ascii_case("local") || source.eq_ignore_ascii_case("system") {
            return host.get_host_time_zone(provider);
        }
        if ["utc", "gmt", "z"]
            .iter()
            .any(|name| source.eq_ignore_ascii_case(name))
        {
            return Ok(Self::utc());
        }

        let mut cursor = source.chars().peekable();
        if source.len() > 3
            && source.is_char_boundary(3)
            && source[..3].eq_ignore_ascii_case("utc")
        {
            let mut cursor = source[3..].chars().peekable();
            return parse_utc_specifier(&mut cursor).and_then(Self::fixed_offset);
        }
        if cursor.peek().is_some_and(is_ascii_sign) {
            return parse_offset(&mut cursor).and_then(Self::fixed_offset);
        }

        let canonical = provider
            .normalize_identifier(source.as_bytes())
            .map_err(|_| {
                TemporalError::time_zone()
                    .with_message(format!("Unknown time zone specifier: {source}"))
            })?;
        Ok(Self::Named(canonical.into_owned()))
    }

    /// Returns the kind of this zone: `"fixed"`, `"system"` or `"iana"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FixedOffset(_) => "fixed",
            Self::System(_) => "system",
            Self::Named(_) => "iana",
        }
    }

    /// Returns the canonical name of this zone, e.g. `"UTC"`, `"UTC+5"`,
    /// `"UTC-3:30"` or `"America/New_York"`.
    #[must_use]
    pub fn canonical_name(&self) -> Cow<'_, str> {
        match self {
            Self::FixedOffset(0) => Cow::Borrowed("UTC"),
            Self::FixedOffset(minutes) => {
                let sign = if *minutes < 0 { '-' } else { '+' };
                let hours = minutes.abs() / 60;
                let minutes = minutes.abs() % 60;
                if minutes == 0 {
                    Cow::Owned(format!("UTC{sign}{hours}"))
                } else {
                    Cow::Owned(format!("UTC{sign}{hours}:{minutes:02}"))
                }
            }
            Self::System(name) | Self::Named(name) => Cow::Borrowed(name),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_fixed_offset(&self) -> bool {
        matches!(self, Self::FixedOffset(_))
    }

    /// Returns the offset of this zone in minutes at an instant.
    pub fn offset_minutes_at_with_provider(
        &self,
        epoch_milliseconds: i64,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<i32> {
        match self {
            Self::FixedOffset(minutes) => Ok(*minutes),
            Self::System(name) | Self::Named(name) => {
                let epoch_seconds = utils::floor_div(epoch_milliseconds, MS_PER_SECOND);
                let offset = provider.get_named_tz_offset_seconds(name, epoch_seconds)?;
                i32::try_from(offset.as_minutes()).map_err(|_| {
                    TemporalError::assert().with_message("Time zone offset is out of range.")
                })
            }
        }
    }

    /// Resolves milliseconds since the local epoch into an instant, starting
    /// from a guessed offset.
    ///
    /// A local time repeated by a backward transition resolves to whichever
    /// offset the first probe confirms. A local time skipped by a forward
    /// transition is moved forward by the size of the gap.
    pub(crate) fn resolve_local_with_provider(
        &self,
        local_milliseconds: i64,
        offset_guess: i32,
        provider: &impl TimeZoneProvider,
    ) -> TemporalResult<ResolvedLocalTime> {
        let offset_ms = |offset: i32| i64::from(offset) * MS_PER_MINUTE;

        let mut utc_guess = local_milliseconds - offset_ms(offset_guess);
        let second_offset = self.offset_minutes_at_with_provider(utc_guess, provider)?;
        if second_offset == offset_guess {
            return Ok(ResolvedLocalTime {
                epoch_milliseconds: utc_guess,
                offset_minutes: offset_guess,
                adjusted: false,
            });
        }

        utc_guess -= offset_ms(second_offset - offset_guess);
        let third_offset = self.offset_minutes_at_with_provider(utc_guess, provider)?;
        if second_offset == third_offset {
            return Ok(ResolvedLocalTime {
                epoch_milliseconds: utc_guess,
                offset_minutes: second_offset,
                adjusted: false,
            });
        }

        // The probes disagree, so the local time falls in a gap.
        #[cfg(feature = "log")]
        log::debug!(
            "local time {local_milliseconds} does not exist in {self}, offsets {second_offset} and {third_offset}"
        );
        Ok(ResolvedLocalTime {
            epoch_milliseconds: local_milliseconds - offset_ms(second_offset.min(third_offset)),
            offset_minutes: second_offset.max(third_offset),
            adjusted: true,
        })
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

/// Parses `±H[H][:MM]`, the part of a `UTC±H[:MM]` specifier after `UTC`.
fn parse_utc_specifier(chars: &mut Peekable<Chars<'_>>) -> TemporalResult<i32> {
    let sign = parse_sign(chars)?;
    let mut hours = parse_digit(chars)?;
    if let Some(digit) = chars.peek().and_then(|ch| ch.to_digit(10)) {
        chars.next();
        hours = hours * 10 + digit as i32;
    }
    let minutes = match chars.next() {
        Some(':') => parse_digit_pair(chars)?,
        Some(_) => return Err(unexpected_character()),
        None => 0,
    };
    expect_end(chars)?;
    Ok((hours * 60 + minutes) * sign)
}

/// Parses `±HH[:MM]` or `±HHMM`.
#[inline]
pub(crate) fn parse_offset(chars: &mut Peekable<Chars<'_>>) -> TemporalResult<i32> {
    let sign = parse_sign(chars)?;
    // First offset portion
    let hours = parse_digit_pair(chars)?;

    let sep = chars.peek().is_some_and(|ch| *ch == ':');
    if sep {
        let _ = chars.next();
    }

    let digit_peek = chars.peek().map(|ch| ch.is_ascii_digit());

    let minutes = match digit_peek {
        Some(true) => parse_digit_pair(chars)?,
        Some(false) => return Err(non_ascii_digit()),
        None if sep => return Err(abrupt_end()),
        None => 0,
    };
    expect_end(chars)?;

    Ok((hours * 60 + minutes) * sign)
}

fn parse_sign(chars: &mut Peekable<Chars<'_>>) -> TemporalResult<i32> {
    match chars.next() {
        Some('+') => Ok(1),
        Some('-') => Ok(-1),
        Some(_) => Err(unexpected_character()),
        None => Err(abrupt_end()),
    }
}

fn parse_digit(chars: &mut Peekable<Chars<'_>>) -> TemporalResult<i32> {
    let ch = chars.next().ok_or_else(abrupt_end)?;
    ch.to_digit(10)
        .map(|digit| digit as i32)
        .ok_or_else(non_ascii_digit)
}

fn parse_digit_pair(chars: &mut Peekable<Chars<'_>>) -> TemporalResult<i32> {
    let tens = parse_digit(chars)?;
    let ones = parse_digit(chars)?;
    Ok(tens * 10 + ones)
}

fn expect_end(chars: &mut Peekable<Chars<'_>>) -> TemporalResult<()> {
    match chars.next() {
        Some(_) => Err(unexpected_character()),
        None => Ok(()),
    }
}

fn abrupt_end() -> TemporalError {
    TemporalError::time_zone().with_message("Abrupt end while parsing offset string")
}

fn non_ascii_digit() -> TemporalError {
    TemporalError::time_zone().with_message("Non ascii digit found while parsing offset string")
}

fn unexpected_character() -> TemporalError {
    TemporalError::time_zone().with_message("Unexpected character while parsing offset string")
}

fn is_ascii_sign(ch: &char) -> bool {
    *ch == '+' || *ch == '-'
}
