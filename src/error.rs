//! This module implements `TemporalError`.

use alloc::borrow::Cow;
use alloc::format;
use core::fmt;

use calendrical_provider::TimeZoneProviderError;

/// The kind of a [`TemporalError`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A general error.
    #[default]
    Generic,
    /// An invalid argument, e.g. a non-finite timestamp.
    Type,
    /// A calendar or time field outside of its valid range.
    Range,
    /// An unrecognized unit name.
    Unit,
    /// A time zone specifier that could not be parsed or resolved.
    TimeZone,
    /// An instant outside of the representable range.
    Instant,
    /// An internal invariant did not hold.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Type => "TypeError",
            Self::Range => "RangeError",
            Self::Unit => "InvalidUnitError",
            Self::TimeZone => "InvalidZoneError",
            Self::Instant => "InstantRangeError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `calendrical`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
    field: Option<(&'static str, i64)>,
}

impl TemporalError {
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
            field: None,
        }
    }

    /// Create a generic error with a message.
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a type error, used for invalid arguments.
    #[must_use]
    pub const fn r#type() -> Self {
        Self::new(ErrorKind::Type)
    }

    /// Create an invalid unit error.
    #[must_use]
    pub const fn unit() -> Self {
        Self::new(ErrorKind::Unit)
    }

    /// Create an invalid time zone error.
    #[must_use]
    pub const fn time_zone() -> Self {
        Self::new(ErrorKind::TimeZone)
    }

    /// Create an instant out of range error.
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(ErrorKind::Instant)
    }

    /// Create an assertion error.
    #[must_use]
    pub const fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Create a range error for a field holding an invalid value.
    #[must_use]
    pub fn field_out_of_range(field: &'static str, value: i64) -> Self {
        Self {
            kind: ErrorKind::Range,
            msg: Cow::Owned(format!("{value} is out of range for {field}")),
            field: Some((field, value)),
        }
    }

    /// Add a message to the error.
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the offending field name and value of an out of range error.
    #[inline]
    #[must_use]
    pub const fn field(&self) -> Option<(&'static str, i64)> {
        self.field
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for TemporalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for TemporalError {}

impl From<TimeZoneProviderError> for TemporalError {
    fn from(value: TimeZoneProviderError) -> Self {
        match value {
            TimeZoneProviderError::Range(msg) => TemporalError::time_zone().with_message(msg),
            TimeZoneProviderError::Assert(msg) => TemporalError::assert().with_message(msg),
            TimeZoneProviderError::Misc(msg) => TemporalError::general(msg),
        }
    }
}
