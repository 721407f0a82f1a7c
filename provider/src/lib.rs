//! Time zone offset providers for `calendrical`.
//!
//! A provider answers one question: what is the UTC offset of a named
//! time zone at a given instant. The [`provider::TimeZoneProvider`] trait
//! describes that contract, and with the `tzif` feature enabled
//! [`tzif::TzifProvider`] implements it over compiled TZif data.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use core::fmt;

use alloc::borrow::Cow;

pub mod provider;
pub mod utils;

#[cfg(feature = "tzif")]
pub(crate) mod common;

#[cfg(feature = "tzif")]
pub mod tzif;

/// An error returned by a time zone provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeZoneProviderError {
    /// The identifier is not known to the provider.
    Range(Cow<'static, str>),
    /// The provider's data does not uphold an expected invariant.
    Assert(&'static str),
    /// Any other failure, e.g. unreadable data.
    Misc(Cow<'static, str>),
}

impl fmt::Display for TimeZoneProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(msg) => write!(f, "RangeError: {msg}"),
            Self::Assert(msg) => write!(f, "Provider assertion failed: {msg}"),
            Self::Misc(msg) => write!(f, "ProviderError: {msg}"),
        }
    }
}

impl core::error::Error for TimeZoneProviderError {}
