//! Convenience methods backed by the bundled time zone database.
//!
//! Each method here forwards to its `_with_provider` counterpart with
//! [`TZ_PROVIDER`].

mod datetime;
mod timezone;

use std::sync::LazyLock;

use crate::provider::TzifProvider;

/// The time zone provider used by the `compiled_data` methods.
pub static TZ_PROVIDER: LazyLock<TzifProvider> = LazyLock::new(TzifProvider::default);
