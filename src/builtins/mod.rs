pub mod core;

#[cfg(feature = "compiled_data")]
mod compiled;

pub use core::*;

#[cfg(feature = "compiled_data")]
pub use compiled::TZ_PROVIDER;
