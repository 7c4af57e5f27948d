//! Logging macros for the optional `tracing` integration.
//!
//! Document assembly emits two diagnostics: a debug line per glyph build
//! and a warning when a rescale runs without a canonical size. With the
//! `tracing` feature enabled these forward to the `tracing` macros of the
//! same name; without it they expand to nothing, so release builds carry
//! no logging code at all.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};
