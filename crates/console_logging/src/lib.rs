#![deny(missing_docs)]
//! `console_*` logging macros for the dead tasks console.
//!
//! The macros forward to the `log` facade through a re-export, so callers do
//! not need their own `log` dependency. The binary installs the real logger;
//! tests use [`initialize_for_tests`].

use std::str::FromStr;

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode};

#[doc(hidden)]
pub use log as __log;

/// Environment variable read by [`initialize_for_tests`], e.g. `trace` or `off`.
pub const TEST_LOG_ENV: &str = "DEADTASKS_TEST_LOG";

/// Trace-level log line.
#[macro_export]
macro_rules! console_trace {
    ($($arg:tt)*) => {
        $crate::__log::trace!($($arg)*)
    };
}

/// Debug-level log line. Used for ignored or superseded messages.
#[macro_export]
macro_rules! console_debug {
    ($($arg:tt)*) => {
        $crate::__log::debug!($($arg)*)
    };
}

/// Info-level log line.
#[macro_export]
macro_rules! console_info {
    ($($arg:tt)*) => {
        $crate::__log::info!($($arg)*)
    };
}

/// Warn-level log line. Store failures land here; they are never fatal.
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {
        $crate::__log::warn!($($arg)*)
    };
}

/// Error-level log line.
#[macro_export]
macro_rules! console_error {
    ($($arg:tt)*) => {
        $crate::__log::error!($($arg)*)
    };
}

/// Level used by tests: [`TEST_LOG_ENV`] when it parses, otherwise debug.
pub fn test_level() -> LevelFilter {
    std::env::var(TEST_LOG_ENV)
        .ok()
        .and_then(|raw| LevelFilter::from_str(raw.trim()).ok())
        .unwrap_or(LevelFilter::Debug)
}

/// Installs a terminal logger for integration tests. Later calls are no-ops.
pub fn initialize_for_tests() {
    let config = ConfigBuilder::new().set_target_level(LevelFilter::Off).build();
    let _ = CombinedLogger::init(vec![TermLogger::new(
        test_level(),
        config,
        TerminalMode::Stderr,
        ColorChoice::Never,
    )]);
}
