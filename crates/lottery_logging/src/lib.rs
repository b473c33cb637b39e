#![deny(missing_docs)]
//! Shared logging utilities for the lottery workspace.
//!
//! This crate provides the `lottery_*` logging macros used across the
//! codebase, the audit target that records every drawn and committed round,
//! and a minimal test initializer for the global logger.

use log::LevelFilter;
use simplelog::{Config, ConfigBuilder};

/// Log target for the draw audit trail.
///
/// Winners are written here at info level so a log file alone is enough to
/// reconstruct who won which round.
pub const AUDIT_TARGET: &str = "lottery::audit";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! lottery_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! lottery_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! lottery_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! lottery_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! lottery_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Records a draw audit event under [`AUDIT_TARGET`].
#[macro_export]
macro_rules! lottery_audit {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::AUDIT_TARGET, $($arg)*);
    }};
}

/// Logger configuration shared by the application and tests.
///
/// Timestamps are RFC 3339 and the module target is printed only for errors.
pub fn timestamped_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

/// Returns the level used by [`initialize_for_tests`].
///
/// Debug builds log at debug level, release builds at info.
pub fn test_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode};

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        test_level(),
        timestamped_config(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
