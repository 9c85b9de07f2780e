#![deny(missing_docs)]
//! Shared logging utilities for the slide forge workspace.
//!
//! This crate provides the `forge_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the number of host events dispatched so far.
    static DISPATCH_SEQ: Cell<u64> = const { Cell::new(0) };
}

/// Advances the dispatch sequence for the current thread and returns the new value.
/// The page host calls this once per dispatched event.
pub fn next_dispatch_seq() -> u64 {
    DISPATCH_SEQ.with(|v| {
        let next = v.get() + 1;
        v.set(next);
        next
    })
}

/// Retrieves the dispatch sequence for the current thread.
/// Returns 0 if no event has been dispatched yet.
pub fn dispatch_seq() -> u64 {
    DISPATCH_SEQ.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! forge_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! forge_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! forge_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! forge_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! forge_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_seq_counts_per_thread() {
        let start = dispatch_seq();
        assert_eq!(next_dispatch_seq(), start + 1);
        assert_eq!(next_dispatch_seq(), start + 2);
        assert_eq!(dispatch_seq(), start + 2);

        let other = std::thread::spawn(dispatch_seq).join().unwrap();
        assert_eq!(other, 0);
    }
}
