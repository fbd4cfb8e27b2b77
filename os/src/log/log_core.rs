//! Log system core implementation
//!
//! This module encapsulates all logging state into a single `LogCore` struct
//! that can be instantiated independently for testing while the global instance
//! is built at compile time.

use super::buffer::LogBuffer;
use super::config::{DEFAULT_CONSOLE_LEVEL, DEFAULT_LOG_LEVEL};
use super::context;
use super::entry::LogEntry;
use super::level::LogLevel;
use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};
use spin::Once;

/// Core logging system
///
/// Holds the ring buffer, the two filter thresholds and the console sink.
///
/// # Two-tier filtering
///
/// 1. **Global Level**: logs with level <= threshold are recorded to the buffer
/// 2. **Console Level**: logs with level <= threshold are also handed to the
///    console sink immediately (if one is registered)
pub struct LogCore {
    /// Ring buffer for log storage
    buffer: LogBuffer,

    /// Global log level threshold (controls buffering)
    global_level: AtomicU8,

    /// Console output level threshold (controls immediate printing)
    console_level: AtomicU8,

    /// Output routine for urgent logs, set by the platform once a console exists
    console: Once<fn(&LogEntry)>,
}

impl LogCore {
    /// Creates a new LogCore instance with default log levels
    ///
    /// This is a `const fn`, so the global singleton needs no runtime init:
    ///
    /// ```rust,ignore
    /// static GLOBAL_LOG: LogCore = LogCore::default();
    /// ```
    pub const fn default() -> Self {
        Self::new(DEFAULT_LOG_LEVEL, DEFAULT_CONSOLE_LEVEL)
    }

    /// Creates a new LogCore instance with custom log levels
    ///
    /// # Parameters
    ///
    /// * `global_level` - Minimum level for logs to be buffered
    /// * `console_level` - Minimum level for logs to be printed to console
    pub const fn new(global_level: LogLevel, console_level: LogLevel) -> Self {
        Self {
            buffer: LogBuffer::new(),
            global_level: AtomicU8::new(global_level as u8),
            console_level: AtomicU8::new(console_level as u8),
            console: Once::new(),
        }
    }

    /// Core logging implementation
    ///
    /// Called by the `pr_*` macros (via the global instance) and by test code
    /// (via local instances).
    pub fn _log(&self, level: LogLevel, args: fmt::Arguments) {
        if !self.is_level_enabled(level) {
            return;
        }

        let log_context = context::collect_context();
        let entry = LogEntry::from_args(level, log_context.cpu_id, log_context.timestamp, args);

        self.buffer.write(&entry);

        if self.is_console_level(level) {
            if let Some(sink) = self.console.get() {
                sink(&entry);
            }
        }
    }

    /// Reads the next log entry from the buffer
    pub fn _read_log(&self) -> Option<LogEntry> {
        self.buffer.read()
    }

    /// Returns the number of unread log entries
    pub fn _log_len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the count of logs dropped due to buffer overflow
    pub fn _log_dropped_count(&self) -> usize {
        self.buffer.dropped_count()
    }

    /// Sets the global log level threshold
    pub fn _set_global_level(&self, level: LogLevel) {
        self.global_level.store(level as u8, Ordering::Release);
    }

    /// Gets the current global log level
    pub fn _get_global_level(&self) -> LogLevel {
        LogLevel::from_u8(self.global_level.load(Ordering::Acquire))
    }

    /// Sets the console output level threshold
    pub fn _set_console_level(&self, level: LogLevel) {
        self.console_level.store(level as u8, Ordering::Release);
    }

    /// Gets the current console output level
    pub fn _get_console_level(&self) -> LogLevel {
        LogLevel::from_u8(self.console_level.load(Ordering::Acquire))
    }

    /// Registers the console sink. Returns `false` if one was already set.
    pub fn _set_console_sink(&self, sink: fn(&LogEntry)) -> bool {
        let mut registered = false;
        self.console.call_once(|| {
            registered = true;
            sink
        });
        registered
    }

    /// Checks if a log level is enabled (global filter)
    #[inline(always)]
    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.global_level.load(Ordering::Relaxed)
    }

    #[inline(always)]
    fn is_console_level(&self, level: LogLevel) -> bool {
        level as u8 <= self.console_level.load(Ordering::Relaxed)
    }
}
