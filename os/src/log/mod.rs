//! Kernel logging
//!
//! Linux-style `pr_*` macros writing into a fixed-capacity ring buffer, safe to
//! use before any heap exists. See [`macros`] for the macro list.
pub mod config;
pub mod context;
pub mod entry;
pub mod level;
pub mod log_core;
pub mod macros;

mod buffer;

pub use context::{LogContext, register_context_hook};
pub use entry::LogEntry;
pub use level::LogLevel;
pub use log_core::LogCore;

/// 全局日志实例，编译期初始化
static GLOBAL_LOG: LogCore = LogCore::default();

#[doc(hidden)]
#[inline(always)]
pub fn is_level_enabled(level: LogLevel) -> bool {
    GLOBAL_LOG.is_level_enabled(level)
}

#[doc(hidden)]
pub fn log_impl(level: LogLevel, args: core::fmt::Arguments) {
    GLOBAL_LOG._log(level, args);
}

/// Reads the next entry from the global buffer
pub fn read_log() -> Option<LogEntry> {
    GLOBAL_LOG._read_log()
}

/// Number of unread entries in the global buffer
pub fn log_len() -> usize {
    GLOBAL_LOG._log_len()
}

/// Number of global entries lost to overflow
pub fn log_dropped_count() -> usize {
    GLOBAL_LOG._log_dropped_count()
}

/// Sets the level at and above which entries are buffered
pub fn set_global_level(level: LogLevel) {
    GLOBAL_LOG._set_global_level(level);
}

/// Current buffering level
pub fn get_global_level() -> LogLevel {
    GLOBAL_LOG._get_global_level()
}

/// Sets the level at and above which entries also go to the console sink
pub fn set_console_level(level: LogLevel) {
    GLOBAL_LOG._set_console_level(level);
}

/// Current console level
pub fn get_console_level() -> LogLevel {
    GLOBAL_LOG._get_console_level()
}

/// Registers the routine that prints urgent logs. Only the first call takes effect.
pub fn set_console_sink(sink: fn(&LogEntry)) -> bool {
    GLOBAL_LOG._set_console_sink(sink)
}

#[cfg(test)]
mod tests;
