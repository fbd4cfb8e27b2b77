//! Logging macros
//!
//! Linux kernel-style logging macros (`pr_*`), one per [`LogLevel`](super::LogLevel).
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::{pr_debug, pr_err, pr_info};
//!
//! pr_info!("devmap: {} static entries", count);
//! pr_debug!("mapdev: pa {:#x} size {:#x}", pa, size);
//! pr_err!("unmapdev: {}", err);
//! ```
//!
//! # Macro List
//!
//! - `pr_emerg!` - system unusable
//! - `pr_alert!` - immediate action required
//! - `pr_crit!` - critical conditions
//! - `pr_err!` - error conditions
//! - `pr_warn!` - warning conditions
//! - `pr_notice!` - normal but significant
//! - `pr_info!` - informational
//! - `pr_debug!` - debug messages
//!
//! # Performance
//!
//! All macros check the global log level before formatting. If a log level is
//! disabled, the format arguments are never evaluated.

/// Internal implementation macro with level filtering
#[macro_export]
macro_rules! __log_impl_filtered {
    ($level:expr, $args:expr) => {
        if $crate::log::is_level_enabled($level) {
            $crate::log::log_impl($level, $args);
        }
    };
}

/// Logs a message at the EMERGENCY level
#[macro_export]
macro_rules! pr_emerg {
    ($($arg:tt)*) => {
        $crate::__log_impl_filtered!(
            $crate::log::LogLevel::Emergency,
            format_args!($($arg)*)
        )
    }
}

/// Logs a message at the ALERT level
#[macro_export]
macro_rules! pr_alert {
    ($($arg:tt)*) => {
        $crate::__log_impl_filtered!(
            $crate::log::LogLevel::Alert,
            format_args!($($arg)*)
        )
    }
}

/// Logs a message at the CRITICAL level
#[macro_export]
macro_rules! pr_crit {
    ($($arg:tt)*) => {
        $crate::__log_impl_filtered!(
            $crate::log::LogLevel::Critical,
            format_args!($($arg)*)
        )
    }
}

/// Logs a message at the ERROR level
///
/// Used for caller-contract violations the core refuses to act on, e.g. an
/// unmap of a range that was never mapped.
#[macro_export]
macro_rules! pr_err {
    ($($arg:tt)*) => {
        $crate::__log_impl_filtered!(
            $crate::log::LogLevel::Error,
            format_args!($($arg)*)
        )
    }
}

/// Logs a message at the WARNING level
#[macro_export]
macro_rules! pr_warn {
    ($($arg:tt)*) => {
        $crate::__log_impl_filtered!(
            $crate::log::LogLevel::Warning,
            format_args!($($arg)*)
        )
    }
}

/// Logs a message at the NOTICE level
#[macro_export]
macro_rules! pr_notice {
    ($($arg:tt)*) => {
        $crate::__log_impl_filtered!(
            $crate::log::LogLevel::Notice,
            format_args!($($arg)*)
        )
    }
}

/// Logs a message at the INFO level
///
/// ```rust,ignore
/// pr_info!("devmap: pa {:#x}-{:#x} mapped at va {:#x}", pa, end, va);
/// ```
#[macro_export]
macro_rules! pr_info {
    ($($arg:tt)*) => {
        $crate::__log_impl_filtered!(
            $crate::log::LogLevel::Info,
            format_args!($($arg)*)
        )
    }
}

/// Logs a message at the DEBUG level
///
/// Per-call tracing of dynamic mappings goes here; disabled by default.
#[macro_export]
macro_rules! pr_debug {
    ($($arg:tt)*) => {
        $crate::__log_impl_filtered!(
            $crate::log::LogLevel::Debug,
            format_args!($($arg)*)
        )
    }
}
