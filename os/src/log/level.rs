//! Log levels

/// Kernel log priority, lower value is more severe
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// System is unusable (KERN_EMERG)
    Emergency = 0,
    /// Action must be taken immediately (KERN_ALERT)
    Alert = 1,
    /// Critical conditions (KERN_CRIT)
    Critical = 2,
    /// Error conditions (KERN_ERR)
    Error = 3,
    /// Warning conditions (KERN_WARNING)
    Warning = 4,
    /// Normal but significant (KERN_NOTICE)
    Notice = 5,
    /// Informational (KERN_INFO)
    Info = 6,
    /// Debug-level messages (KERN_DEBUG)
    Debug = 7,
}

impl LogLevel {
    /// Converts a raw level back, saturating unknown values to `Debug`
    pub const fn from_u8(level: u8) -> Self {
        match level {
            0 => LogLevel::Emergency,
            1 => LogLevel::Alert,
            2 => LogLevel::Critical,
            3 => LogLevel::Error,
            4 => LogLevel::Warning,
            5 => LogLevel::Notice,
            6 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }

    /// Bracketed tag printed before the message
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Emergency => "[EMERG]",
            LogLevel::Alert => "[ALERT]",
            LogLevel::Critical => "[CRIT]",
            LogLevel::Error => "[ERR]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Notice => "[NOTICE]",
            LogLevel::Info => "[INFO]",
            LogLevel::Debug => "[DEBUG]",
        }
    }

    /// ANSI color escape for console output
    pub const fn color_code(&self) -> &'static str {
        match self {
            Self::Emergency | Self::Alert | Self::Critical => "\x1b[1;31m",
            Self::Error => "\x1b[31m",
            Self::Warning => "\x1b[33m",
            Self::Notice => "\x1b[1;37m",
            Self::Info => "\x1b[37m",
            Self::Debug => "\x1b[90m",
        }
    }

    /// ANSI escape that resets the color
    pub const fn reset_color_code(&self) -> &'static str {
        "\x1b[0m"
    }
}
