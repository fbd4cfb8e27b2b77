//! Log entry record

use super::config::MAX_LOG_MESSAGE_LENGTH;
use super::level::LogLevel;
use core::fmt::{self, Write};

/// A formatted log record with a fixed-size message buffer (no heap)
#[derive(Debug, Clone, Copy)]
pub struct LogEntry {
    seq: usize,
    level: LogLevel,
    cpu_id: usize,
    timestamp: usize,
    length: usize,
    message: [u8; MAX_LOG_MESSAGE_LENGTH],
}

impl LogEntry {
    /// Blank entry used to fill the ring buffer at compile time
    pub const fn empty() -> Self {
        Self {
            seq: 0,
            level: LogLevel::Debug,
            cpu_id: 0,
            timestamp: 0,
            length: 0,
            message: [0; MAX_LOG_MESSAGE_LENGTH],
        }
    }

    /// Formats `args` into a new entry, truncating at [`MAX_LOG_MESSAGE_LENGTH`]
    pub fn from_args(
        level: LogLevel,
        cpu_id: usize,
        timestamp: usize,
        args: fmt::Arguments,
    ) -> Self {
        let mut entry = Self {
            level,
            cpu_id,
            timestamp,
            ..Self::empty()
        };

        let mut writer = MessageWriter::new(&mut entry.message);
        let _ = fmt::write(&mut writer, args);
        entry.length = writer.len();

        entry
    }

    /// Message text, possibly truncated
    pub fn message(&self) -> &str {
        // MessageWriter 只在字符边界截断
        core::str::from_utf8(&self.message[..self.length]).unwrap_or("")
    }

    /// Priority the entry was logged at
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// CPU reported by the context hook
    pub fn cpu_id(&self) -> usize {
        self.cpu_id
    }

    /// Timestamp reported by the context hook
    pub fn timestamp(&self) -> usize {
        self.timestamp
    }

    /// Monotonic sequence number assigned by the ring buffer on write
    pub fn seq(&self) -> usize {
        self.seq
    }

    pub(super) fn set_seq(&mut self, seq: usize) {
        self.seq = seq;
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:12}] {} [CPU{}] {}",
            self.timestamp,
            self.level.as_str(),
            self.cpu_id,
            self.message()
        )
    }
}

/// a helper to write message from args to [u8; MAX_LOG_MESSAGE_LENGTH]
struct MessageWriter<'a> {
    buffer: &'a mut [u8],
    pos: usize,
}

impl<'a> MessageWriter<'a> {
    fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, pos: 0 }
    }

    fn len(&self) -> usize {
        self.pos
    }
}

impl Write for MessageWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let remaining = self.buffer.len() - self.pos;
        let mut to_copy = s.len().min(remaining);
        while !s.is_char_boundary(to_copy) {
            to_copy -= 1;
        }

        self.buffer[self.pos..self.pos + to_copy].copy_from_slice(&s.as_bytes()[..to_copy]);
        self.pos += to_copy;
        Ok(())
    }
}
