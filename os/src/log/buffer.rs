//! 日志存储环形缓冲区
//!
//! 固定容量、编译期初始化，满时覆盖最旧的条目并计入丢弃数。
//! 写入路径只持有一次自旋锁，不分配内存。

use super::config::LOG_BUFFER_ENTRIES;
use super::entry::LogEntry;
use crate::sync::{RawSpinLock, SpinLock};

struct Ring {
    slots: [LogEntry; LOG_BUFFER_ENTRIES],
    /// 下一条待读条目的序列号
    read_seq: usize,
    /// 下一条写入条目的序列号
    write_seq: usize,
    /// 由于缓冲区溢出而丢弃的日志计数
    dropped: usize,
}

pub(super) struct LogBuffer {
    ring: SpinLock<Ring>,
}

impl LogBuffer {
    pub(super) const fn new() -> Self {
        const EMPTY: LogEntry = LogEntry::empty();
        Self {
            ring: SpinLock::const_new(
                RawSpinLock::new(),
                Ring {
                    slots: [EMPTY; LOG_BUFFER_ENTRIES],
                    read_seq: 0,
                    write_seq: 0,
                    dropped: 0,
                },
            ),
        }
    }

    /// 将日志条目写入缓冲区，返回分配给它的序列号
    pub(super) fn write(&self, entry: &LogEntry) -> usize {
        let mut ring = self.ring.lock();

        // 缓冲区已满：推进读指针，覆盖最旧的条目
        if ring.write_seq - ring.read_seq == LOG_BUFFER_ENTRIES {
            ring.read_seq += 1;
            ring.dropped += 1;
        }

        let seq = ring.write_seq;
        let slot = seq % LOG_BUFFER_ENTRIES;
        ring.slots[slot] = *entry;
        ring.slots[slot].set_seq(seq);
        ring.write_seq += 1;
        seq
    }

    /// 读取下一条日志，没有可用条目时返回 `None`
    pub(super) fn read(&self) -> Option<LogEntry> {
        let mut ring = self.ring.lock();
        if ring.read_seq == ring.write_seq {
            return None;
        }
        let entry = ring.slots[ring.read_seq % LOG_BUFFER_ENTRIES];
        ring.read_seq += 1;
        Some(entry)
    }

    /// 缓冲区中未读日志条目的数量
    pub(super) fn len(&self) -> usize {
        let ring = self.ring.lock();
        ring.write_seq - ring.read_seq
    }

    /// 由于缓冲区溢出而丢弃的日志总数
    pub(super) fn dropped_count(&self) -> usize {
        self.ring.lock().dropped
    }
}
