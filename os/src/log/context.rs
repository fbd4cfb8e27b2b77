//! Log context collection
//!
//! The device map core has no notion of CPUs or clocks. The platform registers a
//! hook once it can answer "which CPU" and "what time"; until then entries carry
//! zeros.

use spin::Once;

/// Contextual information for a log entry
#[derive(Debug, Clone, Copy, Default)]
pub struct LogContext {
    /// ID of the CPU that generated the log
    pub cpu_id: usize,
    /// Timestamp when the log was created, in platform ticks
    pub timestamp: usize,
}

static CONTEXT_HOOK: Once<fn() -> LogContext> = Once::new();

/// Registers the platform context hook. Only the first registration takes effect.
pub fn register_context_hook(hook: fn() -> LogContext) -> bool {
    let mut registered = false;
    CONTEXT_HOOK.call_once(|| {
        registered = true;
        hook
    });
    registered
}

/// Collects context information for a new log entry
pub(super) fn collect_context() -> LogContext {
    match CONTEXT_HOOK.get() {
        Some(hook) => hook(),
        None => LogContext::default(),
    }
}
