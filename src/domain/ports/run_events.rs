//! Run Event Port
//!
//! Provides an observable interface for scaffold runs.
//! Enables progress reporting and debugging.

use crate::domain::value_objects::DestinationPath;

/// Event emitted during a scaffold run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// Run started
    Started { package_count: usize },

    /// Validation pass finished
    Validated {
        destinations: usize,
        conflicts: usize,
        violations: usize,
    },

    /// File was written
    FileApplied { index: usize, path: DestinationPath },

    /// File already matched
    FileUnchanged { index: usize, path: DestinationPath },

    /// File was skipped (declared, preserved or refused)
    FileSkipped {
        index: usize,
        path: DestinationPath,
        reason: String,
    },

    /// Write failed
    FileFailed {
        index: usize,
        path: DestinationPath,
        error: String,
    },

    /// Stale managed file removed
    StaleDeleted { path: DestinationPath },

    /// Stale file kept because the user modified it
    StaleKept { path: DestinationPath },

    /// Cancellation observed; remaining operations not attempted
    Cancelled { remaining: usize },

    /// Run completed
    Completed {
        applied: usize,
        unchanged: usize,
        skipped: usize,
        failed: usize,
        deleted: usize,
    },
}

/// Trait for receiving run events
///
/// Implementations can be:
/// - TracingEventSink: forwards to `tracing`
/// - NoopEventSink: Silent operation
pub trait RunEventSink: Send + Sync {
    /// Handle a run event
    fn on_event(&self, event: RunEvent);

    /// Check if this sink wants per-file events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl RunEventSink for NoopEventSink {
    fn on_event(&self, _event: RunEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
