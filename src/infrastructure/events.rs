//! Event Sink Implementations
//!
//! `TracingEventSink` forwards run events to `tracing`, so `-v` shows
//! per-file progress on stderr.

use crate::domain::ports::{RunEvent, RunEventSink};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl RunEventSink for TracingEventSink {
    fn on_event(&self, event: RunEvent) {
        match event {
            RunEvent::Started { package_count } => {
                tracing::info!(package_count, "scaffold run started");
            }
            RunEvent::Validated {
                destinations,
                conflicts,
                violations,
            } => {
                tracing::debug!(destinations, conflicts, violations, "validation finished");
            }
            RunEvent::FileApplied { index, path } => {
                tracing::info!(index, path = %path, "applied");
            }
            RunEvent::FileUnchanged { index, path } => {
                tracing::debug!(index, path = %path, "unchanged");
            }
            RunEvent::FileSkipped {
                index,
                path,
                reason,
            } => {
                tracing::info!(index, path = %path, %reason, "skipped");
            }
            RunEvent::FileFailed { index, path, error } => {
                tracing::error!(index, path = %path, %error, "write failed");
            }
            RunEvent::StaleDeleted { path } => {
                tracing::info!(path = %path, "removed stale file");
            }
            RunEvent::StaleKept { path } => {
                tracing::warn!(path = %path, "kept modified stale file");
            }
            RunEvent::Cancelled { remaining } => {
                tracing::warn!(remaining, "run cancelled");
            }
            RunEvent::Completed {
                applied,
                unchanged,
                skipped,
                failed,
                deleted,
            } => {
                tracing::info!(applied, unchanged, skipped, failed, deleted, "scaffold run completed");
            }
        }
    }
}
