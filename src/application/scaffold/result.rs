//! Scaffold Result
//!
//! Result types for scaffold runs.

use crate::domain::services::{ConflictError, PathViolation, SkipReason};
use crate::domain::value_objects::DestinationPath;

/// A destination that was left alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: DestinationPath,
    pub reason: SkipReason,
}

/// A destination whose write failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: DestinationPath,
    pub error: String,
}

/// Result of a scaffold run
///
/// In a dry run the lists describe what would happen.
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    pub dry_run: bool,
    /// Written (or, in a dry run, to be written)
    pub applied: Vec<DestinationPath>,
    /// Already up to date
    pub unchanged: Vec<DestinationPath>,
    pub skipped: Vec<SkippedFile>,
    pub failed: Vec<FileFailure>,
    /// Stale managed files removed
    pub deleted: Vec<DestinationPath>,
    /// Stale files kept because the user changed them
    pub kept: Vec<DestinationPath>,
    /// Operations not attempted after cancellation
    pub cancelled: usize,
    pub conflicts: Vec<ConflictError>,
    pub path_violations: Vec<PathViolation>,
    /// Duplicate packages, missing sources, strict-mode refusals
    pub validation_errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Destinations recorded in the manifest after the run
    pub managed_paths: Vec<String>,
}

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    pub fn unchanged_count(&self) -> usize {
        self.unchanged.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn warned_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    /// Validation passed, so the write pass was allowed to run
    pub fn is_valid(&self) -> bool {
        self.conflicts.is_empty()
            && self.path_violations.is_empty()
            && self.validation_errors.is_empty()
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled > 0
    }

    pub fn is_success(&self) -> bool {
        self.is_valid() && self.failed.is_empty() && !self.was_cancelled()
    }

    pub fn has_changes(&self) -> bool {
        !self.applied.is_empty() || !self.deleted.is_empty()
    }

    /// 1 for an invalid plan, 2 for a valid plan that did not fully apply
    pub fn exit_code(&self) -> i32 {
        if !self.is_valid() {
            1
        } else if !self.failed.is_empty() || self.was_cancelled() {
            2
        } else {
            0
        }
    }
}
