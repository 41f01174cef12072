//! Plan executor
//!
//! Applies an `OperationPlan` to disk in destination order. Every write goes
//! through the `FileSystem` port's atomic replace, under a per-destination
//! lock. A failed write is recorded and the batch moves on; cancellation
//! stops before the next operation.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::ports::{FileSystem, RunEvent, RunEventSink};
use crate::domain::services::{Operation, OperationPlan, Payload, SkipReason};
use crate::domain::value_objects::{check_symlink_ancestors, ContentHash};
use crate::infrastructure::fs::PathLockSet;

/// Shared cancellation flag, set from a signal handler
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What happened to one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpOutcome {
    /// Written; the hash is what now sits on disk
    Applied(ContentHash),
    Unchanged,
    Skipped(SkipReason),
    Failed(String),
    /// Not attempted because the run was cancelled
    Cancelled,
}

impl OpOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, OpOutcome::Failed(_))
    }
}

/// Per-operation outcomes, index-aligned with the plan
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    pub outcomes: Vec<OpOutcome>,
}

impl ExecutionReport {
    pub fn was_cancelled(&self) -> bool {
        self.outcomes.iter().any(|o| *o == OpOutcome::Cancelled)
    }

    pub fn cancelled_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == OpOutcome::Cancelled)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }
}

pub struct Executor<'a, FS: FileSystem + ?Sized> {
    fs: &'a FS,
    locks: PathLockSet,
    cancel: CancellationToken,
    events: Arc<dyn RunEventSink>,
}

impl<'a, FS: FileSystem + ?Sized> Executor<'a, FS> {
    pub fn new(fs: &'a FS, cancel: CancellationToken, events: Arc<dyn RunEventSink>) -> Self {
        Self {
            fs,
            locks: PathLockSet::new(),
            cancel,
            events,
        }
    }

    /// Apply `plan` under `project_root`
    pub fn execute(&self, plan: &OperationPlan, project_root: &Path) -> ExecutionReport {
        let mut report = ExecutionReport::default();

        for (index, op) in plan.operations.iter().enumerate() {
            if self.cancel.is_cancelled() {
                let remaining = plan.operations.len() - index;
                report
                    .outcomes
                    .extend((0..remaining).map(|_| OpOutcome::Cancelled));
                self.events.on_event(RunEvent::Cancelled { remaining });
                break;
            }

            let outcome = self.execute_one(op, project_root);
            self.report(index, op, &outcome);
            report.outcomes.push(outcome);
        }

        report
    }

    fn execute_one(&self, op: &Operation, project_root: &Path) -> OpOutcome {
        if let Some(reason) = op.skip_reason() {
            return OpOutcome::Skipped(reason.clone());
        }
        if op.is_unchanged() {
            return OpOutcome::Unchanged;
        }
        let Some(desired) = &op.desired else {
            return OpOutcome::Failed("nothing to write".to_string());
        };

        let _guard = self.locks.acquire(&op.destination);

        // Ancestors may have changed since registration.
        if let Err(e) = check_symlink_ancestors(&op.destination, project_root) {
            return OpOutcome::Failed(e.to_string());
        }

        let target = op.destination.to_path(project_root);
        let written = match &desired.payload {
            Payload::Content(bytes) => self.fs.write_atomic(&target, bytes),
            Payload::Link(link_target) => self.fs.symlink_atomic(&target, link_target),
        };

        match written {
            Ok(()) => {
                tracing::debug!(path = %op.destination, managed = op.managed(), "wrote");
                OpOutcome::Applied(desired.hash.clone())
            }
            Err(e) => OpOutcome::Failed(e.to_string()),
        }
    }

    fn report(&self, index: usize, op: &Operation, outcome: &OpOutcome) {
        if !self.events.wants_detailed_events() {
            return;
        }
        let path = op.destination.clone();
        let event = match outcome {
            OpOutcome::Applied(_) => RunEvent::FileApplied { index, path },
            OpOutcome::Unchanged => RunEvent::FileUnchanged { index, path },
            OpOutcome::Skipped(reason) => RunEvent::FileSkipped {
                index,
                path,
                reason: reason.message(),
            },
            OpOutcome::Failed(error) => RunEvent::FileFailed {
                index,
                path,
                error: error.clone(),
            },
            OpOutcome::Cancelled => return,
        };
        self.events.on_event(event);
    }
}
