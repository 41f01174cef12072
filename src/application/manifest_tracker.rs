//! Manifest tracking
//!
//! Turns the previous manifest plus this run's outcomes into the manifest to
//! persist, and removes stale managed files that nobody provides anymore.

use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::{Manifest, ManifestEntry};
use crate::domain::ports::{FileSystem, RunEvent, RunEventSink};
use crate::domain::services::{
    Operation, OperationPlan, SkipReason, StaleDecision, StaleDetector, StaleFile,
};
use crate::domain::value_objects::{check_symlink_ancestors, DestinationPath};

use super::executor::OpOutcome;

/// Outcome of handling one stale destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleOutcome {
    Deleted,
    /// User-modified; file kept, record dropped
    Kept,
    AlreadyGone,
    /// Deletion attempted and failed; record kept for the next run
    Failed(String),
    /// Path now resolves outside the project root; untouched, record kept
    Unsafe(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleReport {
    pub path: DestinationPath,
    pub outcome: StaleOutcome,
}

pub struct ManifestTracker;

impl ManifestTracker {
    /// Build the manifest for the next run.
    ///
    /// Written and unchanged destinations are recorded with their current
    /// hash. Refused, failed and cancelled operations keep whatever the
    /// previous manifest said. Declared skips stop being managed.
    pub fn next_manifest(
        previous: &Manifest,
        plan: &OperationPlan,
        outcomes: &[OpOutcome],
        stale: &[StaleReport],
    ) -> Manifest {
        let mut next = Manifest::new();

        for (op, outcome) in plan.operations.iter().zip(outcomes) {
            match outcome {
                OpOutcome::Applied(_) | OpOutcome::Unchanged => {
                    if let Some(entry) = Self::record(op) {
                        next.insert(op.destination.clone(), entry);
                    }
                }
                OpOutcome::Skipped(SkipReason::Declared) => {}
                OpOutcome::Skipped(_) | OpOutcome::Failed(_) | OpOutcome::Cancelled => {
                    Self::carry_forward(previous, &mut next, &op.destination);
                }
            }
        }

        for report in stale {
            if matches!(report.outcome, StaleOutcome::Failed(_) | StaleOutcome::Unsafe(_)) {
                Self::carry_forward(previous, &mut next, &report.path);
            }
        }

        next
    }

    /// Previous records for destinations the plan did not reach
    pub fn carry_forward(previous: &Manifest, next: &mut Manifest, path: &DestinationPath) {
        if let Some(entry) = previous.get(path) {
            next.insert(path.clone(), entry.clone());
        }
    }

    fn record(op: &Operation) -> Option<ManifestEntry> {
        let desired = op.desired.as_ref()?;
        Some(
            ManifestEntry::new(op.owner.clone(), desired.hash.clone(), op.kind)
                .with_contributors(op.contributors.clone())
                .with_symlink_fallback(desired.symlink_fallback),
        )
    }

    /// Classify stale files without touching them
    pub fn preview_stale<FS: FileSystem + ?Sized>(
        fs: &FS,
        project_root: &Path,
        stale: &[StaleFile],
    ) -> Vec<StaleReport> {
        stale
            .iter()
            .map(|file| {
                if let Err(e) = check_symlink_ancestors(&file.path, project_root) {
                    return StaleReport {
                        path: file.path.clone(),
                        outcome: StaleOutcome::Unsafe(e.to_string()),
                    };
                }
                let target = fs.inspect(&file.path.to_path(project_root));
                let outcome = match StaleDetector::classify(&file.entry, &target) {
                    StaleDecision::Delete => StaleOutcome::Deleted,
                    StaleDecision::KeepModified => StaleOutcome::Kept,
                    StaleDecision::AlreadyGone => StaleOutcome::AlreadyGone,
                };
                StaleReport {
                    path: file.path.clone(),
                    outcome,
                }
            })
            .collect()
    }

    /// Delete stale files whose content still matches the recorded hash
    pub fn remove_stale<FS: FileSystem + ?Sized>(
        fs: &FS,
        project_root: &Path,
        stale: &[StaleFile],
        events: &Arc<dyn RunEventSink>,
    ) -> Vec<StaleReport> {
        let mut reports = Self::preview_stale(fs, project_root, stale);

        for report in &mut reports {
            match report.outcome {
                StaleOutcome::Deleted => {
                    let target = report.path.to_path(project_root);
                    match fs.remove(&target) {
                        Ok(()) => events.on_event(RunEvent::StaleDeleted {
                            path: report.path.clone(),
                        }),
                        Err(e) => report.outcome = StaleOutcome::Failed(e.to_string()),
                    }
                }
                StaleOutcome::Kept => events.on_event(RunEvent::StaleKept {
                    path: report.path.clone(),
                }),
                StaleOutcome::AlreadyGone | StaleOutcome::Failed(_) | StaleOutcome::Unsafe(_) => {}
            }
        }

        reports
    }
}
