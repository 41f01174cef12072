//! Scaffold Use Case
//!
//! Orchestrates a scaffold run:
//! 1. Register packages and validate every declared path
//! 2. Resolve conflicts between packages
//! 3. Load the previous manifest and plan each destination
//! 4. Execute the plan (write files)
//! 5. Remove stale files and save the new manifest
//!
//! Validation completes before anything is written. Business rules live in
//! the domain services; this type only sequences them and does the I/O.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use rayon::prelude::*;

use crate::application::executor::{CancellationToken, Executor, OpOutcome};
use crate::application::manifest_tracker::{ManifestTracker, StaleOutcome, StaleReport};
use crate::config::CONFIG_FILE;
use crate::domain::entities::{Manifest, PackageDescriptor, MANIFEST_FILE, MANIFEST_LOCK_FILE};
use crate::domain::ports::{
    FileSystem, ManifestRepository, NoopEventSink, RunEvent, RunEventSink,
};
use crate::domain::services::{
    assemble_append, ConflictResolver, Desired, OperationPlan, Planner, RegistrationError,
    Resolution, ScaffoldRegistry, StaleDetector, TargetFileState, Winner,
};
use crate::domain::value_objects::{PathResolver, ScaffoldKind};
use crate::error::{ScaffoldError, ScaffoldResult};

use super::options::ScaffoldOptions;
use super::result::{FileFailure, RunResult, SkippedFile};

/// Project-root files the engine owns; no package may target them
const RESERVED_FILES: &[&str] = &[MANIFEST_FILE, MANIFEST_LOCK_FILE, CONFIG_FILE];

/// Scaffold use case - orchestrates a run
///
/// Parameterized by its ports so tests can swap the filesystem or the
/// manifest store.
pub struct ScaffoldUseCase<MR, FS>
where
    MR: ManifestRepository,
    FS: FileSystem,
{
    manifest_repo: MR,
    file_system: FS,
    events: Arc<dyn RunEventSink>,
    cancel: CancellationToken,
}

impl<MR, FS> ScaffoldUseCase<MR, FS>
where
    MR: ManifestRepository,
    FS: FileSystem,
{
    pub fn new(manifest_repo: MR, file_system: FS) -> Self {
        Self {
            manifest_repo,
            file_system,
            events: Arc::new(NoopEventSink),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn RunEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Share a cancellation flag with a signal handler
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn file_system(&self) -> &FS {
        &self.file_system
    }

    pub fn manifest_repo(&self) -> &MR {
        &self.manifest_repo
    }

    /// Validate and preview without writing anything
    pub fn before_require(
        &self,
        packages: &[PackageDescriptor],
        options: &ScaffoldOptions,
    ) -> ScaffoldResult<RunResult> {
        self.scaffold(packages, &options.clone().with_dry_run(true))
    }

    /// Run the full pipeline for `packages`, in dependency order
    pub fn scaffold(
        &self,
        packages: &[PackageDescriptor],
        options: &ScaffoldOptions,
    ) -> ScaffoldResult<RunResult> {
        let root = options.project_root.as_path();
        if !root.is_dir() {
            return Err(ScaffoldError::ProjectRoot(root.to_path_buf()));
        }

        let mut result = RunResult::new();
        result.dry_run = options.dry_run;

        self.events.on_event(RunEvent::Started {
            package_count: packages.len(),
        });

        // Step 1: Load the previous manifest; failures abort the run
        let manifest_path = options.manifest_path();
        let previous = self.manifest_repo.load(&manifest_path)?;
        for key in previous.ignored_keys() {
            result.add_warning(format!("ignored invalid manifest entry '{}'", key));
        }

        // Step 2: Validation pass
        let resolution = self.validate(packages, options, &mut result);
        if !result.is_valid() {
            tracing::warn!(
                conflicts = result.conflicts.len(),
                violations = result.path_violations.len(),
                errors = result.validation_errors.len(),
                "validation failed; nothing written"
            );
            result.managed_paths = previous.managed_paths();
            self.complete(&result);
            return Ok(result);
        }

        // Step 3: Plan
        let plan = self.plan(&resolution, &previous, options, &mut result);
        tracing::debug!(
            apply = plan.apply_count(),
            unchanged = plan.unchanged_count(),
            skip = plan.skip_count(),
            "planned"
        );

        if options.strict && plan.has_warnings() {
            for op in plan.warnings() {
                if let Some(reason) = op.skip_reason() {
                    result.validation_errors.push(reason.message());
                }
            }
            result.managed_paths = previous.managed_paths();
            self.complete(&result);
            return Ok(result);
        }

        let stale = StaleDetector::detect(&previous, &resolution.winners);

        // Step 4: Execute (if not dry run)
        if options.dry_run {
            let outcomes = preview_outcomes(&plan);
            Self::record_outcomes(&plan, &outcomes, &mut result);
            let reports = ManifestTracker::preview_stale(&self.file_system, root, &stale.stale);
            Self::record_stale(&reports, &mut result);
            let next = ManifestTracker::next_manifest(&previous, &plan, &outcomes, &reports);
            result.managed_paths = next.managed_paths();
            self.complete(&result);
            return Ok(result);
        }

        let executor = Executor::new(&self.file_system, self.cancel.clone(), self.events.clone());
        let report = executor.execute(&plan, root);
        Self::record_outcomes(&plan, &report.outcomes, &mut result);

        if report.was_cancelled() {
            result.cancelled = report.cancelled_count();
            tracing::warn!(
                remaining = result.cancelled,
                "cancelled; manifest left unchanged"
            );
            result.managed_paths = previous.managed_paths();
            self.complete(&result);
            return Ok(result);
        }

        // Step 5: Stale files, then the manifest, last
        let reports =
            ManifestTracker::remove_stale(&self.file_system, root, &stale.stale, &self.events);
        Self::record_stale(&reports, &mut result);

        let mut next = ManifestTracker::next_manifest(&previous, &plan, &report.outcomes, &reports);
        for failure in &result.failed {
            if !next.contains(&failure.path) {
                ManifestTracker::carry_forward(&previous, &mut next, &failure.path);
            }
        }

        if needs_save(&previous, &next, &manifest_path) {
            next.set_generated_at(Utc::now());
            self.manifest_repo.save(&next, &manifest_path)?;
            tracing::debug!(path = %manifest_path.display(), entries = next.len(), "saved manifest");
        }

        result.managed_paths = next.managed_paths();
        self.complete(&result);
        Ok(result)
    }

    /// Register, check sources, resolve. Problems land in `result`.
    fn validate(
        &self,
        packages: &[PackageDescriptor],
        options: &ScaffoldOptions,
        result: &mut RunResult,
    ) -> Resolution {
        let resolver = RESERVED_FILES
            .iter()
            .fold(PathResolver::new(options.locations.clone()), |r, f| {
                r.with_reserved(*f)
            });
        let mut registry = ScaffoldRegistry::new(resolver).with_project_root(&options.project_root);

        let mut errors = registry.register(packages);
        for (entry, source) in registry.source_files() {
            if !self.file_system.exists(source) {
                errors.push(RegistrationError::MissingSource {
                    package: entry.package.clone(),
                    destination: entry.destination.clone(),
                    source_path: source.to_path_buf(),
                });
            }
        }

        for error in errors {
            match error {
                RegistrationError::UnsafePath(violation) => result.path_violations.push(violation),
                other => result.validation_errors.push(other.to_string()),
            }
        }

        let resolution = ConflictResolver::resolve(registry.candidates());
        result.conflicts = resolution.conflicts.clone();

        self.events.on_event(RunEvent::Validated {
            destinations: registry.len(),
            conflicts: result.conflicts.len(),
            violations: result.path_violations.len(),
        });

        resolution
    }

    /// Gather desired content and current state (in parallel), then decide
    fn plan(
        &self,
        resolution: &Resolution,
        previous: &Manifest,
        options: &ScaffoldOptions,
        result: &mut RunResult,
    ) -> OperationPlan {
        let root = options.project_root.as_path();
        let wants_links = resolution
            .winners
            .values()
            .any(|w| w.kind() == ScaffoldKind::Symlink);
        let links = wants_links && self.symlinks_supported(root, options.dry_run);

        let fs = &self.file_system;
        let winners: Vec<&Winner> = resolution.winners.values().collect();
        let prepared: Vec<(Result<Option<Desired>, String>, TargetFileState)> = winners
            .par_iter()
            .map(|winner| {
                (
                    desired_for(fs, winner, links),
                    fs.inspect(&winner.destination.to_path(root)),
                )
            })
            .collect();

        let mut plan = OperationPlan::new();
        for (winner, (desired, target)) in winners.into_iter().zip(prepared) {
            match desired {
                Ok(desired) => plan.add(Planner::plan(
                    winner,
                    desired,
                    &target,
                    previous.get_hash(&winner.destination),
                    options.allow_overwrite,
                )),
                Err(error) => result.failed.push(FileFailure {
                    path: winner.destination.clone(),
                    error,
                }),
            }
        }
        plan
    }

    fn symlinks_supported(&self, root: &Path, dry_run: bool) -> bool {
        // Probing creates a temporary link, so a dry run assumes the platform default.
        if dry_run {
            return cfg!(unix);
        }
        let supported = self.file_system.supports_symlinks(root);
        if !supported {
            tracing::info!("symlinks unavailable; copying instead");
        }
        supported
    }

    fn record_outcomes(plan: &OperationPlan, outcomes: &[OpOutcome], result: &mut RunResult) {
        for (op, outcome) in plan.operations.iter().zip(outcomes) {
            let path = op.destination.clone();
            match outcome {
                OpOutcome::Applied(_) => result.applied.push(path),
                OpOutcome::Unchanged => result.unchanged.push(path),
                OpOutcome::Skipped(reason) => {
                    if reason.is_warning() {
                        result.add_warning(reason.message());
                    }
                    result.skipped.push(SkippedFile {
                        path,
                        reason: reason.clone(),
                    });
                }
                OpOutcome::Failed(error) => result.failed.push(FileFailure {
                    path,
                    error: error.clone(),
                }),
                OpOutcome::Cancelled => {}
            }
        }
    }

    fn record_stale(reports: &[StaleReport], result: &mut RunResult) {
        for report in reports {
            match &report.outcome {
                StaleOutcome::Deleted => result.deleted.push(report.path.clone()),
                StaleOutcome::Kept => {
                    result.add_warning(format!(
                        "'{}' is no longer provided by any package but was modified; kept",
                        report.path
                    ));
                    result.kept.push(report.path.clone());
                }
                StaleOutcome::AlreadyGone => {}
                StaleOutcome::Unsafe(error) => {
                    result.add_warning(format!("'{}' not removed: {}", report.path, error));
                    result.kept.push(report.path.clone());
                }
                StaleOutcome::Failed(error) => result.failed.push(FileFailure {
                    path: report.path.clone(),
                    error: error.clone(),
                }),
            }
        }
    }

    fn complete(&self, result: &RunResult) {
        self.events.on_event(RunEvent::Completed {
            applied: result.applied_count(),
            unchanged: result.unchanged_count(),
            skipped: result.skipped_count(),
            failed: result.failed_count(),
            deleted: result.deleted_count(),
        });
    }
}

/// Content (or link) the destination should end up with
fn desired_for<FS: FileSystem + ?Sized>(
    fs: &FS,
    winner: &Winner,
    links: bool,
) -> Result<Option<Desired>, String> {
    let base = winner.base.as_ref();

    if let Some(base) = base {
        match base.kind {
            ScaffoldKind::Skip => return Ok(None),
            ScaffoldKind::Symlink => {
                let source = base.source().ok_or_else(|| no_source(winner))?;
                return if links {
                    Ok(Some(Desired::link(source.to_path_buf())))
                } else {
                    Ok(Some(Desired::fallback_copy(read(fs, source)?)))
                };
            }
            ScaffoldKind::Replace | ScaffoldKind::Append => {}
        }
    }

    let base_content = match base.and_then(|b| b.source()) {
        Some(source) => read(fs, source)?,
        None => Vec::new(),
    };
    if !winner.accumulates() {
        return Ok(Some(Desired::content(base_content)));
    }

    let mut prepends = Vec::new();
    let mut appends = Vec::new();
    for fragment in &winner.fragments {
        if let Some(prepend) = fragment.prepend.as_deref() {
            prepends.push(read(fs, prepend)?);
        }
        if let Some(source) = fragment.source() {
            appends.push(read(fs, source)?);
        }
    }

    let parts = prepends
        .iter()
        .chain(std::iter::once(&base_content))
        .chain(appends.iter())
        .map(Vec::as_slice);
    Ok(Some(Desired::content(assemble_append(parts))))
}

fn read<FS: FileSystem + ?Sized>(fs: &FS, path: &Path) -> Result<Vec<u8>, String> {
    fs.read(path).map_err(|e| e.to_string())
}

/// Outcomes a dry run reports: the plan, as if every write succeeded
fn preview_outcomes(plan: &OperationPlan) -> Vec<OpOutcome> {
    plan.operations
        .iter()
        .map(|op| match (op.skip_reason(), &op.desired) {
            (Some(reason), _) => OpOutcome::Skipped(reason.clone()),
            (None, _) if op.is_unchanged() => OpOutcome::Unchanged,
            (None, Some(desired)) => OpOutcome::Applied(desired.hash.clone()),
            (None, None) => OpOutcome::Unchanged,
        })
        .collect()
}

/// Skip rewriting an identical manifest so no-op runs leave the tree untouched
fn needs_save(previous: &Manifest, next: &Manifest, path: &Path) -> bool {
    if !previous.ignored_keys().is_empty() {
        return true;
    }
    if !path.exists() {
        return !next.is_empty();
    }
    !previous.entries().eq(next.entries())
}

fn no_source(winner: &Winner) -> String {
    format!("'{}' has no source file", winner.destination)
}
