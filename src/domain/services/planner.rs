//! Operation planning service
//!
//! Pure domain logic that turns resolved winners into concrete operations.
//! The caller gathers the desired content and the current state of each
//! destination; this module only decides what to do with them.

use std::path::PathBuf;

use crate::domain::services::conflict_resolver::Winner;
use crate::domain::value_objects::{ContentHash, DestinationPath, ScaffoldKind};

/// Destination exists, is not managed, and overwriting was not allowed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("refusing to overwrite '{path}': file is not managed by scaffold")]
pub struct OverwriteRefusedError {
    pub path: DestinationPath,
}

/// Append target was modified since the last managed write
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{path}' was modified since the last scaffold write; appended content not applied")]
pub struct ContentDriftError {
    pub path: DestinationPath,
}

/// Why an operation does not touch the disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A package declared the destination as `skip`
    Declared,
    /// `overwrite = false` and the destination already exists
    Preserved,
    OverwriteRefused(OverwriteRefusedError),
    ContentDrift(ContentDriftError),
}

impl SkipReason {
    /// Warnings escalate to failures in strict mode
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            SkipReason::OverwriteRefused(_) | SkipReason::ContentDrift(_)
        )
    }

    pub fn message(&self) -> String {
        match self {
            SkipReason::Declared => "declared as skip".to_string(),
            SkipReason::Preserved => "exists; overwrite disabled".to_string(),
            SkipReason::OverwriteRefused(e) => e.to_string(),
            SkipReason::ContentDrift(e) => e.to_string(),
        }
    }
}

/// The action to take for a destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// Write the payload. `managed` is false when allow-overwrite took over
    /// a user-owned file.
    Apply { managed: bool },
    /// Current content already matches
    Unchanged,
    Skip(SkipReason),
}

/// What gets written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Content(Vec<u8>),
    /// Absolute link target
    Link(PathBuf),
}

/// Desired state of a destination, computed from package sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Desired {
    pub payload: Payload,
    pub hash: ContentHash,
    /// Symlink requested but the filesystem cannot link
    pub symlink_fallback: bool,
}

impl Desired {
    pub fn content(bytes: Vec<u8>) -> Self {
        let hash = ContentHash::from_bytes(&bytes);
        Self {
            payload: Payload::Content(bytes),
            hash,
            symlink_fallback: false,
        }
    }

    pub fn link(target: PathBuf) -> Self {
        let hash = ContentHash::from_link_target(&target);
        Self {
            payload: Payload::Link(target),
            hash,
            symlink_fallback: false,
        }
    }

    /// Copy written in place of a symlink
    pub fn fallback_copy(bytes: Vec<u8>) -> Self {
        Self {
            symlink_fallback: true,
            ..Self::content(bytes)
        }
    }
}

/// Information about a destination's current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFileState {
    /// Whether anything exists at the path
    pub exists: bool,
    /// Hash of the file (or link target); `None` for directories and
    /// unreadable files
    pub current_hash: Option<ContentHash>,
    /// Zero-length regular file
    pub is_empty: bool,
}

impl TargetFileState {
    /// File does not exist
    pub fn not_exists() -> Self {
        Self {
            exists: false,
            current_hash: None,
            is_empty: false,
        }
    }

    /// File exists with known hash
    pub fn exists_with_hash(hash: ContentHash) -> Self {
        Self {
            exists: true,
            current_hash: Some(hash),
            is_empty: false,
        }
    }

    /// Zero-length file
    pub fn empty() -> Self {
        Self {
            exists: true,
            current_hash: Some(ContentHash::from_bytes(b"")),
            is_empty: true,
        }
    }

    /// Something exists but cannot be hashed
    pub fn opaque() -> Self {
        Self {
            exists: true,
            current_hash: None,
            is_empty: false,
        }
    }
}

/// Policy inputs for a single decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteRule {
    /// Content accumulates from append fragments
    pub accumulate: bool,
    /// Mapping allows replacing an existing file
    pub overwrite: bool,
    /// Run-wide `--allow-overwrite`
    pub allow_overwrite: bool,
}

/// A planned action for a single destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub destination: DestinationPath,
    pub kind: ScaffoldKind,
    pub action: FileAction,
    /// `None` for declared skips
    pub desired: Option<Desired>,
    pub owner: String,
    pub contributors: Vec<String>,
}

impl Operation {
    /// Check if this writes to disk
    pub fn should_apply(&self) -> bool {
        matches!(self.action, FileAction::Apply { .. })
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self.action, FileAction::Unchanged)
    }

    pub fn is_skip(&self) -> bool {
        matches!(self.action, FileAction::Skip(_))
    }

    /// Check if this skip is a warning
    pub fn is_warning(&self) -> bool {
        matches!(&self.action, FileAction::Skip(reason) if reason.is_warning())
    }

    /// Whether the executor overwrites because the file is ours
    pub fn managed(&self) -> bool {
        matches!(self.action, FileAction::Apply { managed: true })
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.action {
            FileAction::Skip(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Result of planning a run, in destination order
#[derive(Debug, Clone, Default)]
pub struct OperationPlan {
    pub operations: Vec<Operation>,
}

impl OperationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    /// Operations that write to disk
    pub fn to_apply(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter().filter(|o| o.should_apply())
    }

    pub fn apply_count(&self) -> usize {
        self.to_apply().count()
    }

    pub fn unchanged_count(&self) -> usize {
        self.operations.iter().filter(|o| o.is_unchanged()).count()
    }

    /// Count skips, warnings included
    pub fn skip_count(&self) -> usize {
        self.operations.iter().filter(|o| o.is_skip()).count()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter().filter(|o| o.is_warning())
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    pub fn total(&self) -> usize {
        self.operations.len()
    }
}

/// Join append parts so each one ends on a line boundary
pub fn assemble_append<'a>(parts: impl IntoIterator<Item = &'a [u8]>) -> Vec<u8> {
    let mut out = Vec::new();
    for part in parts {
        if part.is_empty() {
            continue;
        }
        if !out.is_empty() && !out.ends_with(b"\n") {
            out.push(b'\n');
        }
        out.extend_from_slice(part);
    }
    if !out.is_empty() && !out.ends_with(b"\n") {
        out.push(b'\n');
    }
    out
}

/// Pure planning service
///
/// No filesystem operations - all I/O is done by the caller.
pub struct Planner;

impl Planner {
    /// Plan one winner
    ///
    /// # Arguments
    /// * `winner` - Resolved candidates for the destination
    /// * `desired` - Content to end up on disk (`None` for skip winners)
    /// * `target` - Current state of the destination
    /// * `recorded` - Hash of the last managed write, from the manifest
    /// * `allow_overwrite` - Run-wide overwrite permission
    pub fn plan(
        winner: &Winner,
        desired: Option<Desired>,
        target: &TargetFileState,
        recorded: Option<&ContentHash>,
        allow_overwrite: bool,
    ) -> Operation {
        let action = match &desired {
            None => FileAction::Skip(SkipReason::Declared),
            Some(desired) => Self::decide(
                &winner.destination,
                &desired.hash,
                target,
                recorded,
                WriteRule {
                    accumulate: winner.accumulates(),
                    overwrite: winner.overwrite(),
                    allow_overwrite,
                },
            ),
        };

        Operation {
            destination: winner.destination.clone(),
            kind: winner.kind(),
            action,
            desired,
            owner: winner.owner().to_string(),
            contributors: winner.contributors(),
        }
    }

    /// Decide the action for a destination
    pub fn decide(
        path: &DestinationPath,
        desired: &ContentHash,
        target: &TargetFileState,
        recorded: Option<&ContentHash>,
        rule: WriteRule,
    ) -> FileAction {
        if !target.exists {
            return FileAction::Apply { managed: true };
        }

        let current = match &target.current_hash {
            Some(h) => h,
            None => return Self::refuse(path, rule),
        };

        if current == desired {
            return FileAction::Unchanged;
        }

        if !rule.overwrite {
            return FileAction::Skip(SkipReason::Preserved);
        }

        if recorded == Some(current) {
            return FileAction::Apply { managed: true };
        }

        if rule.accumulate {
            return if target.is_empty {
                FileAction::Apply { managed: true }
            } else {
                Self::refuse(path, rule)
            };
        }

        if rule.allow_overwrite {
            return FileAction::Apply { managed: false };
        }

        Self::refuse(path, rule)
    }

    fn refuse(path: &DestinationPath, rule: WriteRule) -> FileAction {
        let reason = if rule.accumulate {
            SkipReason::ContentDrift(ContentDriftError { path: path.clone() })
        } else {
            SkipReason::OverwriteRefused(OverwriteRefusedError { path: path.clone() })
        };
        FileAction::Skip(reason)
    }
}
