//! Stale file detection
//!
//! Detects destinations recorded in the previous manifest that no package
//! provides anymore, and decides whether each one may be removed.

use std::collections::BTreeMap;

use crate::domain::entities::{Manifest, ManifestEntry};
use crate::domain::services::planner::TargetFileState;
use crate::domain::value_objects::DestinationPath;

/// A managed destination with no current winner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleFile {
    pub path: DestinationPath,
    pub entry: ManifestEntry,
}

/// What to do with a stale destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleDecision {
    /// Untouched since our last write
    Delete,
    /// User modified it; keep the file, drop the record
    KeepModified,
    /// Already removed by someone else
    AlreadyGone,
}

/// Result of stale detection
#[derive(Debug, Clone, Default)]
pub struct StaleDetectionResult {
    pub stale: Vec<StaleFile>,
    /// Manifest keys that still have a winner
    pub retained: Vec<DestinationPath>,
}

impl StaleDetectionResult {
    pub fn is_empty(&self) -> bool {
        self.stale.is_empty()
    }
}

/// Pure stale detection service
pub struct StaleDetector;

impl StaleDetector {
    /// Split the previous manifest into stale and retained keys
    pub fn detect<V>(
        previous: &Manifest,
        current: &BTreeMap<DestinationPath, V>,
    ) -> StaleDetectionResult {
        let mut result = StaleDetectionResult::default();

        for (path, entry) in previous.entries() {
            if current.contains_key(path) {
                result.retained.push(path.clone());
            } else {
                result.stale.push(StaleFile {
                    path: path.clone(),
                    entry: entry.clone(),
                });
            }
        }

        result
    }

    /// Decide whether a stale file may be deleted
    pub fn classify(entry: &ManifestEntry, target: &TargetFileState) -> StaleDecision {
        if !target.exists {
            return StaleDecision::AlreadyGone;
        }
        match &target.current_hash {
            Some(current) if current == entry.hash() => StaleDecision::Delete,
            _ => StaleDecision::KeepModified,
        }
    }
}
