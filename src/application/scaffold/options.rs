//! Scaffold Options
//!
//! Configuration types for scaffold runs.

use std::path::PathBuf;

use crate::domain::entities::MANIFEST_FILE;
use crate::domain::value_objects::Locations;

/// Options for the scaffold use case
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Project root; every destination resolves under it
    pub project_root: PathBuf,
    /// Location placeholders available to mappings
    pub locations: Locations,
    /// Replace user-owned files that differ from the scaffold source
    pub allow_overwrite: bool,
    /// Refused writes fail the run instead of warning
    pub strict: bool,
    /// Plan only; nothing is written, deleted or recorded
    pub dry_run: bool,
}

impl ScaffoldOptions {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            locations: Locations::default(),
            allow_overwrite: false,
            strict: false,
            dry_run: false,
        }
    }

    pub fn with_locations(mut self, locations: Locations) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_allow_overwrite(mut self, allow: bool) -> Self {
        self.allow_overwrite = allow;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Fixed manifest location under the project root
    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(MANIFEST_FILE)
    }
}
