//! Scaffold file entry - one candidate for one destination

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{DestinationPath, ScaffoldKind};

/// A (destination, package, source, kind) candidate created by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFileEntry {
    pub destination: DestinationPath,
    pub package: String,
    pub kind: ScaffoldKind,
    /// Absolute source file inside the package root (`None` for skip)
    pub source: Option<PathBuf>,
    /// Absolute prepend fragment (append only)
    pub prepend: Option<PathBuf>,
    pub overrides: bool,
    pub overwrite: bool,
    /// Position of the owning package in processing order
    pub order: usize,
}

impl ScaffoldFileEntry {
    pub fn new(
        destination: DestinationPath,
        package: impl Into<String>,
        kind: ScaffoldKind,
        order: usize,
    ) -> Self {
        Self {
            destination,
            package: package.into(),
            kind,
            source: None,
            prepend: None,
            overrides: false,
            overwrite: true,
            order,
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_prepend(mut self, prepend: impl Into<PathBuf>) -> Self {
        self.prepend = Some(prepend.into());
        self
    }

    pub fn with_override(mut self, overrides: bool) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
