//! Package entity
//!
//! A package descriptor is what the host package manager hands over: a name,
//! where the package is installed, its processing priority and the scaffold
//! files it wants in the project. Immutable once loaded.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ScaffoldKind;

/// One declared destination → source mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldMapping {
    destination: String,
    kind: ScaffoldKind,
    source: Option<String>,
    prepend: Option<String>,
    overrides: bool,
    overwrite: bool,
}

impl ScaffoldMapping {
    fn new(destination: impl Into<String>, kind: ScaffoldKind, source: Option<String>) -> Self {
        Self {
            destination: destination.into(),
            kind,
            source,
            prepend: None,
            overrides: false,
            overwrite: true,
        }
    }

    pub fn replace(destination: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(destination, ScaffoldKind::Replace, Some(source.into()))
    }

    pub fn append(destination: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(destination, ScaffoldKind::Append, Some(source.into()))
    }

    pub fn symlink(destination: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(destination, ScaffoldKind::Symlink, Some(source.into()))
    }

    pub fn skip(destination: impl Into<String>) -> Self {
        Self::new(destination, ScaffoldKind::Skip, None)
    }

    /// Declare that this package's file must win over other candidates
    pub fn with_override(mut self) -> Self {
        self.overrides = true;
        self
    }

    /// `false`: create the destination if missing, never replace it
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Fragment placed before the accumulated content (append only)
    pub fn with_prepend(mut self, prepend: impl Into<String>) -> Self {
        self.prepend = Some(prepend.into());
        self
    }

    /// Replace mappings become symlink mappings; other kinds are untouched
    pub fn into_symlink(mut self) -> Self {
        if self.kind == ScaffoldKind::Replace {
            self.kind = ScaffoldKind::Symlink;
        }
        self
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn kind(&self) -> ScaffoldKind {
        self.kind
    }

    /// Source file, relative to the package root
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn prepend(&self) -> Option<&str> {
        self.prepend.as_deref()
    }

    pub fn overrides(&self) -> bool {
        self.overrides
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }
}

/// A package that contributes scaffold files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    name: String,
    root: PathBuf,
    weight: i32,
    mappings: Vec<ScaffoldMapping>,
}

impl PackageDescriptor {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            weight: 0,
            mappings: Vec::new(),
        }
    }

    /// Explicit priority; higher weights are processed later and win ties
    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_mapping(mut self, mapping: ScaffoldMapping) -> Self {
        self.mappings.push(mapping);
        self
    }

    pub fn with_mappings(mut self, mappings: Vec<ScaffoldMapping>) -> Self {
        self.mappings.extend(mappings);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the package is installed in
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn mappings(&self) -> &[ScaffoldMapping] {
        &self.mappings
    }
}

/// Order packages for processing: ascending weight, dependency order on ties.
pub fn processing_order(packages: &[PackageDescriptor]) -> Vec<&PackageDescriptor> {
    let mut ordered: Vec<&PackageDescriptor> = packages.iter().collect();
    ordered.sort_by_key(|p| p.weight());
    ordered
}
