//! Scaffold file registry
//!
//! Collects, per destination, the candidate entries of every package that
//! declares it, in package-processing order. Validation problems are
//! aggregated so a user sees all of them at once.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::domain::entities::{processing_order, PackageDescriptor, ScaffoldFileEntry};
use crate::domain::value_objects::{
    normalize_relative, DestinationPath, PathError, PathResolver, ScaffoldKind,
};

/// Same package handed to the registry twice
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("package '{name}' was registered more than once")]
pub struct DuplicatePackageError {
    pub name: String,
}

/// A package declared an unsafe destination or source path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("package '{package}' declares unsafe path '{declared}': {error}")]
pub struct PathViolation {
    pub package: String,
    pub declared: String,
    pub error: PathError,
}

/// Any problem found while registering packages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    DuplicatePackage(#[from] DuplicatePackageError),

    #[error(transparent)]
    UnsafePath(#[from] PathViolation),

    #[error("package '{package}' maps '{destination}' to missing source '{}'", source_path.display())]
    MissingSource {
        package: String,
        destination: DestinationPath,
        source_path: PathBuf,
    },

    #[error("package '{package}' maps '{destination}' more than once")]
    DuplicateDestination {
        package: String,
        destination: DestinationPath,
    },

    #[error("package '{package}' maps '{destination}' without a source file")]
    NoSource {
        package: String,
        destination: DestinationPath,
    },
}

/// Per-destination candidate lists
#[derive(Debug, Clone, Default)]
pub struct ScaffoldRegistry {
    resolver: PathResolver,
    project_root: Option<PathBuf>,
    candidates: BTreeMap<DestinationPath, Vec<ScaffoldFileEntry>>,
    registered: HashSet<String>,
    next_order: usize,
}

impl ScaffoldRegistry {
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            resolver,
            ..Self::default()
        }
    }

    /// Also reject destinations routed through escaping symlinks under `root`
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    /// Register packages in processing order, returning every problem found.
    ///
    /// Entries of a package with errors are still recorded for the paths that
    /// did validate; the run refuses to write if anything is returned.
    pub fn register(&mut self, packages: &[PackageDescriptor]) -> Vec<RegistrationError> {
        let mut errors = Vec::new();

        for package in processing_order(packages) {
            if !self.registered.insert(package.name().to_string()) {
                errors.push(
                    DuplicatePackageError {
                        name: package.name().to_string(),
                    }
                    .into(),
                );
                continue;
            }

            let order = self.next_order;
            self.next_order += 1;
            let mut declared = HashSet::new();

            for mapping in package.mappings() {
                let destination = match self.resolve_destination(mapping.destination()) {
                    Ok(d) => d,
                    Err(error) => {
                        errors.push(violation(package, mapping.destination(), error));
                        continue;
                    }
                };
                // `web/x` and `[web-root]/x` normalize to the same key
                if !declared.insert(destination.clone()) {
                    errors.push(RegistrationError::DuplicateDestination {
                        package: package.name().to_string(),
                        destination,
                    });
                    continue;
                }

                let mut entry =
                    ScaffoldFileEntry::new(destination.clone(), package.name(), mapping.kind(), order)
                        .with_override(mapping.overrides())
                        .with_overwrite(mapping.overwrite());

                if mapping.kind() != ScaffoldKind::Skip {
                    let Some(raw_source) = mapping.source() else {
                        errors.push(RegistrationError::NoSource {
                            package: package.name().to_string(),
                            destination,
                        });
                        continue;
                    };
                    match package_file(package.root(), raw_source) {
                        Ok(source) => entry = entry.with_source(source),
                        Err(error) => {
                            errors.push(violation(package, raw_source, error));
                            continue;
                        }
                    }
                }

                if let Some(raw_prepend) = mapping.prepend() {
                    match package_file(package.root(), raw_prepend) {
                        Ok(prepend) => entry = entry.with_prepend(prepend),
                        Err(error) => {
                            errors.push(violation(package, raw_prepend, error));
                            continue;
                        }
                    }
                }

                self.candidates.entry(destination).or_default().push(entry);
            }
        }

        errors
    }

    fn resolve_destination(&self, raw: &str) -> Result<DestinationPath, PathError> {
        match &self.project_root {
            Some(root) => self.resolver.resolve_within(raw, root),
            None => self.resolver.normalize(raw),
        }
    }

    pub fn candidates(&self) -> &BTreeMap<DestinationPath, Vec<ScaffoldFileEntry>> {
        &self.candidates
    }

    pub fn candidates_for(&self, path: &DestinationPath) -> &[ScaffoldFileEntry] {
        self.candidates.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct destinations
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Every entry that references a source or prepend file
    pub fn source_files(&self) -> impl Iterator<Item = (&ScaffoldFileEntry, &Path)> {
        self.candidates.values().flatten().flat_map(|entry| {
            entry
                .source
                .as_deref()
                .into_iter()
                .chain(entry.prepend.as_deref())
                .map(move |p| (entry, p))
        })
    }
}

fn violation(package: &PackageDescriptor, declared: &str, error: PathError) -> RegistrationError {
    PathViolation {
        package: package.name().to_string(),
        declared: declared.to_string(),
        error,
    }
    .into()
}

/// Resolve a package-relative file, refusing anything outside the package root
fn package_file(root: &Path, raw: &str) -> Result<PathBuf, PathError> {
    let normalized = normalize_relative(raw)?;
    if normalized.is_empty() {
        return Err(PathError::Empty);
    }
    Ok(normalized.split('/').fold(root.to_path_buf(), |p, s| p.join(s)))
}
