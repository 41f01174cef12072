//! Conflict resolution service
//!
//! Picks, for every destination, the candidate that ends up on disk.
//!
//! Candidates are split into *base* entries (`replace`, `symlink`, `skip`)
//! and *fragments* (`append`). Precedence picks exactly one base:
//! 1. a single `override` claim wins
//! 2. two or more claims are a hard conflict
//! 3. otherwise the last-processed package wins
//!
//! Fragments never compete; they accumulate around the base in processing
//! order.

use std::collections::BTreeMap;

use crate::domain::entities::ScaffoldFileEntry;
use crate::domain::value_objects::{DestinationPath, ScaffoldKind};

/// A destination whose precedence cannot be decided
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error("'{path}' is overridden by both '{first}' and '{second}'")]
    AmbiguousOverride {
        path: DestinationPath,
        first: String,
        second: String,
    },

    #[error("'{fragment}' appends to '{path}', which '{base}' provides as a symlink")]
    AppendToSymlink {
        path: DestinationPath,
        base: String,
        fragment: String,
    },
}

impl ConflictError {
    pub fn path(&self) -> &DestinationPath {
        match self {
            ConflictError::AmbiguousOverride { path, .. } => path,
            ConflictError::AppendToSymlink { path, .. } => path,
        }
    }
}

/// The resolved content source of one destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner {
    pub destination: DestinationPath,
    /// Winning replace/symlink/skip entry, if any package declared one
    pub base: Option<ScaffoldFileEntry>,
    /// Append entries in processing order
    pub fragments: Vec<ScaffoldFileEntry>,
    /// Packages whose base entry lost
    pub overridden: Vec<String>,
}

impl Winner {
    /// Package recorded as the owner in the manifest
    pub fn owner(&self) -> &str {
        match (&self.base, self.fragments.last()) {
            (Some(base), _) => &base.package,
            (None, Some(last)) => &last.package,
            (None, None) => "",
        }
    }

    /// Effective kind: the base's kind, or `append` for fragment-only paths
    pub fn kind(&self) -> ScaffoldKind {
        match &self.base {
            Some(base) => base.kind,
            None => ScaffoldKind::Append,
        }
    }

    /// Whether fragments are merged into this destination
    pub fn accumulates(&self) -> bool {
        !self.fragments.is_empty() && self.kind() != ScaffoldKind::Skip
    }

    /// `overwrite = false` on the base turns replacement of an existing file off
    pub fn overwrite(&self) -> bool {
        self.base.as_ref().map(|b| b.overwrite).unwrap_or(true)
    }

    /// Every package whose content ends up in the file, in processing order
    pub fn contributors(&self) -> Vec<String> {
        let mut entries: Vec<&ScaffoldFileEntry> =
            self.base.iter().chain(self.fragments.iter()).collect();
        entries.sort_by_key(|e| e.order);

        let mut names: Vec<String> = Vec::new();
        for entry in entries {
            if !names.contains(&entry.package) {
                names.push(entry.package.clone());
            }
        }
        names
    }
}

/// Winners and conflicts of one resolution pass
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub winners: BTreeMap<DestinationPath, Winner>,
    pub conflicts: Vec<ConflictError>,
}

impl Resolution {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Deterministic precedence over registry candidates
pub struct ConflictResolver;

impl ConflictResolver {
    /// Resolve every destination. Conflicting paths produce no winner.
    pub fn resolve(candidates: &BTreeMap<DestinationPath, Vec<ScaffoldFileEntry>>) -> Resolution {
        let mut resolution = Resolution::default();

        for (path, entries) in candidates {
            match Self::resolve_path(path, entries) {
                Ok(winner) => {
                    resolution.winners.insert(path.clone(), winner);
                }
                Err(mut errors) => resolution.conflicts.append(&mut errors),
            }
        }

        resolution
    }

    /// Resolve a single destination's candidate list
    pub fn resolve_path(
        path: &DestinationPath,
        entries: &[ScaffoldFileEntry],
    ) -> Result<Winner, Vec<ConflictError>> {
        let mut ordered: Vec<&ScaffoldFileEntry> = entries.iter().collect();
        ordered.sort_by_key(|e| e.order);

        let (bases, fragments): (Vec<&ScaffoldFileEntry>, Vec<&ScaffoldFileEntry>) =
            ordered.into_iter().partition(|e| e.kind.is_base());

        let claims: Vec<&ScaffoldFileEntry> = bases.iter().copied().filter(|e| e.overrides).collect();
        if let Some((first, rest)) = claims.split_first() {
            if !rest.is_empty() {
                return Err(rest
                    .iter()
                    .map(|other| ConflictError::AmbiguousOverride {
                        path: path.clone(),
                        first: first.package.clone(),
                        second: other.package.clone(),
                    })
                    .collect());
            }
        }

        let base = claims.first().or(bases.last()).copied();

        if let Some(base) = base.filter(|b| b.kind == ScaffoldKind::Symlink) {
            if !fragments.is_empty() {
                return Err(fragments
                    .iter()
                    .map(|f| ConflictError::AppendToSymlink {
                        path: path.clone(),
                        base: base.package.clone(),
                        fragment: f.package.clone(),
                    })
                    .collect());
            }
        }

        let overridden = bases
            .iter()
            .filter(|b| Some(**b) != base)
            .map(|b| b.package.clone())
            .collect();

        Ok(Winner {
            destination: path.clone(),
            base: base.cloned(),
            fragments: fragments.into_iter().cloned().collect(),
            overridden,
        })
    }
}
