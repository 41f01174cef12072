//! Manifest entity - tracks scaffolded file hashes
//!
//! The manifest records which destinations the engine manages, who owns them
//! and the hash of the last managed write. It's a pure data structure - I/O
//! is handled by ManifestRepository.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{ContentHash, DestinationPath, ScaffoldKind};

/// Current manifest schema version
pub const MANIFEST_VERSION: u32 = 1;

/// Fixed location of the manifest, relative to the project root
pub const MANIFEST_FILE: &str = "scaffold-manifest.toml";

/// Advisory lock taken while the manifest is saved; never removed
pub const MANIFEST_LOCK_FILE: &str = "scaffold-manifest.lock";

/// Manifest record for one managed destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Package that owns the destination
    package: String,
    /// Hash of the last managed write
    hash: ContentHash,
    kind: ScaffoldKind,
    /// Every package whose content ended up in the file (append)
    contributors: Vec<String>,
    /// Symlink requested but written as a copy
    symlink_fallback: bool,
}

impl ManifestEntry {
    pub fn new(package: impl Into<String>, hash: ContentHash, kind: ScaffoldKind) -> Self {
        Self {
            package: package.into(),
            hash,
            kind,
            contributors: Vec::new(),
            symlink_fallback: false,
        }
    }

    pub fn with_contributors(mut self, contributors: Vec<String>) -> Self {
        self.contributors = contributors;
        self
    }

    pub fn with_symlink_fallback(mut self, fallback: bool) -> Self {
        self.symlink_fallback = fallback;
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    pub fn kind(&self) -> ScaffoldKind {
        self.kind
    }

    pub fn contributors(&self) -> &[String] {
        &self.contributors
    }

    pub fn symlink_fallback(&self) -> bool {
        self.symlink_fallback
    }
}

/// Destinations managed by the engine, keyed by normalized path
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    version: u32,
    generated_at: Option<DateTime<Utc>>,
    entries: BTreeMap<DestinationPath, ManifestEntry>,
    /// Keys found on disk that no longer pass path validation
    ignored: Vec<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

impl Manifest {
    /// Create a new empty manifest
    pub fn new() -> Self {
        Self {
            version: MANIFEST_VERSION,
            generated_at: None,
            entries: BTreeMap::new(),
            ignored: Vec::new(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    pub fn set_generated_at(&mut self, at: DateTime<Utc>) {
        self.generated_at = Some(at);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, path: &DestinationPath) -> Option<&ManifestEntry> {
        self.entries.get(path)
    }

    /// Recorded hash for a destination
    pub fn get_hash(&self, path: &DestinationPath) -> Option<&ContentHash> {
        self.entries.get(path).map(|e| e.hash())
    }

    pub fn insert(&mut self, path: DestinationPath, entry: ManifestEntry) {
        self.entries.insert(path, entry);
    }

    pub fn contains(&self, path: &DestinationPath) -> bool {
        self.entries.contains_key(path)
    }

    pub fn remove(&mut self, path: &DestinationPath) -> Option<ManifestEntry> {
        self.entries.remove(path)
    }

    pub fn keys(&self) -> impl Iterator<Item = &DestinationPath> {
        self.entries.keys()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&DestinationPath, &ManifestEntry)> {
        self.entries.iter()
    }

    /// Destinations owned by a given package
    pub fn owned_by<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a DestinationPath> {
        self.entries
            .iter()
            .filter(move |(_, e)| e.package() == package)
            .map(|(k, _)| k)
    }

    /// Record a stored key that was dropped on load
    pub fn ignore_key(&mut self, key: impl Into<String>) {
        self.ignored.push(key.into());
    }

    pub fn ignored_keys(&self) -> &[String] {
        &self.ignored
    }

    /// Sorted list of managed destinations (for `.gitignore` generation)
    pub fn managed_paths(&self) -> Vec<String> {
        self.entries.keys().map(|k| k.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests;
