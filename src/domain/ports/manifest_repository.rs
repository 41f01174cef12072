//! ManifestRepository port - abstraction for manifest persistence
//!
//! This trait allows the application layer to load/save the manifest
//! without knowing about TOML serialization details.

use std::path::{Path, PathBuf};

use crate::domain::entities::Manifest;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Manifest operation errors. Every one of them aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("cannot read manifest {}: {source}", path.display())]
    NotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest {} is corrupted: {message}", path.display())]
    Corrupted { path: PathBuf, message: String },

    #[error("incompatible manifest {}: version {found}, expected {expected}", path.display())]
    Incompatible {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("cannot write manifest {}: {source}", path.display())]
    NotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Abstract repository for manifest persistence
///
/// The manifest tracks which destinations are managed and the hash of the
/// last managed write.
pub trait ManifestRepository {
    /// Load the manifest; a missing file yields an empty manifest
    fn load(&self, path: &Path) -> ManifestResult<Manifest>;

    /// Atomically replace the manifest at `path`
    fn save(&self, manifest: &Manifest, path: &Path) -> ManifestResult<()>;
}
