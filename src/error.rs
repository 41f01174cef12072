//! Error types for scaffold-sync
//!
//! Uses `thiserror` for library errors. Per-file problems (refused writes,
//! I/O failures) are reported in a `RunResult`; only errors that abort a
//! whole run end up here.

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ports::{FsError, ManifestError, PackageSourceError};

/// Result type alias for scaffold operations
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Errors that abort a run
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Manifest could not be read, parsed or written
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// `scaffold.toml` is unreadable or invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The host could not produce a package list
    #[error(transparent)]
    Packages(#[from] PackageSourceError),

    #[error(transparent)]
    Fs(#[from] FsError),

    /// Project root is missing or not a directory
    #[error("project root '{}' is not a directory", .0.display())]
    ProjectRoot(std::path::PathBuf),
}
