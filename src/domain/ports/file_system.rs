//! FileSystem port - abstraction over file I/O operations
//!
//! This trait allows the application layer to materialize scaffold files
//! without depending on a concrete implementation (local disk, test doubles).

use std::path::{Path, PathBuf};

use crate::domain::services::TargetFileState;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Attach the path an `io::Error` happened at
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with temp-file + rename writes
/// - test doubles wrapping `LocalFs` to inject failures
pub trait FileSystem: Send + Sync {
    /// Read file content
    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Replace `path` with `content`; readers see the old or the new file,
    /// never a partial one. Parent directories are created.
    fn write_atomic(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Replace `link` with a symlink to `target`, atomically
    fn symlink_atomic(&self, link: &Path, target: &Path) -> FsResult<()>;

    /// Whether symlinks can be created inside `dir`
    fn supports_symlinks(&self, dir: &Path) -> bool;

    /// Current state of a destination. Symlinks are hashed by target.
    fn inspect(&self, path: &Path) -> TargetFileState;

    /// Check if anything exists at `path` (dangling links included)
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file or symlink
    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;
}
