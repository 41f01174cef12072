//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};
use crate::domain::services::TargetFileState;
use crate::domain::value_objects::ContentHash;

/// Local file system implementation
///
/// Writes go to a temporary file in the destination directory, are synced,
/// then renamed over the destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(path: &Path) -> FsResult<PathBuf> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| FsError::at(&parent, e))?;
        Ok(parent)
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        fs::read(path).map_err(|e| FsError::at(path, e))
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        let parent = Self::ensure_parent(path)?;

        let mut tmp = NamedTempFile::new_in(&parent).map_err(|e| FsError::at(&parent, e))?;
        tmp.write_all(content).map_err(|e| FsError::at(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| FsError::at(tmp.path(), e))?;
        tmp.persist(path).map_err(|e| FsError::at(path, e.error))?;
        Ok(())
    }

    fn symlink_atomic(&self, link: &Path, target: &Path) -> FsResult<()> {
        let parent = Self::ensure_parent(link)?;

        // Reserve a unique name, then swap it for the link before renaming.
        let tmp = tempfile::Builder::new()
            .prefix(".scaffold-link")
            .tempfile_in(&parent)
            .map_err(|e| FsError::at(&parent, e))?;
        let tmp_path = tmp.into_temp_path();
        let tmp_owned = tmp_path.to_path_buf();
        tmp_path.close().map_err(|e| FsError::at(&tmp_owned, e))?;

        create_symlink(target, &tmp_owned).map_err(|e| FsError::at(&tmp_owned, e))?;
        if let Err(e) = fs::rename(&tmp_owned, link) {
            let _ = fs::remove_file(&tmp_owned);
            return Err(FsError::at(link, e));
        }
        Ok(())
    }

    fn supports_symlinks(&self, dir: &Path) -> bool {
        if fs::create_dir_all(dir).is_err() {
            return false;
        }
        let probe = match tempfile::Builder::new()
            .prefix(".scaffold-probe")
            .tempdir_in(dir)
        {
            Ok(p) => p,
            Err(_) => return false,
        };
        create_symlink(Path::new("target"), &probe.path().join("link")).is_ok()
    }

    fn inspect(&self, path: &Path) -> TargetFileState {
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(_) => return TargetFileState::not_exists(),
        };

        if meta.file_type().is_symlink() {
            return match fs::read_link(path) {
                Ok(target) => TargetFileState::exists_with_hash(ContentHash::from_link_target(&target)),
                Err(_) => TargetFileState::opaque(),
            };
        }

        if !meta.is_file() {
            return TargetFileState::opaque();
        }

        match fs::read(path) {
            Ok(content) if content.is_empty() => TargetFileState::empty(),
            Ok(content) => TargetFileState::exists_with_hash(ContentHash::from_bytes(&content)),
            Err(_) => TargetFileState::opaque(),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        fs::remove_file(path).map_err(|e| FsError::at(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_target: &Path, _link: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlinks are not supported on this platform",
    ))
}
