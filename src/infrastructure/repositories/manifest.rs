//! TOML Manifest Repository
//!
//! Implements the ManifestRepository port using TOML format.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Manifest, ManifestEntry, MANIFEST_LOCK_FILE, MANIFEST_VERSION};
use crate::domain::ports::file_system::{FileSystem, FsError};
use crate::domain::ports::manifest_repository::{ManifestError, ManifestRepository};
use crate::domain::value_objects::{ContentHash, DestinationPath, ScaffoldKind};
use crate::infrastructure::fs::LocalFs;

/// TOML-based manifest repository
///
/// Stores the manifest as `scaffold-manifest.toml`; saves hold an exclusive
/// lock on the sibling `scaffold-manifest.lock`.
pub struct TomlManifestRepository {
    fs: LocalFs,
}

impl TomlManifestRepository {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for TomlManifestRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// TOML representation of a file entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlFileEntry {
    package: String,
    hash: String,
    #[serde(default)]
    kind: ScaffoldKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    contributors: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    symlink_fallback: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// TOML representation of the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlManifest {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    files: BTreeMap<String, TomlFileEntry>,
}

/// Parse manifest text. Keys that fail path validation are dropped and
/// remembered on the manifest.
pub fn parse_manifest(content: &str, path: &Path) -> Result<Manifest, ManifestError> {
    let toml_manifest: TomlManifest =
        toml::from_str(content).map_err(|e| ManifestError::Corrupted {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if toml_manifest.version != MANIFEST_VERSION {
        return Err(ManifestError::Incompatible {
            path: path.to_path_buf(),
            found: toml_manifest.version,
            expected: MANIFEST_VERSION,
        });
    }

    let mut manifest = Manifest::new();
    if let Some(at) = toml_manifest.generated_at {
        manifest.set_generated_at(at);
    }
    for (key, entry) in toml_manifest.files {
        let destination = match DestinationPath::new(&key) {
            Ok(d) => d,
            Err(_) => {
                manifest.ignore_key(key);
                continue;
            }
        };
        manifest.insert(
            destination,
            ManifestEntry::new(entry.package, ContentHash::new(&entry.hash), entry.kind)
                .with_contributors(entry.contributors)
                .with_symlink_fallback(entry.symlink_fallback),
        );
    }

    Ok(manifest)
}

/// Render a manifest as TOML text
pub fn render_manifest(manifest: &Manifest) -> Result<String, toml::ser::Error> {
    let files = manifest
        .entries()
        .map(|(key, entry)| {
            (
                key.as_str().to_string(),
                TomlFileEntry {
                    package: entry.package().to_string(),
                    hash: entry.hash().to_string(),
                    kind: entry.kind(),
                    contributors: entry.contributors().to_vec(),
                    symlink_fallback: entry.symlink_fallback(),
                },
            )
        })
        .collect();

    toml::to_string_pretty(&TomlManifest {
        version: manifest.version(),
        generated_at: manifest.generated_at(),
        files,
    })
}

fn lock_path(path: &Path) -> PathBuf {
    path.with_file_name(MANIFEST_LOCK_FILE)
}

fn not_writable(path: &Path, err: FsError) -> ManifestError {
    let source = match err {
        FsError::Io { source, .. } => source,
        other => std::io::Error::other(other.to_string()),
    };
    ManifestError::NotWritable {
        path: path.to_path_buf(),
        source,
    }
}

impl ManifestRepository for TomlManifestRepository {
    fn load(&self, path: &Path) -> Result<Manifest, ManifestError> {
        if !self.fs.exists(path) {
            return Ok(Manifest::new());
        }

        let content = fs::read_to_string(path).map_err(|e| ManifestError::NotReadable {
            path: path.to_path_buf(),
            source: e,
        })?;
        parse_manifest(&content, path)
    }

    fn save(&self, manifest: &Manifest, path: &Path) -> Result<(), ManifestError> {
        let content = render_manifest(manifest).map_err(|e| ManifestError::NotWritable {
            path: path.to_path_buf(),
            source: std::io::Error::other(e.to_string()),
        })?;

        let lock_path = lock_path(path);
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ManifestError::NotWritable {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        let lock_file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path).map_err(|e| ManifestError::NotWritable {
            path: lock_path.clone(),
            source: e,
        })?;
        lock_file
            .lock_exclusive()
            .map_err(|e| ManifestError::NotWritable {
                path: lock_path.clone(),
                source: e,
            })?;

        let result = self
            .fs
            .write_atomic(path, content.as_bytes())
            .map_err(|e| not_writable(path, e));

        // The lock file stays so every saver locks the same inode.
        let _ = lock_file.unlock();
        result
    }
}
