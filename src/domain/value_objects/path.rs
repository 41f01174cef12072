//! Destination Path Value Object
//!
//! Packages declare scaffold destinations as raw strings. Before anything
//! touches the disk those strings go through [`PathResolver`], which:
//! - substitutes `[location]` placeholders
//! - normalizes separators, `.` segments and trailing slashes
//! - rejects absolute paths, traversal (`..`) and reserved segments
//! - optionally rejects ancestors that are symlinks leading out of the root

use std::fmt;
use std::path::{Path, PathBuf};

use super::locations::Locations;

/// Segments a destination may never contain.
pub const DISALLOWED_SEGMENTS: &[&str] = &[".git"];

/// Error when path validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path is empty (or only separators / `.`)
    Empty,
    /// Path is absolute when relative is required
    AbsoluteNotAllowed { path: String },
    /// Path contains traversal components (..)
    ContainsTraversal { path: String },
    /// Path contains a NUL byte
    NulByte,
    /// Path contains a segment that is never writable
    DisallowedSegment { path: String, segment: String },
    /// Path names a file the engine reserves for itself
    Reserved { path: String },
    /// `[name]` placeholder with no configured location
    UnknownLocation { name: String },
    /// An existing ancestor is a symlink pointing outside the project root
    SymlinkEscape { path: String, link: PathBuf },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Empty => write!(f, "Path is empty"),
            PathError::AbsoluteNotAllowed { path } => {
                write!(f, "Absolute path '{}' is not allowed", path)
            }
            PathError::ContainsTraversal { path } => {
                write!(f, "Path '{}' contains traversal components (..)", path)
            }
            PathError::NulByte => write!(f, "Path contains a NUL byte"),
            PathError::DisallowedSegment { path, segment } => {
                write!(f, "Path '{}' contains disallowed segment '{}'", path, segment)
            }
            PathError::Reserved { path } => {
                write!(f, "Path '{}' is reserved by scaffold", path)
            }
            PathError::UnknownLocation { name } => {
                write!(f, "Unknown location placeholder '[{}]'", name)
            }
            PathError::SymlinkEscape { path, link } => write!(
                f,
                "Path '{}' goes through symlink '{}' which leaves the project root",
                path,
                link.display()
            ),
        }
    }
}

impl std::error::Error for PathError {}

/// A normalized, project-root-relative destination path
///
/// Always uses `/` as separator and never contains `.`, `..` or empty
/// segments, so two declarations of the same file compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DestinationPath(String);

impl DestinationPath {
    /// Validate and normalize a raw relative path (no placeholders)
    pub fn new(raw: &str) -> Result<Self, PathError> {
        let normalized = normalize_relative(raw)?;
        if normalized.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Last segment
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Absolute location of this destination under `root`
    pub fn to_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in self.segments() {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for DestinationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DestinationPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for DestinationPath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Normalize a relative path into `/`-joined segments.
///
/// Returns an empty string for paths that collapse to the root (`""`, `.`,
/// `./`). Callers that need a file path reject that case themselves.
pub fn normalize_relative(raw: &str) -> Result<String, PathError> {
    if raw.contains('\0') {
        return Err(PathError::NulByte);
    }
    if is_absolute(raw) {
        return Err(PathError::AbsoluteNotAllowed {
            path: raw.to_string(),
        });
    }

    let unified = raw.replace('\\', "/");
    let mut segments = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(PathError::ContainsTraversal {
                    path: raw.to_string(),
                })
            }
            other => {
                if DISALLOWED_SEGMENTS.contains(&other) {
                    return Err(PathError::DisallowedSegment {
                        path: raw.to_string(),
                        segment: other.to_string(),
                    });
                }
                segments.push(other);
            }
        }
    }

    Ok(segments.join("/"))
}

fn is_absolute(raw: &str) -> bool {
    if raw.starts_with('/') || raw.starts_with('\\') {
        return true;
    }
    let bytes = raw.as_bytes();
    // Windows drive prefix (`C:`), with or without a separator
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return true;
    }
    Path::new(raw).is_absolute()
}

/// Resolves raw destination strings declared by packages
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    locations: Locations,
    reserved: Vec<String>,
}

impl PathResolver {
    pub fn new(locations: Locations) -> Self {
        Self {
            locations,
            reserved: Vec::new(),
        }
    }

    /// Reserve a path (e.g. the manifest file) so no package can target it
    pub fn with_reserved(mut self, path: impl Into<String>) -> Self {
        self.reserved.push(path.into());
        self
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    /// Substitute placeholders and normalize. Pure; never touches the disk.
    pub fn normalize(&self, raw: &str) -> Result<DestinationPath, PathError> {
        let expanded = self.locations.expand(raw)?;
        let path = DestinationPath::new(&expanded)?;
        if self.reserved.iter().any(|r| r == path.as_str()) {
            return Err(PathError::Reserved {
                path: path.as_str().to_string(),
            });
        }
        Ok(path)
    }

    /// Normalize, then make sure no existing ancestor under `root` is a
    /// symlink whose target lies outside `root`.
    pub fn resolve_within(&self, raw: &str, root: &Path) -> Result<DestinationPath, PathError> {
        let path = self.normalize(raw)?;
        check_symlink_ancestors(&path, root)?;
        Ok(path)
    }
}

/// Walk the existing ancestors of `path` under `root`.
///
/// The final segment is not checked: writes replace it via rename, which
/// swaps the link itself rather than following it.
pub fn check_symlink_ancestors(path: &DestinationPath, root: &Path) -> Result<(), PathError> {
    let canonical_root = match root.canonicalize() {
        Ok(r) => r,
        // Nothing exists yet, so nothing can redirect a write.
        Err(_) => return Ok(()),
    };

    let segments: Vec<&str> = path.segments().collect();
    let mut current = root.to_path_buf();
    for segment in &segments[..segments.len().saturating_sub(1)] {
        current.push(segment);
        let meta = match std::fs::symlink_metadata(&current) {
            Ok(meta) => meta,
            Err(_) => break,
        };
        if !meta.file_type().is_symlink() {
            continue;
        }
        let escapes = match current.canonicalize() {
            Ok(target) => !target.starts_with(&canonical_root),
            // Dangling link: a write would create its target wherever it points.
            Err(_) => true,
        };
        if escapes {
            return Err(PathError::SymlinkEscape {
                path: path.as_str().to_string(),
                link: current,
            });
        }
    }
    Ok(())
}
