//! `.gitignore` writer
//!
//! Maintains a marked block of managed paths in the project's root
//! `.gitignore`. Everything outside the block belongs to the user.

use std::path::Path;

use crate::domain::ports::{FileSystem, FsResult};
use crate::domain::value_objects::GitignoreStrategy;

pub const BLOCK_BEGIN: &str = "# BEGIN scaffold managed files";
pub const BLOCK_END: &str = "# END scaffold managed files";

/// What happened to `.gitignore`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitignoreChange {
    Written,
    Removed,
    Unchanged,
}

/// Rewrite `existing` for the given strategy; `None` means leave it alone
pub fn update_content(
    existing: &str,
    strategy: GitignoreStrategy,
    managed: &[String],
) -> Option<String> {
    let user = strip_block(existing);
    let updated = match strategy {
        GitignoreStrategy::None => return None,
        GitignoreStrategy::IncludeManagedFiles => user,
        GitignoreStrategy::IgnoreManagedFiles if managed.is_empty() => user,
        GitignoreStrategy::IgnoreManagedFiles => {
            let mut out = user;
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            if !out.is_empty() && !out.ends_with("\n\n") {
                out.push('\n');
            }
            out.push_str(&render_block(managed));
            out
        }
    };
    (updated != existing).then_some(updated)
}

/// The managed block, anchored at the repository root
pub fn render_block(managed: &[String]) -> String {
    let mut block = String::new();
    block.push_str(BLOCK_BEGIN);
    block.push('\n');
    for path in managed {
        block.push('/');
        block.push_str(path);
        block.push('\n');
    }
    block.push_str(BLOCK_END);
    block.push('\n');
    block
}

fn strip_block(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut inside = false;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == BLOCK_BEGIN {
            inside = true;
            continue;
        }
        if inside {
            if trimmed == BLOCK_END {
                inside = false;
            }
            continue;
        }
        out.push_str(line);
    }
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

/// Writes the root `.gitignore` through the FileSystem port
pub struct GitignoreWriter<'a, FS: FileSystem + ?Sized> {
    fs: &'a FS,
}

impl<'a, FS: FileSystem + ?Sized> GitignoreWriter<'a, FS> {
    pub fn new(fs: &'a FS) -> Self {
        Self { fs }
    }

    pub fn apply(
        &self,
        project_root: &Path,
        strategy: GitignoreStrategy,
        managed: &[String],
    ) -> FsResult<GitignoreChange> {
        let path = project_root.join(".gitignore");
        let existing = if self.fs.exists(&path) {
            String::from_utf8_lossy(&self.fs.read(&path)?).into_owned()
        } else {
            String::new()
        };

        let Some(updated) = update_content(&existing, strategy, managed) else {
            return Ok(GitignoreChange::Unchanged);
        };

        if updated.is_empty() {
            self.fs.remove(&path)?;
            return Ok(GitignoreChange::Removed);
        }

        self.fs.write_atomic(&path, updated.as_bytes())?;
        tracing::info!(path = %path.display(), ?strategy, "updated .gitignore");
        Ok(GitignoreChange::Written)
    }
}
