//! Scaffold operation kind

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a package wants its scaffold file materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaffoldKind {
    /// Copy the source file, overwriting managed destinations
    #[default]
    Replace,
    /// Accumulate content from every declaring package
    Append,
    /// Link the destination to the package's source file
    Symlink,
    /// Explicitly suppress the destination
    Skip,
}

impl ScaffoldKind {
    /// Base kinds compete for a destination; `Append` accumulates around them.
    pub fn is_base(self) -> bool {
        !matches!(self, ScaffoldKind::Append)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScaffoldKind::Replace => "replace",
            ScaffoldKind::Append => "append",
            ScaffoldKind::Symlink => "symlink",
            ScaffoldKind::Skip => "skip",
        }
    }
}

impl fmt::Display for ScaffoldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaffoldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(ScaffoldKind::Replace),
            "append" => Ok(ScaffoldKind::Append),
            "symlink" => Ok(ScaffoldKind::Symlink),
            "skip" => Ok(ScaffoldKind::Skip),
            other => Err(format!(
                "unknown scaffold kind '{}' (expected replace, append, symlink or skip)",
                other
            )),
        }
    }
}
