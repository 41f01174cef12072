//! Lifecycle triggers and `.gitignore` strategies

use serde::{Deserialize, Serialize};

/// Host lifecycle event that invokes the engine
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerPoint {
    #[default]
    PostInstall,
    PostUpdate,
    PostCreateProject,
    /// Validate and preview, never write
    PreRequire,
}

impl TriggerPoint {
    #[cfg(test)]
    pub const ALL: [TriggerPoint; 4] = [
        TriggerPoint::PostInstall,
        TriggerPoint::PostUpdate,
        TriggerPoint::PostCreateProject,
        TriggerPoint::PreRequire,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerPoint::PostInstall => "post-install",
            TriggerPoint::PostUpdate => "post-update",
            TriggerPoint::PostCreateProject => "post-create-project",
            TriggerPoint::PreRequire => "pre-require",
        }
    }

    /// Whether this trigger materializes files
    #[cfg(test)]
    pub fn writes(&self) -> bool {
        !matches!(self, TriggerPoint::PreRequire)
    }
}

/// What to do with the root `.gitignore` after a project is created
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum GitignoreStrategy {
    /// Commit scaffold files: remove them from `.gitignore`
    #[value(name = "include-managed")]
    #[serde(alias = "include-managed")]
    IncludeManagedFiles,
    /// Keep scaffold files out of version control
    #[value(name = "ignore-managed")]
    #[serde(alias = "ignore-managed")]
    IgnoreManagedFiles,
    /// Leave `.gitignore` alone
    #[default]
    None,
}
