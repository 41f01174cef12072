//! Package Source Implementations
//!
//! - `TomlPackageSource`: packages declared in `scaffold.toml`
//! - `StaticPackageSource`: a fixed list, for hosts that embed the engine

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::entities::PackageDescriptor;
use crate::domain::ports::{PackageSource, PackageSourceError};

/// Packages read from a parsed `scaffold.toml`
pub struct TomlPackageSource {
    config: Config,
    project_root: PathBuf,
    origin: String,
}

impl TomlPackageSource {
    pub fn new(config: Config, project_root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            project_root: project_root.into(),
            origin: crate::config::CONFIG_FILE.to_string(),
        }
    }

    /// Load and parse the file at `path`
    pub fn from_file(path: &Path, project_root: impl Into<PathBuf>) -> Result<Self, PackageSourceError> {
        let config = Config::load(path).map_err(|e| PackageSourceError {
            origin: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            origin: path.display().to_string(),
            ..Self::new(config, project_root)
        })
    }
}

impl PackageSource for TomlPackageSource {
    fn packages(&self) -> Result<Vec<PackageDescriptor>, PackageSourceError> {
        self.config
            .descriptors(&self.project_root)
            .map_err(|e| PackageSourceError {
                origin: self.origin.clone(),
                message: e.to_string(),
            })
    }
}

/// A fixed, already-resolved package list
#[derive(Debug, Clone, Default)]
pub struct StaticPackageSource {
    packages: Vec<PackageDescriptor>,
}

impl StaticPackageSource {
    pub fn new(packages: Vec<PackageDescriptor>) -> Self {
        Self { packages }
    }
}

impl PackageSource for StaticPackageSource {
    fn packages(&self) -> Result<Vec<PackageDescriptor>, PackageSourceError> {
        Ok(self.packages.clone())
    }
}
