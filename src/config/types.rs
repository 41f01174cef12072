//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{PackageDescriptor, ScaffoldMapping};
use crate::domain::value_objects::{GitignoreStrategy, Locations, PathError, ScaffoldKind};

use super::loader::{self, ConfigWarning};

/// Fixed name of the package declaration file at the project root
pub const CONFIG_FILE: &str = "scaffold.toml";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("package '{package}' has an invalid mapping for '{destination}': {message}")]
    InvalidMapping {
        package: String,
        destination: String,
        message: String,
    },

    #[error("invalid location: {0}")]
    Location(#[from] PathError),
}

/// `[options]` table. Unset values fall back to the user defaults file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_overwrite: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,

    /// Turn every `replace` mapping into `symlink`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symlink: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitignore: Option<GitignoreStrategy>,
}

impl OptionsConfig {
    /// Fill unset values from `fallback`
    pub fn or(self, fallback: OptionsConfig) -> OptionsConfig {
        OptionsConfig {
            allow_overwrite: self.allow_overwrite.or(fallback.allow_overwrite),
            strict: self.strict.or(fallback.strict),
            symlink: self.symlink.or(fallback.symlink),
            gitignore: self.gitignore.or(fallback.gitignore),
        }
    }

    pub fn allow_overwrite(&self) -> bool {
        self.allow_overwrite.unwrap_or(false)
    }

    pub fn strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }

    pub fn symlink(&self) -> bool {
        self.symlink.unwrap_or(false)
    }

    pub fn gitignore(&self) -> GitignoreStrategy {
        self.gitignore.unwrap_or_default()
    }
}

/// One `[package.file-mapping]` value
///
/// Accepted forms:
///   "web/robots.txt" = "assets/robots.txt"
///   "web/web.config" = false
///   "web/.htaccess" = { path = "assets/htaccess", overwrite = false }
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingConfig {
    Path(String),
    Skip,
    Table(MappingTable),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MappingTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ScaffoldKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepend: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,

    #[serde(default, rename = "override")]
    pub overrides: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum MappingConfigDe {
    Path(String),
    Flag(bool),
    Table(MappingTable),
}

impl<'de> Deserialize<'de> for MappingConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match MappingConfigDe::deserialize(deserializer)? {
            MappingConfigDe::Path(path) => Ok(Self::Path(path)),
            MappingConfigDe::Flag(false) => Ok(Self::Skip),
            MappingConfigDe::Flag(true) => Err(serde::de::Error::custom(
                "a mapping may be `false` (skip) but not `true`",
            )),
            MappingConfigDe::Table(table) => Ok(Self::Table(table)),
        }
    }
}

impl MappingConfig {
    /// Convert into a domain mapping for `destination`
    pub fn to_mapping(&self, destination: &str) -> Result<ScaffoldMapping, String> {
        let table = match self {
            MappingConfig::Path(source) => return Ok(ScaffoldMapping::replace(destination, source)),
            MappingConfig::Skip => return Ok(ScaffoldMapping::skip(destination)),
            MappingConfig::Table(table) => table,
        };

        let kind = table.mode.unwrap_or_default();
        if table.prepend.is_some() && kind != ScaffoldKind::Append {
            return Err(format!("`prepend` requires mode = \"append\", not \"{}\"", kind));
        }

        let mut mapping = match (kind, &table.path) {
            (ScaffoldKind::Skip, _) => ScaffoldMapping::skip(destination),
            (_, None) => return Err(format!("mode \"{}\" needs a `path`", kind)),
            (ScaffoldKind::Replace, Some(p)) => ScaffoldMapping::replace(destination, p),
            (ScaffoldKind::Append, Some(p)) => ScaffoldMapping::append(destination, p),
            (ScaffoldKind::Symlink, Some(p)) => ScaffoldMapping::symlink(destination, p),
        };

        if let Some(prepend) = &table.prepend {
            mapping = mapping.with_prepend(prepend);
        }
        if let Some(overwrite) = table.overwrite {
            mapping = mapping.with_overwrite(overwrite);
        }
        if table.overrides {
            mapping = mapping.with_override();
        }
        Ok(mapping)
    }
}

/// One `[[package]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageConfig {
    pub name: String,

    /// Install root, relative to the project root
    pub path: PathBuf,

    #[serde(default)]
    pub weight: i32,

    #[serde(default)]
    pub file_mapping: BTreeMap<String, MappingConfig>,
}

impl PackageConfig {
    /// Build the descriptor; `symlink` turns replace mappings into links
    pub fn to_descriptor(
        &self,
        project_root: &Path,
        symlink: bool,
    ) -> Result<PackageDescriptor, ConfigError> {
        let mut descriptor =
            PackageDescriptor::new(&self.name, project_root.join(&self.path)).with_weight(self.weight);

        for (destination, value) in &self.file_mapping {
            let mapping = value
                .to_mapping(destination)
                .map_err(|message| ConfigError::InvalidMapping {
                    package: self.name.clone(),
                    destination: destination.clone(),
                    message,
                })?;
            descriptor = descriptor.with_mapping(if symlink {
                mapping.into_symlink()
            } else {
                mapping
            });
        }

        Ok(descriptor)
    }
}

/// Contents of `scaffold.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub locations: BTreeMap<String, String>,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default, rename = "package")]
    pub packages: Vec<PackageConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_warnings(path).map(|(config, _)| config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Locations table, validated
    pub fn locations(&self) -> Result<Locations, ConfigError> {
        Ok(Locations::new(self.locations.clone())?)
    }

    /// Package descriptors in declaration (dependency) order
    pub fn descriptors(&self, project_root: &Path) -> Result<Vec<PackageDescriptor>, ConfigError> {
        let symlink = self.options.symlink();
        self.packages
            .iter()
            .map(|p| p.to_descriptor(project_root, symlink))
            .collect()
    }
}
