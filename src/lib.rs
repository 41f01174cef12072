//! scaffold-sync - scaffold file synchronization engine
//!
//! Packages declare which files they contribute to a project (configuration
//! stubs, web-root entry points, settings fragments). The engine resolves
//! those declarations into one plan, writes the files safely and tracks what
//! it wrote in a manifest so later runs can update and clean up without
//! touching user edits.
//!
//! ## Layers
//!
//! - `domain` - paths, hashes, entities and pure services
//! - `application` - the scaffold use case, executor and manifest tracking
//! - `infrastructure` - local filesystem, TOML manifest, package sources
//! - `presentation` - use case factory and output rendering

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    dispatch, on_event, CancellationToken, RunResult, ScaffoldOptions, ScaffoldUseCase,
};
pub use config::{Config, ConfigError, OptionsConfig, CONFIG_FILE};
pub use domain::entities::{Manifest, ManifestEntry, PackageDescriptor, ScaffoldMapping, MANIFEST_FILE};
pub use domain::value_objects::{
    ContentHash, DestinationPath, GitignoreStrategy, Locations, PathError, ScaffoldKind,
    TriggerPoint,
};
pub use error::{ScaffoldError, ScaffoldResult};
