//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod file_system;
pub mod manifest_repository;
pub mod package_source;
pub mod run_events;

pub use file_system::{FileSystem, FsError, FsResult};
pub use manifest_repository::{ManifestError, ManifestRepository, ManifestResult};
pub use package_source::{PackageSource, PackageSourceError};
pub use run_events::{NoopEventSink, RunEvent, RunEventSink};
