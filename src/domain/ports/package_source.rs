//! PackageSource port
//!
//! The host package manager owns the dependency graph; the engine only
//! consumes the resolved, ordered package list through this trait.

use crate::domain::entities::PackageDescriptor;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("cannot load packages from {origin}: {message}")]
pub struct PackageSourceError {
    pub origin: String,
    pub message: String,
}

pub trait PackageSource: Send + Sync {
    /// Packages in dependency order
    fn packages(&self) -> Result<Vec<PackageDescriptor>, PackageSourceError>;
}
