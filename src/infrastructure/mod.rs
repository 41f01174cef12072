//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system and per-path locks
//! - `repositories/` - TOML manifest repository
//! - `packages` - Package sources (`scaffold.toml`, static lists)
//! - `gitignore` - Managed-path block in the root `.gitignore`
//! - `events` - Run event sinks

pub mod events;
pub mod fs;
pub mod gitignore;
pub mod packages;
pub mod repositories;

// Re-export for convenience
pub use events::TracingEventSink;
pub use fs::{LocalFs, PathLockGuard, PathLockSet};
pub use gitignore::{GitignoreChange, GitignoreWriter};
pub use packages::{StaticPackageSource, TomlPackageSource};
pub use repositories::TomlManifestRepository;
