//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod manifest;

pub use manifest::{parse_manifest, render_manifest, TomlManifestRepository};
