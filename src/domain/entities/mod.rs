//! Domain Entities
//!
//! - `PackageDescriptor` - A package and its declared scaffold mappings
//! - `ScaffoldFileEntry` - One candidate source for one destination
//! - `Manifest` - Tracks managed destinations and their hashes

mod entry;
mod manifest;
mod package;

pub use entry::ScaffoldFileEntry;
pub use manifest::{Manifest, ManifestEntry, MANIFEST_FILE, MANIFEST_LOCK_FILE, MANIFEST_VERSION};
pub use package::{processing_order, PackageDescriptor, ScaffoldMapping};
