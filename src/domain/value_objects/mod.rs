//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod hash;
mod kind;
mod locations;
mod path;
mod trigger;

pub use hash::ContentHash;
pub use kind::ScaffoldKind;
pub use locations::Locations;
pub use path::{
    check_symlink_ancestors, normalize_relative, DestinationPath, PathError, PathResolver,
    DISALLOWED_SEGMENTS,
};
pub use trigger::{GitignoreStrategy, TriggerPoint};
