//! Domain Layer
//!
//! The core of the scaffold engine - pure logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (DestinationPath, ContentHash, ScaffoldKind)
//! - `entities/` - Core domain entities (PackageDescriptor, ScaffoldFileEntry, Manifest)
//! - `services/` - Registry, ConflictResolver, Planner, StaleDetector
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Services never touch the file system directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
