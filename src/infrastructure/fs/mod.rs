//! File System Implementations
//!
//! Concrete implementations of the FileSystem port, plus the per-path
//! locks the executor holds while writing.

mod local;
mod lock;

pub use local::LocalFs;
pub use lock::{PathLockGuard, PathLockSet};
