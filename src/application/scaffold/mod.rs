//! Scaffold Module
//!
//! Orchestrates scaffold runs.
//!
//! ## Structure
//!
//! - `options` - Run configuration (`ScaffoldOptions`)
//! - `result` - Result types (`RunResult`)
//! - `use_case` - Core use case logic (`ScaffoldUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use scaffold_sync::application::scaffold::{ScaffoldOptions, ScaffoldUseCase};
//!
//! let use_case = ScaffoldUseCase::new(manifest_repo, fs);
//! let result = use_case.scaffold(&packages, &ScaffoldOptions::new(root))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::ScaffoldOptions;
pub use result::{FileFailure, RunResult, SkippedFile};
pub use use_case::ScaffoldUseCase;
