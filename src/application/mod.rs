//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ScaffoldUseCase` - validate, plan, execute, track (`scaffold`, `before_require`)
//!
//! ## Services
//!
//! - `Executor` - applies an operation plan under per-path locks
//! - `ManifestTracker` - builds the next manifest, removes stale files
//! - `hooks` - lifecycle event dispatch

pub mod executor;
pub mod hooks;
pub mod manifest_tracker;
pub mod scaffold;

pub use executor::{CancellationToken, ExecutionReport, Executor, OpOutcome};
pub use hooks::{dispatch, on_event};
pub use manifest_tracker::{ManifestTracker, StaleOutcome, StaleReport};
pub use scaffold::{FileFailure, RunResult, ScaffoldOptions, ScaffoldUseCase, SkippedFile};
