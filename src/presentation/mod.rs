//! Presentation Layer
//!
//! This layer handles:
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! Argument parsing lives with the binary (`src/cli.rs`).
//!
//! ## Usage
//!
//! ```ignore
//! use scaffold_sync::presentation::factory;
//!
//! let use_case = factory::create_scaffold_use_case(CancellationToken::new());
//! let result = use_case.scaffold(&packages, &options)?;
//! ```

pub mod factory;
pub mod output;

pub use factory::{create_scaffold_use_case, ConcreteScaffoldUseCase};
pub use output::{create_renderer, OutputFormat, RunResultRenderer};
