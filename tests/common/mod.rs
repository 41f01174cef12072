//! Common test utilities for CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project with its own config home
//! - Assertion macros: `assert_scaffolded!`, `assert_not_scaffolded!`
//! - Fixtures: Reusable package content and `scaffold.toml` snippets

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
