//! Configuration module
//!
//! Option precedence:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SCAFFOLD_*)
//! 3. Project config (`scaffold.toml` `[options]`)
//! 4. User config (`<config dir>/scaffold/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{load_user_defaults, parse_with_warnings, with_env_overrides, ConfigWarning};
pub use types::{
    Config, ConfigError, MappingConfig, MappingTable, OptionsConfig, PackageConfig, CONFIG_FILE,
};
