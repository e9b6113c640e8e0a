//! Layered configuration for the CLI.
//!
//! Values are resolved in order of precedence: command-line flags, then `--set KEY=VALUE`
//! overrides, then the TOML file, then [`defaults::DefaultsConfig`] and the arity-dependent
//! defaults of the core library.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
