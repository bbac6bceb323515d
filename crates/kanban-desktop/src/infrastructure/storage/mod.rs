//! Storage infrastructure: configuration and task file persistence.
//!
//! - [`config`] reads the TOML configuration file from the platform config
//!   directory, with defaults for everything that is missing.
//! - [`tasks`] keeps the task board as a JSON file.

pub mod config;
pub mod tasks;
