//! Command-line interface for stat-key-browser
//!
//! # Implementation Model
//!
//! The module is organized around four commands:
//!
//! - **build**: Load the configuration, both rule files and a saved key dump, run
//!   the processing pipeline, and write the browser dataset
//! - **validate**: Load both rule files and check them for structural problems
//! - **convert**: Turn a hand-written rule document into a JSON stanza list
//! - **init**: Generate a default configuration file
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate handler. All output goes through a [`Host`] so commands can be
//! exercised in tests without touching the real terminal.
//!
//! Configuration lives in a TOML file (`statkeys.toml` by default) naming the rule
//! files and the output path; command-line flags override it.

mod build;
mod common;
mod config;
mod convert;
mod host;
mod init;
mod run;
mod validate;

pub use build::{BuildArgs, build_dataset_file};
pub use common::{CommonArgs, LogLevel};
pub use config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TOML};
pub use convert::{ConvertArgs, convert_rules};
pub use host::Host;
#[cfg(test)]
pub use host::TestHost;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_rules};
