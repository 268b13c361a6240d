#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for stat-key-browser
//!
//! This library turns the flat list of statistics keys exported by a cluster into
//! an enriched dataset that a browser front end can navigate.
//!
//! # Module Organization
//!
//! - [`keys`]: Stat key model, key sources, and normalization of indexed keys
//! - [`rules`]: Rule stanzas, rule documents, and structural validation
//! - [`tagging`]: Cumulative tag and extra attribute assignment
//! - [`categories`]: First-match category assignment and the category tree
//! - [`search`]: Search term extraction
//! - [`mapping`]: Stable DOM-safe identifiers for keys and categories
//! - [`pipeline`]: Stage orchestration and the final dataset
//! - [`commands`]: Command-line interface

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod categories;
pub mod commands;
pub mod keys;
pub mod mapping;
pub mod pipeline;
pub mod rules;
pub mod search;
pub mod tagging;

pub use crate::commands::{Host, run};
