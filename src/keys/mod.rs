//! Stat key model and normalization
//!
//! The cluster reports one key per literal name, so per-instance families such as
//! `node.disk.busy.0`, `node.disk.busy.1`, ... arrive as separate entries. This
//! module models those keys and collapses each family into a single wildcard
//! entry (`node.disk.busy.N`) before anything else looks at them.
//!
//! # Implementation Model
//!
//! - [`StatKey`] holds the collector's fields plus everything later stages add.
//! - [`KeyTable`] indexes keys by name and iterates in name order.
//! - [`KeySource`] is the seam to whatever obtains the raw keys; [`FileKeySource`]
//!   reads a saved dump of the statistics keys API response.
//! - [`normalize`] squashes indexed families and expands abbreviated field values,
//!   reporting descriptions it could not squash as [`UnmappedPattern`] diagnostics.

mod key_source;
mod key_table;
mod normalizer;
mod stat_key;
mod vocabulary;

pub use key_source::{FileKeySource, KeySource, parse_key_dump};
pub use key_table::KeyTable;
pub use normalizer::{INDEX_PLACEHOLDER, UnmappedPattern, normalize, normalize_with_diagnostics};
pub use stat_key::StatKey;
