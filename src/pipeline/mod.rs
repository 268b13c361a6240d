//! End-to-end assembly of the browser dataset
//!
//! # Implementation Model
//!
//! [`Pipeline`] validates the tag and category rules once, then runs each raw key
//! table through the stages in a fixed order:
//!
//! 1. normalize indexed key families
//! 2. apply tag rules
//! 3. extract search terms
//! 4. categorize and build the category tree
//! 5. map keys and category paths to element ids
//!
//! The results are bundled into a [`Dataset`] together with the [`ClusterInfo`]
//! supplied by whoever fetched the keys. Nothing here performs I/O except
//! [`Dataset::write`].

mod cluster_info;
mod dataset;
mod stages;

pub use cluster_info::{ClusterInfo, UNKNOWN_RELEASE};
pub use dataset::{Dataset, SCRIPT_PREFIX, build_dataset};
pub use stages::Pipeline;
