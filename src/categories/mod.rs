//! Three-level categorization of stat keys
//!
//! Every key lands in exactly one category: the `super`/`sub`/`subsub` path of
//! the first rule that matches it, or [`DEFAULT_CATEGORY`] when none does. The
//! resulting [`CategoryTree`] holds every node the rules define, even empty ones,
//! and lists each key under the deepest node of its path.

mod categorizer;
mod category_path;
mod category_tree;

pub use categorizer::{Categorizer, categorize};
pub use category_path::{CategoryPath, PATH_SEPARATOR};
pub use category_tree::{CategoryNode, CategoryTree, DEFAULT_CATEGORY, DEFAULT_CATEGORY_DESCRIPTION};
