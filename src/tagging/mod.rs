//! Rule-driven tagging of stat keys
//!
//! Tag rules are cumulative: every rule that matches a key contributes its tags
//! and extra attributes, so the final tag set of a key does not depend on rule
//! order. Contrast with categorization, where only the first matching rule counts.

mod tagger;

pub use tagger::{Tagger, tag};
