//! Rule definitions and their structural validation
//!
//! Rules arrive as [`RuleStanza`]s: loosely shaped records mapping field names to
//! lists of values, parsed either from a hand-written rule document or from JSON.
//! Before any key is processed, each stanza is validated and turned into a typed
//! [`TagRule`] or [`CategoryRule`]; a malformed stanza is a [`ConfigurationError`]
//! that aborts the run.
//!
//! # Implementation Model
//!
//! - Category stanzas accept only `super`, `sub`, `subsub`, `keys`, `re-keys` and
//!   `category description`. `super` must carry exactly one value, and the other
//!   singleton fields at most one.
//! - Tag stanzas treat everything except `keys`, `re-keys` and `tags` as an extra
//!   attribute, each of which must carry exactly one value.
//! - `re-keys` entries are compiled as regular expressions up front, so a bad
//!   pattern is reported as a configuration problem rather than surfacing mid-run.

mod category_rule;
pub mod hexa;
mod loader;
mod rule_error;
pub mod rule_stanza;
mod tag_rule;

pub use category_rule::{CategoryRule, validate_category_stanzas};
pub use loader::{RULE_DOCUMENT_EXTENSION, load_rule_stanzas, stanzas_to_json};
pub use rule_error::{ConfigurationError, RuleKind};
pub use rule_stanza::RuleStanza;
pub use tag_rule::{TagRule, validate_tag_stanzas};

use regex::Regex;
use rule_stanza::PATTERNS_FIELD;

fn compile_patterns(stanza: &RuleStanza, kind: RuleKind, position: usize) -> Result<Vec<Regex>, ConfigurationError> {
    stanza
        .values(PATTERNS_FIELD)
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| ConfigurationError::InvalidPattern {
                kind,
                position,
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}
