use super::rule_stanza::{KEYS_FIELD, PATTERNS_FIELD, TAGS_FIELD};
use super::{ConfigurationError, RuleKind, RuleStanza, compile_patterns};
use regex::Regex;
use std::collections::BTreeMap;

/// A validated tag rule
///
/// Any stanza field other than `keys`, `re-keys` and `tags` is an extra attribute
/// that gets copied onto every key the rule matches.
#[derive(Debug, Clone)]
pub struct TagRule {
    pub exact_keys: Vec<String>,
    pub patterns: Vec<Regex>,
    pub tags: Vec<String>,
    pub extra_attrs: BTreeMap<String, String>,
}

impl TagRule {
    /// Validate one stanza; `position` is its 1-based place in the rule list
    pub fn from_stanza(stanza: &RuleStanza, position: usize) -> Result<Self, ConfigurationError> {
        let mut extra_attrs = BTreeMap::new();
        for (field, values) in stanza.iter().filter(|(field, _)| ![KEYS_FIELD, PATTERNS_FIELD, TAGS_FIELD].contains(field)) {
            if values.len() != 1 {
                return Err(ConfigurationError::NotSingleValued {
                    kind: RuleKind::Tag,
                    position,
                    field: field.to_string(),
                    count: values.len(),
                    stanza: stanza.clone(),
                });
            }

            let _ = extra_attrs.insert(field.to_string(), values.join("\n"));
        }

        Ok(Self {
            exact_keys: stanza.values(KEYS_FIELD).to_vec(),
            patterns: compile_patterns(stanza, RuleKind::Tag, position)?,
            tags: stanza.values(TAGS_FIELD).to_vec(),
            extra_attrs,
        })
    }
}

/// Validate a whole tag rule list, failing on the first malformed stanza
pub fn validate_tag_stanzas(stanzas: &[RuleStanza]) -> Result<Vec<TagRule>, ConfigurationError> {
    stanzas
        .iter()
        .enumerate()
        .map(|(i, stanza)| TagRule::from_stanza(stanza, i + 1))
        .collect()
}
