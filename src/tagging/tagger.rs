use crate::keys::{KeyTable, StatKey};
use crate::rules::{ConfigurationError, RuleStanza, TagRule, validate_tag_stanzas};
use std::collections::BTreeSet;

const LOG_TARGET: &str = "    tagger";

/// Applies a validated list of tag rules to key tables
#[derive(Debug, Clone)]
pub struct Tagger {
    rules: Vec<TagRule>,
}

impl Tagger {
    /// Validate every stanza up front; nothing is tagged if any stanza is malformed
    pub fn new(stanzas: &[RuleStanza]) -> Result<Self, ConfigurationError> {
        Ok(Self {
            rules: validate_tag_stanzas(stanzas)?,
        })
    }

    #[must_use]
    pub fn rules(&self) -> &[TagRule] {
        &self.rules
    }

    /// Apply every rule in order, then sort and deduplicate each key's tags
    ///
    /// A key matched by several rules collects the tags of all of them. Extra
    /// attributes from a later rule overwrite those of an earlier one.
    pub fn tag_keys(&self, table: &mut KeyTable) {
        for (i, rule) in self.rules.iter().enumerate() {
            let mut applied = 0_usize;

            for name in &rule.exact_keys {
                if let Some(key) = table.get_mut(name) {
                    apply(rule, key);
                    applied += 1;
                }
            }

            if !rule.patterns.is_empty() {
                for key in table.iter_mut() {
                    if rule.patterns.iter().any(|pattern| pattern.is_match(&key.key)) {
                        apply(rule, key);
                        applied += 1;
                    }
                }
            }

            log::debug!(target: LOG_TARGET, "Tag rule {} applied to {applied} keys", i + 1);
        }

        for key in table.iter_mut() {
            key.tags.sort_unstable();
            key.tags.dedup();
        }
    }

    /// Every tag the rules can assign, sorted and without duplicates
    #[must_use]
    pub fn tag_list(&self) -> Vec<String> {
        self.rules
            .iter()
            .flat_map(|rule| rule.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn apply(rule: &TagRule, key: &mut StatKey) {
    key.tags.extend(rule.tags.iter().cloned());
    for (name, value) in &rule.extra_attrs {
        let _ = key.xtra_attrs.insert(name.clone(), value.clone());
    }
}

/// Tag a key table with the given rule stanzas
///
/// The stanzas are validated before any key is touched.
pub fn tag(mut table: KeyTable, stanzas: &[RuleStanza]) -> Result<KeyTable, ConfigurationError> {
    let tagger = Tagger::new(stanzas)?;
    tagger.tag_keys(&mut table);
    log::info!(target: LOG_TARGET, "Tagged {} keys using {} rules", table.len(), tagger.rules.len());
    Ok(table)
}
