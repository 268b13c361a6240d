use super::{CategoryPath, CategoryTree, DEFAULT_CATEGORY};
use crate::keys::KeyTable;
use crate::rules::{CategoryRule, ConfigurationError, RuleStanza, validate_category_stanzas};
use std::collections::BTreeSet;

const LOG_TARGET: &str = "categorize";

/// Assigns keys to categories using the first rule that matches them
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Categorizer {
    /// Validate every stanza up front; nothing is categorized if any stanza is malformed
    pub fn new(stanzas: &[RuleStanza]) -> Result<Self, ConfigurationError> {
        Ok(Self {
            rules: validate_category_stanzas(stanzas)?,
        })
    }

    #[must_use]
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Path of the first rule matching `key_name`, or the default category
    #[must_use]
    pub fn match_key(&self, key_name: &str) -> CategoryPath {
        self.rules
            .iter()
            .find(|rule| rule.matches(key_name))
            .map_or_else(
                || CategoryPath::new(DEFAULT_CATEGORY, None, None),
                |rule| CategoryPath::new(&*rule.super_category, rule.sub.as_deref(), rule.subsub.as_deref()),
            )
    }

    /// Every super and sub category name the rules mention, sorted
    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        self.rules
            .iter()
            .flat_map(|rule| core::iter::once(&rule.super_category).chain(rule.sub.as_ref()))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The tree implied by the rules alone, plus the default category
    #[must_use]
    pub fn build_tree(&self) -> CategoryTree {
        let mut tree = CategoryTree::new();
        for rule in &self.rules {
            let path = CategoryPath::new(&*rule.super_category, rule.sub.as_deref(), rule.subsub.as_deref());
            tree.ensure_path(&path, rule.description.as_deref().unwrap_or_default());
        }
        tree
    }

    /// Record a category path on every key and file each key in the tree
    pub fn categorize(&self, table: &mut KeyTable) -> CategoryTree {
        let mut tree = self.build_tree();

        for key in table.iter_mut() {
            let path = self.match_key(&key.key);
            path.assign_to(key);
            if !tree.add_key(&path, &key.key) {
                // rule paths are always present in the tree built from those same rules
                log::error!(target: LOG_TARGET, "No category node for '{path}', key '{}' left unfiled", key.key);
            }
        }

        if let Some(default) = tree.get(DEFAULT_CATEGORY) {
            log::info!(target: LOG_TARGET, "Categorized {} keys, {} left in '{DEFAULT_CATEGORY}'", table.len(), default.key_count());
        }

        tree
    }
}

/// Categorize a key table with the given rule stanzas
///
/// The stanzas are validated before any key is touched.
pub fn categorize(mut table: KeyTable, stanzas: &[RuleStanza]) -> Result<(KeyTable, CategoryTree), ConfigurationError> {
    let categorizer = Categorizer::new(stanzas)?;
    let tree = categorizer.categorize(&mut table);
    Ok((table, tree))
}
