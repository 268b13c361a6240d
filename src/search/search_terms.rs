use crate::keys::{KeyTable, StatKey};
use std::collections::BTreeSet;

const LOG_TARGET: &str = "    search";

/// Lowercased terms a user might type to find this key
///
/// Collects the full key name and each of its segments, the words of the
/// description, the tags, and the words of every extra attribute value.
#[must_use]
pub fn list_search_terms(key: &StatKey) -> Vec<String> {
    let mut terms = BTreeSet::new();

    let name = key.key.to_lowercase();
    terms.extend(name.split('.').map(ToString::to_string));
    let _ = terms.insert(name);

    if let Some(description) = &key.description {
        terms.extend(description.split_whitespace().map(str::to_lowercase));
    }

    terms.extend(key.tags.iter().map(|tag| tag.to_lowercase()));

    for value in key.xtra_attrs.values() {
        terms.extend(value.split_whitespace().map(str::to_lowercase));
    }

    terms.into_iter().collect()
}

/// Populate `search_terms` on every key
#[must_use]
pub fn extract_search_terms(mut table: KeyTable) -> KeyTable {
    for key in table.iter_mut() {
        key.search_terms = list_search_terms(key);
    }

    log::debug!(target: LOG_TARGET, "Extracted search terms for {} keys", table.len());
    table
}
