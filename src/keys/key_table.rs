use super::StatKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Stat keys indexed by name
///
/// Iteration is in name order so every stage that walks the table behaves the
/// same from run to run. Entries are stored under their own `key` field; callers
/// holding a mutable entry must not rename it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyTable {
    entries: BTreeMap<String, StatKey>,
}

impl KeyTable {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Insert a key under its own name, returning the entry it replaced
    pub fn insert(&mut self, key: StatKey) -> Option<StatKey> {
        self.entries.insert(key.key.clone(), key)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StatKey> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut StatKey> {
        self.entries.get_mut(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatKey> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StatKey> {
        self.entries.values_mut()
    }
}

impl FromIterator<StatKey> for KeyTable {
    /// Later records replace earlier ones with the same name
    fn from_iter<I: IntoIterator<Item = StatKey>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            let _ = table.insert(key);
        }
        table
    }
}

impl IntoIterator for KeyTable {
    type Item = StatKey;
    type IntoIter = btree_map::IntoValues<String, StatKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}
