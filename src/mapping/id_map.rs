use crate::categories::CategoryPath;
use crate::keys::KeyTable;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

pub const KEY_ID_PREFIX: &str = "key_";
pub const CATEGORY_ID_PREFIX: &str = "cat_";

const DIGEST_BYTES: usize = 16;

/// Element ids for the browser, by key name and by joined category path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdMap {
    pub keys: BTreeMap<String, String>,
    pub categories: BTreeMap<String, String>,
}

fn digest_hex(name: &str) -> String {
    let digest = Sha256::digest(name.as_bytes());
    hex::encode(&digest[..DIGEST_BYTES])
}

/// Id of a key: `key_` followed by 32 hex digits derived from the name
#[must_use]
pub fn key_id(name: &str) -> String {
    format!("{KEY_ID_PREFIX}{}", digest_hex(name))
}

/// Id of a category, given its joined path such as `Disk-Activity`
#[must_use]
pub fn category_id(joined_path: &str) -> String {
    format!("{CATEGORY_ID_PREFIX}{}", digest_hex(joined_path))
}

/// Ids for every key and for every category path realized by the keys
///
/// Each categorized key contributes its super category and, where present, the
/// `super-sub` and `super-sub-subsub` paths.
#[must_use]
pub fn map_ids(table: &KeyTable) -> IdMap {
    let mut ids = IdMap::default();

    for key in table.iter() {
        let _ = ids.keys.insert(key.key.clone(), key_id(&key.key));

        if let Some(path) = CategoryPath::of(key) {
            for prefix in path.prefixes() {
                let joined = prefix.to_string();
                let _ = ids.categories.entry(joined).or_insert_with_key(|joined| category_id(joined));
            }
        }
    }

    ids
}
