//! Stable element ids for keys and categories
//!
//! Key names and category paths contain characters that are not valid in HTML
//! ids, so the browser addresses them through digests instead. The ids depend only
//! on the names, so they stay the same across runs and releases.

mod id_map;

pub use id_map::{CATEGORY_ID_PREFIX, IdMap, KEY_ID_PREFIX, category_id, key_id, map_ids};
