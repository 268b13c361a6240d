use super::ClusterInfo;
use crate::Result;
use crate::categories::CategoryTree;
use crate::keys::KeyTable;
use crate::mapping::IdMap;
use camino::Utf8Path;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;

const LOG_TARGET: &str = "   dataset";

/// Prefix turning the dataset into a script the browser front end can load directly
pub const SCRIPT_PREFIX: &str = "var keyDict = ";

/// Everything the browser front end needs, in one serializable value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub categories: CategoryTree,
    pub tags: Vec<String>,
    pub mappings: IdMap,
    pub cluster: ClusterInfo,
    pub keys: KeyTable,
}

/// Assemble the final dataset; `tags` lists every tag present on the keys
#[must_use]
pub fn build_dataset(keys: KeyTable, categories: CategoryTree, mappings: IdMap, cluster: ClusterInfo) -> Dataset {
    let tags = keys
        .iter()
        .flat_map(|key| key.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    Dataset {
        categories,
        tags,
        mappings,
        cluster,
        keys,
    }
}

impl Dataset {
    /// Add tags that rules declare even if no key carries them
    #[must_use]
    pub fn with_declared_tags(mut self, declared: impl IntoIterator<Item = String>) -> Self {
        let mut tags: BTreeSet<String> = self.tags.into_iter().collect();
        tags.extend(declared);
        self.tags = tags.into_iter().collect();
        self
    }

    /// Pretty-printed JSON form of the dataset
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the dataset, creating parent directories as needed
    ///
    /// A `.js` destination gets [`SCRIPT_PREFIX`] in front of the JSON.
    pub fn write(&self, path: &Utf8Path) -> Result<()> {
        let json = self.to_json()?;
        let text = if path.extension() == Some("js") {
            format!("{SCRIPT_PREFIX}{json}")
        } else {
            json
        };

        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent).into_app_err_with(|| format!("creating output directory '{parent}'"))?;
        }

        fs::write(path, text).into_app_err_with(|| format!("writing dataset to '{path}'"))?;
        log::info!(target: LOG_TARGET, "Wrote {} keys to '{path}'", self.keys.len());
        Ok(())
    }
}
