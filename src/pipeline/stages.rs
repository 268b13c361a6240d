use super::{ClusterInfo, Dataset, build_dataset};
use crate::categories::Categorizer;
use crate::keys::{KeyTable, UnmappedPattern, normalize_with_diagnostics};
use crate::mapping::map_ids;
use crate::rules::{ConfigurationError, RuleStanza};
use crate::search::extract_search_terms;
use crate::tagging::Tagger;

const LOG_TARGET: &str = "  pipeline";

/// The full key processing pipeline with both rule lists already validated
#[derive(Debug, Clone)]
pub struct Pipeline {
    tagger: Tagger,
    categorizer: Categorizer,
}

impl Pipeline {
    /// Validate both rule lists; fails without touching any key if either is malformed
    pub fn new(tag_stanzas: &[RuleStanza], category_stanzas: &[RuleStanza]) -> Result<Self, ConfigurationError> {
        Ok(Self {
            tagger: Tagger::new(tag_stanzas)?,
            categorizer: Categorizer::new(category_stanzas)?,
        })
    }

    #[must_use]
    pub const fn tagger(&self) -> &Tagger {
        &self.tagger
    }

    #[must_use]
    pub const fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Normalize, tag, index for search, categorize, and map ids, in that order
    #[must_use]
    pub fn run(&self, raw: KeyTable, cluster: ClusterInfo) -> Dataset {
        let (dataset, unmapped) = self.run_with_diagnostics(raw, cluster);
        for diagnostic in &unmapped {
            log::warn!(target: LOG_TARGET, "{diagnostic}");
        }
        dataset
    }

    /// Like [`Pipeline::run`], but hands unsquashable descriptions back to the caller
    #[must_use]
    pub fn run_with_diagnostics(&self, raw: KeyTable, cluster: ClusterInfo) -> (Dataset, Vec<UnmappedPattern>) {
        let raw_count = raw.len();
        let (mut table, unmapped) = normalize_with_diagnostics(raw);
        log::info!(target: LOG_TARGET, "Normalized {raw_count} raw keys into {} keys", table.len());

        self.tagger.tag_keys(&mut table);
        let mut table = extract_search_terms(table);
        let tree = self.categorizer.categorize(&mut table);
        let ids = map_ids(&table);

        let dataset = build_dataset(table, tree, ids, cluster).with_declared_tags(self.tagger.tag_list());
        (dataset, unmapped)
    }
}
