use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata for one statistics key
///
/// The collector reports `key`, `description`, and a handful of enumerated fields
/// whose set varies between releases, so anything not modeled explicitly lands in
/// `fields`. The remaining fields are filled in by the pipeline stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatKey {
    /// Dot-delimited key name, unique within a table
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Enumerated fields as reported by the collector (`aggregation_type`, `units`, ...)
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub xtra_attrs: BTreeMap<String, String>,

    #[serde(default)]
    pub search_terms: Vec<String>,

    #[serde(default, rename = "super")]
    pub super_category: Option<String>,

    #[serde(default)]
    pub sub: Option<String>,

    #[serde(default)]
    pub subsub: Option<String>,
}

impl StatKey {
    #[must_use]
    pub fn new(key: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            key: key.into(),
            description: description.map(ToString::to_string),
            ..Self::default()
        }
    }

    /// Attach an enumerated field
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        let _ = self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns the value of an enumerated field if it is a string
    #[must_use]
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(serde_json::Value::as_str)
    }
}
