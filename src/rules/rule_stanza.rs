use core::fmt::{Display, Formatter, Result as FmtResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field listing the exact key names a rule applies to
pub const KEYS_FIELD: &str = "keys";

/// Field listing the regular expressions a rule applies to
pub const PATTERNS_FIELD: &str = "re-keys";

/// Field listing the tags a tag rule assigns
pub const TAGS_FIELD: &str = "tags";

pub const SUPER_FIELD: &str = "super";
pub const SUB_FIELD: &str = "sub";
pub const SUBSUB_FIELD: &str = "subsub";
pub const DESCRIPTION_FIELD: &str = "category description";

/// One rule definition in structured form
///
/// Every field carries a list of values, exactly as the rule document lists them.
/// Which fields are allowed and how many values each may hold depends on the kind
/// of rule, and is checked when the stanza is turned into a tag or category rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleStanza {
    fields: BTreeMap<String, Vec<String>>,
}

impl RuleStanza {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: BTreeMap::new() }
    }

    /// Builder-style insertion, mostly handy for tests and programmatic rules
    #[must_use]
    pub fn with<I, S>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(field, values.into_iter().map(Into::into).collect());
        self
    }

    /// Set a field's values, replacing any earlier values for the same field
    pub fn insert(&mut self, field: &str, values: Vec<String>) {
        let _ = self.fields.insert(field.to_string(), values);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Values of a field, empty when the field is absent
    #[must_use]
    pub fn values(&self, field: &str) -> &[String] {
        self.get(field).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Display for RuleStanza {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{{")?;
        for (i, (name, values)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name:?}: {values:?}")?;
        }
        write!(f, "}}")
    }
}
