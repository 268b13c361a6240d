use super::rule_stanza::{DESCRIPTION_FIELD, KEYS_FIELD, PATTERNS_FIELD, SUB_FIELD, SUBSUB_FIELD, SUPER_FIELD};
use super::{ConfigurationError, RuleKind, RuleStanza, compile_patterns};
use regex::Regex;
use std::collections::BTreeSet;

const LOG_TARGET: &str = "     rules";

const RECOGNIZED_FIELDS: [&str; 6] = [SUPER_FIELD, SUB_FIELD, SUBSUB_FIELD, KEYS_FIELD, PATTERNS_FIELD, DESCRIPTION_FIELD];

/// A validated category rule with its singleton fields flattened to scalars
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub super_category: String,
    pub sub: Option<String>,
    pub subsub: Option<String>,
    pub exact_keys: BTreeSet<String>,
    pub patterns: Vec<Regex>,
    pub description: Option<String>,
}

impl CategoryRule {
    /// Validate one stanza; `position` is its 1-based place in the rule list
    pub fn from_stanza(stanza: &RuleStanza, position: usize) -> Result<Self, ConfigurationError> {
        if let Some((field, _)) = stanza.iter().find(|(field, _)| !RECOGNIZED_FIELDS.contains(field)) {
            return Err(ConfigurationError::UnrecognizedField {
                kind: RuleKind::Category,
                position,
                field: field.to_string(),
                stanza: stanza.clone(),
            });
        }

        let super_category = match stanza.get(SUPER_FIELD) {
            Some([value]) => value.clone(),
            _ => {
                return Err(ConfigurationError::InvalidSuper {
                    kind: RuleKind::Category,
                    position,
                    stanza: stanza.clone(),
                });
            }
        };

        let sub = single_value(stanza, SUB_FIELD, position)?;
        let mut subsub = single_value(stanza, SUBSUB_FIELD, position)?;
        let description = single_value(stanza, DESCRIPTION_FIELD, position)?;

        if sub.is_none() && subsub.is_some() {
            log::warn!(target: LOG_TARGET, "Ignoring \"subsub\" without \"sub\" in category rule {position}: {stanza}");
            subsub = None;
        }

        Ok(Self {
            super_category,
            sub,
            subsub,
            exact_keys: stanza.values(KEYS_FIELD).iter().cloned().collect(),
            patterns: compile_patterns(stanza, RuleKind::Category, position)?,
            description,
        })
    }

    /// Exact names are checked before patterns; patterns search anywhere in the name
    #[must_use]
    pub fn matches(&self, key_name: &str) -> bool {
        self.exact_keys.contains(key_name) || self.patterns.iter().any(|pattern| pattern.is_match(key_name))
    }
}

/// Validate a whole category rule list, failing on the first malformed stanza
pub fn validate_category_stanzas(stanzas: &[RuleStanza]) -> Result<Vec<CategoryRule>, ConfigurationError> {
    stanzas
        .iter()
        .enumerate()
        .map(|(i, stanza)| CategoryRule::from_stanza(stanza, i + 1))
        .collect()
}

fn single_value(stanza: &RuleStanza, field: &str, position: usize) -> Result<Option<String>, ConfigurationError> {
    match stanza.get(field) {
        None => Ok(None),
        Some([value]) => Ok(Some(value.clone())),
        Some(values) => Err(ConfigurationError::NotSingleValued {
            kind: RuleKind::Category,
            position,
            field: field.to_string(),
            count: values.len(),
            stanza: stanza.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_stanza_is_flattened() {
        let stanza = RuleStanza::new()
            .with(SUPER_FIELD, ["Disk"])
            .with(SUB_FIELD, ["Activity"])
            .with(SUBSUB_FIELD, ["Busy"])
            .with(KEYS_FIELD, ["node.disk.busy.N"])
            .with(PATTERNS_FIELD, ["^node\\.disk\\.xfer"])
            .with(DESCRIPTION_FIELD, ["How busy the drives are"]);

        let rule = CategoryRule::from_stanza(&stanza, 1).unwrap();
        assert_eq!(rule.super_category, "Disk");
        assert_eq!(rule.sub.as_deref(), Some("Activity"));
        assert_eq!(rule.subsub.as_deref(), Some("Busy"));
        assert_eq!(rule.description.as_deref(), Some("How busy the drives are"));
        assert!(rule.matches("node.disk.busy.N"));
        assert!(rule.matches("node.disk.xfers.in.rate"));
        assert!(!rule.matches("cluster.disk.xfers"));
    }

    #[test]
    fn test_patterns_search_rather_than_full_match() {
        let stanza = RuleStanza::new().with(SUPER_FIELD, ["Net"]).with(PATTERNS_FIELD, ["net"]);
        let rule = CategoryRule::from_stanza(&stanza, 1).unwrap();
        assert!(rule.matches("node.net.iface.N"));
    }

    #[test]
    fn test_rejects_unrecognized_field() {
        let stanza = RuleStanza::new().with(SUPER_FIELD, ["Disk"]).with("colour", ["blue"]);
        let err = CategoryRule::from_stanza(&stanza, 4).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnrecognizedField { ref field, position: 4, .. } if field == "colour"));
    }

    #[test]
    fn test_rejects_missing_super() {
        let stanza = RuleStanza::new().with(KEYS_FIELD, ["a"]);
        let err = CategoryRule::from_stanza(&stanza, 2).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSuper { position: 2, .. }));
    }

    #[test]
    fn test_rejects_multiple_supers() {
        let stanza = RuleStanza::new().with(SUPER_FIELD, ["Disk", "Net"]);
        assert!(matches!(
            CategoryRule::from_stanza(&stanza, 1).unwrap_err(),
            ConfigurationError::InvalidSuper { .. }
        ));
    }

    #[test]
    fn test_rejects_empty_super() {
        let stanza = RuleStanza::new().with(SUPER_FIELD, Vec::<String>::new());
        assert!(matches!(
            CategoryRule::from_stanza(&stanza, 1).unwrap_err(),
            ConfigurationError::InvalidSuper { .. }
        ));
    }

    #[test]
    fn test_rejects_multiple_subs() {
        let stanza = RuleStanza::new().with(SUPER_FIELD, ["Disk"]).with(SUB_FIELD, ["A", "B"]);
        let err = CategoryRule::from_stanza(&stanza, 1).unwrap_err();
        assert!(matches!(err, ConfigurationError::NotSingleValued { ref field, count: 2, .. } if field == SUB_FIELD));
    }

    #[test]
    fn test_rejects_multiple_subsubs() {
        let stanza = RuleStanza::new()
            .with(SUPER_FIELD, ["Disk"])
            .with(SUB_FIELD, ["A"])
            .with(SUBSUB_FIELD, ["x", "y"]);
        let err = CategoryRule::from_stanza(&stanza, 1).unwrap_err();
        assert!(matches!(err, ConfigurationError::NotSingleValued { ref field, .. } if field == SUBSUB_FIELD));
    }

    #[test]
    fn test_rejects_multi_line_description() {
        let stanza = RuleStanza::new().with(SUPER_FIELD, ["Disk"]).with(DESCRIPTION_FIELD, ["line one", "line two"]);
        let err = CategoryRule::from_stanza(&stanza, 1).unwrap_err();
        assert!(matches!(err, ConfigurationError::NotSingleValued { ref field, .. } if field == DESCRIPTION_FIELD));
    }

    #[test]
    fn test_rejects_bad_pattern() {
        let stanza = RuleStanza::new().with(SUPER_FIELD, ["Disk"]).with(PATTERNS_FIELD, ["node.(disk"]);
        let err = CategoryRule::from_stanza(&stanza, 1).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPattern { ref pattern, .. } if pattern == "node.(disk"));
    }

    #[test]
    fn test_subsub_without_sub_is_dropped() {
        let stanza = RuleStanza::new().with(SUPER_FIELD, ["Disk"]).with(SUBSUB_FIELD, ["Busy"]);
        let rule = CategoryRule::from_stanza(&stanza, 1).unwrap();
        assert!(rule.sub.is_none());
        assert!(rule.subsub.is_none());
    }

    #[test]
    fn test_validate_reports_first_bad_stanza() {
        let stanzas = [
            RuleStanza::new().with(SUPER_FIELD, ["Disk"]),
            RuleStanza::new().with(SUPER_FIELD, ["Net"]).with(SUB_FIELD, ["A", "B"]),
            RuleStanza::new().with("bogus", ["x"]),
        ];

        let err = validate_category_stanzas(&stanzas).unwrap_err();
        assert_eq!(err.position(), 2);
    }

    #[test]
    fn test_validate_empty_list() {
        assert!(validate_category_stanzas(&[]).unwrap().is_empty());
    }
}
