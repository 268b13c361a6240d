use super::RuleStanza;
use strum::Display;

/// Which kind of rule a stanza was being loaded as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RuleKind {
    Tag,
    Category,
}

/// A structurally malformed rule definition
///
/// These always come from the rule data, never from the keys, and abort a run
/// before any key is touched. `position` is the 1-based position of the stanza
/// within its rule list.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("invalid attribute \"{field}\" in {kind} rule {position}: {stanza}")]
    UnrecognizedField {
        kind: RuleKind,
        position: usize,
        field: String,
        stanza: RuleStanza,
    },

    #[error("missing or invalid \"super\" category in {kind} rule {position}: {stanza}")]
    InvalidSuper { kind: RuleKind, position: usize, stanza: RuleStanza },

    #[error("\"{field}\" must have exactly one value in {kind} rule {position}, found {count}: {stanza}")]
    NotSingleValued {
        kind: RuleKind,
        position: usize,
        field: String,
        count: usize,
        stanza: RuleStanza,
    },

    #[error("invalid pattern \"{pattern}\" in {kind} rule {position}: {source}")]
    InvalidPattern {
        kind: RuleKind,
        position: usize,
        pattern: String,
        source: regex::Error,
    },
}

impl ConfigurationError {
    /// 1-based position of the offending stanza
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnrecognizedField { position, .. }
            | Self::InvalidSuper { position, .. }
            | Self::NotSingleValued { position, .. }
            | Self::InvalidPattern { position, .. } => *position,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        match self {
            Self::UnrecognizedField { kind, .. }
            | Self::InvalidSuper { kind, .. }
            | Self::NotSingleValued { kind, .. }
            | Self::InvalidPattern { kind, .. } => *kind,
        }
    }
}
