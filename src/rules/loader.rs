use super::RuleStanza;
use super::hexa::parse_rule_document;
use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use std::fs;

const LOG_TARGET: &str = "     rules";

/// Extension marking a hand-written rule document rather than a JSON stanza list
pub const RULE_DOCUMENT_EXTENSION: &str = "hexa";

/// Load rule stanzas from a rule document (`.hexa`) or a JSON list of stanzas
pub fn load_rule_stanzas(path: &Utf8Path) -> Result<Vec<RuleStanza>> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading rule definitions from '{path}'"))?;

    let stanzas = if path.extension() == Some(RULE_DOCUMENT_EXTENSION) {
        parse_rule_document(&text).into_app_err_with(|| format!("parsing rule document '{path}'"))?
    } else {
        serde_json::from_str(&text).into_app_err_with(|| format!("parsing rule definitions in '{path}'"))?
    };

    log::debug!(target: LOG_TARGET, "Loaded {} rule stanzas from '{path}'", stanzas.len());
    Ok(stanzas)
}

/// Render stanzas as the pretty-printed JSON list [`load_rule_stanzas`] accepts
pub fn stanzas_to_json(stanzas: &[RuleStanza]) -> Result<String> {
    Ok(serde_json::to_string_pretty(stanzas)?)
}
