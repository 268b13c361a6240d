//! Parser for the hand-written rule document format
//!
//! ```text
//! # comments and blank lines are ignored
//! :::super
//! Disk
//! :::keys
//! node.disk.busy.N
//! ::::::
//! :::super
//! Network
//! ```
//!
//! `:::name` starts a field, the lines that follow are its values, and `::::::`
//! separates stanzas.

use super::RuleStanza;
use crate::Result;
use ohno::bail;

const STANZA_SEPARATOR: &str = "::::::";
const FIELD_PREFIX: &str = ":::";

/// Parse a rule document into its stanzas, in document order
pub fn parse_rule_document(text: &str) -> Result<Vec<RuleStanza>> {
    let mut stanzas = Vec::new();
    let mut stanza = RuleStanza::new();
    let mut field: Option<String> = None;
    let mut values = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line == STANZA_SEPARATOR {
            if let Some(name) = field.take() {
                stanza.insert(&name, core::mem::take(&mut values));
            }
            if !stanza.is_empty() {
                stanzas.push(core::mem::take(&mut stanza));
            }
        } else if let Some(name) = field_name(line) {
            if let Some(previous) = field.replace(name.to_string()) {
                stanza.insert(&previous, core::mem::take(&mut values));
            }
        } else if field.is_some() {
            values.push(line.to_string());
        } else {
            bail!("missing field name before value on line {}: {line}", lineno + 1);
        }
    }

    if let Some(name) = field {
        stanza.insert(&name, values);
    }
    if !stanza.is_empty() {
        stanzas.push(stanza);
    }

    Ok(stanzas)
}

/// `:::name` yields `name`; the separator and other colon runs are not field lines
fn field_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(FIELD_PREFIX)?;
    if rest.is_empty() || rest.starts_with(':') {
        None
    } else {
        Some(rest.trim())
    }
}
