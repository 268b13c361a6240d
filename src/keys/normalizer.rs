use super::vocabulary::expand_abbreviations;
use super::{KeyTable, StatKey};
use core::fmt::{Display, Formatter, Result as FmtResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const LOG_TARGET: &str = " normalize";

/// Placeholder standing in for an instance index
pub const INDEX_PLACEHOLDER: &str = "N";

static TRAILING_DIGITS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]+$").expect("invalid regex"));
static INDEX_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new("index [0-9]+").expect("invalid regex"));
static NUMBER_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new("number [0-9]+").expect("invalid regex"));
static STANDALONE_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[0-9]+\b").expect("invalid regex"));

/// A description the normalizer could not rewrite into its wildcard form
///
/// This is a diagnostic only: the key is still squashed and keeps its original description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedPattern {
    pub key: String,
    pub description: String,
}

impl Display for UnmappedPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "did not know how to squash description of '{}': {}", self.key, self.description)
    }
}

/// Squash indexed keys and expand abbreviated field values
///
/// Descriptions that cannot be squashed are reported through the log.
#[must_use]
pub fn normalize(raw: KeyTable) -> KeyTable {
    let (table, unmapped) = normalize_with_diagnostics(raw);
    for diagnostic in &unmapped {
        log::warn!(target: LOG_TARGET, "{diagnostic}");
    }
    table
}

/// Like [`normalize`], but hands the unmapped descriptions back to the caller
///
/// Keys such as `node.net.iface.0` and `node.net.iface.1` collapse into a single
/// `node.net.iface.N` entry. Only one instance of a family survives: the one with
/// the highest index. A squashed entry replaces any literal key of the same name.
#[must_use]
pub fn normalize_with_diagnostics(raw: KeyTable) -> (KeyTable, Vec<UnmappedPattern>) {
    let mut table = KeyTable::new();
    let mut families: BTreeMap<String, (String, StatKey)> = BTreeMap::new();
    let mut discarded = 0_usize;

    for key in raw {
        let Some((base, index)) = split_index(&key.key) else {
            let _ = table.insert(key);
            continue;
        };

        let squashed_name = format!("{base}.{INDEX_PLACEHOLDER}");
        let index = index.to_string();
        match families.get(&squashed_name) {
            Some((kept, _)) if index_order(kept) >= index_order(&index) => discarded += 1,
            Some(_) => {
                discarded += 1;
                let _ = families.insert(squashed_name, (index, key));
            }
            None => {
                let _ = families.insert(squashed_name, (index, key));
            }
        }
    }

    if discarded > 0 {
        log::debug!(target: LOG_TARGET, "Collapsed {discarded} indexed sibling keys into {} families", families.len());
    }

    let mut unmapped = Vec::new();
    for (squashed_name, (index, mut key)) in families {
        key.key = squashed_name;
        if let Some(description) = &key.description {
            match squash_description(description, &index) {
                Some(squashed) => key.description = Some(squashed),
                None => unmapped.push(UnmappedPattern {
                    key: key.key.clone(),
                    description: description.clone(),
                }),
            }
        }

        let _ = table.insert(key);
    }

    for key in table.iter_mut() {
        expand_abbreviations(key);
    }

    (table, unmapped)
}

/// Split `a.b.c.12` into (`a.b.c`, `12`); `None` unless the last segment is all digits
fn split_index(name: &str) -> Option<(&str, &str)> {
    let (base, last) = name.rsplit_once('.')?;
    (!last.is_empty() && last.bytes().all(|b| b.is_ascii_digit())).then_some((base, last))
}

/// Numeric ordering for digit strings of any length
fn index_order(digits: &str) -> (usize, &str) {
    let trimmed = digits.trim_start_matches('0');
    (trimmed.len(), trimmed)
}

/// Rewrite the index mentioned in a description as the placeholder
///
/// Rules are tried in order and the first that matches wins:
/// trailing digits, `index <n>`, `number <n>`, then the first standalone number equal to the key's index.
fn squash_description(description: &str, index: &str) -> Option<String> {
    if TRAILING_DIGITS_REGEX.is_match(description) {
        return Some(TRAILING_DIGITS_REGEX.replace(description, INDEX_PLACEHOLDER).into_owned());
    }

    if INDEX_WORD_REGEX.is_match(description) {
        return Some(INDEX_WORD_REGEX.replace_all(description, "index N").into_owned());
    }

    if NUMBER_WORD_REGEX.is_match(description) {
        return Some(NUMBER_WORD_REGEX.replace_all(description, "number N").into_owned());
    }

    let found = STANDALONE_NUMBER_REGEX
        .find_iter(description)
        .find(|m| index_order(m.as_str()) == index_order(index))?;

    let mut squashed = description.to_owned();
    squashed.replace_range(found.range(), INDEX_PLACEHOLDER);
    Some(squashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, Option<&str>)]) -> KeyTable {
        entries.iter().map(|(name, desc)| StatKey::new(*name, *desc)).collect()
    }

    #[test]
    fn test_squash_disk_busy_family() {
        let raw = table(&[
            ("node.disk.busy.0", Some("Disk 0 busy percent")),
            ("node.disk.busy.1", Some("Disk 1 busy percent")),
        ]);

        let (normalized, unmapped) = normalize_with_diagnostics(raw);

        assert!(unmapped.is_empty());
        assert_eq!(normalized.len(), 1);
        let key = normalized.get("node.disk.busy.N").unwrap();
        assert_eq!(key.key, "node.disk.busy.N");
        assert_eq!(key.description.as_deref(), Some("Disk N busy percent"));
    }

    #[test]
    fn test_highest_index_survives() {
        let mut raw = KeyTable::new();
        let _ = raw.insert(StatKey::new("node.net.iface.10", Some("Bytes on interface 10")).with_field("units", "ten"));
        let _ = raw.insert(StatKey::new("node.net.iface.9", Some("Bytes on interface 9")).with_field("units", "nine"));
        let _ = raw.insert(StatKey::new("node.net.iface.2", Some("Bytes on interface 2")).with_field("units", "two"));

        let normalized = normalize(raw);
        let key = normalized.get("node.net.iface.N").unwrap();
        assert_eq!(key.field_str("units"), Some("ten"));
        assert_eq!(key.description.as_deref(), Some("Bytes on interface N"));
    }

    #[test]
    fn test_leading_zero_indexes_compare_numerically() {
        assert!(index_order("010") > index_order("9"));
        assert!(index_order("0") < index_order("1"));
        assert_eq!(index_order("007"), index_order("7"));
    }

    #[test]
    fn test_description_priority_order() {
        assert_eq!(squash_description("Queue depth for index 3", "3").as_deref(), Some("Queue depth for index N"));
        assert_eq!(squash_description("Load on index 3 of node", "3").as_deref(), Some("Load on index N of node"));
        assert_eq!(squash_description("Errors on number 4 drive", "4").as_deref(), Some("Errors on number N drive"));
        assert_eq!(squash_description("Slot 4 temperature", "4").as_deref(), Some("Slot N temperature"));
    }

    #[test]
    fn test_trailing_digits_take_precedence() {
        assert_eq!(
            squash_description("Reads for index 2 on lane 7", "7").as_deref(),
            Some("Reads for index 2 on lane N")
        );
    }

    #[test]
    fn test_unmatched_description_is_reported() {
        let raw = table(&[("node.ifs.heat.3", Some("Hottest files by operation"))]);

        let (normalized, unmapped) = normalize_with_diagnostics(raw);

        let key = normalized.get("node.ifs.heat.N").unwrap();
        assert_eq!(key.description.as_deref(), Some("Hottest files by operation"));
        assert_eq!(
            unmapped,
            [UnmappedPattern {
                key: "node.ifs.heat.N".into(),
                description: "Hottest files by operation".into(),
            }]
        );
        assert!(unmapped[0].to_string().contains("node.ifs.heat.N"));
    }

    #[test]
    fn test_only_first_index_occurrence_is_squashed() {
        let raw = table(&[("node.disk.busy.1", Some("Disk 1 busy percent over last 1 second"))]);

        let (normalized, unmapped) = normalize_with_diagnostics(raw);

        assert!(unmapped.is_empty());
        assert_eq!(
            normalized.get("node.disk.busy.N").unwrap().description.as_deref(),
            Some("Disk N busy percent over last 1 second")
        );
    }

    #[test]
    fn test_standalone_index_compares_numerically() {
        let (normalized, unmapped) = normalize_with_diagnostics(table(&[("node.slot.07", Some("Slot 7 temperature"))]));

        assert!(unmapped.is_empty());
        assert_eq!(normalized.get("node.slot.N").unwrap().description.as_deref(), Some("Slot N temperature"));
        assert_eq!(squash_description("Slot 07 temperature", "7").as_deref(), Some("Slot N temperature"));
    }

    #[test]
    fn test_other_numbers_are_not_squashed() {
        assert_eq!(squash_description("Top 10 clients", "2"), None);
    }

    #[test]
    fn test_non_indexed_keys_untouched() {
        let raw = table(&[
            ("cluster.health", Some("Cluster health 0 to 3")),
            ("node.disk.busy.avg", Some("Average disk busy")),
            ("node.v2", None),
        ]);

        let normalized = normalize(raw.clone());
        assert_eq!(normalized, raw);
    }

    #[test]
    fn test_missing_description_is_not_a_diagnostic() {
        let (normalized, unmapped) = normalize_with_diagnostics(table(&[("node.fan.0", None)]));
        assert!(unmapped.is_empty());
        assert!(normalized.get("node.fan.N").unwrap().description.is_none());
    }

    #[test]
    fn test_squashed_entry_replaces_literal_name() {
        let raw = table(&[("node.fan.N", Some("literal")), ("node.fan.3", Some("Fan speed 3"))]);
        let normalized = normalize(raw);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized.get("node.fan.N").unwrap().description.as_deref(), Some("Fan speed N"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = table(&[
            ("node.disk.busy.0", Some("Disk 0 busy percent")),
            ("node.disk.busy.1", Some("Disk 1 busy percent")),
            ("node.cpu.user", Some("CPU user")),
            ("node.ifs.heat.3", Some("Hottest files")),
        ]);

        let once = normalize(raw);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
        assert!(once.names().all(|name| split_index(name).is_none()));
    }

    #[test]
    fn test_abbreviations_expanded_on_all_keys() {
        let mut raw = KeyTable::new();
        let _ = raw.insert(StatKey::new("node.cpu.user", None).with_field("aggregation_type", "avg"));
        let _ = raw.insert(StatKey::new("node.disk.xfers.0", Some("Disk 0 transfers")).with_field("aggregation_type", "max"));

        let normalized = normalize(raw);
        assert_eq!(normalized.get("node.cpu.user").unwrap().field_str("aggregation_type"), Some("average"));
        assert_eq!(
            normalized.get("node.disk.xfers.N").unwrap().field_str("aggregation_type"),
            Some("maximum")
        );
    }

    #[test]
    fn test_split_index() {
        assert_eq!(split_index("a.b.12"), Some(("a.b", "12")));
        assert_eq!(split_index("a.b.N"), None);
        assert_eq!(split_index("a.b.1x"), None);
        assert_eq!(split_index("a.b."), None);
        assert_eq!(split_index("12"), None);
    }
}
