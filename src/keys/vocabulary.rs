use super::StatKey;
use serde_json::Value;

/// Abbreviated enumerated values and their full-word equivalents, per field
const VOCABULARY: &[(&str, &[(&str, &str)])] = &[("aggregation_type", &[("avg", "average"), ("max", "maximum"), ("min", "minimum")])];

/// Replace known abbreviations in a key's enumerated fields; unknown values are left alone
pub fn expand_abbreviations(key: &mut StatKey) {
    for (field, words) in VOCABULARY {
        if let Some(Value::String(value)) = key.fields.get_mut(*field)
            && let Some((_, full)) = words.iter().find(|(abbr, _)| *abbr == value.as_str())
        {
            *value = (*full).to_string();
        }
    }
}
