//! Lenient field deserializers.
//!
//! Structural problems in a single record (a `null` list, a string where an
//! array was expected) must not reject the whole catalog. The affected field
//! degrades to an empty value and a warning is logged.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// List of strings. `null` or a non-array becomes empty; non-string entries are skipped.
pub(super) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                other => {
                    log::warn!("Skipping non-string list entry in catalog record: {}", other);
                    None
                }
            })
            .collect(),
        other => {
            log::warn!(
                "Expected a list in catalog record, found {}; treating as empty",
                other
            );
            Vec::new()
        }
    })
}

/// Free text. `null` becomes empty; scalars are rendered to text.
pub(super) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        other => {
            log::warn!("Expected text in catalog record, found {}; treating as empty", other);
            String::new()
        }
    })
}
