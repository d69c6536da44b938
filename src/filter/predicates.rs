//! Pure predicate functions for filtering catalog records.
//!
//! Each predicate checks one dimension of a [`FilterCriteria`] and is
//! vacuously true when that dimension has no selection. The top-level
//! [`matches`](super::matches) combines them with logical AND.
//!
//! [`FilterCriteria`]: super::FilterCriteria

use super::CombinationMode;
use crate::catalog::{Category, TerpeneRecord};
use crate::classification::resolve_category;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Control characters plus characters significant to markup and templating.
static UNSAFE_QUERY_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\p{Cc}<>"'`&{}\\]"#).expect("static regex is valid"));

/// Sanitize a free-text search query and fold it to lowercase.
///
/// Letters, digits, spaces, common punctuation and non-ASCII text survive;
/// control characters and `< > " ' ` & { } \` are stripped.
pub fn sanitize_query(query: &str) -> String {
    UNSAFE_QUERY_CHARS
        .replace_all(query, "")
        .trim()
        .to_lowercase()
}

/// Fold a record field the same way [`sanitize_query`] folds the query,
/// without trimming.
fn fold_field(field: &str) -> String {
    UNSAFE_QUERY_CHARS.replace_all(field, "").to_lowercase()
}

/// Check if the record matches an already sanitized, lowercased needle.
///
/// Searched fields: name, aroma, each effect identifier, each source.
/// Fields are folded like the query so that text containing stripped
/// characters (an apostrophe, an ampersand) stays findable.
/// An empty needle matches every record.
pub fn matches_search(record: &TerpeneRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let contains = |field: &str| fold_field(field).contains(needle);

    contains(&record.name)
        || contains(&record.aroma)
        || record.effects.iter().any(|effect| contains(effect))
        || record.sources.iter().any(|source| contains(source))
}

/// Check if the record carries the selected effects under the given mode.
///
/// A record without effects never matches a non-empty selection, in
/// either mode.
pub fn matches_effects(
    record: &TerpeneRecord,
    selected: &BTreeSet<String>,
    mode: CombinationMode,
) -> bool {
    if selected.is_empty() {
        return true;
    }

    match mode {
        CombinationMode::And => selected.iter().all(|effect| record.has_effect(effect)),
        CombinationMode::Or => selected.iter().any(|effect| record.has_effect(effect)),
    }
}

/// Check if the record's resolved tier is among the selected tiers.
///
/// Category selection is always OR; a record sits in exactly one tier.
pub fn matches_categories(record: &TerpeneRecord, selected: &BTreeSet<Category>) -> bool {
    selected.is_empty() || selected.contains(&resolve_category(&record.category))
}
