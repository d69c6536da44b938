//! Sort functionality for catalog records.
//!
//! Every comparator ends in a tie-break on the record id, so the order of a
//! fixed record set never depends on its input order.

use crate::catalog::TerpeneRecord;
use crate::classification::rank_of;
use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Sort by display name
    Name,
    /// Sort by aroma description
    Aroma,
    /// Sort by the joined effect list
    Effects,
    /// Sort by tier (Core first), then name
    #[default]
    Category,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Aroma => "aroma",
            SortKey::Effects => "effects",
            SortKey::Category => "category",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Aroma => "Aroma",
            SortKey::Effects => "Effects",
            SortKey::Category => "Category",
        }
    }

    /// Get all sort criteria
    pub fn all() -> &'static [SortKey] {
        &[SortKey::Name, SortKey::Aroma, SortKey::Effects, SortKey::Category]
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "aroma" => Ok(SortKey::Aroma),
            "effects" => Ok(SortKey::Effects),
            "category" => Ok(SortKey::Category),
            _ => Err(Error::InvalidSortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Apply the direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("ascending"),
            SortDirection::Descending => f.write_str("descending"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(Error::InvalidSortDirection(s.to_string())),
        }
    }
}

/// Language-aware string comparison.
///
/// Compares case-folded text first so that "alpha" and "Beta" order the way
/// a reader expects, then falls back to the raw strings to stay total.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

fn joined_effects(record: &TerpeneRecord) -> String {
    record.effects.join(", ")
}

fn base_compare(a: &TerpeneRecord, b: &TerpeneRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => collate(&a.name, &b.name),
        SortKey::Aroma => collate(&a.aroma, &b.aroma),
        SortKey::Effects => collate(&joined_effects(a), &joined_effects(b)),
        SortKey::Category => rank_of(&a.category).cmp(&rank_of(&b.category)),
    }
}

/// Compare two records for the requested key and direction.
///
/// The direction flips the primary key only. Within a tier the category key
/// always orders names ascending, and the final id tie-break is always
/// ascending.
pub fn compare(a: &TerpeneRecord, b: &TerpeneRecord, key: SortKey, direction: SortDirection) -> Ordering {
    let primary = direction.apply(base_compare(a, b, key));
    let secondary = || match key {
        SortKey::Category => collate(&a.name, &b.name),
        _ => Ordering::Equal,
    };
    primary
        .then_with(secondary)
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort record references in place.
pub fn sort_records(records: &mut [&TerpeneRecord], key: SortKey, direction: SortDirection) {
    records.sort_by(|a, b| compare(a, b, key, direction));
}

/// Sort positions into `records` in place. Out-of-range positions sort last.
pub fn sort_indices(indices: &mut [usize], records: &[TerpeneRecord], key: SortKey, direction: SortDirection) {
    indices.sort_by(|&a, &b| match (records.get(a), records.get(b)) {
        (Some(ra), Some(rb)) => compare(ra, rb, key, direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(&b),
    });
}

/// Collect and sort records.
pub fn sorted<'a>(
    records: impl IntoIterator<Item = &'a TerpeneRecord>,
    key: SortKey,
    direction: SortDirection,
) -> Vec<&'a TerpeneRecord> {
    let mut records: Vec<&TerpeneRecord> = records.into_iter().collect();
    sort_records(&mut records, key, direction);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn record(id: &str, name: &str, category: Option<&str>) -> TerpeneRecord {
        TerpeneRecord::new(id, name).with_category(category)
    }

    fn names(records: &[&TerpeneRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_sort_key_parsing_is_loud() {
        assert_eq!("Category".parse::<SortKey>().unwrap(), SortKey::Category);
        assert!(matches!("potency".parse::<SortKey>(), Err(Error::InvalidSortKey(_))));
        assert!(matches!(
            "sideways".parse::<SortDirection>(),
            Err(Error::InvalidSortDirection(_))
        ));
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Descending);
    }

    #[test]
    fn test_all_sort_keys() {
        let all = SortKey::all();
        assert_eq!(all.len(), 4);
        assert!(all.contains(&SortKey::Category));
    }

    #[test]
    fn test_collate_is_case_insensitive_first() {
        assert_eq!(collate("alpha", "Beta"), Ordering::Less);
        assert_eq!(collate("Beta", "alpha"), Ordering::Greater);
        assert_ne!(collate("pinene", "Pinene"), Ordering::Equal);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_name_sort_both_directions() {
        let records = vec![
            record("1", "pinene", None),
            record("2", "Bisabolol", None),
            record("3", "Camphene", None),
        ];
        let asc = sorted(&records, SortKey::Name, SortDirection::Ascending);
        assert_eq!(names(&asc), vec!["Bisabolol", "Camphene", "pinene"]);
        let desc = sorted(&records, SortKey::Name, SortDirection::Descending);
        assert_eq!(names(&desc), vec!["pinene", "Camphene", "Bisabolol"]);
    }

    #[test]
    fn test_category_descending_keeps_names_ascending_within_tier() {
        let records = vec![
            record("1", "Myrcene", Some("Core")),
            record("2", "Limonene", Some("Core")),
            record("3", "Pinene", Some("Secondary")),
            record("4", "Bogusene", Some("Bogus")),
        ];
        let desc = sorted(&records, SortKey::Category, SortDirection::Descending);
        assert_eq!(names(&desc), vec!["Bogusene", "Pinene", "Limonene", "Myrcene"]);
    }

    #[test]
    fn test_effects_sort_uses_joined_string() {
        let records = vec![
            TerpeneRecord::new("1", "A").with_effects(["sedative"]),
            TerpeneRecord::new("2", "B").with_effects(["focus", "sedative"]),
            TerpeneRecord::new("3", "C"),
        ];
        let asc = sorted(&records, SortKey::Effects, SortDirection::Ascending);
        assert_eq!(names(&asc), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_equal_keys_break_ties_on_id() {
        let records = vec![
            record("b", "Linalool", Some("Minor")),
            record("a", "Linalool", Some("Minor")),
        ];
        let asc = sorted(&records, SortKey::Name, SortDirection::Descending);
        assert_eq!(asc[0].id, "a");
    }

    #[test]
    fn test_sort_indices_matches_sorted() {
        let records = vec![
            record("1", "Terpinolene", Some("Minor")),
            record("2", "Caryophyllene", Some("Core")),
            record("3", "Ocimene", None),
        ];
        let mut indices = vec![0, 1, 2];
        sort_indices(&mut indices, &records, SortKey::Category, SortDirection::Ascending);
        assert_eq!(indices, vec![1, 0, 2]);
        assert_eq!(
            rank_of(&records[indices[2]].category),
            Category::Uncategorized.rank()
        );
    }
}
