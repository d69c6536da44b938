//! Filter criteria and record matching.
//!
//! A [`FilterCriteria`] combines three dimensions: free-text search, effect
//! selection (with a configurable AND/OR mode) and tier selection (always
//! OR). A record is visible when it passes all three.

pub mod predicates;

pub use predicates::{matches_categories, matches_effects, matches_search, sanitize_query};

use crate::catalog::{Category, TerpeneRecord};
use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How multiple selected effects combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombinationMode {
    /// Every selected effect must be present
    And,
    /// At least one selected effect must be present
    #[default]
    Or,
}

impl CombinationMode {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CombinationMode::And => "Match all effects",
            CombinationMode::Or => "Match any effect",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            CombinationMode::And => CombinationMode::Or,
            CombinationMode::Or => CombinationMode::And,
        }
    }
}

impl fmt::Display for CombinationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombinationMode::And => f.write_str("AND"),
            CombinationMode::Or => f.write_str("OR"),
        }
    }
}

impl FromStr for CombinationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" | "all" => Ok(CombinationMode::And),
            "or" | "any" => Ok(CombinationMode::Or),
            _ => Err(Error::InvalidCombinationMode(s.to_string())),
        }
    }
}

/// Filter state as a value object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub selected_effects: BTreeSet<String>,
    #[serde(default)]
    pub selected_categories: BTreeSet<Category>,
    #[serde(default)]
    pub effect_mode: CombinationMode,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn with_effects<I, S>(mut self, effects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_effects = effects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.selected_categories = categories.into_iter().collect();
        self
    }

    pub fn with_mode(mut self, mode: CombinationMode) -> Self {
        self.effect_mode = mode;
        self
    }

    /// Select the effect if unselected, unselect it otherwise.
    pub fn toggle_effect(&mut self, effect: &str) {
        if !self.selected_effects.remove(effect) {
            self.selected_effects.insert(effect.to_string());
        }
    }

    /// Select the tier if unselected, unselect it otherwise.
    pub fn toggle_category(&mut self, category: Category) {
        if !self.selected_categories.remove(&category) {
            self.selected_categories.insert(category);
        }
    }

    /// Reset every dimension, keeping the combination mode.
    pub fn clear(&mut self) {
        self.search_query.clear();
        self.selected_effects.clear();
        self.selected_categories.clear();
    }

    /// True when no dimension restricts the result.
    pub fn is_empty(&self) -> bool {
        self.active_filter_count() == 0
    }

    /// Number of active restrictions (the search counts as one).
    pub fn active_filter_count(&self) -> usize {
        let search = usize::from(!sanitize_query(&self.search_query).is_empty());
        search + self.selected_effects.len() + self.selected_categories.len()
    }
}

/// Check if a record satisfies the criteria.
pub fn matches(record: &TerpeneRecord, criteria: &FilterCriteria) -> bool {
    let needle = sanitize_query(&criteria.search_query);
    matches_search(record, &needle)
        && matches_effects(record, &criteria.selected_effects, criteria.effect_mode)
        && matches_categories(record, &criteria.selected_categories)
}

/// Tracks why records were filtered out.
///
/// A rejected record is attributed to the first dimension it fails, in
/// the order search, effects, category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStatistics {
    /// Total number of records examined
    pub total_records: usize,

    /// Records rejected by the search query
    pub rejected_by_search: usize,

    /// Records rejected by the effect selection
    pub rejected_by_effects: usize,

    /// Records rejected by the tier selection
    pub rejected_by_category: usize,

    /// Records that passed every predicate
    pub matched: usize,
}

impl FilterStatistics {
    /// Get total records rejected (all reasons).
    pub fn total_rejected(&self) -> usize {
        self.rejected_by_search + self.rejected_by_effects + self.rejected_by_category
    }

    /// Get acceptance rate (percentage matched vs examined).
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        (self.matched as f64 / self.total_records as f64) * 100.0
    }
}

/// Result of filtering a record set.
#[derive(Debug, Clone)]
pub struct FilterOutcome<'a> {
    /// Visible records, in input order
    pub records: Vec<&'a TerpeneRecord>,
    /// Positions of the visible records in the input
    pub indices: Vec<usize>,
    pub statistics: FilterStatistics,
}

/// Filter a record set, sanitizing the query once for the whole pass.
pub fn filter_records<'a>(records: &'a [TerpeneRecord], criteria: &FilterCriteria) -> FilterOutcome<'a> {
    let needle = sanitize_query(&criteria.search_query);
    let mut statistics = FilterStatistics {
        total_records: records.len(),
        ..Default::default()
    };
    let mut visible = Vec::new();
    let mut indices = Vec::new();

    for (index, record) in records.iter().enumerate() {
        if !matches_search(record, &needle) {
            statistics.rejected_by_search += 1;
        } else if !matches_effects(record, &criteria.selected_effects, criteria.effect_mode) {
            statistics.rejected_by_effects += 1;
        } else if !matches_categories(record, &criteria.selected_categories) {
            statistics.rejected_by_category += 1;
        } else {
            statistics.matched += 1;
            visible.push(record);
            indices.push(index);
        }
    }

    log::debug!(
        "Filter matched {}/{} records ({} by search, {} by effects, {} by category rejected)",
        statistics.matched,
        statistics.total_records,
        statistics.rejected_by_search,
        statistics.rejected_by_effects,
        statistics.rejected_by_category
    );

    FilterOutcome {
        records: visible,
        indices,
        statistics,
    }
}

/// Distinct effect identifiers present in a record set, sorted.
pub fn available_effects<'a>(records: impl IntoIterator<Item = &'a TerpeneRecord>) -> Vec<&'a str> {
    let effects: BTreeSet<&str> = records
        .into_iter()
        .flat_map(|record| record.effects.iter().map(String::as_str))
        .collect();
    effects.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Vec<TerpeneRecord> {
        vec![
            TerpeneRecord::new("limonene", "Limonene")
                .with_aroma("Citrus")
                .with_effects(["energizing", "mood-enhancing"])
                .with_category(Category::Core),
            TerpeneRecord::new("myrcene", "Myrcene")
                .with_aroma("Earthy, musky")
                .with_effects(["sedative"])
                .with_category(Category::Core),
            TerpeneRecord::new("pinene", "Pinene")
                .with_aroma("Pine")
                .with_effects(["focus"])
                .with_category(Category::Secondary),
        ]
    }

    fn names(records: &[&TerpeneRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_combination_mode_parsing() {
        assert_eq!("AND".parse::<CombinationMode>().unwrap(), CombinationMode::And);
        assert_eq!("any".parse::<CombinationMode>().unwrap(), CombinationMode::Or);
        assert!(matches!(
            "xor".parse::<CombinationMode>(),
            Err(Error::InvalidCombinationMode(_))
        ));
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let records = catalog();
        let outcome = filter_records(&records, &FilterCriteria::new());
        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.indices, vec![0, 1, 2]);
        assert_eq!(outcome.statistics.acceptance_rate(), 100.0);
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let records = catalog();
        let criteria = FilterCriteria::new()
            .with_search("e")
            .with_effects(["sedative", "focus"])
            .with_categories([Category::Core]);
        let outcome = filter_records(&records, &criteria);
        assert_eq!(names(&outcome.records), vec!["Myrcene"]);
    }

    #[test]
    fn test_statistics_attribute_first_failing_dimension() {
        let records = catalog();
        let criteria = FilterCriteria::new()
            .with_search("ene")
            .with_effects(["energizing", "sedative"])
            .with_categories([Category::Core]);
        let outcome = filter_records(&records, &criteria);

        assert_eq!(
            outcome.statistics,
            FilterStatistics {
                total_records: 3,
                rejected_by_search: 0,
                rejected_by_effects: 1,
                rejected_by_category: 0,
                matched: 2,
            }
        );
        assert_eq!(outcome.statistics.total_rejected(), 1);
    }

    #[test]
    fn test_matches_agrees_with_filter_records() {
        let records = catalog();
        let criteria = FilterCriteria::new()
            .with_effects(["energizing", "focus"])
            .with_mode(CombinationMode::Or);
        let expected: Vec<&TerpeneRecord> =
            records.iter().filter(|r| matches(r, &criteria)).collect();
        assert_eq!(filter_records(&records, &criteria).records, expected);
    }

    #[test]
    fn test_toggles_and_active_count() {
        let mut criteria = FilterCriteria::new().with_search("   ");
        assert!(criteria.is_empty());

        criteria.toggle_effect("focus");
        criteria.toggle_category(Category::Minor);
        criteria.search_query = "pine".to_string();
        assert_eq!(criteria.active_filter_count(), 3);

        criteria.toggle_effect("focus");
        assert!(!criteria.selected_effects.contains("focus"));

        criteria.effect_mode = CombinationMode::And;
        criteria.clear();
        assert!(criteria.is_empty());
        assert_eq!(criteria.effect_mode, CombinationMode::And);
    }

    #[test]
    fn test_markup_only_query_matches_everything() {
        let records = catalog();
        let outcome = filter_records(&records, &FilterCriteria::new().with_search("<>"));
        assert_eq!(outcome.records.len(), 3);
    }

    #[test]
    fn test_search_with_apostrophe_and_ampersand() {
        let record = TerpeneRecord::new("h", "Hypericene")
            .with_aroma("Sweet & floral")
            .with_sources(["St. John's Wort"]);

        assert!(matches(&record, &FilterCriteria::new().with_search("john's")));
        assert!(matches(&record, &FilterCriteria::new().with_search("sweet & floral")));
        assert!(!matches(&record, &FilterCriteria::new().with_search("john's & floral")));
    }

    #[test]
    fn test_available_effects_sorted_and_distinct() {
        let mut records = catalog();
        records.push(TerpeneRecord::new("x", "Terpinolene").with_effects(["focus", "sedative"]));
        assert_eq!(
            available_effects(&records),
            vec!["energizing", "focus", "mood-enhancing", "sedative"]
        );
    }
}
