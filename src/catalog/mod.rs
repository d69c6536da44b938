//! Catalog data model.
//!
//! A [`TerpeneRecord`] is one entry of the catalog. Records arrive already
//! validated by the loading layer, but a few fields are still allowed to be
//! out of contract: the category may be missing or hold an unknown string,
//! and the list fields may be empty. Both cases are modelled explicitly here
//! so that downstream consumers never see a raw invalid value.

mod lenient;
mod loader;

pub use loader::{load_catalog, parse_catalog};

use crate::errors::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Priority tier of a record.
///
/// `Uncategorized` is never stored in a catalog; it is the fallback every
/// consumer observes for a missing or invalid category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Core,
    Secondary,
    Minor,
    Uncategorized,
}

impl Category {
    /// Canonical name as it appears in catalog documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Core => "Core",
            Category::Secondary => "Secondary",
            Category::Minor => "Minor",
            Category::Uncategorized => "Uncategorized",
        }
    }

    /// Numeric rank used for ordering (1 = highest priority)
    pub fn rank(&self) -> u8 {
        match self {
            Category::Core => 1,
            Category::Secondary => 2,
            Category::Minor => 3,
            Category::Uncategorized => 4,
        }
    }

    /// All four tiers in rank order
    pub fn all() -> &'static [Category] {
        &[
            Category::Core,
            Category::Secondary,
            Category::Minor,
            Category::Uncategorized,
        ]
    }

    /// Match a raw catalog value against the three tiers a catalog may carry.
    ///
    /// Matching is exact; anything else is not a known tier.
    pub fn parse_known(raw: &str) -> Option<Category> {
        match raw {
            "Core" => Some(Category::Core),
            "Secondary" => Some(Category::Secondary),
            "Minor" => Some(Category::Minor),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a tier name supplied by a caller (CLI flag, filter request).
///
/// Case-insensitive and accepts `Uncategorized`. An unknown name is a caller
/// bug and fails loudly.
impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "core" => Ok(Category::Core),
            "secondary" => Ok(Category::Secondary),
            "minor" => Ok(Category::Minor),
            "uncategorized" => Ok(Category::Uncategorized),
            _ => Err(Error::InvalidCategory(s.to_string())),
        }
    }
}

/// The category field of a record as it was loaded.
///
/// Distinguishes "explicitly missing" from "corrupt data" so that the
/// classification layer can emit a diagnostic for the latter while resolving
/// both to [`Category::Uncategorized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Option<String>")]
pub enum CategoryField {
    Known(Category),
    #[default]
    Missing,
    Invalid(String),
}

impl CategoryField {
    /// Raw value carried by the record, if any
    pub fn raw(&self) -> Option<&str> {
        match self {
            CategoryField::Known(category) => Some(category.as_str()),
            CategoryField::Missing => None,
            CategoryField::Invalid(raw) => Some(raw.as_str()),
        }
    }
}

impl From<Category> for CategoryField {
    fn from(category: Category) -> Self {
        match category {
            Category::Uncategorized => CategoryField::Missing,
            known => CategoryField::Known(known),
        }
    }
}

impl From<Option<&str>> for CategoryField {
    fn from(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => CategoryField::Missing,
            Some(value) => Category::parse_known(value)
                .map(CategoryField::Known)
                .unwrap_or_else(|| CategoryField::Invalid(value.to_string())),
        }
    }
}

impl From<Value> for CategoryField {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CategoryField::Missing,
            Value::String(raw) => CategoryField::from(Some(raw.as_str())),
            other => CategoryField::Invalid(other.to_string()),
        }
    }
}

impl From<CategoryField> for Option<String> {
    fn from(field: CategoryField) -> Self {
        field.raw().map(str::to_string)
    }
}

/// One catalog entry.
///
/// Fields this engine does not examine (concentration, molecular data,
/// references and so on) are kept verbatim in `extra` and serialized back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerpeneRecord {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub aroma: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub sources: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub effects: Vec<String>,
    #[serde(default)]
    pub category: CategoryField,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TerpeneRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aroma: String::new(),
            description: String::new(),
            sources: Vec::new(),
            effects: Vec::new(),
            category: CategoryField::Missing,
            extra: Map::new(),
        }
    }

    pub fn with_aroma(mut self, aroma: impl Into<String>) -> Self {
        self.aroma = aroma.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_effects<I, S>(mut self, effects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.effects = effects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryField>) -> Self {
        self.category = category.into();
        self
    }

    /// Effect identifiers with duplicates removed, in first-seen order.
    pub fn distinct_effects(&self) -> impl Iterator<Item = &str> {
        let mut seen = HashSet::with_capacity(self.effects.len());
        self.effects
            .iter()
            .map(String::as_str)
            .filter(move |effect| seen.insert(*effect))
    }

    pub fn has_effect(&self, effect: &str) -> bool {
        self.effects.iter().any(|e| e == effect)
    }
}
