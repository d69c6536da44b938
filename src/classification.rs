//! Tier classification.
//!
//! Single place where a record's category field is resolved to one of the
//! four tiers. Sorting, filtering and display all go through here so that
//! every consumer observes the same fallback for missing or corrupt values.

use crate::catalog::{Category, CategoryField, TerpeneRecord};
use crate::metadata::{EffectLookup, LabelProvider, TherapeuticGroup};
use std::collections::BTreeMap;

/// Resolve a category field to its effective tier.
///
/// Missing and invalid values both resolve to [`Category::Uncategorized`].
pub fn resolve_category(field: &CategoryField) -> Category {
    match field {
        CategoryField::Known(category) => *category,
        CategoryField::Missing | CategoryField::Invalid(_) => Category::Uncategorized,
    }
}

/// Numeric rank of a category field: Core 1, Secondary 2, Minor 3, anything else 4.
pub fn rank_of(field: &CategoryField) -> u8 {
    resolve_category(field).rank()
}

/// Locale-resolved tier label for a category field.
///
/// An invalid (present but unrecognized) value logs a warning; the returned
/// label is the Uncategorized label either way.
pub fn display_label_of<P>(field: &CategoryField, labels: &P) -> String
where
    P: LabelProvider + ?Sized,
{
    if let CategoryField::Invalid(raw) = field {
        log::warn!(
            "Invalid category value {:?}; displaying as {}",
            raw,
            Category::Uncategorized
        );
    }
    labels.category_label(resolve_category(field))
}

/// Therapeutic group of an effect, `None` when the effect is unknown.
pub fn category_of_effect<L>(effect_id: &str, lookup: &L) -> Option<TherapeuticGroup>
where
    L: EffectLookup + ?Sized,
{
    lookup.lookup(effect_id).map(|meta| meta.group)
}

/// Number of records per effective tier. Every tier is present in the map.
pub fn count_by_tier<'a>(
    records: impl IntoIterator<Item = &'a TerpeneRecord>,
) -> BTreeMap<Category, usize> {
    let mut counts: BTreeMap<Category, usize> =
        Category::all().iter().map(|c| (*c, 0)).collect();
    for record in records {
        *counts.entry(resolve_category(&record.category)).or_default() += 1;
    }
    counts
}
