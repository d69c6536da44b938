//! Effect metadata.
//!
//! Every effect identifier a record may carry can be described by an
//! [`EffectMetadata`] entry: localized display names, a color token for the
//! chart, and the therapeutic group used to organize the filter panel.
//! Lookups return `Option` so each caller decides its own fallback; records
//! and metadata evolve independently and unknown effects are expected.

mod builtin;
mod labels;

pub use labels::{LabelProvider, Locale, StaticLabels};

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// Fixed therapeutic groupings of effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TherapeuticGroup {
    MoodEnergy,
    Cognitive,
    Relaxation,
    Physical,
}

impl TherapeuticGroup {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            TherapeuticGroup::MoodEnergy => "Mood & Energy",
            TherapeuticGroup::Cognitive => "Cognitive",
            TherapeuticGroup::Relaxation => "Relaxation",
            TherapeuticGroup::Physical => "Physical",
        }
    }

    /// Get all groups in panel order
    pub fn all() -> &'static [TherapeuticGroup] {
        &[
            TherapeuticGroup::MoodEnergy,
            TherapeuticGroup::Cognitive,
            TherapeuticGroup::Relaxation,
            TherapeuticGroup::Physical,
        ]
    }
}

impl fmt::Display for TherapeuticGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Description of one known effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectMetadata {
    pub id: String,
    /// Display name keyed by locale code ("en", "es")
    pub names: BTreeMap<String, String>,
    pub color: String,
    pub group: TherapeuticGroup,
}

impl EffectMetadata {
    /// Display name in the requested locale, falling back to English and
    /// then to the identifier itself.
    pub fn display_name(&self, locale: Locale) -> &str {
        self.names
            .get(locale.as_str())
            .or_else(|| self.names.get(Locale::En.as_str()))
            .map(String::as_str)
            .unwrap_or(&self.id)
    }
}

/// Read-only access to effect metadata.
pub trait EffectLookup {
    fn lookup(&self, effect_id: &str) -> Option<&EffectMetadata>;
}

/// Effect metadata keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct EffectRegistry {
    effects: HashMap<String, EffectMetadata>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard effect set shipped with the crate.
    pub fn builtin() -> &'static EffectRegistry {
        &builtin::BUILTIN_REGISTRY
    }

    pub fn from_effects(effects: impl IntoIterator<Item = EffectMetadata>) -> Self {
        let mut registry = Self::new();
        for effect in effects {
            registry.insert(effect);
        }
        registry
    }

    /// Parse a JSON array of effect entries.
    pub fn from_json(contents: &str) -> Result<Self> {
        let effects: Vec<EffectMetadata> = serde_json::from_str(contents)
            .map_err(|e| Error::Configuration(format!("Invalid effect metadata: {}", e)))?;
        Ok(Self::from_effects(effects))
    }

    /// Insert an entry, replacing any previous entry with the same id.
    pub fn insert(&mut self, effect: EffectMetadata) -> Option<EffectMetadata> {
        self.effects.insert(effect.id.clone(), effect)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Entries sorted by identifier
    pub fn entries(&self) -> Vec<&EffectMetadata> {
        let mut entries: Vec<&EffectMetadata> = self.effects.values().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }
}

impl EffectLookup for EffectRegistry {
    fn lookup(&self, effect_id: &str) -> Option<&EffectMetadata> {
        self.effects.get(effect_id)
    }
}

/// Effect identifiers bucketed by therapeutic group, for the filter panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EffectGroups {
    /// Non-empty groups in panel order, ids sorted within each group
    pub groups: Vec<(TherapeuticGroup, Vec<String>)>,
    /// Identifiers with no metadata entry
    pub uncategorized: Vec<String>,
}

impl EffectGroups {
    pub fn get(&self, group: TherapeuticGroup) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, ids)| ids.as_slice())
    }
}

/// Group effect identifiers by therapeutic group.
///
/// Duplicates collapse. Unknown identifiers are kept in a separate bucket
/// rather than dropped.
pub fn group_effects<'a, L>(effect_ids: impl IntoIterator<Item = &'a str>, lookup: &L) -> EffectGroups
where
    L: EffectLookup + ?Sized,
{
    let mut buckets: BTreeMap<TherapeuticGroup, BTreeSet<String>> = BTreeMap::new();
    let mut unknown: BTreeSet<String> = BTreeSet::new();

    for id in effect_ids {
        match lookup.lookup(id) {
            Some(meta) => {
                buckets.entry(meta.group).or_default().insert(id.to_string());
            }
            None => {
                unknown.insert(id.to_string());
            }
        }
    }

    EffectGroups {
        groups: buckets
            .into_iter()
            .map(|(group, ids)| (group, ids.into_iter().collect()))
            .collect(),
        uncategorized: unknown.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str, group: TherapeuticGroup) -> EffectMetadata {
        EffectMetadata {
            id: id.to_string(),
            names: BTreeMap::from([("en".to_string(), id.to_uppercase())]),
            color: "#000000".to_string(),
            group,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_english_then_id() {
        let mut effect = meta("focus", TherapeuticGroup::Cognitive);
        assert_eq!(effect.display_name(Locale::Es), "FOCUS");

        effect.names.clear();
        assert_eq!(effect.display_name(Locale::En), "focus");
    }

    #[test]
    fn test_registry_lookup_misses_are_none() {
        let registry = EffectRegistry::from_effects([meta("focus", TherapeuticGroup::Cognitive)]);
        assert!(registry.lookup("focus").is_some());
        assert!(registry.lookup("teleportation").is_none());
    }

    #[test]
    fn test_registry_from_json() {
        let registry = EffectRegistry::from_json(
            r##"[{"id": "calming", "names": {"en": "Calming"}, "color": "#26A69A", "group": "relaxation"}]"##,
        )
        .unwrap();
        assert_eq!(
            registry.lookup("calming").map(|m| m.group),
            Some(TherapeuticGroup::Relaxation)
        );
        assert!(EffectRegistry::from_json("{").is_err());
    }

    #[test]
    fn test_group_effects_buckets_and_dedups() {
        let registry = EffectRegistry::from_effects([
            meta("focus", TherapeuticGroup::Cognitive),
            meta("alertness", TherapeuticGroup::Cognitive),
            meta("sedative", TherapeuticGroup::Relaxation),
        ]);

        let groups = group_effects(
            ["sedative", "focus", "alertness", "focus", "mystery"],
            &registry,
        );

        assert_eq!(
            groups.get(TherapeuticGroup::Cognitive),
            Some(&["alertness".to_string(), "focus".to_string()][..])
        );
        assert_eq!(groups.groups.len(), 2);
        assert_eq!(groups.groups[0].0, TherapeuticGroup::Cognitive);
        assert_eq!(groups.uncategorized, vec!["mystery".to_string()]);
        assert!(groups.get(TherapeuticGroup::Physical).is_none());
    }
}
