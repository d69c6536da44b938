//! Locale-resolved labels for tiers and effects.

use super::{EffectLookup, EffectRegistry};
use crate::catalog::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Resolve a locale tag such as "es", "es-MX" or "EN_us".
    ///
    /// Unsupported languages fall back to English.
    pub fn parse_lenient(tag: &str) -> Locale {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Locale::En,
            "es" => Locale::Es,
            _ => {
                log::debug!("Unsupported locale '{}', using English labels", tag);
                Locale::En
            }
        }
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Locale::parse_lenient(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.as_str().to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves user-facing labels into the active display language.
pub trait LabelProvider {
    /// Label for one of the four tiers
    fn category_label(&self, category: Category) -> String;

    /// Display name for an effect, `None` when the effect is unknown
    fn effect_name(&self, effect_id: &str) -> Option<String>;
}

/// Built-in label tables backed by an effect lookup.
pub struct StaticLabels<'a> {
    locale: Locale,
    effects: &'a dyn EffectLookup,
}

impl<'a> StaticLabels<'a> {
    pub fn new(locale: Locale, effects: &'a dyn EffectLookup) -> Self {
        Self { locale, effects }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl StaticLabels<'static> {
    /// Labels backed by the builtin effect registry
    pub fn builtin(locale: Locale) -> Self {
        Self::new(locale, EffectRegistry::builtin())
    }
}

impl LabelProvider for StaticLabels<'_> {
    fn category_label(&self, category: Category) -> String {
        let label = match (self.locale, category) {
            (Locale::En, Category::Core) => "Core",
            (Locale::En, Category::Secondary) => "Secondary",
            (Locale::En, Category::Minor) => "Minor",
            (Locale::En, Category::Uncategorized) => "Uncategorized",
            (Locale::Es, Category::Core) => "Principal",
            (Locale::Es, Category::Secondary) => "Secundario",
            (Locale::Es, Category::Minor) => "Menor",
            (Locale::Es, Category::Uncategorized) => "Sin categoría",
        };
        label.to_string()
    }

    fn effect_name(&self, effect_id: &str) -> Option<String> {
        self.effects
            .lookup(effect_id)
            .map(|meta| meta.display_name(self.locale).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_locale_tags() {
        assert_eq!(Locale::parse_lenient("es"), Locale::Es);
        assert_eq!(Locale::parse_lenient("es-MX"), Locale::Es);
        assert_eq!(Locale::parse_lenient("EN_us"), Locale::En);
        assert_eq!(Locale::parse_lenient("fr"), Locale::En);
        assert_eq!(Locale::parse_lenient(""), Locale::En);
    }

    #[test]
    fn test_category_labels_per_locale() {
        let en = StaticLabels::builtin(Locale::En);
        let es = StaticLabels::builtin(Locale::Es);
        assert_eq!(en.category_label(Category::Uncategorized), "Uncategorized");
        assert_eq!(es.category_label(Category::Core), "Principal");
    }

    #[test]
    fn test_effect_names_resolve_through_lookup() {
        let labels = StaticLabels::builtin(Locale::Es);
        assert_eq!(labels.effect_name("sedative").as_deref(), Some("Sedante"));
        assert_eq!(labels.effect_name("not-an-effect"), None);
    }

    #[test]
    fn test_locale_deserializes_leniently() {
        let locale: Locale = serde_json::from_str("\"es-AR\"").unwrap();
        assert_eq!(locale, Locale::Es);
    }
}
