use super::{EffectMetadata, EffectRegistry, TherapeuticGroup};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use TherapeuticGroup::{Cognitive, MoodEnergy, Physical, Relaxation};

// (id, English, Spanish, color, group)
const BUILTIN_EFFECTS: &[(&str, &str, &str, &str, TherapeuticGroup)] = &[
    ("energizing", "Energizing", "Energizante", "#F4B400", MoodEnergy),
    ("mood-enhancing", "Mood Enhancing", "Mejora del ánimo", "#FF7043", MoodEnergy),
    ("uplifting", "Uplifting", "Estimulante", "#FFCA28", MoodEnergy),
    ("euphoric", "Euphoric", "Eufórico", "#EC407A", MoodEnergy),
    ("focus", "Focus", "Concentración", "#42A5F5", Cognitive),
    ("alertness", "Alertness", "Alerta", "#26C6DA", Cognitive),
    ("memory", "Memory Retention", "Retención de memoria", "#5C6BC0", Cognitive),
    ("creativity", "Creativity", "Creatividad", "#AB47BC", Cognitive),
    ("sedative", "Sedative", "Sedante", "#7E57C2", Relaxation),
    ("relaxing", "Relaxing", "Relajante", "#66BB6A", Relaxation),
    ("calming", "Calming", "Calmante", "#26A69A", Relaxation),
    ("anxiety-relief", "Anxiety Relief", "Alivio de la ansiedad", "#9CCC65", Relaxation),
    ("stress-relief", "Stress Relief", "Alivio del estrés", "#8BC34A", Relaxation),
    ("sleep-aid", "Sleep Aid", "Ayuda para dormir", "#3949AB", Relaxation),
    ("anxiolytic", "Anxiolytic", "Ansiolítico", "#9575CD", Relaxation),
    ("anti-inflammatory", "Anti-inflammatory", "Antiinflamatorio", "#EF5350", Physical),
    ("pain-relief", "Pain Relief", "Alivio del dolor", "#E57373", Physical),
    ("antibacterial", "Antibacterial", "Antibacteriano", "#8D6E63", Physical),
    ("antiviral", "Antiviral", "Antiviral", "#6D4C41", Physical),
    ("antioxidant", "Antioxidant", "Antioxidante", "#FFA726", Physical),
    ("bronchodilator", "Bronchodilator", "Broncodilatador", "#78909C", Physical),
    ("appetite-suppressant", "Appetite Suppressant", "Supresor del apetito", "#A1887F", Physical),
    ("muscle-relaxant", "Muscle Relaxant", "Relajante muscular", "#BA68C8", Physical),
];

pub(super) static BUILTIN_REGISTRY: Lazy<EffectRegistry> = Lazy::new(|| {
    EffectRegistry::from_effects(BUILTIN_EFFECTS.iter().map(|&(id, en, es, color, group)| {
        EffectMetadata {
            id: id.to_string(),
            names: BTreeMap::from([
                ("en".to_string(), en.to_string()),
                ("es".to_string(), es.to_string()),
            ]),
            color: color.to_string(),
            group,
        }
    }))
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog;
    use crate::filter::available_effects;
    use crate::metadata::{EffectLookup, Locale};

    #[test]
    fn test_builtin_registry_covers_every_group() {
        let registry = EffectRegistry::builtin();
        assert_eq!(registry.len(), BUILTIN_EFFECTS.len());
        for group in TherapeuticGroup::all() {
            assert!(
                registry.entries().iter().any(|m| m.group == *group),
                "no builtin effect in {group}"
            );
        }
    }

    #[test]
    fn test_builtin_names_are_localized() {
        let focus = EffectRegistry::builtin().lookup("focus").unwrap();
        assert_eq!(focus.display_name(Locale::En), "Focus");
        assert_eq!(focus.display_name(Locale::Es), "Concentración");
    }

    #[test]
    fn test_bundled_catalog_effects_all_resolve() {
        let records = parse_catalog(include_str!("../../data/terpenes.json")).unwrap();
        let registry = EffectRegistry::builtin();
        let unknown: Vec<&str> = available_effects(&records)
            .into_iter()
            .filter(|id| registry.lookup(id).is_none())
            .collect();
        assert!(unknown.is_empty(), "effects without metadata: {unknown:?}");
    }

    #[test]
    fn test_anxiolytic_and_antiviral_groups() {
        let registry = EffectRegistry::builtin();
        assert_eq!(registry.lookup("anxiolytic").unwrap().group, Relaxation);
        assert_eq!(registry.lookup("antiviral").unwrap().group, Physical);
    }

    #[test]
    fn test_builtin_colors_are_hex_tokens() {
        for meta in EffectRegistry::builtin().entries() {
            assert!(meta.color.starts_with('#') && meta.color.len() == 7, "{}", meta.id);
        }
    }
}
