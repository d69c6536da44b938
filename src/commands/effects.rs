use super::CommandContext;
use crate::catalog::load_catalog;
use crate::cli::TextFormat;
use crate::filter::available_effects;
use crate::formatting::formatter_for;
use crate::metadata::{group_effects, EffectRegistry, StaticLabels};
use crate::output::{render_effect_groups, render_json};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct EffectsConfig {
    pub catalog: Option<PathBuf>,
    pub locale: Option<String>,
    pub format: TextFormat,
}

pub fn run_effects(ctx: &CommandContext, config: EffectsConfig) -> Result<String> {
    let registry = EffectRegistry::builtin();

    let groups = match &config.catalog {
        Some(path) => {
            let records = load_catalog(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?;
            group_effects(available_effects(&records), registry)
        }
        None => group_effects(
            registry.entries().into_iter().map(|meta| meta.id.as_str()),
            registry,
        ),
    };

    match config.format {
        TextFormat::Json => render_json(&groups),
        TextFormat::Text => {
            let labels = StaticLabels::builtin(ctx.locale(config.locale.as_deref()));
            let formatter = formatter_for(ctx.formatting);
            Ok(render_effect_groups(&groups, &labels, formatter.as_ref()))
        }
    }
}
