use super::CommandContext;
use crate::catalog::load_catalog;
use crate::cli::{FilterArgs, TextFormat};
use crate::formatting::formatter_for;
use crate::metadata::{EffectRegistry, StaticLabels};
use crate::output::{render_json, render_tree};
use crate::session::CatalogSession;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct TreeConfig {
    pub catalog: PathBuf,
    pub filter: FilterArgs,
    pub whole_catalog: bool,
    pub locale: Option<String>,
    pub format: TextFormat,
}

pub fn run_tree(ctx: &CommandContext, config: TreeConfig) -> Result<String> {
    let records = load_catalog(&config.catalog)
        .with_context(|| format!("Failed to load catalog {}", config.catalog.display()))?;
    let criteria = config
        .filter
        .to_criteria(ctx.config.filter.effect_mode)
        .context("Invalid filter arguments")?;

    let mut session = CatalogSession::new(records, EffectRegistry::builtin())
        .with_tree_options(ctx.config.tree_options())
        .with_criteria(criteria);

    let tree = if config.whole_catalog {
        session.catalog_tree()
    } else {
        session.tree()
    };

    match config.format {
        TextFormat::Json => render_json(tree),
        TextFormat::Text => {
            let labels = StaticLabels::builtin(ctx.locale(config.locale.as_deref()));
            let formatter = formatter_for(ctx.formatting);
            Ok(render_tree(tree, &labels, formatter.as_ref()))
        }
    }
}
