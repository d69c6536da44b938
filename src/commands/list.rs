use super::CommandContext;
use crate::catalog::load_catalog;
use crate::cli::{FilterArgs, ListFormat};
use crate::formatting::formatter_for;
use crate::metadata::{EffectRegistry, StaticLabels};
use crate::output::{render_json, render_table};
use crate::session::CatalogSession;
use crate::sort::{SortDirection, SortKey};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ListConfig {
    pub catalog: PathBuf,
    pub filter: FilterArgs,
    pub sort: Option<String>,
    pub descending: bool,
    pub locale: Option<String>,
    pub format: ListFormat,
}

/// Resolve the sort from flags, falling back to the configured default.
///
/// `--sort` without `--desc` sorts ascending, whatever the config says.
pub fn resolve_sort(
    ctx: &CommandContext,
    sort: Option<&str>,
    descending: bool,
) -> Result<(SortKey, SortDirection)> {
    let key = match sort {
        Some(raw) => raw.parse::<SortKey>()?,
        None => ctx.config.sort.key,
    };
    let direction = if descending {
        SortDirection::Descending
    } else if sort.is_some() {
        SortDirection::Ascending
    } else {
        ctx.config.sort.direction
    };
    Ok((key, direction))
}

pub fn run_list(ctx: &CommandContext, config: ListConfig) -> Result<String> {
    let records = load_catalog(&config.catalog)
        .with_context(|| format!("Failed to load catalog {}", config.catalog.display()))?;
    let criteria = config
        .filter
        .to_criteria(ctx.config.filter.effect_mode)
        .context("Invalid filter arguments")?;
    let (key, direction) = resolve_sort(ctx, config.sort.as_deref(), config.descending)?;

    let total = records.len();
    let mut session = CatalogSession::new(records, EffectRegistry::builtin())
        .with_criteria(criteria)
        .with_sort(key, direction);

    let stats = session.statistics();
    log::debug!(
        "{} of {} records matched (search -{}, effects -{}, category -{})",
        stats.matched,
        stats.total_records,
        stats.rejected_by_search,
        stats.rejected_by_effects,
        stats.rejected_by_category
    );

    let visible = session.visible();
    match config.format {
        ListFormat::Json => render_json(&visible),
        ListFormat::Table => {
            let labels = StaticLabels::builtin(ctx.locale(config.locale.as_deref()));
            let formatter = formatter_for(ctx.formatting);
            Ok(render_table(
                &visible,
                total,
                &labels,
                formatter.as_ref(),
                ctx.formatting.color.should_use_color(),
            ))
        }
    }
}
