//! Terminal and JSON renderers for the two views and the effect panel.

mod table;
mod tree;

pub use table::render_table;
pub use tree::render_tree;

use crate::formatting::OutputFormatter;
use crate::metadata::{EffectGroups, LabelProvider};
use serde::Serialize;
use std::fmt::Write;

/// Serialize any view as pretty JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render effect identifiers grouped by therapeutic group.
pub fn render_effect_groups(
    groups: &EffectGroups,
    labels: &dyn LabelProvider,
    formatter: &dyn OutputFormatter,
) -> String {
    let mut out = String::new();

    let sections = groups
        .groups
        .iter()
        .map(|(group, ids)| (group.display_name(), ids))
        .chain(
            (!groups.uncategorized.is_empty())
                .then_some(("Uncategorized", &groups.uncategorized)),
        );

    for (title, ids) in sections {
        let _ = writeln!(out, "{}", formatter.header(title));
        for id in ids {
            let name = labels.effect_name(id).unwrap_or_else(|| id.clone());
            let _ = writeln!(out, "  {:<22} {}", id, formatter.dim(&name));
        }
    }

    out
}
