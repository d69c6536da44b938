use crate::catalog::{Category, TerpeneRecord};
use crate::classification::{count_by_tier, display_label_of, resolve_category};
use crate::formatting::OutputFormatter;
use crate::metadata::LabelProvider;
use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

fn tier_color(category: Category) -> Color {
    match category {
        Category::Core => Color::Green,
        Category::Secondary => Color::Cyan,
        Category::Minor => Color::Yellow,
        Category::Uncategorized => Color::DarkGrey,
    }
}

/// Render records as a table with a tier summary line.
///
/// `total` is the size of the unfiltered catalog.
pub fn render_table(
    records: &[&TerpeneRecord],
    total: usize,
    labels: &dyn LabelProvider,
    formatter: &dyn OutputFormatter,
    use_color: bool,
) -> String {
    let mut table = Table::new();
    table
        .load_preset(if use_color { UTF8_FULL } else { ASCII_FULL })
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Name", "Category", "Aroma", "Effects"]);

    for record in records {
        let category = resolve_category(&record.category);
        let label = display_label_of(&record.category, labels);
        let effects = record
            .effects
            .iter()
            .map(|id| labels.effect_name(id).unwrap_or_else(|| id.clone()))
            .collect::<Vec<_>>()
            .join(", ");

        let mut tier_cell = Cell::new(label);
        if use_color {
            tier_cell = tier_cell.fg(tier_color(category));
            if category == Category::Core {
                tier_cell = tier_cell.add_attribute(Attribute::Bold);
            }
        }

        table.add_row(vec![
            Cell::new(&record.name),
            tier_cell,
            Cell::new(&record.aroma),
            Cell::new(effects),
        ]);
    }

    let counts = count_by_tier(records.iter().copied());
    let summary = counts
        .iter()
        .map(|(category, count)| {
            let label = labels.category_label(*category);
            format!("{}: {}", formatter.tier(*category, &label), count)
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{table}\n{} of {} terpenes shown ({summary})\n",
        records.len(),
        total
    )
}
