use crate::formatting::OutputFormatter;
use crate::metadata::LabelProvider;
use crate::sunburst::SunburstNode;
use std::fmt::Write;

/// Render the sunburst tree as an indented outline.
pub fn render_tree(
    root: &SunburstNode,
    labels: &dyn LabelProvider,
    formatter: &dyn OutputFormatter,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", formatter.header(&root.name), root.value);

    let effects = root.children();
    for (i, effect) in effects.iter().enumerate() {
        let last_effect = i + 1 == effects.len();
        let branch = if last_effect { "└── " } else { "├── " };
        let display = labels
            .effect_name(&effect.name)
            .unwrap_or_else(|| effect.name.clone());
        let _ = writeln!(
            out,
            "{branch}{} {} ({})",
            formatter.bold(&effect.name),
            formatter.dim(&display),
            effect.value
        );

        let stem = if last_effect { "    " } else { "│   " };
        let leaves = effect.children();
        for (j, leaf) in leaves.iter().enumerate() {
            let twig = if j + 1 == leaves.len() { "└── " } else { "├── " };
            let _ = writeln!(out, "{stem}{twig}{}", leaf.name);
        }
    }

    out
}
