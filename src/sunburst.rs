//! Hierarchical aggregation for the sunburst chart.
//!
//! Turns a flat record set into a three-level tree: a root, one node per
//! effect, and one terpene leaf per (effect, record) pair. A record with
//! several effects appears once under each of them. The tree is built from a
//! single effect-keyed index followed by one sort per level.

use crate::catalog::TerpeneRecord;
use crate::metadata::EffectLookup;
use crate::sort::collate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name given to the root when none is configured.
pub const DEFAULT_ROOT_NAME: &str = "Terpenes";

/// Color for effects that have no metadata entry.
pub const DEFAULT_EFFECT_COLOR: &str = "#9E9E9E";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Root,
    Effect,
    Terpene,
}

/// One node of the aggregation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunburstNode {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub value: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SunburstNode>>,
    /// Record id, terpene leaves only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SunburstNode {
    fn root(name: &str, effects: Vec<SunburstNode>) -> Self {
        Self {
            name: name.to_string(),
            node_type: NodeType::Root,
            value: effects.iter().map(|e| e.value).sum(),
            color: None,
            children: Some(effects),
            id: None,
        }
    }

    fn effect(effect_id: &str, color: String, leaves: Vec<SunburstNode>) -> Self {
        Self {
            name: effect_id.to_string(),
            node_type: NodeType::Effect,
            value: leaves.len(),
            color: Some(color),
            children: Some(leaves),
            id: None,
        }
    }

    fn terpene(record: &TerpeneRecord, color: &str) -> Self {
        Self {
            name: record.name.clone(),
            node_type: NodeType::Terpene,
            value: 1,
            color: Some(color.to_string()),
            children: None,
            id: Some(record.id.clone()),
        }
    }

    /// Children, empty for leaves
    pub fn children(&self) -> &[SunburstNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Direct child with the given name
    pub fn find_child(&self, name: &str) -> Option<&SunburstNode> {
        self.children().iter().find(|child| child.name == name)
    }

    /// Number of terpene leaves below this node (1 for a leaf).
    pub fn leaf_count(&self) -> usize {
        match self.node_type {
            NodeType::Terpene => 1,
            _ => self.children().iter().map(SunburstNode::leaf_count).sum(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.node_type == NodeType::Terpene
    }
}

/// Options for tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    pub root_name: String,
    pub default_color: String,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            default_color: DEFAULT_EFFECT_COLOR.to_string(),
        }
    }
}

/// Build the sunburst tree with default options.
pub fn build_tree<'a, L>(records: impl IntoIterator<Item = &'a TerpeneRecord>, lookup: &L) -> SunburstNode
where
    L: EffectLookup + ?Sized,
{
    build_tree_with(records, lookup, &TreeOptions::default())
}

/// Build the sunburst tree.
///
/// - Effects are deduplicated within a record.
/// - Records without effects contribute no node.
/// - Effects unknown to `lookup` get `options.default_color`.
/// - Effect nodes are ordered by value descending then name ascending;
///   leaves by name ascending then id.
pub fn build_tree_with<'a, L>(
    records: impl IntoIterator<Item = &'a TerpeneRecord>,
    lookup: &L,
    options: &TreeOptions,
) -> SunburstNode
where
    L: EffectLookup + ?Sized,
{
    let _span = tracing::debug_span!("build_sunburst_tree").entered();

    let mut index: HashMap<&str, Vec<&TerpeneRecord>> = HashMap::new();
    let mut record_count = 0usize;
    for record in records {
        record_count += 1;
        for effect in record.distinct_effects() {
            index.entry(effect).or_default().push(record);
        }
    }

    let mut unknown_effects = 0usize;
    let mut effect_nodes: Vec<SunburstNode> = index
        .into_iter()
        .map(|(effect, members)| {
            let color = match lookup.lookup(effect) {
                Some(meta) => meta.color.clone(),
                None => {
                    unknown_effects += 1;
                    log::debug!("No metadata for effect '{}', using default color", effect);
                    options.default_color.clone()
                }
            };
            let mut leaves: Vec<SunburstNode> = members
                .into_iter()
                .map(|record| SunburstNode::terpene(record, &color))
                .collect();
            leaves.sort_by(|a, b| collate(&a.name, &b.name).then_with(|| a.id.cmp(&b.id)));
            SunburstNode::effect(effect, color, leaves)
        })
        .collect();

    effect_nodes.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));

    tracing::debug!(
        records = record_count,
        effects = effect_nodes.len(),
        unknown_effects,
        "built sunburst tree"
    );

    SunburstNode::root(&options.root_name, effect_nodes)
}
