//! Browsing session state.
//!
//! The engine modules are stateless: every call rebuilds its output from the
//! inputs. A host that re-renders on every state change would recompute the
//! same visible set and tree over and over, so [`CatalogSession`] holds the
//! record set together with the current filter and sort state and memoizes
//! both views.
//!
//! Cache keys:
//! - visible records: (catalog fingerprint, criteria, sort key, direction)
//! - tree over the visible records: fingerprint of the set of visible positions
//! - tree over the whole catalog: catalog fingerprint
//!
//! Fingerprints are 64-bit xxHash digests of the record content the engine
//! reads (id, name, aroma, sources, effects, category).

use crate::catalog::TerpeneRecord;
use crate::filter::{filter_records, FilterCriteria, FilterStatistics};
use crate::metadata::EffectLookup;
use crate::sort::{sort_indices, SortDirection, SortKey};
use crate::sunburst::{build_tree_with, SunburstNode, TreeOptions};
use xxhash_rust::xxh64::Xxh64;

/// Cache hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub visible_hits: usize,
    pub visible_misses: usize,
    pub tree_hits: usize,
    pub tree_misses: usize,
}

#[derive(Debug, Clone)]
struct VisibleEntry {
    catalog_fingerprint: u64,
    criteria: FilterCriteria,
    sort_key: SortKey,
    direction: SortDirection,
    indices: Vec<usize>,
    statistics: FilterStatistics,
}

impl VisibleEntry {
    fn is_valid_for(&self, fingerprint: u64, criteria: &FilterCriteria, key: SortKey, direction: SortDirection) -> bool {
        self.catalog_fingerprint == fingerprint
            && self.sort_key == key
            && self.direction == direction
            && &self.criteria == criteria
    }
}

#[derive(Debug, Clone)]
struct TreeEntry {
    key: u64,
    tree: SunburstNode,
}

/// Host-side state for one browsing session.
pub struct CatalogSession<'m> {
    records: Vec<TerpeneRecord>,
    fingerprint: u64,
    lookup: &'m dyn EffectLookup,
    tree_options: TreeOptions,
    criteria: FilterCriteria,
    sort_key: SortKey,
    direction: SortDirection,
    visible: Option<VisibleEntry>,
    visible_tree: Option<TreeEntry>,
    catalog_tree: Option<TreeEntry>,
    stats: CacheStats,
}

impl<'m> CatalogSession<'m> {
    pub fn new(records: Vec<TerpeneRecord>, lookup: &'m dyn EffectLookup) -> Self {
        let fingerprint = catalog_fingerprint(&records);
        Self {
            records,
            fingerprint,
            lookup,
            tree_options: TreeOptions::default(),
            criteria: FilterCriteria::default(),
            sort_key: SortKey::default(),
            direction: SortDirection::default(),
            visible: None,
            visible_tree: None,
            catalog_tree: None,
            stats: CacheStats::default(),
        }
    }

    pub fn with_tree_options(mut self, options: TreeOptions) -> Self {
        self.tree_options = options;
        self.visible_tree = None;
        self.catalog_tree = None;
        self
    }

    pub fn with_sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.set_sort(key, direction);
        self
    }

    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn records(&self) -> &[TerpeneRecord] {
        &self.records
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> (SortKey, SortDirection) {
        (self.sort_key, self.direction)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.stats
    }

    /// Replace the record set. Caches are dropped only when the content changed.
    pub fn replace_records(&mut self, records: Vec<TerpeneRecord>) {
        let fingerprint = catalog_fingerprint(&records);
        self.records = records;
        if fingerprint != self.fingerprint {
            self.fingerprint = fingerprint;
            self.visible = None;
            self.visible_tree = None;
            self.catalog_tree = None;
        }
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Edit the criteria in place.
    pub fn update_criteria(&mut self, edit: impl FnOnce(&mut FilterCriteria)) {
        edit(&mut self.criteria);
    }

    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.sort_key = key;
        self.direction = direction;
    }

    /// Column-header behavior: re-selecting the active key flips the
    /// direction, selecting another key sorts it ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.direction = self.direction.toggle();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    fn refresh_visible(&mut self) {
        let valid = self.visible.as_ref().is_some_and(|entry| {
            entry.is_valid_for(self.fingerprint, &self.criteria, self.sort_key, self.direction)
        });

        if valid {
            self.stats.visible_hits += 1;
            return;
        }

        self.stats.visible_misses += 1;
        let _span = tracing::debug_span!("recompute_visible", records = self.records.len()).entered();

        let outcome = filter_records(&self.records, &self.criteria);
        let mut indices = outcome.indices;
        sort_indices(&mut indices, &self.records, self.sort_key, self.direction);

        self.visible = Some(VisibleEntry {
            catalog_fingerprint: self.fingerprint,
            criteria: self.criteria.clone(),
            sort_key: self.sort_key,
            direction: self.direction,
            indices,
            statistics: outcome.statistics,
        });
    }

    fn visible_indices(&self) -> &[usize] {
        self.visible
            .as_ref()
            .map(|entry| entry.indices.as_slice())
            .unwrap_or_default()
    }

    /// Filtered and sorted records for the table view.
    pub fn visible(&mut self) -> Vec<&TerpeneRecord> {
        self.refresh_visible();
        self.visible_indices()
            .iter()
            .filter_map(|&index| self.records.get(index))
            .collect()
    }

    /// Statistics of the most recent filter pass.
    pub fn statistics(&mut self) -> FilterStatistics {
        self.refresh_visible();
        self.visible
            .as_ref()
            .map(|entry| entry.statistics.clone())
            .unwrap_or_default()
    }

    /// Sunburst tree over the visible records.
    pub fn tree(&mut self) -> &SunburstNode {
        self.refresh_visible();

        let indices = self
            .visible
            .as_ref()
            .map(|entry| entry.indices.as_slice())
            .unwrap_or_default();
        let key = membership_fingerprint(self.fingerprint, indices);

        let fresh = self.visible_tree.as_ref().is_some_and(|entry| entry.key == key);
        if fresh {
            self.stats.tree_hits += 1;
        } else {
            self.stats.tree_misses += 1;
            self.visible_tree = None;
        }

        let records = &self.records;
        let lookup = self.lookup;
        let options = &self.tree_options;
        let entry = self.visible_tree.get_or_insert_with(|| TreeEntry {
            key,
            tree: build_tree_with(
                indices.iter().filter_map(|&index| records.get(index)),
                lookup,
                options,
            ),
        });
        &entry.tree
    }

    /// Sunburst tree over the whole catalog, ignoring the filter.
    pub fn catalog_tree(&mut self) -> &SunburstNode {
        let key = self.fingerprint;
        let fresh = self.catalog_tree.as_ref().is_some_and(|entry| entry.key == key);
        if fresh {
            self.stats.tree_hits += 1;
        } else {
            self.stats.tree_misses += 1;
            self.catalog_tree = None;
        }

        let records = &self.records;
        let lookup = self.lookup;
        let options = &self.tree_options;
        let entry = self.catalog_tree.get_or_insert_with(|| TreeEntry {
            key,
            tree: build_tree_with(records, lookup, options),
        });
        &entry.tree
    }
}

/// Content fingerprint of a record set.
pub fn catalog_fingerprint(records: &[TerpeneRecord]) -> u64 {
    let mut hasher = Xxh64::new(0);
    for record in records {
        write_field(&mut hasher, &record.id);
        write_field(&mut hasher, &record.name);
        write_field(&mut hasher, &record.aroma);
        write_list(&mut hasher, &record.sources);
        write_list(&mut hasher, &record.effects);
        write_field(&mut hasher, record.category.raw().unwrap_or("\u{0}"));
    }
    hasher.digest()
}

// Order-insensitive: the tree does not depend on the table order.
fn membership_fingerprint(catalog: u64, positions: &[usize]) -> u64 {
    let mut positions = positions.to_vec();
    positions.sort_unstable();

    let mut hasher = Xxh64::new(catalog);
    for position in &positions {
        hasher.update(&(*position as u64).to_le_bytes());
    }
    hasher.update(&(positions.len() as u64).to_le_bytes());
    hasher.digest()
}

// Length-prefixed so that adjacent fields cannot run together.
fn write_field(hasher: &mut Xxh64, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn write_list(hasher: &mut Xxh64, values: &[String]) {
    hasher.update(&(values.len() as u64).to_le_bytes());
    for value in values {
        write_field(hasher, value);
    }
}
