// Export modules for library usage
pub mod catalog;
pub mod classification;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod filter;
pub mod formatting;
pub mod metadata;
pub mod output;
pub mod session;
pub mod sort;
pub mod sunburst;

// Re-export commonly used types
pub use crate::catalog::{load_catalog, parse_catalog, Category, CategoryField, TerpeneRecord};
pub use crate::classification::{category_of_effect, display_label_of, rank_of, resolve_category};
pub use crate::errors::{Error, Result};
pub use crate::filter::{filter_records, matches, CombinationMode, FilterCriteria, FilterStatistics};
pub use crate::metadata::{
    EffectLookup, EffectMetadata, EffectRegistry, LabelProvider, Locale, StaticLabels,
    TherapeuticGroup,
};
pub use crate::session::CatalogSession;
pub use crate::sort::{sort_records, sorted, SortDirection, SortKey};
pub use crate::sunburst::{build_tree, build_tree_with, NodeType, SunburstNode, TreeOptions};
