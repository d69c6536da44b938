use crate::catalog::Category;
use crate::errors::Result;
use crate::filter::{CombinationMode, FilterCriteria};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Aligned table (default)
    Table,
    /// Pretty-printed JSON array of records
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TextFormat {
    /// Indented outline (default)
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "terpmap")]
#[command(about = "Browse, filter and aggregate terpene catalogs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to discovering .terpmap.toml)
    #[arg(long, global = true, env = "TERPMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    /// Show debug diagnostics
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List catalog records as a filtered, sorted table
    List {
        /// Catalog JSON file
        catalog: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Sort key: name, aroma, effects, category
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Label language (en, es)
        #[arg(long)]
        locale: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: ListFormat,
    },

    /// Show the effect hierarchy of the filtered records
    Tree {
        /// Catalog JSON file
        catalog: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Build the tree over the whole catalog, ignoring filters
        #[arg(long, conflicts_with_all = ["search", "effects", "categories"])]
        all: bool,

        /// Label language (en, es)
        #[arg(long)]
        locale: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: TextFormat,
    },

    /// List known effects grouped by therapeutic group
    Effects {
        /// Only list effects that occur in this catalog
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Label language (en, es)
        #[arg(long)]
        locale: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: TextFormat,
    },

    /// Write a default .terpmap.toml to the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

/// Filter flags shared by `list` and `tree`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive search over name, aroma, effects and sources
    #[arg(short, long)]
    pub search: Option<String>,

    /// Effect identifier to require (repeatable or comma separated)
    #[arg(short, long = "effect", value_delimiter = ',')]
    pub effects: Vec<String>,

    /// How multiple effects combine: and, or
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Category to include: core, secondary, minor, uncategorized
    #[arg(short, long = "category", value_delimiter = ',')]
    pub categories: Vec<String>,
}

impl FilterArgs {
    /// Build criteria, falling back to `default_mode` when `--mode` is absent.
    pub fn to_criteria(&self, default_mode: CombinationMode) -> Result<FilterCriteria> {
        let mode = match &self.mode {
            Some(raw) => raw.parse::<CombinationMode>()?,
            None => default_mode,
        };

        let categories = self
            .categories
            .iter()
            .map(|raw| raw.parse::<Category>())
            .collect::<Result<Vec<_>>>()?;

        let mut criteria = FilterCriteria::new()
            .with_effects(self.effects.iter().map(|e| e.trim()).filter(|e| !e.is_empty()))
            .with_categories(categories)
            .with_mode(mode);
        if let Some(search) = &self.search {
            criteria = criteria.with_search(search.as_str());
        }
        Ok(criteria)
    }
}
