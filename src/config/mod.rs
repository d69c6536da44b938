//! Configuration for terpmap.
//!
//! Read from a `.terpmap.toml` discovered in the working directory or one
//! of its ancestors. Every section and field is optional.

mod loader;

pub use loader::{
    discover_config, load_config, load_config_from, parse_and_validate_config, LoadedConfig,
    CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE, MAX_DISCOVERY_DEPTH,
};

use crate::errors::{Error, Result};
use crate::filter::CombinationMode;
use crate::metadata::Locale;
use crate::sort::{SortDirection, SortKey};
use crate::sunburst::{TreeOptions, DEFAULT_EFFECT_COLOR, DEFAULT_ROOT_NAME};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("static regex is valid"));

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerpmapConfig {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub sort: SortConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub sunburst: SunburstConfig,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Label language ("en", "es"); unsupported tags fall back to English
    #[serde(default)]
    pub locale: Locale,

    /// Terminal colors: auto, always or never
    #[serde(default = "default_color_mode")]
    pub color: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            color: default_color_mode(),
        }
    }
}

fn default_color_mode() -> String {
    "auto".to_string()
}

/// Default table ordering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SortConfig {
    #[serde(default)]
    pub key: SortKey,

    #[serde(default)]
    pub direction: SortDirection,
}

/// Default filter behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// How multiple selected effects combine
    #[serde(default)]
    pub effect_mode: CombinationMode,
}

/// Sunburst tree settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunburstConfig {
    #[serde(default = "default_root_name")]
    pub root_name: String,

    /// Color for effects missing from the metadata
    #[serde(default = "default_effect_color")]
    pub default_color: String,
}

impl Default for SunburstConfig {
    fn default() -> Self {
        Self {
            root_name: default_root_name(),
            default_color: default_effect_color(),
        }
    }
}

fn default_root_name() -> String {
    DEFAULT_ROOT_NAME.to_string()
}

fn default_effect_color() -> String {
    DEFAULT_EFFECT_COLOR.to_string()
}

impl TerpmapConfig {
    /// Check values that deserialization alone cannot validate.
    pub fn validate(&self) -> Result<()> {
        if crate::formatting::ColorMode::parse(&self.display.color).is_none() {
            return Err(Error::Configuration(format!(
                "display.color must be auto, always or never, got '{}'",
                self.display.color
            )));
        }

        if !HEX_COLOR.is_match(&self.sunburst.default_color) {
            return Err(Error::Configuration(format!(
                "sunburst.default_color must be a hex color like #9E9E9E, got '{}'",
                self.sunburst.default_color
            )));
        }

        if self.sunburst.root_name.trim().is_empty() {
            return Err(Error::Configuration(
                "sunburst.root_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            root_name: self.sunburst.root_name.clone(),
            default_color: self.sunburst.default_color.clone(),
        }
    }
}
