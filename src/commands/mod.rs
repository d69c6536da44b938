pub mod effects;
pub mod init;
pub mod list;
pub mod tree;

use crate::config::{load_config, load_config_from, LoadedConfig, TerpmapConfig};
use crate::formatting::{ColorMode, FormattingConfig};
use crate::metadata::Locale;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: TerpmapConfig,
    /// File the configuration came from, `None` for defaults
    pub config_source: Option<PathBuf>,
    pub formatting: FormattingConfig,
}

impl CommandContext {
    /// Resolve configuration and color settings.
    ///
    /// An explicit config path must load; a discovered one falls back to
    /// defaults when unusable.
    pub fn load(config_path: Option<&Path>, plain: bool) -> Result<Self> {
        let loaded = match config_path {
            Some(path) => LoadedConfig {
                config: load_config_from(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                source: Some(path.to_path_buf()),
            },
            None => load_config(),
        };

        match &loaded.source {
            Some(source) => log::info!("Using configuration from {}", source.display()),
            None => log::info!("Using default configuration"),
        }

        let mut ctx = Self::with_config(loaded.config, plain);
        ctx.config_source = loaded.source;
        Ok(ctx)
    }

    pub fn with_config(config: TerpmapConfig, plain: bool) -> Self {
        let formatting = if plain {
            FormattingConfig::plain()
        } else {
            let mode = ColorMode::parse(&config.display.color).unwrap_or(ColorMode::Auto);
            FormattingConfig::from_env_with(mode)
        };
        Self {
            config,
            config_source: None,
            formatting,
        }
    }

    /// `--locale` wins over the configured locale.
    pub fn locale(&self, flag: Option<&str>) -> Locale {
        flag.map(Locale::parse_lenient)
            .unwrap_or(self.config.display.locale)
    }
}
