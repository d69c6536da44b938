use std::fs;
use std::path::{Path, PathBuf};

use super::TerpmapConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".terpmap.toml";

/// Contents written by `terpmap init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r##"# terpmap configuration

[display]
# Label language: en, es
locale = "en"
# Terminal colors: auto, always, never
color = "auto"

[sort]
# name, aroma, effects, category
key = "category"
direction = "ascending"

[filter]
# How multiple selected effects combine: and, or
effect_mode = "or"

[sunburst]
root_name = "Terpenes"
default_color = "#9E9E9E"
"##;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<TerpmapConfig> {
    let config = toml::from_str::<TerpmapConfig>(contents)
        .map_err(|e| Error::Configuration(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from an explicit path. Errors are returned, not swallowed.
pub fn load_config_from(path: &Path) -> Result<TerpmapConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::io("Failed to read config file", path, e))?;
    parse_and_validate_config(&contents)
}

/// How many directories, starting with the working directory, are searched.
pub const MAX_DISCOVERY_DEPTH: usize = 10;

/// A configuration together with the file that supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: TerpmapConfig,
    /// `None` when no usable file was found and defaults apply
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    fn defaults() -> Self {
        Self {
            config: TerpmapConfig::default(),
            source: None,
        }
    }
}

/// Search `start` and its ancestors, nearest first, for `.terpmap.toml`.
///
/// Unreadable or invalid files are skipped with a warning, so a broken file
/// in a subdirectory does not hide a valid one further up.
pub fn discover_config(start: &Path, max_depth: usize) -> LoadedConfig {
    start
        .ancestors()
        .take(max_depth)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| {
            read_candidate(&path).map(|config| LoadedConfig {
                config,
                source: Some(path),
            })
        })
        .unwrap_or_else(|| {
            log::debug!(
                "No usable {} within {} directories of {}; using defaults",
                CONFIG_FILE_NAME,
                max_depth,
                start.display()
            );
            LoadedConfig::defaults()
        })
}

// A missing file is the normal case and stays quiet.
fn read_candidate(path: &Path) -> Option<TerpmapConfig> {
    match load_config_from(path) {
        Ok(config) => Some(config),
        Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            log::warn!("Skipping {}: {}", path.display(), e);
            None
        }
    }
}

/// Discover configuration from the working directory upwards.
pub fn load_config() -> LoadedConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(&dir, MAX_DISCOVERY_DEPTH),
        Err(e) => {
            log::warn!("Failed to get current directory: {}; using defaults", e);
            LoadedConfig::defaults()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CombinationMode;
    use crate::metadata::Locale;
    use crate::sort::{SortDirection, SortKey};

    #[test]
    fn test_template_parses_to_defaults() {
        let config = parse_and_validate_config(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, TerpmapConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = parse_and_validate_config(
            r#"
            [sort]
            key = "name"
            direction = "descending"

            [display]
            locale = "es-MX"
            "#,
        )
        .unwrap();
        assert_eq!(config.sort.key, SortKey::Name);
        assert_eq!(config.sort.direction, SortDirection::Descending);
        assert_eq!(config.display.locale, Locale::Es);
        assert_eq!(config.filter.effect_mode, CombinationMode::Or);
    }

    #[test]
    fn test_unknown_enum_value_is_a_config_error() {
        let result = parse_and_validate_config("[filter]\neffect_mode = \"xor\"\n");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_discover_reports_supplying_ancestor() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b").join("c");
        fs::create_dir_all(&nested).unwrap();
        let expected = write_config(&root.path().join("a"), "[sort]\nkey = \"name\"\n");

        let loaded = discover_config(&nested, MAX_DISCOVERY_DEPTH);
        assert_eq!(loaded.source, Some(expected));
        assert_eq!(loaded.config.sort.key, SortKey::Name);
    }

    #[test]
    fn test_discover_skips_broken_nearer_file() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        let expected = write_config(&root.path().join("a"), "[display]\nlocale = \"es\"\n");
        write_config(&nested, "[filter]\neffect_mode = \"xor\"\n");

        let loaded = discover_config(&nested, MAX_DISCOVERY_DEPTH);
        assert_eq!(loaded.source, Some(expected));
        assert_eq!(loaded.config.display.locale, Locale::Es);
    }

    #[test]
    fn test_discover_respects_depth_limit() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        write_config(root.path(), "[sort]\nkey = \"aroma\"\n");

        let loaded = discover_config(&nested, 2);
        assert_eq!(loaded.source, None);
        assert_eq!(loaded.config, TerpmapConfig::default());
    }

    #[test]
    fn test_load_config_from_missing_path() {
        let result = load_config_from(Path::new("/no/such/.terpmap.toml"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
