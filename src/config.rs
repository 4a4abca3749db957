//! Configuration management for typeahead.
//!
//! Handles loading configuration from TOML files and resolving it against
//! command-line arguments into the settings the application runs with.

use crate::cli::Cli;
use crate::error::{Result, TypeaheadError};
use crate::tui::autocomplete::{DEFAULT_ITEM_ID_PREFIX, DEFAULT_NO_RESULT_TEXT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for typeahead.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Autocomplete behaviour.
    #[serde(default)]
    pub autocomplete: AutocompleteConfig,

    /// Where items come from.
    #[serde(default)]
    pub data: DataConfig,

    /// How rows and the input are displayed.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Autocomplete configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteConfig {
    /// Field that uniquely identifies each item.
    #[serde(default = "default_primary_key")]
    pub primary_key: String,

    /// Placeholder shown when a query matches nothing.
    #[serde(default = "default_no_result_text")]
    pub no_result_text: String,

    /// Prefix for row element ids.
    #[serde(default = "default_item_id_prefix")]
    pub item_id_prefix: String,
}

fn default_primary_key() -> String {
    "id".to_string()
}

fn default_no_result_text() -> String {
    DEFAULT_NO_RESULT_TEXT.to_string()
}

fn default_item_id_prefix() -> String {
    DEFAULT_ITEM_ID_PREFIX.to_string()
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            primary_key: default_primary_key(),
            no_result_text: default_no_result_text(),
            item_id_prefix: default_item_id_prefix(),
        }
    }
}

/// Item data configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// JSON file holding the items.
    pub path: Option<PathBuf>,

    /// JSON pointer to the item array inside the file.
    pub pointer: Option<String>,
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Placeholder shown in the empty input.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Field written into the input when a row is selected.
    pub select_field: Option<String>,

    /// Row template lines with `{field}` placeholders.
    #[serde(default)]
    pub template: Vec<String>,
}

fn default_placeholder() -> String {
    "Type to search".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            select_field: None,
            template: Vec::new(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typeahead")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| TypeaheadError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            TypeaheadError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}

/// Fully resolved settings: CLI over config file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub items_path: PathBuf,
    pub pointer: Option<String>,
    pub primary_key: String,
    pub select_field: String,
    pub no_result_text: String,
    pub item_id_prefix: String,
    pub placeholder: String,
    pub template: Vec<String>,
}

impl Settings {
    /// Merges CLI arguments over the loaded configuration.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let items_path = cli
            .items
            .clone()
            .or_else(|| config.data.path.clone())
            .ok_or_else(|| {
                TypeaheadError::config(
                    "No items file given. Pass a path, set TYPEAHEAD_ITEMS or [data].path",
                )
            })?;

        let primary_key = cli
            .primary_key
            .clone()
            .unwrap_or_else(|| config.autocomplete.primary_key.clone());

        let select_field = cli
            .select_field
            .clone()
            .or_else(|| config.display.select_field.clone())
            .unwrap_or_else(|| primary_key.clone());

        Ok(Self {
            items_path,
            pointer: cli.pointer.clone().or_else(|| config.data.pointer.clone()),
            select_field,
            no_result_text: cli
                .no_result_text
                .clone()
                .unwrap_or_else(|| config.autocomplete.no_result_text.clone()),
            item_id_prefix: cli
                .prefix
                .clone()
                .unwrap_or_else(|| config.autocomplete.item_id_prefix.clone()),
            placeholder: cli
                .placeholder
                .clone()
                .unwrap_or_else(|| config.display.placeholder.clone()),
            template: config.display.template.clone(),
            primary_key,
        })
    }
}
