//! Annotation configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[derive(Serialize, Deserialize)]` generates the code that reads and
//! writes these structs as TOML. `#[serde(default)]` falls back to
//! `Default::default()` for missing fields, so a config file only needs to
//! mention what it changes.
//!
//! ```toml
//! [render]
//! format = "ansi"
//!
//! [categories.pos]
//! active = ["NOUN", "VERB"]
//!
//! [categories.cases]
//! names = ["Nominativ", "Dativ"]
//!
//! [colors]
//! NOUN = "#aaffaa"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::colors::{is_hex_color, ColorTable};
use crate::registry::Category;
use crate::selection::Selection;

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub render: RenderConfig,

    /// Which keys to highlight, per category
    pub categories: CategoriesConfig,

    /// Color overrides by key
    pub colors: HashMap<String, String>,

    /// Token source settings
    pub tokens: TokensConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default config: {e}");
                Self::default()
            }
        }
    }

    /// Loads and validates config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from the default config path.
    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("satzify").join("config.toml"))
    }

    /// Saves the config to a file, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Checks values serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, color) in &self.colors {
            if !is_hex_color(color) {
                return Err(ConfigError::InvalidColor {
                    key: key.clone(),
                    color: color.clone(),
                });
            }
        }
        Ok(())
    }

    /// The active keys this config describes.
    ///
    /// Unknown keys and names are ignored with a warning.
    pub fn selection(&self) -> Selection {
        let mut selection = Selection::all();
        for category in Category::ALL {
            let settings = self.categories.get(category);
            if settings.active.is_none() && settings.names.is_none() {
                continue;
            }

            let mut keys: Vec<String> = settings.active.clone().unwrap_or_default();
            if let Some(names) = &settings.names {
                let by_name = category.names_to_keys(names.as_slice());
                if by_name.len() < names.len() {
                    tracing::warn!(%category, ?names, "some names are not in the registry");
                }
                keys.extend(by_name.into_iter().map(str::to_string));
            }
            selection.set_keys(category, keys);
        }
        selection
    }

    /// Registry colors with this config's overrides applied.
    pub fn color_table(&self) -> ColorTable {
        ColorTable::with_overrides(&self.colors)
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output format
    pub format: OutputFormat,

    /// Plain text that splits the output into groups
    pub separator: String,

    /// Language the analysis must have been made for
    pub language: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            separator: crate::DEFAULT_SEPARATOR.to_string(),
            language: crate::LANGUAGE.to_string(),
        }
    }
}

/// How segments are written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Text only, no highlighting
    Plain,
    /// `[text](label)` markers
    #[default]
    Markup,
    /// Terminal background colors
    Ansi,
    /// Segments as JSON
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Plain,
        OutputFormat::Markup,
        OutputFormat::Ansi,
        OutputFormat::Json,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Markup => "markup",
            OutputFormat::Ansi => "ansi",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownFormat(s.to_string()))
    }
}

/// Selections of every category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoriesConfig {
    pub pos: CategorySelection,
    pub cases: CategorySelection,
}

impl CategoriesConfig {
    pub fn get(&self, category: Category) -> &CategorySelection {
        match category {
            Category::Pos => &self.pos,
            Category::Cases => &self.cases,
        }
    }
}

/// The active keys of one category. Both unset means every key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySelection {
    /// Raw keys, e.g. `NOUN`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<Vec<String>>,

    /// Display names, e.g. `Noun`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
}

/// Token source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokensConfig {
    /// How many analysed texts to keep cached
    pub cache_capacity: usize,
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self { cache_capacity: 64 }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("Invalid color {color:?} for key {key}: expected hex like #afa or #aaffaa")]
    InvalidColor { key: String, color: String },

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
