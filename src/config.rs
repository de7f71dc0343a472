use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// The shipped style table; `Config::default()` is parsed from it.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("default_config.toml");

static COMPILED_DEFAULT: OnceLock<Config> = OnceLock::new();

// Every key is present in the shipped file (checked by build.rs), so these
// are only reached while parsing user configs.
fn default_bold_tags() -> BTreeSet<String> {
    Config::compiled_default().tags.bold.clone()
}

fn default_italic_tags() -> BTreeSet<String> {
    Config::compiled_default().tags.italic.clone()
}

fn default_block_tags() -> BTreeSet<String> {
    Config::compiled_default().tags.block.clone()
}

fn default_block_display() -> BTreeSet<String> {
    Config::compiled_default().display.block.clone()
}

fn default_bold_threshold() -> u16 {
    Config::compiled_default().weight.bold_threshold
}

fn default_markers() -> Vec<String> {
    Config::compiled_default().origin.markers.clone()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tags: TagsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub weight: WeightConfig,
    #[serde(default)]
    pub origin: OriginConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::compiled_default().clone()
    }
}

/// Structural defaults keyed by tag name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsConfig {
    #[serde(default = "default_bold_tags")]
    pub bold: BTreeSet<String>,
    #[serde(default = "default_italic_tags")]
    pub italic: BTreeSet<String>,
    #[serde(default = "default_block_tags")]
    pub block: BTreeSet<String>,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Config::compiled_default().tags.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// `display` keywords that start a new paragraph.
    #[serde(default = "default_block_display")]
    pub block: BTreeSet<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Config::compiled_default().display.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightConfig {
    #[serde(default = "default_bold_threshold")]
    pub bold_threshold: u16,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Config::compiled_default().weight.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginConfig {
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Config::compiled_default().origin.clone()
    }
}

impl Config {
    /// The style table compiled in from `default_config.toml`.
    pub fn compiled_default() -> &'static Config {
        COMPILED_DEFAULT.get_or_init(|| {
            toml::from_str(DEFAULT_CONFIG_TOML)
                .expect("default_config.toml is validated by build.rs")
        })
    }

    pub fn is_bold_tag(&self, tag: &str) -> bool {
        contains_ignore_case(&self.tags.bold, tag)
    }

    pub fn is_italic_tag(&self, tag: &str) -> bool {
        contains_ignore_case(&self.tags.italic, tag)
    }

    pub fn is_block_tag(&self, tag: &str) -> bool {
        contains_ignore_case(&self.tags.block, tag)
    }

    pub fn is_block_display(&self, display: &str) -> bool {
        contains_ignore_case(&self.display.block, display)
    }

    /// Parse a (possibly partial) TOML table; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a TOML file, reporting read and parse failures.
    pub fn try_load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from a TOML file, or return defaults if it is missing or invalid.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, "falling back to default style table");
                Self::default()
            }
        }
    }
}

fn contains_ignore_case(set: &BTreeSet<String>, key: &str) -> bool {
    if set.contains(key) {
        return true;
    }
    set.iter().any(|item| item.eq_ignore_ascii_case(key))
}
