//! Configuration file support (`.odtcloud.toml`)
//!
//! Configuration files can be placed in:
//! - User home directory: ~/.odtcloud.toml (user defaults)
//! - Project directory: ./.odtcloud.toml (project defaults)
//! - Custom location via --config flag (replaces both)
//!
//! Precedence order (highest to lowest):
//! 1. Command-line arguments
//! 2. Project config (./.odtcloud.toml)
//! 3. User config (~/.odtcloud.toml)
//! 4. Built-in defaults
//!
//! Stopword lists are the exception: every layer adds to the set.

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the home and working directories
pub const CONFIG_FILE_NAME: &str = ".odtcloud.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Canvas and layout settings
    pub cloud: CloudConfig,
    /// Stopword filtering settings
    pub filter: FilterConfig,
    /// Output settings
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct CloudConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Color name or #rrggbb
    pub background: Option<String>,
    pub max_words: Option<usize>,
    pub seed: Option<u64>,
    /// TrueType/OpenType font file
    pub font: Option<PathBuf>,
    pub margin: Option<u32>,
    pub prefer_horizontal: Option<f32>,
    pub min_font_size: Option<u32>,
    pub max_font_size: Option<u32>,
    pub relative_scaling: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Run the stopword filter before rendering
    pub enabled: Option<bool>,
    /// Extra stopwords
    pub stopwords: Vec<String>,
    /// Skip page header/footer paragraphs
    pub body_only: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output image path
    pub path: Option<PathBuf>,
    /// Open the image after writing it
    pub display: Option<bool>,
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load the explicit file if given, else merge the discovered ones
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Using config file {}", path.display());
            return Self::load_from_file(path);
        }
        let user = dirs::home_dir().and_then(|home| Self::load_optional(&home.join(CONFIG_FILE_NAME)));
        let project = Self::load_optional(Path::new(CONFIG_FILE_NAME));
        Ok(Self::merge(user, project))
    }

    /// Load a discovered config; a broken file is reported and skipped
    fn load_optional(path: &Path) -> Option<Self> {
        if !path.is_file() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => {
                debug!("Loaded config {}", path.display());
                Some(config)
            }
            Err(e) => {
                warn!("Ignoring config {}: {e:#}", path.display());
                None
            }
        }
    }

    /// Merge configs; `project` values win over `user` values
    pub fn merge(user: Option<Self>, project: Option<Self>) -> Self {
        match (user, project) {
            (None, None) => Self::default(),
            (Some(only), None) | (None, Some(only)) => only,
            (Some(user), Some(project)) => user.overridden_by(project),
        }
    }

    fn overridden_by(self, other: Self) -> Self {
        let mut stopwords = self.filter.stopwords;
        stopwords.extend(other.filter.stopwords);

        Self {
            cloud: CloudConfig {
                width: other.cloud.width.or(self.cloud.width),
                height: other.cloud.height.or(self.cloud.height),
                background: other.cloud.background.or(self.cloud.background),
                max_words: other.cloud.max_words.or(self.cloud.max_words),
                seed: other.cloud.seed.or(self.cloud.seed),
                font: other.cloud.font.or(self.cloud.font),
                margin: other.cloud.margin.or(self.cloud.margin),
                prefer_horizontal: other.cloud.prefer_horizontal.or(self.cloud.prefer_horizontal),
                min_font_size: other.cloud.min_font_size.or(self.cloud.min_font_size),
                max_font_size: other.cloud.max_font_size.or(self.cloud.max_font_size),
                relative_scaling: other.cloud.relative_scaling.or(self.cloud.relative_scaling),
            },
            filter: FilterConfig {
                enabled: other.filter.enabled.or(self.filter.enabled),
                stopwords,
                body_only: other.filter.body_only.or(self.filter.body_only),
            },
            output: OutputConfig {
                path: other.output.path.or(self.output.path),
                display: other.output.display.or(self.output.display),
            },
        }
    }
}
