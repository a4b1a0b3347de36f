//! Effective run settings: command line over config files over defaults

use crate::config::Config;
use anyhow::{bail, Context, Result};
use image::Rgb;
use odtcloud_opendocument::ParagraphScope;
use odtcloud_render::{parse_color, CloudOptions};
use odtcloud_text::StopwordSet;
use std::path::PathBuf;

/// Output location used when neither the command line nor a config names one
pub const DEFAULT_OUTPUT: &str = "outputs/wordcloud.png";

/// Settings given on the command line; `None` defers to config
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub stopwords: Vec<String>,
    pub no_filter: bool,
    pub body_only: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub background: Option<String>,
    pub max_words: Option<usize>,
    pub seed: Option<u64>,
    pub font: Option<PathBuf>,
    pub no_display: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output: PathBuf,
    /// Custom stopwords, config entries first
    pub stopwords: Vec<String>,
    pub filter: bool,
    pub scope: ParagraphScope,
    pub font: Option<PathBuf>,
    pub display: bool,
    pub cloud: CloudOptions,
}

impl Settings {
    /// Combine the layers and validate the result
    ///
    /// The background color is parsed here so a bad value fails before the
    /// document is read.
    pub fn resolve(overrides: Overrides, config: Config) -> Result<Self> {
        let mut cloud = CloudOptions::default();
        let layout = &mut cloud.layout;

        layout.width = overrides.width.or(config.cloud.width).unwrap_or(layout.width);
        layout.height = overrides.height.or(config.cloud.height).unwrap_or(layout.height);
        if layout.width == 0 || layout.height == 0 {
            bail!(
                "canvas must be at least 1x1, got {}x{}",
                layout.width,
                layout.height
            );
        }
        layout.margin = config.cloud.margin.unwrap_or(layout.margin);
        layout.min_font_size = config.cloud.min_font_size.unwrap_or(layout.min_font_size);
        layout.max_font_size = config.cloud.max_font_size.or(layout.max_font_size);
        layout.prefer_horizontal = unit_interval(
            "prefer_horizontal",
            config.cloud.prefer_horizontal.unwrap_or(layout.prefer_horizontal),
        )?;
        layout.relative_scaling = unit_interval(
            "relative_scaling",
            config.cloud.relative_scaling.unwrap_or(layout.relative_scaling),
        )?;

        cloud.frequency.max_words = overrides
            .max_words
            .or(config.cloud.max_words)
            .unwrap_or(cloud.frequency.max_words);
        cloud.seed = overrides.seed.or(config.cloud.seed);
        cloud.background = match overrides.background.or(config.cloud.background) {
            Some(name) => parse_color(&name).context("Invalid background")?,
            None => Rgb([255, 255, 255]),
        };

        let mut stopwords = config.filter.stopwords;
        stopwords.extend(overrides.stopwords);

        let body_only = overrides.body_only || config.filter.body_only.unwrap_or(false);

        Ok(Self {
            output: overrides
                .output
                .or(config.output.path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            stopwords,
            filter: !overrides.no_filter && config.filter.enabled.unwrap_or(true),
            scope: if body_only {
                ParagraphScope::Body
            } else {
                ParagraphScope::All
            },
            font: overrides.font.or(config.cloud.font),
            display: !overrides.no_display && config.output.display.unwrap_or(true),
            cloud,
        })
    }

    /// Stopwords the renderer drops while counting words
    ///
    /// The default list plus custom words, whether or not the text filter
    /// ran first.
    pub fn renderer_stopwords(&self) -> StopwordSet {
        StopwordSet::new().with_words(&self.stopwords)
    }
}

fn unit_interval(name: &str, value: f32) -> Result<f32> {
    if !(0.0..=1.0).contains(&value) {
        bail!("{name} must be between 0 and 1, got {value}");
    }
    Ok(value)
}
