#![allow(clippy::struct_excessive_bools)] // clap flags

//! odtcloud - word cloud images from OpenDocument text files
//!
//! Reads every paragraph of an ODT document, removes stopwords and renders
//! the remaining words as a PNG word cloud.

mod config;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use config::Config;
use log::{debug, info, warn};
use odtcloud_opendocument::OdtReader;
use odtcloud_render::{GlyphRasterizer, WordCloud};
use odtcloud_text::filter_text;
use settings::{Overrides, Settings};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "odtcloud")]
#[command(author, version, about = "Generate a word cloud image from an ODT file", long_about = None)]
struct Args {
    /// Path to the ODT file
    #[arg(short, long, alias = "input_file", value_name = "PATH")]
    input_file: PathBuf,

    /// Output image path [default: outputs/wordcloud.png]
    #[arg(short, long, alias = "output_file", value_name = "PATH")]
    output_file: Option<PathBuf>,

    /// Additional stopwords to remove (case-insensitive)
    #[arg(short, long, value_name = "WORD", num_args = 1..)]
    stopwords: Vec<String>,

    /// Skip the stopword filter pass; the renderer still ignores stopwords
    /// when counting words
    #[arg(long)]
    no_filter: bool,

    /// Skip page header and footer paragraphs
    #[arg(long)]
    body_only: bool,

    /// Image width in pixels [default: 800]
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels [default: 400]
    #[arg(long)]
    height: Option<u32>,

    /// Background color name or #rrggbb [default: white]
    #[arg(long, value_name = "COLOR")]
    background: Option<String>,

    /// Maximum number of words drawn [default: 200]
    #[arg(long)]
    max_words: Option<usize>,

    /// Layout seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// TrueType/OpenType font file (default: $ODTCLOUD_FONT or a system font)
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Do not open the image after writing it
    #[arg(long)]
    no_display: bool,

    /// Config file to use instead of ~/.odtcloud.toml and ./.odtcloud.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            output: self.output_file.clone(),
            stopwords: self.stopwords.clone(),
            no_filter: self.no_filter,
            body_only: self.body_only,
            width: self.width,
            height: self.height,
            background: self.background.clone(),
            max_words: self.max_words,
            seed: self.seed,
            font: self.font.clone(),
            no_display: self.no_display,
        }
    }
}

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if output should be shown (not quiet)
    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Default log filter; `RUST_LOG` takes precedence
    const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(verbosity.log_filter()))
        .target(env_logger::Target::Stderr)
        .init();

    let config = Config::load(args.config.as_deref())?;
    let settings = Settings::resolve(args.overrides(), config)?;
    debug!("Resolved settings: {settings:?}");

    run(&args.input_file, &settings, verbosity)
}

fn run(input: &Path, settings: &Settings, verbosity: Verbosity) -> Result<()> {
    let document = OdtReader::new()
        .scope(settings.scope)
        .parse_file(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    info!(
        "Read {} paragraphs from {} (title: {}, author: {})",
        document.paragraph_count(),
        input.display(),
        document.title.as_deref().unwrap_or("-"),
        document.author.as_deref().unwrap_or("-"),
    );
    let text = document.text();

    let text = if settings.filter {
        let filtered = filter_text(&text, &settings.stopwords);
        debug!(
            "Stopword filter kept {} of {} tokens",
            filtered.split_whitespace().count(),
            text.split_whitespace().count()
        );
        filtered
    } else {
        text
    };
    let stopwords = settings.renderer_stopwords();

    let rasterizer = GlyphRasterizer::discover(settings.font.as_deref())
        .context("Failed to load a font (use --font or set ODTCLOUD_FONT)")?;
    info!("Using font {}", rasterizer.path().display());

    let cloud = WordCloud::with_options(rasterizer, settings.cloud.clone())
        .generate(&text, &stopwords)
        .with_context(|| format!("Failed to render word cloud for {}", input.display()))?;
    cloud
        .save(&settings.output)
        .with_context(|| format!("Failed to write {}", settings.output.display()))?;

    if verbosity.should_show_output() {
        println!(
            "{} Saved word cloud ({} words) to {}",
            "✓".green().bold(),
            cloud.words().len(),
            settings.output.display()
        );
    }

    if settings.display {
        if let Err(e) = open::that(&settings.output) {
            warn!("Could not open {}: {e}", settings.output.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_legacy_underscore_flags() {
        let args =
            Args::try_parse_from(["odtcloud", "--input_file", "a.odt", "--output_file", "b.png"])
                .unwrap();
        assert_eq!(args.input_file, PathBuf::from("a.odt"));
        assert_eq!(args.output_file, Some(PathBuf::from("b.png")));
    }

    #[test]
    fn test_multiple_stopwords() {
        let args =
            Args::try_parse_from(["odtcloud", "-i", "a.odt", "-s", "lorem", "ipsum", "--no-display"])
                .unwrap();
        assert_eq!(args.stopwords, vec!["lorem", "ipsum"]);
        assert!(args.no_display);
    }

    #[test]
    fn test_input_required() {
        assert!(Args::try_parse_from(["odtcloud"]).is_err());
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false).log_filter(), "warn");
        assert!(Args::try_parse_from(["odtcloud", "-i", "a", "-v", "-q"]).is_err());
    }
}
