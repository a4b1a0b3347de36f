//! Word-frequency cloud rendering for odtcloud
//!
//! Turns text into a raster image where each word is drawn at a size that
//! reflects how often it occurs.
//!
//! ## Usage
//!
//! ```no_run
//! use odtcloud_render::{parse_color, GlyphRasterizer, WordCloud};
//! use odtcloud_text::StopwordSet;
//!
//! let rasterizer = GlyphRasterizer::discover(None)?;
//! let cloud = WordCloud::new(rasterizer)
//!     .size(800, 400)
//!     .background(parse_color("white")?)
//!     .generate("the quick brown fox jumps over the lazy dog", &StopwordSet::new())?;
//! cloud.save("outputs/wordcloud.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Implementation Notes
//!
//! - Glyphs are rasterized with `ab_glyph` through `imageproc`
//! - Free space is tracked with an integral image so each candidate
//!   position is checked in constant time
//! - Word colors are sampled from the viridis colormap

pub mod cloud;
pub mod color;
pub mod error;
pub mod font;
pub mod layout;
pub mod occupancy;

pub use cloud::{CloudImage, CloudOptions, WordCloud};
pub use color::{parse_color, viridis};
pub use error::{RenderError, Result};
pub use font::{GlyphRasterizer, FONT_ENV_VAR, FONT_SEARCH_PATHS};
pub use layout::{layout_words, LayoutOptions, Orientation, PlacedWord, Placement, WordRasterizer};
pub use occupancy::OccupancyMap;
