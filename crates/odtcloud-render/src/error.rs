//! Error types for cloud rendering

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while laying out or writing a word cloud
#[derive(Error, Debug)]
pub enum RenderError {
    /// Nothing left to draw after tokenizing and filtering
    #[error("need at least 1 word to plot a word cloud, got 0")]
    NoWords,

    /// Not even the first word fits on the canvas at the minimum font size
    #[error("couldn't find space to draw; the canvas may be too small ({width}x{height})")]
    NoSpace {
        /// Canvas width in pixels
        width: u32,
        /// Canvas height in pixels
        height: u32,
    },

    /// Canvas with a zero dimension
    #[error("canvas must be at least 1x1, got {width}x{height}")]
    InvalidCanvas {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// Color string that is neither a known name nor hex
    #[error("invalid color '{0}' (expected a color name or #rrggbb)")]
    InvalidColor(String),

    /// No font at any searched location
    #[error("no usable font found; searched {}. Pass a font path explicitly", display_paths(.0))]
    FontNotFound(Vec<PathBuf>),

    /// Font file that could not be decoded
    #[error("invalid font {}: {reason}", path.display())]
    InvalidFont {
        /// Font file location
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// Image encoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no locations".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_not_found_lists_locations() {
        let err = RenderError::FontNotFound(vec![
            PathBuf::from("/fonts/a.ttf"),
            PathBuf::from("/fonts/b.ttf"),
        ]);
        let message = err.to_string();
        assert!(message.contains("/fonts/a.ttf, /fonts/b.ttf"), "{message}");
        assert!(RenderError::FontNotFound(Vec::new())
            .to_string()
            .contains("no locations"));
    }

    #[test]
    fn test_no_space_names_canvas() {
        let err = RenderError::NoSpace {
            width: 3,
            height: 3,
        };
        assert!(err.to_string().contains("couldn't find space to draw"));
        assert!(err.to_string().contains("3x3"));
    }
}
