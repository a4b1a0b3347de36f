//! Font loading and glyph rasterization

use crate::error::{RenderError, Result};
use crate::layout::WordRasterizer;
use ab_glyph::{FontVec, PxScale};
use image::{GrayImage, Luma};
use imageproc::drawing::{draw_text_mut, text_size};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a font file to use when none is given
pub const FONT_ENV_VAR: &str = "ODTCLOUD_FONT";

/// Well-known locations of common sans-serif fonts
pub const FONT_SEARCH_PATHS: &[&str] = &[
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // macOS
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Geneva.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// Draws words with a TrueType/OpenType font
pub struct GlyphRasterizer {
    font: FontVec,
    path: PathBuf,
}

impl std::fmt::Debug for GlyphRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRasterizer")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl GlyphRasterizer {
    /// Load a font file
    ///
    /// # Errors
    ///
    /// I/O errors reading the file, [`RenderError::InvalidFont`] if it does
    /// not decode.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| RenderError::InvalidFont {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!("Loaded font {}", path.display());
        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    /// Use `explicit` if given, else `$ODTCLOUD_FONT`, else the first
    /// readable entry of [`FONT_SEARCH_PATHS`]
    ///
    /// # Errors
    ///
    /// Errors from [`Self::from_file`] for an explicit or environment path;
    /// [`RenderError::FontNotFound`] if no search location holds a font.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = std::env::var_os(FONT_ENV_VAR).filter(|p| !p.is_empty()) {
            return Self::from_file(PathBuf::from(path));
        }

        let candidates: Vec<PathBuf> = FONT_SEARCH_PATHS.iter().map(PathBuf::from).collect();
        for candidate in candidates.iter().filter(|p| p.is_file()) {
            match Self::from_file(candidate) {
                Ok(rasterizer) => return Ok(rasterizer),
                Err(e) => debug!("Skipping font {}: {e}", candidate.display()),
            }
        }
        Err(RenderError::FontNotFound(candidates))
    }

    /// Location the font was loaded from
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WordRasterizer for GlyphRasterizer {
    #[allow(clippy::cast_precision_loss)] // font sizes are small
    fn rasterize(&self, word: &str, font_size: u32) -> GrayImage {
        let scale = PxScale::from(font_size as f32);
        let (width, height) = text_size(scale, &self.font, word);
        let mut mask = GrayImage::new(width.max(1), height.max(1));
        draw_text_mut(&mut mask, Luma([255]), 0, 0, scale, &self.font, word);
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_explicit_missing_font_is_io_error() {
        let err = GlyphRasterizer::discover(Some(Path::new("/no/such/font.ttf"))).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn test_garbage_font_is_invalid() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), b"definitely not a font").unwrap();
        let err = GlyphRasterizer::from_file(file.path()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidFont { .. }));
    }

    #[test]
    fn test_discovered_font_draws_something() {
        let Ok(rasterizer) = GlyphRasterizer::discover(None) else {
            eprintln!("no system font available, skipping");
            return;
        };
        let mask = rasterizer.rasterize("Wg", 32);
        assert!(mask.width() > 10 && mask.height() > 10);
        assert!(mask.pixels().any(|p| p[0] > 0));

        let bigger = rasterizer.rasterize("Wg", 64);
        assert!(bigger.width() > mask.width());
    }
}
