//! Word cloud generation and output

use crate::error::Result;
use crate::layout::{layout_words, LayoutOptions, PlacedWord, Placement, WordRasterizer};
use image::{Rgb, RgbImage};
use log::{debug, info};
use odtcloud_text::{FrequencyOptions, StopwordSet, WordFrequencies};
use std::fs;
use std::path::Path;

/// Everything that shapes a generated cloud
#[derive(Debug, Clone, PartialEq)]
pub struct CloudOptions {
    /// Placement parameters, including the canvas size
    pub layout: LayoutOptions,
    /// Tokenization and counting parameters
    pub frequency: FrequencyOptions,
    /// Canvas background
    pub background: Rgb<u8>,
    /// Layout seed; a random one is drawn when `None`
    pub seed: Option<u64>,
}

impl Default for CloudOptions {
    #[inline]
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            frequency: FrequencyOptions::default(),
            background: Rgb([255, 255, 255]),
            seed: None,
        }
    }
}

/// Word cloud generator
#[derive(Debug)]
pub struct WordCloud<R> {
    rasterizer: R,
    options: CloudOptions,
}

impl<R: WordRasterizer> WordCloud<R> {
    /// Generator with default options
    #[inline]
    pub fn new(rasterizer: R) -> Self {
        Self::with_options(rasterizer, CloudOptions::default())
    }

    #[inline]
    pub fn with_options(rasterizer: R, options: CloudOptions) -> Self {
        Self {
            rasterizer,
            options,
        }
    }

    /// Canvas size in pixels
    #[inline]
    #[must_use]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.options.layout.width = width;
        self.options.layout.height = height;
        self
    }

    #[inline]
    #[must_use]
    pub fn background(mut self, color: Rgb<u8>) -> Self {
        self.options.background = color;
        self
    }

    #[inline]
    #[must_use]
    pub fn max_words(mut self, max_words: usize) -> Self {
        self.options.frequency.max_words = max_words;
        self
    }

    #[inline]
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self
    }

    #[inline]
    pub fn options(&self) -> &CloudOptions {
        &self.options
    }

    /// Count the words of `text` (minus `stopwords`) and render them
    ///
    /// # Errors
    ///
    /// [`crate::RenderError::NoWords`] when nothing is left to draw,
    /// [`crate::RenderError::NoSpace`] when no word fits on the canvas and
    /// [`crate::RenderError::InvalidCanvas`] for a zero-sized canvas.
    pub fn generate(&self, text: &str, stopwords: &StopwordSet) -> Result<CloudImage> {
        let frequencies = WordFrequencies::from_text(text, stopwords, &self.options.frequency);
        self.generate_from_frequencies(&frequencies)
    }

    /// Render precomputed frequencies
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    pub fn generate_from_frequencies(&self, frequencies: &WordFrequencies) -> Result<CloudImage> {
        let seed = self.options.seed.unwrap_or_else(rand::random);
        debug!("Layout seed {seed}");

        let placements = layout_words(frequencies, &self.rasterizer, &self.options.layout, seed)?;
        let image = paint(&placements, &self.options);
        Ok(CloudImage {
            image,
            words: placements.into_iter().map(|p| p.word).collect(),
        })
    }
}

/// Draw every placement onto a fresh canvas
fn paint(placements: &[Placement], options: &CloudOptions) -> RgbImage {
    let mut canvas =
        RgbImage::from_pixel(options.layout.width, options.layout.height, options.background);

    for placement in placements {
        let color = placement.word.color;
        for (mx, my, coverage) in placement.mask.enumerate_pixels() {
            let alpha = coverage[0];
            let (x, y) = (placement.word.x + mx, placement.word.y + my);
            if alpha == 0 || x >= canvas.width() || y >= canvas.height() {
                continue;
            }
            let pixel = canvas.get_pixel_mut(x, y);
            *pixel = blend(*pixel, color, alpha);
        }
    }
    canvas
}

#[allow(clippy::cast_possible_truncation)] // weighted mean of two u8 stays in u8
fn blend(base: Rgb<u8>, top: Rgb<u8>, alpha: u8) -> Rgb<u8> {
    let a = u16::from(alpha);
    let mix = |b: u8, t: u8| ((u16::from(b) * (255 - a) + u16::from(t) * a + 127) / 255) as u8;
    Rgb([
        mix(base[0], top[0]),
        mix(base[1], top[1]),
        mix(base[2], top[2]),
    ])
}

/// A rendered word cloud
#[derive(Debug, Clone)]
pub struct CloudImage {
    image: RgbImage,
    words: Vec<PlacedWord>,
}

impl CloudImage {
    #[inline]
    #[must_use]
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Words that made it onto the canvas, heaviest first
    #[inline]
    #[must_use]
    pub fn words(&self) -> &[PlacedWord] {
        &self.words
    }

    #[inline]
    #[must_use]
    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Write the image; the format follows the file extension
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// I/O errors creating directories, image errors for an unsupported
    /// extension or a failed write.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        self.image.save(path)?;
        info!(
            "Wrote {}x{} word cloud with {} words to {}",
            self.image.width(),
            self.image.height(),
            self.words.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::layout::tests::BlockRasterizer;
    use tempfile::TempDir;

    fn small_cloud() -> WordCloud<BlockRasterizer> {
        WordCloud::new(BlockRasterizer).size(160, 80).seed(17)
    }

    #[test]
    fn test_blend_extremes() {
        let white = Rgb([255, 255, 255]);
        let red = Rgb([255, 0, 0]);
        assert_eq!(blend(white, red, 0), white);
        assert_eq!(blend(white, red, 255), red);
        assert_eq!(blend(Rgb([0, 0, 0]), Rgb([255, 255, 255]), 128), Rgb([128, 128, 128]));
    }

    #[test]
    fn test_generate_paints_words_over_background() {
        let cloud = small_cloud()
            .generate("rust ferris crab rust rust ferris", &StopwordSet::new())
            .unwrap();
        assert_eq!(cloud.image().dimensions(), (160, 80));
        assert_eq!(cloud.words()[0].text, "rust");

        let background = Rgb([255, 255, 255]);
        let painted = cloud.image().pixels().filter(|p| **p != background).count();
        assert!(painted > 0);

        let first = &cloud.words()[0];
        assert_eq!(*cloud.image().get_pixel(first.x, first.y), first.color);
    }

    #[test]
    fn test_stopwords_only_text_has_no_words() {
        let err = small_cloud()
            .generate("the and of the", &StopwordSet::new())
            .unwrap_err();
        assert!(matches!(err, RenderError::NoWords));
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let text = "alpha beta gamma alpha beta alpha delta";
        let a = small_cloud().generate(text, &StopwordSet::empty()).unwrap();
        let b = small_cloud().generate(text, &StopwordSet::empty()).unwrap();
        assert_eq!(a.words(), b.words());
        assert_eq!(a.image().as_raw(), b.image().as_raw());
    }

    #[test]
    fn test_canvas_too_small_fails() {
        let err = WordCloud::new(BlockRasterizer)
            .size(3, 3)
            .seed(1)
            .generate("rust ferris crab", &StopwordSet::empty())
            .unwrap_err();
        assert!(matches!(err, RenderError::NoSpace { .. }));
    }

    #[test]
    fn test_background_applied() {
        let cloud = small_cloud()
            .background(Rgb([0, 0, 0]))
            .generate("x", &StopwordSet::empty())
            .unwrap();
        assert_eq!(*cloud.image().get_pixel(159, 79), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_max_words_limits_output() {
        let cloud = small_cloud()
            .max_words(2)
            .generate("a b c d e f", &StopwordSet::empty())
            .unwrap();
        assert!(cloud.words().len() <= 2);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out").join("cloud.png");
        let cloud = small_cloud().generate("hello world", &StopwordSet::empty()).unwrap();
        cloud.save(&path).unwrap();

        let reloaded = image::open(&path).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (160, 80));
    }

    #[test]
    fn test_save_unknown_extension_fails() {
        let dir = TempDir::new().unwrap();
        let cloud = small_cloud().generate("hello", &StopwordSet::empty()).unwrap();
        let err = cloud.save(dir.path().join("cloud.notanimage")).unwrap_err();
        assert!(matches!(err, RenderError::Image(_)));
    }
}
