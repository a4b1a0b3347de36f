//! Greedy word placement
//!
//! Words are placed heaviest first. Each word's font size follows the
//! previous one scaled by the relative weight change; a word that does not
//! fit is tried in the other orientation once, then shrunk step by step.
//! Layout stops at the first word that no longer fits at the minimum size.

use crate::color::viridis;
use crate::error::{RenderError, Result};
use crate::occupancy::OccupancyMap;
use image::{imageops, GrayImage, Rgb};
use log::debug;
use odtcloud_text::WordFrequencies;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces the coverage mask of a word
///
/// Implemented by [`crate::font::GlyphRasterizer`]; tests use simple
/// block shapes.
pub trait WordRasterizer {
    /// Grayscale coverage of `word` drawn horizontally at `font_size` pixels
    fn rasterize(&self, word: &str, font_size: u32) -> GrayImage;
}

impl<R: WordRasterizer + ?Sized> WordRasterizer for &R {
    fn rasterize(&self, word: &str, font_size: u32) -> GrayImage {
        (**self).rasterize(word, font_size)
    }
}

/// Direction a word is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Left to right
    Horizontal,
    /// Bottom to top (rotated 90 degrees counter-clockwise)
    Vertical,
}

impl Orientation {
    #[inline]
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Placement parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Free space kept around each word
    pub margin: u32,
    /// Probability of drawing a word horizontally
    pub prefer_horizontal: f32,
    /// Smallest font size drawn
    pub min_font_size: u32,
    /// Largest font size; derived from the top two words when `None`
    pub max_font_size: Option<u32>,
    /// Shrink step when a word does not fit
    pub font_step: u32,
    /// How strongly weight differences change font size (0 = rank only)
    pub relative_scaling: f32,
}

impl Default for LayoutOptions {
    #[inline]
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            margin: 2,
            prefer_horizontal: 0.9,
            min_font_size: 4,
            max_font_size: None,
            font_step: 1,
            relative_scaling: 0.5,
        }
    }
}

/// A word positioned on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    /// Displayed text
    pub text: String,
    /// Normalized weight (1.0 for the most frequent word)
    pub weight: f32,
    /// Font size in pixels
    pub font_size: u32,
    /// Column of the mask's top-left corner
    pub x: u32,
    /// Row of the mask's top-left corner
    pub y: u32,
    /// Drawing direction
    pub orientation: Orientation,
    /// Fill color
    pub color: Rgb<u8>,
}

/// A placed word together with its oriented coverage mask
#[derive(Debug, Clone)]
pub struct Placement {
    pub word: PlacedWord,
    pub mask: GrayImage,
}

impl Placement {
    /// Canvas rectangle covered by the mask: (x, y, width, height)
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> (u32, u32, u32, u32) {
        (self.word.x, self.word.y, self.mask.width(), self.mask.height())
    }
}

/// Lay out `frequencies` on a canvas
///
/// The same `seed` always yields the same layout.
///
/// # Errors
///
/// [`RenderError::NoWords`] if `frequencies` is empty,
/// [`RenderError::InvalidCanvas`] for a zero-sized canvas and
/// [`RenderError::NoSpace`] when not a single word fits.
pub fn layout_words<R: WordRasterizer + ?Sized>(
    frequencies: &WordFrequencies,
    rasterizer: &R,
    options: &LayoutOptions,
    seed: u64,
) -> Result<Vec<Placement>> {
    if options.width == 0 || options.height == 0 {
        return Err(RenderError::InvalidCanvas {
            width: options.width,
            height: options.height,
        });
    }
    let entries = frequencies.as_slice();
    if entries.is_empty() {
        return Err(RenderError::NoWords);
    }

    let max_font_size = match options.max_font_size {
        Some(size) => size,
        None if entries.len() == 1 => options.height,
        None => {
            let probe = place(&entries[..2], rasterizer, options, options.height, seed);
            match probe.as_slice() {
                [a, b] => {
                    let (s0, s1) = (u64::from(a.word.font_size), u64::from(b.word.font_size));
                    u32::try_from(2 * s0 * s1 / (s0 + s1)).unwrap_or(options.height)
                }
                [a] => a.word.font_size,
                _ => return Err(no_space(options)),
            }
        }
    };
    debug!("Laying out {} words, max font size {max_font_size}", entries.len());

    let placements = place(entries, rasterizer, options, max_font_size, seed);
    if placements.is_empty() {
        return Err(no_space(options));
    }
    debug!("Placed {} of {} words", placements.len(), entries.len());
    Ok(placements)
}

const fn no_space(options: &LayoutOptions) -> RenderError {
    RenderError::NoSpace {
        width: options.width,
        height: options.height,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)] // font sizes are small positive integers
fn place<R: WordRasterizer + ?Sized>(
    entries: &[(String, f32)],
    rasterizer: &R,
    options: &LayoutOptions,
    max_font_size: u32,
    seed: u64,
) -> Vec<Placement> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut occupancy = OccupancyMap::new(options.width, options.height);
    let mut placements = Vec::with_capacity(entries.len());

    let rs = options.relative_scaling;
    let mut font_size = max_font_size;
    let mut last_weight = 1.0_f32;

    for (word, weight) in entries {
        let weight = *weight;
        if weight <= 0.0 {
            continue;
        }
        if rs != 0.0 {
            font_size = ((rs * (weight / last_weight) + (1.0 - rs)) * font_size as f32).round() as u32;
        }

        let mut orientation = if rng.random::<f32>() < options.prefer_horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let mut tried_other_orientation = false;

        let found = loop {
            if font_size < options.min_font_size.max(1) {
                break None;
            }
            let mask = oriented(rasterizer.rasterize(word, font_size), orientation);
            let position = occupancy.sample_position(
                mask.width() + options.margin,
                mask.height() + options.margin,
                &mut rng,
            );
            if let Some((x, y)) = position {
                break Some((x, y, mask));
            }
            if !tried_other_orientation && options.prefer_horizontal < 1.0 {
                orientation = orientation.flipped();
                tried_other_orientation = true;
            } else {
                font_size = font_size.saturating_sub(options.font_step.max(1));
                orientation = Orientation::Horizontal;
            }
        };

        let Some((x, y, mask)) = found else {
            debug!("'{word}' does not fit at the minimum font size, stopping");
            break;
        };
        let (x, y) = (x + options.margin / 2, y + options.margin / 2);
        occupancy.mark(&mask, x, y);

        placements.push(Placement {
            word: PlacedWord {
                text: word.clone(),
                weight,
                font_size,
                x,
                y,
                orientation,
                color: viridis(rng.random::<f32>()),
            },
            mask,
        });
        last_weight = weight;
    }

    debug!("Canvas coverage {:.1}%", occupancy.coverage() * 100.0);
    placements
}

fn oriented(mask: GrayImage, orientation: Orientation) -> GrayImage {
    match orientation {
        Orientation::Horizontal => mask,
        Orientation::Vertical => imageops::rotate270(&mask),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::Luma;

    /// Solid rectangle half as wide per character as the font size
    pub(crate) struct BlockRasterizer;

    impl WordRasterizer for BlockRasterizer {
        fn rasterize(&self, word: &str, font_size: u32) -> GrayImage {
            let chars = u32::try_from(word.chars().count()).unwrap_or(u32::MAX);
            let width = (chars * font_size / 2).max(1);
            GrayImage::from_pixel(width, font_size.max(1), Luma([255]))
        }
    }

    fn freqs(counts: &[(&str, usize)]) -> WordFrequencies {
        WordFrequencies::from_counts(
            counts.iter().map(|(w, c)| ((*w).to_string(), *c)).collect(),
            200,
        )
    }

    fn overlaps(a: &Placement, b: &Placement) -> bool {
        let (ax, ay, aw, ah) = a.bounds();
        let (bx, by, bw, bh) = b.bounds();
        ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah
    }

    #[test]
    fn test_empty_frequencies_error() {
        let result = layout_words(
            &WordFrequencies::default(),
            &BlockRasterizer,
            &LayoutOptions::default(),
            0,
        );
        assert!(matches!(result, Err(RenderError::NoWords)));
    }

    #[test]
    fn test_zero_canvas_error() {
        let options = LayoutOptions {
            width: 0,
            ..LayoutOptions::default()
        };
        let result = layout_words(&freqs(&[("a", 1)]), &BlockRasterizer, &options, 0);
        assert!(matches!(result, Err(RenderError::InvalidCanvas { .. })));
    }

    #[test]
    fn test_single_word_sized_to_fit() {
        let options = LayoutOptions {
            width: 200,
            height: 100,
            prefer_horizontal: 1.0,
            ..LayoutOptions::default()
        };
        let placed = layout_words(&freqs(&[("hello", 3)]), &BlockRasterizer, &options, 42).unwrap();
        assert_eq!(placed.len(), 1);
        let word = &placed[0].word;
        // 5 chars at size s are 2.5*s wide; the margin must fit too
        assert!(word.font_size * 5 / 2 + options.margin <= options.width);
        assert!(word.font_size + options.margin <= options.height);
        assert!(word.font_size >= 70, "got {}", word.font_size);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let f = freqs(&[("alpha", 9), ("beta", 7), ("gamma", 4), ("delta", 2), ("eps", 1)]);
        let options = LayoutOptions {
            width: 160,
            height: 80,
            ..LayoutOptions::default()
        };
        let a = layout_words(&f, &BlockRasterizer, &options, 99).unwrap();
        let b = layout_words(&f, &BlockRasterizer, &options, 99).unwrap();
        let words_a: Vec<_> = a.iter().map(|p| p.word.clone()).collect();
        let words_b: Vec<_> = b.iter().map(|p| p.word.clone()).collect();
        assert_eq!(words_a, words_b);
    }

    #[test]
    fn test_words_never_overlap_and_stay_on_canvas() {
        let f = freqs(&[
            ("one", 20),
            ("two", 15),
            ("three", 11),
            ("four", 8),
            ("five", 6),
            ("six", 5),
            ("seven", 3),
            ("eight", 2),
            ("nine", 1),
        ]);
        let options = LayoutOptions {
            width: 200,
            height: 120,
            ..LayoutOptions::default()
        };
        let placed = layout_words(&f, &BlockRasterizer, &options, 5).unwrap();
        assert!(!placed.is_empty());

        for (i, a) in placed.iter().enumerate() {
            let (x, y, w, h) = a.bounds();
            assert!(x + w <= options.width && y + h <= options.height);
            for b in &placed[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {}", a.word.text, b.word.text);
            }
        }
    }

    #[test]
    fn test_font_sizes_never_grow() {
        let f = freqs(&[("aa", 10), ("bb", 10), ("cc", 6), ("dd", 3), ("ee", 1)]);
        let options = LayoutOptions {
            width: 300,
            height: 150,
            ..LayoutOptions::default()
        };
        let placed = layout_words(&f, &BlockRasterizer, &options, 11).unwrap();
        for pair in placed.windows(2) {
            assert!(pair[0].word.font_size >= pair[1].word.font_size);
        }
    }

    #[test]
    fn test_vertical_masks_are_rotated() {
        let options = LayoutOptions {
            width: 60,
            height: 200,
            prefer_horizontal: 0.0,
            max_font_size: Some(20),
            ..LayoutOptions::default()
        };
        let placed = layout_words(&freqs(&[("vertical", 1)]), &BlockRasterizer, &options, 3).unwrap();
        let p = &placed[0];
        assert_eq!(p.word.orientation, Orientation::Vertical);
        assert!(p.mask.height() > p.mask.width());
    }

    #[test]
    fn test_layout_stops_when_canvas_full() {
        let options = LayoutOptions {
            width: 20,
            height: 10,
            margin: 0,
            min_font_size: 10,
            max_font_size: Some(10),
            relative_scaling: 0.0,
            prefer_horizontal: 1.0,
            ..LayoutOptions::default()
        };
        // each word is a 20x10 block: only the first fits
        let placed =
            layout_words(&freqs(&[("abcd", 3), ("efgh", 2), ("ijkl", 1)]), &BlockRasterizer, &options, 1)
                .unwrap();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].word.text, "abcd");
    }

    #[test]
    fn test_tiny_canvas_has_no_space() {
        let options = LayoutOptions {
            width: 4,
            height: 4,
            ..LayoutOptions::default()
        };
        let result = layout_words(&freqs(&[("alpha", 2), ("beta", 1)]), &BlockRasterizer, &options, 0);
        assert!(matches!(
            result,
            Err(RenderError::NoSpace {
                width: 4,
                height: 4
            })
        ));
    }

    #[test]
    fn test_fixed_max_size_with_no_fit_has_no_space() {
        let options = LayoutOptions {
            width: 10,
            height: 10,
            margin: 0,
            min_font_size: 8,
            max_font_size: Some(8),
            ..LayoutOptions::default()
        };
        // "toolong" is 28 pixels wide at size 8 and never fits 10 pixels
        let result = layout_words(&freqs(&[("toolong", 1)]), &BlockRasterizer, &options, 0);
        assert!(matches!(result, Err(RenderError::NoSpace { .. })));
    }
}
