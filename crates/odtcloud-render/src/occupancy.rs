//! Pixel occupancy of the canvas, queried through an integral image

use image::{GrayImage, ImageBuffer, Luma};
use imageproc::integral_image::{integral_image, sum_image_pixels};
use rand::Rng;

/// Tracks which canvas pixels are covered by already placed words
#[derive(Debug, Clone)]
pub struct OccupancyMap {
    grid: GrayImage,
    integral: ImageBuffer<Luma<u32>, Vec<u32>>,
}

impl OccupancyMap {
    /// An empty map of the given size
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let grid = GrayImage::new(width, height);
        let integral = integral_image::<_, u32>(&grid);
        Self { grid, integral }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// True when the `width` x `height` box at (`x`, `y`) lies on the
    /// canvas and covers no occupied pixel
    #[must_use]
    pub fn is_free(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return true;
        }
        if x + width > self.width() || y + height > self.height() {
            return false;
        }
        sum_image_pixels(&self.integral, x, y, x + width - 1, y + height - 1)[0] == 0
    }

    /// Pick a free top-left position for a box, uniformly among all free ones
    pub fn sample_position<R: Rng>(
        &self,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Option<(u32, u32)> {
        if width > self.width() || height > self.height() {
            return None;
        }
        let free = move || {
            (0..=self.height() - height).flat_map(move |y| {
                (0..=self.width() - width)
                    .filter(move |&x| self.is_free(x, y, width, height))
                    .map(move |x| (x, y))
            })
        };

        let hits = free().count();
        if hits == 0 {
            return None;
        }
        free().nth(rng.random_range(0..hits))
    }

    /// Mark the non-zero pixels of `mask`, drawn at (`x`, `y`), as occupied
    pub fn mark(&mut self, mask: &GrayImage, x: u32, y: u32) {
        for (mx, my, pixel) in mask.enumerate_pixels() {
            let (gx, gy) = (x + mx, y + my);
            if pixel[0] > 0 && gx < self.width() && gy < self.height() {
                self.grid.put_pixel(gx, gy, Luma([255]));
            }
        }
        self.integral = integral_image::<_, u32>(&self.grid);
    }

    /// Fraction of occupied pixels
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // ratio for diagnostics
    pub fn coverage(&self) -> f32 {
        let total = u64::from(self.width()) * u64::from(self.height());
        if total == 0 {
            return 0.0;
        }
        let used = self.grid.pixels().filter(|p| p[0] > 0).count();
        used as f32 / total as f32
    }
}
