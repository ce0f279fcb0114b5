//! Pixel access for image classification.
//!
//! The classifier never parses image files. Anything that can report its
//! size and an `(r, g, b)` triple per pixel implements [`PixelSource`].

use crate::error::{GaussBayesError, Result};
use serde::{Deserialize, Serialize};

/// Read-only pixel access.
pub trait PixelSource: Sync {
    /// Number of rows.
    fn height(&self) -> usize;

    /// Number of columns.
    fn width(&self) -> usize;

    /// Color at `(row, col)`. Grayscale sources replicate the intensity
    /// across all three channels.
    fn rgb(&self, row: usize, col: usize) -> [u8; 3];
}

/// In-memory RGB raster.
///
/// # Examples
///
/// ```
/// use gaussbayes::classifier::{PixelSource, RgbImage};
///
/// let img = RgbImage::from_intensity(2, 1, vec![10, 200]).expect("2 pixels");
/// assert_eq!(img.rgb(0, 1), [200, 200, 200]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl RgbImage {
    /// Creates an image from row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(GaussBayesError::DimensionMismatch {
                expected: format!("{width}x{height}={} pixels", width * height),
                actual: format!("{} pixels", pixels.len()),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a grayscale image; each intensity fills all three channels.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `values.len() != width * height`.
    pub fn from_intensity(width: usize, height: usize, values: Vec<u8>) -> Result<Self> {
        Self::new(width, height, values.into_iter().map(|v| [v, v, v]).collect())
    }

    /// Sets one pixel.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, rgb: [u8; 3]) {
        self.pixels[row * self.width + col] = rgb;
    }
}

impl PixelSource for RgbImage {
    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }

    fn rgb(&self, row: usize, col: usize) -> [u8; 3] {
        self.pixels[row * self.width + col]
    }
}

/// Binary foreground/background decision per pixel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForegroundMask {
    width: usize,
    height: usize,
    foreground: Vec<bool>,
}

impl ForegroundMask {
    pub(crate) fn from_rows(width: usize, rows: Vec<Vec<bool>>) -> Self {
        let height = rows.len();
        Self {
            width,
            height,
            foreground: rows.into_iter().flatten().collect(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Decision at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[must_use]
    pub fn is_foreground(&self, row: usize, col: usize) -> bool {
        self.foreground[row * self.width + col]
    }

    /// Number of foreground pixels.
    #[must_use]
    pub fn foreground_count(&self) -> usize {
        self.foreground.iter().filter(|&&f| f).count()
    }

    /// Renders the mask as a black/white image (foreground white).
    #[must_use]
    pub fn to_image(&self) -> RgbImage {
        RgbImage {
            width: self.width,
            height: self.height,
            pixels: self
                .foreground
                .iter()
                .map(|&f| if f { [255; 3] } else { [0; 3] })
                .collect(),
        }
    }
}
