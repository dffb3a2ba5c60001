//! Map image decoding.
//!
//! Classification only needs per-pixel brightness, so the decoder sits
//! behind [`BrightnessSampler`]. [`RasterImage`] decodes PGM/PNM and PNG
//! through the `image` crate; [`BrightnessGrid`] holds brightness values
//! directly and is handy for synthetic maps.
//!
//! Brightness is the HSV value channel: `max(R, G, B) / 255`. Hue,
//! saturation and alpha do not take part.

use crate::error::DecodeError;
use image::{DynamicImage, GrayImage, Luma};
use std::io::Read;
use std::path::Path;

/// Pixel lookup outside the image bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("pixel ({col}, {row}) outside {width}x{height} image")]
pub struct SampleError {
    pub col: u32,
    pub row: u32,
    pub width: u32,
    pub height: u32,
}

/// Brightness-sampleable 2D image.
///
/// Rows count from the top of the image (image convention).
pub trait BrightnessSampler {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Brightness in [0, 1] of the pixel at (col, row)
    fn brightness_at(&self, col: u32, row: u32) -> Result<f32, SampleError>;

    /// Bounds check shared by implementations
    fn check_bounds(&self, col: u32, row: u32) -> Result<(), SampleError> {
        if col < self.width() && row < self.height() {
            Ok(())
        } else {
            Err(SampleError {
                col,
                row,
                width: self.width(),
                height: self.height(),
            })
        }
    }
}

/// Decoded map image, reduced to its value channel
#[derive(Clone, Debug)]
pub struct RasterImage {
    values: GrayImage,
}

impl RasterImage {
    /// Decode an image from a byte stream, read to completion.
    ///
    /// The format is detected from the data.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, DecodeError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Decode an in-memory image
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let img = image::load_from_memory(bytes)?;
        Self::from_dynamic(img)
    }

    /// Decode an image file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        let img = image::open(path)?;
        Self::from_dynamic(img)
    }

    /// Wrap an already decoded image
    pub fn from_dynamic(img: DynamicImage) -> Result<Self, DecodeError> {
        let (width, height) = (img.width(), img.height());
        if width == 0 || height == 0 {
            return Err(DecodeError::Empty { width, height });
        }

        let values = match img {
            DynamicImage::ImageLuma8(gray) => gray,
            other => {
                let rgb = other.into_rgb8();
                GrayImage::from_fn(width, height, |x, y| {
                    let [r, g, b] = rgb.get_pixel(x, y).0;
                    Luma([r.max(g).max(b)])
                })
            }
        };

        log::debug!("Decoded map image {}x{}", width, height);
        Ok(Self { values })
    }

    /// Raw 8-bit value channel at (col, row)
    pub fn value_at(&self, col: u32, row: u32) -> Option<u8> {
        self.values.get_pixel_checked(col, row).map(|p| p.0[0])
    }
}

impl BrightnessSampler for RasterImage {
    fn width(&self) -> u32 {
        self.values.width()
    }

    fn height(&self) -> u32 {
        self.values.height()
    }

    fn brightness_at(&self, col: u32, row: u32) -> Result<f32, SampleError> {
        self.check_bounds(col, row)?;
        let v = self.values.get_pixel(col, row).0[0];
        Ok(v as f32 / 255.0)
    }
}

/// Row-major brightness values held in memory
#[derive(Clone, Debug, PartialEq)]
pub struct BrightnessGrid {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl BrightnessGrid {
    /// Create a grid from row-major values (row 0 at the top)
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::Empty { width, height });
        }
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(DecodeError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Create a grid from rows (first row at the top)
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self, DecodeError> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.as_ref().len()) as u32;
        let values: Vec<f32> = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().copied())
            .collect();

        // Ragged rows show up as a length mismatch
        Self::new(width, height, values)
    }

    /// Grid where every pixel has the same brightness
    pub fn filled(width: u32, height: u32, brightness: f32) -> Result<Self, DecodeError> {
        Self::new(
            width,
            height,
            vec![brightness; width as usize * height as usize],
        )
    }
}

impl BrightnessSampler for BrightnessGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn brightness_at(&self, col: u32, row: u32) -> Result<f32, SampleError> {
        self.check_bounds(col, row)?;
        Ok(self.values[row as usize * self.width as usize + col as usize])
    }
}
