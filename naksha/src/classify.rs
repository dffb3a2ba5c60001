//! Brightness to occupancy classification.
//!
//! ## Coordinate flip
//!
//! Image rows grow downwards, map rows grow upwards (REP-103). Output cell
//! `(c, r)` samples image pixel `(c, height - 1 - r)`:
//!
//! ```text
//!   image            map data
//!   row 0   ┌───┐    r = h-1
//!   row 1   │   │    r = h-2
//!    ...    │   │     ...
//!   row h-1 └───┘    r = 0   <- data[0..w]
//! ```
//!
//! ## Thresholds
//!
//! First match wins:
//!
//! | Test | Value |
//! |------|-------|
//! | `brightness <= free_thresh` | 100 (occupied) |
//! | `brightness >= occupied_thresh` | 0 (free) |
//! | otherwise | -1 (unknown) |
//!
//! Dark pixels are obstacles even though the test reads `free_thresh`.

use crate::metadata::Thresholds;
use crate::raster::{BrightnessSampler, SampleError};
use serde::{Deserialize, Serialize};

/// Occupancy grid cell value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum CellValue {
    /// Traversable
    Free = 0,
    /// Obstacle
    Occupied = 100,
    /// Neither threshold reached
    Unknown = -1,
}

impl CellValue {
    /// Wire value
    #[inline]
    pub fn as_i8(self) -> i8 {
        self as i8
    }

    /// Parse a wire value
    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            0 => Some(CellValue::Free),
            100 => Some(CellValue::Occupied),
            -1 => Some(CellValue::Unknown),
            _ => None,
        }
    }
}

/// Classify one brightness sample
#[inline]
pub fn classify_brightness(brightness: f32, thresholds: Thresholds) -> CellValue {
    let b = brightness as f64;
    if b <= thresholds.free {
        CellValue::Occupied
    } else if b >= thresholds.occupied {
        CellValue::Free
    } else {
        CellValue::Unknown
    }
}

/// Walk the whole image and produce row-major map data, bottom row first
pub fn classify<S>(sampler: &S, thresholds: Thresholds) -> Result<Vec<i8>, SampleError>
where
    S: BrightnessSampler + ?Sized,
{
    let width = sampler.width();
    let height = sampler.height();
    let mut data = Vec::with_capacity(width as usize * height as usize);

    for r in 0..height {
        let row = height - 1 - r;
        for c in 0..width {
            let brightness = sampler.brightness_at(c, row)?;
            data.push(classify_brightness(brightness, thresholds).as_i8());
        }
    }

    Ok(data)
}

/// Cell counts by value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    /// Cells with value 0
    pub free: usize,
    /// Cells with value 100
    pub occupied: usize,
    /// Cells with value -1 (or anything else)
    pub unknown: usize,
}

impl CellCounts {
    /// Count cells in map data
    pub fn from_data(data: &[i8]) -> Self {
        let mut counts = Self::default();
        for &v in data {
            match CellValue::from_i8(v) {
                Some(CellValue::Free) => counts.free += 1,
                Some(CellValue::Occupied) => counts.occupied += 1,
                _ => counts.unknown += 1,
            }
        }
        counts
    }

    /// Total known cells
    pub fn known(&self) -> usize {
        self.free + self.occupied
    }

    /// Total cells
    pub fn total(&self) -> usize {
        self.known() + self.unknown
    }
}
