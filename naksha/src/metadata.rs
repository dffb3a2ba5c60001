//! Map metadata from YAML file (ROS map_server format)
//!
//! ```yaml
//! image: office.pgm
//! resolution: 0.05
//! origin: [-10.0, -10.0, 0.0]
//! free_thresh: 0.196
//! occupied_thresh: 0.65
//! ```
//!
//! `resolution`, `origin`, `free_thresh` and `occupied_thresh` are required.
//! `image` is only needed when loading by path. Unknown keys (`negate`,
//! `mode`, ...) are ignored.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Planar pose (meters, radians)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }
}

/// Brightness thresholds, both in [0, 1].
///
/// Pixels at or below `free` become occupied and pixels at or above
/// `occupied` become free. The names come from the metadata keys; darker
/// pixels are obstacles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// `free_thresh` key
    pub free: f64,
    /// `occupied_thresh` key
    pub occupied: f64,
}

/// Document shape as written on disk; every key is optional here so that a
/// missing key can be reported by name.
#[derive(Debug, Deserialize)]
struct RawMetadata {
    image: Option<String>,
    resolution: Option<f32>,
    origin: Option<Vec<f64>>,
    free_thresh: Option<f64>,
    occupied_thresh: Option<f64>,
}

/// Parsed map metadata, immutable after construction
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapMetadata {
    /// Image filename relative to the YAML file, if given
    pub image: Option<String>,

    /// Map resolution in meters per pixel
    pub resolution: f32,

    /// Map-frame pose of the bottom-left pixel
    pub origin: Pose2D,

    /// Brightness at or below which a pixel is occupied
    pub free_thresh: f64,

    /// Brightness at or above which a pixel is free
    pub occupied_thresh: f64,
}

impl MapMetadata {
    /// Parse metadata from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let raw: RawMetadata =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Parse metadata from a byte stream, read to completion
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let raw: RawMetadata =
            serde_yaml::from_reader(reader).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Load metadata from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    fn from_raw(raw: RawMetadata) -> Result<Self, ConfigError> {
        // Checked in document order so the first missing key is reported
        let resolution = raw.resolution.ok_or(ConfigError::MissingKey("resolution"))?;
        let origin = raw.origin.ok_or(ConfigError::MissingKey("origin"))?;
        let free_thresh = raw.free_thresh.ok_or(ConfigError::MissingKey("free_thresh"))?;
        let occupied_thresh = raw
            .occupied_thresh
            .ok_or(ConfigError::MissingKey("occupied_thresh"))?;

        let &[x, y, theta] = origin.as_slice() else {
            return Err(ConfigError::InvalidOrigin(origin.len()));
        };

        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(ConfigError::InvalidResolution(resolution));
        }

        if free_thresh > occupied_thresh {
            log::warn!(
                "free_thresh {} > occupied_thresh {}: brightness in between classifies as occupied",
                free_thresh,
                occupied_thresh
            );
        }

        log::debug!(
            "Parsed map metadata: resolution={} origin=({}, {}, {}) thresholds=({}, {})",
            resolution,
            x,
            y,
            theta,
            free_thresh,
            occupied_thresh
        );

        Ok(Self {
            image: raw.image,
            resolution,
            origin: Pose2D::new(x, y, theta),
            free_thresh,
            occupied_thresh,
        })
    }

    /// Classification thresholds
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            free: self.free_thresh,
            occupied: self.occupied_thresh,
        }
    }

    /// Map-frame coordinates of a cell centre.
    ///
    /// `row` counts from the bottom of the map. Origin yaw is not applied.
    pub fn cell_to_world(&self, col: u32, row: u32) -> (f64, f64) {
        let res = self.resolution as f64;
        let x = self.origin.x + (col as f64 + 0.5) * res;
        let y = self.origin.y + (row as f64 + 0.5) * res;
        (x, y)
    }
}
