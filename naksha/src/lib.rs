//! # Naksha
//!
//! Translates a static map (ROS map_server YAML metadata + grayscale image)
//! into an occupancy grid message.
//!
//! ## Pipeline
//!
//! ```text
//! map.yaml ──► MapMetadata ─┐
//!                           ├─► YamlMapGenerator ──► Header / MapMetaData / data
//! map.pgm ───► RasterImage ─┘
//! ```
//!
//! Parsing and decoding happen once at construction. Header and info fills
//! are cheap; [`OccupancyGridGenerator::generate_data`] walks every pixel.
//!
//! ## Cell values
//!
//! | Brightness | Cell |
//! |------------|------|
//! | `<= free_thresh` | 100 (occupied) |
//! | `>= occupied_thresh` | 0 (free) |
//! | otherwise | -1 (unknown) |
//!
//! ## Coordinate System
//!
//! Uses ROS REP-103 convention: cell (0,0) is the bottom-left pixel of the
//! image, rows grow upwards, origin theta is CCW yaw in radians.

pub mod classify;
pub mod clock;
pub mod config;
pub mod error;
pub mod generator;
pub mod messages;
pub mod metadata;
pub mod raster;
pub mod wire;

// Re-export commonly used types
pub use classify::{CellCounts, CellValue, classify, classify_brightness};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::{ConfigError, DecodeError, Error, GenerationError, Result};
pub use generator::{DEFAULT_FRAME_ID, GeneratorOptions, OccupancyGridGenerator, YamlMapGenerator};
pub use messages::{Header, MapMetaData, OccupancyGrid, Point, Pose, Quaternion, Time};
pub use metadata::{MapMetadata, Pose2D, Thresholds};
pub use raster::{BrightnessGrid, BrightnessSampler, RasterImage, SampleError};
pub use wire::{Serializer, WireFormat, create_serializer};
