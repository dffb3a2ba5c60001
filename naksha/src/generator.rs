//! Occupancy grid generation from a YAML + image map pair.
//!
//! A generator parses and decodes everything at construction, then serves
//! three independent reads:
//!
//! - [`OccupancyGridGenerator::fill_header`]: frame id + current time
//! - [`OccupancyGridGenerator::fill_information`]: load time, origin pose,
//!   size and resolution
//! - [`OccupancyGridGenerator::generate_data`]: the pixel walk, one byte per
//!   cell, recomputed on every call
//!
//! ```rust,ignore
//! use naksha::{GeneratorOptions, OccupancyGridGenerator, YamlMapGenerator};
//!
//! let generator = YamlMapGenerator::load("maps/office.yaml", GeneratorOptions::default())?;
//! let grid = generator.build_grid()?;
//! println!("{}x{} cells", grid.info.width, grid.info.height);
//! ```

use crate::classify::classify;
use crate::clock::{Clock, SystemClock};
use crate::error::{ConfigError, GenerationError, Result};
use crate::messages::{Header, MapMetaData, OccupancyGrid, Point, Pose, Quaternion};
use crate::metadata::MapMetadata;
use crate::raster::{BrightnessSampler, RasterImage};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Frame id stamped on headers unless configured otherwise
pub const DEFAULT_FRAME_ID: &str = "map_old";

const GENERATE_DATA_CONTEXT: &str = "YAML map generator generate_data error";

/// Producer of occupancy grid message parts
pub trait OccupancyGridGenerator {
    /// Set frame id and stamp
    fn fill_header(&self, header: &mut Header);

    /// Set load time, origin, size and resolution
    fn fill_information(&self, info: &mut MapMetaData);

    /// Serialized cell data, one byte per cell
    fn generate_data(&self) -> std::result::Result<Vec<u8>, GenerationError>;

    /// Assemble a complete message
    fn build_grid(&self) -> std::result::Result<OccupancyGrid, GenerationError> {
        let mut grid = OccupancyGrid::default();
        self.fill_header(&mut grid.header);
        self.fill_information(&mut grid.info);
        grid.data = self
            .generate_data()?
            .into_iter()
            .map(|b| b as i8)
            .collect();
        Ok(grid)
    }
}

/// Construction options
#[derive(Clone, Debug)]
pub struct GeneratorOptions {
    /// Frame id for headers
    pub frame_id: String,
    /// Time source for stamps
    pub clock: Arc<dyn Clock>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            frame_id: DEFAULT_FRAME_ID.to_string(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl GeneratorOptions {
    /// Use a different frame id
    pub fn with_frame_id(mut self, frame_id: impl Into<String>) -> Self {
        self.frame_id = frame_id.into();
        self
    }

    /// Use a different time source
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}

/// Occupancy grid generator for a static map.
///
/// All state is written once at construction, so a generator can be shared
/// between threads and queried concurrently.
#[derive(Debug)]
pub struct YamlMapGenerator<S = RasterImage> {
    metadata: MapMetadata,
    raster: S,
    frame_id: String,
    clock: Arc<dyn Clock>,
}

impl YamlMapGenerator<RasterImage> {
    /// Build from a metadata YAML stream and an image stream.
    ///
    /// Both streams are read to completion before returning.
    pub fn new<M: Read, I: Read>(
        metadata_yaml: M,
        image_data: I,
        options: GeneratorOptions,
    ) -> Result<Self> {
        let metadata = MapMetadata::from_reader(metadata_yaml)?;
        let raster = RasterImage::from_reader(image_data)?;
        Ok(Self::from_parts(metadata, raster, options))
    }

    /// Load a map from its YAML file.
    ///
    /// The `image` key is resolved relative to the YAML file's directory.
    pub fn load<P: AsRef<Path>>(yaml_path: P, options: GeneratorOptions) -> Result<Self> {
        let yaml_path = yaml_path.as_ref();
        let metadata = MapMetadata::from_file(yaml_path)?;

        let image = metadata
            .image
            .as_deref()
            .ok_or(ConfigError::MissingKey("image"))?;
        let yaml_dir = yaml_path.parent().unwrap_or(Path::new("."));
        let image_path = yaml_dir.join(image);

        log::info!(
            "Loading map {} (image {})",
            yaml_path.display(),
            image_path.display()
        );
        let raster = RasterImage::from_path(&image_path)?;

        Ok(Self::from_parts(metadata, raster, options))
    }
}

impl<S: BrightnessSampler> YamlMapGenerator<S> {
    /// Build from already parsed metadata and any brightness source
    pub fn from_parts(metadata: MapMetadata, raster: S, options: GeneratorOptions) -> Self {
        log::info!(
            "Map ready: {}x{} cells @ {} m/cell, frame '{}'",
            raster.width(),
            raster.height(),
            metadata.resolution,
            options.frame_id
        );
        Self {
            metadata,
            raster,
            frame_id: options.frame_id,
            clock: options.clock,
        }
    }

    /// Parsed metadata
    pub fn metadata(&self) -> &MapMetadata {
        &self.metadata
    }

    /// Decoded image
    pub fn raster(&self) -> &S {
        &self.raster
    }

    /// Map width in cells
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Map height in cells
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Frame id stamped on headers
    pub fn frame_id(&self) -> &str {
        &self.frame_id
    }
}

impl<S: BrightnessSampler> OccupancyGridGenerator for YamlMapGenerator<S> {
    fn fill_header(&self, header: &mut Header) {
        header.frame_id.clone_from(&self.frame_id);
        header.stamp = self.clock.now();
    }

    fn fill_information(&self, info: &mut MapMetaData) {
        let origin = self.metadata.origin;
        info.map_load_time = self.clock.now();
        info.origin = Pose {
            position: Point {
                x: origin.x,
                y: origin.y,
                z: 0.0,
            },
            orientation: Quaternion::from_yaw(origin.theta),
        };
        info.width = self.width();
        info.height = self.height();
        info.resolution = self.metadata.resolution;
    }

    fn generate_data(&self) -> std::result::Result<Vec<u8>, GenerationError> {
        let cells = classify(&self.raster, self.metadata.thresholds())
            .map_err(|e| GenerationError::new(GENERATE_DATA_CONTEXT, e))?;

        log::trace!("Generated {} cells", cells.len());
        Ok(cells.into_iter().map(|v| v as u8).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::messages::Time;
    use crate::metadata::Pose2D;
    use crate::raster::{BrightnessGrid, SampleError};
    use std::error::Error as _;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn metadata(free: f64, occupied: f64) -> MapMetadata {
        MapMetadata {
            image: None,
            resolution: 0.05,
            origin: Pose2D::new(0.0, 0.0, 0.0),
            free_thresh: free,
            occupied_thresh: occupied,
        }
    }

    fn options() -> GeneratorOptions {
        GeneratorOptions::default().with_clock(FixedClock::from_millis(1_700_000_000_123))
    }

    /// Sampler that reports a size larger than its data
    struct TruncatedSampler;

    impl BrightnessSampler for TruncatedSampler {
        fn width(&self) -> u32 {
            4
        }
        fn height(&self) -> u32 {
            4
        }
        fn brightness_at(&self, col: u32, row: u32) -> std::result::Result<f32, SampleError> {
            Err(SampleError {
                col,
                row,
                width: 0,
                height: 0,
            })
        }
    }

    #[test]
    fn test_header_uses_frame_and_clock() {
        let raster = BrightnessGrid::filled(2, 2, 1.0).unwrap();
        let generator = YamlMapGenerator::from_parts(
            metadata(0.25, 0.75),
            raster,
            options().with_frame_id("map_static"),
        );

        let mut header = Header::default();
        generator.fill_header(&mut header);
        assert_eq!(header.frame_id, "map_static");
        assert_eq!(header.stamp, Time::new(1_700_000_000, 123_000_000));
    }

    #[test]
    fn test_default_frame_id() {
        let raster = BrightnessGrid::filled(1, 1, 1.0).unwrap();
        let generator = YamlMapGenerator::from_parts(metadata(0.25, 0.75), raster, options());
        assert_eq!(generator.frame_id(), DEFAULT_FRAME_ID);

        let mut header = Header::default();
        generator.fill_header(&mut header);
        assert_eq!(header.frame_id, "map_old");
    }

    /// Clock that moves one second forward on every read
    #[derive(Debug, Default)]
    struct SteppingClock {
        ticks: AtomicU32,
    }

    impl Clock for SteppingClock {
        fn now(&self) -> Time {
            Time::new(self.ticks.fetch_add(1, Ordering::SeqCst), 0)
        }
    }

    #[test]
    fn test_stamps_read_clock_on_every_call() {
        let raster = BrightnessGrid::filled(2, 2, 1.0).unwrap();
        let generator = YamlMapGenerator::from_parts(
            metadata(0.25, 0.75),
            raster,
            GeneratorOptions::default().with_clock(SteppingClock::default()),
        );

        let mut first = Header::default();
        let mut second = Header::default();
        generator.fill_header(&mut first);
        generator.fill_header(&mut second);
        assert!(second.stamp > first.stamp);

        let mut info_a = MapMetaData::default();
        let mut info_b = MapMetaData::default();
        generator.fill_information(&mut info_a);
        generator.fill_information(&mut info_b);
        assert!(info_a.map_load_time > second.stamp);
        assert!(info_b.map_load_time > info_a.map_load_time);
    }

    #[test]
    fn test_information_from_metadata() {
        let mut meta = metadata(0.25, 0.75);
        meta.origin = Pose2D::new(1.5, -2.0, 1.5708);
        let raster = BrightnessGrid::filled(3, 2, 1.0).unwrap();
        let generator = YamlMapGenerator::from_parts(meta, raster, options());

        let mut info = MapMetaData::default();
        generator.fill_information(&mut info);

        assert_eq!(info.width, 3);
        assert_eq!(info.height, 2);
        assert_eq!(info.resolution, 0.05);
        assert_eq!(info.origin.position.x, 1.5);
        assert_eq!(info.origin.position.y, -2.0);
        assert_eq!(info.origin.position.z, 0.0);

        let q = info.origin.orientation;
        let half = std::f64::consts::FRAC_1_SQRT_2;
        assert_eq!((q.x, q.y), (0.0, 0.0));
        assert!((q.z - half).abs() < 1e-4);
        assert!((q.w - half).abs() < 1e-4);
        assert_eq!(info.map_load_time, Time::new(1_700_000_000, 123_000_000));
    }

    #[test]
    fn test_generate_data_is_repeatable() {
        let values: Vec<f32> = (0..12).map(|i| (i % 5) as f32 / 4.0).collect();
        let raster = BrightnessGrid::new(4, 3, values).unwrap();
        let generator = YamlMapGenerator::from_parts(metadata(0.25, 0.75), raster, options());

        let first = generator.generate_data().unwrap();
        let second = generator.generate_data().unwrap();
        assert_eq!(first.len(), 12);
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_data_byte_encoding() {
        let raster = BrightnessGrid::from_rows(&[[0.0, 0.5, 1.0]]).unwrap();
        let generator = YamlMapGenerator::from_parts(metadata(0.25, 0.75), raster, options());
        assert_eq!(generator.generate_data().unwrap(), vec![100u8, 0xFF, 0]);
    }

    #[test]
    fn test_generation_error_wraps_cause() {
        let generator =
            YamlMapGenerator::from_parts(metadata(0.25, 0.75), TruncatedSampler, options());

        let err = generator.generate_data().unwrap_err();
        assert_eq!(err.message(), GENERATE_DATA_CONTEXT);
        let cause = err.source().unwrap();
        assert!(cause.downcast_ref::<SampleError>().is_some());
    }

    #[test]
    fn test_build_grid_assembles_all_parts() {
        let raster = BrightnessGrid::from_rows(&[[1.0, 1.0], [0.0, 0.0]]).unwrap();
        let generator = YamlMapGenerator::from_parts(metadata(0.2, 0.8), raster, options());

        let grid = generator.build_grid().unwrap();
        assert_eq!(grid.header.frame_id, "map_old");
        assert_eq!(grid.info.width, 2);
        assert_eq!(grid.data, vec![100, 100, 0, 0]);
    }

    #[test]
    fn test_generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<YamlMapGenerator>();
        assert_send_sync::<YamlMapGenerator<BrightnessGrid>>();
    }
}
