//! Message types published for a static map.
//!
//! Field layout follows the ROS `std_msgs/Header`, `geometry_msgs/Pose` and
//! `nav_msgs/OccupancyGrid` definitions, so a bridge can copy fields one to
//! one into middleware messages.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timestamp as seconds + nanoseconds since the Unix epoch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Time {
    /// Whole seconds
    pub sec: u32,
    /// Nanoseconds within the second
    pub nsec: u32,
}

impl Time {
    /// Create a timestamp from seconds and nanoseconds
    pub fn new(sec: u32, nsec: u32) -> Self {
        Self { sec, nsec }
    }

    /// Create a timestamp from milliseconds since epoch
    pub fn from_millis(millis: u64) -> Self {
        Self {
            sec: (millis / 1000) as u32,
            nsec: ((millis % 1000) * 1_000_000) as u32,
        }
    }

    /// Create a timestamp from a duration since epoch
    pub fn from_duration(d: Duration) -> Self {
        Self {
            sec: d.as_secs() as u32,
            nsec: d.subsec_nanos(),
        }
    }

    /// Total milliseconds since epoch
    pub fn to_millis(&self) -> u64 {
        self.sec as u64 * 1000 + (self.nsec / 1_000_000) as u64
    }
}

/// Standard metadata for stamped data
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Sequence number, owned by the publisher
    pub seq: u32,
    /// Time the data refers to
    pub stamp: Time,
    /// Coordinate frame the data is expressed in
    pub frame_id: String,
}

/// Position in 3D space (meters)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Orientation as a unit quaternion
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }

    /// Pure yaw rotation about +Z (CCW positive, REP-103)
    pub fn from_yaw(yaw: f64) -> Self {
        let half = yaw * 0.5;
        Self {
            x: 0.0,
            y: 0.0,
            z: half.sin(),
            w: half.cos(),
        }
    }

    /// Yaw angle in radians, assuming a rotation about +Z only
    pub fn yaw(&self) -> f64 {
        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        siny_cosp.atan2(cosy_cosp)
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }
}

/// Position + orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point,
    pub orientation: Quaternion,
}

/// Basic information about an occupancy grid
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapMetaData {
    /// Time at which the map was loaded
    pub map_load_time: Time,
    /// Meters per cell
    pub resolution: f32,
    /// Width in cells
    pub width: u32,
    /// Height in cells
    pub height: u32,
    /// Real-world pose of cell (0,0)
    pub origin: Pose,
}

/// 2D occupancy grid message.
///
/// `data` is row-major starting at cell (0,0), the map's bottom-left corner.
/// Values are 0 (free), 100 (occupied) or -1 (unknown).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    pub header: Header,
    pub info: MapMetaData,
    pub data: Vec<i8>,
}

impl OccupancyGrid {
    /// Cell value at map coordinates (col, row), row 0 at the bottom
    pub fn cell(&self, col: u32, row: u32) -> Option<i8> {
        if col >= self.info.width || row >= self.info.height {
            return None;
        }
        let idx = row as usize * self.info.width as usize + col as usize;
        self.data.get(idx).copied()
    }
}
