//! Error types for Naksha
//!
//! Failures are split by the stage that raises them:
//!
//! | Stage | Error | Raised by |
//! |-------|-------|-----------|
//! | Metadata parse | [`ConfigError`] | construction |
//! | Image decode | [`DecodeError`] | construction |
//! | Pixel walk | [`GenerationError`] | `generate_data` only |
//!
//! All of them convert into the crate-level [`Error`].

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Naksha error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Map metadata missing or malformed
    #[error("Map metadata error: {0}")]
    Config(#[from] ConfigError),

    /// Map image could not be decoded
    #[error("Map image error: {0}")]
    Decode(#[from] DecodeError),

    /// Occupancy data generation failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Application configuration (TOML) error
    #[error("Invalid configuration: {0}")]
    Settings(String),

    /// Message encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Malformed or oversized length-prefixed frame
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),
}

/// Map metadata error type
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Metadata file could not be read
    Io(String),
    /// Malformed YAML or a value of the wrong type
    Parse(String),
    /// Required attribute absent
    MissingKey(&'static str),
    /// `origin` does not hold exactly `[x, y, theta]`
    InvalidOrigin(usize),
    /// `resolution` is not a positive finite number
    InvalidResolution(f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MissingKey(key) => {
                write!(f, "YAML parameter file missing required attribute: '{}'", key)
            }
            ConfigError::InvalidOrigin(len) => write!(
                f,
                "'origin' must be a sequence of 3 numbers [x, y, theta], got {} entries",
                len
            ),
            ConfigError::InvalidResolution(res) => {
                write!(f, "'resolution' must be positive, got {}", res)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Map image decode errors
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Image stream could not be read
    #[error("Failed to read map image: {0}")]
    Io(#[from] std::io::Error),

    /// Image data is not a supported raster
    #[error("Failed to decode map image: {0}")]
    Image(#[from] image::ImageError),

    /// Decoded image has no pixels
    #[error("Map image is empty ({width}x{height})")]
    Empty {
        /// Decoded width
        width: u32,
        /// Decoded height
        height: u32,
    },

    /// Sample count does not match the declared dimensions
    #[error("Expected {expected} brightness samples, got {actual}")]
    DimensionMismatch {
        /// `width * height`
        expected: usize,
        /// Samples supplied
        actual: usize,
    },
}

/// Failure while walking pixels in `generate_data`.
///
/// Carries a descriptive message plus the root cause, reachable through
/// [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[error("{message}: {source}")]
pub struct GenerationError {
    message: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl GenerationError {
    /// Wrap `source` with a descriptive message
    pub fn new<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Descriptive message, without the cause
    pub fn message(&self) -> &str {
        &self.message
    }
}
