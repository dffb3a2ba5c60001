//! Configuration for the Naksha application
//!
//! Loads configuration from a TOML file. Every section is optional and falls
//! back to its defaults.
//!
//! ```toml
//! [map]
//! frame_id = "map_old"
//!
//! [output]
//! format = "postcard"   # or "json"
//! path = "/tmp/map.bin" # omit for stdout
//!
//! [logging]
//! level = "info"
//! ```

use crate::error::{Error, Result};
use crate::generator::{DEFAULT_FRAME_ID, GeneratorOptions};
use crate::wire::WireFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub map: MapSection,
    pub output: OutputSection,
    pub logging: LoggingConfig,
}

/// Published map settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MapSection {
    /// Frame id stamped on the grid header
    pub frame_id: String,
}

impl Default for MapSection {
    fn default() -> Self {
        Self {
            frame_id: DEFAULT_FRAME_ID.to_string(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSection {
    /// Wire format for the grid message
    pub format: WireFormat,
    /// Output file; stdout when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// # Example
    /// ```no_run
    /// use naksha::config::AppConfig;
    ///
    /// let config = AppConfig::from_file("naksha.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Settings(e.to_string()))
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| Error::Settings(e.to_string()))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Generator options for this configuration (system clock)
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions::default().with_frame_id(self.map.frame_id.clone())
    }
}
