//! Wire format serialization for published messages
//!
//! Messages are written as length-prefixed frames:
//!
//! ```text
//! ┌──────────────────┬──────────────────────────┐
//! │ Length (4 bytes) │ Payload (variable)       │
//! │ Big-endian u32   │ JSON or Postcard binary  │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! - **Maximum message size**: 16 MiB, enough for a 4000x4000 map in postcard
//! - **JSON** (default): human-readable, for debugging and cross-language clients
//! - **Postcard**: compact binary, one byte per grid cell plus varint headers

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Largest payload accepted by [`read_frame`] and [`write_frame`]
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Supported wire formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// Binary format using postcard - fast and compact
    Postcard,
    /// JSON format - human-readable for debugging
    #[default]
    Json,
}

impl std::fmt::Display for WireFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireFormat::Postcard => write!(f, "postcard"),
            WireFormat::Json => write!(f, "json"),
        }
    }
}

/// Serializer for one wire format
#[derive(Clone, Debug)]
pub struct Serializer {
    format: WireFormat,
}

impl Serializer {
    /// Create a new serializer for the given format
    pub fn new(format: WireFormat) -> Self {
        Self { format }
    }

    /// Configured format
    pub fn format(&self) -> WireFormat {
        self.format
    }

    /// Serialize a message to bytes
    pub fn serialize<T: Serialize>(&self, msg: &T) -> Result<Vec<u8>> {
        match self.format {
            WireFormat::Postcard => {
                postcard::to_allocvec(msg).map_err(|e| Error::Serialization(e.to_string()))
            }
            WireFormat::Json => {
                serde_json::to_vec(msg).map_err(|e| Error::Serialization(e.to_string()))
            }
        }
    }

    /// Deserialize bytes to a message
    pub fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        match self.format {
            WireFormat::Postcard => {
                postcard::from_bytes(bytes).map_err(|e| Error::Serialization(e.to_string()))
            }
            WireFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| Error::Serialization(e.to_string()))
            }
        }
    }

    /// Serialize a message and write it as one frame
    pub fn write_message<T: Serialize, W: Write>(&self, writer: &mut W, msg: &T) -> Result<usize> {
        let payload = self.serialize(msg)?;
        write_frame(writer, &payload)?;
        Ok(payload.len() + 4)
    }

    /// Read one frame and deserialize it
    pub fn read_message<T: DeserializeOwned, R: Read>(&self, reader: &mut R) -> Result<T> {
        let payload = read_frame(reader)?;
        self.deserialize(&payload)
    }
}

/// Create a serializer for the given wire format
pub fn create_serializer(format: WireFormat) -> Serializer {
    Serializer::new(format)
}

/// Write a length prefix followed by the payload
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    if payload.len() > MAX_MESSAGE_SIZE {
        return Err(Error::InvalidFrame(format!(
            "payload of {} bytes exceeds {} byte limit",
            payload.len(),
            MAX_MESSAGE_SIZE
        )));
    }
    writer.write_all(&(payload.len() as u32).to_be_bytes())?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Read one length-prefixed payload
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_be_bytes(len_buf) as usize;

    if len > MAX_MESSAGE_SIZE {
        return Err(Error::InvalidFrame(format!(
            "declared length {} exceeds {} byte limit",
            len, MAX_MESSAGE_SIZE
        )));
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload)?;
    Ok(payload)
}
