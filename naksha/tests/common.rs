//! Test utilities for map loading.
//!
//! Builds small PGM images and matching YAML documents on the fly.

#![allow(dead_code)]

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use naksha::{FixedClock, GeneratorOptions};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Stamp used by every test generator (2023-11-14T22:13:20Z)
pub const TEST_MILLIS: u64 = 1_700_000_000_000;

/// Metadata with the usual map_server thresholds
pub const STANDARD_YAML: &str = "\
image: map.pgm
resolution: 0.05
origin: [0.0, 0.0, 0.0]
negate: 0
free_thresh: 0.2
occupied_thresh: 0.8
";

/// Generator options with a pinned clock
pub fn test_options() -> GeneratorOptions {
    GeneratorOptions::default().with_clock(FixedClock::from_millis(TEST_MILLIS))
}

/// Build a grayscale image from rows of 8-bit values (first row on top).
pub fn gray_rows(rows: &[&[u8]]) -> GrayImage {
    let height = rows.len() as u32;
    let width = rows[0].len() as u32;
    GrayImage::from_fn(width, height, |x, y| Luma([rows[y as usize][x as usize]]))
}

/// Encode an image as binary PGM.
pub fn pgm_bytes(img: &GrayImage) -> Vec<u8> {
    encode(img, ImageFormat::Pnm)
}

/// Encode an image as PNG.
pub fn png_bytes(img: &GrayImage) -> Vec<u8> {
    encode(img, ImageFormat::Png)
}

fn encode(img: &GrayImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img.clone())
        .write_to(&mut out, format)
        .unwrap();
    out.into_inner()
}

/// Write `<name>.yaml` and the image it references into `dir`.
///
/// Returns the YAML path.
pub fn write_map(dir: &Path, yaml: &str, image_name: &str, image_bytes: &[u8]) -> PathBuf {
    std::fs::write(dir.join(image_name), image_bytes).unwrap();
    let yaml_path = dir.join("map.yaml");
    std::fs::write(&yaml_path, yaml).unwrap();
    yaml_path
}

/// Standard metadata with one required key removed.
pub fn yaml_without(key: &str) -> String {
    STANDARD_YAML
        .lines()
        .filter(|line| !line.starts_with(&format!("{}:", key)))
        .map(|line| format!("{}\n", line))
        .collect()
}
