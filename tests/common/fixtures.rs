//! Synthetic scan images written to a temporary directory.

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const WHITE: [u8; 4] = [255, 255, 255, 255];
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Temporary directory of generated images, removed on drop
pub struct ImageDir {
    dir: TempDir,
}

impl ImageDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// White page with full-height black bars at the given x ranges
    pub fn columns(&self, name: &str, width: u32, height: u32, bars: &[(u32, u32)]) -> PathBuf {
        let mut img = RgbaImage::from_pixel(width, height, Rgba(WHITE));
        for &(start, end) in bars {
            for y in 0..height {
                for x in start..end.min(width) {
                    img.put_pixel(x, y, Rgba(BLACK));
                }
            }
        }
        self.save(name, &img)
    }

    pub fn solid(&self, name: &str, width: u32, height: u32, rgba: [u8; 4]) -> PathBuf {
        self.save(name, &RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    /// A file with an image extension but garbage contents
    pub fn corrupt(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, b"not an image").expect("Failed to write corrupt file");
        path
    }

    fn save(&self, name: &str, img: &RgbaImage) -> PathBuf {
        let path = self.dir.path().join(name);
        img.save(&path).expect("Failed to write fixture image");
        path
    }
}

impl Default for ImageDir {
    fn default() -> Self {
        Self::new()
    }
}
