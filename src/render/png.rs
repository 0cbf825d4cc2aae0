//! PNG output for magnifier tiles and swatches.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::{PipetteError, Result};
use crate::types::Colour;

/// Write an RGBA image to a PNG file.
///
/// # Arguments
///
/// * `img` - The image to write
/// * `path` - Output file path
pub fn write_png(img: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PipetteError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    img.save(path).map_err(|e| PipetteError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}

/// A solid square filled with `colour`, used as a colour preview.
pub fn swatch(colour: Colour, size: u32) -> RgbaImage {
    let size = size.max(1);
    RgbaImage::from_pixel(size, size, Rgba(colour.to_rgba()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_png_round_trip() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));

        let dir = tempdir().unwrap();
        let path = dir.path().join("tile.png");

        write_png(&img, &path).unwrap();

        let read = image::open(&path).unwrap().to_rgba8();
        assert_eq!(read.dimensions(), (2, 2));
        assert_eq!(read.get_pixel(1, 0).0, [255, 255, 255, 255]);
        assert_eq!(read.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_write_png_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/tile.png");

        write_png(&swatch(Colour::WHITE, 3), &path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_swatch() {
        let img = swatch(Colour::rgb(255, 0, 0), 0);
        assert_eq!(img.dimensions(), (1, 1));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }
}
