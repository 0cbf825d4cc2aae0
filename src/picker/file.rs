//! Image-sample flow over a local file.
//!
//! A local image is decoded, scaled to fit the viewport minus fixed margins,
//! and sampled under the pointer.

use std::path::Path;

use image::DynamicImage;

use crate::config::FitMargins;
use crate::error::{PipetteError, Result};
use crate::render::{CoordinateMapper, PixelBuffer};
use crate::types::{Point, Rect, SampledColour, Size};

/// A decoded image rasterized to fit the viewport.
#[derive(Debug, Clone)]
pub struct ImagePicker {
    buffer: PixelBuffer,
    source_size: Size,
}

impl ImagePicker {
    /// Decode an image file and fit it into `viewport`.
    pub fn open(path: &Path, viewport: Size, margins: FitMargins) -> Result<Self> {
        let image = image::open(path).map_err(|e| PipetteError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        log::debug!(
            "decoded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );

        Self::from_image(&image, viewport, margins)
    }

    /// Fit an already decoded image into `viewport`.
    pub fn from_image(image: &DynamicImage, viewport: Size, margins: FitMargins) -> Result<Self> {
        let source_size = Size::new(image.width(), image.height());
        let fitted = fit_size(source_size, viewport, margins)?;
        let buffer = PixelBuffer::rasterize(image, fitted)?;

        Ok(Self {
            buffer,
            source_size,
        })
    }

    /// Size of the fitted buffer.
    pub fn size(&self) -> Size {
        self.buffer.size()
    }

    /// Size of the image as decoded.
    pub fn source_size(&self) -> Size {
        self.source_size
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Sample at `point`, relative to the buffer drawn at its own size.
    pub fn sample_at(&self, point: Point) -> Option<SampledColour> {
        self.sample_in(point, Point::default(), self.size())
    }

    /// Sample at a client position over the buffer drawn at `origin` with
    /// `displayed` on-screen size.
    ///
    /// Positions outside the drawn area produce no sample.
    pub fn sample_in(&self, client: Point, origin: Point, displayed: Size) -> Option<SampledColour> {
        let area = Rect::new(
            origin.x,
            origin.y,
            displayed.width as f64,
            displayed.height as f64,
        );
        if !area.contains(client) {
            return None;
        }
        let local = Point::new(client.x - origin.x, client.y - origin.y);

        let mapper = CoordinateMapper::new(displayed, self.size())
            .map_err(|e| log::warn!("{}", e))
            .ok()?;

        match self.buffer.sample(mapper.pixel_under(local)) {
            Ok(sample) => Some(sample),
            Err(e) => {
                log::error!("failed to read colour: {}", e);
                None
            }
        }
    }
}

/// Scale `image` to fit inside `viewport` reduced by `margins`, keeping the
/// aspect ratio. Images smaller than the area are scaled up.
pub fn fit_size(image: Size, viewport: Size, margins: FitMargins) -> Result<Size> {
    if !image.is_positive() {
        return Err(PipetteError::Image {
            message: format!("Image has no pixels ({})", image),
            help: None,
        });
    }

    let max_width = viewport.width.saturating_sub(margins.width);
    let max_height = viewport.height.saturating_sub(margins.height);
    if max_width == 0 || max_height == 0 {
        return Err(PipetteError::Image {
            message: format!(
                "Viewport {} leaves no room for the image after {}x{} margins",
                viewport, margins.width, margins.height
            ),
            help: Some("Use a larger --viewport or smaller fit_margins".to_string()),
        });
    }

    let ratio = f64::min(
        max_width as f64 / image.width as f64,
        max_height as f64 / image.height as f64,
    );

    // dim * (max / dim) can land just below max.
    let scaled = |dim: u32| ((dim as f64 * ratio + 1e-6).floor() as u32).max(1);

    Ok(Size::new(scaled(image.width), scaled(image.height)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Colour, PixelPos};
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    const NO_MARGINS: FitMargins = FitMargins {
        width: 0,
        height: 0,
    };

    fn solid_red(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn test_fit_size_limited_by_height() {
        let size = fit_size(Size::new(100, 100), Size::new(1280, 800), FitMargins::default()).unwrap();
        assert_eq!(size, Size::new(600, 600));
    }

    #[test]
    fn test_fit_size_limited_by_width() {
        let size = fit_size(Size::new(400, 100), Size::new(210, 1000), FitMargins::default()).unwrap();
        assert_eq!(size, Size::new(200, 50));
    }

    #[test]
    fn test_fit_size_exact() {
        let size = fit_size(Size::new(30, 7), Size::new(30, 7), NO_MARGINS).unwrap();
        assert_eq!(size, Size::new(30, 7));
    }

    #[test]
    fn test_fit_size_never_collapses_to_zero() {
        let size = fit_size(Size::new(10_000, 1), Size::new(100, 100), NO_MARGINS).unwrap();
        assert_eq!(size, Size::new(100, 1));
    }

    #[test]
    fn test_fit_size_rejects_viewport_swallowed_by_margins() {
        assert!(fit_size(Size::new(10, 10), Size::new(10, 800), FitMargins::default()).is_err());
        assert!(fit_size(Size::new(10, 10), Size::new(800, 150), FitMargins::default()).is_err());
    }

    #[test]
    fn test_solid_red_image_end_to_end() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("red.png");
        RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        // 1010x210 leaves exactly 1000x10 after margins: no rescale.
        let picker = ImagePicker::open(&path, Size::new(1010, 210), FitMargins::default()).unwrap();
        assert_eq!(picker.size(), Size::new(10, 10));

        let sample = picker.sample_at(picker.size().centre()).unwrap();
        assert_eq!(sample.colour, Colour::rgb(255, 0, 0));
        assert_eq!(sample.rgb, "rgb(255, 0, 0)");
        assert_eq!(sample.hex, "#FF0000");
        assert_eq!(sample.hsl, "hsl(0, 100%, 50%)");
    }

    #[test]
    fn test_upscaled_image_keeps_colour() {
        let picker =
            ImagePicker::from_image(&solid_red(10, 10), Size::new(1280, 800), FitMargins::default())
                .unwrap();

        assert_eq!(picker.source_size(), Size::new(10, 10));
        assert_eq!(picker.size(), Size::new(600, 600));
        let sample = picker.sample_at(Point::new(300.0, 300.0)).unwrap();
        assert_eq!(sample.hex, "#FF0000");
    }

    #[test]
    fn test_outside_canvas_yields_nothing() {
        let picker = ImagePicker::from_image(&solid_red(4, 4), Size::new(4, 4), NO_MARGINS).unwrap();

        assert!(picker.sample_at(Point::new(-0.5, 1.0)).is_none());
        assert!(picker.sample_at(Point::new(4.0, 1.0)).is_none());
        assert!(picker.sample_at(Point::new(1.0, 4.0)).is_none());
        assert!(picker.sample_at(Point::new(3.9, 3.9)).is_some());
    }

    #[test]
    fn test_samples_pixel_under_cursor_not_nearest() {
        let img = RgbaImage::from_fn(4, 1, |x, _| Rgba([x as u8 * 10, 0, 0, 255]));
        let picker =
            ImagePicker::from_image(&DynamicImage::ImageRgba8(img), Size::new(4, 1), NO_MARGINS)
                .unwrap();

        let sample = picker.sample_at(Point::new(2.6, 0.0)).unwrap();
        assert_eq!(sample.position, PixelPos::new(2, 0));
        assert_eq!(sample.colour, Colour::rgb(20, 0, 0));
    }

    #[test]
    fn test_sample_in_offset_and_scaled_display() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        img.put_pixel(3, 1, Rgba([9, 9, 9, 255]));
        let picker = ImagePicker::from_image(
            &DynamicImage::ImageRgba8(img),
            Size::new(4, 4),
            NO_MARGINS,
        )
        .unwrap();

        // Drawn at (100, 50), displayed at twice its size.
        let sample = picker
            .sample_in(Point::new(106.2, 52.4), Point::new(100.0, 50.0), Size::new(8, 8))
            .unwrap();

        assert_eq!(sample.position, PixelPos::new(3, 1));
        assert_eq!(sample.colour, Colour::rgb(9, 9, 9));
        assert!(picker
            .sample_in(Point::new(99.0, 52.0), Point::new(100.0, 50.0), Size::new(8, 8))
            .is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        let err = ImagePicker::open(&dir.path().join("missing.png"), Size::new(800, 800), NO_MARGINS)
            .unwrap_err();
        assert!(matches!(err, PipetteError::Io { .. }));
    }
}
