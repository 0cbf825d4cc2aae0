//! Rasterized pixel buffer with single-pixel readback.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use crate::error::{PipetteError, Result};
use crate::types::{Colour, PixelPos, SampledColour, Size};

/// An off-screen RGBA canvas. Dimensions are always positive.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pixels: RgbaImage,
}

impl PixelBuffer {
    /// Wrap an existing image. Fails for empty images.
    pub fn from_image(pixels: RgbaImage) -> Result<Self> {
        let size = Size::new(pixels.width(), pixels.height());
        if !size.is_positive() {
            return Err(PipetteError::Image {
                message: format!("Pixel buffer must have positive dimensions, got {}", size),
                help: None,
            });
        }
        Ok(Self { pixels })
    }

    /// Decode-side entry point: resample `image` into a buffer of `size`.
    ///
    /// Uses a smoothing filter, matching how a canvas scales a drawn image.
    pub fn rasterize(image: &DynamicImage, size: Size) -> Result<Self> {
        if !size.is_positive() {
            return Err(PipetteError::Image {
                message: format!("Cannot rasterize into a {} buffer", size),
                help: Some("The target area must be at least 1x1".to_string()),
            });
        }

        let rgba = image.to_rgba8();
        if rgba.dimensions() == (size.width, size.height) {
            return Self::from_image(rgba);
        }

        Self::from_image(imageops::resize(
            &rgba,
            size.width,
            size.height,
            FilterType::Triangle,
        ))
    }

    pub fn size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Replace the contents with the most recent frame.
    ///
    /// The buffer takes the frame's dimensions, like a canvas resized to a
    /// video's intrinsic size.
    pub fn draw_frame(&mut self, frame: RgbaImage) -> Result<()> {
        *self = Self::from_image(frame)?;
        Ok(())
    }

    /// Read the colour at an exact integer coordinate.
    pub fn read_pixel(&self, pos: PixelPos) -> Result<Colour> {
        self.pixels
            .get_pixel_checked(pos.x, pos.y)
            .map(|p| Colour::from_rgba(p.0))
            .ok_or_else(|| PipetteError::Readback {
                message: format!("({}) is outside the {} buffer", pos, self.size()),
            })
    }

    /// Read a pixel and annotate it with its display formats.
    pub fn sample(&self, pos: PixelPos) -> Result<SampledColour> {
        Ok(SampledColour::new(pos, self.read_pixel(pos)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(rgba))
    }

    #[test]
    fn test_rejects_empty_buffer() {
        assert!(PixelBuffer::from_image(RgbaImage::new(0, 4)).is_err());
        assert!(PixelBuffer::from_image(RgbaImage::new(4, 0)).is_err());
    }

    #[test]
    fn test_read_pixel() {
        let mut img = solid(3, 2, [0, 0, 0, 255]);
        img.put_pixel(2, 1, Rgba([10, 20, 30, 255]));
        let buffer = PixelBuffer::from_image(img).unwrap();

        assert_eq!(buffer.read_pixel(PixelPos::new(2, 1)).unwrap(), Colour::rgb(10, 20, 30));
        assert_eq!(buffer.read_pixel(PixelPos::new(0, 0)).unwrap(), Colour::BLACK);
    }

    #[test]
    fn test_read_pixel_out_of_bounds_is_readback_error() {
        let buffer = PixelBuffer::from_image(solid(2, 2, [0, 0, 0, 255])).unwrap();
        let err = buffer.read_pixel(PixelPos::new(2, 0)).unwrap_err();
        assert!(matches!(err, PipetteError::Readback { .. }));
    }

    #[test]
    fn test_rasterize_keeps_solid_colour_when_scaling() {
        let img = DynamicImage::ImageRgba8(solid(10, 10, [255, 0, 0, 255]));
        let buffer = PixelBuffer::rasterize(&img, Size::new(25, 25)).unwrap();

        assert_eq!(buffer.size(), Size::new(25, 25));
        assert_eq!(buffer.read_pixel(PixelPos::new(12, 12)).unwrap(), Colour::rgb(255, 0, 0));
    }

    #[test]
    fn test_rasterize_rejects_zero_target() {
        let img = DynamicImage::ImageRgba8(solid(2, 2, [0, 0, 0, 255]));
        assert!(PixelBuffer::rasterize(&img, Size::new(0, 2)).is_err());
    }

    #[test]
    fn test_draw_frame_takes_frame_dimensions() {
        let mut buffer = PixelBuffer::from_image(solid(2, 2, [0, 0, 0, 255])).unwrap();
        buffer.draw_frame(solid(4, 3, [1, 2, 3, 255])).unwrap();

        assert_eq!(buffer.size(), Size::new(4, 3));
        assert_eq!(buffer.read_pixel(PixelPos::new(3, 2)).unwrap(), Colour::rgb(1, 2, 3));
    }
}
