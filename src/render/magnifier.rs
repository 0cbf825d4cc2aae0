//! Magnifier tile rendering.
//!
//! A small square crop around the cursor is upscaled into a fixed-size tile
//! with nearest-neighbour sampling, so each source pixel shows as a block.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Point, Rect, SampledColour, Size};

use super::buffer::PixelBuffer;
use super::mapping::clamp_to_buffer;

/// Default tile edge in pixels.
pub const MAGNIFIER_SIZE: u32 = 200;

/// Default magnification factor.
pub const MAGNIFICATION: u32 = 10;

/// Largest tile edge a configuration may ask for.
pub const MAX_MAGNIFIER_SIZE: u32 = 4096;

/// Tile size and magnification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnifierConfig {
    /// Edge length of the square output tile.
    pub size: u32,
    /// How many tile pixels one source pixel spans.
    pub magnification: u32,
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            size: MAGNIFIER_SIZE,
            magnification: MAGNIFICATION,
        }
    }
}

impl MagnifierConfig {
    /// Source pixels covered on each side of the cursor.
    pub fn source_half_extent(&self) -> f64 {
        let half = self.size.max(1) as f64 / 2.0;
        half / self.magnification.max(1) as f64
    }
}

/// A rendered magnifier: the tile, the crop it shows, and the cursor colour.
#[derive(Debug, Clone)]
pub struct MagnifierView {
    pub tile: RgbaImage,
    pub crop: Rect,
    pub sample: SampledColour,
}

/// Renders magnifier tiles from a pixel buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Magnifier {
    config: MagnifierConfig,
}

impl Magnifier {
    pub fn new(config: MagnifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> MagnifierConfig {
        self.config
    }

    /// Source crop centred on `centre`, clamped to stay inside `buffer`.
    ///
    /// The origin is clamped to `[0, dim - 1]` and the extent to what remains
    /// of the buffer, so the crop is never empty.
    pub fn crop_rect(&self, centre: Point, buffer: Size) -> Rect {
        let source = self.config.source_half_extent();
        let (x, width) = crop_axis(centre.x, source, buffer.width);
        let (y, height) = crop_axis(centre.y, source, buffer.height);
        Rect::new(x, y, width, height)
    }

    /// Render the tile for a cursor at `centre` (buffer coordinates, unrounded).
    pub fn render(&self, buffer: &PixelBuffer, centre: Point) -> Result<MagnifierView> {
        let crop = self.crop_rect(centre, buffer.size());
        let tile = self.resample(buffer, crop);
        let sample = buffer.sample(clamp_to_buffer(centre, buffer.size()))?;

        Ok(MagnifierView { tile, crop, sample })
    }

    /// Nearest-neighbour upscale of `crop` into a square tile.
    fn resample(&self, buffer: &PixelBuffer, crop: Rect) -> RgbaImage {
        let size = self.config.size.max(1);
        let source = buffer.image();
        let max_x = buffer.width() - 1;
        let max_y = buffer.height() - 1;

        let step_x = crop.width / size as f64;
        let step_y = crop.height / size as f64;

        let columns: Vec<u32> = (0..size)
            .map(|tx| nearest(crop.x + (tx as f64 + 0.5) * step_x, max_x))
            .collect();

        RgbaImage::from_fn(size, size, |tx, ty| {
            let sy = nearest(crop.y + (ty as f64 + 0.5) * step_y, max_y);
            let sx = columns[tx as usize];
            Rgba(source.get_pixel(sx, sy).0)
        })
    }
}

fn crop_axis(centre: f64, source: f64, dim: u32) -> (f64, f64) {
    let dim = dim as f64;
    let start = (centre - source).clamp(0.0, (dim - 1.0).max(0.0));
    let start = if start.is_nan() { 0.0 } else { start };
    let extent = (source * 2.0).min(dim - start);
    (start, extent)
}

fn nearest(coord: f64, max: u32) -> u32 {
    (coord.floor().max(0.0) as u32).min(max)
}
