//! Viewport to buffer coordinate mapping.
//!
//! The rasterized buffer (a captured frame or a fitted image) does not
//! necessarily share pixel dimensions with the viewport the pointer moves
//! in. Each axis is scaled independently; no aspect-ratio correction is
//! applied.

use crate::error::{PipetteError, Result};
use crate::types::{PixelPos, Point, Size};

/// Maps client coordinates into a buffer's pixel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    viewport: Size,
    buffer: Size,
    scale_x: f64,
    scale_y: f64,
}

impl CoordinateMapper {
    pub fn new(viewport: Size, buffer: Size) -> Result<Self> {
        if !viewport.is_positive() || !buffer.is_positive() {
            return Err(PipetteError::Parse {
                message: format!(
                    "Cannot map a {} viewport onto a {} buffer",
                    viewport, buffer
                ),
                help: Some("Viewport and buffer dimensions must be non-zero".to_string()),
            });
        }

        Ok(Self {
            viewport,
            buffer,
            scale_x: buffer.width as f64 / viewport.width as f64,
            scale_y: buffer.height as f64 / viewport.height as f64,
        })
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn buffer(&self) -> Size {
        self.buffer
    }

    /// Scaled but unclamped, unrounded buffer coordinate.
    pub fn scale(&self, client: Point) -> Point {
        Point::new(client.x * self.scale_x, client.y * self.scale_y)
    }

    /// Buffer pixel under `client`, always inside the buffer.
    pub fn map(&self, client: Point) -> PixelPos {
        let scaled = self.scale(client);
        clamp_to_buffer(scaled, self.buffer)
    }

    /// Buffer pixel whose area contains `client`: truncates instead of
    /// rounding, then clamps like [`map`](Self::map).
    pub fn pixel_under(&self, client: Point) -> PixelPos {
        let scaled = self.scale(client);
        clamp_to_buffer(Point::new(scaled.x.floor(), scaled.y.floor()), self.buffer)
    }
}

/// Clamp a buffer-space point into `[0, dim - 1]` per axis, then round.
///
/// Non-finite input maps to the nearest edge, or to 0 for NaN.
pub fn clamp_to_buffer(point: Point, buffer: Size) -> PixelPos {
    PixelPos::new(
        clamp_axis(point.x, buffer.width),
        clamp_axis(point.y, buffer.height),
    )
}

fn clamp_axis(value: f64, dim: u32) -> u32 {
    if value.is_nan() {
        return 0;
    }
    let max = dim.saturating_sub(1) as f64;
    value.clamp(0.0, max).round() as u32
}
