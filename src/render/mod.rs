//! Rendering module for pipette.
//!
//! Pixel buffers, coordinate mapping between viewport and buffer grids, and
//! the magnifier tile.

mod buffer;
mod magnifier;
mod mapping;
mod png;

pub use buffer::PixelBuffer;
pub use magnifier::{
    Magnifier, MagnifierConfig, MagnifierView, MAGNIFICATION, MAGNIFIER_SIZE,
    MAX_MAGNIFIER_SIZE,
};
pub use mapping::{clamp_to_buffer, CoordinateMapper};
pub use png::{swatch, write_png};
