//! Sampled colour: a pixel read with its derived display formats.

use std::time::SystemTime;

use serde::Serialize;

use super::{Colour, HslColour, PixelPos};

/// A colour read from a pixel buffer at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledColour {
    /// Buffer coordinate the colour was read from.
    pub position: PixelPos,
    pub colour: Colour,
    pub rgb: String,
    pub hex: String,
    pub hsl: String,
    #[serde(skip)]
    pub sampled_at: SystemTime,
}

impl SampledColour {
    pub fn new(position: PixelPos, colour: Colour) -> Self {
        Self {
            position,
            colour,
            rgb: colour.to_css_rgb(),
            hex: colour.to_hex(),
            hsl: colour.to_hsl().to_string(),
            sampled_at: SystemTime::now(),
        }
    }

    pub fn hsl_components(&self) -> HslColour {
        self.colour.to_hsl()
    }
}
