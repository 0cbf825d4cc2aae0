mod colour;
mod geometry;
mod sample;

pub use colour::{Colour, HslColour};
pub use geometry::{PixelPos, Point, Rect, Size};
pub use sample::SampledColour;
