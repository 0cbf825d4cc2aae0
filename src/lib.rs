//! pipette - Pixel colour sampler
//!
//! A library for sampling pixel colours from a live screen capture or from a
//! local image, with RGB/HEX/HSL formatting and a magnified preview.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod picker;
pub mod render;
pub mod types;

pub use config::{FitMargins, Settings};
pub use error::{PipetteError, Result};
pub use picker::{
    copy_hex, fit_size, CaptureBackend, CaptureOptions, CaptureSession, ClipboardSink, CopyOutcome,
    FrameStream, ImagePicker, ScreenPicker, SystemClipboard, XcapBackend,
};
pub use render::{
    write_png, CoordinateMapper, Magnifier, MagnifierConfig, MagnifierView, PixelBuffer,
};
pub use types::{Colour, HslColour, PixelPos, Point, Rect, SampledColour, Size};
