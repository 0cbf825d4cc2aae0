//! Sample command implementation.
//!
//! Fits an image file into the viewport and reads the colour under a point.

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::{PipetteError, Result};
use crate::output::{display_path, Printer};
use crate::picker::{ClipboardSink, ImagePicker, SystemClipboard};
use crate::render::{swatch, write_png};
use crate::types::{Point, SampledColour, Size};

/// Edge length of the preview swatch.
const SWATCH_SIZE: u32 = 64;

/// Sample a colour from an image file
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Image file to sample
    #[arg(required = true)]
    pub file: PathBuf,

    /// Position on the fitted image as X,Y (default: centre)
    #[arg(long, allow_hyphen_values = true)]
    pub at: Option<Point>,

    /// Viewport the image is fitted into, as WxH
    #[arg(long)]
    pub viewport: Option<Size>,

    /// Write a solid preview swatch of the colour to this PNG
    #[arg(long)]
    pub swatch: Option<PathBuf>,

    /// Print the sample as JSON
    #[arg(long)]
    pub json: bool,

    /// Copy the hex value to the clipboard
    #[arg(long)]
    pub copy: bool,
}

pub fn run(args: SampleArgs, settings: &Settings, printer: &Printer) -> Result<SampledColour> {
    let viewport = args.viewport.unwrap_or(settings.viewport);
    let picker = ImagePicker::open(&args.file, viewport, settings.fit_margins)?;

    printer.status(
        "Loaded",
        &format!(
            "{} ({} fitted to {})",
            display_path(&args.file),
            picker.source_size(),
            picker.size()
        ),
    );

    let at = args.at.unwrap_or_else(|| picker.size().centre());
    let sample = picker.sample_at(at).ok_or_else(|| PipetteError::Readback {
        message: format!("no pixel at {}: outside the {} image", at, picker.size()),
    })?;

    printer.status("Sampled", &format!("{} at {}", sample.hex, sample.position));

    if let Some(path) = &args.swatch {
        write_png(&swatch(sample.colour, SWATCH_SIZE), path)?;
        printer.status("Wrote", &format!("swatch {}", display_path(path)));
    }

    let mut clipboard = SystemClipboard::new();
    let sink: Option<&mut dyn ClipboardSink> = if args.copy || settings.copy {
        Some(&mut clipboard)
    } else {
        None
    };
    super::emit(&sample, args.json, sink, printer)?;

    Ok(sample)
}
