//! Magnify command implementation.
//!
//! Renders the magnifier tile around a point of an image file, in the
//! image's own pixel coordinates.

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::{PipetteError, Result};
use crate::output::{display_path, Printer};
use crate::render::{write_png, Magnifier, MagnifierView, PixelBuffer};
use crate::types::Point;

/// Render a magnifier tile of an image around a point
#[derive(Args, Debug)]
pub struct MagnifyArgs {
    /// Image file to magnify
    #[arg(required = true)]
    pub file: PathBuf,

    /// Centre of the crop as X,Y in image pixels
    #[arg(long, allow_hyphen_values = true)]
    pub at: Point,

    /// Output PNG path
    #[arg(long, short, default_value = "magnifier.png")]
    pub output: PathBuf,

    /// Override the magnification factor
    #[arg(long)]
    pub magnification: Option<u32>,
}

pub fn run(args: MagnifyArgs, settings: &Settings, printer: &Printer) -> Result<MagnifierView> {
    let mut config = settings.magnifier;
    if let Some(factor) = args.magnification {
        if factor == 0 {
            return Err(PipetteError::Parse {
                message: "Magnification must be at least 1".to_string(),
                help: None,
            });
        }
        config.magnification = factor;
    }

    let image = image::open(&args.file).map_err(|e| PipetteError::Io {
        path: args.file.clone(),
        message: e.to_string(),
    })?;
    let buffer = PixelBuffer::from_image(image.to_rgba8())?;

    let view = Magnifier::new(config).render(&buffer, args.at)?;
    write_png(&view.tile, &args.output)?;

    printer.status(
        "Magnified",
        &format!(
            "{}x{} crop at {},{} -> {}",
            view.crop.width,
            view.crop.height,
            view.crop.x,
            view.crop.y,
            display_path(&args.output)
        ),
    );
    println!("{}", view.sample.hex);

    Ok(view)
}
