//! Screen command implementation.
//!
//! Runs one pass of the screen-sample flow: start a capture session, draw a
//! frame, move the pointer to the requested position (rendering the
//! magnifier), click, and stop.

use std::ops::ControlFlow;
use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::{PipetteError, Result};
use crate::output::{display_path, Printer};
use crate::picker::{CaptureBackend, ClipboardSink, ScreenPicker, SystemClipboard, XcapBackend};
use crate::render::{write_png, Magnifier};
use crate::types::{Point, SampledColour, Size};

/// Capture the screen and sample a colour from it
#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// Pointer position as X,Y in viewport coordinates (default: centre)
    #[arg(long, allow_hyphen_values = true)]
    pub at: Option<Point>,

    /// Viewport the position refers to, as WxH (default: captured frame size)
    #[arg(long)]
    pub viewport: Option<Size>,

    /// Write the magnifier tile around the position to this PNG
    #[arg(long)]
    pub magnify: Option<PathBuf>,

    /// Print the sample as JSON
    #[arg(long)]
    pub json: bool,

    /// Copy the hex value to the clipboard
    #[arg(long)]
    pub copy: bool,
}

pub fn run(args: ScreenArgs, settings: &Settings, printer: &Printer) -> Result<SampledColour> {
    let picker = ScreenPicker::new(
        XcapBackend,
        Magnifier::new(settings.magnifier),
        settings.cancel_key.clone(),
    );
    let mut clipboard = SystemClipboard::new();
    let sink: Option<&mut dyn ClipboardSink> = if args.copy || settings.copy {
        Some(&mut clipboard)
    } else {
        None
    };

    pick(picker, &args, sink, printer)
}

/// Drive `picker` through one start / frame / move / click cycle.
pub(crate) fn pick<B: CaptureBackend>(
    mut picker: ScreenPicker<B>,
    args: &ScreenArgs,
    clipboard: Option<&mut dyn ClipboardSink>,
    printer: &Printer,
) -> Result<SampledColour> {
    if let Err(e) = picker.start() {
        printer.error("Denied", "cannot access the screen; check screen sharing permission");
        return Err(e);
    }

    if picker.on_frame() == ControlFlow::Break(()) {
        return Err(ended_early());
    }

    let buffer = picker.buffer_size().ok_or_else(|| PipetteError::Capture {
        message: "no frame was captured".to_string(),
        help: None,
    })?;
    printer.info("Capturing", &format!("screen ({})", buffer));

    let viewport = args.viewport.unwrap_or(buffer);
    let at = args.at.unwrap_or_else(|| viewport.centre());

    if let Some(path) = &args.magnify {
        let view = picker.pointer_move(at, viewport).ok_or_else(|| PipetteError::Readback {
            message: format!("cannot magnify around {}", at),
        })?;
        write_png(&view.tile, path)?;
        printer.status(
            "Magnified",
            &format!("{} around {} -> {}", view.sample.hex, view.sample.position, display_path(path)),
        );
    }

    let sample = picker.click(at, viewport).ok_or_else(|| PipetteError::Readback {
        message: format!("no colour at {}", at),
    })?;

    printer.status("Sampled", &format!("{} at {}", sample.hex, sample.position));
    super::emit(&sample, args.json, clipboard, printer)?;

    Ok(sample)
}

fn ended_early() -> PipetteError {
    PipetteError::Session {
        message: "screen sharing ended before a colour was picked".to_string(),
        help: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::{CaptureOptions, FrameStream};
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    /// Serves the same gradient frame until stopped.
    struct StillScreen {
        live: bool,
    }

    impl FrameStream for StillScreen {
        fn latest_frame(&mut self) -> Result<Option<RgbaImage>> {
            Ok(Some(RgbaImage::from_fn(64, 32, |x, y| {
                Rgba([x as u8 * 4, y as u8 * 8, 0, 255])
            })))
        }

        fn is_live(&self) -> bool {
            self.live
        }

        fn stop(&mut self) {
            self.live = false;
        }
    }

    struct Backend {
        deny: bool,
    }

    impl CaptureBackend for Backend {
        fn request(&mut self, _options: &CaptureOptions) -> Result<Box<dyn FrameStream>> {
            if self.deny {
                return Err(PipetteError::Capture {
                    message: "denied".to_string(),
                    help: None,
                });
            }
            Ok(Box::new(StillScreen { live: true }))
        }
    }

    fn args() -> ScreenArgs {
        ScreenArgs {
            at: None,
            viewport: None,
            magnify: None,
            json: false,
            copy: false,
        }
    }

    fn picker(deny: bool) -> ScreenPicker<Backend> {
        ScreenPicker::new(Backend { deny }, Magnifier::default(), "Escape")
    }

    #[test]
    fn test_pick_defaults_to_centre() {
        let sample = pick(picker(false), &args(), None, &Printer::new()).unwrap();

        assert_eq!(sample.position.x, 32);
        assert_eq!(sample.position.y, 16);
        assert_eq!(sample.hex, "#808000");
    }

    #[test]
    fn test_pick_maps_viewport_and_writes_magnifier() {
        let dir = tempdir().unwrap();
        let tile = dir.path().join("tile.png");

        let sample = pick(
            picker(false),
            &ScreenArgs {
                at: Some(Point::new(5.0, 2.0)),
                viewport: Some(Size::new(32, 16)),
                magnify: Some(tile.clone()),
                ..args()
            },
            None,
            &Printer::new(),
        )
        .unwrap();

        assert_eq!(sample.position.x, 10);
        assert_eq!(sample.position.y, 4);

        let img = image::open(&tile).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (200, 200));
    }

    #[test]
    fn test_pick_reports_denied_capture() {
        let result = pick(picker(true), &args(), None, &Printer::new());
        assert!(matches!(result, Err(PipetteError::Capture { .. })));
    }
}
