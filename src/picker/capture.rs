//! Screen capture backends.
//!
//! A backend turns a capture request into a live [`FrameStream`]. The
//! production backend grabs the primary monitor through `xcap`. The first
//! frame is the screenshot taken while checking permission; later
//! `latest_frame` calls return fresh screenshots.

use image::RgbaImage;
use xcap::Monitor;

use crate::error::{PipetteError, Result};

/// Which kind of surface the capture should prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySurface {
    Screen,
    Window,
}

/// Whether the pointer is drawn into captured frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorVisibility {
    Always,
    Motion,
    Never,
}

/// Options passed with a capture request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    pub display_surface: DisplaySurface,
    pub cursor: CursorVisibility,
    pub audio: bool,
}

impl CaptureOptions {
    /// Whole screen, cursor always visible, no audio.
    pub const SCREEN: Self = Self {
        display_surface: DisplaySurface::Screen,
        cursor: CursorVisibility::Always,
        audio: false,
    };
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self::SCREEN
    }
}

/// A live stream of captured frames.
pub trait FrameStream {
    /// The most recent frame, or `None` if no new frame is ready yet.
    fn latest_frame(&mut self) -> Result<Option<RgbaImage>>;

    /// False once the stream has ended, from either side.
    fn is_live(&self) -> bool;

    /// Stop all tracks. Must be idempotent.
    fn stop(&mut self);
}

/// Something that can be asked for a screen capture stream.
pub trait CaptureBackend {
    /// Request a stream. Denied permission or missing capture support is a
    /// [`PipetteError::Capture`].
    fn request(&mut self, options: &CaptureOptions) -> Result<Box<dyn FrameStream>>;
}

/// Captures the primary monitor with `xcap`.
#[derive(Debug, Default)]
pub struct XcapBackend;

impl CaptureBackend for XcapBackend {
    fn request(&mut self, options: &CaptureOptions) -> Result<Box<dyn FrameStream>> {
        if options.display_surface != DisplaySurface::Screen {
            return Err(PipetteError::Capture {
                message: "only whole-screen capture is supported".to_string(),
                help: None,
            });
        }
        if options.cursor != CursorVisibility::Always {
            log::debug!("cursor visibility {:?} is not configurable, ignoring", options.cursor);
        }

        let monitor = primary_monitor()?;

        // A denied permission must fail the request, not the first frame.
        let first = monitor.capture_image().map_err(|e| PipetteError::Capture {
            message: e.to_string(),
            help: Some(permission_help()),
        })?;

        log::info!(
            "capturing monitor {}",
            monitor.name().unwrap_or_else(|_| "<unnamed>".to_string())
        );

        Ok(Box::new(ScreenshotStream::new(first, move || {
            monitor.capture_image().map_err(|e| PipetteError::Capture {
                message: e.to_string(),
                help: None,
            })
        })))
    }
}

/// Polls screenshots from `grab`, starting with an already captured frame.
struct ScreenshotStream<F> {
    pending: Option<RgbaImage>,
    grab: F,
    live: bool,
}

impl<F> ScreenshotStream<F>
where
    F: FnMut() -> Result<RgbaImage>,
{
    fn new(first: RgbaImage, grab: F) -> Self {
        Self {
            pending: Some(first),
            grab,
            live: true,
        }
    }
}

impl<F> FrameStream for ScreenshotStream<F>
where
    F: FnMut() -> Result<RgbaImage>,
{
    fn latest_frame(&mut self) -> Result<Option<RgbaImage>> {
        if !self.live {
            return Ok(None);
        }
        if let Some(frame) = self.pending.take() {
            return Ok(Some(frame));
        }

        (self.grab)().map(Some)
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn stop(&mut self) {
        self.live = false;
        self.pending = None;
    }
}

fn primary_monitor() -> Result<Monitor> {
    let monitors = Monitor::all().map_err(|e| PipetteError::Capture {
        message: format!("Failed to enumerate monitors: {}", e),
        help: Some(permission_help()),
    })?;

    let mut fallback = None;
    for monitor in monitors {
        if monitor.is_primary().unwrap_or(false) {
            return Ok(monitor);
        }
        // No monitor reporting as primary means we use the first one.
        if fallback.is_none() {
            fallback = Some(monitor);
        }
    }

    fallback.ok_or_else(|| PipetteError::Capture {
        message: "No monitor available to capture".to_string(),
        help: Some(permission_help()),
    })
}

fn permission_help() -> String {
    "Make sure screen recording permission has been granted to this terminal".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_options() {
        let options = CaptureOptions::default();
        assert_eq!(options.display_surface, DisplaySurface::Screen);
        assert_eq!(options.cursor, CursorVisibility::Always);
        assert!(!options.audio);
    }

    #[test]
    fn test_screenshot_stream_reuses_first_frame() {
        let mut grabs = 0u8;
        let mut stream = ScreenshotStream::new(RgbaImage::new(1, 1), || {
            grabs += 1;
            Ok(RgbaImage::from_pixel(2, 2, image::Rgba([grabs, 0, 0, 255])))
        });

        let first = stream.latest_frame().unwrap().unwrap();
        assert_eq!(first.dimensions(), (1, 1));

        let second = stream.latest_frame().unwrap().unwrap();
        assert_eq!(second.dimensions(), (2, 2));
        assert_eq!(second.get_pixel(0, 0).0, [1, 0, 0, 255]);
    }

    #[test]
    fn test_screenshot_stream_stops() {
        let mut stream = ScreenshotStream::new(RgbaImage::new(1, 1), || -> Result<RgbaImage> {
            panic!("stopped stream must not capture")
        });

        stream.stop();
        stream.stop();
        assert!(!stream.is_live());
        assert!(stream.latest_frame().unwrap().is_none());
    }
}
