//! Screen-sample flow.
//!
//! [`ScreenPicker`] owns at most one [`CaptureSession`]. Event handlers
//! (`pointer_move`, `click`, `key_down`) and the per-frame redraw tick all
//! operate on that session; when no session is active they do nothing.
//! A click or the cancel key only clears the session's liveness flag and
//! stops its stream; the next redraw tick drops the session.

use std::ops::ControlFlow;

use crate::error::{PipetteError, Result};
use crate::render::{CoordinateMapper, Magnifier, MagnifierView, PixelBuffer};
use crate::types::{Point, SampledColour, Size};

use super::capture::{CaptureBackend, CaptureOptions, FrameStream};

/// One live capture: the frame stream, the rasterized buffer and the
/// liveness flag.
pub struct CaptureSession {
    stream: Box<dyn FrameStream>,
    buffer: Option<PixelBuffer>,
    active: bool,
}

impl CaptureSession {
    fn new(stream: Box<dyn FrameStream>) -> Self {
        Self {
            stream,
            buffer: None,
            active: true,
        }
    }

    /// True while the session is picking and its stream is live.
    pub fn is_active(&self) -> bool {
        self.active && self.stream.is_live()
    }

    /// The buffer holding the latest drawn frame, once one has arrived.
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    /// Draw the most recent frame into the buffer, if one is ready.
    fn draw_latest(&mut self) {
        match self.stream.latest_frame() {
            Ok(Some(frame)) => {
                let drawn = match &mut self.buffer {
                    Some(buffer) => buffer.draw_frame(frame),
                    slot @ None => PixelBuffer::from_image(frame).map(|b| *slot = Some(b)),
                };
                if let Err(e) = drawn {
                    log::warn!("dropping frame: {}", e);
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("failed to read frame: {}", e),
        }
    }

    fn stop(&mut self) {
        self.active = false;
        self.stream.stop();
        self.buffer = None;
    }
}

/// Drives the screen-sample flow over a capture backend.
pub struct ScreenPicker<B: CaptureBackend> {
    backend: B,
    session: Option<CaptureSession>,
    magnifier: Magnifier,
    cancel_key: String,
}

impl<B: CaptureBackend> ScreenPicker<B> {
    pub fn new(backend: B, magnifier: Magnifier, cancel_key: impl Into<String>) -> Self {
        Self {
            backend,
            session: None,
            magnifier,
            cancel_key: cancel_key.into(),
        }
    }

    /// True while a session is active.
    pub fn is_picking(&self) -> bool {
        self.session.as_ref().is_some_and(CaptureSession::is_active)
    }

    pub fn session(&self) -> Option<&CaptureSession> {
        self.session.as_ref()
    }

    /// Size of the latest drawn frame.
    pub fn buffer_size(&self) -> Option<Size> {
        self.buffer().map(PixelBuffer::size)
    }

    /// Request a capture stream and begin a session.
    ///
    /// Rejected while a session is already active. On capture failure no
    /// session is left behind.
    pub fn start(&mut self) -> Result<()> {
        if self.is_picking() {
            return Err(PipetteError::Session {
                message: "a picking session is already active".to_string(),
                help: Some(format!("Press {} to cancel it first", self.cancel_key)),
            });
        }
        self.stop();

        let stream = match self.backend.request(&CaptureOptions::SCREEN) {
            Ok(stream) => stream,
            Err(e) => {
                log::error!("cannot access the screen: {}", e);
                return Err(e);
            }
        };

        let mut session = CaptureSession::new(stream);
        // Draw the first frame immediately so the buffer has a size.
        session.draw_latest();
        self.session = Some(session);

        log::debug!("picking session started");
        Ok(())
    }

    /// One redraw tick. Keeps going while the session is active; tears the
    /// session down and breaks once it is not (cancelled, picked, or the
    /// stream ended on the capture side).
    pub fn on_frame(&mut self) -> ControlFlow<()> {
        let Some(session) = self.session.as_mut() else {
            return ControlFlow::Break(());
        };

        if session.is_active() {
            session.draw_latest();
            return ControlFlow::Continue(());
        }

        log::debug!("capture stream ended");
        self.stop();
        ControlFlow::Break(())
    }

    /// Pointer moved to `client` within a viewport of `viewport` size.
    ///
    /// Returns the magnifier for the new position, or `None` when there is
    /// nothing to sample yet or the readback failed.
    pub fn pointer_move(&self, client: Point, viewport: Size) -> Option<MagnifierView> {
        let buffer = self.active_buffer()?;
        let mapper = self.mapper(buffer, viewport)?;

        match self.magnifier.render(buffer, mapper.scale(client)) {
            Ok(view) => Some(view),
            Err(e) => {
                log::error!("failed to update magnifier: {}", e);
                None
            }
        }
    }

    /// Click at `client`: sample the pixel and finish the session.
    ///
    /// When nothing could be sampled the session stays active.
    pub fn click(&mut self, client: Point, viewport: Size) -> Option<SampledColour> {
        let buffer = self.active_buffer()?;
        let mapper = self.mapper(buffer, viewport)?;

        let sample = match buffer.sample(mapper.map(client)) {
            Ok(sample) => sample,
            Err(e) => {
                log::error!("failed to read colour: {}", e);
                return None;
            }
        };

        self.finish();
        Some(sample)
    }

    /// Handle a key press. Returns true if it cancelled the session.
    pub fn key_down(&mut self, key: &str) -> bool {
        if self.is_picking() && key.eq_ignore_ascii_case(&self.cancel_key) {
            log::debug!("picking cancelled with {}", key);
            self.finish();
            true
        } else {
            false
        }
    }

    /// Stop the stream and drop the session. Safe to call at any time.
    pub fn stop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
        }
    }

    /// Clear the liveness flag and stop the stream, leaving teardown to the
    /// next `on_frame` tick.
    fn finish(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.stop();
        }
    }

    fn buffer(&self) -> Option<&PixelBuffer> {
        self.session.as_ref().and_then(CaptureSession::buffer)
    }

    fn active_buffer(&self) -> Option<&PixelBuffer> {
        if self.is_picking() {
            self.buffer()
        } else {
            None
        }
    }

    fn mapper(&self, buffer: &PixelBuffer, viewport: Size) -> Option<CoordinateMapper> {
        CoordinateMapper::new(viewport, buffer.size())
            .map_err(|e| log::warn!("{}", e))
            .ok()
    }
}

impl<B: CaptureBackend> Drop for ScreenPicker<B> {
    fn drop(&mut self) {
        self.stop();
    }
}
