//! The two sampling flows and their collaborators.

mod capture;
mod clipboard;
mod file;
mod screen;

pub use capture::{
    CaptureBackend, CaptureOptions, CursorVisibility, DisplaySurface, FrameStream, XcapBackend,
};
pub use clipboard::{copy_hex, ClipboardSink, CopyOutcome, SystemClipboard};
pub use file::{fit_size, ImagePicker};
pub use screen::{CaptureSession, ScreenPicker};
