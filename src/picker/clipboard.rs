//! Clipboard output for picked colours.

use crate::error::{PipetteError, Result};
use crate::types::SampledColour;

/// Destination for copied text.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard, opened on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| PipetteError::Clipboard {
                message: e.to_string(),
            })?,
        };

        let written = clipboard
            .set_text(text.to_string())
            .map_err(|e| PipetteError::Clipboard {
                message: e.to_string(),
            });

        self.inner = Some(clipboard);
        written
    }
}

/// What happened to a copy request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(String),
    /// The write failed; the value must be copied by hand.
    Manual(String),
}

/// Copy the sample's hex value. Failures are logged and fall back to
/// [`CopyOutcome::Manual`]; nothing is retried.
pub fn copy_hex(sink: &mut dyn ClipboardSink, sample: &SampledColour) -> CopyOutcome {
    match sink.write_text(&sample.hex) {
        Ok(()) => CopyOutcome::Copied(sample.hex.clone()),
        Err(e) => {
            log::error!("copy failed: {}", e);
            CopyOutcome::Manual(sample.hex.clone())
        }
    }
}
