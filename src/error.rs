use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pipette operations
#[derive(Error, Diagnostic, Debug)]
pub enum PipetteError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(pipette::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Image error: {message}")]
    #[diagnostic(code(pipette::image))]
    Image {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(pipette::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(pipette::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Screen capture failed: {message}")]
    #[diagnostic(code(pipette::capture))]
    Capture {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Session error: {message}")]
    #[diagnostic(code(pipette::session))]
    Session {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Pixel readback failed: {message}")]
    #[diagnostic(code(pipette::readback))]
    Readback { message: String },

    #[error("Clipboard write failed: {message}")]
    #[diagnostic(code(pipette::clipboard))]
    Clipboard { message: String },
}

pub type Result<T> = std::result::Result<T, PipetteError>;
