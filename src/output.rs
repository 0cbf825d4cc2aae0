//! Terminal output formatting for the pipette CLI.
//!
//! Provides Cargo-style status output with right-aligned coloured verbs.
//! All status output goes to stderr; stdout is reserved for machine-readable output.

use std::io::{self, IsTerminal, Write};

use crate::error::{PipetteError, Result};
use crate::types::SampledColour;

/// ANSI escape codes.
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Prints Cargo-style status lines to stderr with optional ANSI colours.
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Print a status line with a green bold verb.
    /// e.g. "     Sampled #FF0000 at 5,5"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print a success/completion line with a green bold verb.
    pub fn success(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print an informational line with a cyan bold verb.
    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    /// Print a warning line with a yellow bold verb.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Print an error line with a red bold verb.
    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Plain-text report of a sampled colour, one format per line.
pub fn format_report(sample: &SampledColour) -> String {
    format!(
        "position: {}\nrgb: {}\nhex: {}\nhsl: {}",
        sample.position, sample.rgb, sample.hex, sample.hsl
    )
}

/// JSON report of a sampled colour.
pub fn format_json(sample: &SampledColour) -> Result<String> {
    serde_json::to_string_pretty(sample).map_err(|e| PipetteError::Parse {
        message: format!("Failed to serialize sample: {}", e),
        help: None,
    })
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Colour, PixelPos};

    fn red() -> SampledColour {
        SampledColour::new(PixelPos::new(5, 5), Colour::rgb(255, 0, 0))
    }

    #[test]
    fn test_format_report() {
        insta::assert_snapshot!(format_report(&red()), @r"
        position: 5,5
        rgb: rgb(255, 0, 0)
        hex: #FF0000
        hsl: hsl(0, 100%, 50%)
        ");
    }

    #[test]
    fn test_format_json() {
        let json: serde_json::Value = serde_json::from_str(&format_json(&red()).unwrap()).unwrap();
        assert_eq!(json["hex"], "#FF0000");
        assert_eq!(json["hsl"], "hsl(0, 100%, 50%)");
        assert_eq!(json["colour"]["r"], 255);
    }

    #[test]
    fn test_display_path_absolute() {
        use std::path::Path;
        // An absolute path outside cwd should stay absolute
        let p = Path::new("/nonexistent/path/to/file");
        assert_eq!(display_path(p), "/nonexistent/path/to/file");
    }
}
