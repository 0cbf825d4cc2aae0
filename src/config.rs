//! Settings file (pipette.yaml) parsing.
//!
//! Every field is optional; a missing file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipetteError, Result};
use crate::render::{MagnifierConfig, MAX_MAGNIFIER_SIZE};
use crate::types::Size;

/// Default settings filename, looked up in the working directory.
pub const SETTINGS_FILENAME: &str = "pipette.yaml";

/// Space reserved around a fitted image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitMargins {
    pub width: u32,
    pub height: u32,
}

impl Default for FitMargins {
    fn default() -> Self {
        Self {
            width: 10,
            height: 200,
        }
    }
}

/// User settings loaded from pipette.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Magnifier tile size and magnification.
    pub magnifier: MagnifierConfig,

    /// Viewport assumed when none is given on the command line.
    pub viewport: Size,

    /// Margins subtracted from the viewport before fitting an image.
    pub fit_margins: FitMargins,

    /// Key name that cancels an active screen session.
    pub cancel_key: String,

    /// Copy the picked hex value to the clipboard by default.
    pub copy: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            magnifier: MagnifierConfig::default(),
            viewport: Size::new(1280, 800),
            fit_margins: FitMargins::default(),
            cancel_key: "Escape".to_string(),
            copy: false,
        }
    }
}

impl Settings {
    /// Load settings from a yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PipetteError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read settings: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load `explicit` if given, else `pipette.yaml` in the working
    /// directory if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = PathBuf::from(SETTINGS_FILENAME);
        if local.is_file() {
            log::debug!("loading settings from {}", local.display());
            Self::load(&local)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Self = serde_yaml::from_str(content).map_err(|e| PipetteError::Config {
            message: format!("Invalid settings: {}", e),
            help: Some(format!("Check {} syntax", SETTINGS_FILENAME)),
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to YAML, as written by `pipette init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| PipetteError::Config {
            message: format!("Failed to serialize settings: {}", e),
            help: None,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.magnifier.size == 0 || self.magnifier.magnification == 0 {
            return Err(PipetteError::Config {
                message: "Magnifier size and magnification must be at least 1".to_string(),
                help: Some("Defaults are size: 200, magnification: 10".to_string()),
            });
        }

        if self.magnifier.size > MAX_MAGNIFIER_SIZE {
            return Err(PipetteError::Config {
                message: format!(
                    "Magnifier size {} exceeds the maximum of {}",
                    self.magnifier.size, MAX_MAGNIFIER_SIZE
                ),
                help: Some("Defaults are size: 200, magnification: 10".to_string()),
            });
        }

        if !self.viewport.is_positive() {
            return Err(PipetteError::Config {
                message: format!("Viewport must be non-zero, got {}", self.viewport),
                help: None,
            });
        }

        if self.cancel_key.trim().is_empty() {
            return Err(PipetteError::Config {
                message: "cancel_key must not be empty".to_string(),
                help: Some("Use a key name such as Escape".to_string()),
            });
        }

        Ok(())
    }
}
