//! Init command implementation.
//!
//! Writes a `pipette.yaml` holding the default settings.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{Settings, SETTINGS_FILENAME};
use crate::error::{PipetteError, Result};
use crate::output::{display_path, Printer};

/// Write a default pipette.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing pipette.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let settings_path = args.path.join(SETTINGS_FILENAME);

    if settings_path.exists() && !args.force {
        return Err(PipetteError::Config {
            message: format!("{} already exists", SETTINGS_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let yaml = Settings::default().to_yaml()?;

    fs::write(&settings_path, &yaml).map_err(|e| PipetteError::Io {
        path: settings_path.clone(),
        message: format!("Failed to write settings: {}", e),
    })?;

    printer.success("Created", &display_path(&settings_path));

    Ok(())
}
