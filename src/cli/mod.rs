pub mod completions;
pub mod convert;
pub mod init;
pub mod magnify;
pub mod sample;
pub mod screen;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::error::Result;
use crate::output::{format_json, format_report, Printer};
use crate::picker::{copy_hex, ClipboardSink, CopyOutcome};
use crate::types::SampledColour;

/// pipette - Sample pixel colours from the screen or an image
#[derive(Parser, Debug)]
#[command(name = "pipette")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file (default: ./pipette.yaml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sample a colour from an image file
    Sample(sample::SampleArgs),

    /// Capture the screen and sample a colour from it
    Screen(screen::ScreenArgs),

    /// Render a magnifier tile of an image around a point
    Magnify(magnify::MagnifyArgs),

    /// Show a colour as RGB, HEX and HSL
    Convert(convert::ConvertArgs),

    /// Write a default pipette.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Print a sample to stdout and optionally copy its hex value.
pub(crate) fn emit(
    sample: &SampledColour,
    json: bool,
    clipboard: Option<&mut dyn ClipboardSink>,
    printer: &Printer,
) -> Result<()> {
    if json {
        println!("{}", format_json(sample)?);
    } else {
        println!("{}", format_report(sample));
    }

    if let Some(sink) = clipboard {
        match copy_hex(sink, sample) {
            CopyOutcome::Copied(hex) => printer.success("Copied", &hex),
            CopyOutcome::Manual(hex) => {
                printer.warning("Copy failed", &format!("please copy manually: {}", hex))
            }
        }
    }

    Ok(())
}
