use clap::Args;

use crate::error::Result;
use crate::output::{format_json, format_report};
use crate::types::{Colour, PixelPos, SampledColour};

/// Show a colour as RGB, HEX and HSL
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Colour as #RGB, #RRGGBB or r,g,b
    pub colour: Colour,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ConvertArgs) -> Result<SampledColour> {
    let sample = SampledColour::new(PixelPos::new(0, 0), args.colour);

    if args.json {
        println!("{}", format_json(&sample)?);
    } else {
        // Position is meaningless for a typed-in colour.
        for line in format_report(&sample).lines().skip(1) {
            println!("{}", line);
        }
    }

    Ok(sample)
}
