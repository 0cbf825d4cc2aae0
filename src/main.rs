use clap::Parser;
use miette::Result;
use pipette::cli::{Cli, Commands};
use pipette::config::Settings;
use pipette::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let printer = Printer::new();
    let settings = || Settings::discover(cli.config.as_deref());

    match cli.command {
        Commands::Sample(args) => {
            pipette::cli::sample::run(args, &settings()?, &printer)?;
        }
        Commands::Screen(args) => {
            pipette::cli::screen::run(args, &settings()?, &printer)?;
        }
        Commands::Magnify(args) => {
            pipette::cli::magnify::run(args, &settings()?, &printer)?;
        }
        Commands::Convert(args) => {
            pipette::cli::convert::run(args)?;
        }
        Commands::Init(args) => pipette::cli::init::run(args, &printer)?,
        Commands::Completions(args) => pipette::cli::completions::run(args)?,
    }

    Ok(())
}
