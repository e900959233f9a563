use anyhow::Result;
use clap::Parser;

use chorograph::cli::{Cli, Commands};
use chorograph::commands::{inspect, render};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Render(args) => render::run(&cli, args),
        Commands::Inspect(args) => inspect::run(&cli, args),
    }
}
