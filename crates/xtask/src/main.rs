mod build;
mod cli;
mod constants;
mod flash;
mod rtt;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use constants::app_elf;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Build { features, release } => {
            println!("Building firmware...");
            build::build_firmware(features.as_deref(), *release)?;
            println!("Build complete!");
        }
        Commands::Flash { features, release, force } => {
            flash::flash_firmware(features.as_deref(), *release, *force)?;
        }
        Commands::Run { features, release } => {
            flash::flash_firmware(features.as_deref(), *release, false)?;

            println!("Attaching RTT...");
            rtt::run(&app_elf(*release))?;
        }
        Commands::Attach { release } => {
            rtt::run(&app_elf(*release))?;
        }
        Commands::Test => {
            build::test_host_crates()?;
        }
    }

    Ok(())
}
