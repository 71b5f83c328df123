use clap::{Parser, Subcommand};

/// Build, flash and debug the relay controller firmware.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cross-compile relay-app for the nRF52840
    Build {
        /// Extra cargo features, e.g. "defmt,devkit"
        #[arg(long)]
        features: Option<String>,

        #[arg(long)]
        release: bool,
    },
    /// Build relay-app and download it with probe-rs
    Flash {
        /// Extra cargo features, e.g. "defmt,devkit"
        #[arg(long)]
        features: Option<String>,

        #[arg(long)]
        release: bool,

        /// Erase the whole chip first
        #[arg(long)]
        force: bool,
    },
    /// Flash relay-app, then stream its defmt log over RTT
    Run {
        /// Extra cargo features, e.g. "defmt,devkit"
        #[arg(long)]
        features: Option<String>,

        #[arg(long)]
        release: bool,
    },
    /// Stream the defmt log of firmware already on the board
    Attach {
        /// Decode against the release build's ELF
        #[arg(long)]
        release: bool,
    },
    /// Run the expander-bus host tests
    Test,
}
