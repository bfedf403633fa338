//! Command-line interface for keepsake.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Keepsake - birthday memory game and media players
#[derive(Parser, Debug)]
#[command(name = "keepsake")]
#[command(about = "Birthday memory game with background music", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the site configuration file
    #[arg(long, global = true, default_value = "keepsake.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the memory game in the terminal
    Memory,

    /// Print the music and video catalogs
    Catalog {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Deal a deck and print its layout
    Deck {
        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,
    },
}
