//! Keepsake - Unified CLI
//!
//! Memory game in the terminal plus catalog and deck inspection.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use keepsake::{COLUMNS, SiteConfig};
use keepsake_memory::{Deck, MatchSetup};
use keepsake_playback::Playable;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        // The TUI installs its own file logger
        Command::Memory => {
            let config = SiteConfig::load_or_default(&cli.config)?;
            keepsake::run_memory(config).await
        }
        Command::Catalog { json } => {
            init_stderr_logging();
            let config = SiteConfig::load_or_default(&cli.config)?;
            print_catalog(&config, json)
        }
        Command::Deck { seed } => {
            init_stderr_logging();
            let config = SiteConfig::load_or_default(&cli.config)?;
            print_deck(&config, seed)
        }
    }
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print both media catalogs
#[instrument(skip(config))]
fn print_catalog(config: &SiteConfig, json: bool) -> Result<()> {
    let music = config.music_catalog()?;
    let videos = config.video_catalog()?;

    if json {
        let doc = json!({
            "tracks": music.items(),
            "videos": videos.items(),
            "timeline": config.timeline(),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Music (volume {:.0}%)", config.music().volume() * 100.0);
    for (index, track) in music.items().iter().enumerate() {
        println!("  {}. {}  [{}]", index + 1, track.label(), track.source());
    }
    println!("Videos (volume {:.0}%)", config.video().volume() * 100.0);
    for (index, video) in videos.items().iter().enumerate() {
        println!("  {}. {}  [{}]", index + 1, video.label(), video.source());
    }
    println!("Timeline");
    for entry in config.timeline() {
        println!("  {}  {}", entry.date(), entry.title());
    }
    Ok(())
}

/// Deal one deck and print it as a grid
#[instrument(skip(config))]
fn print_deck(config: &SiteConfig, seed: Option<u64>) -> Result<()> {
    let setup = MatchSetup::new(config.kind_set()?);
    let game = match seed {
        Some(seed) => setup.start(&mut StdRng::seed_from_u64(seed)),
        None => setup.start(&mut rand::rng()),
    };
    let deck: &Deck = game.deck();
    info!(cards = deck.len(), "Dealt deck");

    for row in deck.cards().chunks(COLUMNS) {
        let line: Vec<String> = row
            .iter()
            .map(|card| format!("{:>3} {:<8}", card.id().to_string(), card.kind().to_string()))
            .collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}
