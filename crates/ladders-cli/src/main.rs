//! Ladders command-line driver.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use cli::{Cli, Command};
use commands::PlayOptions;

fn main() -> Result<()> {
    // Initialize tracing on stderr so game output stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Play {
            preset,
            board_file,
            players,
            player,
            dice,
            seed,
            json,
        } => commands::play(
            config,
            PlayOptions {
                preset,
                board_file,
                players,
                player,
                dice,
                seed,
                json,
            },
        ),
        Command::Board {
            preset,
            rows,
            cols,
            connections,
            skip_tiles,
            output,
        } => commands::board(preset, rows, cols, &connections, &skip_tiles, output.as_deref()),
        Command::Roster {
            player,
            output,
            check,
        } => commands::roster(&player, output.as_deref(), check.as_deref()),
    }
}
