//! Gridmark - terminal front end
//!
//! Plays K-in-a-row games on stdin/stdout and prints saved games.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use strictly_gridmark::{GameState, Player};
use strictly_gridmark_cli::{Cli, Command, Session, Settings, SharedOutput, load_game, render};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so the board on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            size,
            win_length,
            first,
            config,
            load,
        } => run_play(size, win_length, first, config, load),
        Command::Show { path } => run_show(&path),
    }
}

/// Run an interactive game
#[instrument]
fn run_play(
    size: Option<usize>,
    win_length: Option<usize>,
    first: Option<Player>,
    config: Option<PathBuf>,
    load: Option<PathBuf>,
) -> Result<()> {
    let settings = Settings::discover(config.as_deref())?;
    let game_config = settings.game_config(size, win_length, first);

    let game = match &load {
        Some(path) => load_game(path)?,
        None => GameState::from_config(&game_config).context("Cannot start game")?,
    };
    info!(size = game.size(), win_length = game.win_length(), "Starting session");

    let output: SharedOutput = Arc::new(Mutex::new(std::io::stdout()));
    let mut session = Session::new(game, game_config, output);
    session.run(std::io::stdin().lock())
}

/// Print a saved game
#[instrument]
fn run_show(path: &Path) -> Result<()> {
    let game = load_game(path)?;
    let mut stdout = std::io::stdout().lock();
    render(&mut stdout, &game)?;
    writeln!(stdout, "Moves played: {}", game.moves_played())?;
    Ok(())
}
