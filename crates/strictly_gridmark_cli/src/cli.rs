//! Command-line interface for gridmark.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_gridmark::Player;

/// Gridmark - K-in-a-row on an N x N board
#[derive(Parser, Debug)]
#[command(name = "gridmark")]
#[command(about = "Play generalized tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on stdin/stdout
    Play {
        /// Board side length (overrides the settings file)
        #[arg(short, long)]
        size: Option<usize>,

        /// Marks in a row needed to win (overrides the settings file)
        #[arg(short, long)]
        win_length: Option<usize>,

        /// Player who moves first: x or o (overrides the settings file)
        #[arg(short, long)]
        first: Option<Player>,

        /// Path to a TOML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Resume a saved game instead of starting a new one
        #[arg(short, long)]
        load: Option<PathBuf>,
    },

    /// Print the board and status of a saved game
    Show {
        /// Saved game file
        path: PathBuf,
    },
}
