//! Saved-game files.

use anyhow::{Context, Result};
use std::path::Path;
use strictly_gridmark::GameState;
use tracing::{info, instrument};

/// Writes the game to `path` as JSON.
#[instrument(skip(path, game), fields(path = %path.display(), moves = game.moves_played()))]
pub fn save_game(path: &Path, game: &GameState) -> Result<()> {
    let text = game.encode().context("Failed to encode game")?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Game saved");
    Ok(())
}

/// Reads a game saved by [`save_game`]. The returned game has no observers.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_game(path: &Path) -> Result<GameState> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let game = GameState::decode(&text)
        .with_context(|| format!("{} is not a valid saved game", path.display()))?;
    info!(size = game.size(), status = ?game.status(), "Game loaded");
    Ok(game)
}
