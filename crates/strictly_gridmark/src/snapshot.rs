//! Save/load representation of a game.
//!
//! A [`GameSnapshot`] carries exactly the persisted fields: size, win length,
//! board, moves played, current player and status. Observers are never part
//! of it. Restoring validates the snapshot against the rules before a new
//! [`GameState`] is built, so a corrupt save never yields a half-loaded game.

use crate::config::GameConfig;
use crate::error::LoadError;
use crate::game::GameState;
use crate::rules::{has_line, is_draw};
use crate::types::{Board, GameStatus, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Format tag written into every snapshot.
pub const SNAPSHOT_FORMAT: &str = "strictly_gridmark/v1";

/// Persisted fields of a [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameSnapshot {
    /// Encoding identifier, always [`SNAPSHOT_FORMAT`].
    pub format: String,
    /// Side length of the board.
    pub size: usize,
    /// Consecutive marks needed to win.
    pub win_length: usize,
    /// One string per row using `X`, `O` and `.`.
    pub board: Vec<String>,
    /// Marks placed so far.
    pub moves_played: usize,
    /// Player whose turn is next.
    pub current_player: Player,
    /// Status at the time of saving.
    pub status: GameStatus,
}

impl GameSnapshot {
    /// Encodes the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Decodes a snapshot from JSON without validating it against the rules.
    #[instrument(skip(text), fields(len = text.len()))]
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        serde_json::from_str(text).map_err(|e| {
            warn!(error = %e, "Saved game is not a valid snapshot");
            LoadError::new(format!("Failed to parse saved game: {}", e))
        })
    }

    fn parse_board(&self) -> Result<Board, LoadError> {
        if self.board.len() != self.size {
            return Err(LoadError::new(format!(
                "Board has {} rows, expected {}",
                self.board.len(),
                self.size
            )));
        }
        let rows = self
            .board
            .iter()
            .map(|row| {
                row.chars()
                    .map(|symbol| {
                        Square::from_symbol(symbol).ok_or_else(|| {
                            LoadError::new(format!("Unknown square symbol '{}'", symbol))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Board::from_rows(rows).ok_or_else(|| {
            LoadError::new(format!("Board rows must all have {} squares", self.size))
        })
    }
}

/// Status a board must carry, derived by scanning it whole.
fn derive_status(board: &Board, win_length: usize) -> Result<GameStatus, LoadError> {
    let x_line = has_line(board, Player::X, win_length);
    let o_line = has_line(board, Player::O, win_length);
    match (x_line, o_line) {
        (true, true) => Err(LoadError::new("Both players have a winning line")),
        (true, false) => Ok(GameStatus::Won(Player::X)),
        (false, true) => Ok(GameStatus::Won(Player::O)),
        (false, false) if is_draw(board, win_length) => Ok(GameStatus::Draw),
        (false, false) => Ok(GameStatus::InProgress),
    }
}

/// Checks that mark counts and the turn are consistent with alternating play.
fn check_turn(board: &Board, current_player: Player, status: GameStatus) -> Result<(), LoadError> {
    let x = board.count(Player::X);
    let o = board.count(Player::O);
    let turn_ok = match x.abs_diff(o) {
        // Whoever started is unknown, either may be next.
        0 => true,
        // The player with more marks moved last.
        1 => {
            let last_mover = if x > o { Player::X } else { Player::O };
            current_player == last_mover.opponent()
        }
        _ => false,
    };
    if !turn_ok {
        return Err(LoadError::new(format!(
            "Mark counts X={} O={} do not fit {} to move",
            x, o, current_player
        )));
    }
    if let GameStatus::Won(winner) = status
        && current_player != winner.opponent()
    {
        return Err(LoadError::new(format!(
            "{} won but is also next to move",
            winner
        )));
    }
    Ok(())
}

impl GameState {
    /// Captures the persisted fields.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            format: SNAPSHOT_FORMAT.to_string(),
            size: self.size(),
            win_length: self.win_length,
            board: self
                .board
                .rows()
                .map(|row| row.iter().map(|square| square.symbol()).collect())
                .collect(),
            moves_played: self.moves_played,
            current_player: self.current_player,
            status: self.status,
        }
    }

    /// Builds a new game from a snapshot. The result has no observers.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the snapshot has a foreign format tag, an
    /// invalid configuration, a malformed board, or fields that contradict
    /// each other under the rules.
    #[instrument(skip(snapshot), fields(size = snapshot.size, win_length = snapshot.win_length))]
    pub fn restore(snapshot: GameSnapshot) -> Result<Self, LoadError> {
        if snapshot.format != SNAPSHOT_FORMAT {
            return Err(LoadError::new(format!(
                "Unsupported save format '{}'",
                snapshot.format
            )));
        }

        GameConfig::new(snapshot.size, snapshot.win_length, snapshot.current_player).validate()?;
        let board = snapshot.parse_board()?;

        let occupied = board.squares().iter().filter(|s| **s != Square::Empty).count();
        if occupied != snapshot.moves_played {
            return Err(LoadError::new(format!(
                "Moves played {} but {} squares are occupied",
                snapshot.moves_played, occupied
            )));
        }

        let derived = derive_status(&board, snapshot.win_length)?;
        if derived != snapshot.status {
            return Err(LoadError::new(format!(
                "Saved status {:?} does not match board ({:?})",
                snapshot.status, derived
            )));
        }

        check_turn(&board, snapshot.current_player, snapshot.status)?;

        debug!(moves = snapshot.moves_played, status = ?snapshot.status, "Snapshot validated");
        info!("Game restored from snapshot");
        Ok(GameState::from_parts(
            snapshot.win_length,
            board,
            snapshot.moves_played,
            snapshot.current_player,
            snapshot.status,
        ))
    }

    /// Encodes the game as JSON text.
    pub fn encode(&self) -> serde_json::Result<String> {
        self.snapshot().to_json()
    }

    /// Decodes JSON text produced by [`GameState::encode`].
    ///
    /// Builds a fresh value, so a failure leaves every existing game untouched.
    pub fn decode(text: &str) -> Result<Self, LoadError> {
        Self::restore(GameSnapshot::from_json(text)?)
    }
}
