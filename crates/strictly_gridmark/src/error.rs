//! Error types for construction, moves, observers and persistence.

use crate::position::Position;
use crate::types::GameStatus;
use derive_more::{Display, Error, From};
use tracing::instrument;

/// Invalid game configuration, reported by construction.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid configuration: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// A rejected move. The game state is unchanged when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveError {
    /// The game has already been won or drawn.
    #[display("Game is already over ({})", _0)]
    GameAlreadyOver(GameStatus),

    /// The coordinates are outside the board.
    #[display("Position ({}, {}) is outside the {}x{} grid", row, col, size, size)]
    OutOfBounds {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
        /// Board side length.
        size: usize,
    },

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(Position),
}

impl std::error::Error for MoveError {}

/// A saved game could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Load failed: {} at {}:{}", message, file, line)]
pub struct LoadError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LoadError {
    /// Creates a new load error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<ConfigError> for LoadError {
    #[track_caller]
    fn from(err: ConfigError) -> Self {
        Self::new(format!("Saved configuration is invalid: {}", err.message))
    }
}

/// Failure reported by an observer while handling a notification.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Observer failed: {}", message)]
pub struct ObserverError {
    /// Error message.
    pub message: String,
}

impl std::error::Error for ObserverError {}

impl ObserverError {
    /// Creates a new observer error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Discriminant of a [`GameError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum GameErrorKind {
    /// Bad construction parameters.
    InvalidConfiguration,
    /// Move coordinates outside the board.
    OutOfBounds,
    /// Move onto an occupied square.
    CellOccupied,
    /// Move after the game ended.
    GameAlreadyOver,
    /// Saved game could not be loaded.
    LoadFailed,
}

/// Any error produced by the game core.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum GameError {
    /// Construction failed.
    #[display("{}", _0)]
    Config(ConfigError),
    /// A move was rejected.
    #[display("{}", _0)]
    Move(MoveError),
    /// A load was rejected.
    #[display("{}", _0)]
    Load(LoadError),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Config(err) => Some(err),
            GameError::Move(err) => Some(err),
            GameError::Load(err) => Some(err),
        }
    }
}

impl GameError {
    /// Returns the kind of failure.
    pub fn kind(&self) -> GameErrorKind {
        match self {
            GameError::Config(_) => GameErrorKind::InvalidConfiguration,
            GameError::Move(MoveError::OutOfBounds { .. }) => GameErrorKind::OutOfBounds,
            GameError::Move(MoveError::CellOccupied(_)) => GameErrorKind::CellOccupied,
            GameError::Move(MoveError::GameAlreadyOver(_)) => GameErrorKind::GameAlreadyOver,
            GameError::Load(_) => GameErrorKind::LoadFailed,
        }
    }
}
