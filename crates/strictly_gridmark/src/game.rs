//! The game state machine.
//!
//! [`GameState`] owns the board and derives the status after every move.
//! Moves are validated in a fixed order (game over, bounds, occupancy) and a
//! rejected move leaves the state untouched. Every successful move and every
//! reset fans out to the registered observers.

use crate::config::GameConfig;
use crate::error::{ConfigError, MoveError};
use crate::observer::{Notification, ObserverHandle, ObserverRegistry};
use crate::position::Position;
use crate::rules::winner_through;
use crate::types::{Board, GameStatus, Player, Square};
use std::fmt;
use tracing::{debug, info, instrument};

/// Complete state of one game.
pub struct GameState {
    pub(crate) win_length: usize,
    pub(crate) board: Board,
    pub(crate) moves_played: usize,
    pub(crate) current_player: Player,
    pub(crate) status: GameStatus,
    observers: ObserverRegistry,
    last_notification: Option<Notification>,
}

// ─────────────────────────────────────────────────────────────
//  Construction
// ─────────────────────────────────────────────────────────────

impl GameState {
    /// Creates a game on a `size` x `size` board where `win_length` in a row wins.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `size` is zero or `win_length` is not in
    /// `1..=size`.
    #[instrument]
    pub fn new(
        size: usize,
        win_length: usize,
        starting_player: Player,
    ) -> Result<Self, ConfigError> {
        Self::from_config(&GameConfig::new(size, win_length, starting_player))
    }

    /// Creates a game from a validated configuration.
    #[instrument]
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            size = config.size,
            win_length = config.win_length,
            starting_player = %config.starting_player,
            "Creating new game"
        );
        Ok(Self::from_parts(
            config.win_length,
            Board::new(config.size),
            0,
            config.starting_player,
            GameStatus::InProgress,
        ))
    }

    /// Classic 3x3 game, three in a row to win.
    pub fn classic(starting_player: Player) -> Self {
        Self::from_parts(
            GameConfig::CLASSIC_SIZE,
            Board::new(GameConfig::CLASSIC_SIZE),
            0,
            starting_player,
            GameStatus::InProgress,
        )
    }

    /// Assembles a state without observers. Callers guarantee consistency.
    pub(crate) fn from_parts(
        win_length: usize,
        board: Board,
        moves_played: usize,
        current_player: Player,
        status: GameStatus,
    ) -> Self {
        Self {
            win_length,
            board,
            moves_played,
            current_player,
            status,
            observers: ObserverRegistry::default(),
            last_notification: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Moves and reset
// ─────────────────────────────────────────────────────────────

impl GameState {
    /// Places the current player's mark at `pos` and returns the new status.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`MoveError::GameAlreadyOver`] once the game is won or drawn
    /// - [`MoveError::OutOfBounds`] when `pos` is off the board
    /// - [`MoveError::CellOccupied`] when the square is taken
    #[instrument(skip(self), fields(player = %self.current_player, moves = self.moves_played))]
    pub fn apply_move(&mut self, pos: Position) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            debug!(status = ?self.status, "Move rejected, game over");
            return Err(MoveError::GameAlreadyOver(self.status));
        }

        if !self.board.contains(pos) {
            debug!("Move rejected, out of bounds");
            return Err(MoveError::OutOfBounds {
                row: i64::try_from(pos.row).unwrap_or(i64::MAX),
                col: i64::try_from(pos.col).unwrap_or(i64::MAX),
                size: self.size(),
            });
        }

        if !self.board.is_empty(pos) {
            debug!("Move rejected, square occupied");
            return Err(MoveError::CellOccupied(pos));
        }

        let player = self.current_player;
        self.board.set(pos, Square::Occupied(player));
        self.moves_played += 1;
        self.current_player = player.opponent();
        self.status = self.status_after(pos);

        info!(status = ?self.status, "Move applied");
        self.notify();
        Ok(self.status)
    }

    /// Like [`GameState::apply_move`], for front ends holding signed coordinates.
    ///
    /// Negative coordinates are reported as [`MoveError::OutOfBounds`] after
    /// the game-over check, preserving the validation order.
    #[instrument(skip(self))]
    pub fn apply_move_signed(&mut self, row: i64, col: i64) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameAlreadyOver(self.status));
        }
        let pos = Position::from_signed(row, col).ok_or(MoveError::OutOfBounds {
            row,
            col,
            size: self.size(),
        })?;
        self.apply_move(pos)
    }

    /// Status after a mark was placed at `pos`. A win takes precedence over a
    /// full board.
    fn status_after(&self, pos: Position) -> GameStatus {
        if let Some(winner) = winner_through(&self.board, pos, self.win_length) {
            return GameStatus::Won(winner);
        }
        if self.moves_played == self.size() * self.size() {
            return GameStatus::Draw;
        }
        GameStatus::InProgress
    }

    /// Clears the board for a new round. Size, win length and observers are kept.
    #[instrument(skip(self), fields(size = self.size()))]
    pub fn reset(&mut self, starting_player: Player) {
        self.board.clear();
        self.moves_played = 0;
        self.current_player = starting_player;
        self.status = GameStatus::InProgress;
        info!(%starting_player, "Game reset");
        self.notify();
    }
}

// ─────────────────────────────────────────────────────────────
//  Observers
// ─────────────────────────────────────────────────────────────

impl GameState {
    /// Registers an observer. Registering the same handle twice delivers twice.
    pub fn subscribe(&mut self, observer: ObserverHandle) {
        self.observers.subscribe(observer);
    }

    /// Removes one registration of `observer`. Unknown handles are a no-op.
    pub fn unsubscribe(&mut self, observer: &ObserverHandle) {
        self.observers.unsubscribe(observer);
    }

    /// Registered observers in notification order.
    pub fn subscribers(&self) -> &[ObserverHandle] {
        self.observers.as_slice()
    }

    /// Report from the most recent notification round, if any.
    pub fn last_notification(&self) -> Option<&Notification> {
        self.last_notification.as_ref()
    }

    fn notify(&mut self) {
        let report = self.observers.notify(self, self.status);
        self.last_notification = Some(report);
    }
}

// ─────────────────────────────────────────────────────────────
//  Queries
// ─────────────────────────────────────────────────────────────

impl GameState {
    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Consecutive marks needed to win.
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Player whose turn is next.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Current game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of marks placed since construction or the last reset.
    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Read-only view of the board.
    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("size", &self.size())
            .field("win_length", &self.win_length)
            .field("board", &self.board)
            .field("moves_played", &self.moves_played)
            .field("current_player", &self.current_player)
            .field("status", &self.status)
            .field("observers", &self.observers.len())
            .finish()
    }
}
