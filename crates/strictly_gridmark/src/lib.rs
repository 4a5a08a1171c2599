//! Strictly Gridmark - K-in-a-row on an N x N board
//!
//! Two players alternately claim squares; the first to align `win_length`
//! of their marks horizontally, vertically or diagonally wins, and a full
//! board without such a line is a draw.
//!
//! # Architecture
//!
//! - **GameState**: owns the board, validates and applies moves, derives status
//! - **Rules**: pure win/draw checks over a board
//! - **Observers**: synchronous callbacks after every move and reset
//! - **Snapshot**: the persisted fields, with JSON encode/decode
//!
//! The crate holds no I/O handles and never prints. Diagnostics go through
//! `tracing` and stay silent unless the host installs a subscriber.
//!
//! # Example
//!
//! ```
//! use strictly_gridmark::{GameState, GameStatus, Player, Position};
//!
//! let mut game = GameState::new(3, 3, Player::X)?;
//! game.apply_move(Position::new(1, 1))?;
//! assert_eq!(game.current_player(), Player::O);
//! assert_eq!(game.status(), GameStatus::InProgress);
//! # Ok::<(), strictly_gridmark::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod error;
mod game;
mod observer;
mod position;
mod snapshot;
mod types;

pub mod rules;

// Crate-level exports - Domain types
pub use position::{ParsePositionError, Position};
pub use types::{Board, GameStatus, Player, Square};

// Crate-level exports - Configuration
pub use config::GameConfig;

// Crate-level exports - State machine
pub use game::GameState;

// Crate-level exports - Observers
pub use observer::{GameObserver, Notification, ObserverFailure, ObserverHandle};

// Crate-level exports - Persistence
pub use snapshot::{GameSnapshot, SNAPSHOT_FORMAT};

// Crate-level exports - Errors
pub use error::{ConfigError, GameError, GameErrorKind, LoadError, MoveError, ObserverError};
