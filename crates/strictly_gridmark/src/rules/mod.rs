//! Game rules for K-in-a-row grids.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! the state machine so the incremental check used after each move and the
//! whole-board scan used to validate saved games share one line-walking core.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{AXES, check_winner, has_line, run_length, winner_through};
