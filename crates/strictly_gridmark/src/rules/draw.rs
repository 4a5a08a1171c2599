//! Draw detection.

use super::win::check_winner;
use crate::types::Board;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A full board on which nobody has `win_length` in a row.
#[instrument(skip(board), fields(size = board.size()))]
pub fn is_draw(board: &Board, win_length: usize) -> bool {
    is_full(board) && check_winner(board, win_length).is_none()
}
