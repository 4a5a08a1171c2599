//! Win detection.
//!
//! A line through a square is found by walking outward from it along one of
//! four axes until the mark changes or the edge is reached. Both directions
//! are walked all the way to the edge, including row and column zero.

use crate::position::Position;
use crate::types::{Board, Player, Square};
use tracing::{instrument, trace};

/// Axis directions as `(d_row, d_col)`: horizontal, vertical, main diagonal
/// and anti-diagonal. Each axis is walked in both signs.
pub const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Counts consecutive `mark` squares from `origin` (exclusive) in one direction.
fn walk(board: &Board, origin: Position, mark: Square, d_row: isize, d_col: isize) -> usize {
    let mut count = 0;
    let mut cursor = origin;
    while let Some(next) = board.step(cursor, d_row, d_col) {
        if board.get(next) != Some(mark) {
            break;
        }
        count += 1;
        cursor = next;
    }
    count
}

/// Length of the run of `player`'s marks through `origin` along `axis`,
/// counting `origin` itself.
pub fn run_length(board: &Board, origin: Position, player: Player, axis: (isize, isize)) -> usize {
    let mark = Square::Occupied(player);
    let (d_row, d_col) = axis;
    1 + walk(board, origin, mark, d_row, d_col) + walk(board, origin, mark, -d_row, -d_col)
}

/// Returns the owner of the square at `pos` if a line of at least
/// `win_length` of their marks passes through it.
#[instrument(skip(board), fields(size = board.size()))]
pub fn winner_through(board: &Board, pos: Position, win_length: usize) -> Option<Player> {
    let player = match board.get(pos)? {
        Square::Occupied(player) => player,
        Square::Empty => return None,
    };

    AXES.iter().find_map(|axis| {
        let run = run_length(board, pos, player, *axis);
        trace!(?axis, run, "Measured run");
        (run >= win_length).then_some(player)
    })
}

/// Checks whether `player` has `win_length` in a row anywhere on the board.
pub fn has_line(board: &Board, player: Player, win_length: usize) -> bool {
    board
        .positions()
        .filter(|pos| board.get(*pos) == Some(Square::Occupied(player)))
        .any(|pos| winner_through(board, pos, win_length).is_some())
}

/// Scans the whole board for a winner, row by row.
///
/// Agrees with [`winner_through`] on every board reachable by legal play,
/// where at most one player can own a line.
#[instrument(skip(board), fields(size = board.size()))]
pub fn check_winner(board: &Board, win_length: usize) -> Option<Player> {
    board
        .positions()
        .find_map(|pos| winner_through(board, pos, win_length))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: &[&str]) -> Board {
        let rows = rows
            .iter()
            .map(|row| row.chars().filter_map(Square::from_symbol).collect())
            .collect();
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new(3), 3), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_from(&["XXX", "...", "..."]);
        assert_eq!(check_winner(&board, 3), Some(Player::X));
        assert_eq!(winner_through(&board, Position::new(0, 2), 3), Some(Player::X));
    }

    #[test]
    fn test_winner_diagonal() {
        let board = board_from(&["O..", ".O.", "..O"]);
        assert_eq!(check_winner(&board, 3), Some(Player::O));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_from(&["..X", ".X.", "X.."]);
        assert_eq!(winner_through(&board, Position::new(1, 1), 3), Some(Player::X));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_from(&["XX.", "...", "..."]);
        assert_eq!(check_winner(&board, 3), None);
    }

    #[test]
    fn test_run_reaches_column_zero() {
        // Placing at the right end must count marks all the way back to col 0.
        let board = board_from(&["....", "XXX.", "....", "...."]);
        assert_eq!(run_length(&board, Position::new(1, 2), Player::X, (0, 1)), 3);
        assert_eq!(winner_through(&board, Position::new(1, 2), 3), Some(Player::X));
    }

    #[test]
    fn test_run_reaches_row_zero() {
        let board = board_from(&["O...", "O...", "O...", "...."]);
        assert_eq!(winner_through(&board, Position::new(2, 0), 3), Some(Player::O));
    }

    #[test]
    fn test_run_stops_at_gap() {
        let board = board_from(&["XX.XX", ".....", ".....", ".....", "....."]);
        assert_eq!(run_length(&board, Position::new(0, 1), Player::X, (0, 1)), 2);
        assert_eq!(check_winner(&board, 3), None);
    }

    #[test]
    fn test_run_stops_at_opponent() {
        let board = board_from(&["XOX", "...", "..."]);
        assert_eq!(run_length(&board, Position::new(0, 0), Player::X, (0, 1)), 1);
    }

    #[test]
    fn test_empty_square_has_no_winner() {
        let board = board_from(&["XX.", "...", "..."]);
        assert_eq!(winner_through(&board, Position::new(0, 2), 2), None);
    }

    #[test]
    fn test_has_line_per_player() {
        let board = board_from(&["XX.", "OOO", "X.."]);
        assert!(has_line(&board, Player::O, 3));
        assert!(!has_line(&board, Player::X, 3));
        assert!(has_line(&board, Player::X, 2));
    }
}
