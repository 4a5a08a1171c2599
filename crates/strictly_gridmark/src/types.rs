//! Core domain types for K-in-a-row grid games.

use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X (mark A).
    X,
    /// Player O (mark B).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Symbol used for this player's mark on a rendered board.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Symbol for this square: `X`, `O` or `.` when empty.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(player) => player.symbol(),
        }
    }

    /// Parses a square from its rendered symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Square::Empty),
            'X' => Some(Square::Occupied(Player::X)),
            'O' => Some(Square::Occupied(Player::O)),
            _ => None,
        }
    }
}

/// Square `size` x `size` board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Squares in row-major order.
    squares: Vec<Square>,
}

impl Board {
    /// Creates a new empty board. `size` must be at least 1 and at most
    /// [`GameConfig::MAX_SIZE`](crate::GameConfig::MAX_SIZE); callers
    /// validate through [`crate::GameConfig`].
    pub fn new(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size],
        }
    }

    /// Builds a board from rows of squares. Returns `None` unless every row
    /// has exactly as many squares as there are rows.
    pub fn from_rows(rows: Vec<Vec<Square>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            size,
            squares: rows.into_iter().flatten().collect(),
        })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks whether the position lies on the board.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Option<Square> {
        if !self.contains(pos) {
            return None;
        }
        self.squares.get(pos.row * self.size + pos.col).copied()
    }

    /// Sets the square at the given position. Out-of-board positions are ignored.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        if self.contains(pos) {
            let size = self.size;
            self.squares[pos.row * size + pos.col] = square;
        }
    }

    /// Resets every square to empty.
    pub(crate) fn clear(&mut self) {
        self.squares.fill(Square::Empty);
    }

    /// Checks if a square is empty. Off-board positions are never empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Iterates over the rows of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[Square]> {
        self.squares.chunks(self.size.max(1))
    }

    /// Number of squares holding the given player's mark.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Positions of every empty square, row by row.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.positions().filter(|pos| self.is_empty(*pos)).collect()
    }

    /// All positions on the board, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// Moves one step from `pos` along `(d_row, d_col)`, staying on the board.
    pub fn step(&self, pos: Position, d_row: isize, d_col: isize) -> Option<Position> {
        let row = pos.row.checked_add_signed(d_row)?;
        let col = pos.col.checked_add_signed(d_col)?;
        let next = Position::new(row, col);
        self.contains(next).then_some(next)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .map(|square| square.symbol().to_string())
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// True once the game has a winner or is drawn.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Won(player) => write!(f, "Player {} wins", player),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}
