//! Grid coordinates for moves.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A zero-based `(row, col)` coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("({}, {})", row, col)]
pub struct Position {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Converts signed coordinates, rejecting negatives.
    pub fn from_signed(row: i64, col: i64) -> Option<Self> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        Some(Self::new(row, col))
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Failure to parse a position from text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Invalid position '{}': expected \"row col\"", input)]
pub struct ParsePositionError {
    /// The rejected input.
    pub input: String,
}

impl std::error::Error for ParsePositionError {}

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parses `"row col"` or `"row,col"`.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError {
            input: s.to_string(),
        };
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        match parts.as_slice() {
            [row, col] => {
                let row = row.parse::<usize>().map_err(|_| err())?;
                let col = col.parse::<usize>().map_err(|_| err())?;
                Ok(Self::new(row, col))
            }
            _ => Err(err()),
        }
    }
}
