//! Game construction parameters.

use crate::error::ConfigError;
use crate::types::Player;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Board size, win length and the player who moves first.
///
/// Deserializes with defaults for missing fields, so a settings file only
/// needs to name what it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board.
    pub size: usize,
    /// Consecutive marks needed to win.
    pub win_length: usize,
    /// Player who moves first.
    pub starting_player: Player,
}

impl GameConfig {
    /// Side length of the classic game.
    pub const CLASSIC_SIZE: usize = 3;

    /// Largest accepted side length. Keeps `size * size` squares allocatable.
    pub const MAX_SIZE: usize = 1024;

    /// Creates a configuration. Call [`GameConfig::validate`] before use.
    pub fn new(size: usize, win_length: usize, starting_player: Player) -> Self {
        Self {
            size,
            win_length,
            starting_player,
        }
    }

    /// Classic 3x3 board, three in a row to win.
    pub fn classic(starting_player: Player) -> Self {
        Self::new(Self::CLASSIC_SIZE, Self::CLASSIC_SIZE, starting_player)
    }

    /// Checks `1 <= size <= MAX_SIZE` and `1 <= win_length <= size`.
    #[instrument]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::new("Grid must be a positive size"));
        }
        if self.size > Self::MAX_SIZE {
            return Err(ConfigError::new(format!(
                "Grid size {} exceeds the maximum of {}",
                self.size,
                Self::MAX_SIZE
            )));
        }
        if self.win_length == 0 {
            return Err(ConfigError::new("Win length must be at least 1"));
        }
        if self.win_length > self.size {
            return Err(ConfigError::new(format!(
                "Win length {} exceeds grid size {}",
                self.win_length, self.size
            )));
        }
        debug!("Configuration valid");
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic(Player::X)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_classic() {
        let config = GameConfig::default();
        assert_eq!(config.size, 3);
        assert_eq!(config.win_length, 3);
        assert_eq!(config.starting_player, Player::X);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_size() {
        assert!(GameConfig::new(0, 0, Player::X).validate().is_err());
        assert!(GameConfig::new(0, 1, Player::X).validate().is_err());
    }

    #[test]
    fn test_rejects_win_length_above_size() {
        let err = GameConfig::new(3, 4, Player::O).validate().unwrap_err();
        assert!(err.message.contains("exceeds"));
    }

    #[test]
    fn test_rejects_size_above_max() {
        let err = GameConfig::new(GameConfig::MAX_SIZE + 1, 1, Player::X)
            .validate()
            .unwrap_err();
        assert!(err.message.contains("maximum"));
        assert!(GameConfig::new(usize::MAX, 1, Player::X).validate().is_err());
        assert!(GameConfig::new(GameConfig::MAX_SIZE, 5, Player::X).validate().is_ok());
    }

    #[test]
    fn test_accepts_win_length_equal_to_one() {
        assert!(GameConfig::new(1, 1, Player::X).validate().is_ok());
        assert!(GameConfig::new(5, 1, Player::X).validate().is_ok());
    }
}
