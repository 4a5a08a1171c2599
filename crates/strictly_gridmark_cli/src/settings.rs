//! Settings file for the terminal front end.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_gridmark::{GameConfig, Player};
use tracing::{debug, info, instrument};

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "gridmark.toml";

/// Front-end settings, loaded from TOML.
///
/// ```toml
/// [game]
/// size = 5
/// win_length = 4
/// starting_player = "O"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Game parameters; missing keys fall back to the classic game.
    #[serde(default)]
    game: GameConfig,
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::new(format!("Failed to read settings file: {}", e)))?;
        let settings = Self::from_toml(&content)?;
        info!(size = settings.game.size, win_length = settings.game.win_length, "Settings loaded");
        Ok(settings)
    }

    /// Parses settings from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content)
            .map_err(|e| SettingsError::new(format!("Failed to parse settings: {}", e)))
    }

    /// Loads `path` if given, else the default file if it exists, else defaults.
    #[instrument]
    pub fn discover(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_SETTINGS_FILE).exists() => {
                Self::from_file(DEFAULT_SETTINGS_FILE)
            }
            None => {
                debug!("No settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Game configuration with command-line overrides applied.
    ///
    /// A size override without a win length keeps K = N, the classic rule.
    pub fn game_config(
        &self,
        size: Option<usize>,
        win_length: Option<usize>,
        first: Option<Player>,
    ) -> GameConfig {
        let size_value = size.unwrap_or(self.game.size);
        let win_length = match (size, win_length) {
            (_, Some(win_length)) => win_length,
            (Some(size), None) => size,
            (None, None) => self.game.win_length,
        };
        GameConfig::new(
            size_value,
            win_length,
            first.unwrap_or(self.game.starting_player),
        )
    }
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings = Settings::from_toml("[game]\nsize = 5\n").unwrap();
        assert_eq!(settings.game().size, 5);
        assert_eq!(settings.game().win_length, 3);
        assert_eq!(settings.game().starting_player, Player::X);
    }

    #[test]
    fn test_empty_file_is_classic() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_starting_player_from_file() {
        let settings = Settings::from_toml("[game]\nstarting_player = \"O\"\n").unwrap();
        assert_eq!(settings.game().starting_player, Player::O);
    }

    #[test]
    fn test_bad_toml_rejected() {
        assert!(Settings::from_toml("[game\nsize = ").is_err());
        assert!(Settings::from_toml("[game]\nsize = \"big\"\n").is_err());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_toml("[game]\nsize = 5\nwin_length = 4\n").unwrap();

        let config = settings.game_config(None, None, Some(Player::O));
        assert_eq!((config.size, config.win_length), (5, 4));
        assert_eq!(config.starting_player, Player::O);

        let config = settings.game_config(Some(7), None, None);
        assert_eq!((config.size, config.win_length), (7, 7));

        let config = settings.game_config(Some(7), Some(5), None);
        assert_eq!((config.size, config.win_length), (7, 5));
    }
}
