//! Terminal front end for strictly_gridmark.
//!
//! - **cli**: command-line arguments
//! - **settings**: TOML settings file with command-line overrides
//! - **console**: interactive session and the board-drawing observer
//! - **storage**: saved-game files

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod console;
pub mod settings;
pub mod storage;

pub use cli::{Cli, Command};
pub use console::{ConsoleCommand, ConsoleRenderer, Session, SharedOutput, render, user_message};
pub use settings::{DEFAULT_SETTINGS_FILE, Settings, SettingsError};
pub use storage::{load_game, save_game};
