//! Interactive console session.
//!
//! The board is drawn by [`ConsoleRenderer`], an observer that redraws after
//! every move and reset by reading the game back. [`Session`] turns input
//! lines into calls on the game and reports rejected moves as plain messages.

use crate::storage::{load_game, save_game};
use anyhow::{Result, anyhow};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use strictly_gridmark::{
    GameConfig, GameError, GameErrorKind, GameObserver, GameState, GameStatus, ObserverError,
    ObserverHandle, Player,
};
use tracing::{debug, info, instrument, warn};

/// Output shared between the renderer and the session.
pub type SharedOutput = Arc<Mutex<dyn Write + Send>>;

const HELP: &str = "\
Commands:
  <row> <col>        place your mark (zero-based)
  save <file>        save the game
  open <file>        load a saved game
  restart [x|o]      start a new round
  size <n> [k]       new game on an n x n board, k in a row to win
  help               show this text
  quit               leave";

/// Writes the board and the status line for `game`.
pub fn render(out: &mut dyn Write, game: &GameState) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", game.board())?;
    match game.status() {
        GameStatus::InProgress => writeln!(
            out,
            "{} to move ({} in a row wins)",
            game.current_player(),
            game.win_length()
        ),
        status => writeln!(out, "{}", status),
    }
}

/// Observer that redraws the board on every state change.
pub struct ConsoleRenderer {
    output: SharedOutput,
}

impl ConsoleRenderer {
    /// Creates a renderer writing to `output`.
    pub fn new(output: SharedOutput) -> Self {
        Self { output }
    }
}

impl GameObserver for ConsoleRenderer {
    fn on_state_changed(&self, game: &GameState, status: GameStatus) -> Result<(), ObserverError> {
        debug!(?status, "Rendering state change");
        let mut out = self
            .output
            .lock()
            .map_err(|_| ObserverError::new("console output lock poisoned"))?;
        render(&mut *out, game).map_err(|e| ObserverError::new(e.to_string()))
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Place a mark. Signed so negative input reaches the bounds check.
    Place {
        /// Row.
        row: i64,
        /// Column.
        col: i64,
    },
    /// Save to a file.
    Save(PathBuf),
    /// Load from a file.
    Open(PathBuf),
    /// Reset, optionally choosing who starts.
    Restart(Option<Player>),
    /// Start over on a different board.
    Resize {
        /// New side length.
        size: usize,
        /// New win length, defaults to the size.
        win_length: Option<usize>,
    },
    /// Show commands.
    Help,
    /// Leave the session.
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        // File commands take the rest of the line so paths may contain spaces.
        if let Some((word, rest)) = line.trim().split_once(char::is_whitespace) {
            let path = rest.trim();
            match word {
                "save" => return Ok(ConsoleCommand::Save(PathBuf::from(path))),
                "open" => return Ok(ConsoleCommand::Open(PathBuf::from(path))),
                _ => {}
            }
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let number = |word: &str| {
            word.parse::<usize>()
                .map_err(|_| format!("'{}' is not a number", word))
        };
        match words.as_slice() {
            ["restart"] => Ok(ConsoleCommand::Restart(None)),
            ["restart", player] => Player::from_str(*player)
                .map(|p| ConsoleCommand::Restart(Some(p)))
                .map_err(|_| format!("'{}' is not a player (x or o)", player)),
            ["size", size] => Ok(ConsoleCommand::Resize {
                size: number(*size)?,
                win_length: None,
            }),
            ["size", size, win_length] => Ok(ConsoleCommand::Resize {
                size: number(*size)?,
                win_length: Some(number(*win_length)?),
            }),
            ["help"] | ["?"] => Ok(ConsoleCommand::Help),
            ["quit"] | ["exit"] | ["q"] => Ok(ConsoleCommand::Quit),
            [row, col] => match (row.parse::<i64>(), col.parse::<i64>()) {
                (Ok(row), Ok(col)) => Ok(ConsoleCommand::Place { row, col }),
                _ => Err(format!("Unknown command '{}'. Type 'help'.", line.trim())),
            },
            _ => Err(format!("Unknown command '{}'. Type 'help'.", line.trim())),
        }
    }
}

/// Turns a core error into a message for the player.
pub fn user_message(err: &GameError) -> String {
    match err.kind() {
        GameErrorKind::OutOfBounds => format!("{}. Try another square.", err),
        GameErrorKind::CellOccupied => format!("{}. Try another square.", err),
        GameErrorKind::GameAlreadyOver => {
            "The game is over. Type 'restart' to play again.".to_string()
        }
        GameErrorKind::InvalidConfiguration => match err {
            GameError::Config(config) => format!("Cannot start that game: {}", config.message),
            other => other.to_string(),
        },
        GameErrorKind::LoadFailed => match err {
            GameError::Load(load) => format!("Cannot open that game: {}", load.message),
            other => other.to_string(),
        },
    }
}

/// Whether the session keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// An interactive game bound to an output.
pub struct Session {
    game: GameState,
    config: GameConfig,
    renderer: ObserverHandle,
    output: SharedOutput,
}

impl Session {
    /// Wraps `game`, subscribing a console renderer on `output`.
    ///
    /// `config` supplies the default starting player for restarts.
    pub fn new(mut game: GameState, config: GameConfig, output: SharedOutput) -> Self {
        let renderer: ObserverHandle = Arc::new(ConsoleRenderer::new(output.clone()));
        game.subscribe(renderer.clone());
        Self {
            game,
            config,
            renderer,
            output,
        }
    }

    /// The game being played.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Reads commands until `quit` or end of input.
    #[instrument(skip_all)]
    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        self.say(HELP)?;
        self.redraw()?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let flow = match line.parse::<ConsoleCommand>() {
                Ok(command) => self.handle(command)?,
                Err(message) => {
                    self.say(&message)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Stop {
                break;
            }
        }
        info!(status = ?self.game.status(), "Session ended");
        Ok(())
    }

    #[instrument(skip(self))]
    fn handle(&mut self, command: ConsoleCommand) -> Result<Flow> {
        match command {
            ConsoleCommand::Place { row, col } => {
                if let Err(err) = self.game.apply_move_signed(row, col) {
                    self.say(&user_message(&err.into()))?;
                }
            }
            ConsoleCommand::Save(path) => match save_game(&path, &self.game) {
                Ok(()) => self.say(&format!("Saved to {}", path.display()))?,
                Err(err) => {
                    warn!(error = %err, "Save failed");
                    self.say(&format!("Could not save: {:#}", err))?;
                }
            },
            ConsoleCommand::Open(path) => match load_game(&path) {
                Ok(loaded) => {
                    self.replace_game(loaded);
                    self.say(&format!("Opened {}", path.display()))?;
                    self.redraw()?;
                }
                Err(err) => {
                    warn!(error = %err, "Open failed");
                    self.say(&format!("Could not open: {:#}", err))?;
                }
            },
            ConsoleCommand::Restart(player) => {
                self.game.reset(player.unwrap_or(self.config.starting_player));
            }
            ConsoleCommand::Resize { size, win_length } => {
                let config = GameConfig::new(
                    size,
                    win_length.unwrap_or(size),
                    self.config.starting_player,
                );
                match GameState::from_config(&config) {
                    Ok(game) => {
                        self.config = config;
                        self.replace_game(game);
                        self.redraw()?;
                    }
                    Err(err) => self.say(&user_message(&err.into()))?,
                }
            }
            ConsoleCommand::Help => self.say(HELP)?,
            ConsoleCommand::Quit => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }

    /// Swaps in a new game and moves the renderer over to it.
    fn replace_game(&mut self, mut game: GameState) {
        self.game.unsubscribe(&self.renderer);
        game.subscribe(self.renderer.clone());
        self.game = game;
    }

    fn say(&self, message: &str) -> Result<()> {
        let mut out = self
            .output
            .lock()
            .map_err(|_| anyhow!("console output lock poisoned"))?;
        writeln!(out, "{}", message)?;
        Ok(())
    }

    fn redraw(&self) -> Result<()> {
        let mut out = self
            .output
            .lock()
            .map_err(|_| anyhow!("console output lock poisoned"))?;
        render(&mut *out, &self.game)?;
        Ok(())
    }
}
