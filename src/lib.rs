// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod game;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod word_source;

// Re-export commonly used items for easier testing
pub use game::{GameError, GameStatus, HangmanGame, InvalidInput, Phase};
pub use game_state::{GameInterface, game_loop};
pub use word_source::{
    WordProvider, WordSource, WordSourceError, load_word_list_from_file, load_word_list_from_str,
};
