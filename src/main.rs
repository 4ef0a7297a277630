use hangman::cli::{CliInterface, parse_cli};
use hangman::config::Config;
use hangman::tui::TuiInterface;
use hangman::{HangmanGame, game_loop, logging};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    let dotenv = dotenvy::dotenv();
    logging::init();
    if let Err(e) = dotenv {
        log::debug!("no .env loaded: {e}");
    }

    let config = Config::from_env(&cli);
    let source = match config.word_source() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut game = HangmanGame::new(source);

    // game_loop takes the interface by value, so the TUI restores the terminal before
    // any error below is printed.
    let result = if config.tui {
        match TuiInterface::new() {
            Ok(interface) => game_loop(&mut game, interface),
            Err(e) => {
                eprintln!("Failed to start terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        game_loop(&mut game, CliInterface::new(io::stdin().lock()))
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
