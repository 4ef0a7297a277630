use crate::game::{GameError, GameStatus, HangmanGame, Phase};
use crate::info_log;

pub const PLACE_PROMPT: &str = "place: ";
pub const LETTER_PROMPT: &str = "letter: ";
pub const REPLAY_PROMPT: &str = "Do you want to play again? (y/n) ";

/// Terminal collaborator the game loop talks to. `read_line` returns `None` once input
/// is closed, which ends play.
pub trait GameInterface {
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    fn write_line(&mut self, line: &str);

    fn display_board(&mut self, remaining_tries: u32, board: &str) {
        self.write_line("");
        self.write_line(&format!("remaining tries: {remaining_tries}"));
        self.write_line(&format!("guessed letters: {board}"));
    }

    fn display_outcome(&mut self, status: GameStatus, word: &str) {
        match status {
            GameStatus::Win => self.write_line("You win!"),
            GameStatus::Lose => self.write_line(&format!("You lose! The word was {word}.")),
            GameStatus::NotFinished => {}
        }
    }
}

impl<T: GameInterface + ?Sized> GameInterface for &mut T {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        (**self).read_line(prompt)
    }

    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }

    fn display_board(&mut self, remaining_tries: u32, board: &str) {
        (**self).display_board(remaining_tries, board);
    }

    fn display_outcome(&mut self, status: GameStatus, word: &str) {
        (**self).display_outcome(status, word);
    }
}

enum RoundEnd {
    Finished(GameStatus),
    InputClosed,
}

/// Plays rounds until the player declines a replay or input runs out. The only error
/// that escapes is a failed setup, which is fatal.
///
/// A game handed over mid-round is continued. A finished one is reset first.
pub fn game_loop<I: GameInterface>(game: &mut HangmanGame, mut interface: I) -> Result<(), GameError> {
    loop {
        match game.phase() {
            Phase::InProgress => {}
            Phase::Unset => game.setup_game()?,
            Phase::Won | Phase::Lost => {
                game.reset_game();
                game.setup_game()?;
            }
        }

        let status = match play_round(game, &mut interface)? {
            RoundEnd::Finished(status) => status,
            RoundEnd::InputClosed => {
                info_log!("input closed mid-round, stopping");
                return Ok(());
            }
        };
        let word = game
            .session()
            .word()
            .map(|w| w.as_str().to_string())
            .unwrap_or_default();
        interface.display_outcome(status, &word);

        if !wants_replay(&mut interface) {
            return Ok(());
        }
        game.reset_game();
    }
}

fn play_round<I: GameInterface>(game: &mut HangmanGame, interface: &mut I) -> Result<RoundEnd, GameError> {
    loop {
        interface.display_board(game.remaining_tries(), &game.render());

        let Some(input) = interface.read_line(PLACE_PROMPT) else {
            return Ok(RoundEnd::InputClosed);
        };
        let position = match game.validate_position(&input) {
            Ok(position) => position,
            Err(e) => {
                interface.write_line(&e.to_string());
                continue;
            }
        };

        let Some(input) = interface.read_line(LETTER_PROMPT) else {
            return Ok(RoundEnd::InputClosed);
        };
        let letter = match HangmanGame::validate_letter(&input) {
            Ok(letter) => letter,
            Err(e) => {
                interface.write_line(&e.to_string());
                continue;
            }
        };

        match game.evaluate_guess(position, letter) {
            Ok(()) => {}
            Err(GameError::WrongGuess) => interface.write_line(&GameError::WrongGuess.to_string()),
            Err(GameError::InvalidInput(e)) => {
                interface.write_line(&e.to_string());
                continue;
            }
            Err(e) => return Err(e),
        }

        match game.check_status()? {
            GameStatus::NotFinished => {}
            status => return Ok(RoundEnd::Finished(status)),
        }
    }
}

fn wants_replay<I: GameInterface>(interface: &mut I) -> bool {
    interface
        .read_line(REPLAY_PROMPT)
        .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y"))
}
