//! Hangman game engine.
//!
//! [`HangmanGame`] owns the single [`GameSession`] and moves it through
//! `Unset -> InProgress -> Won | Lost`, returning to `Unset` on [`HangmanGame::reset_game`].
//! The phase is never stored; it is derived from the session on every query.

use crate::word_source::{WordSource, WordSourceError, normalize_word, uppercase_letter};
use crate::{debug_log, info_log};
use std::fmt;
use thiserror::Error;

/// Tries granted per letter of the target word.
pub const TRIES_PER_LETTER: u32 = 3;

/// Target word: non-empty, uppercase letters, one slot per `char`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word(String);

impl Word {
    pub fn parse(raw: &str) -> Option<Self> {
        normalize_word(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letters (slots), not bytes.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn letter_at(&self, index: usize) -> Option<char> {
        self.0.chars().nth(index)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 1-based slot position that has been checked against the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position(usize);

impl Position {
    pub fn get(self) -> usize {
        self.0
    }

    fn index(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("Invalid place")]
    UnknownPosition(String),
    #[error("You've already guessed this letter correctly")]
    AlreadyRevealed(Position),
    #[error("Letter should be a single alphabetic character.")]
    NotALetter(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("can not set word: {0}")]
    CanNotSetWord(#[source] WordSourceError),
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error("Your guess was wrong, try again")]
    WrongGuess,
    #[error("game has not been set up")]
    NotSetUp,
    #[error("game is already set up")]
    AlreadySetUp,
    #[error("game is already over")]
    NotInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unset,
    InProgress,
    Won,
    Lost,
}

/// Result of [`HangmanGame::check_status`]. `NotFinished` means "keep playing".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Win,
    Lose,
    NotFinished,
}

impl GameStatus {
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::NotFinished)
    }
}

/// Ordered slots "1".."N", each unrevealed (`None`) or showing its letter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessBoard {
    slots: Vec<Option<char>>,
}

impl GuessBoard {
    fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `(label, revealed letter)` pairs in position order.
    pub fn slots(&self) -> impl Iterator<Item = (String, Option<char>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| ((i + 1).to_string(), *slot))
    }

    pub fn revealed(&self, position: Position) -> Option<char> {
        self.slots.get(position.index()).copied().flatten()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Looks up a slot by its label. Labels are the canonical decimal form only, so
    /// "01" or "+1" are not keys.
    fn lookup(&self, label: &str) -> Option<Position> {
        let n: usize = label.parse().ok()?;
        (n >= 1 && n <= self.slots.len() && n.to_string() == label).then_some(Position(n))
    }

    fn reveal(&mut self, position: Position, letter: char) {
        if let Some(slot) = self.slots.get_mut(position.index()) {
            *slot = Some(letter);
        }
    }

    pub fn render(&self) -> String {
        self.slots()
            .map(|(label, letter)| letter.map_or(label, String::from))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Word, board and remaining tries for one round. The default value is the
/// "not set up" session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSession {
    word: Option<Word>,
    board: GuessBoard,
    remaining_tries: u32,
}

impl GameSession {
    fn new(word: Word) -> Self {
        let len = word.len();
        Self {
            board: GuessBoard::with_len(len),
            remaining_tries: u32::try_from(len)
                .unwrap_or(u32::MAX)
                .saturating_mul(TRIES_PER_LETTER),
            word: Some(word),
        }
    }

    pub fn word(&self) -> Option<&Word> {
        self.word.as_ref()
    }

    pub fn board(&self) -> &GuessBoard {
        &self.board
    }

    pub fn remaining_tries(&self) -> u32 {
        self.remaining_tries
    }

    pub fn phase(&self) -> Phase {
        if self.word.is_none() {
            Phase::Unset
        } else if self.board.is_complete() {
            Phase::Won
        } else if self.remaining_tries == 0 {
            Phase::Lost
        } else {
            Phase::InProgress
        }
    }
}

pub struct HangmanGame {
    source: WordSource,
    session: GameSession,
}

impl HangmanGame {
    pub fn new(source: WordSource) -> Self {
        Self {
            source,
            session: GameSession::default(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn is_set_up(&self) -> bool {
        self.phase() != Phase::Unset
    }

    pub fn remaining_tries(&self) -> u32 {
        self.session.remaining_tries
    }

    pub fn setup_game(&mut self) -> Result<(), GameError> {
        if self.is_set_up() {
            return Err(GameError::AlreadySetUp);
        }
        let raw = self.source.fetch().map_err(GameError::CanNotSetWord)?;
        let word = Word::parse(&raw).ok_or(GameError::CanNotSetWord(WordSourceError::NoWordAvailable))?;
        debug_log!("new round, word is {}", word);
        self.session = GameSession::new(word);
        info_log!(
            "game set up: {} slots, {} tries",
            self.session.board.len(),
            self.session.remaining_tries
        );
        Ok(())
    }

    pub fn validate_position(&self, input: &str) -> Result<Position, InvalidInput> {
        let label = input.trim();
        let position = self
            .session
            .board
            .lookup(label)
            .ok_or_else(|| InvalidInput::UnknownPosition(label.to_string()))?;
        if self.session.board.revealed(position).is_some() {
            return Err(InvalidInput::AlreadyRevealed(position));
        }
        Ok(position)
    }

    pub fn validate_letter(input: &str) -> Result<char, InvalidInput> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                uppercase_letter(c).ok_or_else(|| InvalidInput::NotALetter(trimmed.to_string()))
            }
            _ => Err(InvalidInput::NotALetter(trimmed.to_string())),
        }
    }

    /// Charges one try, then reveals the slot if `letter` is right. A wrong letter still
    /// costs the try.
    pub fn evaluate_guess(&mut self, position: Position, letter: char) -> Result<(), GameError> {
        if self.phase() != Phase::InProgress {
            return Err(GameError::NotInProgress);
        }
        if position.get() == 0 || position.get() > self.session.board.len() {
            return Err(InvalidInput::UnknownPosition(position.to_string()).into());
        }
        if self.session.board.revealed(position).is_some() {
            return Err(InvalidInput::AlreadyRevealed(position).into());
        }

        let letter = uppercase_letter(letter).unwrap_or(letter);
        self.session.remaining_tries -= 1;

        let expected = self
            .session
            .word
            .as_ref()
            .and_then(|word| word.letter_at(position.index()));
        if expected == Some(letter) {
            self.session.board.reveal(position, letter);
            debug_log!("revealed {} at {}", letter, position);
            Ok(())
        } else {
            debug_log!("wrong guess {} at {}", letter, position);
            Err(GameError::WrongGuess)
        }
    }

    /// Win is checked before loss, so completing the word on the last try wins.
    pub fn check_status(&self) -> Result<GameStatus, GameError> {
        match self.phase() {
            Phase::Unset => Err(GameError::NotSetUp),
            Phase::Won => Ok(GameStatus::Win),
            Phase::Lost => Ok(GameStatus::Lose),
            Phase::InProgress => Ok(GameStatus::NotFinished),
        }
    }

    pub fn reset_game(&mut self) {
        self.session = GameSession::default();
    }

    pub fn render(&self) -> String {
        self.session.board.render()
    }
}
