//! TUI (Terminal User Interface) module for Hangman
//!
//! Full-screen frontend built on Ratatui. It implements the same [`GameInterface`] as the
//! line-oriented CLI, so the game loop does not know which one it is driving.
//!
//! # Layout
//! Title, board (slots plus remaining tries), message log, prompt line, instructions.
//!
//! # Input
//! `read_line` blocks on key events: printable characters edit the input, ENTER submits,
//! ESC or CTRL-C closes input, which the game loop treats as quitting.

use crate::game_state::GameInterface;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const MAX_LOG_LINES: usize = 200;
const MAX_INPUT_LEN: usize = 32;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, PartialEq, Eq)]
enum SlotView {
    Revealed(char),
    Hidden(String),
}

impl SlotView {
    fn colors(&self) -> (Color, Color) {
        match self {
            Self::Revealed(_) => (Color::Green, Color::Black),
            Self::Hidden(_) => (Color::DarkGray, Color::White),
        }
    }

    fn text(&self) -> String {
        match self {
            Self::Revealed(letter) => format!(" {letter} "),
            Self::Hidden(label) => format!(" {label} "),
        }
    }
}

/// Splits a rendered board ("C 2 3") back into revealed letters and position labels.
fn parse_board(board: &str) -> Vec<SlotView> {
    board
        .split_whitespace()
        .map(|token| {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_alphabetic() => SlotView::Revealed(c),
                _ => SlotView::Hidden(token.to_string()),
            }
        })
        .collect()
}

#[derive(Debug, PartialEq, Eq)]
enum InputOutcome {
    Pending,
    Submitted(String),
    Closed,
}

/// Everything the screen shows, kept apart from the terminal so it can be rendered
/// into any backend.
#[derive(Debug, Default)]
struct TuiState {
    remaining_tries: Option<u32>,
    slots: Vec<SlotView>,
    log: Vec<String>,
    prompt: String,
    input: String,
}

impl TuiState {
    fn push_log(&mut self, line: &str) {
        self.log.push(line.to_string());
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> InputOutcome {
        if key.kind != KeyEventKind::Press {
            return InputOutcome::Pending;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputOutcome::Closed;
        }
        match key.code {
            KeyCode::Esc => InputOutcome::Closed,
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.input);
                self.push_log(&format!("{}{}", self.prompt, input));
                InputOutcome::Submitted(input)
            }
            KeyCode::Backspace => {
                self.input.pop();
                InputOutcome::Pending
            }
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    && !c.is_control()
                    && self.input.chars().count() < MAX_INPUT_LEN =>
            {
                self.input.push(c);
                InputOutcome::Pending
            }
            _ => {
                debug_log!("handle_key() - Ignoring key: {:?}", key.code);
                InputOutcome::Pending
            }
        }
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Board
                Constraint::Min(3),    // Messages
                Constraint::Length(3), // Prompt
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        self.render_board(f, chunks[1]);
        self.render_log(f, chunks[2]);
        self.render_prompt(f, chunks[3]);
        Self::render_instructions(f, chunks[4]);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(&self, f: &mut Frame, area: Rect) {
        let mut slots = vec![Span::raw(" ")];
        for slot in &self.slots {
            let (bg, fg) = slot.colors();
            slots.push(Span::styled(slot.text(), Style::default().fg(fg).bg(bg)));
            slots.push(Span::raw(" "));
        }

        let tries = match self.remaining_tries {
            Some(tries) => Line::from(vec![
                Span::raw(" remaining tries: "),
                Span::styled(tries.to_string(), INFO_STYLE),
            ]),
            None => Line::from(" setting up..."),
        };

        let paragraph = Paragraph::new(vec![Line::from(slots), Line::from(""), tries])
            .block(Block::default().title("Word").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_log(&self, f: &mut Frame, area: Rect) {
        let visible = usize::from(area.height.saturating_sub(2));
        let skip = self.log.len().saturating_sub(visible);
        let lines: Vec<Line> = self
            .log
            .iter()
            .skip(skip)
            .map(|line| Line::from(Span::styled(line.as_str(), Self::log_style(line))))
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Messages").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn log_style(line: &str) -> Style {
        if line.starts_with("You win") {
            SUCCESS_STYLE
        } else if line.starts_with("You lose") || line.contains("wrong") || line.starts_with("Invalid") {
            ERROR_STYLE
        } else {
            MESSAGE_STYLE
        }
    }

    fn render_prompt(&self, f: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(self.prompt.as_str(), HEADER_STYLE),
            Span::raw(self.input.as_str()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new("Type your answer | ENTER: Submit | BACKSPACE: Erase | ESC: Quit")
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

/// Turns the `log` facade off while alive and restores the previous level on drop.
/// Log lines go to stderr, which would be drawn over the alternate screen.
struct QuietLogs {
    previous: log::LevelFilter,
}

impl QuietLogs {
    fn new() -> Self {
        let previous = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        Self { previous }
    }
}

impl Drop for QuietLogs {
    fn drop(&mut self) {
        log::set_max_level(self.previous);
    }
}

/// Main TUI interface component.
///
/// Owns the terminal for its lifetime and restores it on drop. Logging is silenced
/// until then.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    // Declared last so it is restored after the terminal has been cleaned up.
    _quiet: QuietLogs,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        let quiet = QuietLogs::new();
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            state: TuiState::default(),
            _quiet: quiet,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let state = &self.state;
        self.terminal.draw(|f| state.render(f))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }
}

impl GameInterface for TuiInterface {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.state.prompt = prompt.to_string();
        self.state.input.clear();
        loop {
            if self.draw().is_err() {
                info_log!("read_line() - Draw failed, closing input");
                return None;
            }
            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    log::warn!("failed to read terminal event: {e}");
                    return None;
                }
            };
            let Event::Key(key) = event else {
                continue;
            };
            match self.state.handle_key(key) {
                InputOutcome::Pending => {}
                InputOutcome::Submitted(input) => return Some(input),
                InputOutcome::Closed => {
                    info_log!("read_line() - Input closed by user");
                    return None;
                }
            }
        }
    }

    fn write_line(&mut self, line: &str) {
        if !line.is_empty() {
            self.state.push_log(line);
        }
        self.draw_or_log();
    }

    fn display_board(&mut self, remaining_tries: u32, board: &str) {
        self.state.remaining_tries = Some(remaining_tries);
        self.state.slots = parse_board(board);
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
