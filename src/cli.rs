use crate::debug_log;
use crate::game_state::GameInterface;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Hangman: guess the hidden word one letter and position at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list used when the remote lookup fails
    #[arg(short = 'i', long = "input")]
    pub word_list_path: Option<PathBuf>,

    /// Never contact the remote word provider
    #[arg(long)]
    pub offline: bool,

    /// Random-word API endpoint
    #[arg(long, default_value = crate::config::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Word category requested from the API
    #[arg(long, default_value = crate::config::DEFAULT_CATEGORY)]
    pub category: String,

    /// Remote lookup timeout in milliseconds
    #[arg(long = "timeout-ms", default_value_t = crate::config::DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Line-oriented implementation of [`GameInterface`] over any reader and writer.
pub struct CliInterface<R: BufRead, W: Write = io::Stdout> {
    reader: R,
    writer: W,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            writer: io::stdout(),
        }
    }
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn with_writer(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        if let Err(e) = write!(self.writer, "{prompt}").and_then(|()| self.writer.flush()) {
            debug_log!("failed to write prompt: {}", e);
        }
        // Non-UTF-8 lines are decoded lossily so validation rejects them; only EOF ends input.
        let mut input = Vec::new();
        match self.reader.read_until(b'\n', &mut input) {
            Ok(0) => None,
            Ok(_) => {
                let line = String::from_utf8_lossy(&input);
                Some(line.trim_end_matches(['\r', '\n']).to_string())
            }
            Err(e) => {
                log::warn!("failed to read input: {e}");
                None
            }
        }
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{line}") {
            debug_log!("failed to write line: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["hangman"]).unwrap();
        assert_eq!(cli.word_list_path, None);
        assert!(!cli.offline);
        assert!(!cli.tui);
        assert_eq!(cli.endpoint, crate::config::DEFAULT_ENDPOINT);
        assert_eq!(cli.category, "noun");
        assert_eq!(cli.timeout_ms, 2000);
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli = Cli::try_parse_from([
            "hangman",
            "-i",
            "words.txt",
            "--offline",
            "--category",
            "verb",
            "--timeout-ms",
            "500",
            "--tui",
        ])
        .unwrap();
        assert_eq!(cli.word_list_path, Some(PathBuf::from("words.txt")));
        assert!(cli.offline);
        assert!(cli.tui);
        assert_eq!(cli.category, "verb");
        assert_eq!(cli.timeout_ms, 500);
    }

    #[test]
    fn test_parse_cli_rejects_bad_timeout() {
        assert!(Cli::try_parse_from(["hangman", "--timeout-ms", "soon"]).is_err());
    }

    #[test]
    fn test_read_line_writes_prompt_and_strips_newline() {
        let mut interface = CliInterface::with_writer(Cursor::new("  2 \r\n"), Vec::new());
        assert_eq!(interface.read_line("place: "), Some("  2 ".to_string()));
        assert_eq!(interface.into_writer(), b"place: ".to_vec());
    }

    #[test]
    fn test_read_line_end_of_input() {
        let mut interface = CliInterface::with_writer(Cursor::new(""), Vec::new());
        assert_eq!(interface.read_line("letter: "), None);
    }

    #[test]
    fn test_read_line_empty_line_is_not_end_of_input() {
        let mut interface = CliInterface::with_writer(Cursor::new("\nA\n"), Vec::new());
        assert_eq!(interface.read_line("letter: "), Some(String::new()));
        assert_eq!(interface.read_line("letter: "), Some("A".to_string()));
    }

    #[test]
    fn test_read_line_invalid_utf8_is_still_a_line() {
        let mut interface = CliInterface::with_writer(Cursor::new(b"\xff\xfe\n1\n".to_vec()), Vec::new());
        assert_eq!(interface.read_line("place: "), Some("\u{fffd}\u{fffd}".to_string()));
        assert_eq!(interface.read_line("place: "), Some("1".to_string()));
        assert_eq!(interface.read_line("place: "), None);
    }

    #[test]
    fn test_display_board_format() {
        let mut interface = CliInterface::with_writer(Cursor::new(""), Vec::new());
        interface.display_board(7, "C 2 3");
        let output = String::from_utf8(interface.into_writer()).unwrap();
        assert_eq!(output, "\nremaining tries: 7\nguessed letters: C 2 3\n");
    }
}
