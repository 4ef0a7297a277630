//! Runtime configuration assembled from command-line flags and the environment.

use crate::cli::Cli;
use crate::info_log;
use crate::word_source::{
    ApiWordProvider, EMBEDDED_WORD_LIST, WordProvider, WordSource, load_word_list_from_file,
    load_word_list_from_str,
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.api-ninjas.com/v1/randomword";
pub const DEFAULT_CATEGORY: &str = "noun";
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;
pub const API_KEY_ENV: &str = "HANGMAN_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read word list from '{}': {source}", path.display())]
    ReadWordList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub category: String,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` when running offline or without a credential.
    pub remote: Option<RemoteConfig>,
    /// Explicit word list; otherwise the user config file or the embedded list is used.
    pub word_list_path: Option<PathBuf>,
    pub tui: bool,
}

impl Config {
    /// `api_key` is the value of [`API_KEY_ENV`], if set.
    pub fn from_cli(cli: &Cli, api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        let remote = match (cli.offline, api_key) {
            (true, _) => None,
            (false, None) => {
                info_log!("{} not set, remote word lookup disabled", API_KEY_ENV);
                None
            }
            (false, Some(api_key)) => Some(RemoteConfig {
                endpoint: cli.endpoint.clone(),
                category: cli.category.clone(),
                api_key,
                timeout: Duration::from_millis(cli.timeout_ms),
            }),
        };
        Self {
            remote,
            word_list_path: cli.word_list_path.clone(),
            tui: cli.tui,
        }
    }

    pub fn from_env(cli: &Cli) -> Self {
        Self::from_cli(cli, std::env::var(API_KEY_ENV).ok())
    }

    pub fn load_local_words(&self) -> Result<Vec<String>, ConfigError> {
        if let Some(path) = &self.word_list_path {
            return read_word_list(path);
        }
        if let Some(path) = default_word_list_path().filter(|p| p.is_file()) {
            info_log!("using word list at {}", path.display());
            return read_word_list(&path);
        }
        Ok(load_word_list_from_str(EMBEDDED_WORD_LIST))
    }

    pub fn word_source(&self) -> Result<WordSource, ConfigError> {
        let local = self.load_local_words()?;
        let remote = self.remote.as_ref().and_then(|remote| {
            match ApiWordProvider::new(
                remote.endpoint.clone(),
                remote.category.clone(),
                remote.api_key.clone(),
                remote.timeout,
            ) {
                Ok(provider) => Some(Box::new(provider) as Box<dyn WordProvider>),
                Err(e) => {
                    log::warn!("could not build HTTP client, remote word lookup disabled: {e}");
                    None
                }
            }
        });
        Ok(WordSource::new(remote, local))
    }
}

/// `<config dir>/hangman/words.txt`, when the platform has a config directory.
pub fn default_word_list_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hangman").join("words.txt"))
}

fn read_word_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    load_word_list_from_file(path).map_err(|source| ConfigError::ReadWordList {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hangman").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_remote_enabled_with_key() {
        let config = Config::from_cli(&cli(&["--category", "verb", "--timeout-ms", "750"]), Some("k".into()));
        assert_eq!(
            config.remote,
            Some(RemoteConfig {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                category: "verb".to_string(),
                api_key: "k".to_string(),
                timeout: Duration::from_millis(750),
            })
        );
        assert!(!config.tui);
    }

    #[test]
    fn test_remote_disabled_without_key() {
        assert_eq!(Config::from_cli(&cli(&[]), None).remote, None);
        assert_eq!(Config::from_cli(&cli(&[]), Some("  ".into())).remote, None);
    }

    #[test]
    fn test_remote_disabled_offline() {
        let config = Config::from_cli(&cli(&["--offline", "--tui"]), Some("k".into()));
        assert_eq!(config.remote, None);
        assert!(config.tui);
    }

    #[test]
    fn test_explicit_word_list() {
        let path = std::env::temp_dir().join("hangman_config_test_words.txt");
        std::fs::write(&path, "orange\nkitten\n").unwrap();

        let config = Config::from_cli(&cli(&["-i", path.to_str().unwrap()]), None);
        assert_eq!(config.load_local_words().unwrap(), vec!["ORANGE", "KITTEN"]);

        let source = config.word_source().unwrap();
        assert_eq!(source.local_words(), ["ORANGE", "KITTEN"]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_word_list_is_an_error() {
        let path = std::env::temp_dir().join("hangman_config_missing_words.txt");
        let _ = std::fs::remove_file(&path);

        let config = Config::from_cli(&cli(&["-i", path.to_str().unwrap()]), None);
        let err = config.load_local_words().unwrap_err();
        assert!(matches!(err, ConfigError::ReadWordList { .. }));
        assert!(err.to_string().contains("hangman_config_missing_words.txt"));
    }

    #[test]
    fn test_default_word_list_path_shape() {
        if let Some(path) = default_word_list_path() {
            assert!(path.ends_with("hangman/words.txt"));
        }
    }
}
