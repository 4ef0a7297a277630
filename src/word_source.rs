//! Target word acquisition.
//!
//! A [`WordSource`] asks an optional remote [`WordProvider`] first and falls back to a
//! local word list chosen uniformly at random.

use crate::debug_log;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const EMBEDDED_WORD_LIST: &str = include_str!("resources/words.txt");

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordSourceError {
    #[error("no word available: remote lookup failed and the local word list is empty")]
    NoWordAvailable,
}

/// Uppercase form of an alphabetic `c`, or `None` if `c` is not a letter or its uppercase
/// is more than one character (`ß` becomes "SS").
pub fn uppercase_letter(c: char) -> Option<char> {
    if !c.is_alphabetic() {
        return None;
    }
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}

/// Trims and uppercases `raw`, returning `None` unless the result is a non-empty run of
/// letters, one slot per character.
pub fn normalize_word(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.chars().map(uppercase_letter).collect()
}

pub fn load_word_list_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize_word).collect()
}

pub fn load_word_list_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_word(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Something that may be able to produce a word. A failed lookup is `None`, never a
/// panic or an error the caller has to handle.
pub trait WordProvider {
    fn fetch_word(&self) -> Option<String>;
}

impl<F> WordProvider for F
where
    F: Fn() -> Option<String>,
{
    fn fetch_word(&self) -> Option<String> {
        self()
    }
}

#[derive(Debug, Deserialize)]
struct RandomWordPayload {
    word: WordField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WordField {
    Single(String),
    List(Vec<String>),
}

/// Extracts the word from a random-word JSON payload, accepting both `{"word": "x"}`
/// and `{"word": ["x", ...]}`.
pub fn parse_word_payload(body: &str) -> Option<String> {
    let payload: RandomWordPayload = serde_json::from_str(body).ok()?;
    let word = match payload.word {
        WordField::Single(word) => word,
        WordField::List(words) => words.into_iter().next()?,
    };
    normalize_word(&word)
}

/// Random-word HTTP API client.
pub struct ApiWordProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    category: String,
    api_key: String,
}

impl ApiWordProvider {
    pub fn new(
        endpoint: impl Into<String>,
        category: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = client_builder(timeout).build()?;
        Ok(Self::with_client(client, endpoint, category, api_key))
    }

    pub fn with_client(
        client: reqwest::blocking::Client,
        endpoint: impl Into<String>,
        category: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            category: category.into(),
            api_key: api_key.into(),
        }
    }

    fn request_word(&self) -> Result<Option<String>, reqwest::Error> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("type", self.category.as_str())])
            .header("X-Api-Key", &self.api_key)
            .send()?
            .error_for_status()?;
        let body = response.text()?;
        Ok(parse_word_payload(&body))
    }
}

/// Both the connection and the whole request are bounded by `timeout`.
fn client_builder(timeout: Duration) -> reqwest::blocking::ClientBuilder {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
}

impl WordProvider for ApiWordProvider {
    fn fetch_word(&self) -> Option<String> {
        match self.request_word() {
            Ok(Some(word)) => Some(word),
            Ok(None) => {
                log::warn!("remote word lookup at {} returned a malformed payload", self.endpoint);
                None
            }
            Err(e) => {
                log::warn!("remote word lookup at {} failed: {e}", self.endpoint);
                None
            }
        }
    }
}

/// Remote-first word source with a local fallback list.
pub struct WordSource {
    remote: Option<Box<dyn WordProvider>>,
    local: Vec<String>,
}

impl WordSource {
    /// Local words are normalized and invalid entries dropped; an empty list is allowed
    /// and only matters once the remote provider also fails.
    pub fn new(remote: Option<Box<dyn WordProvider>>, local: Vec<String>) -> Self {
        let local = local.iter().filter_map(|w| normalize_word(w)).collect();
        Self { remote, local }
    }

    pub fn offline(local: Vec<String>) -> Self {
        Self::new(None, local)
    }

    pub fn local_words(&self) -> &[String] {
        &self.local
    }

    pub fn fetch(&self) -> Result<String, WordSourceError> {
        self.fetch_with_rng(&mut rand::thread_rng())
    }

    pub fn fetch_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, WordSourceError> {
        if let Some(word) = self.fetch_remote() {
            debug_log!("word source: using remote word");
            return Ok(word);
        }
        debug_log!("word source: falling back to {} local words", self.local.len());
        self.local
            .choose(rng)
            .cloned()
            .ok_or(WordSourceError::NoWordAvailable)
    }

    fn fetch_remote(&self) -> Option<String> {
        let provider = self.remote.as_ref()?;
        let raw = provider.fetch_word()?;
        let word = normalize_word(&raw);
        if word.is_none() {
            log::warn!("remote word {raw:?} is not a usable word, ignoring it");
        }
        word
    }
}
