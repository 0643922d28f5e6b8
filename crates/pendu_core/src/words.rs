//! Word bank: secret words by language and difficulty.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use derive_more::{Display, Error};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::normalize::normalize_character;
use crate::{Chooser, Difficulty, HangmanError, ThreadRngChooser};

/// Word list shipped with the crate.
pub const DEFAULT_WORDS: &str = include_str!("../words.toml");

/// Source of secret words.
pub trait WordBank: Send + Sync {
    /// Draws a word for `difficulty` in `language`.
    ///
    /// The normalized form of every letter of the returned word is an
    /// ASCII letter.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::InvalidLanguage`] when the language is unknown.
    fn draw_word(&self, difficulty: Difficulty, language: &str) -> Result<String, HangmanError>;

    /// Language used when the caller does not pick one.
    fn default_language(&self) -> &str;

    /// Known language tags.
    fn languages(&self) -> Vec<String>;
}

/// Error raised while loading a word list.
#[derive(Debug, Clone, Display, Error)]
#[display("Word list error: {} at {}:{}", message, file, line)]
pub struct WordListError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl WordListError {
    /// Creates a new word list error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Words of one language, split by difficulty.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageWords {
    easy: Vec<String>,
    middle: Vec<String>,
    hard: Vec<String>,
}

impl LanguageWords {
    fn for_difficulty(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Middle => &self.middle,
            Difficulty::Hard => &self.hard,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WordFile {
    default_language: String,
    languages: BTreeMap<String, LanguageWords>,
}

/// Word bank backed by a TOML word list.
#[derive(Clone)]
pub struct TomlWordBank {
    default_language: String,
    languages: BTreeMap<String, LanguageWords>,
    chooser: Arc<dyn Chooser>,
}

impl std::fmt::Debug for TomlWordBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TomlWordBank")
            .field("default_language", &self.default_language)
            .field("languages", &self.languages.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TomlWordBank {
    /// Loads the embedded word list with a random chooser.
    ///
    /// # Errors
    ///
    /// Returns [`WordListError`] if the embedded list is malformed.
    pub fn embedded() -> Result<Self, WordListError> {
        Self::from_toml_str(DEFAULT_WORDS, Arc::new(ThreadRngChooser))
    }

    /// Loads a word list from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`WordListError`] if the file cannot be read or is invalid.
    #[instrument(skip(path, chooser), fields(path = %path.as_ref().display()))]
    pub fn from_file(
        path: impl AsRef<Path>,
        chooser: Arc<dyn Chooser>,
    ) -> Result<Self, WordListError> {
        debug!("Loading word list from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| WordListError::new(format!("Failed to read word list: {}", e)))?;
        Self::from_toml_str(&content, chooser)
    }

    /// Parses and validates a TOML word list.
    ///
    /// Every language must have words at every difficulty, and every letter
    /// of every word must fold to an ASCII letter.
    ///
    /// # Errors
    ///
    /// Returns [`WordListError`] when the list is malformed.
    #[instrument(skip(content, chooser))]
    pub fn from_toml_str(content: &str, chooser: Arc<dyn Chooser>) -> Result<Self, WordListError> {
        let file: WordFile = toml::from_str(content)
            .map_err(|e| WordListError::new(format!("Failed to parse word list: {}", e)))?;

        if !file.languages.contains_key(&file.default_language) {
            return Err(WordListError::new(format!(
                "Default language '{}' has no words",
                file.default_language
            )));
        }

        for (language, words) in &file.languages {
            for difficulty in Difficulty::all() {
                let list = words.for_difficulty(difficulty);
                if list.is_empty() {
                    return Err(WordListError::new(format!(
                        "No {} words for language '{}'",
                        difficulty, language
                    )));
                }
                if let Some(bad) = list.iter().find(|w| !is_playable(w)) {
                    warn!(language = %language, word = %bad, "Unplayable word in list");
                    return Err(WordListError::new(format!(
                        "Word '{}' ({}) has letters without an ASCII base",
                        bad, language
                    )));
                }
            }
        }

        info!(
            languages = file.languages.len(),
            default_language = %file.default_language,
            "Word list loaded"
        );

        Ok(Self {
            default_language: file.default_language,
            languages: file.languages,
            chooser,
        })
    }
}

/// A word is playable when it has at least one letter and every letter
/// folds to an ASCII letter.
fn is_playable(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
        && word
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| normalize_character(c).is_some_and(|n| n.is_ascii_lowercase()))
}

impl WordBank for TomlWordBank {
    #[instrument(skip(self))]
    fn draw_word(&self, difficulty: Difficulty, language: &str) -> Result<String, HangmanError> {
        let words = self
            .languages
            .get(language)
            .ok_or_else(|| HangmanError::InvalidLanguage(language.to_string()))?
            .for_difficulty(difficulty);
        let word = words[self.chooser.pick(words.len())].clone();
        debug!(length = word.chars().count(), "Word drawn");
        Ok(word)
    }

    fn default_language(&self) -> &str {
        &self.default_language
    }

    fn languages(&self) -> Vec<String> {
        self.languages.keys().cloned().collect()
    }
}
