//! Difficulty levels and per-difficulty tallies.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::HangmanError;

/// Game difficulty, which fixes the number of lives.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Ten lives.
    Easy,
    /// Six lives.
    Middle,
    /// Three lives.
    Hard,
}

impl Difficulty {
    /// Lives granted at the start of a game.
    pub fn max_lives(self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Middle => 6,
            Self::Hard => 3,
        }
    }

    /// Parses a difficulty name (`easy`, `middle`, `hard`).
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::InvalidDifficulty`] for any other name.
    pub fn parse(name: &str) -> Result<Self, HangmanError> {
        name.trim()
            .to_lowercase()
            .parse()
            .map_err(|_| HangmanError::InvalidDifficulty(name.to_string()))
    }

    /// All difficulties, easiest first.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// A counter kept separately for each difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTally {
    /// Count for easy games.
    pub easy: u32,
    /// Count for middle games.
    pub middle: u32,
    /// Count for hard games.
    pub hard: u32,
}

impl DifficultyTally {
    /// Returns the count for `difficulty`.
    pub fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Middle => self.middle,
            Difficulty::Hard => self.hard,
        }
    }

    /// Mutable access to the count for `difficulty`.
    pub fn get_mut(&mut self, difficulty: Difficulty) -> &mut u32 {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Middle => &mut self.middle,
            Difficulty::Hard => &mut self.hard,
        }
    }

    /// Sets every count to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lives_per_difficulty() {
        assert_eq!(Difficulty::Easy.max_lives(), 10);
        assert_eq!(Difficulty::Middle.max_lives(), 6);
        assert_eq!(Difficulty::Hard.max_lives(), 3);
    }

    #[test]
    fn parses_names() {
        assert_eq!(Difficulty::parse("easy").ok(), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse(" Hard ").ok(), Some(Difficulty::Hard));
        assert!(matches!(
            Difficulty::parse("medium"),
            Err(HangmanError::InvalidDifficulty(name)) if name == "medium"
        ));
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(Difficulty::Middle.to_string(), "middle");
    }
}
