//! Hint economy, loss condition and the per-difficulty progress gauge.
//!
//! The gauge thresholds are domain constants: dashboards built on top of
//! this crate key their colours and labels off them.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::Difficulty;

/// Lives consumed by one hint.
pub const HINT_COST: u32 = 1;

/// Lives a hint must leave untouched.
pub const HINT_RESERVED_LIVES: u32 = 1;

/// Number of cells in the crystal bar shown for middle games.
pub const CRYSTAL_CELLS: u32 = 20;

/// Whether a hint may be bought with `lives` remaining.
pub fn hint_allowed(lives: u32) -> bool {
    lives > HINT_RESERVED_LIVES
}

/// Whether a game with `lives` remaining is lost.
pub fn is_lost(lives: u32) -> bool {
    lives == 0
}

/// Crystal condition for middle games, by errors used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum CrystalState {
    /// No error yet.
    #[strum(to_string = "Perfect crystal")]
    Perfect,
    /// Up to a third of the lives used.
    #[strum(to_string = "Solid crystal")]
    Solid,
    /// Up to two thirds of the lives used.
    #[strum(to_string = "Cracked crystal")]
    Cracked,
    /// More than two thirds used.
    #[strum(to_string = "Fragile crystal")]
    Fragile,
}

/// Countdown alert level for hard games, by lives remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum CountdownAlert {
    /// Three lives left.
    #[strum(to_string = "SECURE")]
    Secure,
    /// Two lives left.
    #[strum(to_string = "CAUTION")]
    Caution,
    /// One life or fewer.
    #[strum(to_string = "CRITICAL")]
    Critical,
}

/// Lives indicator, shaped by difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum ProgressGauge {
    /// Easy: one heart per life.
    Health {
        /// Lives left.
        remaining: u32,
        /// Lives at start.
        max: u32,
    },
    /// Middle: a bar of [`CRYSTAL_CELLS`] cells that drains.
    Crystal {
        /// Condition label.
        state: CrystalState,
        /// Filled cells.
        filled: u32,
        /// Lives left.
        remaining: u32,
        /// Lives at start.
        max: u32,
    },
    /// Hard: one star per life, spent ones explode.
    Countdown {
        /// Alert level.
        alert: CountdownAlert,
        /// Lives left.
        remaining: u32,
        /// Lives at start.
        max: u32,
    },
}

impl ProgressGauge {
    /// Builds the gauge for `errors_used` out of `max_lives`.
    pub fn new(errors_used: u32, max_lives: u32, difficulty: Difficulty) -> Self {
        let errors = errors_used.min(max_lives);
        let remaining = max_lives - errors;
        match difficulty {
            Difficulty::Easy => Self::Health {
                remaining,
                max: max_lives,
            },
            Difficulty::Middle => {
                let state = if errors == 0 {
                    CrystalState::Perfect
                } else if errors <= max_lives / 3 {
                    CrystalState::Solid
                } else if errors <= 2 * max_lives / 3 {
                    CrystalState::Cracked
                } else {
                    CrystalState::Fragile
                };
                let filled = if max_lives == 0 {
                    0
                } else {
                    remaining * CRYSTAL_CELLS / max_lives
                };
                Self::Crystal {
                    state,
                    filled,
                    remaining,
                    max: max_lives,
                }
            }
            Difficulty::Hard => {
                let alert = match remaining {
                    r if r >= 3 => CountdownAlert::Secure,
                    2 => CountdownAlert::Caution,
                    _ => CountdownAlert::Critical,
                };
                Self::Countdown {
                    alert,
                    remaining,
                    max: max_lives,
                }
            }
        }
    }

    /// Lives left.
    pub fn remaining(&self) -> u32 {
        match self {
            Self::Health { remaining, .. }
            | Self::Crystal { remaining, .. }
            | Self::Countdown { remaining, .. } => *remaining,
        }
    }

    /// Multi-line plain-text rendering.
    pub fn render(&self) -> String {
        match *self {
            Self::Health { remaining, max } => {
                let hearts = format!(
                    "{}{}",
                    "♥".repeat(remaining as usize),
                    "♡".repeat((max - remaining) as usize)
                );
                format!("SANITY\n[ {hearts} ]\n{remaining}/{max} attempts left")
            }
            Self::Crystal {
                state,
                filled,
                remaining,
                max,
            } => {
                let bar = format!(
                    "{}{}",
                    "█".repeat(filled as usize),
                    "░".repeat((CRYSTAL_CELLS - filled) as usize)
                );
                format!("{state}\n[{bar}]\n{remaining}/{max} hit points")
            }
            Self::Countdown {
                alert,
                remaining,
                max,
            } => {
                let markers: Vec<&str> = (0..max)
                    .map(|i| if i < max - remaining { "💥" } else { "⭐" })
                    .collect();
                format!("{alert}\n[ {} ]\n{remaining} chances left", markers.join(" "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_keeps_one_life_in_reserve() {
        assert!(!hint_allowed(0));
        assert!(!hint_allowed(1));
        assert!(hint_allowed(2));
    }

    #[test]
    fn crystal_thresholds() {
        let state = |errors| match ProgressGauge::new(errors, 6, Difficulty::Middle) {
            ProgressGauge::Crystal { state, .. } => state,
            other => panic!("unexpected gauge {other:?}"),
        };
        assert_eq!(state(0), CrystalState::Perfect);
        assert_eq!(state(1), CrystalState::Solid);
        assert_eq!(state(2), CrystalState::Solid);
        assert_eq!(state(3), CrystalState::Cracked);
        assert_eq!(state(4), CrystalState::Cracked);
        assert_eq!(state(5), CrystalState::Fragile);
    }

    #[test]
    fn crystal_bar_drains() {
        match ProgressGauge::new(1, 6, Difficulty::Middle) {
            ProgressGauge::Crystal { filled, .. } => assert_eq!(filled, 16),
            other => panic!("unexpected gauge {other:?}"),
        }
    }

    #[test]
    fn countdown_alerts() {
        let alert = |errors| match ProgressGauge::new(errors, 3, Difficulty::Hard) {
            ProgressGauge::Countdown { alert, .. } => alert,
            other => panic!("unexpected gauge {other:?}"),
        };
        assert_eq!(alert(0), CountdownAlert::Secure);
        assert_eq!(alert(1), CountdownAlert::Caution);
        assert_eq!(alert(2), CountdownAlert::Critical);
        assert_eq!(alert(3), CountdownAlert::Critical);
    }

    #[test]
    fn health_renders_one_heart_per_life() {
        let text = ProgressGauge::new(3, 10, Difficulty::Easy).render();
        assert!(text.contains(&"♥".repeat(7)));
        assert!(text.contains("7/10"));
    }
}
