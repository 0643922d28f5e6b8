//! Request and response bodies of the REST API.

use pendu_core::{Achievement, Leaderboard, PlayerStats, Session, SessionStatus, StatsUpdate};
use serde::{Deserialize, Serialize};

/// `POST /api/player/login` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Player name.
    pub player_name: String,
    /// Password, hashed before storage.
    pub password: String,
}

/// `POST /api/game/start` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRequest {
    /// Player name.
    pub player_name: String,
    /// Password of an existing account.
    pub password: String,
    /// `easy`, `middle` or `hard`.
    pub difficulty: String,
    /// Word bank language; the bank default when absent.
    #[serde(default)]
    pub language: Option<String>,
}

/// `POST /api/game/guess` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRequest {
    /// Session id returned by start.
    pub game_id: String,
    /// Letter or whole word.
    #[serde(default)]
    pub guess: String,
    /// Buy a hint instead of guessing.
    #[serde(default)]
    pub hint_requested: bool,
}

/// Game state returned after every game call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResponse {
    /// Session id.
    pub game_id: String,
    /// `playing`, `won` or `lost`.
    pub status: SessionStatus,
    /// Masked word, or the full word once won.
    pub word_display: String,
    /// Wrong letters, alphabetical.
    pub wrong_letters: Vec<String>,
    /// Lives left.
    pub lives: u32,
    /// Lives at start.
    pub max_lives: u32,
    /// Message for the player.
    pub message: String,
    /// Gauge rendering, on a lost game.
    #[serde(default)]
    pub progress_art: Option<String>,
    /// Hints bought.
    pub hints_used: u32,
    /// Seconds played, once finished.
    #[serde(default)]
    pub game_time: Option<f64>,
    /// The secret word, once finished.
    #[serde(default)]
    pub secret_word: Option<String>,
    /// Achievements unlocked by this call.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_achievements: Vec<Achievement>,
}

impl GameResponse {
    /// Builds the response for `session` after a call.
    pub fn new(session: &Session, message: String, stats: Option<&StatsUpdate>) -> Self {
        let status = *session.status();
        let finished = status.is_finished();
        Self {
            game_id: session.id().clone(),
            status,
            word_display: session.word_display(),
            wrong_letters: session
                .wrong_letters()
                .iter()
                .map(char::to_string)
                .collect(),
            lives: *session.lives(),
            max_lives: session.max_lives(),
            message,
            progress_art: (status == SessionStatus::Lost).then(|| session.gauge().render()),
            hints_used: *session.hints_used(),
            game_time: if finished { *session.elapsed() } else { None },
            secret_word: finished.then(|| session.secret_word().clone()),
            new_achievements: stats
                .map(|update| update.new_achievements.clone())
                .unwrap_or_default(),
        }
    }
}

/// `GET /api/leaderboard` body: `[name, stats]` pairs per ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    /// Most games won.
    pub players_by_wins: Vec<(String, PlayerStats)>,
    /// Best win rate, at least three games.
    pub players_by_winrate: Vec<(String, PlayerStats)>,
    /// Fastest single win.
    pub players_by_speed: Vec<(String, PlayerStats)>,
}

impl From<Leaderboard> for LeaderboardResponse {
    fn from(board: Leaderboard) -> Self {
        let pairs = |players: Vec<PlayerStats>| -> Vec<(String, PlayerStats)> {
            players
                .into_iter()
                .map(|stats| (stats.player_id.clone(), stats))
                .collect()
        };
        Self {
            players_by_wins: pairs(board.by_wins),
            players_by_winrate: pairs(board.by_winrate),
            players_by_speed: pairs(board.by_speed),
        }
    }
}

/// Error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// What went wrong.
    pub detail: String,
}
