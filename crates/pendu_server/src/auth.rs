//! Player accounts: name rules, password hashing and login.

use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use crate::{DbError, GameRepository, Player};

/// Shortest accepted player name, in characters.
pub const NAME_MIN_CHARS: usize = 2;
/// Longest accepted player name, in characters.
pub const NAME_MAX_CHARS: usize = 20;
/// Shortest accepted password, in characters.
pub const PASSWORD_MIN_CHARS: usize = 3;

/// Substrings refused anywhere in a player name, case-insensitively.
pub const FORBIDDEN_WORDS: &[&str] = &[
    "admin", "root", "system", "null", "undefined", "anonymous", "merde", "putain", "connard",
    "salaud", "fdp", "nazi", "hitler",
];

const INVALID_NAME: &str = "Invalid name: 2-20 characters (letters, digits, spaces only), no forbidden words";

/// Error raised by account operations.
#[derive(Debug, Clone, Display, Error, From)]
pub enum AuthError {
    /// Name or password does not meet the rules.
    #[display("{}", _0)]
    Validation(#[error(not(source))] String),

    /// Unknown player or wrong password.
    #[display("{}", _0)]
    Unauthorized(#[error(not(source))] String),

    /// Account storage failed.
    #[display("{}", _0)]
    #[from]
    Db(DbError),
}

/// How a login was resolved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LoginStatus {
    /// Account created for a player who already had statistics.
    Migrated,
    /// Account created for a new player.
    Registered,
    /// Existing account, password accepted.
    LoggedIn,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// How the login was resolved.
    pub status: LoginStatus,
    /// Message for the player.
    pub message: String,
}

/// Whether `name` is an acceptable player name.
///
/// The trimmed name must be 2 to 20 characters of ASCII letters, Latin-1
/// accented letters, digits and spaces, and must not contain a forbidden
/// word.
pub fn is_valid_player_name(name: &str) -> bool {
    let trimmed = name.trim();
    let length = trimmed.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&length) {
        return false;
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || ('\u{C0}'..='\u{FF}').contains(&c))
    {
        return false;
    }
    let lower = trimmed.to_lowercase();
    !FORBIDDEN_WORDS.iter().any(|word| lower.contains(word))
}

/// Checks a player name.
///
/// # Errors
///
/// Returns [`AuthError::Validation`] if the name is refused.
pub fn validate_player_name(name: &str) -> Result<(), AuthError> {
    if is_valid_player_name(name) {
        Ok(())
    } else {
        debug!("Player name refused");
        Err(AuthError::Validation(INVALID_NAME.to_string()))
    }
}

/// Checks a password.
///
/// # Errors
///
/// Returns [`AuthError::Validation`] if the trimmed password is too short.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.trim().chars().count() < PASSWORD_MIN_CHARS {
        return Err(AuthError::Validation(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_CHARS
        )));
    }
    Ok(())
}

/// SHA-256 hex digest of `password`.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Service layer for player accounts.
///
/// Wraps [`GameRepository`] with the name rules and login semantics.
#[derive(Debug, Clone)]
pub struct AuthService {
    repository: GameRepository,
}

impl AuthService {
    /// Creates a new account service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository) -> Self {
        info!("Creating AuthService");
        Self { repository }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &GameRepository {
        &self.repository
    }

    /// Logs a player in, registering the account on first use.
    ///
    /// A name with statistics but no account is migrated: the account is
    /// created and the statistics are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for a bad name or password,
    /// [`AuthError::Unauthorized`] for a wrong password, or
    /// [`AuthError::Db`] if storage fails.
    #[instrument(skip(self, password))]
    pub fn login(&self, name: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        validate_player_name(name)?;
        validate_password(password)?;
        let name = name.trim();

        match self.repository.get_player(name)? {
            None => {
                let has_stats = self.repository.load_stats(name)?.is_some();
                self.repository
                    .create_player(name.to_string(), hash_password(password))?;
                let outcome = if has_stats {
                    info!(player = %name, "Account migrated");
                    LoginOutcome {
                        status: LoginStatus::Migrated,
                        message: format!("Account migrated for {}! Your stats are preserved.", name),
                    }
                } else {
                    info!(player = %name, "Account registered");
                    LoginOutcome {
                        status: LoginStatus::Registered,
                        message: format!("New account created for {}!", name),
                    }
                };
                Ok(outcome)
            }
            Some(player) if *player.password_hash() == hash_password(password) => {
                self.repository.touch_login(name)?;
                info!(player = %name, "Player logged in");
                Ok(LoginOutcome {
                    status: LoginStatus::LoggedIn,
                    message: format!("Welcome back {}!", name),
                })
            }
            Some(_) => {
                warn!(player = %name, "Wrong password");
                Err(AuthError::Unauthorized("Wrong password".to_string()))
            }
        }
    }

    /// Checks credentials of an existing account without registering.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for a bad name,
    /// [`AuthError::Unauthorized`] for an unknown player or wrong password,
    /// or [`AuthError::Db`] if storage fails.
    #[instrument(skip(self, password))]
    pub fn authenticate(&self, name: &str, password: &str) -> Result<Player, AuthError> {
        validate_player_name(name)?;
        match self.repository.get_player(name.trim())? {
            Some(player) if *player.password_hash() == hash_password(password) => {
                debug!(player_id = player.id(), "Credentials accepted");
                Ok(player)
            }
            _ => {
                warn!("Authentication refused");
                Err(AuthError::Unauthorized("Authentication required".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_accented_names() {
        assert!(is_valid_player_name("Al"));
        assert!(is_valid_player_name("Zoé 42"));
        assert!(is_valid_player_name("  Éloïse  "));
    }

    #[test]
    fn refuses_bad_lengths_and_characters() {
        assert!(!is_valid_player_name("A"));
        assert!(!is_valid_player_name("   "));
        assert!(!is_valid_player_name("abcdefghijklmnopqrstu"));
        assert!(!is_valid_player_name("bob_the_player"));
        assert!(!is_valid_player_name("Łukasz"));
    }

    #[test]
    fn refuses_forbidden_substrings() {
        assert!(!is_valid_player_name("SuperAdmin"));
        assert!(!is_valid_player_name("rootbeer"));
        assert!(!is_valid_player_name("NULLpointer"));
    }

    #[test]
    fn hashes_with_sha256() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn password_needs_three_characters() {
        assert!(validate_password("ab ").is_err());
        assert!(validate_password("abc").is_ok());
    }
}
