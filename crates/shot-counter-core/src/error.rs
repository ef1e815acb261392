//! Error types for shot-counter-core

use thiserror::Error;

use crate::roster::TeamSide;

/// Main error type for shot-counter operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid player number {0}: must be between 0 and 99")]
    InvalidPlayerNumber(i64),

    #[error("Player #{number} already exists on the {side} roster")]
    DuplicatePlayerNumber { side: TeamSide, number: u8 },

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Shot {shot_id} not found for player {player_id}")]
    ShotNotFound { player_id: String, shot_id: String },

    #[error("Invalid game code '{0}': expected 6 digits")]
    InvalidGameCode(String),

    #[error("Game not found: {0}")]
    GameNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for shot-counter operations
pub type Result<T> = std::result::Result<T, Error>;
