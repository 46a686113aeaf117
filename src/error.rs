//! Error types for configuration loading, score persistence and the
//! leaderboard request flow.
//!
//! The simulation itself never fails: malformed input is dropped and
//! invariant violations panic.

use std::path::PathBuf;

use thiserror::Error;

use crate::leaderboard::ValidationError;

/// Errors raised while loading or validating a [`GameTuning`](crate::GameTuning).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(i32),

    #[error("initial position ({x}, {y}) lies outside the grid")]
    StartOutsideGrid { x: i32, y: i32 },

    #[error("min speed {min_ms}ms exceeds base speed {base_ms}ms")]
    SpeedRange { min_ms: u32, base_ms: u32 },

    #[error("level max must be at least 1")]
    NoLevels,

    #[error("spawn weight for {kind} is invalid: {weight}")]
    BadWeight { kind: String, weight: f64 },

    #[error("spawn weights sum to zero")]
    EmptyWeights,

    #[error("probability must be within [0, 1], got {0}")]
    BadProbability(f64),

    #[error("no catalog entry for food kind {0}")]
    MissingCatalogEntry(String),
}

/// Errors raised by a leaderboard [`ScoreStore`](crate::leaderboard::ScoreStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("score store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("score store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Request failures returned by the leaderboard, each mapped to a status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("nickname {0} already claimed")]
    NickTaken(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no route for {method} {path}")]
    NotFound { method: String, path: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status reported for this failure
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Invalid(_) => 422,
            ApiError::NickTaken(_) => 409,
            ApiError::InvalidCredentials => 403,
            ApiError::NotFound { .. } => 404,
            ApiError::Store(_) => 500,
        }
    }
}

/// Client-side outcome of a failed score submission.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("leaderboard offline, score not saved")]
    Offline,

    #[error("nickname {0} is taken, a token is required")]
    NickTaken(String),

    #[error("invalid token for {nick} (attempt {attempt}/{max})")]
    InvalidToken { nick: String, attempt: u32, max: u32 },

    #[error("too many failed token attempts, score not saved")]
    TooManyAttempts,

    #[error("submission rejected: {0}")]
    Rejected(ValidationError),
}
