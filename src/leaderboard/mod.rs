//! Score leaderboard
//!
//! Nicknames are claimed once and protected by a short token; each nickname
//! keeps only its best score. Transport is left to the host: requests arrive
//! as method, path and JSON body.

mod client;
mod service;
mod store;
pub mod validation;

pub use client::SubmissionClient;
pub use service::{
    ClaimReceipt, HttpReply, Leaderboard, LeaderboardApi, PlayerScore, SaveReceipt,
};
pub use store::{JsonFileStore, MemoryStore, Records, ScoreRecord, ScoreStore};
pub use validation::ValidationError;

use serde::{Deserialize, Serialize};

/// Leaderboard settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Players listed by `getTopPlayers`
    pub top_n: usize,
    pub token_length: usize,
    /// Alphabet for generated tokens (no 0/O, 1/I)
    pub token_charset: String,
    /// Rejected tokens tolerated by the client before it gives up
    pub max_token_attempts: u32,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            token_length: 6,
            token_charset: "ABCDEFGHJKLMNPQRSTUVWXYZ23456789".to_string(),
            max_token_attempts: 3,
        }
    }
}
