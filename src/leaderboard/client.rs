//! Player-side submission flow
//!
//! Claims the nickname on first use, remembers the token, and stops
//! retrying after too many rejected tokens. Any failure that is not a
//! protocol answer marks the leaderboard offline for the rest of the session.

use std::collections::HashMap;

use super::service::{LeaderboardApi, PlayerScore, SaveReceipt};
use crate::error::{ApiError, SubmitError};

pub struct SubmissionClient<A: LeaderboardApi> {
    api: A,
    tokens: HashMap<String, String>,
    offline: bool,
    token_attempts: u32,
    max_attempts: u32,
}

impl<A: LeaderboardApi> SubmissionClient<A> {
    pub fn new(api: A, max_attempts: u32) -> Self {
        Self {
            api,
            tokens: HashMap::new(),
            offline: false,
            token_attempts: 0,
            max_attempts,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn token_for(&self, nick: &str) -> Option<&str> {
        self.tokens.get(nick).map(String::as_str)
    }

    /// Use a token the player already holds
    pub fn provide_token(&mut self, nick: &str, token: impl Into<String>) {
        self.tokens.insert(nick.to_string(), token.into());
    }

    fn go_offline(&mut self, err: &ApiError) -> SubmitError {
        log::warn!("Leaderboard unavailable: {err}");
        self.offline = true;
        SubmitError::Offline
    }

    /// Submit a final score under `nick`
    pub fn submit(&mut self, nick: &str, score: i64) -> Result<SaveReceipt, SubmitError> {
        if self.offline {
            return Err(SubmitError::Offline);
        }

        let token = match self.tokens.get(nick) {
            Some(token) => token.clone(),
            None => match self.api.claim_nick(nick) {
                Ok(receipt) => {
                    log::info!("Claimed {nick}: {}", receipt.warning);
                    self.tokens.insert(nick.to_string(), receipt.token.clone());
                    receipt.token
                }
                Err(ApiError::NickTaken(nick)) => return Err(SubmitError::NickTaken(nick)),
                Err(ApiError::Invalid(e)) => return Err(SubmitError::Rejected(e)),
                Err(e) => return Err(self.go_offline(&e)),
            },
        };

        match self.api.save_score(nick, score, &token) {
            Ok(receipt) => {
                self.token_attempts = 0;
                Ok(receipt)
            }
            Err(ApiError::InvalidCredentials) => {
                self.tokens.remove(nick);
                self.token_attempts += 1;
                if self.token_attempts >= self.max_attempts {
                    Err(SubmitError::TooManyAttempts)
                } else {
                    Err(SubmitError::InvalidToken {
                        nick: nick.to_string(),
                        attempt: self.token_attempts,
                        max: self.max_attempts,
                    })
                }
            }
            Err(ApiError::Invalid(e)) => Err(SubmitError::Rejected(e)),
            Err(e) => Err(self.go_offline(&e)),
        }
    }

    /// Current top players; a failure marks the leaderboard offline
    pub fn top_players(&mut self) -> Result<Vec<PlayerScore>, SubmitError> {
        match self.api.top_players() {
            Ok(players) => {
                self.offline = false;
                Ok(players)
            }
            Err(e) => Err(self.go_offline(&e)),
        }
    }
}
