//! Leaderboard request handling
//!
//! Three routes over a [`ScoreStore`]:
//! - `POST /claimNick {nick}` registers a nickname and hands out its token once
//! - `POST /saveScore {nick, score, token}` keeps the best score per nickname
//! - `GET /getTopPlayers` lists the best players
//!
//! [`Leaderboard::handle`] maps those routes onto the typed operations and
//! turns every [`ApiError`] into its status code.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::LeaderboardConfig;
use super::store::{ScoreRecord, ScoreStore};
use super::validation::{self, ValidationError};
use crate::error::ApiError;

const TOKEN_WARNING: &str = "SAVE THIS TOKEN - IT WONT BE SHOWN AGAIN";

/// Successful claim; the only time the token is revealed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReceipt {
    pub success: bool,
    pub token: String,
    pub warning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReceipt {
    pub success: bool,
    /// Stored high score after this request
    pub current_score: i64,
    pub new_high_score: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub nick: String,
    pub score: i64,
}

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Value,
}

impl HttpReply {
    fn ok(status: u16, body: impl Serialize) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(e) => Self::internal(&e.to_string()),
        }
    }

    fn internal(message: &str) -> Self {
        Self {
            status: 500,
            body: json!({ "success": false, "error": message }),
        }
    }

    fn error(err: &ApiError) -> Self {
        Self {
            status: err.status(),
            body: json!({ "success": false, "error": err.to_string() }),
        }
    }
}

/// The score protocol over the operations the client flow needs
pub trait LeaderboardApi {
    fn claim_nick(&mut self, nick: &str) -> Result<ClaimReceipt, ApiError>;

    fn save_score(&mut self, nick: &str, score: i64, token: &str) -> Result<SaveReceipt, ApiError>;

    fn top_players(&mut self) -> Result<Vec<PlayerScore>, ApiError>;
}

/// Server side of the score protocol
pub struct Leaderboard<S: ScoreStore> {
    store: S,
    config: LeaderboardConfig,
    rng: Pcg32,
}

impl<S: ScoreStore> Leaderboard<S> {
    /// Tokens drawn from an OS-seeded generator
    pub fn new(store: S, config: LeaderboardConfig) -> Self {
        let rng = Pcg32::from_rng(&mut rand::rng());
        Self { store, config, rng }
    }

    /// Reproducible tokens
    pub fn with_seed(store: S, config: LeaderboardConfig, seed: u64) -> Self {
        Self {
            store,
            config,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LeaderboardConfig {
        &self.config
    }

    fn generate_token(&mut self) -> String {
        let charset: Vec<char> = self.config.token_charset.chars().collect();
        if charset.is_empty() {
            return String::new();
        }
        (0..self.config.token_length)
            .map(|_| charset[self.rng.random_range(0..charset.len())])
            .collect()
    }

    /// Route a request; unknown routes are 404
    pub fn handle(&mut self, method: &str, path: &str, body: &Value) -> HttpReply {
        let result = match (method, path) {
            ("POST", "/claimNick") => str_field(body, "nick")
                .map_err(ApiError::from)
                .and_then(|nick| self.claim_nick(nick))
                .map(|receipt| HttpReply::ok(201, receipt)),
            ("POST", "/saveScore") => parse_save(body)
                .map_err(ApiError::from)
                .and_then(|(nick, score, token)| self.save_score(nick, score, token))
                .map(|receipt| HttpReply::ok(200, receipt)),
            ("GET", "/getTopPlayers") => self
                .top_players()
                .map(|players| HttpReply::ok(200, players)),
            _ => Err(ApiError::NotFound {
                method: method.to_string(),
                path: path.to_string(),
            }),
        };

        result.unwrap_or_else(|err| {
            if err.status() == 500 {
                log::warn!("Leaderboard request {method} {path} failed: {err}");
            } else {
                log::debug!("Leaderboard request {method} {path} rejected: {err}");
            }
            HttpReply::error(&err)
        })
    }
}

impl<S: ScoreStore> LeaderboardApi for Leaderboard<S> {
    fn claim_nick(&mut self, nick: &str) -> Result<ClaimReceipt, ApiError> {
        let nick = validation::nick(nick)?;
        if self.store.get(&nick)?.is_some() {
            return Err(ApiError::NickTaken(nick));
        }

        let token = self.generate_token();
        self.store.put(&nick, ScoreRecord::claimed(token.clone()))?;
        log::info!("Nickname claimed: {nick}");

        Ok(ClaimReceipt {
            success: true,
            token,
            warning: TOKEN_WARNING.to_string(),
        })
    }

    fn save_score(&mut self, nick: &str, score: i64, token: &str) -> Result<SaveReceipt, ApiError> {
        let nick = validation::nick(nick)?;
        let score = validation::score(score)?;
        let token = validation::token(token)?;

        let record = self
            .store
            .get(&nick)?
            .ok_or(ApiError::InvalidCredentials)?;
        // Legacy records carry no token and can never match
        if record.token() != Some(token) {
            return Err(ApiError::InvalidCredentials);
        }

        let stored = record.score();
        let new_high_score = score > stored;
        if new_high_score {
            self.store.put(
                &nick,
                ScoreRecord::Claimed {
                    score,
                    token: token.to_string(),
                },
            )?;
            log::info!("New high score for {nick}: {score}");
        }

        Ok(SaveReceipt {
            success: true,
            current_score: stored.max(score),
            new_high_score,
        })
    }

    fn top_players(&mut self) -> Result<Vec<PlayerScore>, ApiError> {
        let mut players: Vec<PlayerScore> = self
            .store
            .all()?
            .into_iter()
            .map(|(nick, record)| PlayerScore {
                score: record.score(),
                nick,
            })
            .collect();
        players.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.nick.cmp(&b.nick)));
        players.truncate(self.config.top_n);
        Ok(players)
    }
}

fn str_field<'a>(body: &'a Value, name: &'static str) -> Result<&'a str, ValidationError> {
    body.get(name)
        .and_then(Value::as_str)
        .ok_or(ValidationError::Missing(name))
}

fn parse_save(body: &Value) -> Result<(&str, i64, &str), ValidationError> {
    let nick = str_field(body, "nick")?;
    let score = body
        .get("score")
        .ok_or(ValidationError::Missing("score"))?
        .as_i64()
        .ok_or(ValidationError::Score)?;
    let token = str_field(body, "token")?;
    Ok((nick, score, token))
}
