//! Request field validation

use thiserror::Error;

pub const NICK_MIN_CHARS: usize = 3;
pub const NICK_MAX_CHARS: usize = 16;
pub const SCORE_MAX: i64 = 9_999_999;
pub const TOKEN_MIN_CHARS: usize = 4;
pub const TOKEN_MAX_CHARS: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("nickname must be 3-16 characters, got {0}")]
    NickLength(usize),

    #[error("nickname may only contain letters, numbers, underscores and hyphens")]
    NickCharset,

    #[error("score must be an integer within [0, 9999999]")]
    Score,

    #[error("token must be 4-6 characters")]
    Token,

    #[error("missing field {0}")]
    Missing(&'static str),
}

fn nick_char_allowed(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Trim and check a nickname, returning the stored form
pub fn nick(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if !(NICK_MIN_CHARS..=NICK_MAX_CHARS).contains(&len) {
        return Err(ValidationError::NickLength(len));
    }
    if !trimmed.chars().all(nick_char_allowed) {
        return Err(ValidationError::NickCharset);
    }
    Ok(trimmed.to_string())
}

pub fn score(value: i64) -> Result<i64, ValidationError> {
    if (0..=SCORE_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::Score)
    }
}

pub fn token(raw: &str) -> Result<&str, ValidationError> {
    let len = raw.chars().count();
    if (TOKEN_MIN_CHARS..=TOKEN_MAX_CHARS).contains(&len) {
        Ok(raw)
    } else {
        Err(ValidationError::Token)
    }
}
