//! Nickname -> score record persistence
//!
//! Records are a key-value map. Older files stored a bare score per
//! nickname; those still load, as records without a token.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// What the store keeps per nickname
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreRecord {
    Claimed { score: i64, token: String },
    /// Pre-claim record: a score with no credential
    Legacy(i64),
}

impl ScoreRecord {
    pub fn claimed(token: impl Into<String>) -> Self {
        ScoreRecord::Claimed {
            score: 0,
            token: token.into(),
        }
    }

    pub fn score(&self) -> i64 {
        match self {
            ScoreRecord::Claimed { score, .. } | ScoreRecord::Legacy(score) => *score,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            ScoreRecord::Claimed { token, .. } => Some(token),
            ScoreRecord::Legacy(_) => None,
        }
    }
}

pub type Records = BTreeMap<String, ScoreRecord>;

/// Backing storage for the leaderboard
pub trait ScoreStore {
    fn get(&self, nick: &str) -> Result<Option<ScoreRecord>, StoreError>;

    fn put(&mut self, nick: &str, record: ScoreRecord) -> Result<(), StoreError>;

    fn all(&self) -> Result<Records, StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Records,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Records) -> Self {
        Self { records }
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, nick: &str) -> Result<Option<ScoreRecord>, StoreError> {
        Ok(self.records.get(nick).cloned())
    }

    fn put(&mut self, nick: &str, record: ScoreRecord) -> Result<(), StoreError> {
        self.records.insert(nick.to_string(), record);
        Ok(())
    }

    fn all(&self) -> Result<Records, StoreError> {
        Ok(self.records.clone())
    }
}

/// JSON file holding the whole map
///
/// A missing file reads as empty. Every write replaces the file through a
/// sibling temp file and a rename.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Records, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) if json.trim().is_empty() => Ok(Records::new()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Records::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, records: &Records) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(records)?;
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!(
            "Score store written ({} records) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, nick: &str) -> Result<Option<ScoreRecord>, StoreError> {
        Ok(self.read()?.remove(nick))
    }

    fn put(&mut self, nick: &str, record: ScoreRecord) -> Result<(), StoreError> {
        let mut records = self.read()?;
        records.insert(nick.to_string(), record);
        self.write(&records).inspect_err(|e| {
            log::warn!("Failed to write score store {}: {e}", self.path.display());
        })
    }

    fn all(&self) -> Result<Records, StoreError> {
        self.read()
    }
}
