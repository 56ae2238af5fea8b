//! User directory backed by a JSON file
//!
//! The file is a JSON array of user records. Every record needs a `username`
//! and a `uid`; anything else is passed through untouched. Records are kept as
//! raw JSON so a lookup returns exactly the bytes stored on disk.
//!
//! The directory does not watch the file. Callers reload it explicitly, and
//! each reload builds a fresh [`UserIndex`] that replaces the previous one as
//! a whole.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("failed to read user list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed user list {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A user's uid, whatever JSON value the file holds for it.
///
/// Uids compare and hash by their canonical JSON text, so `1000` and
/// `"1000"` are different uids while `null` or `1000.0` are still valid keys.
#[derive(Debug, Clone)]
pub struct Uid {
    key: String,
    value: Value,
}

impl Uid {
    pub fn new(value: Value) -> Self {
        Self {
            key: value.to_string(),
            value,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl PartialEq for Uid {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Uid {}

impl Hash for Uid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl From<i64> for Uid {
    fn from(uid: i64) -> Self {
        Self::new(Value::from(uid))
    }
}

impl From<&str> for Uid {
    fn from(uid: &str) -> Self {
        Self::new(Value::from(uid))
    }
}

impl<'de> Deserialize<'de> for Uid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::new)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::String(s) => f.write_str(s),
            _ => f.write_str(&self.key),
        }
    }
}

/// The fields of a user record the directory indexes on
#[derive(Debug, Deserialize)]
struct UserKeys {
    username: String,
    uid: Uid,
}

/// One user record, verbatim from the backing file
#[derive(Debug, Clone)]
pub struct CegaUser {
    pub username: String,
    pub uid: Uid,
    raw: Box<RawValue>,
}

impl CegaUser {
    /// The record as stored on disk
    pub fn as_json(&self) -> &str {
        self.raw.get()
    }
}

/// Users indexed by username and by uid
#[derive(Debug, Default)]
pub struct UserIndex {
    users: Vec<CegaUser>,
    usernames: HashMap<String, usize>,
    uids: HashMap<Uid, usize>,
}

impl UserIndex {
    /// Parse a JSON array of user records and index it.
    ///
    /// Later records win when a username or uid appears twice.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<Box<RawValue>> = serde_json::from_str(json)?;

        let mut index = Self::default();
        for raw in records {
            let keys: UserKeys = serde_json::from_str(raw.get())?;
            let pos = index.users.len();
            index.usernames.insert(keys.username.clone(), pos);
            index.uids.insert(keys.uid.clone(), pos);
            index.users.push(CegaUser {
                username: keys.username,
                uid: keys.uid,
                raw,
            });
        }

        Ok(index)
    }

    /// Read and index the user list at `path`
    pub async fn load(path: &Path) -> Result<Self, DirectoryError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DirectoryError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        Self::parse(&json).map_err(|source| DirectoryError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn by_username(&self, username: &str) -> Option<&CegaUser> {
        self.usernames.get(username).map(|&pos| &self.users[pos])
    }

    pub fn by_uid(&self, uid: &Uid) -> Option<&CegaUser> {
        self.uids.get(uid).map(|&pos| &self.users[pos])
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// The directory served over HTTP
pub struct Directory {
    path: PathBuf,
    index: RwLock<Arc<UserIndex>>,
}

impl Directory {
    /// Open the directory, failing if the backing file cannot be indexed
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DirectoryError> {
        let path = path.into();
        let index = UserIndex::load(&path).await?;
        tracing::info!(path = %path.display(), users = index.len(), "Loaded user list");

        Ok(Self {
            path,
            index: RwLock::new(Arc::new(index)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the backing file and replace the index.
    ///
    /// On failure the previous index is kept and the error is returned.
    pub async fn reload(&self) -> Result<Arc<UserIndex>, DirectoryError> {
        let index = Arc::new(UserIndex::load(&self.path).await?);
        tracing::debug!(users = index.len(), "Reloaded user list");

        *self.index.write().await = index.clone();
        Ok(index)
    }

    /// The index as of the last successful load
    pub async fn snapshot(&self) -> Arc<UserIndex> {
        self.index.read().await.clone()
    }
}
