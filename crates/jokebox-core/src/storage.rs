// Key/value storage seam - the favorites store only ever talks to this trait
use async_trait::async_trait;
use jokebox_cache::SlotCache;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Failure reported by a storage backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("write rejected: {0}")]
    Rejected(String),
}

/// Whole-value key/value storage
///
/// `get` and `set` are atomic per key; nothing else is promised. There are no
/// transactions, so read-modify-write sequences are the caller's problem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).set(key, value).await
    }
}

/// Process-local storage, forgotten on exit
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// On-device storage backed by the SQLite slot cache
#[derive(Clone)]
pub struct SqliteStorage {
    cache: Arc<SlotCache>,
}

impl SqliteStorage {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, BackendError> {
        let cache =
            SlotCache::open(db_path).map_err(|e| BackendError::Unavailable(e.to_string()))?;
        Ok(Self::with_cache(cache))
    }

    pub fn with_cache(cache: SlotCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.cache
            .get(key)
            .map_err(|e| BackendError::Unavailable(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.cache
            .set(key, value)
            .map_err(|e| BackendError::Rejected(e.to_string()))
    }
}
