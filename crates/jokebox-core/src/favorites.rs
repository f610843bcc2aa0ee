use crate::{
    models::{Joke, JokeId},
    storage::KeyValueStore,
    Error, Result,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Slot the favorites list lives under unless configured otherwise
pub const FAVORITES_KEY: &str = "favorites";

/// What `save` did with the joke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub added: bool,
}

/// Owner of the persisted favorites list
///
/// The list is kept as one JSON array in a single storage slot and rewritten
/// whole on every mutation. Nothing else should touch that slot.
///
/// Mutations go through a FIFO write gate, so `save`/`remove_at` calls made
/// through this store (or any clone of it) never overwrite each other. Another
/// store instance or process writing the same slot still wins or loses whole.
#[derive(Clone)]
pub struct FavoritesStore<S> {
    storage: S,
    key: String,
    write_gate: Arc<Mutex<()>>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, FAVORITES_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current list in stored order. A slot that was never written is an
    /// empty list; anything unreadable is an error.
    pub async fn load_all(&self) -> Result<Vec<Joke>> {
        let raw = self
            .storage
            .get(&self.key)
            .await
            .map_err(|e| Error::StorageRead(e.to_string()))?;

        match raw {
            None => {
                debug!("No favorites stored under '{}' yet", self.key);
                Ok(Vec::new())
            }
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                Error::StorageRead(format!("corrupt favorites in '{}': {}", self.key, e))
            }),
        }
    }

    /// Append `joke` unless a joke with the same id is already saved
    ///
    /// Only ids are compared. Two different jokes sharing an id count as the
    /// same joke and the first one stays.
    pub async fn save(&self, joke: Joke) -> Result<SaveOutcome> {
        let _gate = self.write_gate.lock().await;

        let mut list = self.load_all().await?;
        if list.iter().any(|saved| saved.id == joke.id) {
            debug!("Joke {} already in favorites", joke.id);
            return Ok(SaveOutcome { added: false });
        }

        let id = joke.id.clone();
        list.push(joke);
        self.persist(&list).await?;

        info!("Saved joke {} ({} favorites)", id, list.len());
        Ok(SaveOutcome { added: true })
    }

    /// Delete the entry at `index` and return what is left
    pub async fn remove_at(&self, index: usize) -> Result<Vec<Joke>> {
        let _gate = self.write_gate.lock().await;

        let mut list = self.load_all().await?;
        if index >= list.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: list.len(),
            });
        }

        let removed = list.remove(index);
        self.persist(&list).await?;

        info!("Removed joke {} from favorites", removed.id);
        Ok(list)
    }

    /// Same as the free [`search`]; no storage access
    pub fn search(&self, list: &[Joke], query: &str) -> Vec<Joke> {
        search(list, query)
    }

    pub async fn contains(&self, id: &JokeId) -> Result<bool> {
        Ok(self.load_all().await?.iter().any(|joke| &joke.id == id))
    }

    pub async fn len(&self) -> Result<usize> {
        Ok(self.load_all().await?.len())
    }

    async fn persist(&self, list: &[Joke]) -> Result<()> {
        let raw = serde_json::to_string(list).map_err(|e| Error::StorageWrite(e.to_string()))?;

        self.storage
            .set(&self.key, &raw)
            .await
            .map_err(|e| Error::StorageWrite(e.to_string()))
    }
}

/// Entries whose setup contains `query`, ignoring case, in original order.
/// An empty query keeps everything.
pub fn search(list: &[Joke], query: &str) -> Vec<Joke> {
    if query.is_empty() {
        return list.to_vec();
    }

    let needle = query.to_lowercase();
    list.iter()
        .filter(|joke| joke.setup.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
