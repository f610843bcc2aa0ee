// Screen-independent flow: fetch a joke, save it, browse and prune favorites
use crate::{
    favorites::{search, FavoritesStore, SaveOutcome},
    models::Joke,
    provider::JokeProvider,
    storage::KeyValueStore,
    Result,
};
use tracing::{info, warn};

/// Ties a joke provider to the favorites store
///
/// The favorites held here are a read-only snapshot. Every mutation goes to
/// the store and the snapshot is replaced with what the store reports, so a
/// stale index can never be patched into local state.
pub struct JokeSession<P, S> {
    provider: P,
    store: FavoritesStore<S>,
    current: Option<Joke>,
    favorites: Vec<Joke>,
}

impl<P: JokeProvider, S: KeyValueStore> JokeSession<P, S> {
    pub fn new(provider: P, store: FavoritesStore<S>) -> Self {
        Self {
            provider,
            store,
            current: None,
            favorites: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&Joke> {
        self.current.as_ref()
    }

    pub fn favorites(&self) -> &[Joke] {
        &self.favorites
    }

    pub fn store(&self) -> &FavoritesStore<S> {
        &self.store
    }

    /// Fetch a new joke. On failure the previous joke stays current.
    pub async fn next_joke(&mut self) -> Result<&Joke> {
        match self.provider.random_joke().await {
            Ok(joke) => {
                info!("Fetched joke {}", joke.id);
                Ok(&*self.current.insert(joke))
            }
            Err(e) => {
                warn!("Failed to fetch joke: {}", e);
                Err(e)
            }
        }
    }

    /// Save the current joke. `None` when nothing has been fetched yet.
    pub async fn save_current(&mut self) -> Result<Option<SaveOutcome>> {
        let Some(joke) = self.current.clone() else {
            return Ok(None);
        };

        let outcome = self.store.save(joke).await?;
        self.refresh().await?;
        Ok(Some(outcome))
    }

    /// Whether the current joke is already among the favorites
    pub async fn current_is_saved(&self) -> Result<bool> {
        match &self.current {
            Some(joke) => self.store.contains(&joke.id).await,
            None => Ok(false),
        }
    }

    /// Re-read favorites from storage
    pub async fn refresh(&mut self) -> Result<&[Joke]> {
        self.favorites = self.store.load_all().await?;
        Ok(&self.favorites)
    }

    /// Remove by position in the last snapshot
    pub async fn remove_at(&mut self, index: usize) -> Result<&[Joke]> {
        self.favorites = self.store.remove_at(index).await?;
        Ok(&self.favorites)
    }

    /// Share-sheet message for the current joke
    pub fn share_current(&self) -> Option<String> {
        self.current.as_ref().map(Joke::share_text)
    }

    /// Snapshot entries matching `query`
    pub fn filtered(&self, query: &str) -> Vec<Joke> {
        search(&self.favorites, query)
    }
}
