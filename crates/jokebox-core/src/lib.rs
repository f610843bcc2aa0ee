// Favorites bookkeeping for saved jokes - storage seam, store, provider and session
pub mod config;
pub mod error;
pub mod favorites;
pub mod models;
pub mod provider;
pub mod session;
pub mod storage;

pub use config::Config;
pub use error::Error;
pub use favorites::{search, FavoritesStore, SaveOutcome, FAVORITES_KEY};
pub use models::{Joke, JokeId};
pub use provider::{JokeProvider, OfficialJokeProvider};
pub use session::JokeSession;
pub use storage::{BackendError, KeyValueStore, MemoryStorage, SqliteStorage};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
