use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::favorites::{FavoritesStore, FAVORITES_KEY};
use crate::provider::OfficialJokeProvider;
use crate::storage::{KeyValueStore, MemoryStorage, SqliteStorage};
use crate::{Error, Result};

/// Main configuration structure
///
/// Loaded from `<config dir>/jokebox/config.toml`; every field has a default,
/// so a missing file or a partial one is fine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Config {
    /// Load config from default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::config_path()?)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Build the configured storage backend
    pub fn open_storage(&self) -> Result<Arc<dyn KeyValueStore>> {
        match self.storage.backend {
            StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
            StorageBackend::Sqlite => {
                let path = match &self.storage.path {
                    Some(path) => path.clone(),
                    None => Self::default_db_path()?,
                };

                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }

                let storage =
                    SqliteStorage::open(&path).map_err(|e| Error::StorageRead(e.to_string()))?;
                Ok(Arc::new(storage))
            }
        }
    }

    /// Favorites store over the configured backend and slot
    pub fn open_store(&self) -> Result<FavoritesStore<Arc<dyn KeyValueStore>>> {
        let storage = self.open_storage()?;
        Ok(FavoritesStore::with_key(
            storage,
            self.storage.favorites_key.clone(),
        ))
    }

    /// Joke API provider pointed at the configured URL
    pub fn open_provider(&self) -> Result<OfficialJokeProvider> {
        OfficialJokeProvider::with_base_url(self.provider.api_url.clone(), self.provider.timeout())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::ConfigError("Could not find config directory".into()))?
            .join("jokebox");

        Ok(config_dir.join("config.toml"))
    }

    /// Where the SQLite file goes when no path is configured
    pub fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| Error::ConfigError("Could not find data directory".into()))?
            .join("jokebox");

        Ok(data_dir.join("jokebox.db"))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// SQLite file; defaults to the platform data dir
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Slot the favorites list is stored under
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
}

fn default_favorites_key() -> String {
    FAVORITES_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            favorites_key: default_favorites_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout; 0 leaves it to reqwest
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    jokebox_api::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl ProviderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.favorites_key, "favorites");
        assert_eq!(config.provider.api_url, "https://official-joke-api.appspot.com");
        assert_eq!(config.provider.timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.favorites_key, "favorites");
        assert_eq!(config.provider.timeout_secs, 10);
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let provider = ProviderConfig {
            timeout_secs: 0,
            ..ProviderConfig::default()
        };
        assert_eq!(provider.timeout(), None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.storage.favorites_key = "jokes".to_string();
        config.storage.path = Some(dir.path().join("jokes.db"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.storage.favorites_key, "jokes");
        assert_eq!(loaded.storage.path, config.storage.path);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.storage.favorites_key, "favorites");
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "storage = [").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_open_sqlite_storage_at_configured_path() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.path = Some(dir.path().join("data").join("jokebox.db"));

        let storage = config.open_storage().unwrap();
        storage.set("favorites", "[]").await.unwrap();

        assert!(dir.path().join("data").join("jokebox.db").exists());
        assert_eq!(storage.get("favorites").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_open_store_uses_configured_key() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Memory;
        config.storage.favorites_key = "saved_jokes".to_string();

        let store = config.open_store().unwrap();
        assert_eq!(store.key(), "saved_jokes");

        store
            .save(crate::models::Joke::new(1, "Why?", "Because."))
            .await
            .unwrap();
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[test]
    fn test_open_provider_uses_configured_url() {
        let mut config = Config::default();
        config.provider.api_url = "http://localhost:3005/".to_string();
        config.provider.timeout_secs = 2;

        let provider = config.open_provider().unwrap();
        assert_eq!(provider.base_url(), "http://localhost:3005");
    }
}
