use thiserror::Error;

/// All the ways saving and loading favorites can go wrong
///
/// Storage failures are split by direction so callers can tell a corrupt or
/// unreachable slot apart from a rejected write.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read favorites: {0}")]
    StorageRead(String),

    #[error("Failed to write favorites: {0}")]
    StorageWrite(String),

    #[error("Index {index} out of range for {len} favorites")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Joke API request failed: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
