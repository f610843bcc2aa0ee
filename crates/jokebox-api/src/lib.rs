// HTTP client for the public joke API
pub mod jokes;

pub use jokes::{ApiJoke, JokeApiClient, JokeApiError, DEFAULT_BASE_URL};
