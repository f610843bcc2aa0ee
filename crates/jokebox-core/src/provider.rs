// Joke providers - bridges API clients into the domain model
use async_trait::async_trait;
use jokebox_api::{ApiJoke, JokeApiClient};
use std::time::Duration;

use crate::{models::Joke, Error, Result};

/// Source of random jokes
///
/// The favorites store never calls this; only the session does.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JokeProvider: Send + Sync {
    async fn random_joke(&self) -> Result<Joke>;
}

/// Wrapper around JokeApiClient that implements JokeProvider
pub struct OfficialJokeProvider {
    client: JokeApiClient,
}

impl OfficialJokeProvider {
    pub fn new() -> Result<Self> {
        let client = JokeApiClient::new().map_err(|e| Error::ApiError(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_base_url(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let client = JokeApiClient::with_base_url(base_url, timeout)
            .map_err(|e| Error::ApiError(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl JokeProvider for OfficialJokeProvider {
    async fn random_joke(&self) -> Result<Joke> {
        let joke = self
            .client
            .random_joke()
            .await
            .map_err(|e| Error::ApiError(e.to_string()))?;

        Ok(api_to_joke(joke))
    }
}

fn api_to_joke(api: ApiJoke) -> Joke {
    Joke {
        id: api.id.into(),
        kind: api.kind,
        setup: api.setup,
        punchline: api.punchline,
    }
}
