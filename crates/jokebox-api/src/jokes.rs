use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://official-joke-api.appspot.com";

#[derive(Error, Debug)]
pub enum JokeApiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Endpoint not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JokeApiError>;

/// Joke record exactly as the API returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiJoke {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub setup: String,
    pub punchline: String,
}

pub struct JokeApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl JokeApiClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), None)
    }

    /// Point the client somewhere else (mirror, local stub server)
    pub fn with_base_url(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("Jokebox/0.1.0"),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn random_joke_url(&self) -> String {
        format!("{}/random_joke", self.base_url)
    }

    /// Fetch one random joke. A single attempt, no retries.
    pub async fn random_joke(&self) -> Result<ApiJoke> {
        let url = self.random_joke_url();
        debug!("Fetching joke from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == 404 {
            return Err(JokeApiError::NotFound(url));
        }

        if status == 429 {
            return Err(JokeApiError::RateLimitExceeded);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JokeApiError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        parse_joke(&body)
    }
}

fn parse_joke(body: &str) -> Result<ApiJoke> {
    Ok(serde_json::from_str(body)?)
}
