use serde::{Deserialize, Serialize};

/// Provider-assigned joke identity
///
/// Providers hand out either numbers or strings. Serialized untagged, so the
/// stored JSON keeps whatever shape the provider used. `Number(1)` and
/// `Text("1")` are different ids.
///
/// Whole numbers above `i64::MAX` land in `Unsigned`; anything that fits an
/// `i64` is always `Number`, so one value never has two spellings. Fractional
/// ids are not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JokeId {
    Number(i64),
    Unsigned(u64),
    Text(String),
}

impl From<i64> for JokeId {
    fn from(id: i64) -> Self {
        JokeId::Number(id)
    }
}

impl From<i32> for JokeId {
    fn from(id: i32) -> Self {
        JokeId::Number(i64::from(id))
    }
}

impl From<u64> for JokeId {
    fn from(id: u64) -> Self {
        match i64::try_from(id) {
            Ok(id) => JokeId::Number(id),
            Err(_) => JokeId::Unsigned(id),
        }
    }
}

impl From<&str> for JokeId {
    fn from(id: &str) -> Self {
        JokeId::Text(id.to_string())
    }
}

impl From<String> for JokeId {
    fn from(id: String) -> Self {
        JokeId::Text(id)
    }
}

impl std::fmt::Display for JokeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JokeId::Number(n) => write!(f, "{}", n),
            JokeId::Unsigned(n) => write!(f, "{}", n),
            JokeId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A joke as saved in the favorites list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: JokeId,
    /// Category reported by the provider ("general", "programming", ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub setup: String,
    pub punchline: String,
}

impl Joke {
    pub fn new(id: impl Into<JokeId>, setup: impl Into<String>, punchline: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
            setup: setup.into(),
            punchline: punchline.into(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Message handed to the platform share sheet
    pub fn share_text(&self) -> String {
        format!("{}\n\n{}", self.setup, self.punchline)
    }
}
