//! Result type definitions

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Title given to the record that stands in for a failed search
pub const ERROR_TITLE: &str = "Search Error";

/// Title used when the provider omits one
pub const DEFAULT_TITLE: &str = "No title";

/// Snippet used when the provider omits one
pub const DEFAULT_SNIPPET: &str = "No description available";

/// A single formatted search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
        }
    }

    /// The record shown in place of results when the search failed
    pub fn error_sentinel(reason: impl Into<String>) -> Self {
        Self::new(ERROR_TITLE, String::new(), reason)
    }

    pub fn is_error_sentinel(&self) -> bool {
        self.title == ERROR_TITLE && self.link.is_empty()
    }
}

impl From<&OrganicEntry> for SearchResult {
    fn from(entry: &OrganicEntry) -> Self {
        Self {
            title: entry.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            link: entry.link.clone().unwrap_or_default(),
            snippet: entry
                .snippet
                .clone()
                .unwrap_or_else(|| DEFAULT_SNIPPET.to_string()),
        }
    }
}

/// One organic entry as a provider reported it. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganicEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub snippet: Option<String>,
}

impl OrganicEntry {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            link: Some(link.into()),
            snippet: Some(snippet.into()),
        }
    }
}

/// Accept any JSON value and keep it only when it is a string
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Uniform raw payload returned by every engine's `search`
///
/// A failed search carries `error` and an empty `organic` list; it is never
/// raised to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub organic: Vec<OrganicEntry>,
}

impl RawResults {
    pub fn with_organic(organic: Vec<OrganicEntry>) -> Self {
        Self {
            error: None,
            organic,
        }
    }

    pub fn failure(reason: impl fmt::Display) -> Self {
        Self {
            error: Some(reason.to_string()),
            organic: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Turn the raw payload into formatted results, preserving order
    pub fn format(&self) -> SearchOutcome {
        match self.error {
            Some(ref reason) => SearchOutcome::Failed {
                reason: reason.clone(),
            },
            None => SearchOutcome::Found(self.organic.iter().map(SearchResult::from).collect()),
        }
    }
}

/// What a search produced: results, or the reason it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Vec<SearchResult>),
    Failed { reason: String },
}

impl SearchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Results found, empty on failure
    pub fn results(&self) -> &[SearchResult] {
        match self {
            Self::Found(results) => results,
            Self::Failed { .. } => &[],
        }
    }

    /// Render the outcome as a list a shell can display; a failure becomes a
    /// single `"Search Error"` record carrying the reason.
    pub fn into_display_results(self) -> Vec<SearchResult> {
        match self {
            Self::Found(results) => results,
            Self::Failed { reason } => vec![SearchResult::error_sentinel(reason)],
        }
    }

    pub fn into_result(self) -> Result<Vec<SearchResult>, String> {
        match self {
            Self::Found(results) => Ok(results),
            Self::Failed { reason } => Err(reason),
        }
    }
}

/// Why a provider call did not yield results
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP error: {status}")]
    Http { status: u16 },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Parse(String),
    #[error("{0} requires an API key")]
    MissingApiKey(&'static str),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_preserves_order_and_fills_defaults() {
        let raw: RawResults = serde_json::from_value(serde_json::json!({
            "organic": [
                {"title": "First", "link": "https://a.example", "snippet": "one"},
                {"link": "https://b.example"},
                {"title": "Third", "snippet": 42},
            ]
        }))
        .unwrap();

        let results = raw.format().into_result().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], SearchResult::new("First", "https://a.example", "one"));
        assert_eq!(results[1].title, DEFAULT_TITLE);
        assert_eq!(results[1].snippet, DEFAULT_SNIPPET);
        assert_eq!(results[2].link, "");
        assert_eq!(results[2].snippet, DEFAULT_SNIPPET);
    }

    #[test]
    fn test_error_payload_becomes_single_sentinel() {
        let raw: RawResults = serde_json::from_value(serde_json::json!({
            "error": "HTTP error: 503",
            "organic": [{"title": "ignored"}]
        }))
        .unwrap();

        let outcome = raw.format();
        assert!(outcome.is_failure());
        assert!(outcome.results().is_empty());

        let display = outcome.into_display_results();
        assert_eq!(display.len(), 1);
        assert_eq!(display[0].title, ERROR_TITLE);
        assert_eq!(display[0].snippet, "HTTP error: 503");
        assert!(display[0].link.is_empty());
        assert!(display[0].is_error_sentinel());
    }

    #[test]
    fn test_empty_organic_is_not_a_failure() {
        let outcome = RawResults::with_organic(vec![]).format();
        assert_eq!(outcome, SearchOutcome::Found(vec![]));
        assert!(outcome.into_display_results().is_empty());
    }

    #[test]
    fn test_failure_serializes_like_provider_shape() {
        let raw = RawResults::failure(SearchError::Http { status: 503 });
        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "HTTP error: 503", "organic": []})
        );

        let ok = serde_json::to_value(RawResults::default()).unwrap();
        assert!(ok.get("error").is_none());
    }
}
