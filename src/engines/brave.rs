//! Brave Search API engine implementation

use super::traits::*;
use crate::network::{accept_json, HttpRequest, HttpResponse};
use crate::results::{OrganicEntry, RawResults, SearchError};
use serde::Deserialize;
use std::time::Duration;

/// Brave web search engine
pub struct Brave {
    base_url: String,
    api_key: Option<String>,
}

impl Brave {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url("https://api.search.brave.com/res/v1/web/search", api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: BraveWeb,
}

#[derive(Debug, Default, Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveItem>,
}

/// Brave names its fields `url` and `description`
#[derive(Debug, Deserialize)]
struct BraveItem {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

impl From<BraveItem> for OrganicEntry {
    fn from(item: BraveItem) -> Self {
        Self {
            title: item.title,
            link: item.url,
            snippet: item.description,
        }
    }
}

impl Engine for Brave {
    fn name(&self) -> &str {
        "brave"
    }

    fn about(&self) -> EngineAbout {
        EngineAbout::new()
            .website("https://search.brave.com")
            .results_format("JSON")
    }

    fn timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(crate::PROVIDER_TIMEOUT))
    }

    fn request(&self, params: &RequestParams) -> Result<HttpRequest, SearchError> {
        let mut request = HttpRequest::get(&self.base_url)
            .param("q", &params.query)
            .param("count", params.num_results.to_string())
            .header("Accept", accept_json());

        if let Some(ref key) = self.api_key {
            request = request.header("X-Subscription-Token", key);
        }

        Ok(request)
    }

    fn response(
        &self,
        response: HttpResponse,
        _params: &RequestParams,
    ) -> Result<RawResults, SearchError> {
        ensure_success(&response)?;

        let data: BraveResponse = response.json()?;
        let organic = data
            .web
            .results
            .into_iter()
            .map(OrganicEntry::from)
            .collect();

        Ok(RawResults::with_organic(organic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_brave_request() {
        let brave = Brave::new(Some("token".to_string()));
        let params = RequestParams::new("rust programming", 5);
        let request = brave.request(&params).unwrap();

        assert!(request.url.contains("brave.com"));
        assert!(request
            .params
            .contains(&("q".to_string(), "rust programming".to_string())));
        assert!(request.params.contains(&("count".to_string(), "5".to_string())));
        assert_eq!(
            request.headers.get("X-Subscription-Token").map(String::as_str),
            Some("token")
        );
        assert_eq!(brave.timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_brave_request_without_key() {
        let request = Brave::new(None)
            .request(&RequestParams::new("rust", 3))
            .unwrap();

        assert!(request.headers.get("X-Subscription-Token").is_none());
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some(accept_json())
        );
    }

    #[test]
    fn test_brave_maps_nested_results() {
        let brave = Brave::new(None);
        let text = r#"{
            "type": "search",
            "web": {"results": [
                {"title": "Go vs Rust", "url": "https://example.com/a", "description": "compare"},
                {"url": "https://example.com/b"}
            ]}
        }"#;
        let response = HttpResponse {
            status: 200,
            headers: HashMap::new(),
            text: text.to_string(),
            url: String::new(),
        };

        let raw = brave
            .response(response, &RequestParams::new("go vs rust", 10))
            .unwrap();
        assert_eq!(raw.organic.len(), 2);
        assert_eq!(
            raw.organic[0],
            OrganicEntry::new("Go vs Rust", "https://example.com/a", "compare")
        );

        let results = raw.format().into_result().unwrap();
        assert_eq!(results[1].title, "No title");
        assert_eq!(results[1].link, "https://example.com/b");
    }

    #[test]
    fn test_brave_missing_web_section() {
        let brave = Brave::new(None);
        let response = HttpResponse {
            status: 200,
            headers: HashMap::new(),
            text: r#"{"type": "search"}"#.to_string(),
            url: String::new(),
        };

        let raw = brave.response(response, &RequestParams::new("x", 10)).unwrap();
        assert!(raw.organic.is_empty());
        assert!(!raw.is_error());
    }
}
