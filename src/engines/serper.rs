//! Serper.dev hosted Google search API

use super::traits::*;
use crate::network::{accept_json, HttpRequest, HttpResponse};
use crate::results::{RawResults, SearchError};
use serde_json::json;

/// Serper.dev web search engine
pub struct Serper {
    base_url: String,
    api_key: String,
}

impl Serper {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url("https://google.serper.dev/search", api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

impl Engine for Serper {
    fn name(&self) -> &str {
        "serper"
    }

    fn about(&self) -> EngineAbout {
        EngineAbout::new()
            .website("https://serper.dev")
            .results_format("JSON")
    }

    fn request(&self, params: &RequestParams) -> Result<HttpRequest, SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::MissingApiKey("serper"));
        }

        Ok(HttpRequest::post(&self.base_url)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .header("Accept", accept_json())
            .json(json!({
                "q": params.query,
                "num": params.num_results,
            })))
    }

    fn response(
        &self,
        response: HttpResponse,
        _params: &RequestParams,
    ) -> Result<RawResults, SearchError> {
        ensure_success(&response)?;

        // Serper already answers in the uniform `{organic: [...]}` shape
        let raw: RawResults = response.json()?;
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::HttpMethod;
    use crate::results::SearchOutcome;
    use std::collections::HashMap;

    fn response(status: u16, text: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            text: text.to_string(),
            url: "https://google.serper.dev/search".to_string(),
        }
    }

    #[test]
    fn test_serper_request() {
        let serper = Serper::new("key-123");
        let params = RequestParams::new("rust vs go", 7);
        let request = serper.request(&params).unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert!(request.url.contains("serper.dev"));
        assert_eq!(request.headers.get("X-API-KEY").map(String::as_str), Some("key-123"));
        assert!(serper.timeout().is_none());
        assert_eq!(request.json, Some(json!({"q": "rust vs go", "num": 7})));
    }

    #[test]
    fn test_serper_requires_key() {
        let serper = Serper::new("");
        let err = serper.request(&RequestParams::new("q", 10)).unwrap_err();
        assert!(matches!(err, SearchError::MissingApiKey("serper")));
    }

    #[test]
    fn test_serper_response() {
        let serper = Serper::new("k");
        let body = r#"{
            "searchParameters": {"q": "rust"},
            "organic": [
                {"title": "Rust", "link": "https://www.rust-lang.org", "snippet": "A language", "position": 1},
                {"title": "Rust (video game)", "link": "https://rust.facepunch.com"}
            ]
        }"#;

        let raw = serper
            .response(response(200, body), &RequestParams::new("rust", 10))
            .unwrap();
        assert!(!raw.is_error());

        match raw.format() {
            SearchOutcome::Found(results) => {
                assert_eq!(results.len(), 2);
                assert_eq!(results[0].link, "https://www.rust-lang.org");
                assert_eq!(results[1].snippet, "No description available");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_serper_http_error() {
        let serper = Serper::new("k");
        let err = serper
            .response(response(503, "unavailable"), &RequestParams::new("rust", 10))
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP error: 503");
    }
}
