//! Engine traits and types

use crate::network::{HttpRequest, HttpResponse};
use crate::results::{RawResults, SearchError};
use std::time::Duration;

/// Parameters for building a search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    /// Search query string
    pub query: String,
    /// Upper bound on results to request; providers may return fewer
    pub num_results: usize,
}

impl RequestParams {
    pub fn new(query: impl Into<String>, num_results: usize) -> Self {
        Self {
            query: query.into(),
            num_results,
        }
    }
}

/// A search provider, split into building the request and parsing the
/// reply so the transport stays in one place.
pub trait Engine: Send + Sync {
    /// Engine name
    fn name(&self) -> &str;

    /// Short description of the engine
    fn about(&self) -> EngineAbout {
        EngineAbout::default()
    }

    /// Per-request timeout; `None` defers to the client default
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// Build the HTTP request for a search
    fn request(&self, params: &RequestParams) -> Result<HttpRequest, SearchError>;

    /// Parse the HTTP response into the uniform raw payload
    fn response(
        &self,
        response: HttpResponse,
        params: &RequestParams,
    ) -> Result<RawResults, SearchError>;
}

/// Fail on any non-2xx status
pub(crate) fn ensure_success(response: &HttpResponse) -> Result<(), SearchError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(SearchError::Http {
            status: response.status,
        })
    }
}

/// Engine metadata
#[derive(Debug, Clone, Default)]
pub struct EngineAbout {
    /// Website URL
    pub website: Option<String>,
    /// Result format (HTML, JSON)
    pub results: String,
}

impl EngineAbout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn website(mut self, url: impl Into<String>) -> Self {
        self.website = Some(url.into());
        self
    }

    pub fn results_format(mut self, format: impl Into<String>) -> Self {
        self.results = format.into();
        self
    }
}
