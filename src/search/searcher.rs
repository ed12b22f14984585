//! Search execution against a single engine

use crate::engines::{Engine, RequestParams};
use crate::network::HttpClient;
use crate::results::{RawResults, SearchError, SearchOutcome};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Anything that can answer a web search
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Name of the backing provider
    fn name(&self) -> &str;

    /// Run one search. Failures come back as a payload with `error` set,
    /// never as a panic or an `Err`.
    async fn search(&self, query: &str, num_results: usize) -> RawResults;

    /// Format a raw payload into results, preserving provider order
    fn format_results(&self, raw: &RawResults) -> SearchOutcome {
        raw.format()
    }
}

/// Search executor that runs an engine through the shared HTTP client
pub struct Searcher {
    /// HTTP client for making requests
    client: HttpClient,
    /// Active engine
    engine: Arc<dyn Engine>,
}

impl Searcher {
    /// Create a new search executor
    pub fn new(client: HttpClient, engine: Arc<dyn Engine>) -> Self {
        Self { client, engine }
    }

    async fn try_search(&self, params: &RequestParams) -> Result<RawResults, SearchError> {
        let mut request = self.engine.request(params)?;
        if request.timeout.is_none() {
            request.timeout = self.engine.timeout();
        }

        let response = self.client.execute(request).await?;
        self.engine.response(response, params)
    }
}

#[async_trait]
impl WebSearch for Searcher {
    fn name(&self) -> &str {
        self.engine.name()
    }

    async fn search(&self, query: &str, num_results: usize) -> RawResults {
        let params = RequestParams::new(query, num_results);
        let start = Instant::now();

        info!("Searching {} for '{}'", self.engine.name(), query);

        match self.try_search(&params).await {
            Ok(raw) => {
                debug!(
                    "Engine {} returned {} results in {:?}",
                    self.engine.name(),
                    raw.organic.len(),
                    start.elapsed()
                );
                raw
            }
            Err(e) => {
                warn!("Search error from {}: {}", self.engine.name(), e);
                RawResults::failure(e)
            }
        }
    }
}
