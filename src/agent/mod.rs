//! Research pipeline: search, narrow, summarize
//!
//! One query runs start to finish: a single search call, an optional
//! relevance-filter call, then one summary call. Nothing is shared between
//! queries beyond the clients themselves.

use crate::assistant::Assistant;
use crate::config::Settings;
use crate::engines::EngineLoader;
use crate::llm::GroqClient;
use crate::network::HttpClient;
use crate::results::{SearchOutcome, SearchResult};
use crate::search::{Searcher, WebSearch};
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Why a query produced no report
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    #[error("Failed to fetch search results: {0}")]
    SearchFailed(String),
    #[error("No search results found")]
    NoResults,
}

/// Knobs that shape a single research run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResearchOptions {
    /// Results requested when the caller does not say
    pub default_results: usize,
    /// Largest request accepted from callers
    pub max_results: usize,
    /// Results kept for summarizing
    pub top_n: usize,
    /// Whether the relevance filter runs unless the caller opts out
    pub filter_results: bool,
}

impl Default for ResearchOptions {
    fn default() -> Self {
        Self {
            default_results: 10,
            max_results: 20,
            top_n: 5,
            filter_results: true,
        }
    }
}

impl From<&Settings> for ResearchOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            default_results: settings.search.default_results,
            max_results: settings.search.max_results,
            top_n: settings.ai.top_n,
            filter_results: settings.ai.filter_results,
        }
    }
}

/// Everything one query produced
#[derive(Debug, Clone, Serialize)]
pub struct ResearchReport {
    pub query: String,
    /// Number of results the search returned before narrowing
    pub total_results: usize,
    /// Results the summary was written from
    pub results: Vec<SearchResult>,
    /// Every result the search returned
    pub all_results: Vec<SearchResult>,
    /// Whether the model chose `results`
    pub filtered: bool,
    pub summary: String,
}

/// Composes one search adapter with the assistant
pub struct ResearchAgent {
    searcher: Arc<dyn WebSearch>,
    assistant: Assistant,
    options: ResearchOptions,
}

impl ResearchAgent {
    pub fn new(searcher: Arc<dyn WebSearch>, assistant: Assistant, options: ResearchOptions) -> Self {
        Self {
            searcher,
            assistant,
            options,
        }
    }

    /// Build the agent the settings describe, failing on missing credentials
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let client = HttpClient::with_settings(&settings.outgoing)
            .context("failed to build HTTP client")?;

        let engine = EngineLoader::load(&settings.search)?;
        let searcher = Searcher::new(client.clone(), engine);

        let api_key = settings
            .ai
            .api_key
            .clone()
            .context("GROQ_API_KEY not found in environment variables")?;
        let chat = GroqClient::new(client, settings.ai.base_url.clone(), api_key);
        let assistant = Assistant::new(Arc::new(chat), settings.ai.model.clone());

        info!(
            "Research agent ready (search: {}, model: {})",
            settings.search.provider,
            assistant.model()
        );

        Ok(Self::new(
            Arc::new(searcher),
            assistant,
            ResearchOptions::from(settings),
        ))
    }

    pub fn options(&self) -> &ResearchOptions {
        &self.options
    }

    pub fn search_provider(&self) -> &str {
        self.searcher.name()
    }

    pub fn model(&self) -> &str {
        self.assistant.model()
    }

    /// Resolve a caller's requested result count into `1..=max_results`
    pub fn result_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.options.default_results)
            .clamp(1, self.options.max_results.max(1))
    }

    /// Run the whole pipeline for one query
    pub async fn search_and_summarize(
        &self,
        query: &str,
        num_results: usize,
        filter_results: bool,
    ) -> Result<ResearchReport, AgentError> {
        let top_n = self.options.top_n;

        info!("[1/3] Fetching search results for '{}'", query);
        let raw = self.searcher.search(query, num_results).await;
        let all_results = match self.searcher.format_results(&raw) {
            SearchOutcome::Found(results) if results.is_empty() => {
                return Err(AgentError::NoResults)
            }
            SearchOutcome::Found(results) => results,
            SearchOutcome::Failed { reason } => return Err(AgentError::SearchFailed(reason)),
        };
        info!("Found {} results", all_results.len());

        let filtered = filter_results && all_results.len() > top_n;
        let results = if filtered {
            info!("[2/3] Filtering most relevant results with AI");
            let selected = self
                .assistant
                .filter_relevant_results(query, &all_results, top_n)
                .await;
            info!("Selected {} most relevant results", selected.len());
            selected
        } else {
            info!("[2/3] Using the first {} results (no filtering)", top_n);
            all_results.iter().take(top_n).cloned().collect()
        };

        info!("[3/3] Generating AI-powered summary");
        let summary = self.assistant.summarize_results(query, &results).await;

        Ok(ResearchReport {
            query: query.to_string(),
            total_results: all_results.len(),
            results,
            all_results,
            filtered,
            summary,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory stand-ins for the search provider and the model

    use super::*;
    use crate::llm::{ChatCompletion, ChatError, ChatRequest};
    use crate::results::{OrganicEntry, RawResults};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    pub struct FixedSearch {
        pub raw: RawResults,
        pub calls: AtomicUsize,
    }

    impl FixedSearch {
        pub fn with_results(count: usize) -> Arc<Self> {
            let organic = (1..=count)
                .map(|i| {
                    OrganicEntry::new(
                        format!("Result {}", i),
                        format!("https://example.com/{}", i),
                        format!("Snippet {}", i),
                    )
                })
                .collect();
            Self::with_raw(RawResults::with_organic(organic))
        }

        pub fn with_raw(raw: RawResults) -> Arc<Self> {
            Arc::new(Self {
                raw,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl WebSearch for FixedSearch {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn search(&self, _query: &str, num_results: usize) -> RawResults {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut raw = self.raw.clone();
            raw.organic.truncate(num_results);
            raw
        }
    }

    /// Answers filter prompts with `filter_reply` and everything else with
    /// `summary`, recording each request
    pub struct RecordingChat {
        pub filter_reply: Result<String, String>,
        pub summary: Result<String, String>,
        pub requests: Mutex<Vec<ChatRequest>>,
    }

    impl RecordingChat {
        pub fn new(filter_reply: &str, summary: &str) -> Arc<Self> {
            Arc::new(Self {
                filter_reply: Ok(filter_reply.to_string()),
                summary: Ok(summary.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub fn failing() -> Arc<Self> {
            Arc::new(Self {
                filter_reply: Err("connection reset".to_string()),
                summary: Err("connection reset".to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatCompletion for RecordingChat {
        async fn complete(&self, request: &ChatRequest) -> Result<String, ChatError> {
            self.requests.lock().unwrap().push(request.clone());
            let is_filter = request.messages.len() == 1;
            let reply = if is_filter {
                &self.filter_reply
            } else {
                &self.summary
            };
            reply.clone().map_err(ChatError::Transport)
        }
    }

    pub fn agent(search: Arc<FixedSearch>, chat: Arc<RecordingChat>) -> ResearchAgent {
        ResearchAgent::new(
            search,
            Assistant::new(chat, "test-model"),
            ResearchOptions::default(),
        )
    }
}
