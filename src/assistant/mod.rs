//! AI orchestration over search results
//!
//! Two calls to the hosted model: one to narrow a long result list to the
//! most relevant entries, one to write the answer. Neither lets a model
//! failure escape: filtering falls back to the first `top_n` results and
//! summarizing reports the failure in its text.

mod prompts;
mod selection;

pub use prompts::{format_results_for_prompt, relevance_prompt, summary_prompt};
pub use selection::parse_indices;

use crate::llm::{ChatCompletion, ChatError, ChatMessage, ChatRequest};
use crate::results::SearchResult;
use std::sync::Arc;
use tracing::{debug, warn};

/// Prefix of the text returned when summarizing fails
pub const SUMMARY_ERROR_PREFIX: &str = "Error generating summary: ";

const SUMMARY_TEMPERATURE: f32 = 0.7;
const SUMMARY_MAX_TOKENS: u32 = 2000;
const FILTER_TEMPERATURE: f32 = 0.3;
const FILTER_MAX_TOKENS: u32 = 50;

/// Summarizes and ranks search results with a chat-completion model
#[derive(Clone)]
pub struct Assistant {
    chat: Arc<dyn ChatCompletion>,
    model: String,
}

impl Assistant {
    pub fn new(chat: Arc<dyn ChatCompletion>, model: impl Into<String>) -> Self {
        Self {
            chat,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Summarize results, surfacing a failed completion as an error
    pub async fn try_summarize(
        &self,
        query: &str,
        results: &[SearchResult],
    ) -> Result<String, ChatError> {
        let results_text = format_results_for_prompt(results);
        let request = ChatRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::system(prompts::SUMMARY_SYSTEM_PROMPT),
                ChatMessage::user(summary_prompt(query, &results_text)),
            ],
        )
        .with_temperature(SUMMARY_TEMPERATURE)
        .with_max_tokens(SUMMARY_MAX_TOKENS);

        self.chat.complete(&request).await
    }

    /// Summarize results. A failed completion yields a string starting with
    /// [`SUMMARY_ERROR_PREFIX`] instead of an error.
    pub async fn summarize_results(&self, query: &str, results: &[SearchResult]) -> String {
        match self.try_summarize(query, results).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Summary generation failed: {}", e);
                format!("{}{}", SUMMARY_ERROR_PREFIX, e)
            }
        }
    }

    /// Keep the `top_n` results the model judges most relevant, in the order
    /// the model lists them.
    ///
    /// Lists of `top_n` or fewer come back unchanged without a model call.
    /// If the call fails or the reply names no usable index, the first
    /// `top_n` results are returned in their original order.
    pub async fn filter_relevant_results(
        &self,
        query: &str,
        results: &[SearchResult],
        top_n: usize,
    ) -> Vec<SearchResult> {
        if results.len() <= top_n {
            return results.to_vec();
        }

        let fallback = || results[..top_n].to_vec();

        let results_text = format_results_for_prompt(results);
        let request = ChatRequest::new(
            self.model.clone(),
            vec![ChatMessage::user(relevance_prompt(query, &results_text, top_n))],
        )
        .with_temperature(FILTER_TEMPERATURE)
        .with_max_tokens(FILTER_MAX_TOKENS);

        let reply = match self.chat.complete(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Relevance filtering failed, keeping first {}: {}", top_n, e);
                return fallback();
            }
        };

        let indices = parse_indices(&reply, results.len(), top_n);
        debug!("Model picked {:?} from reply '{}'", indices, reply.trim());

        if indices.is_empty() {
            warn!("No usable indices in filter reply '{}'", reply.trim());
            return fallback();
        }

        indices.into_iter().map(|i| results[i].clone()).collect()
    }
}
