//! HTTP request handlers

use super::state::AppState;
use crate::agent::AgentError;
use crate::results::SearchResult;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Body of `POST /api/search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub num_results: Option<usize>,
    #[serde(default)]
    pub filter_results: Option<bool>,
}

/// Successful search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub summary: String,
    pub results: Vec<SearchResult>,
    pub total_results: usize,
}

/// Failure body shared by every error status
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub agent_initialized: bool,
    pub version: String,
}

/// An error status with a user-facing message
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let agent = state.agent.as_ref().ok_or_else(|| {
        ApiError::internal("Agent not properly configured. Please check your API keys.")
    })?;

    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected search body: {}", rejection.body_text());
        ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let query = request.query.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(ApiError::bad_request("Please enter a search query"));
    }

    let num_results = agent.result_count(request.num_results);
    let filter_results = request
        .filter_results
        .unwrap_or(agent.options().filter_results);

    info!(
        "API search '{}' (num_results={}, filter={})",
        query, num_results, filter_results
    );

    let report = agent
        .search_and_summarize(query, num_results, filter_results)
        .await
        .map_err(|e| {
            match &e {
                AgentError::SearchFailed(reason) => error!("Search failed: {}", reason),
                AgentError::NoResults => warn!("No results for '{}'", query),
            }
            ApiError::internal("Failed to fetch search results. Please try again.")
        })?;

    Ok(Json(SearchResponse {
        success: true,
        query: report.query,
        summary: report.summary,
        results: report.results,
        total_results: report.total_results,
    }))
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        agent_initialized: state.is_initialized(),
        version: crate::VERSION.to_string(),
    })
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}
