//! Web server module
//!
//! JSON API over the research pipeline: `POST /api/search` and
//! `GET /api/health`.

mod handlers;
mod routes;
mod state;

pub use handlers::{ErrorResponse, HealthResponse, SearchRequest, SearchResponse};
pub use routes::create_router;
pub use state::AppState;
