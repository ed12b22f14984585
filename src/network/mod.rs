//! HTTP networking module
//!
//! Every outbound call (search providers and the completion API) goes
//! through [`HttpClient`] so they share one connection pool and one set of
//! timeout rules.

mod client;
mod request;
mod user_agent;

pub use client::HttpClient;
pub use request::{HttpMethod, HttpRequest, HttpResponse};
pub use user_agent::{accept_html, accept_json, generate_user_agent};
