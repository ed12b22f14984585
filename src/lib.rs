//! WebSearch Agent: a research assistant that searches the web and
//! summarizes what it finds with a hosted language model.
//!
//! The flow for a single question is search, format, optionally narrow the
//! results with the model, then summarize. Each stage recovers locally so a
//! failing provider never takes the caller down with it.

pub mod agent;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod engines;
pub mod llm;
pub mod network;
pub mod results;
pub mod search;
pub mod web;

pub use agent::{AgentError, ResearchAgent, ResearchReport};
pub use assistant::Assistant;
pub use config::Settings;
pub use engines::Engine;
pub use results::{RawResults, SearchOutcome, SearchResult};
pub use search::{Searcher, WebSearch};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Timeout for the keyless and alternate search providers, in seconds
pub const PROVIDER_TIMEOUT: u64 = 10;

/// Default timeout for outgoing requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 60;
