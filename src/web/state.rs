//! Application state shared across handlers

use crate::agent::ResearchAgent;
use std::sync::Arc;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    /// Research agent, absent when startup could not build one
    pub agent: Option<Arc<ResearchAgent>>,
}

impl AppState {
    pub fn new(agent: ResearchAgent) -> Self {
        Self {
            agent: Some(Arc::new(agent)),
        }
    }

    /// State for a server whose credentials were not usable
    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.agent.is_some()
    }
}
