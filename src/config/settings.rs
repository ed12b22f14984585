//! Settings structures for WebSearch Agent configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Main settings structure, mirrors `settings.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub search: SearchSettings,
    pub ai: AiSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("GROQ_API_KEY") {
            self.ai.api_key = non_empty(val);
        }
        if let Ok(val) = std::env::var("GROQ_MODEL") {
            self.ai.model = val;
        }
        if let Ok(val) = std::env::var("GROQ_BASE_URL") {
            self.ai.base_url = val;
        }
        if let Ok(val) = std::env::var("SERPER_API_KEY") {
            self.search.serper_api_key = non_empty(val);
        }
        if let Ok(val) = std::env::var("BRAVE_API_KEY") {
            self.search.brave_api_key = non_empty(val);
        }
        if let Ok(val) = std::env::var("SEARCH_PROVIDER") {
            match val.parse() {
                Ok(provider) => self.search.provider = provider,
                Err(e) => tracing::warn!("Ignoring SEARCH_PROVIDER: {}", e),
            }
        }
        if let Ok(val) = std::env::var("WEBSEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("WEBSEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
    }

    /// Check values the clients cannot start without. The search provider's
    /// own key is checked when its engine is loaded.
    pub fn validate(&self) -> Result<()> {
        if self.ai.api_key.is_none() {
            bail!("GROQ_API_KEY not found in environment variables");
        }

        let timeout = self.outgoing.request_timeout;
        if !timeout.is_finite() || timeout <= 0.0 {
            bail!(
                "outgoing.request_timeout must be a positive number of seconds, got {}",
                timeout
            );
        }

        if self.search.max_results == 0 {
            bail!("search.max_results must be at least 1");
        }

        Ok(())
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_TIMEOUT as f64,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Which search backend answers queries
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// Serper.dev hosted Google search API
    Serper,
    /// Brave Search API
    Brave,
    /// DuckDuckGo Lite HTML, no key required
    #[default]
    #[value(name = "duckduckgo", alias = "ddg")]
    DuckDuckGo,
}

impl SearchProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Serper => "serper",
            Self::Brave => "brave",
            Self::DuckDuckGo => "duckduckgo",
        }
    }
}

impl fmt::Display for SearchProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serper" => Ok(Self::Serper),
            "brave" => Ok(Self::Brave),
            "duckduckgo" | "ddg" => Ok(Self::DuckDuckGo),
            other => bail!("Unknown search provider: {}", other),
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Selected backend
    pub provider: SearchProvider,
    /// Results requested when the caller does not say
    pub default_results: usize,
    /// Upper bound accepted from callers
    pub max_results: usize,
    /// Serper.dev API key
    pub serper_api_key: Option<String>,
    /// Brave Search subscription token
    pub brave_api_key: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            provider: SearchProvider::default(),
            default_results: 10,
            max_results: 20,
            serper_api_key: None,
            brave_api_key: None,
        }
    }
}

/// Language model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// Groq API key
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// OpenAI-compatible API root
    pub base_url: String,
    /// How many results the relevance filter keeps
    pub top_n: usize,
    /// Whether the relevance filter runs by default
    pub filter_results: bool,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "llama-3.3-70b-versatile".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            top_n: 5,
            filter_results: true,
        }
    }
}
