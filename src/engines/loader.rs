//! Engine loader for selecting the configured search provider

use super::traits::Engine;
use super::{brave, duckduckgo, serper};
use crate::config::{SearchProvider, SearchSettings};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Loader for initializing the engine named in configuration
pub struct EngineLoader;

impl EngineLoader {
    /// Build the engine the settings select
    pub fn load(settings: &SearchSettings) -> Result<Arc<dyn Engine>> {
        let engine = Self::create_engine(settings.provider, settings)?;
        let about = engine.about();
        info!(
            "Loaded search engine: {} ({}, {})",
            engine.name(),
            about.website.as_deref().unwrap_or("-"),
            about.results
        );
        Ok(engine)
    }

    fn create_engine(
        provider: SearchProvider,
        settings: &SearchSettings,
    ) -> Result<Arc<dyn Engine>> {
        let engine: Arc<dyn Engine> = match provider {
            SearchProvider::Serper => {
                let key = settings
                    .serper_api_key
                    .clone()
                    .context("SERPER_API_KEY not found in environment variables")?;
                Arc::new(serper::Serper::new(key))
            }
            SearchProvider::Brave => Arc::new(brave::Brave::new(settings.brave_api_key.clone())),
            SearchProvider::DuckDuckGo => Arc::new(duckduckgo::DuckDuckGo::new()),
        };

        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_engine() {
        let engine = EngineLoader::load(&SearchSettings::default()).unwrap();
        assert_eq!(engine.name(), "duckduckgo");
    }

    #[test]
    fn test_load_selects_by_provider() {
        let settings = SearchSettings {
            provider: SearchProvider::Serper,
            serper_api_key: Some("key".to_string()),
            ..Default::default()
        };
        assert_eq!(EngineLoader::load(&settings).unwrap().name(), "serper");

        let settings = SearchSettings {
            provider: SearchProvider::Brave,
            ..Default::default()
        };
        assert_eq!(EngineLoader::load(&settings).unwrap().name(), "brave");
    }

    #[test]
    fn test_serper_without_key_fails() {
        let settings = SearchSettings {
            provider: SearchProvider::Serper,
            ..Default::default()
        };
        assert!(EngineLoader::load(&settings).is_err());
    }
}
