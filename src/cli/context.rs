//! Command execution context
//!
//! Bundles config loading, client construction, and cache wiring so the
//! command handlers stay free of boilerplate.

use crate::analysis::AnalysisContext;
use crate::cache::{CacheStore, CachedProfileClient};
use crate::client::XApiClient;
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config and the wired-up client
pub struct CommandContext {
    /// Loaded configuration (env overrides applied)
    pub config: Config,
    /// Analysis pipeline over the cached API client
    pub analysis: AnalysisContext<XApiClient>,
}

impl CommandContext {
    /// Load config, build the authenticated client, and attach the cache.
    ///
    /// # Arguments
    /// * `config_path` - Optional path to the config file
    /// * `no_cache` - Whether to bypass the response cache
    /// * `max_results_override` - CLI override for posts per request
    pub fn new(
        config_path: Option<&str>,
        no_cache: bool,
        max_results_override: Option<u32>,
    ) -> Result<Self> {
        let config = Config::load_at(config_path)?;
        let token = config.require_token()?.to_string();

        let client = XApiClient::new(token, config.api_base.clone(), &config.quota)?;

        let store = if no_cache {
            log::debug!("Cache disabled via --no-cache");
            None
        } else {
            Some(CacheStore::open_at(
                &config.resolve_cache_dir()?,
                config.cache_ttl(),
            )?)
        };

        let cached = CachedProfileClient::new(client, store);
        let max_results = max_results_override.unwrap_or(config.max_results);

        Ok(Self {
            analysis: AnalysisContext::new(cached, max_results),
            config,
        })
    }
}
