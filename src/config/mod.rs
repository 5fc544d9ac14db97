//! Configuration management for giftscope

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Environment variable overriding the configured bearer token
pub const ENV_BEARER_TOKEN: &str = "GIFTSCOPE_BEARER_TOKEN";

/// Environment variable overriding the API base URL (used by tests)
pub const ENV_API_BASE: &str = "GIFTSCOPE_API_BASE";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// X API bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    /// API base URL override (defaults to the public X API v2)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Cache directory override (defaults to the platform cache dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Cache entry lifetime in hours
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Quota settings mirroring the external API plan tier
    #[serde(default)]
    pub quota: QuotaConfig,

    /// Maximum posts fetched per analysis (clamped to the API's 5..=100)
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

/// Quota-window parameters for the external API.
///
/// Defaults mirror the free plan: 1 request per 15-minute window and a
/// 100-request monthly ceiling that never resets mid-month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Requests allowed per window
    #[serde(default = "default_window_limit")]
    pub window_limit: u32,

    /// Window length in minutes
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u64,

    /// Monthly request ceiling
    #[serde(default = "default_monthly_limit")]
    pub monthly_limit: u32,
}

fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_max_results() -> u32 {
    10
}

fn default_window_limit() -> u32 {
    1
}

fn default_window_minutes() -> u64 {
    15
}

fn default_monthly_limit() -> u32 {
    100
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            window_limit: default_window_limit(),
            window_minutes: default_window_minutes(),
            monthly_limit: default_monthly_limit(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bearer_token: None,
            api_base: None,
            cache_dir: None,
            cache_ttl_hours: default_cache_ttl_hours(),
            quota: QuotaConfig::default(),
            max_results: default_max_results(),
        }
    }
}

impl Config {
    /// Get the default config file path (~/.giftscope/config.yaml)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".giftscope").join("config.yaml"))
    }

    /// Load configuration from an explicit path, or the default location.
    ///
    /// A missing file is not an error when no explicit path was given: the
    /// tool runs fine on defaults plus environment variables. An explicit
    /// `--config` pointing at a missing file is reported.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let path = PathBuf::from(p);
                if !path.exists() {
                    return Err(ConfigError::NotFound.into());
                }
                Self::load_from(path)?
            }
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::default_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The config holds a credential; keep it private on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Apply environment variable overrides on top of file values
    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(ENV_BEARER_TOKEN) {
            if !token.is_empty() {
                self.bearer_token = Some(token);
            }
        }
        if let Ok(base) = std::env::var(ENV_API_BASE) {
            if !base.is_empty() {
                self.api_base = Some(base);
            }
        }
    }

    /// Return the bearer token or fail with setup guidance
    pub fn require_token(&self) -> Result<&str> {
        self.bearer_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingToken.into())
    }

    /// Resolve the cache directory (config override or platform default)
    pub fn resolve_cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_base = dirs::cache_dir().ok_or(crate::error::CacheError::NoHome)?;
        Ok(cache_base.join("giftscope"))
    }

    /// Cache entry lifetime as a std Duration
    pub fn cache_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cache_ttl_hours * 60 * 60)
    }
}
