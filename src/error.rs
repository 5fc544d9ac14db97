//! Error types for the giftscope CLI

use std::time::Duration;
use thiserror::Error;

/// Result type alias for giftscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Run `giftscope init` to set up your bearer token.")]
    AuthFailure,

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("API quota exceeded. Window resets in {wait:?}")]
    QuotaExceeded {
        /// Time until the current rate-limit window resets. Zero when the
        /// monthly ceiling refused, since waiting cannot help there.
        wait: Duration,
        /// True when the non-resetting monthly cap, not the window, refused.
        monthly: bool,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `giftscope init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Bearer token not configured. Run `giftscope init` or set GIFTSCOPE_BEARER_TOKEN.")]
    MissingToken,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Cache storage errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(String),

    #[error("Could not determine cache directory")]
    NoHome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_auth_failure_message() {
        let err = ApiError::AuthFailure;
        assert!(err.to_string().contains("giftscope init"));
    }

    #[test]
    fn test_api_error_not_found() {
        let err = ApiError::NotFound("ghostuser42".to_string());
        assert!(err.to_string().contains("ghostuser42"));
    }

    #[test]
    fn test_api_error_quota_exceeded() {
        let err = ApiError::QuotaExceeded {
            wait: Duration::from_secs(90),
            monthly: false,
        };
        let msg = err.to_string();
        assert!(msg.contains("quota"));
        assert!(msg.contains("90"));
    }

    #[test]
    fn test_api_error_network() {
        let err = ApiError::Network("Connection refused".to_string());
        assert!(err.to_string().contains("Connection refused"));
    }

    #[test]
    fn test_api_error_invalid_response() {
        let err = ApiError::InvalidResponse("Missing field 'id'".to_string());
        assert!(err.to_string().contains("Missing field"));
    }

    #[test]
    fn test_api_error_server_error() {
        let err = ApiError::ServerError("Internal error".to_string());
        assert!(err.to_string().contains("Internal error"));
    }

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound;
        assert!(err.to_string().contains("giftscope init"));
    }

    #[test]
    fn test_config_error_parse() {
        let err = ConfigError::ParseError("unexpected key".to_string());
        assert!(err.to_string().contains("unexpected key"));
    }

    #[test]
    fn test_config_error_missing_token() {
        let err = ConfigError::MissingToken;
        assert!(err.to_string().contains("GIFTSCOPE_BEARER_TOKEN"));
    }

    #[test]
    fn test_error_from_api_error() {
        let api_err = ApiError::AuthFailure;
        let err: Error = api_err.into();

        match err {
            Error::Api(ApiError::AuthFailure) => (),
            _ => panic!("Expected Error::Api(ApiError::AuthFailure)"),
        }
    }

    #[test]
    fn test_error_from_config_error() {
        let cfg_err = ConfigError::NotFound;
        let err: Error = cfg_err.into();

        match err {
            Error::Config(ConfigError::NotFound) => (),
            _ => panic!("Expected Error::Config(ConfigError::NotFound)"),
        }
    }

    #[test]
    fn test_error_invalid_input() {
        let err = Error::InvalidInput("empty handle".to_string());
        assert!(err.to_string().contains("empty handle"));
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
