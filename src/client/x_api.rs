//! X API v2 client implementation

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::models::{Post, ProfileInfo, TweetsEnvelope, UserEnvelope};
use super::rate_limit::RateLimitState;
use super::ProfileApi;
use crate::config::QuotaConfig;
use crate::error::{ApiError, Result};

/// X API v2 base URL
const API_BASE_URL: &str = "https://api.twitter.com/2";

/// Per-attempt request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport failures are retried this many times in total
const MAX_ATTEMPTS: u32 = 3;

/// Backoff grows linearly: 2s, 4s, 6s
const BACKOFF_STEP: Duration = Duration::from_secs(2);

/// Posts older than this are not requested
const RECENT_DAYS: i64 = 7;

/// The API rejects `max_results` outside this range
const MAX_RESULTS_BOUNDS: (u32, u32) = (5, 100);

/// X API client with local quota tracking
pub struct XApiClient {
    http: HttpClient,
    base_url: String,
    bearer_token: String,
    rate_limit: RwLock<RateLimitState>,
}

impl XApiClient {
    /// Create a new client. `api_base` overrides the public endpoint
    /// (tests point it at a local mock server).
    pub fn new(bearer_token: String, api_base: Option<String>, quota: &QuotaConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let rate_limit = RateLimitState::new(
            quota.window_limit,
            quota.window_minutes,
            quota.monthly_limit,
        );

        Ok(Self {
            http,
            base_url: api_base.unwrap_or_else(|| API_BASE_URL.to_string()),
            bearer_token,
            rate_limit: RwLock::new(rate_limit),
        })
    }

    /// Snapshot of the quota counters
    #[allow(dead_code)]
    pub async fn quota(&self) -> RateLimitState {
        self.rate_limit.read().await.clone()
    }

    /// Whether enough window budget remains for supplementary fetches
    pub async fn has_headroom(&self) -> bool {
        self.rate_limit.write().await.has_headroom()
    }

    /// Cheap credential probe used by `giftscope init`. A 404 still proves
    /// the token is accepted; only a 401 fails.
    pub async fn verify_token(&self) -> Result<()> {
        let url = format!("{}/users/by/username/x", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(ApiError::from)?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(ApiError::AuthFailure.into()),
            _ => Ok(()),
        }
    }

    /// Issue one rate-checked GET, retrying transport failures with linear
    /// backoff. HTTP-level failures (401/404/429/5xx) are not retried.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        resource: &str,
    ) -> Result<T> {
        self.rate_limit.write().await.check()?;

        let url = format!("{}{}", self.base_url, path);
        let mut last_err = ApiError::Network("No attempts made".to_string());

        for attempt in 1..=MAX_ATTEMPTS {
            let sent = self
                .http
                .get(&url)
                .bearer_auth(&self.bearer_token)
                .query(query)
                .send()
                .await;

            match sent {
                Ok(response) => return self.handle_response(response, resource).await,
                Err(e) => {
                    last_err = ApiError::from(e);
                    log::warn!(
                        "Request attempt {}/{} failed: {}",
                        attempt,
                        MAX_ATTEMPTS,
                        last_err
                    );
                    if attempt < MAX_ATTEMPTS {
                        tokio::time::sleep(BACKOFF_STEP * attempt).await;
                    }
                }
            }
        }

        Err(last_err.into())
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        resource: &str,
    ) -> Result<T> {
        let status = response.status();
        match status {
            StatusCode::OK => {
                self.rate_limit.write().await.record_success();
                let data = response.json::<T>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(data)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::AuthFailure.into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(resource.to_string()).into()),
            StatusCode::TOO_MANY_REQUESTS => {
                let server_reset = parse_reset_header(&response);
                let wait = {
                    let mut limit = self.rate_limit.write().await;
                    limit.on_throttled(server_reset);
                    (limit.reset_time() - Utc::now()).to_std().unwrap_or_default()
                };
                Err(ApiError::QuotaExceeded {
                    wait,
                    monthly: false,
                }
                .into())
            }
            status if status.is_server_error() => {
                let msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(msg).into())
            }
            _ => Err(ApiError::InvalidResponse(format!("Unexpected status code: {}", status)).into()),
        }
    }
}

/// `x-rate-limit-reset` carries a Unix epoch second
fn parse_reset_header(response: &Response) -> Option<DateTime<Utc>> {
    response
        .headers()
        .get("x-rate-limit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|epoch| DateTime::from_timestamp(epoch, 0))
}

fn clamp_max_results(requested: u32) -> u32 {
    requested.clamp(MAX_RESULTS_BOUNDS.0, MAX_RESULTS_BOUNDS.1)
}

#[async_trait]
impl ProfileApi for XApiClient {
    async fn get_profile(&self, handle: &str) -> Result<ProfileInfo> {
        log::info!("Fetching profile: {}", handle);

        let path = format!("/users/by/username/{}", handle);
        let query = [(
            "user.fields",
            "created_at,description,location,public_metrics,verified".to_string(),
        )];

        let envelope: UserEnvelope = self.get_json(&path, &query, handle).await?;
        let user = envelope
            .data
            .ok_or_else(|| ApiError::NotFound(handle.to_string()))?;

        Ok(user.into())
    }

    async fn get_posts(&self, user_id: &str, max_results: u32) -> Result<Vec<Post>> {
        log::info!("Fetching recent posts: {}", user_id);

        let start_time = (Utc::now() - chrono::Duration::days(RECENT_DAYS))
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let path = format!("/users/{}/tweets", user_id);
        let query = [
            ("max_results", clamp_max_results(max_results).to_string()),
            ("tweet.fields", "created_at,text,entities".to_string()),
            ("exclude", "retweets,replies".to_string()),
            ("start_time", start_time),
        ];

        let envelope: Result<TweetsEnvelope> = self.get_json(&path, &query, user_id).await;
        match envelope {
            Ok(envelope) => Ok(envelope.data.into_iter().map(Post::from).collect()),
            // A 404 here just means no visible timeline; posts are
            // supplementary, so that reads as empty rather than an error.
            Err(crate::error::Error::Api(ApiError::NotFound(_))) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn has_quota_headroom(&self) -> bool {
        self.has_headroom().await
    }
}
