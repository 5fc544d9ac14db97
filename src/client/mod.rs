//! X API client
//!
//! [`ProfileApi`] is the seam between the orchestrator and the network:
//! the HTTP implementation ([`XApiClient`]) and the caching wrapper
//! ([`CachedProfileClient`](crate::cache::CachedProfileClient)) both
//! implement it, as does the scripted mock used in tests.

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod mock;
pub mod models;
pub mod rate_limit;
pub mod x_api;

#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockProfileClient;
pub use models::{Post, ProfileInfo};
#[allow(unused_imports)]
pub use rate_limit::{QuotaState, RateLimitState, QUOTA_BUFFER};
pub use x_api::XApiClient;

/// Read operations against the profile API
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Fetch public profile data for a handle (without the leading `@`)
    async fn get_profile(&self, handle: &str) -> Result<ProfileInfo>;

    /// Fetch the user's posts from the last 7 days, excluding reposts and
    /// replies, capped at `max_results`
    async fn get_posts(&self, user_id: &str, max_results: u32) -> Result<Vec<Post>>;

    /// Whether a supplementary call may be spent right now without eating
    /// into the reserved quota buffer. Implementations without quota
    /// tracking always have headroom.
    async fn has_quota_headroom(&self) -> bool {
        true
    }
}
