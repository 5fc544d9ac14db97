//! Cached wrapper for the profile API client
//!
//! Data-source chain for every read: fresh cache, then network with
//! write-through, then a stale-tolerant cache re-read. First success wins;
//! only when all three miss does the original error propagate.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::cache::{posts_key, user_key, CacheStore};
use crate::client::{Post, ProfileApi, ProfileInfo};
use crate::error::Result;

/// Where the returned data actually came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Live API response
    Network,
    /// Fresh cache entry
    Cache,
    /// Expired cache entry served because the network path failed
    StaleCache,
}

impl DataSource {
    pub fn is_cached(&self) -> bool {
        matches!(self, DataSource::Cache | DataSource::StaleCache)
    }
}

/// Caching wrapper over any [`ProfileApi`] implementation.
///
/// Built without a store for `--no-cache`: every read then goes straight
/// to the inner client.
pub struct CachedProfileClient<C: ProfileApi> {
    inner: C,
    cache: Option<Mutex<CacheStore>>,
}

impl<C: ProfileApi> CachedProfileClient<C> {
    pub fn new(inner: C, store: Option<CacheStore>) -> Self {
        Self {
            inner,
            cache: store.map(Mutex::new),
        }
    }

    /// Get the inner client (for operations not part of the trait)
    #[allow(dead_code)]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn get_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        let guard = cache.lock().ok()?;
        guard
            .get(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    fn get_stale<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        let guard = cache.lock().ok()?;
        guard
            .get_stale(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    fn set_cached<T: Serialize>(&self, key: &str, data: &T) {
        if let Some(ref cache) = self.cache {
            if let (Ok(guard), Ok(value)) = (cache.lock(), serde_json::to_value(data)) {
                if let Err(e) = guard.put(key, &value) {
                    log::warn!("Failed to write cache entry {}: {}", key, e);
                }
            }
        }
    }

    /// Profile lookup with source attribution for the report header
    pub async fn profile(&self, handle: &str) -> Result<(ProfileInfo, DataSource)> {
        let key = user_key(handle);

        if let Some(profile) = self.get_cached::<ProfileInfo>(&key) {
            log::debug!("Cache hit: {}", key);
            return Ok((profile, DataSource::Cache));
        }

        match self.inner.get_profile(handle).await {
            Ok(profile) => {
                self.set_cached(&key, &profile);
                Ok((profile, DataSource::Network))
            }
            Err(err) => {
                // Stale data beats a hard failure
                if let Some(profile) = self.get_stale::<ProfileInfo>(&key) {
                    log::warn!("Serving stale cache for {} after failure: {}", key, err);
                    return Ok((profile, DataSource::StaleCache));
                }
                Err(err)
            }
        }
    }

    /// Recent-posts lookup with the same cache chain
    pub async fn posts(&self, user_id: &str, max_results: u32) -> Result<Vec<Post>> {
        let key = posts_key(user_id);

        if let Some(posts) = self.get_cached::<Vec<Post>>(&key) {
            log::debug!("Cache hit: {}", key);
            return Ok(posts);
        }

        match self.inner.get_posts(user_id, max_results).await {
            Ok(posts) => {
                self.set_cached(&key, &posts);
                Ok(posts)
            }
            Err(err) => {
                if let Some(posts) = self.get_stale::<Vec<Post>>(&key) {
                    log::warn!("Serving stale cache for {} after failure: {}", key, err);
                    return Ok(posts);
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<C: ProfileApi> ProfileApi for CachedProfileClient<C> {
    async fn get_profile(&self, handle: &str) -> Result<ProfileInfo> {
        self.profile(handle).await.map(|(profile, _)| profile)
    }

    async fn get_posts(&self, user_id: &str, max_results: u32) -> Result<Vec<Post>> {
        self.posts(user_id, max_results).await
    }

    async fn has_quota_headroom(&self) -> bool {
        self.inner.has_quota_headroom().await
    }
}
