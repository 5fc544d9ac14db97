//! Scripted mock of the profile API for unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::models::{Post, ProfileInfo};
use super::ProfileApi;
use crate::error::{ApiError, Error, Result};

/// Mock client returning pre-scripted responses in order.
///
/// Each call pops the next scripted response; when the script runs dry the
/// call fails with `NotFound` so an over-calling test fails loudly.
#[derive(Default)]
pub struct MockProfileClient {
    profile_script: Mutex<VecDeque<Result<ProfileInfo>>>,
    posts_script: Mutex<VecDeque<Result<Vec<Post>>>>,
    profile_calls: AtomicUsize,
    posts_calls: AtomicUsize,
}

impl MockProfileClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_profile(&self, response: Result<ProfileInfo>) {
        self.profile_script.lock().unwrap().push_back(response);
    }

    pub fn script_posts(&self, response: Result<Vec<Post>>) {
        self.posts_script.lock().unwrap().push_back(response);
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn posts_calls(&self) -> usize {
        self.posts_calls.load(Ordering::SeqCst)
    }
}

/// A plausible profile for tests
pub fn sample_profile(handle: &str) -> ProfileInfo {
    ProfileInfo {
        id: "100001".to_string(),
        handle: handle.to_string(),
        location: Some("上海".to_string()),
        verified: false,
        description: Some("测试账号".to_string()),
        followers: 1234,
        following: 56,
        post_count: 789,
    }
}

/// A post with the given text, created now
pub fn sample_post(text: &str) -> Post {
    Post {
        text: text.to_string(),
        created_at: Utc::now(),
        tags: Vec::new(),
    }
}

#[async_trait]
impl ProfileApi for MockProfileClient {
    async fn get_profile(&self, handle: &str) -> Result<ProfileInfo> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profile_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Api(ApiError::NotFound(handle.to_string()))))
    }

    async fn get_posts(&self, user_id: &str, _max_results: u32) -> Result<Vec<Post>> {
        self.posts_calls.fetch_add(1, Ordering::SeqCst);
        self.posts_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Api(ApiError::NotFound(user_id.to_string()))))
    }
}
