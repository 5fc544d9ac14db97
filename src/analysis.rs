//! Analysis orchestration
//!
//! [`analyze_profile`] is the single entry point behind the CLI: handle in,
//! markdown report out. Every failure path renders as one of the report
//! shapes, so this function never returns an error.

use crate::analyzer::{self, TextAnalyzer};
use crate::cache::CachedProfileClient;
use crate::client::ProfileApi;
use crate::error::{ApiError, Error, Result};
use crate::report;

/// Everything one analysis run needs
pub struct AnalysisContext<C: ProfileApi> {
    client: CachedProfileClient<C>,
    max_results: u32,
    collaborator: Option<Box<dyn TextAnalyzer>>,
}

impl<C: ProfileApi> AnalysisContext<C> {
    pub fn new(client: CachedProfileClient<C>, max_results: u32) -> Self {
        Self {
            client,
            max_results,
            collaborator: None,
        }
    }

    /// Plug in an external text-analysis collaborator
    #[allow(dead_code)]
    pub fn with_collaborator(mut self, collaborator: Box<dyn TextAnalyzer>) -> Self {
        self.collaborator = Some(collaborator);
        self
    }

    #[allow(dead_code)]
    pub fn client(&self) -> &CachedProfileClient<C> {
        &self.client
    }
}

/// Strip the optional leading `@` and surrounding whitespace.
///
/// `@alice` and `alice` must name the same profile, hit the same cache
/// entry, and produce the same report.
pub fn normalize_handle(raw: &str) -> Result<String> {
    let handle = raw.trim().trim_start_matches('@').trim();
    if handle.is_empty() {
        return Err(Error::InvalidInput("empty handle".to_string()));
    }
    Ok(handle.to_string())
}

/// Analyze one profile and render the markdown report.
pub async fn analyze_profile<C: ProfileApi>(ctx: &AnalysisContext<C>, raw_handle: &str) -> String {
    let handle = match normalize_handle(raw_handle) {
        Ok(handle) => handle,
        Err(_) => return report::render_invalid_input(),
    };

    let (profile, source) = match ctx.client.profile(&handle).await {
        Ok(found) => found,
        Err(Error::Api(ApiError::NotFound(_))) => return report::render_not_found(&handle),
        Err(Error::Api(ApiError::AuthFailure)) => return report::render_auth_failure(),
        Err(Error::Api(ApiError::QuotaExceeded { wait, monthly })) => {
            return report::render_quota_wait(wait, monthly)
        }
        Err(err) => {
            log::error!("Profile fetch failed for {}: {}", handle, err);
            return report::render_failure();
        }
    };

    // Posts are supplementary: skipped when the quota buffer would be
    // eaten, and any fetch failure degrades to a profile-only report.
    let posts = if ctx.client.has_quota_headroom().await {
        match ctx.client.posts(&profile.id, ctx.max_results).await {
            Ok(posts) => posts,
            Err(err) => {
                log::warn!("Posts fetch failed for {}: {}", profile.id, err);
                Vec::new()
            }
        }
    } else {
        log::info!("Skipping posts fetch: quota buffer reserved");
        Vec::new()
    };

    let (analysis, collab_gifts) =
        analyzer::analyze_with(ctx.collaborator.as_deref(), &posts).await;

    let recommendations = if collab_gifts.is_empty() {
        analyzer::recommend(&analysis)
    } else {
        let mut gifts = collab_gifts;
        gifts.truncate(5);
        gifts
    };

    report::render_report(&profile, &analysis, &recommendations, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::client::mock::{sample_post, sample_profile, MockProfileClient};
    use std::time::Duration;
    use tempfile::tempdir;

    fn context(mock: MockProfileClient) -> AnalysisContext<MockProfileClient> {
        AnalysisContext::new(CachedProfileClient::new(mock, None), 10)
    }

    #[test]
    fn test_normalize_strips_at_prefix() {
        assert_eq!(normalize_handle("@alice").unwrap(), "alice");
        assert_eq!(normalize_handle("alice").unwrap(), "alice");
        assert_eq!(normalize_handle("  @alice  ").unwrap(), "alice");
    }

    #[test]
    fn test_normalize_rejects_blank_input() {
        assert!(normalize_handle("").is_err());
        assert!(normalize_handle("   ").is_err());
        assert!(normalize_handle("@").is_err());
    }

    #[tokio::test]
    async fn test_happy_path_report() {
        let mock = MockProfileClient::new();
        mock.script_profile(Ok(sample_profile("alice")));
        mock.script_posts(Ok(vec![
            sample_post("我喜欢新买的智能手表"),
            sample_post("这个游戏太棒了"),
        ]));

        let report = analyze_profile(&context(mock), "alice").await;

        assert!(report.contains("# X 用户分析报告"));
        assert!(report.contains("@alice"));
        assert!(report.contains("科技"));
        assert!(report.contains("游戏"));
        assert!(report.contains("- 智能手表"));
    }

    #[tokio::test]
    async fn test_at_prefixed_handle_same_report() {
        let temp = tempdir().unwrap();
        let mock = MockProfileClient::new();
        mock.script_profile(Ok(sample_profile("alice")));
        mock.script_posts(Ok(vec![sample_post("我喜欢这个")]));

        let store = CacheStore::open_at(temp.path(), Duration::from_secs(3600)).unwrap();
        let ctx = AnalysisContext::new(CachedProfileClient::new(mock, Some(store)), 10);

        let first = analyze_profile(&ctx, "alice").await;
        // Second run resolves entirely from cache under the same key
        let second = analyze_profile(&ctx, "@alice").await;

        assert_eq!(ctx.client().inner().profile_calls(), 1);
        assert_eq!(
            first.replace(" (缓存数据)", ""),
            second.replace(" (缓存数据)", "")
        );
    }

    #[tokio::test]
    async fn test_not_found_renders_notice() {
        let mock = MockProfileClient::new();
        mock.script_profile(Err(Error::Api(ApiError::NotFound(
            "doesnotexist123".to_string(),
        ))));

        let report = analyze_profile(&context(mock), "doesnotexist123").await;

        assert!(report.contains("用户不存在"));
        assert!(report.contains("@doesnotexist123"));
        assert!(!report.contains("NotFound"));
    }

    #[tokio::test]
    async fn test_quota_refusal_renders_wait_notice() {
        let mock = MockProfileClient::new();
        mock.script_profile(Err(Error::Api(ApiError::QuotaExceeded {
            wait: Duration::from_secs(300),
            monthly: false,
        })));

        let report = analyze_profile(&context(mock), "alice").await;

        assert!(report.contains("API访问频率限制"));
        assert!(report.contains("5分0秒"));
    }

    #[tokio::test]
    async fn test_auth_failure_renders_notice() {
        let mock = MockProfileClient::new();
        mock.script_profile(Err(Error::Api(ApiError::AuthFailure)));

        let report = analyze_profile(&context(mock), "alice").await;

        assert!(report.contains("认证失败"));
        assert!(report.contains("giftscope init"));
    }

    #[tokio::test]
    async fn test_network_failure_renders_generic_notice() {
        let mock = MockProfileClient::new();
        mock.script_profile(Err(Error::Api(ApiError::Network("boom".to_string()))));

        let report = analyze_profile(&context(mock), "alice").await;

        assert!(report.contains("分析失败"));
        assert!(!report.contains("boom"));
    }

    #[tokio::test]
    async fn test_blank_handle_renders_invalid_input() {
        let mock = MockProfileClient::new();
        let report = analyze_profile(&context(mock), "   ").await;

        assert!(report.contains("输入无效"));
    }

    #[tokio::test]
    async fn test_posts_failure_degrades_to_profile_only() {
        let mock = MockProfileClient::new();
        mock.script_profile(Ok(sample_profile("alice")));
        mock.script_posts(Err(Error::Api(ApiError::Network("down".to_string()))));

        let report = analyze_profile(&context(mock), "alice").await;

        assert!(report.contains("# X 用户分析报告"));
        assert!(report.contains("暂无明显兴趣倾向"));
        assert!(report.contains("通用礼品卡"));
    }

    #[tokio::test]
    async fn test_empty_posts_neutral_section() {
        let mock = MockProfileClient::new();
        mock.script_profile(Ok(sample_profile("alice")));
        mock.script_posts(Ok(Vec::new()));

        let report = analyze_profile(&context(mock), "alice").await;

        assert!(report.contains("中性"));
        assert!(report.contains("暂无明显兴趣倾向"));
    }
}
