//! Markdown report rendering
//!
//! Pure formatting over the analysis results. Four report shapes: the full
//! analysis, the quota-wait notice, the not-found notice, and the generic
//! failure notice. Every entry-point failure path maps onto one of these,
//! so the caller always has a printable report.

use std::time::Duration;

use crate::analyzer::AnalysisResult;
use crate::cache::client::DataSource;
use crate::client::ProfileInfo;

/// Render the full analysis report
pub fn render_report(
    profile: &ProfileInfo,
    analysis: &AnalysisResult,
    recommendations: &[String],
    source: DataSource,
) -> String {
    let cache_marker = if source.is_cached() {
        " (缓存数据)"
    } else {
        ""
    };

    format!(
        "# X 用户分析报告{cache_marker}\n\
         \n\
         ## 基本信息\n\
         - 用户名: @{handle}\n\
         - 位置: {location}\n\
         - 认证状态: {verified}\n\
         \n\
         ## 社交指标\n\
         - 粉丝数: {followers}\n\
         - 关注数: {following}\n\
         - 推文数: {posts}\n\
         \n\
         ## 兴趣分析\n\
         {interests}\n\
         \n\
         ## 情感倾向\n\
         情感指数: {sentiment:.2}\n\
         ({mood})\n\
         \n\
         ## 礼物推荐\n\
         {gifts}\n\
         \n\
         ## 账号描述\n\
         {description}\n",
        cache_marker = cache_marker,
        handle = profile.handle,
        location = profile.location.as_deref().unwrap_or("未知"),
        verified = if profile.verified { "已认证" } else { "未认证" },
        followers = group_thousands(profile.followers),
        following = group_thousands(profile.following),
        posts = group_thousands(profile.post_count),
        interests = format_interests(&analysis.interests),
        sentiment = analysis.sentiment,
        mood = interpret_sentiment(analysis.sentiment),
        gifts = format_gifts(recommendations),
        description = profile.description.as_deref().unwrap_or("无描述"),
    )
}

/// Render the quota-refusal notice. The monthly ceiling has no useful wait
/// estimate; the window variant shows minutes and seconds until reset.
pub fn render_quota_wait(wait: Duration, monthly: bool) -> String {
    if monthly {
        return "# ⏳ API访问频率限制\n\
                \n\
                当前状态：本月API调用额度已用完\n\
                \n\
                说明：\n\
                - 月度额度不会在本月内恢复\n\
                - 已缓存的用户仍可正常查询\n\
                \n\
                建议操作：\n\
                1. 查询其他已缓存的用户\n\
                2. 下月初再试，或升级API套餐\n"
            .to_string();
    }

    let (minutes, seconds) = split_wait(wait);
    format!(
        "# ⏳ API访问频率限制\n\
         \n\
         当前状态：已达到API访问限制\n\
         预计恢复时间：{minutes}分{seconds}秒后\n\
         \n\
         说明：\n\
         - 当前套餐在每个时间窗口内只允许少量API调用\n\
         - 已缓存的用户仍可正常查询\n\
         \n\
         建议操作：\n\
         1. 等待 {minutes}分{seconds}秒 后再试\n\
         2. 尝试查询其他已缓存的用户\n"
    )
}

/// Render the unknown-user notice
pub fn render_not_found(handle: &str) -> String {
    format!(
        "# ❌ 用户不存在\n\
         \n\
         未找到用户：@{handle}\n\
         \n\
         请确认：\n\
         1. 用户名拼写正确（无需包含 @ 前缀）\n\
         2. 该账号公开可见且未被停用\n"
    )
}

/// Render the bad-credential notice
pub fn render_auth_failure() -> String {
    "# ❌ 认证失败\n\
     \n\
     API凭据无效或已过期。\n\
     \n\
     建议操作：\n\
     1. 运行 `giftscope init` 重新配置 Bearer Token\n\
     2. 检查 GIFTSCOPE_BEARER_TOKEN 环境变量\n"
        .to_string()
}

/// Render the catch-all failure notice
pub fn render_failure() -> String {
    "# ❌ 分析失败\n\
     \n\
     抱歉无法完成分析。请确保：\n\
     1. 输入的用户名正确\n\
     2. 该用户存在且未被限制访问\n\
     3. 网络连接正常\n\
     \n\
     建议稍后重试。\n"
        .to_string()
}

/// Render the empty-handle notice
pub fn render_invalid_input() -> String {
    "# ❌ 输入无效\n\
     \n\
     请输入要分析的用户名（例如 `giftscope analyze jack`）。\n"
        .to_string()
}

fn format_interests(interests: &[(String, u32)]) -> String {
    if interests.is_empty() {
        return "暂无明显兴趣倾向".to_string();
    }

    let mut ranked = interests.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .iter()
        .map(|(name, count)| format!("- {}: {}", name, stars(*count)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_gifts(recommendations: &[String]) -> String {
    recommendations
        .iter()
        .map(|gift| format!("- {}", gift))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Star rating capped at 5
fn stars(count: u32) -> String {
    "🌟".repeat(count.min(5) as usize)
}

fn interpret_sentiment(score: f64) -> &'static str {
    if score > 0.5 {
        "非常积极"
    } else if score > 0.0 {
        "较为积极"
    } else if score == 0.0 {
        "中性"
    } else if score > -0.5 {
        "较为消极"
    } else {
        "非常消极"
    }
}

fn split_wait(wait: Duration) -> (u64, u64) {
    let total = wait.as_secs();
    (total / 60, total % 60)
}

/// `1234567` → `1,234,567`
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ProfileInfo {
        ProfileInfo {
            id: "42".to_string(),
            handle: "alice".to_string(),
            location: Some("上海".to_string()),
            verified: true,
            description: Some("数码爱好者".to_string()),
            followers: 1234567,
            following: 321,
            post_count: 8900,
        }
    }

    #[test]
    fn test_full_report_sections() {
        let analysis = AnalysisResult {
            interests: vec![("科技".to_string(), 7), ("游戏".to_string(), 2)],
            sentiment: 0.75,
        };
        let gifts = vec!["智能手表".to_string(), "无线耳机".to_string()];

        let report = render_report(&profile(), &analysis, &gifts, DataSource::Network);

        assert!(report.contains("# X 用户分析报告"));
        assert!(!report.contains("缓存数据"));
        assert!(report.contains("- 用户名: @alice"));
        assert!(report.contains("- 位置: 上海"));
        assert!(report.contains("已认证"));
        assert!(report.contains("- 粉丝数: 1,234,567"));
        // Star rating caps at 5 even for 7 hits
        assert!(report.contains("- 科技: 🌟🌟🌟🌟🌟"));
        assert!(report.contains("- 游戏: 🌟🌟"));
        assert!(report.contains("情感指数: 0.75"));
        assert!(report.contains("非常积极"));
        assert!(report.contains("- 智能手表"));
        assert!(report.contains("数码爱好者"));
    }

    #[test]
    fn test_cached_report_marks_source() {
        let report = render_report(
            &profile(),
            &AnalysisResult::empty(),
            &[],
            DataSource::Cache,
        );
        assert!(report.contains("(缓存数据)"));

        let report = render_report(
            &profile(),
            &AnalysisResult::empty(),
            &[],
            DataSource::StaleCache,
        );
        assert!(report.contains("(缓存数据)"));
    }

    #[test]
    fn test_report_defaults_for_missing_fields() {
        let mut p = profile();
        p.location = None;
        p.description = None;
        p.verified = false;

        let report = render_report(&p, &AnalysisResult::empty(), &[], DataSource::Network);

        assert!(report.contains("- 位置: 未知"));
        assert!(report.contains("未认证"));
        assert!(report.contains("无描述"));
        assert!(report.contains("暂无明显兴趣倾向"));
        assert!(report.contains("中性"));
    }

    #[test]
    fn test_sentiment_bands() {
        assert_eq!(interpret_sentiment(0.8), "非常积极");
        assert_eq!(interpret_sentiment(0.5), "较为积极");
        assert_eq!(interpret_sentiment(0.1), "较为积极");
        assert_eq!(interpret_sentiment(0.0), "中性");
        assert_eq!(interpret_sentiment(-0.3), "较为消极");
        assert_eq!(interpret_sentiment(-0.5), "非常消极");
        assert_eq!(interpret_sentiment(-2.0), "非常消极");
    }

    #[test]
    fn test_quota_wait_shows_minutes_and_seconds() {
        let report = render_quota_wait(Duration::from_secs(14 * 60 + 30), false);

        assert!(report.contains("⏳"));
        assert!(report.contains("14分30秒"));
    }

    #[test]
    fn test_quota_wait_monthly_has_no_countdown() {
        let report = render_quota_wait(Duration::ZERO, true);

        assert!(report.contains("月度额度"));
        assert!(!report.contains("0分0秒"));
    }

    #[test]
    fn test_not_found_names_handle() {
        let report = render_not_found("doesnotexist123");

        assert!(report.contains("用户不存在"));
        assert!(report.contains("@doesnotexist123"));
    }

    #[test]
    fn test_failure_notice_is_generic() {
        let report = render_failure();
        assert!(report.contains("分析失败"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_interests_ranked_by_count_in_report() {
        let analysis = AnalysisResult {
            interests: vec![("科技".to_string(), 1), ("音乐".to_string(), 4)],
            sentiment: 0.0,
        };
        let report = render_report(&profile(), &analysis, &[], DataSource::Network);

        let music = report.find("- 音乐").unwrap();
        let tech = report.find("- 科技").unwrap();
        assert!(music < tech);
    }
}
