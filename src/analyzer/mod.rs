//! Content analysis and gift recommendation
//!
//! The local path is deterministic keyword matching: a fixed sentiment word
//! list and the interest catalog in [`catalog`]. An optional external
//! collaborator can take over topic extraction; any failure there falls back
//! to the local path without surfacing.

pub mod catalog;
pub mod collaborator;

use catalog::{CATEGORIES, GENERIC_GIFTS, NEGATIVE_WORDS, POSITIVE_WORDS};
pub use collaborator::{CollaboratorError, CollaboratorReply, TextAnalyzer};

use crate::client::Post;

/// Outcome of analyzing one batch of posts
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Interest categories with hit counts, in catalog definition order
    pub interests: Vec<(String, u32)>,

    /// (positive hits − negative hits) / max(post count, 1)
    pub sentiment: f64,
}

impl AnalysisResult {
    pub fn empty() -> Self {
        Self {
            interests: Vec::new(),
            sentiment: 0.0,
        }
    }
}

/// Run the local keyword/sentiment analysis over a batch of posts.
///
/// Substring matching against lowercased text; a keyword occurring in a
/// post counts once per post regardless of repetitions, and entity tags
/// count independently of the text. An empty batch is a neutral result,
/// not an error.
pub fn analyze(posts: &[Post]) -> AnalysisResult {
    if posts.is_empty() {
        return AnalysisResult::empty();
    }

    let mut score: i64 = 0;
    let mut counts = vec![0u32; CATEGORIES.len()];

    for post in posts {
        let text = post.text.to_lowercase();

        for word in POSITIVE_WORDS {
            if text.contains(word) {
                score += 1;
            }
        }
        for word in NEGATIVE_WORDS {
            if text.contains(word) {
                score -= 1;
            }
        }

        for (idx, category) in CATEGORIES.iter().enumerate() {
            for keyword in category.keywords {
                if text.contains(keyword) {
                    counts[idx] += 1;
                }
            }
        }

        // Entity tags (hashtags, annotations) count toward interests too
        for tag in &post.tags {
            let tag = tag.to_lowercase();
            for (idx, category) in CATEGORIES.iter().enumerate() {
                if category.keywords.iter().any(|k| tag.contains(k)) {
                    counts[idx] += 1;
                }
            }
        }
    }

    let interests = CATEGORIES
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(category, count)| (category.name.to_string(), count))
        .collect();

    AnalysisResult {
        interests,
        sentiment: score as f64 / posts.len() as f64,
    }
}

/// Analyze with an optional collaborator, falling back to the local path.
///
/// The fallback is silent toward the caller; the collaborator gets exactly
/// one attempt.
pub async fn analyze_with(
    collaborator: Option<&dyn TextAnalyzer>,
    posts: &[Post],
) -> (AnalysisResult, Vec<String>) {
    if let Some(collab) = collaborator {
        if !posts.is_empty() {
            let texts: Vec<String> = posts.iter().map(|p| p.text.clone()).collect();
            match collab.analyze(&texts).await {
                Ok(reply) => {
                    log::debug!("Collaborator analysis accepted");
                    let analysis = reply.to_analysis();
                    return (analysis, reply.gift_suggestions);
                }
                Err(e) => {
                    log::debug!("Collaborator failed, using local analysis: {}", e);
                }
            }
        }
    }

    (analyze(posts), Vec::new())
}

/// Map ranked interests to concrete gifts.
///
/// Stable sort by count descending keeps catalog definition order for
/// ties; top 3 categories contribute their first 2 gifts each, capped at
/// 5 recommendations total.
pub fn recommend(analysis: &AnalysisResult) -> Vec<String> {
    if analysis.interests.is_empty() {
        return GENERIC_GIFTS.iter().map(|g| g.to_string()).collect();
    }

    let mut ranked = analysis.interests.clone();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut gifts = Vec::new();
    for (name, _) in ranked.iter().take(3) {
        if let Some(category) = catalog::category_by_name(name) {
            gifts.extend(category.gifts.iter().take(2).map(|g| g.to_string()));
        }
    }

    gifts.truncate(5);
    gifts
}
