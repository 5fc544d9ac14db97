//! Optional external text-analysis collaborator
//!
//! A richer analyzer (typically LLM-backed) can be plugged in behind
//! [`TextAnalyzer`]. Its output is untrusted: replies must parse into
//! [`CollaboratorReply`], and any call or parse failure makes the caller
//! fall back to the local keyword analyzer. The collaborator is never
//! retried.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use super::catalog::CATEGORIES;
use super::AnalysisResult;

/// Collaborator failure modes; all of them route to local fallback
#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum CollaboratorError {
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("Unparseable collaborator reply: {0}")]
    Parse(String),
}

/// External analyzer taking raw post texts
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    async fn analyze(&self, texts: &[String]) -> Result<CollaboratorReply, CollaboratorError>;
}

/// Structured reply requested from the collaborator
#[derive(Debug, Default, Deserialize)]
pub struct CollaboratorReply {
    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    #[allow(dead_code)]
    pub analysis: Option<String>,

    #[serde(default)]
    pub gift_suggestions: Vec<String>,
}

impl CollaboratorReply {
    /// Parse a raw reply string as JSON
    #[allow(dead_code)]
    pub fn parse(raw: &str) -> Result<Self, CollaboratorError> {
        serde_json::from_str(raw).map_err(|e| CollaboratorError::Parse(e.to_string()))
    }

    /// Project the reply onto the local category model.
    ///
    /// Each topic or keyword that mentions a catalog keyword counts one hit
    /// for that category, so collaborator output ranks through the same
    /// engine as local analysis. Sentiment stays neutral: the reply format
    /// does not carry a score.
    pub fn to_analysis(&self) -> AnalysisResult {
        let mut interests = Vec::new();

        for category in CATEGORIES {
            let mut count = 0u32;
            for term in self.topics.iter().chain(self.keywords.iter()) {
                let term = term.to_lowercase();
                if category.keywords.iter().any(|k| term.contains(k)) {
                    count += 1;
                }
            }
            if count > 0 {
                interests.push((category.name.to_string(), count));
            }
        }

        AnalysisResult {
            interests,
            sentiment: 0.0,
        }
    }
}
