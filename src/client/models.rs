//! Wire and domain models for the X API v2

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile data for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInfo {
    /// Stable numeric user id (string on the wire)
    pub id: String,

    /// Handle without the leading `@`
    pub handle: String,

    /// Self-reported location, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Verified badge
    #[serde(default)]
    pub verified: bool,

    /// Profile description, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Follower count
    pub followers: u64,

    /// Following count
    pub following: u64,

    /// Lifetime post count
    pub post_count: u64,
}

/// One recent post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post text
    pub text: String,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Entity tags (hashtags, context annotations) attached to the post
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Envelope for `GET /users/by/username/{handle}`
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    pub data: Option<UserData>,
}

/// User payload selected via `user.fields`
#[derive(Debug, Deserialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub location: Option<String>,
    #[serde(default)]
    pub verified: bool,
    pub description: Option<String>,
    pub public_metrics: Option<PublicMetrics>,
}

/// `public_metrics` block on the user payload
#[derive(Debug, Default, Deserialize)]
pub struct PublicMetrics {
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub tweet_count: u64,
}

impl From<UserData> for ProfileInfo {
    fn from(user: UserData) -> Self {
        let metrics = user.public_metrics.unwrap_or_default();
        ProfileInfo {
            id: user.id,
            handle: user.username,
            location: user.location,
            verified: user.verified,
            description: user.description,
            followers: metrics.followers_count,
            following: metrics.following_count,
            post_count: metrics.tweet_count,
        }
    }
}

/// Envelope for `GET /users/{id}/tweets`
///
/// The API omits `data` entirely when the window holds no posts.
#[derive(Debug, Deserialize)]
pub struct TweetsEnvelope {
    #[serde(default)]
    pub data: Vec<Tweet>,
}

/// Tweet payload selected via `tweet.fields`
#[derive(Debug, Deserialize)]
pub struct Tweet {
    #[serde(default)]
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub entities: Option<TweetEntities>,
}

/// Entity blocks carried on a tweet
#[derive(Debug, Deserialize)]
pub struct TweetEntities {
    #[serde(default)]
    pub hashtags: Vec<TagEntity>,
    #[serde(default)]
    pub annotations: Vec<TagEntity>,
}

/// A single tagged entity (`tag` for hashtags, `normalized_text` for annotations)
#[derive(Debug, Deserialize)]
pub struct TagEntity {
    pub tag: Option<String>,
    pub normalized_text: Option<String>,
}

impl From<Tweet> for Post {
    fn from(tweet: Tweet) -> Self {
        let tags = tweet
            .entities
            .map(|e| {
                e.hashtags
                    .into_iter()
                    .chain(e.annotations)
                    .filter_map(|t| t.tag.or(t.normalized_text))
                    .collect()
            })
            .unwrap_or_default();

        Post {
            text: tweet.text,
            created_at: tweet.created_at.unwrap_or_else(Utc::now),
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_envelope_deserializes_metrics() {
        let json = r#"{
            "data": {
                "id": "2244994945",
                "username": "alice",
                "location": "Shanghai",
                "verified": true,
                "description": "hello",
                "public_metrics": {
                    "followers_count": 1200,
                    "following_count": 80,
                    "tweet_count": 3400
                }
            }
        }"#;

        let envelope: UserEnvelope = serde_json::from_str(json).unwrap();
        let profile: ProfileInfo = envelope.data.unwrap().into();

        assert_eq!(profile.id, "2244994945");
        assert_eq!(profile.handle, "alice");
        assert_eq!(profile.location.as_deref(), Some("Shanghai"));
        assert!(profile.verified);
        assert_eq!(profile.followers, 1200);
        assert_eq!(profile.post_count, 3400);
    }

    #[test]
    fn test_user_without_metrics_defaults_to_zero() {
        let json = r#"{"data": {"id": "1", "username": "bob"}}"#;

        let envelope: UserEnvelope = serde_json::from_str(json).unwrap();
        let profile: ProfileInfo = envelope.data.unwrap().into();

        assert_eq!(profile.followers, 0);
        assert!(!profile.verified);
        assert!(profile.description.is_none());
    }

    #[test]
    fn test_tweets_envelope_missing_data_is_empty() {
        let envelope: TweetsEnvelope = serde_json::from_str(r#"{"meta": {"result_count": 0}}"#).unwrap();
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn test_tweet_entities_collected_as_tags() {
        let json = r#"{
            "text": "新的智能手表测评",
            "created_at": "2024-05-01T10:00:00Z",
            "entities": {
                "hashtags": [{"tag": "科技"}],
                "annotations": [{"normalized_text": "智能手表"}]
            }
        }"#;

        let tweet: Tweet = serde_json::from_str(json).unwrap();
        let post: Post = tweet.into();

        assert_eq!(post.tags, vec!["科技".to_string(), "智能手表".to_string()]);
    }
}
