//! Response-shaped views returned by the feed and post endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;

/// Prefix that keeps repost entry ids apart from native post ids
pub const REPOST_ID_PREFIX: &str = "repost_";

/// Username shown when a profile row is missing
pub const PLACEHOLDER_USERNAME: &str = "Usuario";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar: Option<String>,
    pub is_following: bool,
}

impl AuthorView {
    pub fn placeholder(user_id: Uuid) -> Self {
        Self {
            id: user_id,
            username: PLACEHOLDER_USERNAME.to_string(),
            full_name: None,
            avatar: None,
            is_following: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutView {
    pub id: Uuid,
    pub name: String,
    pub workout_type: Option<String>,
    pub duration_minutes: Option<i32>,
    pub calories_burned: Option<i32>,
}

/// Mapped post without any live aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: Uuid,
    pub content: String,
    pub image_urls: Vec<String>,
    pub hashtags: Vec<String>,
    pub workout_id: Option<Uuid>,
    pub workout: Option<WorkoutView>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub author: AuthorView,
}

/// Live per-post facts, fetched at request time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAggregates {
    pub likes_count: i64,
    pub comments_count: i64,
    pub reposts_count: i64,
    pub is_liked: bool,
}

impl PostAggregates {
    pub fn popularity_score(&self) -> i64 {
        self.likes_count + self.comments_count + self.reposts_count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedPost {
    #[serde(flatten)]
    pub post: PostView,
    #[serde(flatten)]
    pub stats: PostAggregates,
}

/// Synthetic entry produced for one repost event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepostEntry {
    pub id: String,
    pub repost_id: Uuid,
    pub reposted_at: DateTime<Utc>,
    pub reposter: AuthorView,
    /// Mirrors `original_post.stats`
    #[serde(flatten)]
    pub stats: PostAggregates,
    pub original_post: FeedPost,
}

impl RepostEntry {
    pub fn entry_id(repost_id: Uuid) -> String {
        format!("{}{}", REPOST_ID_PREFIX, repost_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedEntry {
    Post(FeedPost),
    Repost(RepostEntry),
}

impl FeedEntry {
    pub fn id(&self) -> String {
        match self {
            FeedEntry::Post(p) => p.post.id.to_string(),
            FeedEntry::Repost(r) => r.id.clone(),
        }
    }

    /// Reposts score by the original post's counts
    pub fn popularity_score(&self) -> i64 {
        match self {
            FeedEntry::Post(p) => p.stats.popularity_score(),
            FeedEntry::Repost(r) => r.original_post.stats.popularity_score(),
        }
    }

    /// `createdAt` for native posts, `repostedAt` for reposts
    pub fn effective_timestamp(&self) -> DateTime<Utc> {
        match self {
            FeedEntry::Post(p) => p.post.created_at,
            FeedEntry::Repost(r) => r.reposted_at,
        }
    }

    pub fn is_repost(&self) -> bool {
        matches!(self, FeedEntry::Repost(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedSort {
    #[default]
    Popular,
    Recent,
}

impl FeedSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedSort::Popular => "popular",
            FeedSort::Recent => "recent",
        }
    }
}

impl FromStr for FeedSort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "popular" => Ok(FeedSort::Popular),
            "recent" => Ok(FeedSort::Recent),
            other => Err(AppError::Validation(format!(
                "Invalid sort '{}'. Must be 'popular' or 'recent'",
                other
            ))),
        }
    }
}

/// One page of the composed feed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub posts: Vec<FeedEntry>,
    /// Length of the merged candidate set (native posts + valid reposts)
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub comments: Vec<CommentView>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub liked: bool,
    pub likes_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepostToggle {
    pub reposted: bool,
    pub reposts_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowToggle {
    pub following: bool,
    pub followers_count: i64,
}
