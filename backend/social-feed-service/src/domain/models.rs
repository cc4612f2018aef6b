use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post row as persisted; nullable columns are defaulted by the row mapper
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub image_urls: Option<Vec<String>>,
    pub hashtags: Option<Vec<String>>,
    pub workout_id: Option<Uuid>,
    pub is_public: Option<bool>,
    /// Denormalized counters, never trusted by the feed
    pub likes_count: i32,
    pub comments_count: i32,
    pub shares_count: i32,
    pub reposts_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// NULL visibility means public
    pub fn is_visible_publicly(&self) -> bool {
        self.is_public.unwrap_or(true)
    }
}

/// Public profile of a user (mirrors the auth provider's user table)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Workout summary joined onto a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutSummary {
    pub id: Uuid,
    pub name: String,
    pub workout_type: Option<String>,
    pub duration_minutes: Option<i32>,
    pub calories_burned: Option<i32>,
}

/// A post together with its optional joins
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub post: Post,
    pub author: Option<Profile>,
    pub workout: Option<WorkoutSummary>,
}

/// Repost event - a user re-sharing another user's post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Repost {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Comment entity - represents a comment on a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CommentRecord {
    pub comment: Comment,
    pub author: Option<Profile>,
}

/// Insert payload for a post, already validated
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub user_id: Uuid,
    pub content: String,
    pub image_urls: Vec<String>,
    pub hashtags: Vec<String>,
    pub workout_id: Option<Uuid>,
    pub is_public: bool,
}
