use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::{CommentRecord, NewPost, PostRecord, Profile, Repost};
use crate::error::Result;

/// Access to the relational store used by every service in this crate.
///
/// Handlers receive an `Arc<dyn SocialRepository>` through application state;
/// the Postgres implementation is the production one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialRepository: Send + Sync {
    /// Round-trip to the backing store
    async fn health_check(&self) -> Result<()>;

    // --- posts -----------------------------------------------------------

    /// Public posts newest first, optionally narrowed to one author.
    /// `None` loads every matching post.
    async fn list_public_posts(
        &self,
        author_id: Option<Uuid>,
        limit: Option<i64>,
    ) -> Result<Vec<PostRecord>>;

    /// Any post regardless of visibility
    async fn find_post(&self, post_id: Uuid) -> Result<Option<PostRecord>>;

    async fn create_post(&self, new_post: NewPost) -> Result<PostRecord>;

    /// Returns false when nothing was deleted
    async fn delete_post(&self, post_id: Uuid) -> Result<bool>;

    // --- profiles & follows ----------------------------------------------

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>>;

    async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool>;

    /// Returns true if a new edge was written
    async fn create_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool>;

    async fn delete_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool>;

    async fn count_followers(&self, user_id: Uuid) -> Result<i64>;

    // --- live aggregates -------------------------------------------------

    async fn count_likes(&self, post_id: Uuid) -> Result<i64>;

    async fn count_comments(&self, post_id: Uuid) -> Result<i64>;

    async fn count_reposts(&self, post_id: Uuid) -> Result<i64>;

    async fn has_liked(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;

    // --- likes -----------------------------------------------------------

    /// Returns true if a new like was written
    async fn create_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;

    async fn delete_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;

    // --- reposts ---------------------------------------------------------

    /// Every repost event, newest first
    async fn list_reposts(&self) -> Result<Vec<Repost>>;

    async fn has_reposted(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;

    /// Inserts the event and bumps the post's denormalized counter atomically
    async fn create_repost(&self, post_id: Uuid, user_id: Uuid) -> Result<Repost>;

    async fn delete_repost(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;

    // --- comments --------------------------------------------------------

    /// Comments newest first
    async fn list_comments(&self, post_id: Uuid, limit: i64, offset: i64)
        -> Result<Vec<CommentRecord>>;

    async fn create_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        content: String,
    ) -> Result<CommentRecord>;
}
