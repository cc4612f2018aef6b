/// Likes, reposts, follows and comments.
///
/// Toggles read the current membership first, then write the opposite. The
/// returned counts are live counts taken after the write.
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::feed::{CommentPage, CommentView, FollowToggle, LikeToggle, RepostToggle};
use crate::error::{AppError, Result};
use crate::repository::SocialRepository;
use crate::services::mapper::map_comment;
use crate::services::posts::load_visible_post;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "comment must be 1-1000 characters"))]
    pub content: String,
}

#[derive(Clone)]
pub struct InteractionService {
    repo: Arc<dyn SocialRepository>,
}

impl InteractionService {
    pub fn new(repo: Arc<dyn SocialRepository>) -> Self {
        Self { repo }
    }

    pub async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<LikeToggle> {
        let repo = self.repo.as_ref();
        load_visible_post(repo, post_id, Some(user_id)).await?;

        // `changed` is false when a concurrent request already wrote the same state
        let (liked, changed) = if repo.has_liked(post_id, user_id).await? {
            (false, repo.delete_like(post_id, user_id).await?)
        } else {
            (true, repo.create_like(post_id, user_id).await?)
        };

        let likes_count = repo.count_likes(post_id).await?;
        info!(%post_id, %user_id, liked, changed, likes_count, "like toggled");

        Ok(LikeToggle { liked, likes_count })
    }

    pub async fn toggle_repost(&self, post_id: Uuid, user_id: Uuid) -> Result<RepostToggle> {
        let repo = self.repo.as_ref();
        // Private posts cannot be reposted, not even by their author
        let record = load_visible_post(repo, post_id, None).await?;

        if record.post.user_id == user_id {
            return Err(AppError::Validation(
                "You cannot repost your own post".to_string(),
            ));
        }

        let (reposted, changed) = if repo.has_reposted(post_id, user_id).await? {
            (false, repo.delete_repost(post_id, user_id).await?)
        } else {
            repo.create_repost(post_id, user_id).await?;
            (true, true)
        };

        let reposts_count = repo.count_reposts(post_id).await?;
        info!(%post_id, %user_id, reposted, changed, reposts_count, "repost toggled");

        Ok(RepostToggle {
            reposted,
            reposts_count,
        })
    }

    pub async fn toggle_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<FollowToggle> {
        if follower_id == followee_id {
            return Err(AppError::Validation(
                "You cannot follow yourself".to_string(),
            ));
        }

        let repo = self.repo.as_ref();
        if repo.find_profile(followee_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", followee_id)));
        }

        let (following, changed) = if repo.is_following(follower_id, followee_id).await? {
            (false, repo.delete_follow(follower_id, followee_id).await?)
        } else {
            (true, repo.create_follow(follower_id, followee_id).await?)
        };

        let followers_count = repo.count_followers(followee_id).await?;
        info!(%follower_id, %followee_id, following, changed, "follow toggled");

        Ok(FollowToggle {
            following,
            followers_count,
        })
    }

    pub async fn list_comments(
        &self,
        post_id: Uuid,
        viewer_id: Option<Uuid>,
        page: u32,
        limit: u32,
    ) -> Result<CommentPage> {
        let repo = self.repo.as_ref();
        load_visible_post(repo, post_id, viewer_id).await?;

        let page = page.max(1);
        let limit = limit.max(1);
        let offset = i64::from(page - 1) * i64::from(limit);

        let records = repo.list_comments(post_id, i64::from(limit), offset).await?;
        let total = repo.count_comments(post_id).await?;

        Ok(CommentPage {
            comments: records.iter().map(map_comment).collect(),
            total,
            page,
            limit,
        })
    }

    pub async fn add_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        req: CreateCommentRequest,
    ) -> Result<CommentView> {
        req.validate()?;
        let content = req.content.trim().to_string();
        if content.is_empty() {
            return Err(AppError::Validation("comment must not be blank".to_string()));
        }

        let repo = self.repo.as_ref();
        load_visible_post(repo, post_id, Some(user_id)).await?;

        let record = repo.create_comment(post_id, user_id, content).await?;
        info!(%post_id, %user_id, comment_id = %record.comment.id, "comment created");

        Ok(map_comment(&record))
    }
}
