/// Post service - create, read and delete posts
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::feed::{FeedPost, PostAggregates};
use crate::domain::models::{NewPost, PostRecord};
use crate::error::{AppError, Result};
use crate::repository::SocialRepository;
use crate::services::aggregation::enrich_post;
use crate::services::hashtag_parser::extract_hashtags;
use crate::services::mapper::map_post;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 2000, message = "content must be 1-2000 characters"))]
    pub content: String,
    #[serde(default)]
    #[validate(length(max = 10, message = "at most 10 images per post"))]
    pub image_urls: Vec<String>,
    pub workout_id: Option<Uuid>,
    pub is_public: Option<bool>,
}

impl CreatePostRequest {
    /// Validate and normalize into an insert payload
    pub fn into_new_post(self, user_id: Uuid) -> Result<NewPost> {
        self.validate()?;

        let content = self.content.trim().to_string();
        if content.is_empty() {
            return Err(AppError::Validation("content must not be blank".to_string()));
        }

        if let Some(bad) = self
            .image_urls
            .iter()
            .find(|url| !(url.starts_with("https://") || url.starts_with("http://")))
        {
            return Err(AppError::Validation(format!("invalid image url: {}", bad)));
        }

        Ok(NewPost {
            user_id,
            hashtags: extract_hashtags(&content),
            content,
            image_urls: self.image_urls,
            workout_id: self.workout_id,
            is_public: self.is_public.unwrap_or(true),
        })
    }
}

/// Load a post the viewer is allowed to see.
///
/// Private posts are only visible to their author; to everyone else they do not exist.
pub async fn load_visible_post(
    repo: &dyn SocialRepository,
    post_id: Uuid,
    viewer_id: Option<Uuid>,
) -> Result<PostRecord> {
    let record = repo
        .find_post(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;

    if !record.post.is_visible_publicly() && viewer_id != Some(record.post.user_id) {
        return Err(AppError::NotFound(format!("Post {} not found", post_id)));
    }

    Ok(record)
}

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn SocialRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn SocialRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_post(&self, user_id: Uuid, req: CreatePostRequest) -> Result<FeedPost> {
        let new_post = req.into_new_post(user_id)?;
        let record = self.repo.create_post(new_post).await?;

        info!(post_id = %record.post.id, %user_id, "post created");

        Ok(FeedPost {
            post: map_post(&record, false),
            stats: PostAggregates::default(),
        })
    }

    pub async fn get_post(&self, post_id: Uuid, viewer_id: Option<Uuid>) -> Result<FeedPost> {
        let repo = self.repo.as_ref();
        let record = load_visible_post(repo, post_id, viewer_id).await?;
        enrich_post(repo, &record, viewer_id).await
    }

    pub async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<()> {
        let record = self
            .repo
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;

        if record.post.user_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author can delete this post".to_string(),
            ));
        }

        if !self.repo.delete_post(post_id).await? {
            return Err(AppError::NotFound(format!("Post {} not found", post_id)));
        }

        info!(%post_id, %user_id, "post deleted");
        Ok(())
    }
}
