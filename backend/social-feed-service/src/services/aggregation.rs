//! Aggregation fetcher: live per-post counts and viewer membership checks.
//!
//! Every fact is its own round-trip, awaited serially. Errors are returned to
//! the caller untouched so that one failing lookup aborts the whole request.

use uuid::Uuid;

use crate::domain::feed::{FeedPost, PostAggregates};
use crate::domain::models::PostRecord;
use crate::error::Result;
use crate::repository::SocialRepository;
use crate::services::mapper::map_post;

pub async fn fetch_post_aggregates(
    repo: &dyn SocialRepository,
    post_id: Uuid,
    viewer_id: Option<Uuid>,
) -> Result<PostAggregates> {
    let likes_count = repo.count_likes(post_id).await?;
    let comments_count = repo.count_comments(post_id).await?;
    let reposts_count = repo.count_reposts(post_id).await?;
    let is_liked = match viewer_id {
        Some(viewer) => repo.has_liked(post_id, viewer).await?,
        None => false,
    };

    Ok(PostAggregates {
        likes_count,
        comments_count,
        reposts_count,
        is_liked,
    })
}

/// Anonymous viewers and self-views never query the follow table
pub async fn viewer_follows(
    repo: &dyn SocialRepository,
    viewer_id: Option<Uuid>,
    target_id: Uuid,
) -> Result<bool> {
    match viewer_id {
        Some(viewer) if viewer != target_id => repo.is_following(viewer, target_id).await,
        _ => Ok(false),
    }
}

/// Map a post and attach its live aggregates
pub async fn enrich_post(
    repo: &dyn SocialRepository,
    record: &PostRecord,
    viewer_id: Option<Uuid>,
) -> Result<FeedPost> {
    let is_following = if record.author.is_some() {
        viewer_follows(repo, viewer_id, record.post.user_id).await?
    } else {
        false
    };

    let post = map_post(record, is_following);
    let stats = fetch_post_aggregates(repo, record.post.id, viewer_id).await?;

    Ok(FeedPost { post, stats })
}
