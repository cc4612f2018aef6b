//! Repost fan-in: repost events → synthetic feed entries.

use tracing::debug;
use uuid::Uuid;

use crate::domain::feed::RepostEntry;
use crate::domain::models::Repost;
use crate::error::Result;
use crate::repository::SocialRepository;
use crate::services::aggregation::{enrich_post, viewer_follows};
use crate::services::mapper::map_author;

#[derive(Debug, Default)]
pub struct RepostFanIn {
    pub entries: Vec<RepostEntry>,
    /// Events whose original post is gone or private
    pub skipped: usize,
}

/// Resolve each event to its original post and reposter.
///
/// Order of `events` is preserved in the output.
pub async fn fan_in_reposts(
    repo: &dyn SocialRepository,
    events: Vec<Repost>,
    viewer_id: Option<Uuid>,
) -> Result<RepostFanIn> {
    let mut fan_in = RepostFanIn::default();

    for event in events {
        let original = match repo.find_post(event.post_id).await? {
            Some(record) if record.post.is_visible_publicly() => record,
            Some(_) => {
                debug!(repost_id = %event.id, post_id = %event.post_id, "skipping repost of private post");
                fan_in.skipped += 1;
                continue;
            }
            None => {
                debug!(repost_id = %event.id, post_id = %event.post_id, "skipping repost of deleted post");
                fan_in.skipped += 1;
                continue;
            }
        };

        let reposter_profile = repo.find_profile(event.user_id).await?;
        let follows_reposter = if reposter_profile.is_some() {
            viewer_follows(repo, viewer_id, event.user_id).await?
        } else {
            false
        };
        let reposter = map_author(reposter_profile.as_ref(), event.user_id, follows_reposter);

        let original_post = enrich_post(repo, &original, viewer_id).await?;

        fan_in.entries.push(RepostEntry {
            id: RepostEntry::entry_id(event.id),
            repost_id: event.id,
            reposted_at: event.created_at,
            reposter,
            stats: original_post.stats,
            original_post,
        });
    }

    Ok(fan_in)
}
