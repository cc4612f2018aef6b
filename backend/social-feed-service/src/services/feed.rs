use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::FeedConfig;
use crate::domain::feed::{FeedEntry, FeedPage, FeedSort};
use crate::error::Result;
use crate::metrics::feed::{
    FEED_CANDIDATES_TRUNCATED_TOTAL, FEED_CANDIDATE_COUNT, FEED_REPOSTS_SKIPPED_TOTAL,
    FEED_REQUEST_DURATION_SECONDS, FEED_REQUEST_TOTAL,
};
use crate::repository::SocialRepository;
use crate::services::aggregation::enrich_post;
use crate::services::ranking::{paginate, rank_entries};
use crate::services::reposts::fan_in_reposts;

/// Normalized feed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedQuery {
    pub page: u32,
    pub limit: u32,
    pub sort: FeedSort,
    /// Narrows native posts only; reposts by anyone stay in the feed
    pub author_id: Option<Uuid>,
}

impl FeedQuery {
    pub fn new(page: Option<u32>, limit: Option<u32>, sort: FeedSort, config: &FeedConfig) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(config.default_limit)
                .clamp(1, config.max_limit.max(1)),
            sort,
            author_id: None,
        }
    }

    pub fn with_author(mut self, author_id: Option<Uuid>) -> Self {
        self.author_id = author_id;
        self
    }
}

/// Composes the public feed: native posts plus repost entries, ranked and paged
/// in memory.
#[derive(Clone)]
pub struct FeedService {
    repo: Arc<dyn SocialRepository>,
    config: FeedConfig,
}

impl FeedService {
    pub fn new(repo: Arc<dyn SocialRepository>, config: FeedConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub async fn get_feed(&self, query: FeedQuery, viewer_id: Option<Uuid>) -> Result<FeedPage> {
        let started = Instant::now();
        let sort_label = query.sort.as_str();

        let result = self.compose(query, viewer_id).await;

        FEED_REQUEST_DURATION_SECONDS
            .with_label_values(&[sort_label])
            .observe(started.elapsed().as_secs_f64());
        FEED_REQUEST_TOTAL
            .with_label_values(&[sort_label, if result.is_ok() { "ok" } else { "error" }])
            .inc();

        result
    }

    async fn compose(&self, query: FeedQuery, viewer_id: Option<Uuid>) -> Result<FeedPage> {
        let repo = self.repo.as_ref();

        debug!(
            page = query.page,
            limit = query.limit,
            sort = query.sort.as_str(),
            author_id = ?query.author_id,
            viewer_id = ?viewer_id,
            "composing feed"
        );

        let cap = self.config.candidate_cap();
        let records = repo.list_public_posts(query.author_id, cap).await?;
        if cap.is_some_and(|cap| records.len() as i64 >= cap) {
            // Older posts beyond the cap are not ranked and not counted in `total`
            warn!(
                cap = self.config.max_candidates,
                "native feed candidates truncated at FEED_MAX_CANDIDATES"
            );
            FEED_CANDIDATES_TRUNCATED_TOTAL.inc();
        }

        let mut candidates = Vec::with_capacity(records.len());
        for record in &records {
            let post = enrich_post(repo, record, viewer_id).await?;
            candidates.push(FeedEntry::Post(post));
        }
        let native_count = candidates.len();

        let events = repo.list_reposts().await?;
        let fan_in = fan_in_reposts(repo, events, viewer_id).await?;
        let repost_count = fan_in.entries.len();
        if fan_in.skipped > 0 {
            FEED_REPOSTS_SKIPPED_TOTAL.inc_by(fan_in.skipped as u64);
        }

        candidates.extend(fan_in.entries.into_iter().map(FeedEntry::Repost));

        FEED_CANDIDATE_COUNT
            .with_label_values(&["post"])
            .observe(native_count as f64);
        FEED_CANDIDATE_COUNT
            .with_label_values(&["repost"])
            .observe(repost_count as f64);

        rank_entries(&mut candidates, query.sort);

        let total = candidates.len();
        let posts = paginate(candidates, query.page, query.limit);
        let consumed =
            (query.page.saturating_sub(1) as usize) * query.limit as usize + posts.len();

        info!(
            native = native_count,
            reposts = repost_count,
            skipped_reposts = fan_in.skipped,
            returned = posts.len(),
            total,
            "feed composed"
        );

        Ok(FeedPage {
            posts,
            total,
            page: query.page,
            limit: query.limit,
            has_more: consumed < total,
        })
    }
}
