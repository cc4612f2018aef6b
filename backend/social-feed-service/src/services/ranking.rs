//! Ranking and in-memory pagination of the merged candidate set.

use std::cmp::Ordering;

use crate::domain::feed::{FeedEntry, FeedSort};

fn compare(a: &FeedEntry, b: &FeedEntry, sort: FeedSort) -> Ordering {
    match sort {
        FeedSort::Popular => b
            .popularity_score()
            .cmp(&a.popularity_score())
            .then_with(|| b.effective_timestamp().cmp(&a.effective_timestamp())),
        FeedSort::Recent => b.effective_timestamp().cmp(&a.effective_timestamp()),
    }
}

/// Stable sort, so full ties keep composition order
pub fn rank_entries(entries: &mut [FeedEntry], sort: FeedSort) {
    entries.sort_by(|a, b| compare(a, b, sort));
}

/// Slice `[offset, offset + limit)` where `offset = (page - 1) * limit`.
///
/// `page` and `limit` are expected to be at least 1.
pub fn paginate(entries: Vec<FeedEntry>, page: u32, limit: u32) -> Vec<FeedEntry> {
    let offset = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);

    entries
        .into_iter()
        .skip(offset)
        .take(limit as usize)
        .collect()
}
