use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, HistogramVec,
    IntCounter, IntCounterVec,
};

lazy_static! {
    /// Duration of feed requests by sort mode.
    pub static ref FEED_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "feed_request_duration_seconds",
        "Feed request duration segmented by sort mode",
        &["sort"]
    )
    .expect("failed to register feed_request_duration_seconds");

    /// Total feed requests by sort mode and outcome.
    pub static ref FEED_REQUEST_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feed_request_total",
        "Total feed requests segmented by sort mode and outcome",
        &["sort", "result"]
    )
    .expect("failed to register feed_request_total");

    /// Size of the merged candidate set, by entry kind (post, repost).
    pub static ref FEED_CANDIDATE_COUNT: HistogramVec = register_histogram_vec!(
        "feed_candidate_count",
        "Number of feed candidates composed per request segmented by entry kind",
        &["kind"],
        vec![0.0, 10.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0]
    )
    .expect("failed to register feed_candidate_count");

    /// Requests whose native posts hit `FEED_MAX_CANDIDATES`.
    pub static ref FEED_CANDIDATES_TRUNCATED_TOTAL: IntCounter = register_int_counter!(
        "feed_candidates_truncated_total",
        "Feed requests whose native candidate window was cut at the configured cap"
    )
    .expect("failed to register feed_candidates_truncated_total");

    /// Repost events dropped because the original is deleted or private.
    pub static ref FEED_REPOSTS_SKIPPED_TOTAL: IntCounter = register_int_counter!(
        "feed_reposts_skipped_total",
        "Repost events skipped during fan-in"
    )
    .expect("failed to register feed_reposts_skipped_total");
}
