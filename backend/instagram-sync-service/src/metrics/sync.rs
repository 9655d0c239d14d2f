use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter_vec, Histogram, IntCounterVec,
};

lazy_static! {
    /// Sync invocations by result (success/failure).
    pub static ref SYNC_RUNS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "instagram_sync_runs_total",
        "Sync invocations segmented by result",
        &["result"]
    )
    .expect("failed to register instagram_sync_runs_total");

    /// Posts upserted by committed syncs, by outcome (created/updated).
    pub static ref SYNC_ITEMS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "instagram_sync_items_total",
        "Posts upserted by committed syncs segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register instagram_sync_items_total");

    /// Wall time of a full sync, including remote paging.
    pub static ref SYNC_DURATION_SECONDS: Histogram = register_histogram!(
        "instagram_sync_duration_seconds",
        "Duration of a full Instagram sync",
        vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]
    )
    .expect("failed to register instagram_sync_duration_seconds");

    /// Graph API calls by operation and result (success/error/missing).
    pub static ref INSTAGRAM_API_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "instagram_api_requests_total",
        "Instagram Graph API requests segmented by operation and result",
        &["operation", "result"]
    )
    .expect("failed to register instagram_api_requests_total");

    /// Comment creation attempts by result.
    pub static ref COMMENTS_CREATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "instagram_comments_created_total",
        "Comment creation attempts segmented by result",
        &["result"]
    )
    .expect("failed to register instagram_comments_created_total");
}

pub fn record_api_request(operation: &str, result: &str) {
    INSTAGRAM_API_REQUESTS_TOTAL
        .with_label_values(&[operation, result])
        .inc();
}

pub fn record_comment_attempt(result: &str) {
    COMMENTS_CREATED_TOTAL.with_label_values(&[result]).inc();
}
