/// Sync service - mirrors the account's media into the posts table
use crate::db::post_repo;
use crate::error::Result;
use crate::instagram::MediaApi;
use crate::metrics::sync::{SYNC_DURATION_SECONDS, SYNC_ITEMS_TOTAL, SYNC_RUNS_TOTAL};
use crate::models::SyncStats;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

pub struct SyncService {
    pool: PgPool,
    api: Arc<dyn MediaApi>,
}

impl SyncService {
    pub fn new(pool: PgPool, api: Arc<dyn MediaApi>) -> Self {
        Self { pool, api }
    }

    /// Page through every remote media item and upsert it locally.
    ///
    /// All pages are written in one transaction: a failure on any page
    /// rolls back everything this invocation wrote.
    pub async fn sync_all_media(&self) -> Result<SyncStats> {
        info!("Starting Instagram media sync");
        let started = Instant::now();

        let result = self.run().await;
        SYNC_DURATION_SECONDS.observe(started.elapsed().as_secs_f64());

        match &result {
            Ok(stats) => {
                SYNC_RUNS_TOTAL.with_label_values(&["success"]).inc();
                SYNC_ITEMS_TOTAL
                    .with_label_values(&["created"])
                    .inc_by(stats.created);
                SYNC_ITEMS_TOTAL
                    .with_label_values(&["updated"])
                    .inc_by(stats.updated);
                info!(
                    created = stats.created,
                    updated = stats.updated,
                    total = stats.total,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Instagram media sync completed"
                );
            }
            Err(e) => {
                SYNC_RUNS_TOTAL.with_label_values(&["failure"]).inc();
                error!(error = %e, "Instagram media sync failed; transaction rolled back");
            }
        }

        result
    }

    async fn run(&self) -> Result<SyncStats> {
        let mut tx = self.pool.begin().await?;
        let mut stats = SyncStats::default();

        let mut page = self.api.list_media().await?;
        let mut page_number = 1u32;

        loop {
            if page.data.is_empty() {
                debug!(page = page_number, "Empty media page, stopping");
                break;
            }

            for item in &page.data {
                let inserted = post_repo::upsert_post(&mut *tx, item).await?;
                stats.record(inserted);
            }

            debug!(
                page = page_number,
                items = page.data.len(),
                total = stats.total,
                "Media page upserted"
            );

            let Some(next_url) = page.next_url().map(str::to_owned) else {
                break;
            };
            page = self.api.next_page(&next_url).await?;
            page_number += 1;
        }

        // Dropping `tx` on any early return above rolls the sync back
        tx.commit().await?;
        Ok(stats)
    }
}
