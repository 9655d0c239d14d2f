//! Prometheus metrics for database connection pool
//!
//! Tracks pool size by state so saturation is visible next to request metrics.

use prometheus::{register_int_gauge_vec, IntGaugeVec};
use sqlx::PgPool;

lazy_static::lazy_static! {
    /// Database connection pool size by state (idle/active/max)
    static ref DB_POOL_CONNECTIONS: IntGaugeVec = register_int_gauge_vec!(
        "db_pool_connections",
        "Database pool connection count by state",
        &["service", "state"]
    ).expect("Prometheus metrics registration should succeed at startup");
}

/// Snapshot of pool occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolUsage {
    pub idle: i64,
    pub active: i64,
    pub max: i64,
}

impl PoolUsage {
    pub fn from_pool(pool: &PgPool) -> Self {
        let size = pool.size() as i64;
        let idle = pool.num_idle() as i64;
        Self {
            idle,
            active: (size - idle).max(0),
            max: pool.options().get_max_connections() as i64,
        }
    }
}

/// Publish a usage snapshot for `service`
pub(crate) fn record_pool_usage(service: &str, usage: PoolUsage) {
    DB_POOL_CONNECTIONS
        .with_label_values(&[service, "idle"])
        .set(usage.idle);
    DB_POOL_CONNECTIONS
        .with_label_values(&[service, "active"])
        .set(usage.active);
    DB_POOL_CONNECTIONS
        .with_label_values(&[service, "max"])
        .set(usage.max);
}

/// Update connection pool metrics (called periodically)
pub(crate) fn update_pool_metrics(pool: &PgPool, service: &str) {
    record_pool_usage(service, PoolUsage::from_pool(pool));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_pool_usage_sets_gauges() {
        record_pool_usage(
            "metrics-test",
            PoolUsage {
                idle: 3,
                active: 2,
                max: 10,
            },
        );

        assert_eq!(
            DB_POOL_CONNECTIONS
                .with_label_values(&["metrics-test", "idle"])
                .get(),
            3
        );
        assert_eq!(
            DB_POOL_CONNECTIONS
                .with_label_values(&["metrics-test", "active"])
                .get(),
            2
        );
        assert_eq!(
            DB_POOL_CONNECTIONS
                .with_label_values(&["metrics-test", "max"])
                .get(),
            10
        );
    }
}
