use chrono::{DateTime, FixedOffset};
use std::sync::Arc;

use sqlx::SqlitePool;
use sweatbot_infrastructure::persistence::Database;

/// In-memory database with every migration applied
pub async fn setup_in_memory_db() -> Arc<SqlitePool> {
    let db = Database::in_memory()
        .await
        .expect("Failed to open in-memory database");
    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    Arc::new(db.pool().clone())
}

#[allow(dead_code)]
pub fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).expect("valid RFC 3339 timestamp")
}
