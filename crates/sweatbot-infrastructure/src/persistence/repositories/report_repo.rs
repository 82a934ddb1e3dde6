use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use sweatbot_domain::report::{Report, ReportLock, ReportRepository};
use sweatbot_domain::shared::{DomainError, MemberId};

use crate::persistence::{MemberLocks, RepositoryErrorMapper};

/// Parse a stored timestamp. RFC 3339 with offset is what we write; the old
/// SQLite format '2026-02-06 12:34:56' is read as UTC.
fn parse_datetime_flexible(datetime_str: &str) -> Result<DateTime<FixedOffset>, DomainError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        return Ok(dt);
    }

    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|e| {
            DomainError::DataIntegrity(format!(
                "Invalid last_report_at '{}': {}",
                datetime_str, e
            ))
        })
}

#[derive(Debug, FromRow)]
struct ReportRow {
    member_id: String,
    display_name: String,
    streak: i64,
    activity_count: i64,
    last_report_at: String,
}

impl ReportRow {
    fn into_report(self) -> Result<Report, DomainError> {
        let streak = u32::try_from(self.streak).map_err(|_| {
            DomainError::DataIntegrity(format!(
                "Streak {} out of range for {}",
                self.streak, self.member_id
            ))
        })?;
        let activity_count = u32::try_from(self.activity_count).map_err(|_| {
            DomainError::DataIntegrity(format!(
                "Activity count {} out of range for {}",
                self.activity_count, self.member_id
            ))
        })?;

        Report::restore(
            MemberId::from_string(&self.member_id),
            self.display_name,
            streak,
            activity_count,
            parse_datetime_flexible(&self.last_report_at)?,
        )
    }
}

/// SQLite implementation of ReportRepository
pub struct SqliteReportRepository {
    pool: Arc<SqlitePool>,
    locks: MemberLocks,
}

impl SqliteReportRepository {
    const SELECT_QUERY: &'static str = r#"
            SELECT member_id, display_name, streak, activity_count, last_report_at
            FROM member_reports
        "#;

    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            pool,
            locks: MemberLocks::new(),
        }
    }
}

#[async_trait]
impl ReportRepository for SqliteReportRepository {
    async fn lock_member(&self, member_id: &MemberId) -> Result<ReportLock, DomainError> {
        Ok(self.locks.acquire(member_id).await)
    }

    async fn find_by_member(&self, member_id: &MemberId) -> Result<Option<Report>, DomainError> {
        let start = Instant::now();

        let query = format!("{} WHERE member_id = ?1", Self::SELECT_QUERY);
        let row: Option<ReportRow> = sqlx::query_as(&query)
            .bind(member_id.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Find report by member"))?;

        info!(
            "📊 find_by_member({}): {:.2}ms, found: {}",
            member_id,
            start.elapsed().as_secs_f64() * 1000.0,
            row.is_some()
        );

        row.map(ReportRow::into_report).transpose()
    }

    async fn save(&self, report: &Report) -> Result<(), DomainError> {
        let start = Instant::now();

        sqlx::query(
            r#"
            INSERT INTO member_reports (member_id, display_name, streak, activity_count, last_report_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(member_id) DO UPDATE SET
                display_name = excluded.display_name,
                streak = excluded.streak,
                activity_count = excluded.activity_count,
                last_report_at = excluded.last_report_at
            "#,
        )
        .bind(report.member_id().as_str())
        .bind(report.display_name())
        .bind(report.streak() as i64)
        .bind(report.activity_count() as i64)
        .bind(report.last_report_at().to_rfc3339())
        .execute(&*self.pool)
        .await
        .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Save report"))?;

        info!(
            "📊 Report saved: {} in {:.2}ms",
            report.member_id(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Report>, DomainError> {
        let start = Instant::now();

        let query = format!("{} ORDER BY streak DESC", Self::SELECT_QUERY);
        let rows: Vec<ReportRow> = sqlx::query_as(&query)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Find all reports"))?;

        let elapsed = start.elapsed();
        if elapsed.as_millis() > 100 {
            warn!(
                "🐌 SLOW QUERY: find_all() took {:.2}ms for {} reports",
                elapsed.as_secs_f64() * 1000.0,
                rows.len()
            );
        }

        let count = rows.len();
        let reports = rows
            .into_iter()
            .map(ReportRow::into_report)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                error!("Failed to load reports: {}", e);
                e
            })?;

        info!(
            "📊 find_all(): {:.2}ms, {} reports loaded",
            elapsed.as_secs_f64() * 1000.0,
            count
        );

        Ok(reports)
    }
}
