use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use sweatbot_domain::report::{Report, ReportLock, ReportRepository};
use sweatbot_domain::shared::{DomainError, MemberId};

use crate::persistence::MemberLocks;

/// Process-local ReportRepository. Same locking contract as the SQLite one;
/// nothing survives a restart.
#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: RwLock<BTreeMap<MemberId, Report>>,
    locks: MemberLocks,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reports(reports: impl IntoIterator<Item = Report>) -> Self {
        let reports = reports
            .into_iter()
            .map(|r| (r.member_id().clone(), r))
            .collect();

        Self {
            reports: RwLock::new(reports),
            locks: MemberLocks::new(),
        }
    }

    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn lock_member(&self, member_id: &MemberId) -> Result<ReportLock, DomainError> {
        Ok(self.locks.acquire(member_id).await)
    }

    async fn find_by_member(&self, member_id: &MemberId) -> Result<Option<Report>, DomainError> {
        let reports = self.reports.read().await;
        Ok(reports.get(member_id).cloned())
    }

    async fn save(&self, report: &Report) -> Result<(), DomainError> {
        let mut reports = self.reports.write().await;
        reports.insert(report.member_id().clone(), report.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Report>, DomainError> {
        let reports = self.reports.read().await;
        Ok(reports.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn report(id: &str, name: &str) -> Report {
        Report::first(
            MemberId::from_string(id),
            name,
            DateTime::parse_from_rfc3339("2026-02-06T07:00:00+07:00").unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_replaces_by_member_id() {
        let repo = InMemoryReportRepository::new();

        repo.save(&report("628111", "Alice")).await.unwrap();
        repo.save(&report("628111", "Alice B")).await.unwrap();

        assert_eq!(repo.len().await, 1);
        let found = repo
            .find_by_member(&MemberId::from_string("628111"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.display_name(), "Alice B");
    }

    #[tokio::test]
    async fn test_find_missing_member() {
        let repo = InMemoryReportRepository::with_reports([report("628111", "Alice")]);

        let missing = repo
            .find_by_member(&MemberId::from_string("628999"))
            .await
            .unwrap();
        assert!(missing.is_none());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }
}
