use async_trait::async_trait;

use super::Report;
use crate::shared::{DomainError, MemberId};

/// Exclusive hold on one member's report.
///
/// While a lock is alive no other `lock_member` call for the same member
/// completes. Dropping it releases the member.
#[must_use = "the member is released as soon as the lock is dropped"]
pub struct ReportLock {
    _guard: Box<dyn Send + Sync>,
}

impl ReportLock {
    pub fn new<G>(guard: G) -> Self
    where
        G: Send + Sync + 'static,
    {
        Self {
            _guard: Box::new(guard),
        }
    }
}

impl std::fmt::Debug for ReportLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportLock").finish_non_exhaustive()
    }
}

/// Report repository trait
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Serialize read-modify-write cycles on a single member. Different
    /// members never wait on each other.
    async fn lock_member(&self, member_id: &MemberId) -> Result<ReportLock, DomainError>;

    /// Find the report of a member, if they ever reported
    async fn find_by_member(&self, member_id: &MemberId) -> Result<Option<Report>, DomainError>;

    /// Insert or replace the report keyed by its member id
    async fn save(&self, report: &Report) -> Result<(), DomainError>;

    /// Find all reports, in no particular order
    async fn find_all(&self) -> Result<Vec<Report>, DomainError>;
}
