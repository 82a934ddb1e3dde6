use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use sweatbot_domain::report::ReportLock;
use sweatbot_domain::shared::MemberId;

/// Per-member async mutexes backing `ReportRepository::lock_member`.
///
/// Entries are created on demand and pruned once no task holds or waits on
/// them.
#[derive(Clone, Default)]
pub struct MemberLocks {
    inner: Arc<Mutex<HashMap<MemberId, Arc<tokio::sync::Mutex<()>>>>>,
}

impl MemberLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, member_id: &MemberId) -> ReportLock {
        let mutex = {
            let mut locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, m| Arc::strong_count(m) > 1);
            locks.entry(member_id.clone()).or_default().clone()
        };

        ReportLock::new(mutex.lock_owned().await)
    }

    /// Number of members currently held or waited on.
    pub fn tracked(&self) -> usize {
        let locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        locks.values().filter(|m| Arc::strong_count(m) > 1).count()
    }
}
