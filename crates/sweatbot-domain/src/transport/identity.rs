use async_trait::async_trait;

use crate::shared::{DomainError, MemberId};

/// Maps a transport-level sender id onto the stable member id reports are
/// keyed by. Resolution never fails: an unknown sender is its own member id.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, sender: &str) -> MemberId;

    /// Remember that `alias` belongs to `member_id`. Resolvers without
    /// storage ignore it.
    async fn link(&self, _alias: &str, _member_id: &MemberId) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Resolver for transports whose sender ids are already stable.
pub struct PassthroughIdentity;

#[async_trait]
impl IdentityResolver for PassthroughIdentity {
    async fn resolve(&self, sender: &str) -> MemberId {
        MemberId::from_string(sender)
    }
}
