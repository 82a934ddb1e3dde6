use async_trait::async_trait;

use sweatbot_domain::shared::DomainError;

/// Marker for command objects
pub trait Command: Send + Sync {}

/// Command handler trait (CQRS write side)
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    type Result;

    async fn handle(&self, cmd: C) -> Result<Self::Result, DomainError>;
}
