use async_trait::async_trait;

use crate::shared::{ChatId, DomainError};

/// Outbound side of the chat transport (Strategy pattern).
/// Each delivery channel implements this trait.
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// Deliver a reply as a single text blob to the conversation
    async fn send(&self, chat_id: &ChatId, text: &str) -> Result<(), DomainError>;

    /// Raise or clear the "typing…" indicator. Channels without presence
    /// support ignore it.
    async fn set_typing(&self, _chat_id: &ChatId, _typing: bool) -> Result<(), DomainError> {
        Ok(())
    }
}
