use rand::Rng;
use std::time::Duration;
use tracing::{debug, warn};

use sweatbot_domain::shared::{ChatId, DomainError};
use sweatbot_domain::transport::ReplySender;

/// Holds a reply back for a short, randomized delay so the bot reads like a
/// person typing.
#[derive(Debug, Clone, Copy)]
pub struct ReplyPacer {
    min_ms: u64,
    max_ms: u64,
    show_typing: bool,
}

impl ReplyPacer {
    pub fn new(min_ms: u64, max_ms: u64, show_typing: bool) -> Self {
        Self {
            min_ms,
            max_ms,
            show_typing,
        }
    }

    /// Deliver immediately.
    pub fn immediate() -> Self {
        Self::new(0, 0, false)
    }

    /// Uniform in `[min, max]`; `min` when the range is empty.
    pub fn next_delay(&self) -> Duration {
        let ms = if self.max_ms > self.min_ms {
            rand::thread_rng().gen_range(self.min_ms..=self.max_ms)
        } else {
            self.min_ms
        };
        Duration::from_millis(ms)
    }

    pub async fn deliver(
        &self,
        sender: &dyn ReplySender,
        chat_id: &ChatId,
        text: &str,
    ) -> Result<(), DomainError> {
        let delay = self.next_delay();

        if !delay.is_zero() {
            if self.show_typing {
                if let Err(e) = sender.set_typing(chat_id, true).await {
                    warn!(chat_id = %chat_id, "Failed to raise typing indicator: {}", e);
                }
            }

            debug!(chat_id = %chat_id, "Delaying reply by {}ms", delay.as_millis());
            tokio::time::sleep(delay).await;

            if self.show_typing {
                if let Err(e) = sender.set_typing(chat_id, false).await {
                    warn!(chat_id = %chat_id, "Failed to clear typing indicator: {}", e);
                }
            }
        }

        sender.send(chat_id, text).await
    }
}
