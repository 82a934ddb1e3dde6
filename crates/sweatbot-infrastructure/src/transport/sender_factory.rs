use std::sync::Arc;

use sweatbot_domain::shared::DomainError;
use sweatbot_domain::transport::ReplySender;

use super::{ConsoleReplySender, WebhookReplySender};
use crate::config::BotConfig;

/// Webhook delivery when a reply webhook is configured, stdout otherwise
pub fn create_reply_sender(config: &BotConfig) -> Result<Arc<dyn ReplySender>, DomainError> {
    match &config.reply_webhook {
        Some(endpoint) => {
            log::info!("Replies go to webhook {}", endpoint);
            Ok(Arc::new(WebhookReplySender::new(endpoint.clone())?))
        }
        None => {
            log::info!("Replies go to stdout");
            Ok(Arc::new(ConsoleReplySender::stdout()))
        }
    }
}
