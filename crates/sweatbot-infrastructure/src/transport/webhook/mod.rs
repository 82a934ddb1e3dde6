mod sender;

use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use url::Url;

use sweatbot_domain::shared::{ChatId, DomainError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivers replies by POSTing JSON to a gateway that owns the chat session
pub struct WebhookReplySender {
    endpoint: Url,
    client: Client,
}

impl WebhookReplySender {
    pub fn new(endpoint: Url) -> Result<Self, DomainError> {
        Self::with_timeout(endpoint, REQUEST_TIMEOUT)
    }

    /// Every request, connect included, gives up after `timeout`
    pub fn with_timeout(endpoint: Url, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::Infrastructure(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_text_payload(chat_id: &ChatId, text: &str) -> serde_json::Value {
        json!({
            "chat_id": chat_id,
            "text": text
        })
    }

    fn build_typing_payload(chat_id: &ChatId, typing: bool) -> serde_json::Value {
        json!({
            "chat_id": chat_id,
            "typing": typing
        })
    }
}
