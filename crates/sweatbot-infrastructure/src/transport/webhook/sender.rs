use async_trait::async_trait;

use sweatbot_domain::shared::{ChatId, DomainError};
use sweatbot_domain::transport::ReplySender;

impl super::WebhookReplySender {
    async fn post(&self, payload: &serde_json::Value) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| DomainError::Infrastructure(format!("Failed to reach reply webhook: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Infrastructure(format!(
                "Reply webhook failed with status {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl ReplySender for super::WebhookReplySender {
    async fn send(&self, chat_id: &ChatId, text: &str) -> Result<(), DomainError> {
        self.post(&Self::build_text_payload(chat_id, text)).await
    }

    async fn set_typing(&self, chat_id: &ChatId, typing: bool) -> Result<(), DomainError> {
        self.post(&Self::build_typing_payload(chat_id, typing)).await
    }
}
