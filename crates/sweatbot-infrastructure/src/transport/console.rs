use async_trait::async_trait;
use serde_json::json;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use sweatbot_domain::shared::{ChatId, DomainError};
use sweatbot_domain::transport::ReplySender;

/// Writes each reply as a `{"chat_id","text"}` JSON line. Presence updates
/// are dropped.
pub struct ConsoleReplySender<W> {
    out: Mutex<W>,
}

impl<W> ConsoleReplySender<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl ConsoleReplySender<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> ReplySender for ConsoleReplySender<W> {
    async fn send(&self, chat_id: &ChatId, text: &str) -> Result<(), DomainError> {
        let mut line = serde_json::to_vec(&json!({ "chat_id": chat_id, "text": text }))
            .map_err(|e| DomainError::Serialization(e.to_string()))?;
        line.push(b'\n');

        let mut out = self.out.lock().await;
        out.write_all(&line)
            .await
            .map_err(|e| DomainError::Infrastructure(format!("Failed to write reply: {}", e)))?;
        out.flush()
            .await
            .map_err(|e| DomainError::Infrastructure(format!("Failed to flush reply: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_written_as_json_line() {
        let sender = ConsoleReplySender::new(Vec::<u8>::new());
        let chat = ChatId::from_string("g1");

        sender.send(&chat, "Halo\nSemua").await.unwrap();
        sender.set_typing(&chat, true).await.unwrap();

        let written = String::from_utf8(sender.into_inner()).unwrap();
        assert_eq!(written, "{\"chat_id\":\"g1\",\"text\":\"Halo\\nSemua\"}\n");
    }
}
