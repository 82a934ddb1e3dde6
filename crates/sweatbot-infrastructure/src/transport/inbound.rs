use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use sweatbot_domain::shared::DomainError;
use sweatbot_domain::transport::InboundMessage;

/// Reads one JSON `InboundMessage` per line. Blank lines are ignored and
/// lines that do not decode are logged and skipped.
pub struct JsonLinesInbound<R> {
    lines: Lines<R>,
    line_no: u64,
}

impl<R: AsyncBufRead + Unpin> JsonLinesInbound<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// `Ok(None)` once the stream is exhausted.
    pub async fn next_message(&mut self) -> Result<Option<InboundMessage>, DomainError> {
        loop {
            let line = self
                .lines
                .next_line()
                .await
                .map_err(|e| DomainError::Infrastructure(format!("Failed to read inbound: {}", e)))?;

            let Some(line) = line else {
                return Ok(None);
            };
            self.line_no += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<InboundMessage>(line) {
                Ok(message) => return Ok(Some(message)),
                Err(e) => {
                    tracing::warn!(line = self.line_no, "Skipping malformed inbound message: {}", e);
                }
            }
        }
    }
}

impl JsonLinesInbound<tokio::io::BufReader<tokio::io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(tokio::io::BufReader::new(tokio::io::stdin()))
    }
}
