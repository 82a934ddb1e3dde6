use serde::{Deserialize, Serialize};

use crate::shared::ChatId;

/// A chat message as delivered by the transport, before audience filtering
/// and identity resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Conversation the message was posted in (the group chat).
    pub chat_id: ChatId,
    /// Transport-level sender id. May be a linked-device alias.
    pub sender: String,
    /// Phone-number id of the sender, when the transport delivers it next to
    /// a linked-device alias.
    #[serde(default)]
    pub sender_alt: Option<String>,
    /// Name the sender shows in the chat
    #[serde(default)]
    pub push_name: String,
    #[serde(default)]
    pub text: String,
    /// Sent by the bot's own account
    #[serde(default)]
    pub from_me: bool,
}
