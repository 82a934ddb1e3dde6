use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::message_router::MessageRouter;
use super::messages::UNKNOWN_SENDER;
use super::reply_pacer::ReplyPacer;
use sweatbot_domain::shared::{ChatId, ErrorSeverity, MemberId};
use sweatbot_domain::transport::{IdentityResolver, InboundMessage, ReplySender};

/// What happened to one inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Posted outside the configured group
    OtherChat,
    /// Sent by the bot's own account
    OwnMessage,
    EmptyText,
    /// Ordinary chatter, no reply
    NoCommand,
    Replied,
    /// Routing or delivery failed; logged, nothing sent
    Failed,
}

/// Front door for the transport: filters the audience, resolves the
/// sender and hands the text to the router.
pub struct MessageDispatcher {
    router: Arc<MessageRouter>,
    identity: Arc<dyn IdentityResolver>,
    sender: Arc<dyn ReplySender>,
    pacer: ReplyPacer,
    group_id: Option<ChatId>,
}

impl MessageDispatcher {
    pub fn new(
        router: Arc<MessageRouter>,
        identity: Arc<dyn IdentityResolver>,
        sender: Arc<dyn ReplySender>,
        pacer: ReplyPacer,
        group_id: Option<ChatId>,
    ) -> Self {
        Self {
            router,
            identity,
            sender,
            pacer,
            group_id,
        }
    }

    pub async fn dispatch(&self, message: InboundMessage) -> DispatchOutcome {
        if let Some(group_id) = &self.group_id {
            if &message.chat_id != group_id {
                return DispatchOutcome::OtherChat;
            }
        }

        if message.from_me {
            return DispatchOutcome::OwnMessage;
        }

        if message.text.trim().is_empty() {
            return DispatchOutcome::EmptyText;
        }

        let member_id = self.member_id(&message).await;
        let display_name = match message.push_name.trim() {
            "" => UNKNOWN_SENDER,
            name => name,
        };

        debug!(
            member_id = %member_id,
            chat_id = %message.chat_id,
            "Message from {}: {}",
            display_name,
            message.text
        );

        let reply = match self
            .router
            .route(&member_id, display_name, &message.text)
            .await
        {
            Ok(Some(reply)) => reply,
            Ok(None) => return DispatchOutcome::NoCommand,
            Err(e) => {
                match e.severity() {
                    ErrorSeverity::Error => error!(
                        member_id = %member_id,
                        chat_id = %message.chat_id,
                        "Error handling message: {}",
                        e.format_with_code()
                    ),
                    _ => warn!(
                        member_id = %member_id,
                        chat_id = %message.chat_id,
                        "Error handling message: {}",
                        e.format_with_code()
                    ),
                }
                return DispatchOutcome::Failed;
            }
        };

        match self
            .pacer
            .deliver(self.sender.as_ref(), &message.chat_id, &reply)
            .await
        {
            Ok(()) => {
                info!(member_id = %member_id, chat_id = %message.chat_id, "Reply sent");
                DispatchOutcome::Replied
            }
            Err(e) => {
                error!(chat_id = %message.chat_id, "Failed to send reply: {}", e);
                DispatchOutcome::Failed
            }
        }
    }

    /// Stable member id for the sender. A message that carries the phone id
    /// next to a linked-device alias links the two, so later alias-only
    /// messages count for the same member.
    async fn member_id(&self, message: &InboundMessage) -> MemberId {
        let alt = message
            .sender_alt
            .as_deref()
            .map(str::trim)
            .filter(|alt| !alt.is_empty());

        let Some(alt) = alt else {
            return self.identity.resolve(&message.sender).await;
        };

        let member_id = MemberId::from_string(alt);
        if message.sender.trim() != alt && self.identity.resolve(&message.sender).await != member_id {
            if let Err(e) = self.identity.link(&message.sender, &member_id).await {
                warn!(
                    member_id = %member_id,
                    "Failed to link alias {}: {}",
                    message.sender,
                    e
                );
            }
        }

        member_id
    }
}
