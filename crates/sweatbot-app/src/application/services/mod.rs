mod dispatcher;
mod message_router;
pub mod messages;
mod reply_pacer;

pub use dispatcher::{DispatchOutcome, MessageDispatcher};
pub use message_router::{BotCommand, MessageRouter};
pub use reply_pacer::ReplyPacer;
