mod console;
mod inbound;
mod sender_factory;
mod webhook;

pub use console::ConsoleReplySender;
pub use inbound::JsonLinesInbound;
pub use sender_factory::create_reply_sender;
pub use webhook::WebhookReplySender;
