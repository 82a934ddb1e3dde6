mod identity;
mod message;
mod sender;

pub use identity::{IdentityResolver, PassthroughIdentity};
pub use message::InboundMessage;
pub use sender::ReplySender;
