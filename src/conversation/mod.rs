pub mod aggregate;
pub mod request;
pub mod roles;

pub use aggregate::{aggregate, AggregatedConversation};
pub use request::{ConversationPayload, ConversationRequest, Message, RawEvent};
pub use roles::{normalize_role, Sender};
