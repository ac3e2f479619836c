//! Conversation state and the per-exchange state machine.
//!
//! This module owns the message data model: ordered conversations with
//! ID-based reconciliation, and the engine that sequences one exchange
//! (optimistic append, pending placeholder, resolution or failure)
//! against the remote service.

mod conversation;
mod exchange;
mod message;

pub use conversation::Conversation;
pub use exchange::{ExchangeEngine, PendingExchange, EXCHANGE_ERROR_REPLY};
pub use message::{Message, MessageId, Role};
