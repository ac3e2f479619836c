//! Ordered conversation storage with ID-based reconciliation.

use std::collections::HashMap;

use super::{Message, MessageId};

/// An ordered sequence of messages, oldest first.
///
/// Internally the conversation is a map keyed by message ID plus an
/// insertion-order vector, so locating a pending placeholder by its ID is
/// O(1) and stays correct even when other mutations (such as a reset)
/// interleave with an in-flight exchange. Externally it reads as a plain
/// ordered sequence.
///
/// The sequence is append-only, apart from in-place content updates to
/// messages located by ID.
#[derive(Debug, Default)]
pub struct Conversation {
    order: Vec<MessageId>,
    by_id: HashMap<MessageId, Message>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a conversation from restored history, preserving order.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        let mut conversation = Self::new();
        for message in messages {
            conversation.push(message);
        }
        conversation
    }

    /// Append a message to the end of the conversation.
    pub fn push(&mut self, message: Message) {
        let id = message.id();
        self.order.push(id);
        self.by_id.insert(id, message);
    }

    /// Replace the content of the message with the given ID.
    ///
    /// Returns `true` if the message was found and updated. If the ID is
    /// no longer present (e.g. a reset cleared the conversation while an
    /// exchange was in flight) this is a no-op and returns `false`.
    pub fn set_content(&mut self, id: MessageId, content: impl Into<String>) -> bool {
        match self.by_id.get_mut(&id) {
            Some(message) => {
                message.set_content(content.into());
                true
            }
            None => false,
        }
    }

    /// Get the message with the given ID, if present.
    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.by_id.get(&id)
    }

    /// Iterate over messages in insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    /// The last message in the conversation, if any.
    pub fn last(&self) -> Option<&Message> {
        self.order.last().and_then(|id| self.by_id.get(id))
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the conversation holds no messages.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove all messages.
    pub fn clear(&mut self) {
        self.order.clear();
        self.by_id.clear();
    }
}
