//! Chat message types.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Global counter for message ID generation.
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a chat message.
///
/// Message IDs are generated from an atomic counter, ensuring uniqueness
/// within a single process lifetime. They exist only for local
/// reconciliation of pending placeholders; they are never sent to the
/// remote service. The ID is displayed as `msg-XXXXXXXX` where X is a
/// hexadecimal digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(u64);

impl MessageId {
    /// Create a new unique message ID.
    pub fn new() -> Self {
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Create a MessageId from a raw u64 value.
    ///
    /// This is primarily for testing.
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{:08x}", self.0)
    }
}

/// The sender of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed by the local user.
    User,
    /// Produced by the remote assistant.
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in a conversation.
///
/// User messages are created complete. Assistant messages are created in a
/// pending state (empty content) and later resolved in place with the
/// service reply, or failed with an error sentinel. Once resolved, a
/// message is never mutated again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    content: String,
    role: Role,
    timestamp: String,
}

impl Message {
    /// Create a complete user message with a fresh ID and current timestamp.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            role: Role::User,
            timestamp: now_iso8601(),
        }
    }

    /// Create a pending assistant placeholder (empty content).
    pub fn pending() -> Self {
        Self {
            id: MessageId::new(),
            content: String::new(),
            role: Role::Assistant,
            timestamp: now_iso8601(),
        }
    }

    /// Reconstruct a message restored from server-side history.
    ///
    /// History entries carry no identifier on the wire, so a fresh local
    /// ID is assigned.
    pub fn restored(role: Role, content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            role,
            timestamp: timestamp.into(),
        }
    }

    /// The message's local identifier.
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// The textual content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The sender role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// ISO-8601 creation timestamp.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Whether this is an assistant placeholder still awaiting content.
    pub fn is_pending(&self) -> bool {
        self.role == Role::Assistant && self.content.is_empty()
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }
}

/// Current time as an ISO-8601 string.
fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
