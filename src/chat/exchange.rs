//! Per-exchange state machine.
//!
//! One exchange is a user submission paired with the assistant's eventual
//! reply. It moves through `composing -> submitted -> resolved | failed`:
//!
//! - `begin` leaves `composing` by atomically appending the user message
//!   and its pending assistant placeholder, so the conversation never
//!   shows a user turn without its paired slot.
//! - `resolve` and `fail` reconcile the placeholder by its ID, never by
//!   position, and clear the loading flag. If the ID is gone (the
//!   conversation was reset mid-flight) the update is a no-op.
//!
//! At most one exchange is in flight at a time; `begin` refuses while the
//! loading flag is set. Failed exchanges are terminal, with no automatic
//! retry.

use tracing::{debug, warn};

use super::{Conversation, Message, MessageId};
use crate::client::ApiClient;
use crate::session::SessionToken;

/// Fixed reply written into the placeholder when an exchange fails.
pub const EXCHANGE_ERROR_REPLY: &str = "Sorry, there was an error processing your request.";

/// Handle to an exchange that has been submitted but not yet reconciled.
#[derive(Debug, Clone)]
pub struct PendingExchange {
    /// ID of the appended user message.
    pub user: MessageId,
    /// ID of the pending assistant placeholder.
    pub placeholder: MessageId,
    /// Trimmed content that was submitted.
    pub content: String,
}

/// Drives message exchanges against the remote service.
#[derive(Debug, Default)]
pub struct ExchangeEngine {
    in_flight: bool,
}

impl ExchangeEngine {
    /// Create a new engine with no exchange in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an exchange is currently awaiting its reply.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Submit user input, appending the user message and its placeholder.
    ///
    /// Returns `None` without touching the conversation when the trimmed
    /// input is empty or another exchange is already in flight. Otherwise
    /// both messages are appended back to back before this returns, and
    /// the loading flag is set.
    pub fn begin(&mut self, conversation: &mut Conversation, input: &str) -> Option<PendingExchange> {
        let content = input.trim();
        if content.is_empty() || self.in_flight {
            return None;
        }

        let user = Message::user(content);
        let placeholder = Message::pending();
        let pending = PendingExchange {
            user: user.id(),
            placeholder: placeholder.id(),
            content: content.to_string(),
        };

        conversation.push(user);
        conversation.push(placeholder);
        self.in_flight = true;

        debug!(user = %pending.user, placeholder = %pending.placeholder, "exchange submitted");
        Some(pending)
    }

    /// Resolve the placeholder with the service reply.
    ///
    /// Returns `false` if the placeholder is no longer present; the
    /// loading flag is cleared either way.
    pub fn resolve(
        &mut self,
        conversation: &mut Conversation,
        placeholder: MessageId,
        reply: impl Into<String>,
    ) -> bool {
        self.in_flight = false;
        conversation.set_content(placeholder, reply.into())
    }

    /// Mark the exchange as failed, writing the error sentinel.
    ///
    /// Returns `false` if the placeholder is no longer present; the
    /// loading flag is cleared either way.
    pub fn fail(&mut self, conversation: &mut Conversation, placeholder: MessageId) -> bool {
        self.in_flight = false;
        conversation.set_content(placeholder, EXCHANGE_ERROR_REPLY)
    }

    /// Run one full exchange: submit, call the service, reconcile.
    ///
    /// The user+placeholder pair is appended before the request is
    /// issued, so the ordering is visible even if the reply never
    /// arrives. Returns the placeholder ID when an exchange ran, `None`
    /// when the submission was refused.
    pub async fn send(
        &mut self,
        client: &ApiClient,
        token: &SessionToken,
        conversation: &mut Conversation,
        input: &str,
    ) -> Option<MessageId> {
        let pending = self.begin(conversation, input)?;

        match client.send_chat(token, &pending.content).await {
            Ok(reply) => {
                self.resolve(conversation, pending.placeholder, reply);
            }
            Err(e) => {
                warn!(error = %e, placeholder = %pending.placeholder, "exchange failed");
                self.fail(conversation, pending.placeholder);
            }
        }

        Some(pending.placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;

    #[test]
    fn test_begin_appends_pair() {
        let mut engine = ExchangeEngine::new();
        let mut conv = Conversation::new();

        let pending = engine.begin(&mut conv, "Hello").unwrap();

        assert_eq!(conv.len(), 2);
        let messages: Vec<_> = conv.iter().collect();
        assert_eq!(messages[0].role(), Role::User);
        assert_eq!(messages[0].content(), "Hello");
        assert_eq!(messages[0].id(), pending.user);
        assert_eq!(messages[1].role(), Role::Assistant);
        assert_eq!(messages[1].content(), "");
        assert!(messages[1].is_pending());
        assert_eq!(messages[1].id(), pending.placeholder);
        assert!(engine.is_loading());
    }

    #[test]
    fn test_begin_trims_input() {
        let mut engine = ExchangeEngine::new();
        let mut conv = Conversation::new();

        let pending = engine.begin(&mut conv, "  Hello  ").unwrap();
        assert_eq!(pending.content, "Hello");
        assert_eq!(conv.iter().next().unwrap().content(), "Hello");
    }

    #[test]
    fn test_begin_rejects_empty_input() {
        let mut engine = ExchangeEngine::new();
        let mut conv = Conversation::new();

        assert!(engine.begin(&mut conv, "").is_none());
        assert!(engine.begin(&mut conv, "   \t ").is_none());
        assert!(conv.is_empty());
        assert!(!engine.is_loading());
    }

    #[test]
    fn test_begin_blocked_while_in_flight() {
        let mut engine = ExchangeEngine::new();
        let mut conv = Conversation::new();

        engine.begin(&mut conv, "first").unwrap();
        assert!(engine.begin(&mut conv, "second").is_none());
        assert_eq!(conv.len(), 2);
    }

    #[test]
    fn test_resolve_replaces_content_in_place() {
        let mut engine = ExchangeEngine::new();
        let mut conv = Conversation::new();

        let pending = engine.begin(&mut conv, "Hello").unwrap();
        assert!(engine.resolve(&mut conv, pending.placeholder, "Hi there"));

        assert!(!engine.is_loading());
        assert_eq!(conv.len(), 2);
        let last = conv.last().unwrap();
        assert_eq!(last.id(), pending.placeholder);
        assert_eq!(last.content(), "Hi there");
    }

    #[test]
    fn test_fail_writes_sentinel() {
        let mut engine = ExchangeEngine::new();
        let mut conv = Conversation::new();

        let pending = engine.begin(&mut conv, "Hello").unwrap();
        assert!(engine.fail(&mut conv, pending.placeholder));

        assert!(!engine.is_loading());
        let last = conv.last().unwrap();
        assert_eq!(last.content(), EXCHANGE_ERROR_REPLY);
        assert!(!last.is_pending());
    }

    #[test]
    fn test_submit_unblocked_after_resolution() {
        let mut engine = ExchangeEngine::new();
        let mut conv = Conversation::new();

        let pending = engine.begin(&mut conv, "first").unwrap();
        engine.resolve(&mut conv, pending.placeholder, "ok");

        assert!(engine.begin(&mut conv, "second").is_some());
        assert_eq!(conv.len(), 4);
    }

    #[test]
    fn test_resolve_after_reset_is_noop() {
        let mut engine = ExchangeEngine::new();
        let mut conv = Conversation::new();

        let pending = engine.begin(&mut conv, "Hello").unwrap();
        // Reset clears the conversation while the exchange is in flight
        conv.clear();

        assert!(!engine.resolve(&mut conv, pending.placeholder, "orphaned"));
        assert!(conv.is_empty());
        // The flag still clears so the next submission is not wedged
        assert!(!engine.is_loading());
    }

    #[test]
    fn test_fail_after_reset_is_noop() {
        let mut engine = ExchangeEngine::new();
        let mut conv = Conversation::new();

        let pending = engine.begin(&mut conv, "Hello").unwrap();
        conv.clear();

        assert!(!engine.fail(&mut conv, pending.placeholder));
        assert!(conv.is_empty());
    }
}
