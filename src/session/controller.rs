//! Session lifecycle orchestration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::{SessionToken, TokenStore};
use crate::chat::{Conversation, ExchangeEngine, Message, MessageId};
use crate::client::ApiClient;
use crate::Result;

/// Fixed notice shown when the server-side session deletion fails.
pub const RESET_ERROR_NOTICE: &str = "Failed to start new chat. Please try again.";

/// Owns the session token and conversation, and sequences their lifecycle.
///
/// Bootstrapping restores the persisted token (fetching prior history) or
/// mints a fresh one. Submissions go through the [`ExchangeEngine`] with
/// the current token. Resets replace the session locally and delete the
/// old server-side state as a detached task whose failure is logged and
/// surfaced as a transient notice, never blocking the new session.
pub struct SessionController {
    client: ApiClient,
    store: TokenStore,
    token: SessionToken,
    conversation: Conversation,
    engine: ExchangeEngine,
    resetting: Arc<AtomicBool>,
    notice: Arc<Mutex<Option<String>>>,
}

impl SessionController {
    /// Bootstrap a session: restore the persisted token and its history,
    /// or create and persist a fresh token with an empty conversation.
    ///
    /// History fetch failures are swallowed with a warning; an empty
    /// conversation is a safe default. An unreadable token file is
    /// treated the same as no token.
    pub async fn initialize(client: ApiClient, store: TokenStore) -> Result<Self> {
        let stored = match store.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "token load failed, starting fresh");
                None
            }
        };

        let (token, conversation) = match stored {
            Some(token) => {
                info!(session = %token, "restoring session");
                let history = match client.fetch_history(&token).await {
                    Ok(messages) => messages,
                    Err(e) => {
                        warn!(error = %e, "history fetch failed, starting empty");
                        Vec::new()
                    }
                };
                (token, Conversation::from_messages(history))
            }
            None => {
                let token = SessionToken::generate();
                store.save(&token)?;
                info!(session = %token, "created new session");
                (token, Conversation::new())
            }
        };

        Ok(Self {
            client,
            store,
            token,
            conversation,
            engine: ExchangeEngine::new(),
            resetting: Arc::new(AtomicBool::new(false)),
            notice: Arc::new(Mutex::new(None)),
        })
    }

    /// The current session token.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Messages in the current conversation, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.conversation.iter()
    }

    /// The conversation itself.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Whether an exchange is awaiting its reply.
    pub fn is_loading(&self) -> bool {
        self.engine.is_loading()
    }

    /// Whether a server-side session deletion is still running.
    pub fn is_resetting(&self) -> bool {
        self.resetting.load(Ordering::SeqCst)
    }

    /// Take the pending reset notice, if any, clearing it.
    pub fn take_notice(&self) -> Option<String> {
        self.notice.lock().ok()?.take()
    }

    /// Run one exchange with the current token.
    ///
    /// Returns the placeholder ID when an exchange ran, `None` when the
    /// submission was refused (empty input or another exchange in
    /// flight).
    pub async fn submit(&mut self, input: &str) -> Option<MessageId> {
        self.engine
            .send(&self.client, &self.token, &mut self.conversation, input)
            .await
    }

    /// Replace the session: persist a fresh token, clear the
    /// conversation, and delete the old server-side state.
    ///
    /// The deletion runs as a detached task keyed by the old token; its
    /// failure is logged and sets the reset notice, while the new session
    /// stands regardless. The returned handle lets callers await the
    /// deletion; dropping it is fine.
    pub fn reset(&mut self) -> Result<JoinHandle<()>> {
        let fresh = SessionToken::generate();
        self.store.save(&fresh)?;

        if let Ok(mut slot) = self.notice.lock() {
            *slot = None;
        }
        self.resetting.store(true, Ordering::SeqCst);

        let client = self.client.clone();
        let old = std::mem::replace(&mut self.token, fresh);
        let resetting = Arc::clone(&self.resetting);
        let notice = Arc::clone(&self.notice);
        let handle = tokio::spawn(async move {
            if let Err(e) = client.delete_session(&old).await {
                warn!(error = %e, session = %old, "session delete failed");
                if let Ok(mut slot) = notice.lock() {
                    *slot = Some(RESET_ERROR_NOTICE.to_string());
                }
            }
            resetting.store(false, Ordering::SeqCst);
        });

        self.conversation.clear();
        info!(session = %self.token, "session reset");
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::EXCHANGE_ERROR_REPLY;
    use std::time::Duration;
    use tempfile::tempdir;

    /// Client pointed at a port nothing listens on.
    fn unreachable_client() -> ApiClient {
        ApiClient::with_timeout("http://127.0.0.1:9", Duration::from_millis(500)).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_without_stored_token() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path());

        let controller = SessionController::initialize(unreachable_client(), store.clone())
            .await
            .unwrap();

        // Fresh token persisted, empty conversation, no history fetch
        // attempted (the service is unreachable and this still succeeds).
        assert!(controller.conversation().is_empty());
        assert_eq!(store.load().unwrap().as_ref(), Some(controller.token()));
    }

    #[tokio::test]
    async fn test_initialize_swallows_history_failure() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        let token: SessionToken = "abc-1".parse().unwrap();
        store.save(&token).unwrap();

        let controller = SessionController::initialize(unreachable_client(), store)
            .await
            .unwrap();

        assert_eq!(controller.token(), &token);
        assert!(controller.conversation().is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_writes_sentinel() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        let mut controller = SessionController::initialize(unreachable_client(), store)
            .await
            .unwrap();

        let placeholder = controller.submit("Hello").await.unwrap();

        assert_eq!(controller.conversation().len(), 2);
        let last = controller.conversation().last().unwrap();
        assert_eq!(last.id(), placeholder);
        assert_eq!(last.content(), EXCHANGE_ERROR_REPLY);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_reset_rotates_even_when_delete_fails() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        let mut controller = SessionController::initialize(unreachable_client(), store.clone())
            .await
            .unwrap();
        controller.submit("Hello").await.unwrap();
        let old_token = controller.token().clone();

        let handle = controller.reset().unwrap();

        // New session stands immediately
        assert_ne!(controller.token(), &old_token);
        assert!(controller.conversation().is_empty());
        assert_eq!(store.load().unwrap().as_ref(), Some(controller.token()));

        // Deletion failure only leaves a notice behind
        handle.await.unwrap();
        assert!(!controller.is_resetting());
        assert_eq!(controller.take_notice().as_deref(), Some(RESET_ERROR_NOTICE));
        // Notice is transient
        assert!(controller.take_notice().is_none());
    }

    #[tokio::test]
    async fn test_consecutive_resets_yield_distinct_tokens() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        let mut controller = SessionController::initialize(unreachable_client(), store)
            .await
            .unwrap();

        let first = controller.token().clone();
        controller.reset().unwrap().await.unwrap();
        let second = controller.token().clone();
        controller.reset().unwrap().await.unwrap();
        let third = controller.token().clone();

        assert_ne!(first, second);
        assert_ne!(second, third);
    }
}
