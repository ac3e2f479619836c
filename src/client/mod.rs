//! HTTP client for the remote assistant service.
//!
//! The service exposes three endpoints the client depends on:
//!
//! - `GET /history/{session_id}` — prior turns, oldest first
//! - `POST /chat` — one exchange, `{content, session_id}` in, `{content}` out
//! - `DELETE /session/{session_id}` — drop server-side conversation state
//!
//! Every call maps its failure into the matching taxonomy error
//! ([`HistoryUnavailable`](crate::ChatlineError::HistoryUnavailable),
//! [`ExchangeFailed`](crate::ChatlineError::ExchangeFailed),
//! [`ResetFailed`](crate::ChatlineError::ResetFailed)); callers decide how
//! to recover.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chat::{Message, Role};
use crate::error::ChatlineError;
use crate::session::SessionToken;
use crate::Result;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of a `POST /chat` request.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    content: &'a str,
    session_id: &'a str,
}

/// Body of a successful `POST /chat` response.
///
/// The service echoes the session ID alongside the reply; only the
/// content is consumed, unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    content: String,
}

/// One entry of a `GET /history/{session_id}` response.
///
/// History entries carry no message ID on the wire; local IDs are
/// assigned on restore.
#[derive(Debug, Deserialize)]
struct HistoryEntry {
    content: String,
    role: Role,
    timestamp: String,
}

/// Client for the remote assistant service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the service at `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    /// The configured service base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch prior conversation turns for a session, oldest first.
    ///
    /// Transport failures and non-success statuses both surface as
    /// [`ChatlineError::HistoryUnavailable`].
    pub async fn fetch_history(&self, token: &SessionToken) -> Result<Vec<Message>> {
        let url = format!("{}/history/{}", self.base_url, token);
        debug!(%url, "fetching history");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ChatlineError::HistoryUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChatlineError::HistoryUnavailable(format!(
                "status {}",
                response.status().as_u16()
            )));
        }

        let entries: Vec<HistoryEntry> = response
            .json()
            .await
            .map_err(|e| ChatlineError::HistoryUnavailable(e.to_string()))?;

        Ok(entries
            .into_iter()
            .map(|e| Message::restored(e.role, e.content, e.timestamp))
            .collect())
    }

    /// Send one user turn and return the assistant's reply content.
    ///
    /// Transport failures and non-success statuses both surface as
    /// [`ChatlineError::ExchangeFailed`].
    pub async fn send_chat(&self, token: &SessionToken, content: &str) -> Result<String> {
        let url = format!("{}/chat", self.base_url);
        let body = ChatRequest {
            content,
            session_id: token.as_str(),
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatlineError::ExchangeFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChatlineError::ExchangeFailed(format!(
                "status {}",
                response.status().as_u16()
            )));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| ChatlineError::ExchangeFailed(e.to_string()))?;

        Ok(reply.content)
    }

    /// Delete the server-side state for a session.
    ///
    /// Failures surface as [`ChatlineError::ResetFailed`]; callers treat
    /// them as non-fatal.
    pub async fn delete_session(&self, token: &SessionToken) -> Result<()> {
        let url = format!("{}/session/{}", self.base_url, token);
        debug!(%url, "deleting session");

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| ChatlineError::ResetFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChatlineError::ResetFailed(format!(
                "status {}",
                response.status().as_u16()
            )));
        }

        Ok(())
    }
}
