//! # chatline
//!
//! Lightweight terminal chat client with durable session identity.
//!
//! This crate talks to a session-scoped assistant service and keeps the
//! conversation identity stable across process restarts. The core is a
//! small state machine: each submission optimistically appends the user
//! message together with a pending assistant placeholder, then resolves
//! or fails that placeholder in place once the service replies.
//!
//! ## Features
//!
//! - **Durable sessions**: the session token is persisted locally and
//!   restored (with server-side history) on the next start
//! - **Optimistic exchanges**: user turn and placeholder appear atomically,
//!   reconciled by message ID when the reply arrives
//! - **Graceful failure**: lost history means an empty conversation, a
//!   failed exchange means a visible error reply, never a crash
//! - **Lightweight**: minimal dependencies, small binary size
//!
//! ## Quick Start
//!
//! ```no_run
//! use chatline::{ApiClient, SessionController, TokenStore};
//!
//! #[tokio::main]
//! async fn main() -> chatline::Result<()> {
//!     // Initialize logging
//!     chatline::logging::try_init().ok();
//!
//!     // Restore (or create) a session against the local service
//!     let client = ApiClient::new("http://localhost:8000")?;
//!     let store = TokenStore::default_location()?;
//!     let mut chat = SessionController::initialize(client, store).await?;
//!
//!     // Run one exchange
//!     chat.submit("What's in the news today?").await;
//!     for message in chat.messages() {
//!         println!("{}: {}", message.role(), message.content());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;

// Re-export commonly used types
pub use chat::{
    Conversation, ExchangeEngine, Message, MessageId, PendingExchange, Role, EXCHANGE_ERROR_REPLY,
};
pub use client::ApiClient;
pub use config::Config;
pub use error::{ChatlineError, Result};
pub use session::{SessionController, SessionToken, TokenStore, RESET_ERROR_NOTICE};
