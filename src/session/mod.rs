//! Session identity and lifecycle.
//!
//! This module provides the durable session token (generation, storage)
//! and the controller that bootstraps and resets a session.

mod controller;
mod store;
mod token;

pub use controller::{SessionController, RESET_ERROR_NOTICE};
pub use store::TokenStore;
pub use token::SessionToken;
