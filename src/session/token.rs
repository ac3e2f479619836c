//! Session token type.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Opaque identifier scoping a conversation on the remote service and in
/// local storage.
///
/// Freshly generated tokens are RFC-4122 v4 UUIDs in hyphenated form
/// (`xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`), unique with overwhelming
/// probability; collisions are not otherwise guarded against. Tokens
/// restored from storage are treated as opaque and passed through
/// unchanged, so parsing only rejects shapes that could not survive the
/// round trip (empty, or containing whitespace).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a new random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionToken {
    type Err = crate::error::ChatlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(crate::error::ChatlineError::InvalidToken(s.into()));
        }
        Ok(Self(s.to_string()))
    }
}
