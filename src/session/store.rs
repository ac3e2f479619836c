//! Durable session token storage.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::SessionToken;
use crate::error::ChatlineError;
use crate::Result;

/// File name holding the current session token.
const TOKEN_FILE: &str = "session";

/// File-backed storage for the single current session token.
///
/// The token survives process restarts but is local to the machine. The
/// store holds exactly one token; saving overwrites any prior value.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a store writing the token file inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_FILE),
        }
    }

    /// Create a store in the platform data directory (`<data_dir>/chatline`).
    pub fn default_location() -> Result<Self> {
        let dir = dirs::data_dir().ok_or_else(|| {
            ChatlineError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no platform data directory",
            ))
        })?;
        Ok(Self::new(dir.join("chatline")))
    }

    /// Path of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted token.
    ///
    /// Returns `Ok(None)` when no token has been persisted (missing or
    /// empty file); an existing token is returned unchanged apart from
    /// surrounding whitespace.
    pub fn load(&self) -> Result<Option<SessionToken>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let token = trimmed.parse()?;
        debug!(path = %self.path.display(), "restored session token");
        Ok(Some(token))
    }

    /// Persist the token, overwriting any prior value.
    pub fn save(&self, token: &SessionToken) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token.as_str())?;
        debug!(path = %self.path.display(), "persisted session token");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_returns_none() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path());

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        let token = SessionToken::generate();

        store.save(&token).unwrap();
        assert_eq!(store.load().unwrap(), Some(token));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path());

        let first = SessionToken::generate();
        let second = SessionToken::generate();
        store.save(&first).unwrap();
        store.save(&second).unwrap();

        assert_eq!(store.load().unwrap(), Some(second));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested/deeper"));
        let token = SessionToken::generate();

        store.save(&token).unwrap();
        assert_eq!(store.load().unwrap(), Some(token));
    }

    #[test]
    fn test_load_trims_whitespace() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path());

        std::fs::write(store.path(), "abc-1\n").unwrap();
        let token = store.load().unwrap().unwrap();
        assert_eq!(token.as_str(), "abc-1");
    }

    #[test]
    fn test_load_empty_file_returns_none() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path());

        std::fs::write(store.path(), "  \n").unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
