//! Session token storage.
//!
//! The browser console kept its bearer token in local storage under a
//! single key. [`SessionStore`] is that contract as a trait: one opaque
//! token, readable before every call, replaced on login, destroyed on
//! logout or auth rejection. Absence of a token means unauthenticated.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};

/// Storage for the single session bearer token.
///
/// Implementations must uphold: at most one token value at a time, and
/// `get` returning `None` exactly when the session is unauthenticated.
pub trait SessionStore: Send + Sync {
    /// Read the current token, if any.
    fn get(&self) -> Option<SecretString>;

    /// Replace the token with a new value.
    fn set(&self, token: SecretString);

    /// Destroy the token. Idempotent.
    fn clear(&self);
}

/// In-memory session store.
///
/// The default store; also what tests inject.
#[derive(Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<SecretString>>,
}

impl MemorySessionStore {
    /// Create an empty (unauthenticated) store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token.
    #[must_use]
    pub fn with_token(token: SecretString) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<SecretString> {
        self.token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: SecretString) {
        *self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(token);
    }

    fn clear(&self) {
        *self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
    }
}

/// File-backed session store.
///
/// The CLI's local-storage analog: the token lives in a single file so a
/// login survives across invocations. Read failures are treated as "no
/// session" rather than surfaced; a corrupt or missing token file just
/// means the user logs in again.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store persisting the token at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file the token is persisted at.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_token(&self, token: &SecretString) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token.expose_secret())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<SecretString> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            return None;
        }
        Some(SecretString::from(token.to_owned()))
    }

    fn set(&self, token: SecretString) {
        if let Err(e) = self.write_token(&token) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist session token");
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove session token");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemorySessionStore::new();
        assert!(store.get().is_none());

        store.set(SecretString::from("tok-1"));
        assert_eq!(store.get().unwrap().expose_secret(), "tok-1");

        store.set(SecretString::from("tok-2"));
        assert_eq!(store.get().unwrap().expose_secret(), "tok-2");

        store.clear();
        assert!(store.get().is_none());
        // clear is idempotent
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("token"));

        assert!(store.get().is_none());
        store.set(SecretString::from("abc123"));
        assert_eq!(store.get().unwrap().expose_secret(), "abc123");

        // A second store at the same path sees the persisted token.
        let other = FileSessionStore::new(dir.path().join("token"));
        assert_eq!(other.get().unwrap().expose_secret(), "abc123");

        store.clear();
        assert!(store.get().is_none());
        assert!(other.get().is_none());
    }

    #[test]
    fn test_file_store_ignores_blank_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.get().is_none());
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/deeper/token"));
        store.set(SecretString::from("tok"));
        assert_eq!(store.get().unwrap().expose_secret(), "tok");
    }
}
