//! Bearer-token sources.
//!
//! # Design
//! The client never caches a token: `TokenProvider::token` is called for every
//! request, so a login or logout performed elsewhere is visible to the next
//! call. All providers share one storage key, `token`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Storage key under which the bearer token is persisted.
pub const AUTH_TOKEN_KEY: &str = "token";

/// Yields the bearer token to attach to a request, if any.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Always unauthenticated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// In-memory token shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }

    pub fn set(&self, token: impl Into<String>) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.into());
    }

    pub fn clear(&self) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

impl TokenProvider for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        let slot = self.inner.read().unwrap_or_else(|e| e.into_inner());
        slot.as_deref().and_then(non_blank)
    }
}

/// Token persisted as the file `<dir>/token`, re-read on every call.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(AUTH_TOKEN_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, token: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    /// Remove the stored token. Missing files are not an error.
    pub fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

impl TokenProvider for FileTokenStore {
    fn token(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => non_blank(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read auth token");
                None
            }
        }
    }
}

fn non_blank(token: &str) -> Option<String> {
    let trimmed = token.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_token_is_always_none() {
        assert_eq!(NoToken.token(), None);
    }

    #[test]
    fn memory_store_is_shared_between_clones() {
        let store = MemoryTokenStore::new();
        let clone = store.clone();
        assert_eq!(clone.token(), None);

        store.set("abc");
        assert_eq!(clone.token().as_deref(), Some("abc"));

        clone.clear();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn blank_token_counts_as_absent() {
        let store = MemoryTokenStore::with_token("   ");
        assert_eq!(store.token(), None);
    }

    #[test]
    fn file_store_rereads_on_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());
        assert_eq!(store.path().file_name().unwrap(), AUTH_TOKEN_KEY);
        assert_eq!(store.token(), None);

        store.store("first\n").unwrap();
        assert_eq!(store.token().as_deref(), Some("first"));

        std::fs::write(store.path(), "second").unwrap();
        assert_eq!(store.token().as_deref(), Some("second"));

        store.clear().unwrap();
        assert_eq!(store.token(), None);
        store.clear().unwrap();
    }
}
