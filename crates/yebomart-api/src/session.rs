// ── Admin session persistence ──
//
// Bearer token and cached admin profile, each kept under its own fixed key
// in a durable key-value backend. Memory is authoritative once populated;
// durable storage is consulted only while the in-memory slot is empty.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::AdminUser;

/// Durable key holding the bearer token.
pub const TOKEN_KEY: &str = "yebomart_admin_token";
/// Durable key holding the JSON-encoded admin profile.
pub const USER_KEY: &str = "yebomart_admin_user";

/// Failure reported by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
#[error("session storage error: {message}")]
pub struct StorageError {
    pub message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Synchronous string key-value backend for session state.
///
/// Implemented in-memory here, and on disk / in the OS keyring by
/// `yebomart-config`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::new("memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Token and profile for the signed-in administrator.
///
/// The profile is only ever reported while a token is present: a cached
/// profile without a token reads as "signed out".
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    token: ArcSwapOption<SecretString>,
    user: ArcSwapOption<AdminUser>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            token: ArcSwapOption::empty(),
            user: ArcSwapOption::empty(),
        }
    }

    /// Session backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    // ── Token ───────────────────────────────────────────────────────

    /// Store the token in memory, then persist it.
    pub fn set_token(&self, token: SecretString) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token.expose_secret())?;
        self.token.store(Some(Arc::new(token)));
        Ok(())
    }

    /// Current token, hydrating from durable storage on first access.
    pub fn token(&self) -> Option<Arc<SecretString>> {
        if let Some(token) = self.token.load_full() {
            return Some(token);
        }

        match self.storage.get(TOKEN_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => {
                debug!("hydrated session token from storage");
                let token = Arc::new(SecretString::from(raw));
                self.token.store(Some(Arc::clone(&token)));
                Some(token)
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "failed to read session token");
                None
            }
        }
    }

    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.token.store(None);
        self.storage.remove(TOKEN_KEY)
    }

    // ── Profile ─────────────────────────────────────────────────────

    pub fn set_user(&self, user: AdminUser) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&user)
            .map_err(|e| StorageError::new(format!("failed to encode profile: {e}")))?;
        self.storage.set(USER_KEY, &encoded)?;
        self.user.store(Some(Arc::new(user)));
        Ok(())
    }

    /// Cached profile, or `None` when no token is held.
    ///
    /// A stored profile that is not valid JSON, or is one of the literal
    /// strings `"undefined"` / `"null"`, is purged and reported absent.
    pub fn user(&self) -> Option<Arc<AdminUser>> {
        self.token()?;

        if let Some(user) = self.user.load_full() {
            return Some(user);
        }

        let raw = match self.storage.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "failed to read cached profile");
                return None;
            }
        };

        let parsed = match raw.trim() {
            "" | "undefined" | "null" => None,
            text => serde_json::from_str::<AdminUser>(text).ok(),
        };

        if let Some(user) = parsed {
            let user = Arc::new(user);
            self.user.store(Some(Arc::clone(&user)));
            return Some(user);
        }

        warn!("discarding malformed cached profile");
        if let Err(e) = self.storage.remove(USER_KEY) {
            warn!(error = %e, "failed to purge cached profile");
        }
        None
    }

    /// Persist a freshly issued token together with its profile.
    pub fn establish(&self, token: SecretString, user: AdminUser) -> Result<(), StorageError> {
        self.set_token(token)?;
        self.set_user(user)
    }

    /// Forget both token and profile. Both removals are attempted even
    /// if the first fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.user.store(None);
        let token = self.clear_token();
        let user = self.storage.remove(USER_KEY);
        token.and(user)
    }

    /// `true` when both a token and a readable profile are present.
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn admin() -> AdminUser {
        AdminUser {
            id: "a1".into(),
            email: "ops@yebomart.com".into(),
            name: "Ops".into(),
            role: "SUPER_ADMIN".into(),
        }
    }

    #[test]
    fn profile_hidden_without_token() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .set(USER_KEY, &serde_json::to_string(&admin()).unwrap())
            .unwrap();

        let session = SessionStore::new(backend);
        assert!(session.user().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn hydrates_from_durable_storage() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(TOKEN_KEY, "tok-123").unwrap();
        backend
            .set(USER_KEY, &serde_json::to_string(&admin()).unwrap())
            .unwrap();

        let session = SessionStore::new(backend);
        assert_eq!(session.token().unwrap().expose_secret(), "tok-123");
        assert_eq!(session.user().unwrap().email, "ops@yebomart.com");
    }

    #[test]
    fn purges_placeholder_profiles() {
        for junk in ["undefined", "null", "{not json"] {
            let backend = Arc::new(MemoryStore::new());
            backend.set(TOKEN_KEY, "tok").unwrap();
            backend.set(USER_KEY, junk).unwrap();

            let session = SessionStore::new(Arc::clone(&backend) as Arc<dyn KeyValueStore>);
            assert!(session.user().is_none(), "{junk} should read as absent");
            assert!(backend.get(USER_KEY).unwrap().is_none(), "{junk} should be purged");
        }
    }

    #[test]
    fn clear_removes_both_keys() {
        let backend = Arc::new(MemoryStore::new());
        let session = SessionStore::new(Arc::clone(&backend) as Arc<dyn KeyValueStore>);
        session
            .establish(SecretString::from("tok".to_owned()), admin())
            .unwrap();
        assert!(session.is_authenticated());

        session.clear().unwrap();
        assert!(session.token().is_none());
        assert!(backend.get(TOKEN_KEY).unwrap().is_none());
        assert!(backend.get(USER_KEY).unwrap().is_none());
    }
}
