// ── Durable session backends ──
//
// `KeyValueStore` implementations that outlive the process: a JSON map in
// a per-profile file, and the OS credential store.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;
use yebomart_core::{KeyValueStore, StorageError};

/// Keyring service name; accounts are `<profile>/<key>`.
pub const KEYRING_SERVICE: &str = "yebomart";

// ── File ────────────────────────────────────────────────────────────

/// All keys for one profile in a single JSON object on disk.
///
/// Removing the last key deletes the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                StorageError::new(format!("corrupt session file {}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(self.io_error(&e)),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if map.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(self.io_error(&e)),
            };
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(&e))?;
        }
        let body = serde_json::to_string_pretty(map)
            .map_err(|e| StorageError::new(format!("failed to encode session: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        write_private(&tmp, body.as_bytes()).map_err(|e| self.io_error(&e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(&e))?;
        debug!(path = %self.path.display(), keys = map.len(), "session file written");
        Ok(())
    }

    fn io_error(&self, err: &std::io::Error) -> StorageError {
        StorageError::new(format!("{}: {err}", self.path.display()))
    }

    fn update(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        if f(&mut map) {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|map| {
            map.insert(key.to_owned(), value.to_owned());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|map| map.remove(key).is_some())
    }
}

/// Create `path` readable by the owner only; it holds a bearer token.
fn write_private(path: &Path, body: &[u8]) -> std::io::Result<()> {
    // A stale temp file would keep its old mode.
    if let Err(e) = std::fs::remove_file(path) {
        if e.kind() != ErrorKind::NotFound {
            return Err(e);
        }
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(body)?;
    file.sync_all()
}

// ── Keyring ─────────────────────────────────────────────────────────

/// OS credential store, one entry per key.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    profile: String,
}

impl KeyringStore {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
        }
    }

    fn account(&self, key: &str) -> String {
        format!("{}/{key}", self.profile)
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, StorageError> {
        keyring::Entry::new(KEYRING_SERVICE, &self.account(key)).map_err(keyring_error)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn keyring_error(err: keyring::Error) -> StorageError {
    StorageError::new(format!("keyring: {err}"))
}

impl KeyValueStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(keyring_error(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entry(key)?.set_password(value).map_err(keyring_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(keyring_error(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use secrecy::SecretString;
    use yebomart_core::{AdminUser, SessionStore};

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions").join("default.json");

        let store = FileStore::new(&path);
        assert_eq!(store.get("yebomart_admin_token").unwrap(), None);
        store.set("yebomart_admin_token", "abc").unwrap();
        store.set("yebomart_admin_user", "{}").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("yebomart_admin_token").unwrap().as_deref(),
            Some("abc")
        );

        reopened.remove("yebomart_admin_token").unwrap();
        reopened.remove("yebomart_admin_user").unwrap();
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private_to_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.json");
        // Leftover temp file from an interrupted write, world-readable.
        std::fs::write(path.with_extension("json.tmp"), "{}").unwrap();

        FileStore::new(&path)
            .set("yebomart_admin_token", "secret-token")
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "session file mode {mode:o}");
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::new(&path).get("yebomart_admin_token").unwrap_err();
        assert!(err.message.contains("corrupt session file"));
    }

    #[test]
    fn session_survives_restart_via_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.json");
        let user = AdminUser {
            id: "1".into(),
            email: "a@b.com".into(),
            name: "A".into(),
            role: "owner".into(),
        };

        let first = SessionStore::new(Arc::new(FileStore::new(&path)));
        first
            .establish(SecretString::from("abc".to_owned()), user.clone())
            .unwrap();

        let second = SessionStore::new(Arc::new(FileStore::new(&path)));
        assert_eq!(second.user().as_deref(), Some(&user));
        assert!(second.is_authenticated());

        second.clear().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn keyring_accounts_are_namespaced_by_profile() {
        let store = KeyringStore::new("staging");
        assert_eq!(store.account("yebomart_admin_token"), "staging/yebomart_admin_token");
    }
}
