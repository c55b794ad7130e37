use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

use crate::storage::KvBackend;
use crate::tprintln;

use super::principal::Identity;
use super::role::Role;
use super::AuthError;

/// Storage key holding the serialized identity.
pub const SESSION_KEY: &str = "user";

/// The single operator session of a running dashboard host.
///
/// The in-memory value is authoritative for readers; the backend only makes it
/// survive restarts. The store trusts whatever identity it is handed.
pub struct SessionStore {
    backend: Arc<dyn KvBackend>,
    current: RwLock<Option<Identity>>,
    loaded: Mutex<bool>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend, current: RwLock::new(None), loaded: Mutex::new(false) }
    }

    /// Restore the persisted session. Only the first call touches storage; later
    /// calls return the current in-memory session.
    pub fn load(&self) -> Option<Identity> {
        let mut loaded = self.loaded.lock();
        if *loaded { return self.current(); }
        *loaded = true;
        let restored = match self.restore() {
            Ok(v) => v,
            Err(e) => {
                warn!(target: "session", "session.load failed, continuing unauthenticated: {}", e);
                // a record that cannot be restored is destroyed
                if let Err(e) = self.backend.delete(SESSION_KEY) {
                    warn!(target: "session", "session.load could not discard stored record: {:#}", e);
                }
                None
            }
        };
        match &restored {
            Some(id) => info!(target: "session", user = %id.email, role = %id.role, "session.load restored"),
            None => info!(target: "session", "session.load no stored session"),
        }
        *self.current.write() = restored.clone();
        restored
    }

    fn restore(&self) -> Result<Option<Identity>, AuthError> {
        let raw = self.backend
            .get(SESSION_KEY)
            .map_err(|e| AuthError::StorageUnavailable(format!("{:#}", e)))?;
        let Some(raw) = raw else { return Ok(None); };
        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;
        // Surface a foreign role name as such instead of a generic parse error
        if let Some(r) = value.get("role").and_then(|v| v.as_str()) {
            r.parse::<Role>()?;
        }
        let identity = serde_json::from_value(value).map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;
        Ok(Some(identity))
    }

    /// Persist the full identity and make it the current session.
    pub fn save(&self, identity: Identity) {
        match serde_json::to_string(&identity) {
            Ok(json) => {
                if let Err(e) = self.backend.set(SESSION_KEY, &json) {
                    warn!(target: "session", "session.save not persisted: {:#}", e);
                }
            }
            Err(e) => warn!(target: "session", "session.save could not serialize identity: {}", e),
        }
        tprintln!("session.save user={} role={}", identity.email, identity.role);
        *self.current.write() = Some(identity);
    }

    /// Remove the persisted identity and end the current session.
    pub fn clear(&self) {
        if let Err(e) = self.backend.delete(SESSION_KEY) {
            warn!(target: "session", "session.clear storage delete failed: {:#}", e);
        }
        let prev = self.current.write().take();
        if let Some(p) = prev { tprintln!("session.clear user={}", p.email); }
    }

    pub fn current(&self) -> Option<Identity> { self.current.read().clone() }
    pub fn role(&self) -> Option<Role> { self.current.read().as_ref().map(|i| i.role) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKv;

    fn teacher() -> Identity {
        Identity { id: 2, name: "Teacher User".into(), email: "teacher@example.com".into(), role: Role::Teacher }
    }

    #[test]
    fn save_then_fresh_load_round_trips() {
        let kv = Arc::new(MemoryKv::new());
        let store = SessionStore::new(kv.clone());
        assert_eq!(store.load(), None);
        store.save(teacher());
        assert_eq!(store.current(), Some(teacher()));

        let restarted = SessionStore::new(kv);
        assert_eq!(restarted.load(), Some(teacher()));
        assert_eq!(restarted.role(), Some(Role::Teacher));
    }

    #[test]
    fn load_reads_storage_only_once() {
        let kv = Arc::new(MemoryKv::new());
        let store = SessionStore::new(kv.clone());
        assert_eq!(store.load(), None);
        kv.set(SESSION_KEY, &serde_json::to_string(&teacher()).unwrap()).unwrap();
        assert_eq!(store.load(), None);
        assert_eq!(store.current(), None);
    }

    #[test]
    fn clear_removes_persisted_identity() {
        let kv = Arc::new(MemoryKv::new());
        let store = SessionStore::new(kv.clone());
        store.save(teacher());
        store.clear();
        assert_eq!(store.current(), None);
        assert_eq!(kv.get(SESSION_KEY).unwrap(), None);
        assert_eq!(SessionStore::new(kv).load(), None);
    }

    #[test]
    fn unknown_role_in_storage_degrades_to_no_session() {
        let kv = Arc::new(MemoryKv::new());
        kv.set(SESSION_KEY, r#"{"id":7,"name":"P","email":"p@example.com","role":"principal"}"#).unwrap();
        let store = SessionStore::new(kv.clone());
        assert_eq!(store.load(), None);
        assert_eq!(kv.get(SESSION_KEY).unwrap(), None, "bad record should be discarded");
    }

    #[test]
    fn partial_identity_is_never_restored() {
        let kv = Arc::new(MemoryKv::new());
        kv.set(SESSION_KEY, r#"{"id":1,"role":"admin"}"#).unwrap();
        let store = SessionStore::new(kv);
        assert_eq!(store.load(), None);
        assert_eq!(store.role(), None);
    }
}
