//! Durable session store. All persisted auth state goes through this one
//! injectable wrapper instead of ad hoc storage lookups scattered across
//! views. The browser backend wraps `localStorage`; the in-memory backend
//! backs tests and the context fallback. Storage failures degrade to no-ops.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

const KEY_IS_AUTHENTICATED: &str = "isAuthenticated";
const KEY_USER_ROLE: &str = "userRole";
const KEY_USER_EMAIL: &str = "userEmail";
const KEY_USER: &str = "user";
const KEY_TOKEN: &str = "token";
const KEY_CSRF_TOKEN: &str = "csrfToken";
const KEY_PENDING_EMAIL: &str = "pendingVerificationEmail";
const KEY_JUST_REGISTERED: &str = "justRegistered";

#[derive(Clone)]
pub struct SessionStore {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Browser(Option<web_sys::Storage>),
    Memory(Rc<RefCell<HashMap<String, String>>>),
}

impl SessionStore {
    /// Store backed by `window.localStorage`. Unavailable storage (private
    /// browsing, disabled cookies) degrades every operation to a no-op.
    pub fn browser() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        Self {
            backend: Backend::Browser(storage),
        }
    }

    /// Volatile store for tests and the context fallback.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Rc::new(RefCell::new(HashMap::new()))),
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        match &self.backend {
            Backend::Browser(storage) => storage.as_ref()?.get_item(key).ok().flatten(),
            Backend::Memory(map) => map.borrow().get(key).cloned(),
        }
    }

    fn set(&self, key: &str, value: &str) {
        match &self.backend {
            Backend::Browser(storage) => {
                if let Some(storage) = storage {
                    let _ = storage.set_item(key, value);
                }
            }
            Backend::Memory(map) => {
                map.borrow_mut().insert(key.to_string(), value.to_string());
            }
        }
    }

    fn remove(&self, key: &str) {
        match &self.backend {
            Backend::Browser(storage) => {
                if let Some(storage) = storage {
                    let _ = storage.remove_item(key);
                }
            }
            Backend::Memory(map) => {
                map.borrow_mut().remove(key);
            }
        }
    }

    pub fn is_authenticated_flag(&self) -> bool {
        self.get(KEY_IS_AUTHENTICATED).as_deref() == Some("true")
    }

    pub fn set_authenticated(&self, role: &str, email: &str, user_json: &str) {
        self.set(KEY_IS_AUTHENTICATED, "true");
        self.set(KEY_USER_ROLE, role);
        self.set(KEY_USER_EMAIL, email);
        self.set(KEY_USER, user_json);
    }

    pub fn user_role(&self) -> Option<String> {
        self.get(KEY_USER_ROLE)
    }

    pub fn user_email(&self) -> Option<String> {
        self.get(KEY_USER_EMAIL)
    }

    pub fn user_json(&self) -> Option<String> {
        self.get(KEY_USER)
    }

    pub fn token(&self) -> Option<String> {
        self.get(KEY_TOKEN)
    }

    pub fn set_token(&self, token: &str) {
        self.set(KEY_TOKEN, token);
    }

    pub fn csrf_token(&self) -> Option<String> {
        self.get(KEY_CSRF_TOKEN)
    }

    pub fn set_csrf_token(&self, token: &str) {
        self.set(KEY_CSRF_TOKEN, token);
    }

    pub fn pending_email(&self) -> Option<String> {
        self.get(KEY_PENDING_EMAIL)
    }

    pub fn set_pending_email(&self, email: &str) {
        self.set(KEY_PENDING_EMAIL, email);
    }

    pub fn clear_pending_email(&self) {
        self.remove(KEY_PENDING_EMAIL);
    }

    pub fn mark_just_registered(&self) {
        self.set(KEY_JUST_REGISTERED, "true");
    }

    /// Consumes the just-registered marker: returns whether it was set and
    /// removes it so a reload does not replay the congratulations banner.
    pub fn take_just_registered(&self) -> bool {
        let set = self.get(KEY_JUST_REGISTERED).as_deref() == Some("true");
        if set {
            self.remove(KEY_JUST_REGISTERED);
        }
        set
    }

    /// Removes every auth-related key. Idempotent: missing keys are fine.
    /// The pending-verification email survives so an interrupted signup can
    /// still finish code verification.
    pub fn clear_auth(&self) {
        self.remove(KEY_IS_AUTHENTICATED);
        self.remove(KEY_USER_ROLE);
        self.remove(KEY_USER_EMAIL);
        self.remove(KEY_USER);
        self.remove(KEY_TOKEN);
        self.remove(KEY_CSRF_TOKEN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn just_registered_is_consume_once() {
        let store = SessionStore::in_memory();
        assert!(!store.take_just_registered());

        store.mark_just_registered();
        assert!(store.take_just_registered());
        assert!(!store.take_just_registered());
    }

    #[test]
    fn clear_auth_is_idempotent_and_keeps_pending_email() {
        let store = SessionStore::in_memory();
        store.set_authenticated("operator", "a@x.com", "{}");
        store.set_token("jwt");
        store.set_csrf_token("csrf");
        store.set_pending_email("a@x.com");

        store.clear_auth();
        store.clear_auth();

        assert!(!store.is_authenticated_flag());
        assert_eq!(store.token(), None);
        assert_eq!(store.csrf_token(), None);
        assert_eq!(store.user_json(), None);
        assert_eq!(store.pending_email(), Some("a@x.com".to_string()));
    }

    #[test]
    fn pending_email_roundtrip() {
        let store = SessionStore::in_memory();
        assert_eq!(store.pending_email(), None);
        store.set_pending_email("b@x.com");
        assert_eq!(store.pending_email(), Some("b@x.com".to_string()));
        store.clear_pending_email();
        assert_eq!(store.pending_email(), None);
    }
}
