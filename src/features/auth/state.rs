//! Session state and context. The provider rehydrates the session once from
//! the durable store on mount; the context holds the only store reference, so
//! every session mutation persists and updates the in-memory signal in one
//! place. Guards read the signal on every navigation.

use crate::features::auth::store::SessionStore;
use crate::features::auth::types::{Role, User};
use leptos::prelude::*;

/// The client's belief about the current authenticated user.
///
/// Sessions built by `login` satisfy: authenticated implies both a user and a
/// role are present. Restored sessions relax the user part when the persisted
/// record is malformed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub is_authenticated: bool,
    pub role: Option<Role>,
    pub user: Option<User>,
    pub auth_token: Option<String>,
    pub csrf_token: Option<String>,
}

/// Rebuilds a session from persisted keys. Never fails: a missing or invalid
/// flag/role yields the empty session, and a malformed user record degrades
/// to `user: None` while the remaining fields still restore.
pub fn restore_session(store: &SessionStore) -> Session {
    let mut session = Session::default();

    if !store.is_authenticated_flag() {
        return session;
    }
    let Some(role) = store.user_role().as_deref().and_then(Role::parse) else {
        return session;
    };

    session.is_authenticated = true;
    session.role = Some(role);
    session.user = store
        .user_json()
        .and_then(|json| serde_json::from_str(&json).ok());
    session.auth_token = store.token();
    session.csrf_token = store.csrf_token();
    session
}

/// Persists the login record for `user`.
pub fn persist_login(store: &SessionStore, user: &User) {
    let user_json = serde_json::to_string(user).unwrap_or_else(|_| "null".to_string());
    store.set_authenticated(user.role.as_str(), &user.email, &user_json);
}

/// Clears every persisted auth key. Idempotent.
pub fn clear_session(store: &SessionStore) {
    store.clear_auth();
}

#[derive(Clone)]
/// Auth session context shared through Leptos. The store sits behind a
/// local-storage arena handle: both backends hold browser or `Rc` state, and
/// the context itself must stay `Send + Sync` for `provide_context`.
pub struct AuthContext {
    store: StoredValue<SessionStore, LocalStorage>,
    pub session: RwSignal<Session>,
    pub is_authenticated: Signal<bool>,
}

impl AuthContext {
    fn new(store: SessionStore) -> Self {
        let session = RwSignal::new(Session::default());
        let is_authenticated = Signal::derive(move || session.get().is_authenticated);
        Self {
            store: StoredValue::new_local(store),
            session,
            is_authenticated,
        }
    }

    /// A handle to the session store this context owns. Both backends are
    /// cheap to clone and share their underlying state; all session mutations
    /// still go through the context.
    pub fn store(&self) -> SessionStore {
        self.store.get_value()
    }

    /// Marks the session authenticated and persists it. Guards observe the
    /// new state synchronously.
    pub fn login(&self, user: User) {
        let store = self.store.get_value();
        persist_login(&store, &user);
        let auth_token = store.token();
        self.session.update(|session| {
            session.is_authenticated = true;
            session.role = Some(user.role);
            session.user = Some(user);
            session.auth_token = auth_token;
        });
    }

    /// Clears the session in memory and in the store. Idempotent.
    pub fn logout(&self) {
        self.store.with_value(clear_session);
        self.session.set(Session::default());
    }

    /// Stores a CSRF token in memory and in the durable store.
    pub fn set_csrf(&self, token: String) {
        self.store.with_value(|store| store.set_csrf_token(&token));
        self.session.update(|session| session.csrf_token = Some(token));
    }
}

/// Provides auth context and rehydrates the session once on mount.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext::new(SessionStore::browser());
    auth.session.set(restore_session(&auth.store()));
    provide_context(auth);

    view! { {children()} }
}

/// Returns the current auth context or a fallback empty context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| AuthContext::new(SessionStore::in_memory()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            email: "a@x.com".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            role: Role::Operator,
        }
    }

    #[test]
    fn login_then_logout_restores_the_empty_session() {
        let store = SessionStore::in_memory();
        persist_login(&store, &sample_user());
        clear_session(&store);

        assert_eq!(restore_session(&store), Session::default());
    }

    #[test]
    fn restore_reproduces_a_persisted_login() {
        let store = SessionStore::in_memory();
        let user = sample_user();
        persist_login(&store, &user);
        store.set_token("jwt-token");

        let session = restore_session(&store);
        assert!(session.is_authenticated);
        assert_eq!(session.role, Some(Role::Operator));
        assert_eq!(session.user, Some(user));
        assert_eq!(session.auth_token.as_deref(), Some("jwt-token"));
    }

    #[test]
    fn restore_tolerates_a_malformed_user_record() {
        let store = SessionStore::in_memory();
        store.set_authenticated("operator", "a@x.com", "{not json");

        let session = restore_session(&store);
        assert!(session.is_authenticated);
        assert_eq!(session.role, Some(Role::Operator));
        assert_eq!(session.user, None);
    }

    #[test]
    fn restore_rejects_an_unknown_role() {
        let store = SessionStore::in_memory();
        store.set_authenticated("superuser", "a@x.com", "{}");

        assert_eq!(restore_session(&store), Session::default());
    }

    #[test]
    fn restore_without_flag_is_empty() {
        let store = SessionStore::in_memory();
        store.set_token("stale-token");

        assert_eq!(restore_session(&store), Session::default());
    }

    #[test]
    fn context_can_be_provided_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthContext>();
    }

    #[test]
    fn clear_session_twice_is_fine() {
        let store = SessionStore::in_memory();
        clear_session(&store);
        clear_session(&store);
        assert_eq!(restore_session(&store), Session::default());
    }
}
