//! Route guarding. `decide` is the single access rule, re-evaluated on every
//! navigation; the public-route allowlist is a separate predicate used by
//! flows that need to tell auth-free pages from protected ones.

use crate::features::auth::state::{use_auth, Session};
use crate::features::auth::types::Role;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

/// Pages reachable without a session. A path matches when it equals or is
/// prefixed by an entry.
pub const PUBLIC_ROUTES: [&str; 7] = [
    paths::SIGNIN,
    paths::SIGNUP,
    paths::VERIFICATION_PENDING,
    paths::SIGNUP_SUCCESS,
    paths::CODE_VERIFICATION,
    paths::VERIFY_EMAIL,
    paths::HOME,
];

pub fn is_public(path: &str) -> bool {
    PUBLIC_ROUTES
        .iter()
        .any(|route| path == *route || path.starts_with(route))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(&'static str),
}

/// Access decision for a protected page. Unauthenticated sessions go to
/// sign-in; a role mismatch goes to the landing page.
pub fn decide(path: &str, session: &Session, required_role: Option<Role>) -> Access {
    let access = if !session.is_authenticated {
        Access::Redirect(paths::SIGNIN)
    } else if required_role.is_some() && session.role != required_role {
        Access::Redirect(paths::HOME)
    } else {
        Access::Allow
    };
    log::debug!("route guard: {path} -> {access:?}");
    access
}

#[component]
pub fn RequireAuth(children: Children) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    Effect::new(move |_| {
        let session = auth.session.get();
        // UX-only guard; real access control must live on the API.
        if let Access::Redirect(target) = decide(&location.pathname.get(), &session, None) {
            navigate(target, Default::default());
        }
    });

    view! { {children()} }
}

#[component]
pub fn RequireRole(role: Role, children: Children) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    Effect::new(move |_| {
        let session = auth.session.get();
        if let Access::Redirect(target) = decide(&location.pathname.get(), &session, Some(role)) {
            navigate(target, Default::default());
        }
    });

    view! { {children()} }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::types::User;

    fn authenticated(role: Role) -> Session {
        Session {
            is_authenticated: true,
            role: Some(role),
            user: Some(User {
                id: 1,
                email: "a@x.com".to_string(),
                first_name: None,
                last_name: None,
                role,
            }),
            auth_token: Some("jwt".to_string()),
            csrf_token: None,
        }
    }

    #[test]
    fn unauthenticated_always_redirects_to_signin() {
        let session = Session::default();
        for path in ["/dashboard", "/admin-dashboard", "/audits/4", "/anything"] {
            assert_eq!(
                decide(path, &session, None),
                Access::Redirect(paths::SIGNIN)
            );
            assert_eq!(
                decide(path, &session, Some(Role::Admin)),
                Access::Redirect(paths::SIGNIN)
            );
        }
    }

    #[test]
    fn role_mismatch_redirects_to_home() {
        let session = authenticated(Role::Operator);
        assert_eq!(
            decide("/admin-dashboard", &session, Some(Role::Admin)),
            Access::Redirect(paths::HOME)
        );
    }

    #[test]
    fn matching_role_and_plain_auth_are_allowed() {
        let session = authenticated(Role::Admin);
        assert_eq!(decide("/admin-dashboard", &session, Some(Role::Admin)), Access::Allow);
        assert_eq!(decide("/dashboard", &session, None), Access::Allow);
    }

    #[test]
    fn allowlist_matches_exact_and_prefixed_paths() {
        assert!(is_public("/signin"));
        assert!(is_public("/signup-success"));
        assert!(is_public("/verification-pending"));
        assert!(is_public("/verification/abc123"));
        // "/" prefixes every path, making the allowlist permissive by design.
        assert!(is_public("/dashboard"));
    }
}
