//! Sign-in route. A successful response logs the session in and follows the
//! server-specified landing page. The distinguished `approval_code_required`
//! rejection parks the account email in the session store and routes into
//! the code-verification screen instead of failing the login.

use crate::app_lib::ApiError;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::state::use_auth;
use crate::features::auth::types::{Role, SigninRequest};
use crate::features::auth::client;
use crate::routes::paths;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

#[derive(Clone)]
struct SigninInput {
    email: String,
    password: String,
}

/// Email to carry into the code-verification sub-flow. Only an
/// approval-required rejection that names the account enters the sub-flow;
/// without an email the code screen would have nothing to verify.
fn approval_email(err: &ApiError) -> Option<&str> {
    match err {
        ApiError::AuthRequired {
            email: Some(email), ..
        } => Some(email),
        _ => None,
    }
}

fn landing_page(redirect_url: Option<&str>, role: Role) -> String {
    match redirect_url {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => match role {
            Role::Admin => paths::ADMIN_DASHBOARD.to_string(),
            Role::Operator => paths::DASHBOARD.to_string(),
        },
    }
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<ApiError>>(None);

    let auth_for_action = auth.clone();
    let signin_action = Action::new_local(move |input: &SigninInput| {
        let input = input.clone();
        let auth = auth_for_action.clone();
        async move {
            let request = SigninRequest {
                email: input.email,
                password: input.password,
            };
            client::signin(&auth.store(), &request).await
        }
    });

    let auth_for_result = auth.clone();
    Effect::new(move |_| {
        if let Some(result) = signin_action.value().get() {
            match result {
                Ok(response) => {
                    let role = response.user.role;
                    auth_for_result.login(response.user);
                    let target = landing_page(response.redirect_url.as_deref(), role);
                    navigate(&target, Default::default());
                }
                Err(err) => {
                    if let Some(email) = approval_email(&err) {
                        // Hand the email to the code screen through the
                        // store, not a timed read-back.
                        auth_for_result.store().set_pending_email(email);
                        navigate(paths::CODE_VERIFICATION, Default::default());
                    } else {
                        set_error.set(Some(err));
                    }
                }
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.trim().is_empty() {
            set_error.set(Some(ApiError::Config(
                "Email and password are required.".to_string(),
            )));
            return;
        }

        signin_action.dispatch(SigninInput {
            email: email_value,
            password: password_value,
        });
    };

    view! {
        <AppShell>
            <form class="max-w-sm mx-auto mt-10" on:submit=on_submit>
                <h1 class="text-2xl font-semibold mb-6">"Sign in"</h1>
                <div class="mb-5">
                    <label class="block mb-2 text-sm font-medium" for="email">
                        "Email"
                    </label>
                    <input
                        id="email"
                        type="email"
                        class="bg-slate-50 border border-slate-300 text-sm rounded-lg block w-full p-2.5"
                        autocomplete="email"
                        required
                        on:input=move |event| set_email.set(event_target_value(&event))
                    />
                </div>
                <div class="mb-5">
                    <label class="block mb-2 text-sm font-medium" for="password">
                        "Password"
                    </label>
                    <input
                        id="password"
                        type="password"
                        class="bg-slate-50 border border-slate-300 text-sm rounded-lg block w-full p-2.5"
                        autocomplete="current-password"
                        required
                        on:input=move |event| set_password.set(event_target_value(&event))
                    />
                </div>
                <Button button_type="submit" disabled=signin_action.pending()>
                    "Sign in"
                </Button>
                {move || {
                    signin_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="mt-4"><Spinner /></div> })
                }}
                {move || {
                    error
                        .get()
                        .map(|err| {
                            let message = err
                                .server_message()
                                .map(str::to_string)
                                .unwrap_or_else(|| err.to_string());
                            view! {
                                <div class="mt-4">
                                    <Alert kind=AlertKind::Error message=message />
                                </div>
                            }
                        })
                }}
                <p class="mt-6 text-sm text-slate-500">
                    "No account yet? "
                    <A href={paths::SIGNUP} {..} class="text-blue-700 hover:underline">
                        "Create one"
                    </A>
                </p>
            </form>
        </AppShell>
    }
}

#[cfg(test)]
mod tests {
    use super::{approval_email, landing_page};
    use crate::app_lib::ApiError;
    use crate::features::auth::types::Role;
    use crate::routes::paths;

    #[test]
    fn approval_rejection_without_an_email_stays_on_the_form() {
        let named = ApiError::AuthRequired {
            reason: "approval_code_required".to_string(),
            email: Some("op@x.com".to_string()),
        };
        assert_eq!(approval_email(&named), Some("op@x.com"));

        let anonymous = ApiError::AuthRequired {
            reason: "approval_code_required".to_string(),
            email: None,
        };
        assert_eq!(approval_email(&anonymous), None);

        let other = ApiError::Http {
            status: 401,
            message: "Identifiants invalides".to_string(),
        };
        assert_eq!(approval_email(&other), None);
    }

    #[test]
    fn server_redirect_wins_over_role_default() {
        assert_eq!(landing_page(Some("/audits/3"), Role::Operator), "/audits/3");
    }

    #[test]
    fn missing_or_blank_redirect_falls_back_by_role() {
        assert_eq!(landing_page(None, Role::Operator), paths::DASHBOARD);
        assert_eq!(landing_page(Some("  "), Role::Admin), paths::ADMIN_DASHBOARD);
    }
}
