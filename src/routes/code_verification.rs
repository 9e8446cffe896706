//! Six-digit approval code screen. The account email comes from the session
//! store (set by signup or a rejected sign-in); arriving without one bounces
//! straight back to sign-in. A complete code submits after a short debounce,
//! and a wrong-code rejection wipes the slots for a fresh attempt.

use crate::app_lib::ApiError;
use crate::components::{Alert, AlertKind, AppShell, Spinner};
use crate::features::auth::client;
use crate::features::auth::code::{CodeAction, CodeEntry, CODE_LEN};
use crate::features::auth::state::use_auth;
use crate::features::auth::types::{Role, User, VerifyCodeRequest};
use crate::routes::paths;
use gloo_timers::callback::Timeout;
use leptos::html::Input;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

const SUBMIT_DEBOUNCE_MS: u32 = 300;

/// Exact payload the backend answers for a wrong code. Other 400s on this
/// endpoint (account not yet approved, missing fields) must keep the digits.
const INVALID_CODE_MESSAGE: &str = "Code invalide";

fn is_invalid_code(err: &ApiError) -> bool {
    matches!(
        err,
        ApiError::Http { status: 400, message } if message == INVALID_CODE_MESSAGE
    )
}

fn focus_slot(refs: &[NodeRef<Input>; CODE_LEN], index: usize) {
    if let Some(input) = refs[index].get_untracked() {
        let _ = input.focus();
    }
}

#[component]
pub fn CodeVerificationPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let email = auth.store().pending_email();
    let entry = RwSignal::new(CodeEntry::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let slot_refs: [NodeRef<Input>; CODE_LEN] = std::array::from_fn(|_| NodeRef::new());

    // No pending account to verify: nothing to do here.
    let missing_email = email.is_none();
    let navigate_away = navigate.clone();
    Effect::new(move |_| {
        if missing_email {
            navigate_away(paths::SIGNIN, Default::default());
        }
    });

    let auth_for_action = auth.clone();
    let verify_action = Action::new_local(move |request: &VerifyCodeRequest| {
        let request = request.clone();
        let auth = auth_for_action.clone();
        async move { client::verify_code(&auth.store(), &request).await }
    });

    let auth_for_result = auth.clone();
    Effect::new(move |_| {
        if let Some(result) = verify_action.value().get() {
            match result {
                Ok(response) => {
                    let store = auth_for_result.store();
                    store.set_token(&response.access);
                    store.clear_pending_email();
                    let role = response.role;
                    auth_for_result.login(User {
                        id: response.user_id,
                        email: response.email,
                        first_name: None,
                        last_name: None,
                        role,
                    });
                    let target = match response.redirect_url.as_deref() {
                        Some(url) if !url.trim().is_empty() => url.to_string(),
                        _ => match role {
                            Role::Admin => paths::ADMIN_DASHBOARD.to_string(),
                            Role::Operator => paths::DASHBOARD.to_string(),
                        },
                    };
                    navigate(&target, Default::default());
                }
                Err(err) if is_invalid_code(&err) => {
                    // Wrong code: wipe the slots and start over at the first.
                    set_error.set(Some(INVALID_CODE_MESSAGE.to_string()));
                    entry.update(CodeEntry::clear);
                    for node_ref in &slot_refs {
                        if let Some(input) = node_ref.get_untracked() {
                            input.set_value("");
                        }
                    }
                    focus_slot(&slot_refs, 0);
                }
                Err(err) => {
                    let message = err
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string());
                    set_error.set(Some(message));
                }
            }
        }
    });

    let email_for_submit = email.clone().unwrap_or_default();
    let on_slot_input = move |index: usize, value: String| {
        let action = entry
            .try_update(|entry| entry.set_slot(index, &value))
            .unwrap_or(CodeAction::None);

        // The model may have rejected or trimmed the input; the DOM input
        // keeps whatever was typed, so write the model's slot back.
        if let Some(input) = slot_refs[index].get_untracked() {
            input.set_value(entry.with_untracked(|entry| entry.slot(index).to_string()).as_str());
        }

        match action {
            CodeAction::None => {}
            CodeAction::Focus(next) => focus_slot(&slot_refs, next),
            CodeAction::Submit(code) => {
                set_error.set(None);
                let request = VerifyCodeRequest {
                    email: email_for_submit.clone(),
                    code,
                };
                Timeout::new(SUBMIT_DEBOUNCE_MS, move || {
                    verify_action.dispatch(request);
                })
                .forget();
            }
        }
    };

    let on_slot_keydown = move |index: usize, event: leptos::ev::KeyboardEvent| {
        if event.key() == "Backspace" {
            let target = entry.with_untracked(|entry| entry.backspace_target(index));
            if let Some(previous) = target {
                focus_slot(&slot_refs, previous);
            }
        }
    };

    view! {
        <AppShell>
            <div class="max-w-md mx-auto mt-16 flex flex-col gap-4">
                <h1 class="text-2xl font-semibold">"Enter your approval code"</h1>
                <p class="text-slate-500">
                    "We sent a six-digit code to "
                    <strong>{email.clone().unwrap_or_default()}</strong> "."
                </p>
                <div class="flex gap-2 justify-center">
                    {(0..CODE_LEN)
                        .map(|index| {
                            let on_input = on_slot_input.clone();
                            view! {
                                <input
                                    node_ref=slot_refs[index]
                                    type="text"
                                    inputmode="numeric"
                                    maxlength="1"
                                    class="w-12 h-14 text-center text-xl border border-slate-300 rounded-lg"
                                    disabled=move || verify_action.pending().get()
                                    on:input=move |event| {
                                        on_input(index, event_target_value(&event))
                                    }
                                    on:keydown=move |event| on_slot_keydown(index, event)
                                />
                            }
                        })
                        .collect_view()}
                </div>
                {move || {
                    verify_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="flex justify-center"><Spinner /></div> })
                }}
                {move || {
                    error
                        .get()
                        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
            </div>
        </AppShell>
    }
}

#[cfg(test)]
mod tests {
    use super::is_invalid_code;
    use crate::app_lib::errors::classify_response;
    use crate::app_lib::ApiError;

    #[test]
    fn only_the_wrong_code_payload_triggers_the_wipe() {
        let wrong_code = classify_response(400, r#"{"error":"Code invalide"}"#);
        assert!(is_invalid_code(&wrong_code));

        let not_approved = classify_response(
            400,
            r#"{"error":"Votre compte n'a pas encore été approuvé"}"#,
        );
        assert!(!is_invalid_code(&not_approved));

        let missing_fields = classify_response(400, r#"{"error":"Email et code sont requis"}"#);
        assert!(!is_invalid_code(&missing_fields));
    }

    #[test]
    fn transport_failures_never_trigger_the_wipe() {
        assert!(!is_invalid_code(&ApiError::Timeout(
            "Request timed out. Please try again.".to_string()
        )));
        assert!(!is_invalid_code(&ApiError::Http {
            status: 500,
            message: "Code invalide".to_string(),
        }));
    }
}
