//! Email-verification landing page, reached from the link in the signup
//! email. Verifies the `:token` path segment against the server exactly once
//! and reports the outcome; both outcomes lead back to sign-in.

use crate::components::{Alert, AlertKind, AppShell, Spinner};
use crate::features::auth::client;
use crate::features::auth::state::use_auth;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let auth = use_auth();
    let params = use_params_map();

    let auth_for_action = auth.clone();
    let verify_action = Action::new_local(move |token: &String| {
        let token = token.clone();
        let auth = auth_for_action.clone();
        async move { client::verify_email(&auth.store(), &token).await }
    });

    let dispatched = StoredValue::new(false);
    Effect::new(move |_| {
        let token = params.with(|map| map.get("token").unwrap_or_default());
        if !token.is_empty() && !dispatched.get_value() {
            dispatched.set_value(true);
            verify_action.dispatch(token);
        }
    });

    view! {
        <AppShell>
            <div class="max-w-md mx-auto mt-16 flex flex-col gap-4">
                <h1 class="text-2xl font-semibold">"Email verification"</h1>
                {move || {
                    if verify_action.pending().get() {
                        return view! {
                            <div class="flex items-center gap-3">
                                <Spinner />
                                <span class="text-slate-500">"Verifying your email address"</span>
                            </div>
                        }
                        .into_any();
                    }
                    match verify_action.value().get() {
                        Some(Ok(response)) => {
                            let message = response
                                .message
                                .unwrap_or_else(|| "Your email address is verified.".to_string());
                            view! {
                                <Alert kind=AlertKind::Success message=message />
                                <p class="text-sm text-slate-500">
                                    "You can now "
                                    <A href={paths::SIGNIN} {..} class="text-blue-700 hover:underline">
                                        "sign in"
                                    </A> "."
                                </p>
                            }
                            .into_any()
                        }
                        Some(Err(err)) => view! {
                            <Alert kind=AlertKind::Error message=err.to_string() />
                            <p class="text-sm text-slate-500">
                                "The link may have expired. "
                                <A href={paths::SIGNIN} {..} class="text-blue-700 hover:underline">
                                    "Back to sign-in"
                                </A>
                            </p>
                        }
                        .into_any(),
                        None => view! {
                            <p class="text-slate-500">"Waiting for the verification token."</p>
                        }
                        .into_any(),
                    }
                }}
            </div>
        </AppShell>
    }
}
