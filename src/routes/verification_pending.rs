//! Waiting room shown while the account email is unverified. The pending
//! email is read from the session store at mount; the one-shot
//! just-registered marker upgrades the copy to a congratulations banner.

use crate::components::{Alert, AlertKind, AppShell};
use crate::features::auth::state::use_auth;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn VerificationPendingPage() -> impl IntoView {
    let auth = use_auth();
    let store = auth.store();
    let pending_email = store.pending_email();
    let just_registered = store.take_just_registered();

    view! {
        <AppShell>
            <div class="max-w-md mx-auto mt-16 flex flex-col gap-4">
                {just_registered
                    .then(|| {
                        view! {
                            <Alert
                                kind=AlertKind::Success
                                message="Congratulations, your account has been created.".to_string()
                            />
                        }
                    })}
                <h1 class="text-2xl font-semibold">"Check your inbox"</h1>
                {match pending_email {
                    Some(email) => view! {
                        <p class="text-slate-500">
                            "We sent a verification link to " <strong>{email}</strong>
                            ". Open it to activate your account."
                        </p>
                    }
                    .into_any(),
                    None => view! {
                        <p class="text-slate-500">
                            "We sent a verification link to your email address. Open it to activate your account."
                        </p>
                    }
                    .into_any(),
                }}
                <p class="text-sm text-slate-500">
                    "Already verified? "
                    <A href={paths::SIGNIN} {..} class="text-blue-700 hover:underline">
                        "Sign in"
                    </A>
                </p>
            </div>
        </AppShell>
    }
}
