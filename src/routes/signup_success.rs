//! Post-registration interstitial. Counts down for a few seconds and then
//! moves on to the verification-pending screen; a button skips the wait.

use crate::app_lib::poll::Poller;
use crate::components::{Alert, AlertKind, AppShell, Button};
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

const REDIRECT_SECONDS: u32 = 5;

#[component]
pub fn SignupSuccessPage() -> impl IntoView {
    let navigate = use_navigate();
    let (seconds, set_seconds) = signal(REDIRECT_SECONDS);

    // Parked in local storage: the timer handle is not Send, the cleanup
    // closure must be.
    let countdown = StoredValue::new_local(Poller::start(1_000, move || {
        set_seconds.update(|remaining| *remaining = remaining.saturating_sub(1));
    }));
    on_cleanup(move || countdown.update_value(Poller::stop));

    let navigate_on_zero = navigate.clone();
    Effect::new(move |_| {
        if seconds.get() == 0 {
            navigate_on_zero(paths::VERIFICATION_PENDING, Default::default());
        }
    });

    let on_continue = move |_| {
        navigate(paths::VERIFICATION_PENDING, Default::default());
    };

    view! {
        <AppShell>
            <div class="max-w-md mx-auto mt-16 text-center flex flex-col items-center gap-4">
                <h1 class="text-2xl font-semibold">"Account created"</h1>
                <Alert
                    kind=AlertKind::Info
                    message="We sent a confirmation email to your address.".to_string()
                />
                <p class="text-slate-500">
                    "You will be redirected in " {move || seconds.get()} " seconds."
                </p>
                <Button on:click=on_continue>
                    "Continue now"
                </Button>
            </div>
        </AppShell>
    }
}
