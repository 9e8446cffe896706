//! Public landing page. Authenticated users are pointed at their dashboard;
//! everyone else gets the sign-in and sign-up entries.

use crate::components::AppShell;
use crate::features::auth::state::use_auth;
use crate::features::auth::types::Role;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <AppShell>
            <div class="min-h-[60vh] flex flex-col items-center justify-center text-center gap-4">
                <h1 class="text-3xl font-semibold">"AuditDesk"</h1>
                <p class="text-slate-500 max-w-md">
                    "Plan, execute, and track inspection audits across your lines."
                </p>
                {move || {
                    let session = auth.session.get();
                    if session.is_authenticated {
                        let target = if session.role == Some(Role::Admin) {
                            paths::ADMIN_DASHBOARD
                        } else {
                            paths::DASHBOARD
                        };
                        view! {
                            <A href={target} {..} class="text-blue-700 hover:underline">
                                "Go to your dashboard"
                            </A>
                        }
                        .into_any()
                    } else {
                        view! {
                            <div class="flex gap-6">
                                <A href={paths::SIGNIN} {..} class="text-blue-700 hover:underline">
                                    "Sign in"
                                </A>
                                <A href={paths::SIGNUP} {..} class="text-blue-700 hover:underline">
                                    "Create an account"
                                </A>
                            </div>
                        }
                        .into_any()
                    }
                }}
            </div>
        </AppShell>
    }
}
