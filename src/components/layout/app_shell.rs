//! Shared layout wrapper with navigation and content container. Navigation is
//! client-side only; the backend enforces real access control.

use crate::app_lib::GIT_SHA;
use crate::features::auth::state::use_auth;
use crate::features::auth::types::Role;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

/// Wraps routes with a header and main content container.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let is_authenticated = auth.is_authenticated;
    let is_admin = Signal::derive(move || auth.session.get().role == Some(Role::Admin));

    let auth_for_logout = auth.clone();
    let on_logout = move |_| {
        auth_for_logout.logout();
        navigate(paths::SIGNIN, Default::default());
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-b border-slate-200 bg-white">
                <div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4">
                    <A href="/" {..} class="flex items-center space-x-3">
                        <span class="font-semibold whitespace-nowrap">"AuditDesk"</span>
                    </A>
                    <nav class="flex items-center gap-4 text-sm">
                        {move || {
                            is_authenticated
                                .get()
                                .then(|| {
                                    let target = if is_admin.get() {
                                        paths::ADMIN_DASHBOARD
                                    } else {
                                        paths::DASHBOARD
                                    };
                                    view! {
                                        <A href={target} {..} class="text-slate-600 hover:text-slate-900">
                                            "Dashboard"
                                        </A>
                                        <A href={paths::PROFILE} {..} class="text-slate-600 hover:text-slate-900">
                                            "Account"
                                        </A>
                                    }
                                })
                        }}
                        {
                            let on_logout = on_logout.clone();
                            move || {
                                let on_logout = on_logout.clone();
                                if is_authenticated.get() {
                                    view! {
                                        <button
                                            type="button"
                                            class="text-slate-600 hover:text-slate-900"
                                            on:click=on_logout
                                        >
                                            "Sign out"
                                        </button>
                                    }
                                    .into_any()
                                } else {
                                    view! {
                                        <A href={paths::SIGNIN} {..} class="text-slate-600 hover:text-slate-900">
                                            "Sign in"
                                        </A>
                                    }
                                    .into_any()
                                }
                            }
                        }
                    </nav>
                </div>
            </header>
            <main class="flex-1 max-w-screen-xl w-full mx-auto p-4">{children()}</main>
            <footer class="border-t border-slate-200 p-4 text-center text-xs text-slate-400">
                {format!("auditdesk-web {}", &GIT_SHA[..GIT_SHA.len().min(7)])}
            </footer>
        </div>
    }
}
