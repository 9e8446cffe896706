//! Account page: profile details and avatar upload. The avatar goes up as
//! multipart form data and the page swaps in the profile the server returns.

use crate::components::{Alert, AlertKind, AppShell, Spinner};
use crate::features::auth::guards::RequireAuth;
use crate::features::auth::state::use_auth;
use crate::features::me::client;
use crate::features::me::types::Profile;
use leptos::prelude::*;

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <RequireAuth>
            <ProfileContent />
        </RequireAuth>
    }
}

#[component]
fn ProfileContent() -> impl IntoView {
    let auth = use_auth();
    let profile = RwSignal::new(None::<Profile>);
    let (error, set_error) = signal::<Option<String>>(None);

    let auth_for_load = auth.clone();
    let load_action = Action::new_local(move |(): &()| {
        let auth = auth_for_load.clone();
        async move { client::fetch_profile(&auth.store()).await }
    });

    // Unsync because the input is a `web_sys::File`; the parked handle stays
    // Copy for the render closures.
    let auth_for_avatar = auth.clone();
    let avatar_action = StoredValue::new_local(Action::new_local(move |file: &web_sys::File| {
        let file = file.clone();
        let auth = auth_for_avatar.clone();
        async move { client::update_avatar(&auth.store(), &file).await }
    }));
    let avatar_pending = Signal::derive(move || {
        avatar_action.with_value(|action| action.pending().get())
    });

    Effect::new(move |_| {
        if let Some(result) = load_action.value().get() {
            match result {
                Ok(fresh) => {
                    profile.set(Some(fresh));
                    set_error.set(None);
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = avatar_action.with_value(|action| action.value().get()) {
            match result {
                Ok(fresh) => {
                    profile.set(Some(fresh));
                    set_error.set(None);
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    load_action.dispatch(());

    let on_avatar_change = move |event: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&event);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            avatar_action.with_value(|action| {
                action.dispatch_local(file);
            });
        }
    };

    view! {
        <AppShell>
            <div class="max-w-md mx-auto mt-8 flex flex-col gap-4">
                <h1 class="text-2xl font-semibold">"My account"</h1>
                {move || {
                    error
                        .get()
                        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                {move || match profile.get() {
                    None => view! { <Spinner /> }.into_any(),
                    Some(profile) => {
                        let name = match (profile.first_name.as_deref(), profile.last_name.as_deref()) {
                            (Some(first), Some(last)) => format!("{first} {last}"),
                            (Some(first), None) => first.to_string(),
                            (None, Some(last)) => last.to_string(),
                            (None, None) => profile.email.clone(),
                        };
                        view! {
                            <div class="bg-white border border-slate-200 rounded-lg p-4 flex flex-col gap-3">
                                {profile
                                    .avatar_url
                                    .clone()
                                    .map(|url| {
                                        view! {
                                            <img
                                                src=url
                                                alt="Avatar"
                                                class="w-20 h-20 rounded-full object-cover"
                                            />
                                        }
                                    })}
                                <p class="font-medium">{name}</p>
                                <p class="text-sm text-slate-500">{profile.email.clone()}</p>
                                <p class="text-sm text-slate-500">{profile.role.as_str()}</p>
                                <label class="text-sm font-medium" for="avatar">
                                    "Change avatar"
                                </label>
                                <input
                                    id="avatar"
                                    type="file"
                                    accept="image/*"
                                    class="text-sm"
                                    disabled=move || avatar_pending.get()
                                    on:change=on_avatar_change
                                />
                            </div>
                        }
                        .into_any()
                    }
                }}
            </div>
        </AppShell>
    }
}
