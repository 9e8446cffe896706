//! Operator registration form. Server-side field errors come back as a
//! per-field map and are rendered under the matching inputs; a successful
//! registration records the pending email and jumps to the success screen.

use crate::app_lib::ApiError;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::client;
use crate::features::auth::state::use_auth;
use crate::features::auth::types::{Role, SignupRequest};
use crate::routes::paths;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use std::collections::BTreeMap;

#[component]
pub fn SignUpPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (phone_number, set_phone_number) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (field_errors, set_field_errors) = signal::<BTreeMap<String, String>>(BTreeMap::new());

    let auth_for_action = auth.clone();
    let signup_action = Action::new_local(move |request: &SignupRequest| {
        let request = request.clone();
        let auth = auth_for_action.clone();
        async move { client::signup(&auth.store(), &request).await }
    });

    let auth_for_result = auth.clone();
    Effect::new(move |_| {
        if let Some(result) = signup_action.value().get() {
            match result {
                Ok(()) => {
                    let store = auth_for_result.store();
                    store.set_pending_email(email.get_untracked().trim());
                    store.mark_just_registered();
                    navigate(paths::SIGNUP_SUCCESS, Default::default());
                }
                Err(ApiError::Validation { fields, .. }) => {
                    set_field_errors.set(fields);
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        set_field_errors.set(BTreeMap::new());

        signup_action.dispatch(SignupRequest {
            first_name: first_name.get_untracked().trim().to_string(),
            last_name: last_name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            phone_number: phone_number.get_untracked().trim().to_string(),
            role: Role::Operator,
        });
    };

    let field_error = move |name: &'static str| {
        field_errors
            .get()
            .get(name)
            .map(|message| view! { <p class="mt-1 text-sm text-red-600">{message.clone()}</p> })
    };

    view! {
        <AppShell>
            <form class="max-w-sm mx-auto mt-10" on:submit=on_submit>
                <h1 class="text-2xl font-semibold mb-6">"Create an account"</h1>
                <div class="mb-5">
                    <label class="block mb-2 text-sm font-medium" for="first_name">
                        "First name"
                    </label>
                    <input
                        id="first_name"
                        type="text"
                        class="bg-slate-50 border border-slate-300 text-sm rounded-lg block w-full p-2.5"
                        autocomplete="given-name"
                        required
                        on:input=move |event| set_first_name.set(event_target_value(&event))
                    />
                    {move || field_error("first_name")}
                </div>
                <div class="mb-5">
                    <label class="block mb-2 text-sm font-medium" for="last_name">
                        "Last name"
                    </label>
                    <input
                        id="last_name"
                        type="text"
                        class="bg-slate-50 border border-slate-300 text-sm rounded-lg block w-full p-2.5"
                        autocomplete="family-name"
                        required
                        on:input=move |event| set_last_name.set(event_target_value(&event))
                    />
                    {move || field_error("last_name")}
                </div>
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
                    {move || field_error("email")}
                </div>
                <div class="mb-5">
                    <label class="block mb-2 text-sm font-medium" for="phone_number">
                        "Phone number"
                    </label>
                    <input
                        id="phone_number"
                        type="tel"
                        class="bg-slate-50 border border-slate-300 text-sm rounded-lg block w-full p-2.5"
                        autocomplete="tel"
                        on:input=move |event| set_phone_number.set(event_target_value(&event))
                    />
                    {move || field_error("phone_number")}
                </div>
                <div class="mb-5">
                    <label class="block mb-2 text-sm font-medium" for="password">
                        "Password"
                    </label>
                    <input
                        id="password"
                        type="password"
                        class="bg-slate-50 border border-slate-300 text-sm rounded-lg block w-full p-2.5"
                        autocomplete="new-password"
                        required
                        on:input=move |event| set_password.set(event_target_value(&event))
                    />
                    {move || field_error("password")}
                </div>
                <Button button_type="submit" disabled=signup_action.pending()>
                    "Sign up"
                </Button>
                {move || {
                    signup_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="mt-4"><Spinner /></div> })
                }}
                {move || {
                    error
                        .get()
                        .map(|message| {
                            view! {
                                <div class="mt-4">
                                    <Alert kind=AlertKind::Error message=message />
                                </div>
                            }
                        })
                }}
                <p class="mt-6 text-sm text-slate-500">
                    "Already registered? "
                    <A href={paths::SIGNIN} {..} class="text-blue-700 hover:underline">
                        "Sign in"
                    </A>
                </p>
            </form>
        </AppShell>
    }
}
