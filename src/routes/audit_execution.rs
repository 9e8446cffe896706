//! Audit execution stepper. Walks the audit's reperes one at a time, resuming
//! at the first checkpoint without a recorded control. Each submission updates
//! the loaded execution in place; a completed audit renders read-only.

use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::audits::client;
use crate::features::audits::types::{AuditExecution, ControlForm, ControlRecord, ControlStatus};
use crate::features::auth::guards::RequireAuth;
use crate::features::auth::state::use_auth;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

#[component]
pub fn AuditExecutionPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <AuditExecutionContent />
        </RequireAuth>
    }
}

#[component]
fn AuditExecutionContent() -> impl IntoView {
    let auth = use_auth();
    let params = use_params_map();
    let audit_id = Signal::derive(move || {
        params.with(|map| map.get("id").and_then(|id| id.parse::<i64>().ok()))
    });

    let execution = RwSignal::new(None::<AuditExecution>);
    let index = RwSignal::new(0_usize);
    let (error, set_error) = signal::<Option<String>>(None);

    let actual_value = RwSignal::new(String::new());
    let status = RwSignal::new(None::<ControlStatus>);
    let comment = RwSignal::new(String::new());
    // Holds a DOM handle, so it lives in local (non-Send) storage.
    let image = RwSignal::new_local(None::<web_sys::File>);
    let clear_form = move || {
        actual_value.set(String::new());
        status.set(None);
        comment.set(String::new());
        image.set(None);
    };

    let auth_for_load = auth.clone();
    let load_action = Action::new_local(move |audit_id: &i64| {
        let audit_id = *audit_id;
        let auth = auth_for_load.clone();
        async move { client::fetch_execution(&auth.store(), audit_id).await }
    });

    Effect::new(move |_| {
        if let Some(id) = audit_id.get() {
            load_action.dispatch(id);
        }
    });

    Effect::new(move |_| {
        if let Some(result) = load_action.value().get() {
            match result {
                Ok(fresh) => {
                    index.set(fresh.first_uncontrolled());
                    execution.set(Some(fresh));
                    set_error.set(None);
                    clear_form();
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    // The form carries a `web_sys::File`, so the action is unsync and its
    // handle is not Copy; parking it lets every closure share it.
    let auth_for_submit = auth.clone();
    let submit_action = StoredValue::new_local(Action::new_local(
        move |(repere_id, form): &(i64, ControlForm)| {
            let repere_id = *repere_id;
            let form = form.clone();
            let auth = auth_for_submit.clone();
            async move {
                client::submit_control(&auth.store(), repere_id, &form)
                    .await
                    .map(|record| (repere_id, record))
            }
        },
    ));
    let submit_pending = Signal::derive(move || {
        submit_action.with_value(|action| action.pending().get())
    });

    Effect::new(move |_| {
        if let Some(result) = submit_action.with_value(|action| action.value().get()) {
            match result {
                Ok((repere_id, record)) => {
                    apply_control(execution, repere_id, record);
                    set_error.set(None);
                    clear_form();
                    let total = execution
                        .with_untracked(|exec| exec.as_ref().map(|exec| exec.reperes.len()))
                        .unwrap_or(0);
                    if index.get_untracked() + 1 < total {
                        index.update(|current| *current += 1);
                    }
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let auth_for_complete = auth.clone();
    let complete_action = Action::new_local(move |audit_id: &i64| {
        let audit_id = *audit_id;
        let auth = auth_for_complete.clone();
        async move { client::complete_execution(&auth.store(), audit_id).await }
    });

    let auth_for_regenerate = auth.clone();
    let regenerate_action = Action::new_local(move |audit_id: &i64| {
        let audit_id = *audit_id;
        let auth = auth_for_regenerate.clone();
        async move { client::regenerate_reperes(&auth.store(), audit_id).await }
    });

    // Both actions change the server-side execution; reload it on success.
    Effect::new(move |_| {
        let completed = matches!(complete_action.value().get(), Some(Ok(_)));
        let regenerated = matches!(regenerate_action.value().get(), Some(Ok(_)));
        if completed || regenerated {
            if let Some(id) = audit_id.get_untracked() {
                load_action.dispatch(id);
            }
        }
    });
    Effect::new(move |_| {
        if let Some(Err(err)) = complete_action.value().get() {
            set_error.set(Some(err.to_string()));
        }
        if let Some(Err(err)) = regenerate_action.value().get() {
            set_error.set(Some(err.to_string()));
        }
    });

    let on_submit = move |_| {
        let repere_id = execution.with_untracked(|exec| {
            exec.as_ref()
                .and_then(|exec| exec.reperes.get(index.get_untracked()))
                .map(|repere| repere.id)
        });
        let Some(repere_id) = repere_id else {
            return;
        };
        let form = ControlForm {
            actual_value: actual_value.get_untracked(),
            status: status.get_untracked(),
            comment: comment.get_untracked(),
            image: image.get_untracked(),
        };
        if !form.is_submittable() {
            set_error.set(Some("Select a control status before submitting.".to_string()));
            return;
        }
        submit_action.with_value(|action| {
            action.dispatch_local((repere_id, form));
        });
    };

    let on_image_change = move |event: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&event);
        image.set(input.files().and_then(|files| files.get(0)));
    };

    let status_button = move |value: ControlStatus| {
        view! {
            <button
                type="button"
                class="px-3 py-1.5 rounded-lg border text-sm"
                class:bg-blue-700=move || status.get() == Some(value)
                class:text-white=move || status.get() == Some(value)
                on:click=move |_| status.set(Some(value))
            >
                {value.label()}
            </button>
        }
    };

    view! {
        <AppShell>
            <div class="max-w-2xl mx-auto mt-8 flex flex-col gap-4">
                {move || {
                    error
                        .get()
                        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                {move || match execution.get() {
                    None => view! { <Spinner /> }.into_any(),
                    Some(exec) if exec.audit.is_completed() => view! {
                        <h1 class="text-2xl font-semibold">
                            {exec
                                .audit
                                .title
                                .clone()
                                .unwrap_or_else(|| format!("Audit #{}", exec.audit.id))}
                        </h1>
                        <Alert
                            kind=AlertKind::Success
                            message="This audit is completed. Controls are read-only.".to_string()
                        />
                        <ul class="divide-y divide-slate-200 border border-slate-200 rounded-lg">
                            {exec
                                .reperes
                                .iter()
                                .map(|repere| {
                                    let outcome = repere
                                        .control
                                        .as_ref()
                                        .map(|control| control.status.label())
                                        .unwrap_or("Not controlled");
                                    view! {
                                        <li class="p-3 flex justify-between">
                                            <span>{repere.number} ". " {repere.name.clone()}</span>
                                            <span class="text-slate-500">{outcome}</span>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any(),
                    Some(exec) => {
                        let total = exec.reperes.len();
                        let current = index.get().min(total.saturating_sub(1));
                        let Some(repere) = exec.reperes.get(current).cloned() else {
                            return view! {
                                <p class="text-slate-500">"This audit has no checkpoints yet."</p>
                                <Button
                                    disabled=regenerate_action.pending()
                                    on:click=move |_| {
                                        if let Some(id) = audit_id.get_untracked() {
                                            regenerate_action.dispatch(id);
                                        }
                                    }
                                >
                                    "Generate checkpoints"
                                </Button>
                            }
                            .into_any();
                        };
                        let all_controlled = exec.reperes.iter().all(|repere| repere.control.is_some());
                        view! {
                            <h1 class="text-2xl font-semibold">
                                {exec
                                    .audit
                                    .title
                                    .clone()
                                    .unwrap_or_else(|| format!("Audit #{}", exec.audit.id))}
                            </h1>
                            <p class="text-slate-500">
                                "Checkpoint " {current + 1} " of " {total}
                                " (" {exec.controls_done} " controlled)"
                            </p>
                            <div class="bg-white border border-slate-200 rounded-lg p-4 flex flex-col gap-3">
                                <h2 class="text-lg font-medium">
                                    {repere.number} ". " {repere.name.clone()}
                                </h2>
                                {repere
                                    .expected_value
                                    .map(|expected| {
                                        view! {
                                            <p class="text-sm text-slate-500">
                                                "Expected value: " {expected}
                                            </p>
                                        }
                                    })}
                                {match &repere.control {
                                    Some(control) => {
                                        let recorded = control.status.label();
                                        view! {
                                            <p class="text-sm text-slate-500">
                                                "Already controlled: " {recorded}
                                            </p>
                                        }
                                        .into_any()
                                    }
                                    None => view! {
                                        <label class="text-sm font-medium" for="actual_value">
                                            "Measured value"
                                        </label>
                                        <input
                                            id="actual_value"
                                            type="number"
                                            step="any"
                                            class="bg-slate-50 border border-slate-300 text-sm rounded-lg p-2.5"
                                            prop:value=move || actual_value.get()
                                            on:input=move |event| {
                                                actual_value.set(event_target_value(&event))
                                            }
                                        />
                                        <div class="flex gap-2">
                                            {status_button(ControlStatus::Conforme)}
                                            {status_button(ControlStatus::NonConforme)}
                                            {status_button(ControlStatus::Na)}
                                        </div>
                                        <label class="text-sm font-medium" for="comment">
                                            "Comment"
                                        </label>
                                        <textarea
                                            id="comment"
                                            class="bg-slate-50 border border-slate-300 text-sm rounded-lg p-2.5"
                                            prop:value=move || comment.get()
                                            on:input=move |event| {
                                                comment.set(event_target_value(&event))
                                            }
                                        />
                                        <label class="text-sm font-medium" for="image">
                                            "Photo (optional)"
                                        </label>
                                        <input
                                            id="image"
                                            type="file"
                                            accept="image/*"
                                            class="text-sm"
                                            on:change=on_image_change
                                        />
                                        <Button
                                            disabled=submit_pending
                                            on:click=on_submit
                                        >
                                            "Record control"
                                        </Button>
                                    }
                                    .into_any(),
                                }}
                            </div>
                            <div class="flex justify-between">
                                <button
                                    type="button"
                                    class="text-sm text-blue-700 hover:underline disabled:text-slate-400"
                                    disabled=move || index.get() == 0
                                    on:click=move |_| {
                                        index.update(|current| *current = current.saturating_sub(1))
                                    }
                                >
                                    "Previous"
                                </button>
                                <button
                                    type="button"
                                    class="text-sm text-blue-700 hover:underline disabled:text-slate-400"
                                    disabled=move || index.get() + 1 >= total
                                    on:click=move |_| index.update(|current| *current += 1)
                                >
                                    "Next"
                                </button>
                            </div>
                            {all_controlled
                                .then(|| {
                                    view! {
                                        <Button
                                            disabled=complete_action.pending()
                                            on:click=move |_| {
                                                if let Some(id) = audit_id.get_untracked() {
                                                    complete_action.dispatch(id);
                                                }
                                            }
                                        >
                                            "Complete audit"
                                        </Button>
                                    }
                                })}
                        }
                        .into_any()
                    }
                }}
            </div>
        </AppShell>
    }
}

/// Writes a freshly recorded control back into the loaded execution and bumps
/// the done counter when the repere had none.
fn apply_control(execution: RwSignal<Option<AuditExecution>>, repere_id: i64, record: ControlRecord) {
    execution.update(|maybe| {
        let Some(exec) = maybe else {
            return;
        };
        let Some(repere) = exec.reperes.iter_mut().find(|repere| repere.id == repere_id) else {
            return;
        };
        if repere.control.is_none() {
            exec.controls_done += 1;
        }
        repere.control = Some(record);
    });
}

#[cfg(test)]
mod tests {
    use super::apply_control;
    use crate::app_lib::ApiError;
    use crate::features::audits::types::{AuditExecution, ControlForm, ControlRecord};
    use leptos::prelude::{Action, LocalStorage, RwSignal, StoredValue, WithUntracked};

    fn loaded_execution() -> RwSignal<Option<AuditExecution>> {
        let json = r#"{
            "audit": {"id": 1, "status": "in_progress"},
            "reperes": [
                {"id": 11, "numero": 1, "nom": "Axle bore", "controle": null},
                {"id": 12, "numero": 2, "nom": "Flange", "controle": null}
            ],
            "total_reperes": 2,
            "controles_effectues": 0
        }"#;
        RwSignal::new(Some(serde_json::from_str(json).expect("deserialize")))
    }

    fn record(id: i64) -> ControlRecord {
        serde_json::from_str(&format!(
            r#"{{"id": {id}, "statut": "conforme", "commentaire": ""}}"#
        ))
        .expect("deserialize")
    }

    #[test]
    fn apply_control_records_and_counts_each_repere_once() {
        let execution = loaded_execution();

        apply_control(execution, 11, record(1));
        apply_control(execution, 11, record(2));

        execution.with_untracked(|exec| {
            let exec = exec.as_ref().expect("loaded");
            assert_eq!(exec.controls_done, 1);
            assert_eq!(exec.reperes[0].control.as_ref().map(|c| c.id), Some(2));
            assert!(exec.reperes[1].control.is_none());
        });
    }

    #[test]
    fn apply_control_ignores_unknown_reperes() {
        let execution = loaded_execution();

        apply_control(execution, 99, record(1));

        execution.with_untracked(|exec| {
            assert_eq!(exec.as_ref().expect("loaded").controls_done, 0);
        });
    }

    // The parked handle is what render closures capture; it must stay Copy
    // so those closures remain FnMut.
    #[test]
    fn parked_submit_handle_is_copy() {
        type SubmitAction =
            Action<(i64, ControlForm), Result<(i64, ControlRecord), ApiError>, LocalStorage>;
        fn assert_copy_send<T: Copy + Send>() {}
        assert_copy_send::<StoredValue<SubmitAction, LocalStorage>>();
    }
}
