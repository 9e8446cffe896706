//! Admin dashboard: fleet-wide audit stats, the pending-operator approval
//! queue, and per-operator management actions. Admin-only; refreshes every
//! ten seconds while mounted and reloads after every management action.

use crate::app_lib::poll::Poller;
use crate::app_lib::ApiError;
use crate::components::{Alert, AlertKind, AppShell, Spinner};
use crate::features::admin::client;
use crate::features::admin::types::{AdminDashboard, Operator};
use crate::features::audits::types::Audit;
use crate::features::auth::guards::RequireRole;
use crate::features::auth::state::use_auth;
use crate::features::auth::store::SessionStore;
use crate::features::auth::types::Role;
use leptos::prelude::*;

const REFRESH_PERIOD_MS: u32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OperatorCommand {
    Approve,
    Reject,
    Enable,
    Disable,
    Delete,
    GenerateAudits,
}

impl OperatorCommand {
    async fn run(self, store: &SessionStore, operator_id: i64) -> Result<(), ApiError> {
        match self {
            OperatorCommand::Approve => client::approve_operator(store, operator_id).await?,
            OperatorCommand::Reject => client::reject_operator(store, operator_id).await?,
            OperatorCommand::Enable => client::enable_operator(store, operator_id).await?,
            OperatorCommand::Disable => client::disable_operator(store, operator_id).await?,
            OperatorCommand::Delete => client::delete_operator(store, operator_id).await?,
            OperatorCommand::GenerateAudits => client::generate_audits(store, operator_id).await?,
        };
        Ok(())
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! {
        <RequireRole role=Role::Admin>
            <AdminDashboardContent />
        </RequireRole>
    }
}

#[component]
fn AdminDashboardContent() -> impl IntoView {
    let auth = use_auth();
    let dashboard = RwSignal::new(None::<AdminDashboard>);
    let pending = RwSignal::new(Vec::<Operator>::new());
    let operators = RwSignal::new(Vec::<Operator>::new());
    let unassigned = RwSignal::new(Vec::<Audit>::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let auth_for_load = auth.clone();
    let load_action = Action::new_local(move |(): &()| {
        let auth = auth_for_load.clone();
        async move {
            let dashboard = client::fetch_dashboard(&auth.store()).await?;
            let pending = client::fetch_pending_operators(&auth.store()).await?;
            let operators = client::fetch_operators(&auth.store()).await?;
            let unassigned = client::fetch_unassigned_audits(&auth.store()).await?;
            Ok::<_, ApiError>((dashboard, pending, operators, unassigned))
        }
    });

    let auth_for_command = auth.clone();
    let command_action = Action::new_local(move |(command, operator_id): &(OperatorCommand, i64)| {
        let (command, operator_id) = (*command, *operator_id);
        let auth = auth_for_command.clone();
        async move { command.run(&auth.store(), operator_id).await }
    });

    Effect::new(move |_| {
        if let Some(result) = load_action.value().get() {
            match result {
                Ok((fresh_dashboard, fresh_pending, fresh_operators, fresh_unassigned)) => {
                    dashboard.set(Some(fresh_dashboard));
                    pending.set(fresh_pending);
                    operators.set(fresh_operators);
                    unassigned.set(fresh_unassigned);
                    set_error.set(None);
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    Effect::new(move |_| {
        match command_action.value().get() {
            Some(Ok(())) => load_action.dispatch(()),
            Some(Err(err)) => {
                set_error.set(Some(err.to_string()));
                return;
            }
            None => return,
        };
    });

    load_action.dispatch(());
    let refresh = StoredValue::new_local(Poller::start(REFRESH_PERIOD_MS, move || {
        load_action.dispatch(());
    }));
    on_cleanup(move || refresh.update_value(Poller::stop));

    let command_button = move |label: &'static str, command: OperatorCommand, operator_id: i64| {
        view! {
            <button
                type="button"
                class="text-sm text-blue-700 hover:underline disabled:text-slate-400"
                disabled=move || command_action.pending().get()
                on:click=move |_| {
                    command_action.dispatch((command, operator_id));
                }
            >
                {label}
            </button>
        }
    };

    let operator_name = |first: &Option<String>, last: &Option<String>, email: &str| {
        match (first.as_deref(), last.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => email.to_string(),
        }
    };

    let stat_card = |label: &'static str, value: i64| {
        view! {
            <div class="bg-white border border-slate-200 rounded-lg p-4">
                <p class="text-sm text-slate-500">{label}</p>
                <p class="text-2xl font-semibold">{value}</p>
            </div>
        }
    };

    view! {
        <AppShell>
            <div class="max-w-5xl mx-auto mt-8 flex flex-col gap-6">
                <h1 class="text-2xl font-semibold">"Administration"</h1>
                {move || {
                    error
                        .get()
                        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                {move || match dashboard.get() {
                    None => view! { <Spinner /> }.into_any(),
                    Some(dashboard) => view! {
                        <div class="grid grid-cols-2 sm:grid-cols-5 gap-4">
                            {stat_card("Total", dashboard.global_stats.total_audits)}
                            {stat_card("Pending", dashboard.global_stats.pending_audits)}
                            {stat_card("In progress", dashboard.global_stats.in_progress_audits)}
                            {stat_card("Completed", dashboard.global_stats.completed_audits)}
                            {stat_card("Delayed", dashboard.global_stats.delayed_audits)}
                        </div>
                        {(!dashboard.operators.is_empty())
                            .then(|| {
                                view! {
                                    <div class="flex flex-col gap-2">
                                        <h2 class="text-lg font-medium">"Operator workload"</h2>
                                        <ul class="divide-y divide-slate-200 border border-slate-200 rounded-lg">
                                            {dashboard
                                                .operators
                                                .iter()
                                                .map(|overview| {
                                                    let email = overview.user.email.clone();
                                                    let stats = overview.stats.clone();
                                                    view! {
                                                        <li class="p-3 flex justify-between text-sm">
                                                            <span>{email}</span>
                                                            <span class="text-slate-500">
                                                                {stats.completed_audits} " / "
                                                                {stats.audit_count} " completed, "
                                                                {stats.delayed_audits} " delayed"
                                                            </span>
                                                        </li>
                                                    }
                                                })
                                                .collect_view()}
                                        </ul>
                                    </div>
                                }
                            })}
                    }
                    .into_any(),
                }}
                <div class="flex flex-col gap-2">
                    <h2 class="text-lg font-medium">"Pending approvals"</h2>
                    {move || {
                        let queue = pending.get();
                        if queue.is_empty() {
                            return view! {
                                <p class="text-slate-500">"No operators waiting for approval."</p>
                            }
                            .into_any();
                        }
                        view! {
                            <ul class="divide-y divide-slate-200 border border-slate-200 rounded-lg">
                                {queue
                                    .into_iter()
                                    .map(|operator| {
                                        let name = operator_name(
                                            &operator.first_name,
                                            &operator.last_name,
                                            &operator.email,
                                        );
                                        view! {
                                            <li class="p-3 flex items-center justify-between">
                                                <span>{name} " (" {operator.email.clone()} ")"</span>
                                                <span class="flex gap-3">
                                                    {command_button(
                                                        "Approve",
                                                        OperatorCommand::Approve,
                                                        operator.id,
                                                    )}
                                                    {command_button(
                                                        "Reject",
                                                        OperatorCommand::Reject,
                                                        operator.id,
                                                    )}
                                                </span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any()
                    }}
                </div>
                <div class="flex flex-col gap-2">
                    <h2 class="text-lg font-medium">"Operators"</h2>
                    {move || {
                        let list = operators.get();
                        if list.is_empty() {
                            return view! {
                                <p class="text-slate-500">"No operators registered."</p>
                            }
                            .into_any();
                        }
                        view! {
                            <ul class="divide-y divide-slate-200 border border-slate-200 rounded-lg">
                                {list
                                    .into_iter()
                                    .map(|operator| {
                                        let name = operator_name(
                                            &operator.first_name,
                                            &operator.last_name,
                                            &operator.email,
                                        );
                                        let active = operator.is_active.unwrap_or(true);
                                        let toggle = if active {
                                            command_button(
                                                "Disable",
                                                OperatorCommand::Disable,
                                                operator.id,
                                            )
                                        } else {
                                            command_button(
                                                "Enable",
                                                OperatorCommand::Enable,
                                                operator.id,
                                            )
                                        };
                                        view! {
                                            <li class="p-3 flex items-center justify-between">
                                                <span>
                                                    {name}
                                                    {(!active)
                                                        .then_some(" (disabled)")}
                                                </span>
                                                <span class="flex gap-3">
                                                    {command_button(
                                                        "Generate audits",
                                                        OperatorCommand::GenerateAudits,
                                                        operator.id,
                                                    )}
                                                    {toggle}
                                                    {command_button(
                                                        "Delete",
                                                        OperatorCommand::Delete,
                                                        operator.id,
                                                    )}
                                                </span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any()
                    }}
                </div>
                {move || {
                    let list = unassigned.get();
                    (!list.is_empty())
                        .then(|| {
                            view! {
                                <div class="flex flex-col gap-2">
                                    <h2 class="text-lg font-medium">"Unassigned audits"</h2>
                                    <ul class="divide-y divide-slate-200 border border-slate-200 rounded-lg">
                                        {list
                                            .into_iter()
                                            .map(|audit| {
                                                let title = audit
                                                    .title
                                                    .clone()
                                                    .unwrap_or_else(|| format!("Audit #{}", audit.id));
                                                let due = audit.due_date.clone().unwrap_or_default();
                                                view! {
                                                    <li class="p-3 flex justify-between text-sm">
                                                        <span>{title}</span>
                                                        <span class="text-slate-500">{due}</span>
                                                    </li>
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
                                </div>
                            }
                        })
                }}
            </div>
        </AppShell>
    }
}
