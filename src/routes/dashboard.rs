//! Operator dashboard: audit stats, overdue list, assigned audits, and a
//! progress-over-time readout. Refreshes every ten seconds while mounted; a
//! failed refresh keeps the last good data on screen.

use crate::app_lib::poll::Poller;
use crate::components::{Alert, AlertKind, AppShell, Spinner};
use crate::features::audits::client;
use crate::features::audits::types::{Audit, Dashboard, ProgressPoint};
use crate::features::auth::guards::RequireAuth;
use crate::features::auth::state::use_auth;
use leptos::prelude::*;
use leptos_router::components::A;

const REFRESH_PERIOD_MS: u32 = 10_000;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <DashboardContent />
        </RequireAuth>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let auth = use_auth();
    let dashboard = RwSignal::new(None::<Dashboard>);
    let audits = RwSignal::new(Vec::<Audit>::new());
    let progress = RwSignal::new(Vec::<ProgressPoint>::new());
    let (period, set_period) = signal("week".to_string());
    let (error, set_error) = signal::<Option<String>>(None);

    let auth_for_load = auth.clone();
    let load_action = Action::new_local(move |(): &()| {
        let auth = auth_for_load.clone();
        async move {
            let dashboard = client::fetch_dashboard(&auth.store()).await?;
            let audits = client::fetch_operator_audits(&auth.store()).await?;
            Ok::<_, crate::app_lib::ApiError>((dashboard, audits))
        }
    });

    let auth_for_progress = auth.clone();
    let progress_action = Action::new_local(move |period: &String| {
        let period = period.clone();
        let auth = auth_for_progress.clone();
        async move { client::fetch_progress(&auth.store(), &period).await }
    });

    Effect::new(move |_| {
        if let Some(result) = load_action.value().get() {
            match result {
                Ok((fresh_dashboard, fresh_audits)) => {
                    dashboard.set(Some(fresh_dashboard));
                    audits.set(fresh_audits);
                    set_error.set(None);
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    Effect::new(move |_| {
        if let Some(Ok(points)) = progress_action.value().get() {
            progress.set(points);
        }
    });

    // Refetch the chart whenever the period selector changes.
    Effect::new(move |_| {
        progress_action.dispatch(period.get());
    });

    load_action.dispatch(());
    let refresh = StoredValue::new_local(Poller::start(REFRESH_PERIOD_MS, move || {
        load_action.dispatch(());
    }));
    on_cleanup(move || refresh.update_value(Poller::stop));

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
            <div class="max-w-4xl mx-auto mt-8 flex flex-col gap-6">
                <h1 class="text-2xl font-semibold">"My audits"</h1>
                {move || {
                    error
                        .get()
                        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                {move || match dashboard.get() {
                    None => view! { <Spinner /> }.into_any(),
                    Some(dashboard) => view! {
                        <div class="grid grid-cols-2 sm:grid-cols-4 gap-4">
                            {stat_card("Total", dashboard.stats.total_audits)}
                            {stat_card("In progress", dashboard.stats.in_progress)}
                            {stat_card("Completed", dashboard.stats.completed)}
                            {stat_card("Delayed", dashboard.stats.delayed)}
                        </div>
                        {(!dashboard.delayed_audits.is_empty())
                            .then(|| {
                                view! {
                                    <div class="flex flex-col gap-2">
                                        <h2 class="text-lg font-medium">"Overdue"</h2>
                                        {dashboard
                                            .delayed_audits
                                            .iter()
                                            .map(|audit| {
                                                let title = audit
                                                    .title
                                                    .clone()
                                                    .unwrap_or_else(|| format!("Audit #{}", audit.id));
                                                let days = audit.days_overdue.unwrap_or(0);
                                                view! {
                                                    <Alert
                                                        kind=AlertKind::Error
                                                        message=format!("{title}: {days} day(s) overdue")
                                                    />
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                }
                            })}
                    }
                    .into_any(),
                }}
                <div class="flex flex-col gap-2">
                    <h2 class="text-lg font-medium">"Assigned audits"</h2>
                    {move || {
                        let list = audits.get();
                        if list.is_empty() {
                            return view! {
                                <p class="text-slate-500">"No audits assigned yet."</p>
                            }
                            .into_any();
                        }
                        view! {
                            <ul class="divide-y divide-slate-200 border border-slate-200 rounded-lg">
                                {list
                                    .into_iter()
                                    .map(|audit| {
                                        let title = audit
                                            .title
                                            .clone()
                                            .unwrap_or_else(|| format!("Audit #{}", audit.id));
                                        let status = audit
                                            .status_display
                                            .clone()
                                            .or_else(|| audit.status.clone())
                                            .unwrap_or_default();
                                        let progress = audit
                                            .progress
                                            .map(|value| format!("{value:.0}%"))
                                            .unwrap_or_default();
                                        view! {
                                            <li class="p-3 flex items-center justify-between">
                                                <A
                                                    href={format!("/audits/{}", audit.id)}
                                                    {..}
                                                    class="text-blue-700 hover:underline"
                                                >
                                                    {title}
                                                </A>
                                                <span class="text-sm text-slate-500">
                                                    {status} " " {progress}
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
                    <div class="flex items-center justify-between">
                        <h2 class="text-lg font-medium">"Progress"</h2>
                        <select
                            class="border border-slate-300 rounded-lg text-sm p-1.5"
                            on:change=move |event| set_period.set(event_target_value(&event))
                        >
                            <option value="week" selected>"Week"</option>
                            <option value="month">"Month"</option>
                            <option value="year">"Year"</option>
                        </select>
                    </div>
                    {move || {
                        let points = progress.get();
                        if points.is_empty() {
                            return view! {
                                <p class="text-slate-500">"No progress recorded for this period."</p>
                            }
                            .into_any();
                        }
                        view! {
                            <ul class="text-sm text-slate-600">
                                {points
                                    .into_iter()
                                    .map(|point| {
                                        let target = point
                                            .target
                                            .map(|target| format!(" (target {target:.0}%)"))
                                            .unwrap_or_default();
                                        view! {
                                            <li>
                                                {point.date} ": " {format!("{:.0}%", point.progress)}
                                                {target}
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any()
                    }}
                </div>
            </div>
        </AppShell>
    }
}
