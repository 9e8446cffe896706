use leptos::prelude::*;

/// Indeterminate busy indicator, sized to sit inline next to form controls.
#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <span class="inline-flex items-center gap-2" role="status">
            <span
                class="h-6 w-6 animate-spin rounded-full border-2 border-slate-300 border-t-blue-700"
                aria-hidden="true"
            ></span>
            <span class="sr-only">"Loading"</span>
        </span>
    }
}
