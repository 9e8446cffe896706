use crate::components::AppShell;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <AppShell>
            <div class="min-h-[60vh] flex flex-col items-center justify-center gap-3">
                <h1 class="text-2xl font-semibold">"Page not found"</h1>
                <A href={paths::HOME} {..} class="text-blue-700 hover:underline">
                    "Back to the home page"
                </A>
            </div>
        </AppShell>
    }
}
