//! Dashboard Page
//!
//! Landing page after sign-in.

use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let name = move || {
        state
            .session
            .with(|s| s.as_ref().map(|s| s.user().name.clone()))
            .unwrap_or_default()
    };
    let since = move || {
        state
            .session
            .with(|s| s.as_ref().map(|s| s.signed_in_at().format("%H:%M").to_string()))
            .unwrap_or_default()
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">{move || format!("Welcome, {}", name())}</h1>
                <p class="text-gray-400 mt-1">{move || format!("Signed in at {}", since())}</p>
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-2">"Your dashboard"</h2>
                <p class="text-gray-400">
                    "Use the sidebar to move between sections. Entries marked as not available \
                     are planned but not served yet."
                </p>
                <A
                    href="/admin/menus"
                    class="inline-block mt-4 px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "Manage menus"
                </A>
            </section>
        </div>
    }
}
