//! Header Component
//!
//! Top bar with the sidebar toggle and the signed-in user.

use leptos::*;
use leptos_router::*;

use crate::components::SidebarContext;
use crate::state::global::GlobalState;

/// Header bar
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let SidebarContext(model) = expect_context::<SidebarContext>();
    let navigate = use_navigate();

    let user = move || state.session.with(|s| s.as_ref().map(|s| s.user().clone()));

    let logout = move |_| {
        state.sign_out();
        navigate("/login", Default::default());
    };

    view! {
        <header class="h-16 bg-gray-800 border-b border-gray-700 flex items-center justify-between px-6">
            <button
                on:click=move |_| model.update(|m| m.toggle_collapsed())
                class="px-3 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                title="Toggle sidebar"
            >
                "☰"
            </button>

            <div class="flex items-center space-x-4">
                {move || user().map(|user| {
                    let initial = user.initial().map(String::from).unwrap_or_default();
                    view! {
                        <div class="flex items-center space-x-3">
                            <span class="w-9 h-9 rounded-full bg-primary-600 flex items-center justify-center font-semibold">
                                {initial}
                            </span>
                            <div class="text-sm">
                                <div class="font-medium">{user.name}</div>
                                <div class="text-gray-400">{user.email}</div>
                            </div>
                        </div>
                    }
                })}

                <button
                    on:click=logout
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm font-medium transition-colors"
                >
                    "Logout"
                </button>
            </div>
        </header>
    }
}
