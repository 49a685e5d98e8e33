//! App Root Component
//!
//! Routing, global providers and session restore.

use leptos::*;
use leptos_router::*;
use stockdash::{AuthGateway, Session};

use crate::api::{self, GlooGateway};
use crate::components::{Shell, Toast};
use crate::pages::{Dashboard, Login, MenuManagement, Register};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    let state = provide_global_state();

    restore_session(state);

    view! {
        <Router>
            <Routes>
                <Route path="/login" view=Login />
                <Route path="/register" view=Register />

                // Signed-in pages share the sidebar shell
                <Route path="/" view=Shell>
                    <Route path="dashboard" view=Dashboard />
                    <Route path="admin/menus" view=MenuManagement />
                    <Route path="" view=|| view! { <Redirect path="/dashboard" /> } />
                </Route>

                <Route path="/*any" view=NotFound />
            </Routes>

            // Toast notifications
            <Toast />
        </Router>
    }
}

/// Sign back in with the token saved by the last visit
fn restore_session(state: GlobalState) {
    let Some(token) = api::load_token() else {
        return;
    };

    state.restoring.set(true);
    spawn_local(async move {
        match GlooGateway::new(Some(token.clone())).current_user().await {
            Ok(user) => state.session.set(Some(Session::new(token, user))),
            Err(e) => {
                web_sys::console::warn_1(&format!("Stored session rejected: {}", e).into());
                api::clear_token();
            }
        }
        state.restoring.set(false);
    });
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col items-center justify-center text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/dashboard"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
