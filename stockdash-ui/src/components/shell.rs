//! Navigation Shell
//!
//! Layout around every signed-in page: sidebar, header and the routed
//! content. Owns the sidebar model and keeps it in step with the route.

use leptos::*;
use leptos_router::*;
use stockdash::menu::{RoutePolicy, SidebarModel};
use stockdash::MenuGateway;

use crate::components::{Header, Loading, Sidebar};
use crate::state::global::GlobalState;

/// Sidebar model shared by the shell's children
#[derive(Clone, Copy)]
pub struct SidebarContext(pub RwSignal<SidebarModel>);

/// Fetch the tree into the sidebar, dropping responses that arrive late
fn load_menus(state: GlobalState, model: RwSignal<SidebarModel>) {
    let Some(ticket) = model.try_update(|m| m.begin_load()) else {
        return;
    };

    let gateway = state.gateway();
    spawn_local(async move {
        let result = gateway.list(false).await;
        model.try_update(|m| m.finish_load(ticket, result));
    });
}

/// Layout route for the signed-in pages
#[component]
pub fn Shell() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let location = use_location();

    let model = create_rw_signal(SidebarModel::new(
        RoutePolicy::default(),
        location.pathname.get_untracked(),
    ));
    provide_context(SidebarContext(model));

    // Initial load, then once per menu mutation
    create_effect(move |_| {
        let _ = state.menu_version.get();
        if state.is_signed_in() {
            load_menus(state, model);
        }
    });

    create_effect(move |_| {
        let path = location.pathname.get();
        model.update(|m| m.set_route(path));
    });

    on_cleanup(move || {
        model.try_update(|m| m.detach());
    });

    view! {
        {move || {
            if state.restoring.get() {
                view! { <Loading /> }.into_view()
            } else if !state.is_signed_in() {
                view! { <Redirect path="/login" /> }.into_view()
            } else {
                view! {
                    <div class="flex min-h-screen bg-gray-900 text-white">
                        <Sidebar />
                        <div class="flex-1 flex flex-col min-w-0">
                            <Header />
                            <main class="flex-1 px-8 py-8 pb-24">
                                <Outlet />
                            </main>
                        </div>
                    </div>
                }
                .into_view()
            }
        }}
    }
}
