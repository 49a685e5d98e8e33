//! Sidebar Component
//!
//! Collapsible navigation tree built from the server-managed menu.

use leptos::*;
use leptos_router::*;
use stockdash::menu::{ClickOutcome, SidebarRow};

use crate::components::menu_row::{indent_style, MenuLabel};
use crate::components::{InlineLoading, SidebarContext};
use crate::state::global::{not_available_notice, GlobalState};

/// Sidebar with the menu tree
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let SidebarContext(model) = expect_context::<SidebarContext>();
    let navigate = use_navigate();

    let on_row_click = Callback::new(move |id: String| {
        match model.try_update(|m| m.click(&id)) {
            Some(ClickOutcome::Navigate(path)) => navigate(&path, Default::default()),
            Some(ClickOutcome::NotImplemented { label }) => {
                state.show_info(&not_available_notice(&label))
            }
            _ => {}
        }
    });

    let collapsed = move || model.with(|m| m.is_collapsed());

    view! {
        <aside class=move || {
            let width = if collapsed() { "w-16" } else { "w-64" };
            format!(
                "{} bg-gray-800 border-r border-gray-700 flex flex-col transition-all duration-200",
                width
            )
        }>
            // Brand
            <div class="h-16 flex items-center px-4 border-b border-gray-700">
                <span class="text-2xl">"📈"</span>
                <Show when=move || !collapsed()>
                    <span class="ml-3 text-xl font-bold">"Stockdash"</span>
                </Show>
            </div>

            <nav class="flex-1 py-4 space-y-1 overflow-y-auto">
                {move || model.with(|m| m.is_loading()).then(|| view! {
                    <div class="px-4 py-2 text-gray-400"><InlineLoading /></div>
                })}

                {move || model.with(|m| m.error().map(str::to_string)).map(|error| view! {
                    <div class="px-4 py-2 text-sm text-red-400">{error}</div>
                })}

                {move || {
                    let compact = collapsed();
                    model
                        .with(|m| m.rows())
                        .into_iter()
                        .map(|row| view! {
                            <SidebarItem row=row compact=compact on_click=on_row_click />
                        })
                        .collect_view()
                }}
            </nav>

            <button
                on:click=move |_| model.update(|m| m.toggle_collapsed())
                class="h-12 border-t border-gray-700 text-gray-400 hover:text-white transition-colors"
                title="Toggle sidebar"
            >
                {move || if collapsed() { "»" } else { "«" }}
            </button>
        </aside>
    }
}

#[component]
fn SidebarItem(row: SidebarRow, compact: bool, on_click: Callback<String>) -> impl IntoView {
    let base = "w-full flex items-center justify-between py-2 pr-3 text-left transition-colors";
    let class = if row.active {
        format!("{} bg-gray-700 text-white border-l-2 border-primary-500", base)
    } else {
        format!("{} text-gray-300 hover:text-white hover:bg-gray-700", base)
    };

    let arrow = match (row.has_children, row.expanded) {
        (true, true) => "▾",
        (true, false) => "▸",
        _ => "",
    };
    let style = if compact { indent_style(16) } else { indent_style(row.indent) };
    let id = row.id;

    view! {
        <button
            class=class
            style=style
            title=row.label.clone()
            on:click=move |_| on_click.call(id.clone())
        >
            <MenuLabel icon=row.icon label=row.label compact=compact />
            {(!compact).then(|| view! { <span class="text-gray-500">{arrow}</span> })}
        </button>
    }
}
