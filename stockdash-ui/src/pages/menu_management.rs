//! Menu Management Page
//!
//! Lists the whole menu tree and edits it. Every mutation is followed by a
//! full reload; the screen never patches its local copy.

use leptos::*;
use stockdash::menu::{
    AdminConfig, AdminRow, AdminScreen, DeleteOutcome, FormMode, Mutation, SubmitOutcome,
};
use stockdash::MenuGateway;

use crate::components::menu_row::{indent_style, MenuLabel};
use crate::components::{InlineLoading, Loading};
use crate::state::global::GlobalState;

fn reload(state: GlobalState, screen: RwSignal<AdminScreen>) {
    let Some(ticket) = screen.try_update(|s| s.begin_reload()) else {
        return;
    };

    let gateway = state.gateway();
    spawn_local(async move {
        let result = gateway.list(true).await;
        screen.try_update(|s| s.finish_reload(ticket, result));
    });
}

/// Reload this screen and tell the sidebar the tree changed
fn after_mutation(state: GlobalState, screen: RwSignal<AdminScreen>) {
    reload(state, screen);
    state.menus_changed();
}

fn submit(state: GlobalState, screen: RwSignal<AdminScreen>) {
    let (ticket, mutation) = match screen.try_update(|s| s.begin_submit()) {
        Some(Ok(begun)) => begun,
        Some(Err(e)) => {
            state.show_error(&e.to_string());
            return;
        }
        None => return,
    };

    let gateway = state.gateway();
    spawn_local(async move {
        let result = match &mutation {
            Mutation::Create(request) => gateway.create(request).await,
            Mutation::Update { id, request } => gateway.update(id, request).await,
        };

        let Some(outcome) = screen.try_update(|s| s.finish_submit(ticket, result)) else {
            return;
        };
        match &outcome {
            SubmitOutcome::Saved(node) => state.show_success(&format!("Saved \"{}\"", node.label)),
            SubmitOutcome::FailedClosed(message) => {
                web_sys::console::error_1(&message.as_str().into())
            }
            // Shown inline by the open form
            SubmitOutcome::Failed(_) | SubmitOutcome::Stale => {}
        }
        if outcome.needs_reload() {
            after_mutation(state, screen);
        }
    });
}

fn delete(state: GlobalState, screen: RwSignal<AdminScreen>, id: String) {
    let request = match screen.with_untracked(|s| s.request_delete(&id)) {
        Ok(request) => request,
        Err(e) => {
            state.show_error(&e.to_string());
            return;
        }
    };

    let confirmed = window()
        .confirm_with_message(&request.prompt())
        .unwrap_or(false);
    if !confirmed {
        return;
    }

    let ticket = match screen.try_update(|s| s.confirm_delete(&request)) {
        Some(Ok(ticket)) => ticket,
        Some(Err(e)) => {
            state.show_error(&e.to_string());
            return;
        }
        None => return,
    };

    let gateway = state.gateway();
    spawn_local(async move {
        let result = gateway.delete(&request.id).await;
        let Some(outcome) = screen.try_update(|s| s.finish_delete(ticket, result)) else {
            return;
        };
        if let Some(message) = outcome.alert_message() {
            // Blocking, like the confirmation that started the delete
            let _ = window().alert_with_message(message);
            screen.try_update(|s| s.take_notice());
        }
        if outcome == DeleteOutcome::Deleted {
            state.show_success(&format!("Deleted \"{}\"", request.label));
            after_mutation(state, screen);
        }
    });
}

/// Menu management page component
#[component]
pub fn MenuManagement() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let screen = create_rw_signal(AdminScreen::new(AdminConfig::default()));

    reload(state, screen);
    on_cleanup(move || {
        screen.try_update(|s| s.detach());
    });

    let busy = move || screen.with(|s| s.is_busy());

    let open_create = move |_| {
        if let Some(Err(e)) = screen.try_update(|s| s.open_create()) {
            state.show_error(&e.to_string());
        }
    };

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Menu Management"</h1>
                    <p class="text-gray-400 mt-1">"Items shown in the sidebar"</p>
                </div>
                <button
                    on:click=open_create
                    disabled=busy
                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg font-medium transition-colors"
                >
                    "+ Add menu"
                </button>
            </div>

            {move || screen.with(|s| s.error().map(str::to_string)).map(|error| view! {
                <div class="bg-red-900/50 border border-red-700 text-red-200 rounded-lg px-4 py-3">
                    {error}
                </div>
            })}

            {move || {
                let notice = screen.with(|s| {
                    s.form_mode().is_none().then(|| s.notice().map(str::to_string)).flatten()
                });
                notice.map(|notice| view! {
                    <div class="bg-yellow-900/50 border border-yellow-700 text-yellow-200 rounded-lg px-4 py-3">
                        {notice}
                    </div>
                })
            }}

            <section class="bg-gray-800 rounded-xl p-6">
                {move || {
                    let rows = screen.with(|s| s.rows());
                    if rows.is_empty() && busy() {
                        view! { <Loading /> }.into_view()
                    } else if rows.is_empty() {
                        view! {
                            <p class="text-gray-400 text-center py-8">"No menu items yet."</p>
                        }
                        .into_view()
                    } else {
                        view! { <MenuTable rows=rows screen=screen /> }.into_view()
                    }
                }}
            </section>

            <Show when=move || screen.with(|s| s.form_mode().is_some())>
                <MenuFormDialog screen=screen />
            </Show>
        </div>
    }
}

#[component]
fn MenuTable(rows: Vec<AdminRow>, screen: RwSignal<AdminScreen>) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let busy = move || screen.with(|s| s.is_busy());

    view! {
        <table class="w-full text-left">
            <thead>
                <tr class="text-sm text-gray-400 border-b border-gray-700">
                    <th class="py-3">"Label"</th>
                    <th class="py-3">"Path"</th>
                    <th class="py-3 text-right">"Order"</th>
                    <th class="py-3 text-center">"Active"</th>
                    <th class="py-3 text-right">
                        {move || busy().then(|| view! { <InlineLoading /> })}
                    </th>
                </tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|row| {
                    let edit_id = row.id.clone();
                    let delete_id = row.id.clone();
                    let edit = move |_| {
                        if let Some(Err(e)) = screen.try_update(|s| s.open_edit(&edit_id)) {
                            state.show_error(&e.to_string());
                        }
                    };

                    view! {
                        <tr class="border-b border-gray-700/50">
                            <td class="py-3" style=indent_style(row.indent)>
                                <MenuLabel icon=row.icon label=row.label />
                            </td>
                            <td class="py-3 text-gray-400 font-mono text-sm">{row.path}</td>
                            <td class="py-3 text-right">{row.order}</td>
                            <td class="py-3 text-center">
                                {if row.is_active { "✓" } else { "✕" }}
                            </td>
                            <td class="py-3 text-right space-x-2">
                                <button
                                    on:click=edit
                                    disabled=busy
                                    class="px-3 py-1 bg-gray-700 hover:bg-gray-600 rounded text-sm"
                                >
                                    "Edit"
                                </button>
                                <button
                                    on:click=move |_| delete(state, screen, delete_id.clone())
                                    disabled=busy
                                    class="px-3 py-1 bg-red-700 hover:bg-red-600 rounded text-sm"
                                >
                                    "Delete"
                                </button>
                            </td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
}

#[component]
fn MenuFormDialog(screen: RwSignal<AdminScreen>) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let busy = move || screen.with(|s| s.is_busy());

    let title = move || match screen.with(|s| s.form_mode().cloned()) {
        Some(FormMode::Edit { .. }) => "Edit menu item",
        _ => "New menu item",
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        submit(state, screen);
    };

    let field = move |read: fn(&AdminScreen) -> String| move || screen.with(read);

    view! {
        <div class="fixed inset-0 bg-black/60 flex items-center justify-center z-40">
            <form on:submit=on_submit class="w-full max-w-lg bg-gray-800 rounded-xl p-6 space-y-4">
                <h2 class="text-xl font-semibold">{title}</h2>

                {move || screen.with(|s| s.notice().map(str::to_string)).map(|notice| view! {
                    <div class="bg-red-900/50 border border-red-700 text-red-200 rounded-lg px-4 py-2 text-sm">
                        {notice}
                    </div>
                })}

                <FormRow label="Label">
                    <input
                        type="text"
                        prop:value=field(|s| s.form().label.clone())
                        on:input=move |ev| screen.update(|s| s.form_mut().label = event_target_value(&ev))
                        class=INPUT_CLASS
                    />
                </FormRow>

                <FormRow label="Icon">
                    <input
                        type="text"
                        prop:value=field(|s| s.form().icon.clone())
                        on:input=move |ev| screen.update(|s| s.form_mut().icon = event_target_value(&ev))
                        class=INPUT_CLASS
                    />
                </FormRow>

                <FormRow label="Path">
                    <input
                        type="text"
                        placeholder="/dashboard"
                        prop:value=field(|s| s.form().path.clone())
                        on:input=move |ev| screen.update(|s| s.form_mut().path = event_target_value(&ev))
                        class=INPUT_CLASS
                    />
                </FormRow>

                <FormRow label="Parent">
                    <select
                        on:change=move |ev| {
                            screen.update(|s| s.form_mut().set_parent_input(&event_target_value(&ev)))
                        }
                        class=INPUT_CLASS
                    >
                        <option value="" selected=move || screen.with(|s| s.form().parent_id.is_none())>
                            "(top level)"
                        </option>
                        {move || {
                            let options: Vec<(String, String)> = screen.with(|s| {
                                s.parent_options()
                                    .into_iter()
                                    .map(|n| (n.id.clone(), format!("{} {}", n.icon, n.label)))
                                    .collect()
                            });
                            options.into_iter().map(|(id, label)| {
                                let value = id.clone();
                                view! {
                                    <option
                                        value=value
                                        selected=move || screen.with(|s| s.form().parent_id.as_deref() == Some(id.as_str()))
                                    >
                                        {label}
                                    </option>
                                }
                            }).collect_view()
                        }}
                    </select>
                </FormRow>

                <div class="flex items-center space-x-6">
                    <FormRow label="Order">
                        <input
                            type="number"
                            prop:value=field(|s| s.form().order.to_string())
                            on:input=move |ev| screen.update(|s| s.form_mut().set_order_input(&event_target_value(&ev)))
                            class=INPUT_CLASS
                        />
                    </FormRow>

                    <label class="flex items-center space-x-2 mt-6">
                        <input
                            type="checkbox"
                            prop:checked=move || screen.with(|s| s.form().is_active)
                            on:change=move |ev| screen.update(|s| s.form_mut().is_active = event_target_checked(&ev))
                        />
                        <span>"Active"</span>
                    </label>
                </div>

                <div class="flex justify-end space-x-2 pt-2">
                    <button
                        type="button"
                        on:click=move |_| screen.update(|s| s.cancel())
                        disabled=busy
                        class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg"
                    >
                        "Cancel"
                    </button>
                    <button
                        type="submit"
                        disabled=busy
                        class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg font-medium"
                    >
                        {move || if busy() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

const INPUT_CLASS: &str = "w-full bg-gray-700 rounded-lg px-3 py-2 \
                           border border-gray-600 focus:border-primary-500 focus:outline-none";

#[component]
fn FormRow(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="flex-1">
            <label class="block text-sm text-gray-400 mb-1">{label}</label>
            {children()}
        </div>
    }
}
