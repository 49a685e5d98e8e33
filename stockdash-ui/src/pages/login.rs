//! Login Page
//!
//! Email/password sign-in.

use leptos::*;
use leptos_router::*;
use stockdash::auth::LoginRequest;
use stockdash::{AuthGateway, Session};

use crate::api::GlooGateway;
use crate::state::global::GlobalState;

/// Login page component
#[component]
pub fn Login() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    // Signed in, here or by a restored token
    create_effect(move |_| {
        if state.is_signed_in() {
            navigate("/dashboard", Default::default());
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let request = LoginRequest::new(email.get_untracked(), password.get_untracked());
        if let Err(e) = request.validate() {
            state.show_error(&e.to_string());
            return;
        }

        set_submitting.set(true);
        spawn_local(async move {
            match GlooGateway::new(None).login(&request).await {
                Ok(response) => state.sign_in(Session::from(response)),
                Err(e) => state.show_error(&format!("Login failed: {}", e)),
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <AuthCard title="Sign in" subtitle="Track your portfolio with Stockdash">
            <form on:submit=on_submit class="space-y-4">
                <TextField
                    label="Email"
                    input_type="email"
                    value=email
                    on_input=set_email
                />
                <TextField
                    label="Password"
                    input_type="password"
                    value=password
                    on_input=set_password
                />

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>

            <p class="mt-6 text-center text-sm text-gray-400">
                "No account yet? "
                <A href="/register" class="text-primary-400 hover:text-primary-300">"Register"</A>
            </p>
        </AuthCard>
    }
}

/// Centered card used by the auth screens
#[component]
pub fn AuthCard(
    title: &'static str,
    subtitle: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-900 text-white flex items-center justify-center px-4">
            <div class="w-full max-w-md bg-gray-800 rounded-xl p-8 shadow-lg">
                <div class="text-center mb-8">
                    <div class="text-4xl mb-2">"📈"</div>
                    <h1 class="text-2xl font-bold">{title}</h1>
                    <p class="text-gray-400 mt-1">{subtitle}</p>
                </div>
                {children()}
            </div>
        </div>
    }
}

/// Labelled input bound to a signal
#[component]
pub fn TextField(
    label: &'static str,
    input_type: &'static str,
    value: ReadSignal<String>,
    on_input: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <input
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| on_input.set(event_target_value(&ev))
                class="w-full bg-gray-700 rounded-lg px-4 py-3
                       border border-gray-600 focus:border-primary-500 focus:outline-none"
            />
        </div>
    }
}
