//! Register Page
//!
//! Account creation; a successful registration signs the user in.

use leptos::*;
use leptos_router::*;
use stockdash::auth::RegisterRequest;
use stockdash::{AuthGateway, Session};

use crate::api::GlooGateway;
use crate::pages::login::{AuthCard, TextField};
use crate::state::global::GlobalState;

/// Register page component
#[component]
pub fn Register() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let navigate = use_navigate();

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    create_effect(move |_| {
        if state.is_signed_in() {
            navigate("/dashboard", Default::default());
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let request = RegisterRequest {
            email: email.get_untracked(),
            password: password.get_untracked(),
            name: name.get_untracked(),
            confirm_password: confirm.get_untracked(),
        };
        // Checked before any request goes out
        if let Err(e) = request.validate() {
            state.show_error(&e.to_string());
            return;
        }

        set_submitting.set(true);
        spawn_local(async move {
            match GlooGateway::new(None).register(&request).await {
                Ok(response) => {
                    state.show_success("Account created");
                    state.sign_in(Session::from(response));
                }
                Err(e) => state.show_error(&format!("Registration failed: {}", e)),
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <AuthCard title="Create account" subtitle="Start tracking your investments">
            <form on:submit=on_submit class="space-y-4">
                <TextField label="Name" input_type="text" value=name on_input=set_name />
                <TextField label="Email" input_type="email" value=email on_input=set_email />
                <TextField label="Password" input_type="password" value=password on_input=set_password />
                <TextField label="Confirm password" input_type="password" value=confirm on_input=set_confirm />

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Creating account..." } else { "Register" }}
                </button>
            </form>

            <p class="mt-6 text-center text-sm text-gray-400">
                "Already registered? "
                <A href="/login" class="text-primary-400 hover:text-primary-300">"Sign in"</A>
            </p>
        </AuthCard>
    }
}
