//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;
use stockdash::session::Session;

use crate::api::{self, GlooGateway};

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Signed-in session, `None` on the auth screens
    pub session: RwSignal<Option<Session>>,
    /// A stored token is being checked against `/api/user/me`
    pub restoring: RwSignal<bool>,
    /// Bumped after every menu mutation so the sidebar reloads
    pub menu_version: RwSignal<u64>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    /// Informational notice (for toasts)
    pub info: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let state = GlobalState {
        session: create_rw_signal(None),
        restoring: create_rw_signal(false),
        menu_version: create_rw_signal(0),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        info: create_rw_signal(None),
    };

    provide_context(state);
    state
}

impl GlobalState {
    /// Gateway carrying the current session's token
    pub fn gateway(&self) -> GlooGateway {
        let token = self
            .session
            .with_untracked(|session| session.as_ref().map(|s| s.token().to_string()));
        GlooGateway::new(token)
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.with(Option::is_some)
    }

    pub fn sign_in(&self, session: Session) {
        api::store_token(session.token());
        self.session.set(Some(session));
    }

    /// Drop the session; the shell redirects to `/login`
    pub fn sign_out(&self) {
        api::clear_token();
        self.session.set(None);
    }

    pub fn menus_changed(&self) {
        self.menu_version.update(|v| *v += 1);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        flash(self.success, message, 3000);
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        web_sys::console::warn_1(&message.into());
        flash(self.error, message, 5000);
    }

    /// Show an informational notice (auto-clears after timeout)
    pub fn show_info(&self, message: &str) {
        flash(self.info, message, 3000);
    }
}

fn flash(signal: RwSignal<Option<String>>, message: &str, millis: u32) {
    signal.set(Some(message.to_string()));

    let shown = message.to_string();
    gloo_timers::callback::Timeout::new(millis, move || {
        // A newer message keeps its own timer
        signal.try_update(|current| {
            if current.as_deref() == Some(shown.as_str()) {
                *current = None;
            }
        });
    })
    .forget();
}

/// Notice for a sidebar leaf whose route is not served by the app
pub fn not_available_notice(label: &str) -> String {
    format!("{} page is not available yet", label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_available_notice() {
        assert_eq!(
            not_available_notice("Watchlist"),
            "Watchlist page is not available yet"
        );
    }
}
