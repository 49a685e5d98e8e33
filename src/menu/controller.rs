//! Admin Controller
//!
//! Drives an [`AdminScreen`] against a [`MenuGateway`]: sends the request a
//! transition asks for, feeds the response back, and performs the full
//! reload that follows every successful mutation.

use super::admin::{
    AdminConfig, AdminError, AdminScreen, DeleteOutcome, Mutation, SubmitOutcome,
};
use crate::gateway::MenuGateway;

/// Human-in-the-loop gate in front of destructive actions
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Async driver of the admin screen
pub struct AdminController<G> {
    gateway: G,
    screen: AdminScreen,
}

impl<G: MenuGateway> AdminController<G> {
    pub fn new(gateway: G, config: AdminConfig) -> Self {
        Self {
            gateway,
            screen: AdminScreen::new(config),
        }
    }

    pub fn screen(&self) -> &AdminScreen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut AdminScreen {
        &mut self.screen
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Fetch the full tree and replace the screen's copy.
    ///
    /// Failures land in [`AdminScreen::error`]; nothing propagates.
    pub async fn load(&mut self) {
        let ticket = self.screen.begin_reload();
        let result = self.gateway.list(true).await;
        self.screen.finish_reload(ticket, result);
    }

    /// Submit the open form, then reload when the outcome asks for it
    pub async fn submit(&mut self) -> Result<SubmitOutcome, AdminError> {
        let (ticket, mutation) = self.screen.begin_submit()?;

        let result = match &mutation {
            Mutation::Create(request) => self.gateway.create(request).await,
            Mutation::Update { id, request } => self.gateway.update(id, request).await,
        };

        let outcome = self.screen.finish_submit(ticket, result);
        if outcome.needs_reload() {
            self.load().await;
        }
        Ok(outcome)
    }

    /// Delete a node after the operator confirms; reload on success
    pub async fn delete<C>(&mut self, id: &str, confirm: &C) -> Result<DeleteOutcome, AdminError>
    where
        C: Confirm + ?Sized,
    {
        let request = self.screen.request_delete(id)?;
        if !confirm.confirm(&request.prompt()) {
            tracing::debug!(menu_id = %id, "Delete cancelled by operator");
            return Ok(DeleteOutcome::Cancelled);
        }

        let ticket = self.screen.confirm_delete(&request)?;
        let result = self.gateway.delete(&request.id).await;

        let outcome = self.screen.finish_delete(ticket, result);
        if outcome == DeleteOutcome::Deleted {
            self.load().await;
        }
        Ok(outcome)
    }
}
