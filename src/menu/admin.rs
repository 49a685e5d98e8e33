//! Menu Admin Screen
//!
//! Form-driven CRUD surface over the menu resource, modelled as a pure state
//! machine. Every network call is split into a `begin_*` step that hands out
//! a [`Ticket`] plus the request to send, and a `finish_*` step that applies
//! the response. Responses carrying a stale ticket are dropped, so a reply
//! that arrives after the screen was left never touches it.
//!
//! ```text
//! List --add/edit--> Form --submit--> Loading --ok--> List (+ reload)
//!  ^                  |                  |
//!  +-----cancel-------+                  +--err--> Form (KeepOpen) | List (CloseAndLog)
//! List --delete+confirm--> Loading --> List (+ reload on success)
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

use super::nav::INDENT_STEP;
use super::tree::MenuTree;
use super::types::{CreateMenuRequest, MenuId, MenuNode, UpdateMenuRequest};
use super::Ticket;
use crate::gateway::GatewayError;

/// Which nodes the "parent" selector offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentPolicy {
    /// Only root-level nodes without a parent: one level of nesting
    #[default]
    RootsOnly,
    /// Any node except the edited one and its descendants
    Any,
}

/// What happens to the form when a create/update request fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitFailureMode {
    /// Keep the form open and show the failure to the operator
    #[default]
    KeepOpen,
    /// Log the failure, close the form and reload as if it had succeeded
    CloseAndLog,
}

/// Behaviour switches of the admin screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub parent_policy: ParentPolicy,
    #[serde(default)]
    pub submit_failure: SubmitFailureMode,
}

/// Whether the open form creates a node or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: MenuId },
}

/// Work the screen is waiting on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    Reload,
    Submit(FormMode),
    Delete { id: MenuId },
}

/// Screen state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    List,
    Loading(Pending),
    FormOpen(FormMode),
}

/// Editable form values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuForm {
    pub label: String,
    pub icon: String,
    pub path: String,
    pub parent_id: Option<MenuId>,
    pub order: i32,
    pub is_active: bool,
    pub permissions: BTreeSet<String>,
}

impl Default for MenuForm {
    fn default() -> Self {
        Self {
            label: String::new(),
            icon: String::new(),
            path: String::new(),
            parent_id: None,
            order: 0,
            is_active: true,
            permissions: BTreeSet::new(),
        }
    }
}

impl MenuForm {
    /// Pre-populate from a node's current values
    pub fn from_node(node: &MenuNode) -> Self {
        Self {
            label: node.label.clone(),
            icon: node.icon.clone(),
            path: node.path.clone(),
            parent_id: node.parent_id.clone(),
            order: node.order,
            is_active: node.is_active,
            permissions: node.permissions.clone().unwrap_or_default(),
        }
    }

    /// Parse the order input the way a number field does: garbage becomes 0
    pub fn set_order_input(&mut self, raw: &str) {
        self.order = raw.trim().parse().unwrap_or(0);
    }

    /// Empty selection means "no parent"
    pub fn set_parent_input(&mut self, raw: &str) {
        self.parent_id = if raw.is_empty() {
            None
        } else {
            Some(raw.to_string())
        };
    }

    fn permissions(&self) -> Option<BTreeSet<String>> {
        Some(self.permissions.clone())
    }

    pub fn to_create_request(&self) -> CreateMenuRequest {
        CreateMenuRequest {
            label: self.label.clone(),
            icon: self.icon.clone(),
            path: self.path.clone(),
            parent_id: self.parent_id.clone(),
            order: self.order,
            permissions: if self.permissions.is_empty() {
                None
            } else {
                self.permissions()
            },
        }
    }

    /// Full payload, never a diff
    pub fn to_update_request(&self) -> UpdateMenuRequest {
        UpdateMenuRequest {
            label: Some(self.label.clone()),
            icon: Some(self.icon.clone()),
            path: Some(self.path.clone()),
            parent_id: Some(self.parent_id.clone()),
            order: Some(self.order),
            is_active: Some(self.is_active),
            permissions: self.permissions(),
        }
    }
}

/// Request produced by a submit, to be sent by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(CreateMenuRequest),
    Update { id: MenuId, request: UpdateMenuRequest },
}

/// A delete waiting for the operator's confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: MenuId,
    pub label: String,
}

impl DeleteRequest {
    pub fn prompt(&self) -> String {
        format!("Delete menu item \"{}\"?", self.label)
    }
}

/// Result of applying a submit response
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Form dismissed; the caller must reload the list
    Saved(MenuNode),
    /// Failure kept the form open with a notice
    Failed(String),
    /// Failure logged only; form dismissed and the caller must reload
    FailedClosed(String),
    /// Ticket was stale, nothing changed
    Stale,
}

impl SubmitOutcome {
    pub fn needs_reload(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_) | SubmitOutcome::FailedClosed(_))
    }
}

/// Result of a delete attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Deleted; the caller must reload the list
    Deleted,
    /// Operator declined the confirmation; no request was sent
    Cancelled,
    /// Server or transport refused; list unchanged, notice raised
    Failed(String),
    Stale,
}

impl DeleteOutcome {
    /// Message the operator must acknowledge before continuing
    pub fn alert_message(&self) -> Option<&str> {
        match self {
            DeleteOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Client-side validation failures of the menu form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Parent {0} is not an allowed choice")]
    InvalidParent(MenuId),
}

/// Errors from driving the screen in the wrong state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    #[error("Another request is already in flight")]
    Busy,

    #[error("No form is open")]
    NoForm,

    #[error("Menu item {0} not found")]
    NotFound(MenuId),

    #[error(transparent)]
    Form(#[from] FormError),
}

/// One row of the admin list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRow {
    pub id: MenuId,
    pub label: String,
    pub icon: String,
    pub path: String,
    pub order: i32,
    pub is_active: bool,
    pub depth: usize,
    pub indent: u32,
}

/// Admin screen state machine
#[derive(Debug, Clone)]
pub struct AdminScreen {
    state: ScreenState,
    tree: MenuTree,
    form: MenuForm,
    /// Inline list-load error
    error: Option<String>,
    /// Operator-facing alert (failed delete, failed save)
    notice: Option<String>,
    config: AdminConfig,
    generation: u64,
}

impl AdminScreen {
    pub fn new(config: AdminConfig) -> Self {
        Self {
            state: ScreenState::List,
            tree: MenuTree::new(),
            form: MenuForm::default(),
            error: None,
            notice: None,
            config,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn config(&self) -> AdminConfig {
        self.config
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn form(&self) -> &MenuForm {
        &self.form
    }

    /// Mutable access to the open form's values
    pub fn form_mut(&mut self) -> &mut MenuForm {
        &mut self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Triggering controls are disabled while this is true
    pub fn is_busy(&self) -> bool {
        matches!(self.state, ScreenState::Loading(_))
    }

    pub fn form_mode(&self) -> Option<&FormMode> {
        match &self.state {
            ScreenState::FormOpen(mode) => Some(mode),
            ScreenState::Loading(Pending::Submit(mode)) => Some(mode),
            _ => None,
        }
    }

    /// Flat, depth-indented list of every node
    pub fn rows(&self) -> Vec<AdminRow> {
        self.tree
            .flatten()
            .into_iter()
            .map(|row| AdminRow {
                id: row.node.id.clone(),
                label: row.node.label.clone(),
                icon: row.node.icon.clone(),
                path: row.node.path.clone(),
                order: row.node.order,
                is_active: row.node.is_active,
                depth: row.depth,
                indent: row.indent(0, INDENT_STEP),
            })
            .collect()
    }

    /// Nodes the parent selector offers for the open form.
    ///
    /// When editing, the node's current parent is always offered so that
    /// edits which keep the parent pass validation at any depth.
    pub fn parent_options(&self) -> Vec<&MenuNode> {
        let editing = match self.form_mode() {
            Some(FormMode::Edit { id }) => Some(id.as_str()),
            _ => None,
        };

        match self.config.parent_policy {
            ParentPolicy::RootsOnly => {
                let current_parent = editing
                    .and_then(|id| self.tree.get(id))
                    .and_then(|n| n.parent_id.as_deref());

                let top_level: HashSet<&str> =
                    self.tree.top_level().map(|n| n.id.as_str()).collect();

                self.tree
                    .iter()
                    .filter(|n| {
                        (top_level.contains(n.id.as_str()) && Some(n.id.as_str()) != editing)
                            || Some(n.id.as_str()) == current_parent
                    })
                    .collect()
            }
            ParentPolicy::Any => self
                .tree
                .iter()
                .filter(|n| match editing {
                    Some(id) => n.id != id && !self.tree.is_descendant(&n.id, id),
                    None => true,
                })
                .collect(),
        }
    }

    /// Start a full reload of the list
    pub fn begin_reload(&mut self) -> Ticket {
        self.state = ScreenState::Loading(Pending::Reload);
        self.next_ticket()
    }

    /// Replace the in-memory tree wholesale with a fetch result
    pub fn finish_reload(&mut self, ticket: Ticket, result: Result<Vec<MenuNode>, GatewayError>) -> bool {
        if !ticket.is_current(self.generation) {
            tracing::debug!(ticket = ticket.generation(), "Dropping stale menu list response");
            return false;
        }

        match result.map_err(|e| e.to_string()).and_then(|roots| {
            MenuTree::from_roots(roots).map_err(|e| e.to_string())
        }) {
            Ok(tree) => {
                self.tree = tree;
                self.error = None;
            }
            Err(message) => {
                tracing::error!(error = %message, "Failed to load menu items");
                self.tree = MenuTree::new();
                self.error = Some(format!("Failed to load menu: {}", message));
            }
        }

        self.state = ScreenState::List;
        true
    }

    /// "Add" action: open an empty form
    pub fn open_create(&mut self) -> Result<(), AdminError> {
        self.ensure_idle()?;
        self.form = MenuForm::default();
        self.state = ScreenState::FormOpen(FormMode::Create);
        Ok(())
    }

    /// "Edit" action: open the form pre-populated from the node
    pub fn open_edit(&mut self, id: &str) -> Result<(), AdminError> {
        self.ensure_idle()?;
        let node = self
            .tree
            .get(id)
            .ok_or_else(|| AdminError::NotFound(id.to_string()))?;
        self.form = MenuForm::from_node(node);
        self.state = ScreenState::FormOpen(FormMode::Edit { id: id.to_string() });
        Ok(())
    }

    /// Discard in-progress edits without any mutation
    pub fn cancel(&mut self) {
        if matches!(self.state, ScreenState::FormOpen(_)) {
            self.form = MenuForm::default();
            self.state = ScreenState::List;
        }
    }

    /// Validate the open form against the current tree
    pub fn validate(&self) -> Result<(), FormError> {
        if self.form.label.trim().is_empty() {
            return Err(FormError::Required("Label"));
        }
        if self.form.icon.trim().is_empty() {
            return Err(FormError::Required("Icon"));
        }
        if self.form.path.trim().is_empty() {
            return Err(FormError::Required("Path"));
        }
        if let Some(parent) = &self.form.parent_id {
            if !self.parent_options().iter().any(|n| &n.id == parent) {
                return Err(FormError::InvalidParent(parent.clone()));
            }
        }
        Ok(())
    }

    /// Submit the open form: returns the request the caller must send
    pub fn begin_submit(&mut self) -> Result<(Ticket, Mutation), AdminError> {
        let mode = match &self.state {
            ScreenState::FormOpen(mode) => mode.clone(),
            ScreenState::Loading(_) => return Err(AdminError::Busy),
            ScreenState::List => return Err(AdminError::NoForm),
        };
        self.validate()?;

        let mutation = match &mode {
            FormMode::Create => Mutation::Create(self.form.to_create_request()),
            FormMode::Edit { id } => Mutation::Update {
                id: id.clone(),
                request: self.form.to_update_request(),
            },
        };

        self.notice = None;
        self.state = ScreenState::Loading(Pending::Submit(mode));
        Ok((self.next_ticket(), mutation))
    }

    /// Apply the response of a create/update request
    pub fn finish_submit(&mut self, ticket: Ticket, result: Result<MenuNode, GatewayError>) -> SubmitOutcome {
        if !ticket.is_current(self.generation) {
            return SubmitOutcome::Stale;
        }

        let mode = match &self.state {
            ScreenState::Loading(Pending::Submit(mode)) => mode.clone(),
            other => {
                tracing::debug!(state = ?other, "Submit response outside a pending submit");
                return SubmitOutcome::Stale;
            }
        };

        match result {
            Ok(node) => {
                tracing::info!(menu_id = %node.id, "Menu item saved");
                self.form = MenuForm::default();
                self.state = ScreenState::List;
                SubmitOutcome::Saved(node)
            }
            Err(e) => {
                let message = format!("Failed to save menu item: {}", e);
                tracing::error!(error = %e, mode = ?mode, "Menu save failed");

                match self.config.submit_failure {
                    SubmitFailureMode::KeepOpen => {
                        self.notice = Some(message.clone());
                        self.state = ScreenState::FormOpen(mode);
                        SubmitOutcome::Failed(message)
                    }
                    SubmitFailureMode::CloseAndLog => {
                        self.form = MenuForm::default();
                        self.state = ScreenState::List;
                        SubmitOutcome::FailedClosed(message)
                    }
                }
            }
        }
    }

    /// First half of the delete gate: nothing is sent until confirmed
    pub fn request_delete(&self, id: &str) -> Result<DeleteRequest, AdminError> {
        self.ensure_idle()?;
        let node = self
            .tree
            .get(id)
            .ok_or_else(|| AdminError::NotFound(id.to_string()))?;
        Ok(DeleteRequest {
            id: node.id.clone(),
            label: node.label.clone(),
        })
    }

    /// Operator confirmed: the caller must now send the delete
    pub fn confirm_delete(&mut self, request: &DeleteRequest) -> Result<Ticket, AdminError> {
        self.ensure_idle()?;
        self.notice = None;
        self.state = ScreenState::Loading(Pending::Delete {
            id: request.id.clone(),
        });
        Ok(self.next_ticket())
    }

    /// Apply the delete response; the loading state always clears
    pub fn finish_delete(&mut self, ticket: Ticket, result: Result<(), GatewayError>) -> DeleteOutcome {
        if !ticket.is_current(self.generation) {
            return DeleteOutcome::Stale;
        }

        self.state = ScreenState::List;
        match result {
            Ok(()) => DeleteOutcome::Deleted,
            Err(e) => {
                tracing::error!(error = %e, "Failed to delete menu item");
                let message = format!("Failed to delete menu item: {}", e);
                self.notice = Some(message.clone());
                DeleteOutcome::Failed(message)
            }
        }
    }

    /// Invalidate every outstanding ticket (the screen was left)
    pub fn detach(&mut self) {
        self.generation += 1;
    }

    fn ensure_idle(&self) -> Result<(), AdminError> {
        match self.state {
            ScreenState::List => Ok(()),
            ScreenState::Loading(_) => Err(AdminError::Busy),
            // Opening another form or deleting replaces nothing silently
            ScreenState::FormOpen(_) => Err(AdminError::Busy),
        }
    }

    fn next_ticket(&mut self) -> Ticket {
        self.generation += 1;
        Ticket::new(self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::tree::tests::sample_roots;

    fn loaded(config: AdminConfig) -> AdminScreen {
        let mut screen = AdminScreen::new(config);
        let ticket = screen.begin_reload();
        assert!(screen.finish_reload(ticket, Ok(sample_roots())));
        screen
    }

    fn server_error() -> GatewayError {
        GatewayError::Server {
            status: 500,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_reload_cycles_through_loading() {
        let mut screen = AdminScreen::new(AdminConfig::default());
        let ticket = screen.begin_reload();
        assert_eq!(screen.state(), &ScreenState::Loading(Pending::Reload));
        assert!(screen.is_busy());

        screen.finish_reload(ticket, Ok(sample_roots()));
        assert_eq!(screen.state(), &ScreenState::List);
        assert_eq!(screen.rows().len(), 8);
        assert_eq!(screen.rows()[4].indent, 40);
    }

    #[test]
    fn test_failed_reload_sets_error_and_empties_tree() {
        let mut screen = loaded(AdminConfig::default());
        let ticket = screen.begin_reload();
        screen.finish_reload(ticket, Err(GatewayError::Transport("timeout".to_string())));

        assert!(screen.tree().is_empty());
        assert!(screen.error().unwrap().contains("timeout"));
        assert_eq!(screen.state(), &ScreenState::List);
    }

    #[test]
    fn test_create_form_defaults() {
        let mut screen = loaded(AdminConfig::default());
        screen.open_create().unwrap();

        assert_eq!(screen.state(), &ScreenState::FormOpen(FormMode::Create));
        assert_eq!(screen.form(), &MenuForm::default());
        assert_eq!(screen.form().order, 0);
        assert!(screen.form().parent_id.is_none());
    }

    #[test]
    fn test_edit_form_prefilled_and_update_is_full_payload() {
        let mut screen = loaded(AdminConfig::default());
        screen.open_edit("3").unwrap();
        assert_eq!(screen.form().label, "Holdings");
        assert_eq!(screen.form().parent_id.as_deref(), Some("2"));

        screen.form_mut().order = 9;
        let (_, mutation) = screen.begin_submit().unwrap();
        match mutation {
            Mutation::Update { id, request } => {
                assert_eq!(id, "3");
                assert_eq!(request.order, Some(9));
                assert_eq!(request.label.as_deref(), Some("Holdings"));
                assert_eq!(request.path.as_deref(), Some("/portfolio/holdings"));
                assert_eq!(request.parent_id, Some(Some("2".to_string())));
                assert_eq!(request.is_active, Some(true));
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_cancel_discards_edits() {
        let mut screen = loaded(AdminConfig::default());
        screen.open_edit("1").unwrap();
        screen.form_mut().label = "Changed".to_string();
        screen.cancel();

        assert_eq!(screen.state(), &ScreenState::List);
        assert_eq!(screen.form(), &MenuForm::default());
        assert_eq!(screen.tree().get("1").unwrap().label, "Dashboard");
    }

    #[test]
    fn test_submit_success_dismisses_form() {
        let mut screen = loaded(AdminConfig::default());
        screen.open_create().unwrap();
        let form = screen.form_mut();
        form.label = "Reports".to_string();
        form.icon = "📈".to_string();
        form.path = "/reports".to_string();

        let (ticket, _) = screen.begin_submit().unwrap();
        let outcome = screen.finish_submit(ticket, Ok(MenuNode::new("9", "Reports", "📈", "/reports")));
        assert!(outcome.needs_reload());
        assert_eq!(screen.state(), &ScreenState::List);
    }

    #[test]
    fn test_submit_failure_keeps_form_open_by_default() {
        let mut screen = loaded(AdminConfig::default());
        screen.open_edit("1").unwrap();
        screen.form_mut().label = "Home".to_string();

        let (ticket, _) = screen.begin_submit().unwrap();
        let outcome = screen.finish_submit(ticket, Err(server_error()));

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert!(!outcome.needs_reload());
        assert_eq!(
            screen.state(),
            &ScreenState::FormOpen(FormMode::Edit { id: "1".to_string() })
        );
        assert_eq!(screen.form().label, "Home");
        assert!(screen.notice().unwrap().contains("boom"));
    }

    #[test]
    fn test_submit_failure_close_and_log_mode() {
        let mut screen = loaded(AdminConfig {
            submit_failure: SubmitFailureMode::CloseAndLog,
            ..Default::default()
        });
        screen.open_edit("1").unwrap();

        let (ticket, _) = screen.begin_submit().unwrap();
        let outcome = screen.finish_submit(ticket, Err(server_error()));

        assert!(matches!(outcome, SubmitOutcome::FailedClosed(_)));
        assert!(outcome.needs_reload());
        assert_eq!(screen.state(), &ScreenState::List);
        assert!(screen.notice().is_none());
    }

    #[test]
    fn test_validation_blocks_submit() {
        let mut screen = loaded(AdminConfig::default());
        screen.open_create().unwrap();
        assert_eq!(
            screen.begin_submit().unwrap_err(),
            AdminError::Form(FormError::Required("Label"))
        );
        assert_eq!(screen.state(), &ScreenState::FormOpen(FormMode::Create));
    }

    #[test]
    fn test_parent_options_roots_only() {
        let mut screen = loaded(AdminConfig::default());
        screen.open_create().unwrap();
        let options: Vec<&str> = screen.parent_options().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(options, vec!["1", "2", "7"]);

        // A nested node is not a valid parent under the default policy
        let form = screen.form_mut();
        form.label = "Deep".to_string();
        form.icon = "d".to_string();
        form.path = "/deep".to_string();
        form.parent_id = Some("4".to_string());
        assert_eq!(
            screen.validate().unwrap_err(),
            FormError::InvalidParent("4".to_string())
        );

        // Editing a root hides it from its own parent choices
        screen.cancel();
        screen.open_edit("2").unwrap();
        let options: Vec<&str> = screen.parent_options().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(options, vec!["1", "7"]);
    }

    #[test]
    fn test_edit_nested_node_keeps_its_parent() {
        let mut screen = loaded(AdminConfig::default());
        screen.open_edit("5").unwrap();
        assert_eq!(screen.form().parent_id.as_deref(), Some("4"));

        let options: Vec<&str> = screen.parent_options().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(options, vec!["1", "2", "4", "7"]);

        screen.form_mut().label = "Open trades".to_string();
        screen.form_mut().order = 3;
        let (_, mutation) = screen.begin_submit().unwrap();
        match mutation {
            Mutation::Update { id, request } => {
                assert_eq!(id, "5");
                assert_eq!(request.label.as_deref(), Some("Open trades"));
                assert_eq!(request.order, Some(3));
                assert_eq!(request.parent_id, Some(Some("4".to_string())));
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_nested_node_cannot_move_under_other_nested_node() {
        let mut screen = loaded(AdminConfig::default());
        screen.open_edit("5").unwrap();
        screen.form_mut().parent_id = Some("3".to_string());
        assert_eq!(
            screen.validate().unwrap_err(),
            FormError::InvalidParent("3".to_string())
        );
    }

    #[test]
    fn test_submit_response_without_pending_submit_is_stale() {
        let mut screen = loaded(AdminConfig::default());
        let ticket = screen.begin_reload();
        let outcome = screen.finish_submit(ticket, Err(server_error()));

        assert_eq!(outcome, SubmitOutcome::Stale);
        assert_eq!(screen.state(), &ScreenState::Loading(Pending::Reload));
        assert!(screen.notice().is_none());
    }

    #[test]
    fn test_parent_options_any_excludes_subtree() {
        let mut screen = loaded(AdminConfig {
            parent_policy: ParentPolicy::Any,
            ..Default::default()
        });
        screen.open_edit("2").unwrap();
        let options: Vec<&str> = screen.parent_options().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(options, vec!["1", "7", "8"]);
    }

    #[test]
    fn test_delete_gate_and_failure_notice() {
        let mut screen = loaded(AdminConfig::default());
        let request = screen.request_delete("7").unwrap();
        assert_eq!(request.prompt(), "Delete menu item \"Admin\"?");
        assert_eq!(screen.state(), &ScreenState::List);

        let ticket = screen.confirm_delete(&request).unwrap();
        assert!(screen.is_busy());

        let outcome = screen.finish_delete(ticket, Err(server_error()));
        assert!(matches!(outcome, DeleteOutcome::Failed(_)));
        assert!(outcome.alert_message().unwrap().contains("boom"));
        assert_eq!(DeleteOutcome::Deleted.alert_message(), None);
        assert_eq!(screen.state(), &ScreenState::List);
        assert_eq!(screen.tree().len(), 8);
        assert!(screen.take_notice().is_some());
        assert!(screen.notice().is_none());
    }

    #[test]
    fn test_busy_screen_rejects_new_work() {
        let mut screen = loaded(AdminConfig::default());
        let request = screen.request_delete("1").unwrap();
        let _ticket = screen.confirm_delete(&request).unwrap();

        assert_eq!(screen.open_create().unwrap_err(), AdminError::Busy);
        assert_eq!(screen.request_delete("2").unwrap_err(), AdminError::Busy);
        assert_eq!(screen.begin_submit().unwrap_err(), AdminError::Busy);
    }

    #[test]
    fn test_detach_drops_late_responses() {
        let mut screen = loaded(AdminConfig::default());
        let ticket = screen.begin_reload();
        screen.detach();

        assert!(!screen.finish_reload(ticket, Ok(Vec::new())));
        assert_eq!(screen.tree().len(), 8);
    }

    #[test]
    fn test_form_inputs() {
        let mut form = MenuForm::default();
        form.set_order_input("12");
        assert_eq!(form.order, 12);
        form.set_order_input("abc");
        assert_eq!(form.order, 0);
        form.set_parent_input("2");
        assert_eq!(form.parent_id.as_deref(), Some("2"));
        form.set_parent_input("");
        assert!(form.parent_id.is_none());
    }
}
