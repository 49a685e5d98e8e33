//! Navigation Shell State
//!
//! Sidebar model: which branches are expanded, which rows sit on the active
//! path, what a click does, and whether the sidebar is collapsed. The model
//! is framework-free; the web frontend wraps it in a signal and the CLI
//! prints its rows.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use super::tree::MenuTree;
use super::types::{MenuId, MenuNode};
use super::Ticket;
use crate::gateway::GatewayError;

/// Base indentation of a sidebar button, in logical pixels
pub const SIDEBAR_INDENT_BASE: u32 = 16;
/// Extra indentation per nesting level
pub const INDENT_STEP: u32 = 20;

/// Ids of the nodes currently shown with their children visible
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedSet(HashSet<MenuId>);

impl ExpandedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from scratch for a route: exactly the nodes on the active
    /// path, regardless of what was expanded before.
    pub fn for_route(tree: &MenuTree, current_path: &str) -> Self {
        Self(tree.active_set(current_path))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Flip membership of one id; returns the new state (true = expanded)
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.to_string());
            true
        }
    }

    pub fn insert(&mut self, id: impl Into<MenuId>) {
        self.0.insert(id.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuId> {
        self.0.iter()
    }
}

/// Set of in-app routes a leaf click may navigate to.
///
/// Anything else surfaces a "not implemented" notice instead of navigating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePolicy {
    routes: BTreeSet<String>,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::new(["/dashboard", "/admin/menus"])
    }
}

impl RoutePolicy {
    pub fn new<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            routes: routes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn resolves(&self, path: &str) -> bool {
        self.routes.contains(path)
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(String::as_str)
    }
}

/// What a click on a sidebar row resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Branch node: expansion flipped
    Toggled { id: MenuId, expanded: bool },
    /// Leaf with a resolvable route
    Navigate(String),
    /// Leaf whose route is not served by this application
    NotImplemented { label: String },
    /// Id not present in the current tree
    Unknown,
}

/// Loading state of the sidebar's menu fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    /// Inline, persistent error; no automatic retry
    Failed(String),
}

/// One rendered sidebar row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow {
    pub id: MenuId,
    pub label: String,
    pub icon: String,
    pub path: String,
    pub depth: usize,
    pub indent: u32,
    pub active: bool,
    pub expanded: bool,
    pub has_children: bool,
}

/// Sidebar state for one mounted navigation shell
#[derive(Debug, Clone)]
pub struct SidebarModel {
    tree: MenuTree,
    expanded: ExpandedSet,
    active: HashSet<MenuId>,
    current_path: String,
    collapsed: bool,
    load: LoadState,
    policy: RoutePolicy,
    generation: u64,
}

impl SidebarModel {
    pub fn new(policy: RoutePolicy, current_path: impl Into<String>) -> Self {
        Self {
            tree: MenuTree::new(),
            expanded: ExpandedSet::new(),
            active: HashSet::new(),
            current_path: current_path.into(),
            collapsed: false,
            load: LoadState::Loading,
            policy,
            generation: 0,
        }
    }

    /// Start a fetch; only the ticket returned here may complete it
    pub fn begin_load(&mut self) -> Ticket {
        self.generation += 1;
        self.load = LoadState::Loading;
        Ticket::new(self.generation)
    }

    /// Apply a fetch result. Returns false (and changes nothing) when the
    /// ticket is stale: a newer load started or the shell was detached.
    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<MenuNode>, GatewayError>) -> bool {
        if !ticket.is_current(self.generation) {
            tracing::debug!(ticket = ticket.generation(), "Dropping stale sidebar response");
            return false;
        }

        match result.map_err(|e| e.to_string()).and_then(|roots| {
            MenuTree::from_roots(roots).map_err(|e| e.to_string())
        }) {
            Ok(tree) => {
                tracing::debug!(nodes = tree.len(), "Sidebar menu loaded");
                self.tree = tree;
                self.load = LoadState::Loaded;
            }
            Err(message) => {
                tracing::error!(error = %message, "Failed to load menu items");
                self.tree = MenuTree::new();
                self.load = LoadState::Failed(format!("Failed to load menu: {}", message));
            }
        }

        self.recompute();
        true
    }

    /// Invalidate every outstanding ticket (the view went away)
    pub fn detach(&mut self) {
        self.generation += 1;
    }

    /// Route changed: active path and expanded set are recomputed from scratch
    pub fn set_route(&mut self, path: impl Into<String>) {
        self.current_path = path.into();
        self.recompute();
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Handle a click on a row
    pub fn click(&mut self, id: &str) -> ClickOutcome {
        let Some(node) = self.tree.get(id) else {
            return ClickOutcome::Unknown;
        };

        if self.tree.has_children(id) {
            let expanded = self.expanded.toggle(id);
            return ClickOutcome::Toggled {
                id: id.to_string(),
                expanded,
            };
        }

        if self.policy.resolves(&node.path) {
            ClickOutcome::Navigate(node.path.clone())
        } else {
            ClickOutcome::NotImplemented {
                label: node.label.clone(),
            }
        }
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn expanded(&self) -> &ExpandedSet {
        &self.expanded
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    /// Visible rows: children appear only under expanded nodes, and not at
    /// all while the sidebar is collapsed.
    pub fn rows(&self) -> Vec<SidebarRow> {
        let collapsed = self.collapsed;
        let expanded = &self.expanded;

        self.tree
            .walk(|node| !collapsed && expanded.contains(&node.id))
            .into_iter()
            .map(|row| SidebarRow {
                id: row.node.id.clone(),
                label: row.node.label.clone(),
                icon: row.node.icon.clone(),
                path: row.node.path.clone(),
                depth: row.depth,
                indent: row.indent(SIDEBAR_INDENT_BASE, INDENT_STEP),
                active: self.active.contains(&row.node.id),
                expanded: expanded.contains(&row.node.id),
                has_children: row.has_children,
            })
            .collect()
    }

    fn recompute(&mut self) {
        self.active = self.tree.active_set(&self.current_path);
        self.expanded = ExpandedSet::for_route(&self.tree, &self.current_path);
    }
}
