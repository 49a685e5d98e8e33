//! Menu Tree Core
//!
//! Shared menu data types, the arena-backed tree with its traversals, and the
//! two screens that consume it:
//!
//! - **Navigation shell** ([`nav`]): collapsible sidebar, active-path
//!   highlighting, auto-expansion on navigation, manual toggling.
//! - **Admin screen** ([`admin`], [`controller`]): CRUD over the menu
//!   resource with a full reload after every mutation.
//!
//! Both screens render through the same [`MenuTree::walk`] traversal.

pub mod admin;
pub mod controller;
pub mod nav;
pub mod tree;
pub mod types;

pub use admin::{
    AdminConfig, AdminError, AdminRow, AdminScreen, DeleteOutcome, DeleteRequest, FormError,
    FormMode, MenuForm, Mutation, ParentPolicy, Pending, ScreenState, SubmitFailureMode,
    SubmitOutcome,
};
pub use controller::{AdminController, Confirm};
pub use nav::{ClickOutcome, ExpandedSet, LoadState, RoutePolicy, SidebarModel, SidebarRow};
pub use tree::{MenuTree, TreeError, TreeRow};
pub use types::{CreateMenuRequest, MenuId, MenuNode, UpdateMenuRequest};

/// Token handed out when a screen starts a request.
///
/// A response is applied only if its ticket is still the screen's latest;
/// starting new work or detaching the screen invalidates older tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub(crate) fn new(generation: u64) -> Self {
        Self(generation)
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.0 == generation
    }

    pub fn generation(&self) -> u64 {
        self.0
    }
}
