//! # Stockdash
//!
//! Navigation core of an investment-tracking dashboard: a hierarchical,
//! server-managed menu rendered as a collapsible sidebar and edited through
//! an admin screen.
//!
//! ## Features
//!
//! - **Menu tree**: arena-backed tree with stack-based traversal, so deep
//!   hierarchies never recurse
//! - **Active-path resolution**: a node is active when its path, or any
//!   descendant's path, matches the current route
//! - **Screens as state machines**: sidebar and admin screen drop stale
//!   responses and reload the whole tree after every mutation
//! - **Gateways**: typed menu, auth and stock endpoints over reqwest, or in memory
//! - **Development backend**: Axum server for the menu and auth endpoints
//!
//! ## Modules
//!
//! - [`menu`]: types, tree, sidebar and admin screen
//! - [`gateway`]: menu/auth gateway traits and implementations
//! - [`store`]: in-memory authoritative menu storage
//! - [`session`], [`auth`]: signed-in user and auth payloads
//! - [`stock`]: parsing of the stock service's grouped numbers
//! - [`api`]: development backend (feature `native`)
//!
//! ## Quick Start
//!
//! ```rust
//! use stockdash::menu::{MenuNode, RoutePolicy, SidebarModel};
//!
//! let roots = vec![
//!     MenuNode::new("1", "Dashboard", "📊", "/dashboard"),
//!     MenuNode::new("2", "Admin", "⚙️", "/admin")
//!         .child(MenuNode::new("3", "Menus", "🧭", "/admin/menus")),
//! ];
//!
//! let mut sidebar = SidebarModel::new(RoutePolicy::default(), "/admin/menus");
//! let ticket = sidebar.begin_load();
//! sidebar.finish_load(ticket, Ok(roots));
//!
//! // Both Admin and Menus are active; Admin is expanded
//! assert!(sidebar.is_active("2"));
//! assert_eq!(sidebar.rows().len(), 3);
//! ```

pub mod auth;
pub mod gateway;
pub mod menu;
pub mod session;
pub mod stock;
pub mod store;

#[cfg(feature = "native")]
pub mod api;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;

// Re-export top-level types for convenience
pub use menu::{
    AdminConfig, AdminController, AdminScreen, ClickOutcome, CreateMenuRequest, ExpandedSet,
    MenuId, MenuNode, MenuTree, RoutePolicy, SidebarModel, UpdateMenuRequest,
};

pub use gateway::{AuthGateway, GatewayError, GatewayResult, MenuGateway, StockGateway};

pub use gateway::memory::MemoryMenuGateway;

#[cfg(feature = "native")]
pub use gateway::http::HttpGateway;

pub use session::{Session, User};

pub use store::{MenuStore, StoreError};

#[cfg(feature = "native")]
pub use api::{build_router, serve, ApiError, AppState};

#[cfg(feature = "native")]
pub use config::{ApiConfig, ClientConfig, Config, ConfigError, LoggingConfig};
