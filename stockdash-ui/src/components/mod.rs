//! UI Components
//!
//! Reusable Leptos components for the dashboard shell.

pub mod header;
pub mod loading;
pub mod menu_row;
pub mod shell;
pub mod sidebar;
pub mod toast;

pub use header::Header;
pub use loading::{InlineLoading, Loading};
pub use menu_row::MenuLabel;
pub use shell::{Shell, SidebarContext};
pub use sidebar::Sidebar;
pub use toast::Toast;
