//! Pages
//!
//! Top-level page components for each route.

pub mod dashboard;
pub mod login;
pub mod menu_management;
pub mod register;

pub use dashboard::Dashboard;
pub use login::Login;
pub use menu_management::MenuManagement;
pub use register::Register;
