//! State Management
//!
//! Global application state: session, notifications and the menu version.

pub mod global;

pub use global::{provide_global_state, GlobalState};
