//! Data Transfer Objects
//!
//! Response types owned by the development backend. Menu and auth payloads
//! are shared with the client and live in [`crate::menu::types`] and
//! [`crate::auth`].

use serde::{Deserialize, Serialize};

/// Full health status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Number of stored menu items
    pub menu_items: usize,
    /// Number of registered development accounts
    pub accounts: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
