//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::api::accounts::Accounts;
use crate::config::ApiConfig;
use crate::store::MenuStore;

/// Shared application state for all handlers
pub struct AppState {
    /// Authoritative menu resource
    pub menus: RwLock<MenuStore>,
    /// Development accounts and their issued tokens
    pub accounts: RwLock<Accounts>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state, seeding the demo menus when configured
    pub fn new(config: ApiConfig) -> Self {
        let store = if config.seed_demo_menus {
            MenuStore::seeded_demo()
        } else {
            MenuStore::new()
        };
        Self::with_store(store, config)
    }

    /// Create state over an existing store
    pub fn with_store(store: MenuStore, config: ApiConfig) -> Self {
        Self {
            menus: RwLock::new(store),
            accounts: RwLock::new(Accounts::default()),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
