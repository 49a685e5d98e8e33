//! Gateways
//!
//! Typed wrappers over the REST endpoints the dashboard consumes. Every call
//! is a fresh round trip: no retry, no caching, no deduplication. Timeouts
//! belong to the transport.
//!
//! The traits are `?Send` because the frontend runs them on the browser's
//! single-threaded executor.
//!
//! - [`memory`]: in-process gateway that records every call
//! - [`http`]: reqwest implementation (feature `native`)

pub mod memory;

#[cfg(feature = "native")]
pub mod http;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::auth::{JwtResponse, LoginRequest, RegisterRequest};
use crate::menu::types::{CreateMenuRequest, MenuNode, UpdateMenuRequest};
use crate::session::User;
use crate::stock::{ChartPoint, StockParseError, StockQuote};

/// Menu collection endpoint
pub const MENUS_PATH: &str = "/api/menus";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const CURRENT_USER_PATH: &str = "/api/user/me";
pub const PROFILE_PATH: &str = "/api/user/profile";
pub const STOCK_PRICE_PATH: &str = "/api/stock/price";
pub const STOCK_CHART_PATH: &str = "/api/stock/chart";

/// Chart window when the caller does not pick one
pub const DEFAULT_CHART_DAYS: u32 = 7;

/// `/api/menus/{id}` with the id percent-encoded
pub fn menu_path(id: &str) -> String {
    format!("{}/{}", MENUS_PATH, urlencoding::encode(id))
}

/// `/api/stock/price/{code}`
pub fn stock_price_path(code: &str) -> String {
    format!("{}/{}", STOCK_PRICE_PATH, urlencoding::encode(code))
}

/// `/api/stock/chart/{code}?days={days}`
pub fn stock_chart_path(code: &str, days: u32) -> String {
    format!("{}/{}?days={}", STOCK_CHART_PATH, urlencoding::encode(code), days)
}

/// Gateway failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Network unreachable, connection reset, timeout
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx status from the server
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// 2xx response whose body did not decode
    #[error("Decode error: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Build a rejection from a status and raw body, preferring the
    /// server's structured `{"error": {"message": ...}}` when present.
    pub fn from_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct Envelope {
            error: Detail,
        }
        #[derive(Deserialize)]
        struct Detail {
            message: String,
        }

        let message = serde_json::from_str::<Envelope>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.trim().to_string()
                }
            });

        GatewayError::Server { status, message }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, GatewayError::Server { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for gateway calls
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Typed access to the menu resource
#[async_trait(?Send)]
pub trait MenuGateway {
    /// `GET /api/menus`: root nodes with nested children.
    ///
    /// `force_refresh` is accepted for API compatibility; the fetch is
    /// always unconditional.
    async fn list(&self, force_refresh: bool) -> GatewayResult<Vec<MenuNode>>;

    /// `POST /api/menus`
    async fn create(&self, request: &CreateMenuRequest) -> GatewayResult<MenuNode>;

    /// `PUT /api/menus/{id}`
    async fn update(&self, id: &str, request: &UpdateMenuRequest) -> GatewayResult<MenuNode>;

    /// `DELETE /api/menus/{id}`
    async fn delete(&self, id: &str) -> GatewayResult<()>;
}

/// Typed access to the authentication endpoints
#[async_trait(?Send)]
pub trait AuthGateway {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<JwtResponse>;

    async fn register(&self, request: &RegisterRequest) -> GatewayResult<JwtResponse>;

    /// `GET /api/user/me`
    async fn current_user(&self) -> GatewayResult<User>;

    /// `GET /api/user/profile`
    async fn profile(&self) -> GatewayResult<User>;
}

/// Quotes and price history from the stock-data service.
///
/// Grouped numeric strings are parsed here; a value that does not parse is
/// a [`GatewayError::Decode`].
#[async_trait(?Send)]
pub trait StockGateway {
    /// `GET /api/stock/price/{code}`
    async fn price(&self, code: &str) -> GatewayResult<StockQuote>;

    /// `GET /api/stock/chart/{code}?days={days}`
    async fn chart(&self, code: &str, days: u32) -> GatewayResult<Vec<ChartPoint>>;
}

impl From<StockParseError> for GatewayError {
    fn from(e: StockParseError) -> Self {
        GatewayError::Decode(e.to_string())
    }
}
