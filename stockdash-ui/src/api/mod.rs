//! API Access
//!
//! Browser implementation of the menu and auth gateways, plus the local
//! storage keys the dashboard keeps between visits.

pub mod client;

pub use client::{clear_token, get_api_base, load_token, store_token, GlooGateway};
