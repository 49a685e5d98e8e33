//! StockDash Dashboard
//!
//! Investment-tracking dashboard shell built with Leptos (WASM).
//!
//! # Features
//!
//! - Email/password login and registration
//! - Collapsible sidebar rendered from the server-managed menu tree
//! - Menu management screen (create, edit, delete menu items)
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Screen logic lives in the shared `stockdash` crate; the
//! components here hold its state machines in signals and feed them the
//! responses of the HTTP gateway.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
